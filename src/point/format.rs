use crate::{Error, Result};
use std::fmt;

/// The compression flag on the on-disk point format id byte.
const COMPRESSION_BIT: u8 = 0x80;
/// Bits 6 and 7 of the id byte are transport metadata, not format id.
const FORMAT_ID_MASK: u8 = 0x3f;

/// A point format describes the layout of each point record.
///
/// The format id selects one of the eleven record layouts of the las
/// specification, `extra_bytes` is the per-point user payload appended after
/// the standard fields, and `is_compressed` records whether the point data
/// is laszip-compressed (bit 7 of the on-disk id byte, never part of the id
/// itself).
///
/// # Examples
///
/// ```
/// use las_codec::point::Format;
/// let format = Format::new(1).unwrap();
/// assert!(format.has_gps_time());
/// assert_eq!(28, format.standard_size());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Format {
    /// The format id, between 0 and 10.
    pub id: u8,

    /// The number of extra bytes appended to each point record.
    pub extra_bytes: u16,

    /// Is the point data compressed?
    pub is_compressed: bool,
}

impl Format {
    /// Creates a new point format, validating the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(Format::new(10).is_ok());
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(id: u8) -> Result<Format> {
        if id > 10 {
            Err(Error::InvalidPointFormat(id))
        } else {
            Ok(Format {
                id,
                extra_bytes: 0,
                is_compressed: false,
            })
        }
    }

    /// Creates a point format from the on-disk id byte and record length.
    ///
    /// Bit 7 of the id byte marks compression, bit 6 is reserved; both are
    /// masked off before validating the id. Any record length beyond the
    /// standard size of the format becomes `extra_bytes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// let format = Format::from_id_and_record_length(0x80, 24).unwrap();
    /// assert_eq!(0, format.id);
    /// assert!(format.is_compressed);
    /// assert_eq!(4, format.extra_bytes);
    /// ```
    pub fn from_id_and_record_length(id: u8, record_length: u16) -> Result<Format> {
        let is_compressed = id & COMPRESSION_BIT == COMPRESSION_BIT;
        let mut format = Format::new(id & FORMAT_ID_MASK)?;
        format.is_compressed = is_compressed;
        let minimum = format.standard_size();
        if record_length < minimum {
            return Err(Error::InvalidPointSize {
                size: record_length,
                format_id: format.id,
                minimum,
            });
        }
        format.extra_bytes = record_length - minimum;
        Ok(format)
    }

    /// Is this format in the extended family introduced by las 1.4?
    pub fn is_extended(&self) -> bool {
        self.id >= 6
    }

    /// Does each record carry a gps time?
    pub fn has_gps_time(&self) -> bool {
        matches!(self.id, 1 | 3 | 4 | 5) || self.is_extended()
    }

    /// Does each record carry red, green, and blue channels?
    pub fn has_color(&self) -> bool {
        matches!(self.id, 2 | 3 | 5 | 7 | 8 | 10)
    }

    /// Does each record carry a near-infrared channel?
    pub fn has_nir(&self) -> bool {
        matches!(self.id, 8 | 10)
    }

    /// Does each record carry a wave packet?
    pub fn has_waveform(&self) -> bool {
        matches!(self.id, 4 | 5 | 9 | 10)
    }

    /// Returns the size of a record in this format without extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().standard_size());
    /// assert_eq!(30, Format::new(6).unwrap().standard_size());
    /// ```
    pub fn standard_size(&self) -> u16 {
        let mut size = if self.is_extended() { 30 } else { 20 };
        if !self.is_extended() && self.has_gps_time() {
            size += 8;
        }
        if self.has_color() {
            size += 6;
        }
        if self.has_nir() {
            size += 2;
        }
        if self.has_waveform() {
            size += crate::raw::point::WAVE_PACKET_SIZE as u16;
        }
        size
    }

    /// Returns the full on-disk size of a record, extra bytes included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// let mut format = Format::new(0).unwrap();
    /// format.extra_bytes = 2;
    /// assert_eq!(22, format.len());
    /// ```
    pub fn len(&self) -> u16 {
        self.standard_size() + self.extra_bytes
    }

    /// Returns the id byte as written to disk, compression bit included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// let mut format = Format::new(1).unwrap();
    /// assert_eq!(1, format.to_writable_u8());
    /// format.is_compressed = true;
    /// assert_eq!(0x81, format.to_writable_u8());
    /// ```
    pub fn to_writable_u8(&self) -> u8 {
        if self.is_compressed {
            self.id | COMPRESSION_BIT
        } else {
            self.id
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extra_bytes > 0 {
            write!(f, "{} (+{} extra bytes)", self.id, self.extra_bytes)
        } else {
            write!(f, "{}", self.id)
        }
    }
}
