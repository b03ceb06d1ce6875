//! A [Header] describes the layout, source, and interpretation of the
//! points.
//!
//! Use a [Builder] to configure a header from scratch, or clone the header
//! of an open [Reader](crate::Reader) to copy a file's configuration:
//!
//! ```
//! use las_codec::{Builder, Version};
//!
//! let mut builder = Builder::default();
//! builder.version = Version::new(1, 4);
//! builder.point_format.id = 6;
//! builder.system_identifier = "Synthetic points".to_string();
//! let header = builder.into_header().unwrap();
//! ```

mod builder;

pub use builder::Builder;

use crate::{
    feature::{Evlrs, LargeFiles, Waveforms},
    point::Format,
    raw,
    utils::FromLasStr,
    Bounds, Error, Result, Scaling, Version, Vlr,
};
use chrono::{Datelike, NaiveDate};
use std::io::Write;
use uuid::Uuid;

/// The number of entries in the by-return point histogram.
pub const NUMBER_OF_POINTS_BY_RETURN_SIZE: usize = 15;

/// The number of by-return entries stored by versions before las 1.4.
pub const LEGACY_NUMBER_OF_POINTS_BY_RETURN_SIZE: usize = 5;

/// The metadata block at the front of every las file.
///
/// A header owns its variable length records. The point counts are
/// maintained by the [Writer](crate::Writer) and rewritten when it closes.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub(crate) bounds: Bounds,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) evlr: Option<raw::header::Evlr>,
    pub(crate) file_source_id: u16,
    pub(crate) generating_software: String,
    pub(crate) global_encoding: u16,
    pub(crate) guid: Uuid,
    pub(crate) number_of_points: u64,
    pub(crate) number_of_points_by_return: [u64; NUMBER_OF_POINTS_BY_RETURN_SIZE],
    pub(crate) padding: Vec<u8>,
    pub(crate) point_format: Format,
    pub(crate) scaling: Scaling,
    pub(crate) start_of_waveform_data_packet_record: Option<u64>,
    pub(crate) system_identifier: String,
    pub(crate) version: Version,
    pub(crate) vlrs: Vec<Vlr>,
}

impl Header {
    /// Creates a header from a raw header.
    ///
    /// The raw header's variable length record count is discarded, since the
    /// records themselves cannot be recovered from the fixed block; push
    /// them onto a [Builder] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw, Header};
    /// let header = Header::from_raw(raw::Header::default()).unwrap();
    /// ```
    pub fn from_raw(raw: raw::Header) -> Result<Header> {
        Builder::new(raw).and_then(|builder| builder.into_header())
    }

    /// Returns this header's las version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this header's file source id, often the flight line number.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Returns the global encoding bit field.
    ///
    /// The low bit flags standard (as opposed to week) gps time on the
    /// points.
    pub fn global_encoding(&self) -> u16 {
        self.global_encoding
    }

    /// Returns this header's project id.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Returns the system that produced the points.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns the software that produced the file.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns the file creation date, if one was recorded.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns this header's point format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// assert_eq!(0, Header::default().point_format().id);
    /// ```
    pub fn point_format(&self) -> &Format {
        &self.point_format
    }

    pub(crate) fn point_format_mut(&mut self) -> &mut Format {
        &mut self.point_format
    }

    /// Returns the scales and offsets applied to the stored coordinates.
    pub fn scaling(&self) -> &Scaling {
        &self.scaling
    }

    /// Returns the min/max extents of the points, as recorded in the header.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the number of points in the file.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// assert_eq!(0, Header::default().number_of_points());
    /// ```
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the per-return point counts, indexed by return number.
    pub fn number_of_points_by_return(&self) -> &[u64; NUMBER_OF_POINTS_BY_RETURN_SIZE] {
        &self.number_of_points_by_return
    }

    /// Returns this header's variable length records.
    pub fn vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    /// Returns the offset to the first byte of the waveform data package
    /// record, las 1.3 and later.
    pub fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.start_of_waveform_data_packet_record
    }

    /// Returns the evlr block of a las 1.4 header, if any.
    ///
    /// This codec carries the offsets through; it does not read or write the
    /// records themselves.
    pub fn evlr(&self) -> Option<raw::header::Evlr> {
        self.evlr
    }

    /// Returns the opaque bytes between the standard header block and the
    /// declared header size.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Returns the size of the header as it will be written, padding
    /// included.
    pub fn header_size(&self) -> Result<u16> {
        let header_size = usize::from(self.version.header_size()) + self.padding.len();
        u16::try_from(header_size).map_err(|_| Error::HeaderTooLarge(header_size))
    }

    /// Returns the offset from the start of the file to the first point
    /// record, as it will be written.
    pub fn offset_to_point_data(&self) -> Result<u32> {
        let offset = usize::from(self.header_size()?)
            + self.vlrs.iter().map(Vlr::len).sum::<usize>();
        u32::try_from(offset).map_err(|_| Error::OffsetToPointDataTooLarge(offset))
    }

    /// Converts this header to a raw header.
    ///
    /// Derived fields are computed here: the header size, the offset to the
    /// point data, the clamped legacy point counts, and the compression bit
    /// on the point format byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// let raw = Header::default().to_raw().unwrap();
    /// assert_eq!(b"LASF", &raw.file_signature);
    /// ```
    pub fn to_raw(&self) -> Result<raw::Header> {
        let mut system_identifier = [0; 32];
        system_identifier
            .as_mut()
            .from_las_str(&self.system_identifier)?;
        let mut generating_software = [0; 32];
        generating_software
            .as_mut()
            .from_las_str(&self.generating_software)?;
        Ok(raw::Header {
            file_signature: raw::LASF,
            file_source_id: self.file_source_id,
            global_encoding: self.global_encoding,
            guid: *self.guid.as_bytes(),
            version: self.version,
            system_identifier,
            generating_software,
            file_creation_day_of_year: self.date.map_or(0, |date| date.ordinal() as u16),
            file_creation_year: self.date.map_or(0, |date| date.year() as u16),
            header_size: self.header_size()?,
            offset_to_point_data: self.offset_to_point_data()?,
            number_of_variable_length_records: u32::try_from(self.vlrs.len())
                .map_err(|_| Error::TooManyVlrs(self.vlrs.len()))?,
            point_data_record_format: self.point_format.to_writable_u8(),
            point_data_record_length: self.point_format.len(),
            number_of_point_records: self.legacy_number_of_points()?,
            number_of_points_by_return: self.legacy_number_of_points_by_return(),
            x_scale_factor: self.scaling.scales.x,
            y_scale_factor: self.scaling.scales.y,
            z_scale_factor: self.scaling.scales.z,
            x_offset: self.scaling.offsets.x,
            y_offset: self.scaling.offsets.y,
            z_offset: self.scaling.offsets.z,
            max_x: self.bounds.max.x,
            min_x: self.bounds.min.x,
            max_y: self.bounds.max.y,
            min_y: self.bounds.min.y,
            max_z: self.bounds.max.z,
            min_z: self.bounds.min.z,
            start_of_waveform_data_packet_record: if self.version.supports::<Waveforms>() {
                self.start_of_waveform_data_packet_record
            } else {
                None
            },
            evlr: if self.version.supports::<Evlrs>() {
                self.evlr
            } else {
                None
            },
            large_file: self.version.supports::<LargeFiles>().then(|| {
                raw::header::LargeFile {
                    number_of_point_records: self.number_of_points,
                    number_of_points_by_return: self.number_of_points_by_return,
                }
            }),
            padding: self.padding.clone(),
        })
    }

    /// Writes this header, its variable length records included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// use std::io::Cursor;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.to_raw()?.write_to(&mut write)?;
        for vlr in &self.vlrs {
            vlr.clone().into_raw()?.write_to(&mut write)?;
        }
        Ok(())
    }

    /// Checks that this header can be written at all.
    ///
    /// The version must be recognized and must support the point format.
    pub(crate) fn validate_for_writing(&self) -> Result<()> {
        if !self.version.is_supported() {
            return Err(Error::InvalidVersion(self.version));
        }
        if self.point_format.id > 10 {
            return Err(Error::InvalidPointFormat(self.point_format.id));
        }
        self.version
            .verify_support_for_point_format(self.point_format.id)
    }

    pub(crate) fn clear_point_counts(&mut self) {
        self.number_of_points = 0;
        self.number_of_points_by_return = [0; NUMBER_OF_POINTS_BY_RETURN_SIZE];
    }

    /// Accounts for one written point with the given return number.
    ///
    /// The histogram bucket is the return number clamped to the family's
    /// legal range.
    pub(crate) fn add_return(&mut self, return_number: u8) {
        let max = if self.point_format.is_extended() {
            NUMBER_OF_POINTS_BY_RETURN_SIZE - 1
        } else {
            LEGACY_NUMBER_OF_POINTS_BY_RETURN_SIZE - 1
        };
        self.number_of_points_by_return[usize::from(return_number).min(max)] += 1;
        self.number_of_points += 1;
    }

    fn legacy_number_of_points(&self) -> Result<u32> {
        if self.number_of_points > u64::from(u32::MAX) {
            if self.version.supports::<LargeFiles>() {
                Ok(0)
            } else {
                Err(Error::PointCountTooHigh(self.number_of_points))
            }
        } else {
            Ok(self.number_of_points as u32)
        }
    }

    fn legacy_number_of_points_by_return(
        &self,
    ) -> [u32; LEGACY_NUMBER_OF_POINTS_BY_RETURN_SIZE] {
        let mut legacy = [0; LEGACY_NUMBER_OF_POINTS_BY_RETURN_SIZE];
        for (legacy, n) in legacy.iter_mut().zip(&self.number_of_points_by_return) {
            *legacy = u32::try_from(*n).unwrap_or(u32::MAX);
        }
        legacy
    }
}

impl Default for Header {
    fn default() -> Header {
        Builder::default()
            .into_header()
            .expect("the default builder always produces a header")
    }
}

impl<V: Into<Version>> From<V> for Header {
    fn from(version: V) -> Header {
        let mut builder = Builder::default();
        builder.version = version.into();
        builder
            .into_header()
            .expect("a builder with only a version set always produces a header")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_offset_includes_vlrs() {
        let mut builder = Builder::default();
        builder.vlrs.push(Vlr {
            data: vec![0; 10],
            ..Default::default()
        });
        let header = builder.into_header().unwrap();
        let raw = header.to_raw().unwrap();
        assert_eq!(227 + 54 + 10, raw.offset_to_point_data);
        assert_eq!(1, raw.number_of_variable_length_records);
    }

    #[test]
    fn point_count_too_high_for_legacy_versions() {
        let mut header = Header::from((1, 2));
        header.number_of_points = u64::from(u32::MAX) + 1;
        assert!(matches!(
            header.to_raw().unwrap_err(),
            Error::PointCountTooHigh(_)
        ));
    }

    #[test]
    fn point_count_exactly_at_the_legacy_limit() {
        let mut header = Header::from((1, 2));
        header.number_of_points = u64::from(u32::MAX);
        assert_eq!(u32::MAX, header.to_raw().unwrap().number_of_point_records);
    }

    #[test]
    fn large_point_counts_are_zeroed_in_the_legacy_field() {
        let mut header = Header::from((1, 4));
        header.number_of_points = u64::from(u32::MAX) + 1;
        let raw = header.to_raw().unwrap();
        assert_eq!(0, raw.number_of_point_records);
        assert_eq!(
            u64::from(u32::MAX) + 1,
            raw.large_file.unwrap().number_of_point_records
        );
    }

    #[test]
    fn by_return_clamps_to_u32() {
        let mut header = Header::from((1, 4));
        header.number_of_points_by_return[1] = u64::from(u32::MAX) + 1;
        let raw = header.to_raw().unwrap();
        assert_eq!(u32::MAX, raw.number_of_points_by_return[1]);
        assert_eq!(
            u64::from(u32::MAX) + 1,
            raw.large_file.unwrap().number_of_points_by_return[1]
        );
    }

    #[test]
    fn add_return_clamps_to_the_family_range() {
        let mut header = Header::from((1, 2));
        header.add_return(9);
        assert_eq!(1, header.number_of_points_by_return[4]);

        let mut header = Header::from((1, 4));
        header.point_format_mut().id = 6;
        header.add_return(9);
        assert_eq!(1, header.number_of_points_by_return[9]);
        header.add_return(200);
        assert_eq!(1, header.number_of_points_by_return[14]);
    }

    #[test]
    fn compression_bit_on_the_format_byte() {
        let mut header = Header::default();
        header.point_format_mut().is_compressed = true;
        assert_eq!(0x80, header.to_raw().unwrap().point_data_record_format);
    }

    #[test]
    fn extra_bytes_grow_the_record_length() {
        let mut header = Header::default();
        header.point_format_mut().extra_bytes = 5;
        assert_eq!(25, header.to_raw().unwrap().point_data_record_length);
    }

    #[test]
    fn write_validation() {
        let mut builder = Builder::default();
        builder.version = Version::new(1, 2);
        builder.point_format = Format::new(6).unwrap();
        let header = builder.into_header().unwrap();
        assert!(matches!(
            header.validate_for_writing().unwrap_err(),
            Error::IncompatibleVersionAndFormat {
                format_id: 6,
                ..
            }
        ));
    }
}
