//! The las header as laid out on disk.

use crate::{
    feature::{Evlrs, LargeFiles, Waveforms},
    raw::LASF,
    Error, Result, Version,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// A raw las header.
///
/// The first 227 bytes are common to every version. Las 1.3 appends the
/// start of the waveform data packet record, las 1.4 appends the evlr block
/// and the 64 bit point counts. Anything between the end of the
/// version-defined block and the declared `header_size` is preserved
/// verbatim in `padding`.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Must be "LASF".
    pub file_signature: [u8; 4],

    /// For airborne data, often the flight line number.
    pub file_source_id: u16,

    /// A bit field of global properties, e.g. the meaning of gps time.
    pub global_encoding: u16,

    /// The project identifier.
    pub guid: [u8; 16],

    /// The las version of this file.
    pub version: Version,

    /// The hardware or operation that produced the data.
    pub system_identifier: [u8; 32],

    /// The software that produced the file.
    pub generating_software: [u8; 32],

    /// GMT day of the year the file was created, January 1st being day 1.
    pub file_creation_day_of_year: u16,

    /// The four digit year the file was created.
    pub file_creation_year: u16,

    /// The size of this header, extensions included.
    pub header_size: u16,

    /// The number of bytes from the start of the file to the first point
    /// record.
    pub offset_to_point_data: u32,

    /// The number of variable length records after the header.
    pub number_of_variable_length_records: u32,

    /// The point format id byte.
    ///
    /// Bit 7 flags laszip compression, bit 6 is reserved.
    pub point_data_record_format: u8,

    /// The on-disk size of one point record, extra bytes included.
    pub point_data_record_length: u16,

    /// The total number of points, or zero when the 64 bit count of las 1.4
    /// must be used instead.
    pub number_of_point_records: u32,

    /// Per-return point counts, clamped to u32.
    pub number_of_points_by_return: [u32; 5],

    #[allow(missing_docs)]
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    #[allow(missing_docs)]
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,
    #[allow(missing_docs)]
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// The offset to the first byte of the waveform data package record,
    /// las 1.3 and later.
    pub start_of_waveform_data_packet_record: Option<u64>,

    /// The extended variable length record block, las 1.4.
    pub evlr: Option<Evlr>,

    /// The 64 bit point counts, las 1.4.
    pub large_file: Option<LargeFile>,

    /// Bytes between the version-defined header block and the declared
    /// header size, preserved as-is.
    pub padding: Vec<u8>,
}

/// The extended variable length record block of the las 1.4 header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evlr {
    /// Offset from the start of the file to the first evlr.
    pub start_of_first_evlr: u64,

    /// The number of evlrs stored after the point data.
    pub number_of_evlrs: u32,
}

/// The 64 bit point counts of the las 1.4 header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LargeFile {
    /// The total number of points. Always authoritative when present.
    pub number_of_point_records: u64,

    /// Per-return point counts, fifteen entries.
    pub number_of_points_by_return: [u64; 15],
}

impl Header {
    /// Reads a raw header.
    ///
    /// Fails if the file signature is not "LASF". Other validation (version,
    /// point format, record length) happens when converting to a
    /// [Header](crate::Header).
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::raw::Header;
    /// use std::io::Cursor;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let header = Header::read_from(cursor).unwrap();
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let mut header = Header::default();
        read.read_exact(&mut header.file_signature)?;
        if header.file_signature != LASF {
            return Err(Error::InvalidSignature(header.file_signature));
        }
        header.file_source_id = read.read_u16::<LittleEndian>()?;
        header.global_encoding = read.read_u16::<LittleEndian>()?;
        read.read_exact(&mut header.guid)?;
        let major = read.read_u8()?;
        let minor = read.read_u8()?;
        header.version = Version::new(major, minor);
        read.read_exact(&mut header.system_identifier)?;
        read.read_exact(&mut header.generating_software)?;
        header.file_creation_day_of_year = read.read_u16::<LittleEndian>()?;
        header.file_creation_year = read.read_u16::<LittleEndian>()?;
        header.header_size = read.read_u16::<LittleEndian>()?;
        header.offset_to_point_data = read.read_u32::<LittleEndian>()?;
        header.number_of_variable_length_records = read.read_u32::<LittleEndian>()?;
        header.point_data_record_format = read.read_u8()?;
        header.point_data_record_length = read.read_u16::<LittleEndian>()?;
        header.number_of_point_records = read.read_u32::<LittleEndian>()?;
        for n in &mut header.number_of_points_by_return {
            *n = read.read_u32::<LittleEndian>()?;
        }
        header.x_scale_factor = read.read_f64::<LittleEndian>()?;
        header.y_scale_factor = read.read_f64::<LittleEndian>()?;
        header.z_scale_factor = read.read_f64::<LittleEndian>()?;
        header.x_offset = read.read_f64::<LittleEndian>()?;
        header.y_offset = read.read_f64::<LittleEndian>()?;
        header.z_offset = read.read_f64::<LittleEndian>()?;
        header.max_x = read.read_f64::<LittleEndian>()?;
        header.min_x = read.read_f64::<LittleEndian>()?;
        header.max_y = read.read_f64::<LittleEndian>()?;
        header.min_y = read.read_f64::<LittleEndian>()?;
        header.max_z = read.read_f64::<LittleEndian>()?;
        header.min_z = read.read_f64::<LittleEndian>()?;
        if header.version.supports::<Waveforms>() {
            let start = read.read_u64::<LittleEndian>()?;
            header.start_of_waveform_data_packet_record = (start > 0).then_some(start);
        }
        if header.version.supports::<Evlrs>() {
            let evlr = Evlr {
                start_of_first_evlr: read.read_u64::<LittleEndian>()?,
                number_of_evlrs: read.read_u32::<LittleEndian>()?,
            };
            header.evlr = (evlr.number_of_evlrs > 0).then_some(evlr);
        }
        if header.version.supports::<LargeFiles>() {
            let mut large_file = LargeFile {
                number_of_point_records: read.read_u64::<LittleEndian>()?,
                ..Default::default()
            };
            for n in &mut large_file.number_of_points_by_return {
                *n = read.read_u64::<LittleEndian>()?;
            }
            header.large_file = Some(large_file);
        }
        if header.header_size > header.version.header_size() {
            let mut padding =
                vec![0; usize::from(header.header_size - header.version.header_size())];
            read.read_exact(&mut padding)?;
            header.padding = padding;
        }
        Ok(header)
    }

    /// Writes this raw header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::raw::Header;
    /// use std::io::Cursor;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// assert_eq!(227, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u16::<LittleEndian>(self.file_source_id)?;
        write.write_u16::<LittleEndian>(self.global_encoding)?;
        write.write_all(&self.guid)?;
        write.write_u8(self.version.major)?;
        write.write_u8(self.version.minor)?;
        write.write_all(&self.system_identifier)?;
        write.write_all(&self.generating_software)?;
        write.write_u16::<LittleEndian>(self.file_creation_day_of_year)?;
        write.write_u16::<LittleEndian>(self.file_creation_year)?;
        write.write_u16::<LittleEndian>(self.header_size)?;
        write.write_u32::<LittleEndian>(self.offset_to_point_data)?;
        write.write_u32::<LittleEndian>(self.number_of_variable_length_records)?;
        write.write_u8(self.point_data_record_format)?;
        write.write_u16::<LittleEndian>(self.point_data_record_length)?;
        write.write_u32::<LittleEndian>(self.number_of_point_records)?;
        for n in &self.number_of_points_by_return {
            write.write_u32::<LittleEndian>(*n)?;
        }
        write.write_f64::<LittleEndian>(self.x_scale_factor)?;
        write.write_f64::<LittleEndian>(self.y_scale_factor)?;
        write.write_f64::<LittleEndian>(self.z_scale_factor)?;
        write.write_f64::<LittleEndian>(self.x_offset)?;
        write.write_f64::<LittleEndian>(self.y_offset)?;
        write.write_f64::<LittleEndian>(self.z_offset)?;
        write.write_f64::<LittleEndian>(self.max_x)?;
        write.write_f64::<LittleEndian>(self.min_x)?;
        write.write_f64::<LittleEndian>(self.max_y)?;
        write.write_f64::<LittleEndian>(self.min_y)?;
        write.write_f64::<LittleEndian>(self.max_z)?;
        write.write_f64::<LittleEndian>(self.min_z)?;
        if self.version.supports::<Waveforms>() {
            write.write_u64::<LittleEndian>(
                self.start_of_waveform_data_packet_record.unwrap_or(0),
            )?;
        }
        if self.version.supports::<Evlrs>() {
            let evlr = self.evlr.unwrap_or_default();
            write.write_u64::<LittleEndian>(evlr.start_of_first_evlr)?;
            write.write_u32::<LittleEndian>(evlr.number_of_evlrs)?;
        }
        if self.version.supports::<LargeFiles>() {
            let large_file = self.large_file.unwrap_or_default();
            write.write_u64::<LittleEndian>(large_file.number_of_point_records)?;
            for n in &large_file.number_of_points_by_return {
                write.write_u64::<LittleEndian>(*n)?;
            }
        }
        if !self.padding.is_empty() {
            write.write_all(&self.padding)?;
        }
        Ok(())
    }
}

impl Default for Header {
    fn default() -> Header {
        let version = Version::default();
        Header {
            file_signature: LASF,
            file_source_id: 0,
            global_encoding: 0,
            guid: [0; 16],
            version,
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size: version.header_size(),
            offset_to_point_data: u32::from(version.header_size()),
            number_of_variable_length_records: 0,
            point_data_record_format: 0,
            point_data_record_length: 20,
            number_of_point_records: 0,
            number_of_points_by_return: [0; 5],
            x_scale_factor: 1.,
            y_scale_factor: 1.,
            z_scale_factor: 1.,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
            start_of_waveform_data_packet_record: None,
            evlr: None,
            large_file: None,
            padding: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    macro_rules! roundtrip {
        ($name:ident, $minor:expr) => {
            mod $name {
                use super::*;

                #[test]
                fn roundtrip() {
                    let version = Version::new(1, $minor);
                    let mut header = Header {
                        version,
                        header_size: version.header_size(),
                        ..Default::default()
                    };
                    if version.supports::<Waveforms>() {
                        header.start_of_waveform_data_packet_record = Some(42);
                    }
                    if version.supports::<Evlrs>() {
                        header.evlr = Some(Evlr {
                            start_of_first_evlr: 1000,
                            number_of_evlrs: 2,
                        });
                    }
                    if version.supports::<LargeFiles>() {
                        header.large_file = Some(LargeFile {
                            number_of_point_records: 101,
                            number_of_points_by_return: [1; 15],
                        });
                    }
                    let mut cursor = Cursor::new(Vec::new());
                    header.write_to(&mut cursor).unwrap();
                    assert_eq!(
                        usize::from(version.header_size()),
                        cursor.get_ref().len()
                    );
                    cursor.set_position(0);
                    assert_eq!(header, Header::read_from(cursor).unwrap());
                }
            }
        };
    }

    roundtrip!(las_1_0, 0);
    roundtrip!(las_1_1, 1);
    roundtrip!(las_1_2, 2);
    roundtrip!(las_1_3, 3);
    roundtrip!(las_1_4, 4);

    #[test]
    fn invalid_signature() {
        let mut cursor = Cursor::new(Vec::new());
        Header {
            file_signature: *b"XXXX",
            ..Default::default()
        }
        .write_to(&mut cursor)
        .unwrap();
        cursor.set_position(0);
        assert!(matches!(
            Header::read_from(cursor).unwrap_err(),
            Error::InvalidSignature(signature) if &signature == b"XXXX"
        ));
    }

    #[test]
    fn padding_is_preserved() {
        let header = Header {
            header_size: 227 + 4,
            padding: vec![1, 2, 3, 4],
            ..Default::default()
        };
        let mut cursor = Cursor::new(Vec::new());
        header.write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        let header = Header::read_from(cursor).unwrap();
        assert_eq!(vec![1, 2, 3, 4], header.padding);
    }
}
