//! Raw point records, as laid out on disk.
//!
//! The las specification defines two record families: formats 0 to 5 carry a
//! twenty byte core introduced with las 1.0, formats 6 to 10 carry a thirty
//! byte core introduced with las 1.4. [RawPoint] is the tagged variant over
//! the two, discriminated by its format id.

use crate::{point::Format, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// The size of an on-disk wave packet.
pub const WAVE_PACKET_SIZE: usize = 29;

/// Wave packet information, present on formats 4, 5, 9, and 10.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WavePacket {
    /// The record id of the waveform packet descriptor, minus 99.
    pub descriptor_index: u8,

    /// Offset of the waveform data, relative to the start of the waveform
    /// data package record.
    pub byte_offset_to_data: u64,

    /// The size of the waveform packet in bytes.
    pub size_in_bytes: u32,

    /// Offset from the first digitized value to the detected return, in
    /// picoseconds.
    pub return_point_waveform_location: f32,

    /// X of the parametric line equation for extrapolating along the wave.
    pub x_t: f32,
    #[allow(missing_docs)]
    pub y_t: f32,
    #[allow(missing_docs)]
    pub z_t: f32,
}

impl WavePacket {
    fn read_from<R: Read>(mut read: R) -> Result<WavePacket> {
        Ok(WavePacket {
            descriptor_index: read.read_u8()?,
            byte_offset_to_data: read.read_u64::<LittleEndian>()?,
            size_in_bytes: read.read_u32::<LittleEndian>()?,
            return_point_waveform_location: read.read_f32::<LittleEndian>()?,
            x_t: read.read_f32::<LittleEndian>()?,
            y_t: read.read_f32::<LittleEndian>()?,
            z_t: read.read_f32::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u8(self.descriptor_index)?;
        write.write_u64::<LittleEndian>(self.byte_offset_to_data)?;
        write.write_u32::<LittleEndian>(self.size_in_bytes)?;
        write.write_f32::<LittleEndian>(self.return_point_waveform_location)?;
        write.write_f32::<LittleEndian>(self.x_t)?;
        write.write_f32::<LittleEndian>(self.y_t)?;
        write.write_f32::<LittleEndian>(self.z_t)?;
        Ok(())
    }
}

/// A raw record of the legacy family, formats 0 to 5.
///
/// Every field is always present in memory. Fields that the owning format
/// does not store are ignored by the codec and should be left at zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point10 {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The pulse return magnitude, normalized to sixteen bits.
    pub intensity: u16,

    /// The pulse return number, three bits.
    pub return_number: u8,

    /// The total number of returns for the pulse, three bits.
    pub number_of_returns: u8,

    /// The travel direction of the scanner mirror at the time of the pulse.
    pub scan_direction_flag: bool,

    /// Is this point at the end of a scan line?
    pub edge_of_flight_line: bool,

    /// The ASPRS classification, five bits in this family.
    pub classification: u8,

    /// Was this point created by a technique other than lidar collection?
    pub synthetic: bool,

    /// Is this point a model key-point?
    pub key_point: bool,

    /// Should this point be skipped during processing?
    pub withheld: bool,

    /// The angle of the output laser pulse, in degrees from nadir.
    pub scan_angle_rank: i8,

    /// Used at the user's discretion.
    pub user_data: u8,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time tag at which the point was acquired, formats 1, 3, 4, 5.
    pub gps_time: f64,

    /// Red image channel, formats 2, 3, 5.
    pub red: u16,
    #[allow(missing_docs)]
    pub green: u16,
    #[allow(missing_docs)]
    pub blue: u16,

    /// Waveform information, formats 4 and 5.
    pub wave_packet: WavePacket,

    /// The user-defined record tail, sized by the point format.
    pub extra_bytes: Vec<u8>,
}

/// A raw record of the extended family, formats 6 to 10.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point14 {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The pulse return magnitude, normalized to sixteen bits.
    pub intensity: u16,

    /// The pulse return number, four bits.
    pub return_number: u8,

    /// The total number of returns for the pulse, four bits.
    pub number_of_returns: u8,

    /// Was this point created by a technique other than lidar collection?
    pub synthetic: bool,

    /// Is this point a model key-point?
    pub key_point: bool,

    /// Should this point be skipped during processing?
    pub withheld: bool,

    /// Is this point inside the overlap region of two swaths?
    pub overlap: bool,

    /// The scanner head of a multi-channel system, two bits.
    pub scanner_channel: u8,

    /// The travel direction of the scanner mirror at the time of the pulse.
    pub scan_direction_flag: bool,

    /// Is this point at the end of a scan line?
    pub edge_of_flight_line: bool,

    /// The ASPRS classification, a full byte in this family.
    pub classification: u8,

    /// Used at the user's discretion.
    pub user_data: u8,

    /// The rotational position of the pulse, in 0.006 degree increments.
    pub scan_angle: i16,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time tag at which the point was acquired, always present.
    pub gps_time: f64,

    /// Red image channel, formats 7, 8, 10.
    pub red: u16,
    #[allow(missing_docs)]
    pub green: u16,
    #[allow(missing_docs)]
    pub blue: u16,

    /// Near infrared channel, formats 8 and 10.
    pub nir: u16,

    /// Waveform information, formats 9 and 10.
    pub wave_packet: WavePacket,

    /// The user-defined record tail, sized by the point format.
    pub extra_bytes: Vec<u8>,
}

impl Point10 {
    fn read_from<R: Read>(mut read: R, format: &Format) -> Result<Point10> {
        debug_assert!(!format.is_extended());

        let mut point = Point10 {
            x: read.read_i32::<LittleEndian>()?,
            y: read.read_i32::<LittleEndian>()?,
            z: read.read_i32::<LittleEndian>()?,
            intensity: read.read_u16::<LittleEndian>()?,
            ..Default::default()
        };
        let packed = read.read_u8()?;
        point.return_number = packed & 0b0000_0111;
        point.number_of_returns = (packed >> 3) & 0b0000_0111;
        point.scan_direction_flag = (packed >> 6) & 1 == 1;
        point.edge_of_flight_line = (packed >> 7) & 1 == 1;
        let packed = read.read_u8()?;
        point.classification = packed & 0b0001_1111;
        point.synthetic = (packed >> 5) & 1 == 1;
        point.key_point = (packed >> 6) & 1 == 1;
        point.withheld = (packed >> 7) & 1 == 1;
        point.scan_angle_rank = read.read_i8()?;
        point.user_data = read.read_u8()?;
        point.point_source_id = read.read_u16::<LittleEndian>()?;
        if format.has_gps_time() {
            point.gps_time = read.read_f64::<LittleEndian>()?;
        }
        if format.has_color() {
            point.red = read.read_u16::<LittleEndian>()?;
            point.green = read.read_u16::<LittleEndian>()?;
            point.blue = read.read_u16::<LittleEndian>()?;
        }
        if format.has_waveform() {
            point.wave_packet = WavePacket::read_from(&mut read)?;
        }
        point.extra_bytes = vec![0; usize::from(format.extra_bytes)];
        read.read_exact(&mut point.extra_bytes)?;
        Ok(point)
    }

    fn write_to<W: Write>(&self, mut write: W, format: &Format) -> Result<()> {
        debug_assert!(!format.is_extended());
        debug_assert_eq!(usize::from(format.extra_bytes), self.extra_bytes.len());

        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        let mut packed = self.return_number & 0b0000_0111;
        packed |= (self.number_of_returns & 0b0000_0111) << 3;
        packed |= u8::from(self.scan_direction_flag) << 6;
        packed |= u8::from(self.edge_of_flight_line) << 7;
        write.write_u8(packed)?;
        let mut packed = self.classification & 0b0001_1111;
        packed |= u8::from(self.synthetic) << 5;
        packed |= u8::from(self.key_point) << 6;
        packed |= u8::from(self.withheld) << 7;
        write.write_u8(packed)?;
        write.write_i8(self.scan_angle_rank)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        if format.has_gps_time() {
            write.write_f64::<LittleEndian>(self.gps_time)?;
        }
        if format.has_color() {
            write.write_u16::<LittleEndian>(self.red)?;
            write.write_u16::<LittleEndian>(self.green)?;
            write.write_u16::<LittleEndian>(self.blue)?;
        }
        if format.has_waveform() {
            self.wave_packet.write_to(&mut write)?;
        }
        write.write_all(&self.extra_bytes)?;
        Ok(())
    }
}

impl Point14 {
    fn read_from<R: Read>(mut read: R, format: &Format) -> Result<Point14> {
        debug_assert!(format.is_extended());

        let mut point = Point14 {
            x: read.read_i32::<LittleEndian>()?,
            y: read.read_i32::<LittleEndian>()?,
            z: read.read_i32::<LittleEndian>()?,
            intensity: read.read_u16::<LittleEndian>()?,
            ..Default::default()
        };
        let packed = read.read_u8()?;
        point.return_number = packed & 0b0000_1111;
        point.number_of_returns = (packed >> 4) & 0b0000_1111;
        let packed = read.read_u8()?;
        point.synthetic = packed & 1 == 1;
        point.key_point = (packed >> 1) & 1 == 1;
        point.withheld = (packed >> 2) & 1 == 1;
        point.overlap = (packed >> 3) & 1 == 1;
        point.scanner_channel = (packed >> 4) & 0b0000_0011;
        point.scan_direction_flag = (packed >> 6) & 1 == 1;
        point.edge_of_flight_line = (packed >> 7) & 1 == 1;
        point.classification = read.read_u8()?;
        point.user_data = read.read_u8()?;
        point.scan_angle = read.read_i16::<LittleEndian>()?;
        point.point_source_id = read.read_u16::<LittleEndian>()?;
        point.gps_time = read.read_f64::<LittleEndian>()?;
        if format.has_color() {
            point.red = read.read_u16::<LittleEndian>()?;
            point.green = read.read_u16::<LittleEndian>()?;
            point.blue = read.read_u16::<LittleEndian>()?;
        }
        if format.has_nir() {
            point.nir = read.read_u16::<LittleEndian>()?;
        }
        if format.has_waveform() {
            point.wave_packet = WavePacket::read_from(&mut read)?;
        }
        point.extra_bytes = vec![0; usize::from(format.extra_bytes)];
        read.read_exact(&mut point.extra_bytes)?;
        Ok(point)
    }

    fn write_to<W: Write>(&self, mut write: W, format: &Format) -> Result<()> {
        debug_assert!(format.is_extended());
        debug_assert_eq!(usize::from(format.extra_bytes), self.extra_bytes.len());

        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        let mut packed = self.return_number & 0b0000_1111;
        packed |= (self.number_of_returns & 0b0000_1111) << 4;
        write.write_u8(packed)?;
        let mut packed = u8::from(self.synthetic);
        packed |= u8::from(self.key_point) << 1;
        packed |= u8::from(self.withheld) << 2;
        packed |= u8::from(self.overlap) << 3;
        packed |= (self.scanner_channel & 0b0000_0011) << 4;
        packed |= u8::from(self.scan_direction_flag) << 6;
        packed |= u8::from(self.edge_of_flight_line) << 7;
        write.write_u8(packed)?;
        write.write_u8(self.classification)?;
        write.write_u8(self.user_data)?;
        write.write_i16::<LittleEndian>(self.scan_angle)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        if format.has_color() {
            write.write_u16::<LittleEndian>(self.red)?;
            write.write_u16::<LittleEndian>(self.green)?;
            write.write_u16::<LittleEndian>(self.blue)?;
        }
        if format.has_nir() {
            write.write_u16::<LittleEndian>(self.nir)?;
        }
        if format.has_waveform() {
            self.wave_packet.write_to(&mut write)?;
        }
        write.write_all(&self.extra_bytes)?;
        Ok(())
    }
}

/// A raw point record of either family, tagged by its format id.
///
/// The variant always matches the id partition: legacy records for ids 0 to
/// 5, extended records for ids 6 to 10. Use [RawPoint::prepare] to create a
/// zeroed point matching a format, with its extra bytes already sized:
///
/// ```
/// use las_codec::{point::Format, raw::RawPoint};
/// let mut format = Format::new(6).unwrap();
/// format.extra_bytes = 2;
/// let point = RawPoint::prepare(&format);
/// assert_eq!(6, point.format_id());
/// assert_eq!(2, point.point14().unwrap().extra_bytes.len());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RawPoint {
    format_id: u8,
    pub(crate) data: PointData,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PointData {
    Ten(Point10),
    Fourteen(Point14),
}

impl RawPoint {
    /// Creates a zeroed point of the correct family for the format.
    pub fn prepare(format: &Format) -> RawPoint {
        let extra_bytes = vec![0; usize::from(format.extra_bytes)];
        let data = if format.is_extended() {
            PointData::Fourteen(Point14 {
                extra_bytes,
                ..Default::default()
            })
        } else {
            PointData::Ten(Point10 {
                extra_bytes,
                ..Default::default()
            })
        };
        RawPoint {
            format_id: format.id,
            data,
        }
    }

    /// Reads a raw point record.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{point::Format, raw::RawPoint};
    /// use std::io::Cursor;
    /// let format = Format::new(0).unwrap();
    /// let point = RawPoint::read_from(Cursor::new([0u8; 20]), &format).unwrap();
    /// assert_eq!(point, RawPoint::prepare(&format));
    /// ```
    pub fn read_from<R: Read>(read: R, format: &Format) -> Result<RawPoint> {
        let data = if format.is_extended() {
            PointData::Fourteen(Point14::read_from(read, format)?)
        } else {
            PointData::Ten(Point10::read_from(read, format)?)
        };
        Ok(RawPoint {
            format_id: format.id,
            data,
        })
    }

    /// Writes this raw point record.
    ///
    /// The format must be of the same family as this point, and the point's
    /// extra bytes must match the format's declared length.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{point::Format, raw::RawPoint};
    /// use std::io::Cursor;
    /// let format = Format::new(0).unwrap();
    /// let mut cursor = Cursor::new(Vec::new());
    /// RawPoint::prepare(&format).write_to(&mut cursor, &format).unwrap();
    /// assert_eq!(20, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, write: W, format: &Format) -> Result<()> {
        match &self.data {
            PointData::Ten(point) => point.write_to(write, format),
            PointData::Fourteen(point) => point.write_to(write, format),
        }
    }

    /// Returns the format id this point was prepared or read with.
    pub fn format_id(&self) -> u8 {
        self.format_id
    }

    /// Is this point of the extended family?
    pub fn is_extended(&self) -> bool {
        matches!(self.data, PointData::Fourteen(_))
    }

    /// Returns the legacy record, if this point is of the legacy family.
    pub fn point10(&self) -> Option<&Point10> {
        match &self.data {
            PointData::Ten(point) => Some(point),
            PointData::Fourteen(_) => None,
        }
    }

    /// Returns the legacy record mutably.
    pub fn point10_mut(&mut self) -> Option<&mut Point10> {
        match &mut self.data {
            PointData::Ten(point) => Some(point),
            PointData::Fourteen(_) => None,
        }
    }

    /// Returns the extended record, if this point is of the extended family.
    pub fn point14(&self) -> Option<&Point14> {
        match &self.data {
            PointData::Ten(_) => None,
            PointData::Fourteen(point) => Some(point),
        }
    }

    /// Returns the extended record mutably.
    pub fn point14_mut(&mut self) -> Option<&mut Point14> {
        match &mut self.data {
            PointData::Ten(_) => None,
            PointData::Fourteen(point) => Some(point),
        }
    }

    /// Returns the pulse return number of either family.
    pub fn return_number(&self) -> u8 {
        match &self.data {
            PointData::Ten(point) => point.return_number,
            PointData::Fourteen(point) => point.return_number,
        }
    }

    /// Copies the fields of `source` into this point, converting families
    /// as needed.
    ///
    /// This point keeps its own format id. Widening a legacy record zeroes
    /// `overlap`, `scanner_channel`, and `nir`, and sign-extends the scan
    /// angle rank. Narrowing an extended record truncates the scan angle to
    /// eight bits, masks the classification to five bits and the return
    /// counts to three, and drops `nir`, `overlap`, and `scanner_channel`.
    /// The extra byte lengths of the two points must match.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{point::Format, raw::RawPoint};
    /// let mut legacy = RawPoint::prepare(&Format::new(1).unwrap());
    /// legacy.point10_mut().unwrap().scan_angle_rank = -42;
    /// let mut extended = RawPoint::prepare(&Format::new(6).unwrap());
    /// extended.copy_from_raw(&legacy);
    /// assert_eq!(-42, extended.point14().unwrap().scan_angle);
    /// ```
    pub fn copy_from_raw(&mut self, source: &RawPoint) {
        match (&mut self.data, &source.data) {
            (PointData::Ten(dest), PointData::Ten(source)) => {
                debug_assert_eq!(dest.extra_bytes.len(), source.extra_bytes.len());
                dest.clone_from(source);
            }
            (PointData::Fourteen(dest), PointData::Fourteen(source)) => {
                debug_assert_eq!(dest.extra_bytes.len(), source.extra_bytes.len());
                dest.clone_from(source);
            }
            (PointData::Fourteen(dest), PointData::Ten(source)) => {
                debug_assert_eq!(dest.extra_bytes.len(), source.extra_bytes.len());
                dest.x = source.x;
                dest.y = source.y;
                dest.z = source.z;
                dest.intensity = source.intensity;
                dest.return_number = source.return_number;
                dest.number_of_returns = source.number_of_returns;
                dest.synthetic = source.synthetic;
                dest.key_point = source.key_point;
                dest.withheld = source.withheld;
                dest.overlap = false;
                dest.scanner_channel = 0;
                dest.scan_direction_flag = source.scan_direction_flag;
                dest.edge_of_flight_line = source.edge_of_flight_line;
                dest.classification = source.classification;
                dest.user_data = source.user_data;
                dest.scan_angle = i16::from(source.scan_angle_rank);
                dest.point_source_id = source.point_source_id;
                dest.gps_time = source.gps_time;
                dest.red = source.red;
                dest.green = source.green;
                dest.blue = source.blue;
                dest.nir = 0;
                dest.wave_packet = source.wave_packet;
                dest.extra_bytes.clone_from(&source.extra_bytes);
            }
            (PointData::Ten(dest), PointData::Fourteen(source)) => {
                debug_assert_eq!(dest.extra_bytes.len(), source.extra_bytes.len());
                dest.x = source.x;
                dest.y = source.y;
                dest.z = source.z;
                dest.intensity = source.intensity;
                dest.return_number = source.return_number & 0b0000_0111;
                dest.number_of_returns = source.number_of_returns & 0b0000_0111;
                dest.scan_direction_flag = source.scan_direction_flag;
                dest.edge_of_flight_line = source.edge_of_flight_line;
                dest.classification = source.classification & 0b0001_1111;
                dest.synthetic = source.synthetic;
                dest.key_point = source.key_point;
                dest.withheld = source.withheld;
                dest.scan_angle_rank = source.scan_angle as i8;
                dest.user_data = source.user_data;
                dest.point_source_id = source.point_source_id;
                dest.gps_time = source.gps_time;
                dest.red = source.red;
                dest.green = source.green;
                dest.blue = source.blue;
                dest.wave_packet = source.wave_packet;
                dest.extra_bytes.clone_from(&source.extra_bytes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn point10() -> Point10 {
        Point10 {
            x: 1234,
            y: -1234,
            z: 56_757,
            intensity: 43_564,
            return_number: 5,
            number_of_returns: 2,
            scan_direction_flag: true,
            edge_of_flight_line: false,
            classification: 26,
            synthetic: true,
            key_point: false,
            withheld: true,
            scan_angle_rank: -22,
            user_data: 42,
            point_source_id: 11_523,
            gps_time: 54_235.87,
            red: 111,
            green: 121,
            blue: 311,
            wave_packet: wave_packet(),
            extra_bytes: Vec::new(),
        }
    }

    fn point14() -> Point14 {
        Point14 {
            x: -5_654,
            y: 45_100,
            z: 132,
            intensity: 21_003,
            return_number: 11,
            number_of_returns: 14,
            synthetic: false,
            key_point: true,
            withheld: false,
            overlap: true,
            scanner_channel: 2,
            scan_direction_flag: true,
            edge_of_flight_line: false,
            classification: 201,
            user_data: 7,
            scan_angle: -15_000,
            point_source_id: 40_001,
            gps_time: 12.345,
            red: 65_535,
            green: 17,
            blue: 255,
            nir: 3_003,
            wave_packet: wave_packet(),
            extra_bytes: Vec::new(),
        }
    }

    fn wave_packet() -> WavePacket {
        WavePacket {
            descriptor_index: 125,
            byte_offset_to_data: 2_456_546,
            size_in_bytes: 654_812,
            return_point_waveform_location: 1.0,
            x_t: 23.4,
            y_t: 21.4,
            z_t: 11.3,
        }
    }

    fn raw_point(format: &Format) -> RawPoint {
        let mut point = RawPoint::prepare(format);
        let extra_bytes = vec![7; usize::from(format.extra_bytes)];
        if let Some(point) = point.point10_mut() {
            *point = Point10 {
                extra_bytes,
                ..point10()
            };
            if !format.has_waveform() {
                point.wave_packet = WavePacket::default();
            }
            if !format.has_color() {
                point.red = 0;
                point.green = 0;
                point.blue = 0;
            }
            if !format.has_gps_time() {
                point.gps_time = 0.;
            }
        } else if let Some(point) = point.point14_mut() {
            *point = Point14 {
                extra_bytes,
                ..point14()
            };
            if !format.has_waveform() {
                point.wave_packet = WavePacket::default();
            }
            if !format.has_color() {
                point.red = 0;
                point.green = 0;
                point.blue = 0;
            }
            if !format.has_nir() {
                point.nir = 0;
            }
        }
        point
    }

    macro_rules! roundtrip {
        ($name:ident, $id:expr) => {
            mod $name {
                use super::*;

                #[test]
                fn roundtrip() {
                    let mut format = Format::new($id).unwrap();
                    format.extra_bytes = 3;
                    let point = raw_point(&format);
                    let mut cursor = Cursor::new(Vec::new());
                    point.write_to(&mut cursor, &format).unwrap();
                    assert_eq!(usize::from(format.len()), cursor.get_ref().len());
                    cursor.set_position(0);
                    assert_eq!(point, RawPoint::read_from(cursor, &format).unwrap());
                }
            }
        };
    }

    roundtrip!(format_0, 0);
    roundtrip!(format_1, 1);
    roundtrip!(format_2, 2);
    roundtrip!(format_3, 3);
    roundtrip!(format_4, 4);
    roundtrip!(format_5, 5);
    roundtrip!(format_6, 6);
    roundtrip!(format_7, 7);
    roundtrip!(format_8, 8);
    roundtrip!(format_9, 9);
    roundtrip!(format_10, 10);

    #[test]
    fn legacy_packed_bytes() {
        let format = Format::new(0).unwrap();
        let mut point = RawPoint::prepare(&format);
        {
            let point = point.point10_mut().unwrap();
            point.return_number = 5;
            point.number_of_returns = 2;
            point.scan_direction_flag = true;
            point.classification = 26;
            point.synthetic = true;
            point.withheld = true;
        }
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, &format).unwrap();
        let bytes = cursor.into_inner();
        assert_eq!(0b0101_0101, bytes[14]);
        assert_eq!(0b1011_1010, bytes[15]);
    }

    #[test]
    fn extended_packed_bytes() {
        let format = Format::new(6).unwrap();
        let mut point = RawPoint::prepare(&format);
        {
            let point = point.point14_mut().unwrap();
            point.return_number = 11;
            point.number_of_returns = 14;
            point.key_point = true;
            point.overlap = true;
            point.scanner_channel = 2;
            point.edge_of_flight_line = true;
        }
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, &format).unwrap();
        let bytes = cursor.into_inner();
        assert_eq!(0b1110_1011, bytes[14]);
        assert_eq!(0b1010_1010, bytes[15]);
    }

    #[test]
    fn widening_zeroes_the_new_fields() {
        let mut legacy = RawPoint::prepare(&Format::new(3).unwrap());
        *legacy.point10_mut().unwrap() = point10();
        let mut extended = RawPoint::prepare(&Format::new(6).unwrap());
        {
            let extended = extended.point14_mut().unwrap();
            extended.overlap = true;
            extended.scanner_channel = 3;
            extended.nir = 42;
        }
        extended.copy_from_raw(&legacy);
        let point = extended.point14().unwrap();
        assert!(!point.overlap);
        assert_eq!(0, point.scanner_channel);
        assert_eq!(0, point.nir);
        assert_eq!(i16::from(point10().scan_angle_rank), point.scan_angle);
        assert_eq!(6, extended.format_id());
    }

    #[test]
    fn narrowing_truncates() {
        let mut extended = RawPoint::prepare(&Format::new(6).unwrap());
        *extended.point14_mut().unwrap() = point14();
        let mut legacy = RawPoint::prepare(&Format::new(1).unwrap());
        legacy.copy_from_raw(&extended);
        let point = legacy.point10().unwrap();
        assert_eq!(point14().return_number & 0b111, point.return_number);
        assert_eq!(point14().number_of_returns & 0b111, point.number_of_returns);
        assert_eq!(point14().classification & 0b1_1111, point.classification);
        assert_eq!(point14().scan_angle as i8, point.scan_angle_rank);
        assert_eq!(1, legacy.format_id());
    }

    #[test]
    fn same_family_copy_preserves_extra_bytes() {
        let mut format = Format::new(1).unwrap();
        format.extra_bytes = 4;
        let mut source = RawPoint::prepare(&format);
        source.point10_mut().unwrap().extra_bytes = vec![1, 2, 3, 4];
        let mut dest = RawPoint::prepare(&format);
        dest.copy_from_raw(&source);
        assert_eq!(vec![1, 2, 3, 4], dest.point10().unwrap().extra_bytes);
    }
}
