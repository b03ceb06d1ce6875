//! User-facing, real-world points.
//!
//! A [Point] carries the union of every attribute the eleven record layouts
//! can store, with its coordinates already transformed to real-world values.
//! Attributes that the source format does not store are zero.
//!
//! ```
//! use las_codec::Point;
//! let point = Point::default();
//! assert_eq!(0., point.x);
//! assert_eq!(0, point.nir);
//! ```

mod format;

pub use format::Format;

use crate::{
    raw::{
        point::{PointData, WavePacket},
        RawPoint,
    },
    Scaling,
};

/// A three dimensional point with its attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The x coordinate, after scaling.
    pub x: f64,

    /// The y coordinate, after scaling.
    pub y: f64,

    /// The z coordinate, after scaling.
    pub z: f64,

    /// The pulse return magnitude.
    pub intensity: u16,

    /// The pulse return number.
    pub return_number: u8,

    /// The total number of returns for the pulse.
    pub number_of_returns: u8,

    /// Was this point created by a technique other than lidar collection?
    pub synthetic: bool,

    /// Is this point a model key-point?
    pub key_point: bool,

    /// Should this point be skipped during processing?
    pub withheld: bool,

    /// Is this point inside the overlap region of two swaths?
    ///
    /// Zero for points of the legacy family.
    pub overlap: bool,

    /// The scanner head of a multi-channel system.
    ///
    /// Zero for points of the legacy family.
    pub scanner_channel: u8,

    /// The travel direction of the scanner mirror at the time of the pulse.
    pub scan_direction_flag: bool,

    /// Is this point at the end of a scan line?
    pub edge_of_flight_line: bool,

    /// The ASPRS classification.
    pub classification: u8,

    /// Used at the user's discretion.
    pub user_data: u8,

    /// The angle of the output laser pulse.
    ///
    /// Legacy points store one-degree ranks, extended points 0.006 degree
    /// increments; the value is carried as stored.
    pub scan_angle: i16,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time tag at which the point was acquired.
    pub gps_time: f64,

    /// Red image channel.
    pub red: u16,
    #[allow(missing_docs)]
    pub green: u16,
    #[allow(missing_docs)]
    pub blue: u16,

    /// Near infrared channel. Zero for points of the legacy family.
    pub nir: u16,

    /// Waveform information.
    pub wave_packet: WavePacket,

    /// The user-defined record tail.
    pub extra_bytes: Vec<u8>,
}

impl Point {
    /// Creates a point from a raw record, applying the scaling.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{point::Format, raw::RawPoint, Point, Scaling};
    /// let mut raw = RawPoint::prepare(&Format::new(0).unwrap());
    /// raw.point10_mut().unwrap().x = 100;
    /// let point = Point::from_raw(&raw, &Scaling::default());
    /// assert_eq!(100., point.x);
    /// ```
    pub fn from_raw(raw: &RawPoint, scaling: &Scaling) -> Point {
        match &raw.data {
            PointData::Ten(raw) => Point {
                x: scaling.apply_x(raw.x),
                y: scaling.apply_y(raw.y),
                z: scaling.apply_z(raw.z),
                intensity: raw.intensity,
                return_number: raw.return_number,
                number_of_returns: raw.number_of_returns,
                synthetic: raw.synthetic,
                key_point: raw.key_point,
                withheld: raw.withheld,
                overlap: false,
                scanner_channel: 0,
                scan_direction_flag: raw.scan_direction_flag,
                edge_of_flight_line: raw.edge_of_flight_line,
                classification: raw.classification,
                user_data: raw.user_data,
                scan_angle: i16::from(raw.scan_angle_rank),
                point_source_id: raw.point_source_id,
                gps_time: raw.gps_time,
                red: raw.red,
                green: raw.green,
                blue: raw.blue,
                nir: 0,
                wave_packet: raw.wave_packet,
                extra_bytes: raw.extra_bytes.clone(),
            },
            PointData::Fourteen(raw) => Point {
                x: scaling.apply_x(raw.x),
                y: scaling.apply_y(raw.y),
                z: scaling.apply_z(raw.z),
                intensity: raw.intensity,
                return_number: raw.return_number,
                number_of_returns: raw.number_of_returns,
                synthetic: raw.synthetic,
                key_point: raw.key_point,
                withheld: raw.withheld,
                overlap: raw.overlap,
                scanner_channel: raw.scanner_channel,
                scan_direction_flag: raw.scan_direction_flag,
                edge_of_flight_line: raw.edge_of_flight_line,
                classification: raw.classification,
                user_data: raw.user_data,
                scan_angle: raw.scan_angle,
                point_source_id: raw.point_source_id,
                gps_time: raw.gps_time,
                red: raw.red,
                green: raw.green,
                blue: raw.blue,
                nir: raw.nir,
                wave_packet: raw.wave_packet,
                extra_bytes: raw.extra_bytes.clone(),
            },
        }
    }

    /// Converts this point to a raw record of the given format.
    ///
    /// Coordinates are unscaled with truncation, and attribute values that
    /// do not fit the target family are masked the same way a
    /// family-narrowing copy masks them. Extra bytes are truncated or
    /// zero-padded to the format's declared length.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{point::Format, Point, Scaling};
    /// let point = Point { x: 1., ..Default::default() };
    /// let raw = point.to_raw(&Format::new(0).unwrap(), &Scaling::default());
    /// assert_eq!(1, raw.point10().unwrap().x);
    /// ```
    pub fn to_raw(&self, format: &Format, scaling: &Scaling) -> RawPoint {
        let mut raw = RawPoint::prepare(format);
        if let Some(point) = raw.point10_mut() {
            point.x = scaling.unapply_x(self.x);
            point.y = scaling.unapply_y(self.y);
            point.z = scaling.unapply_z(self.z);
            point.intensity = self.intensity;
            point.return_number = self.return_number & 0b0000_0111;
            point.number_of_returns = self.number_of_returns & 0b0000_0111;
            point.scan_direction_flag = self.scan_direction_flag;
            point.edge_of_flight_line = self.edge_of_flight_line;
            point.classification = self.classification & 0b0001_1111;
            point.synthetic = self.synthetic;
            point.key_point = self.key_point;
            point.withheld = self.withheld;
            point.scan_angle_rank = self.scan_angle as i8;
            point.user_data = self.user_data;
            point.point_source_id = self.point_source_id;
            point.gps_time = self.gps_time;
            point.red = self.red;
            point.green = self.green;
            point.blue = self.blue;
            point.wave_packet = self.wave_packet;
            copy_extra_bytes(&mut point.extra_bytes, &self.extra_bytes);
        } else if let Some(point) = raw.point14_mut() {
            point.x = scaling.unapply_x(self.x);
            point.y = scaling.unapply_y(self.y);
            point.z = scaling.unapply_z(self.z);
            point.intensity = self.intensity;
            point.return_number = self.return_number & 0b0000_1111;
            point.number_of_returns = self.number_of_returns & 0b0000_1111;
            point.synthetic = self.synthetic;
            point.key_point = self.key_point;
            point.withheld = self.withheld;
            point.overlap = self.overlap;
            point.scanner_channel = self.scanner_channel & 0b0000_0011;
            point.scan_direction_flag = self.scan_direction_flag;
            point.edge_of_flight_line = self.edge_of_flight_line;
            point.classification = self.classification;
            point.user_data = self.user_data;
            point.scan_angle = self.scan_angle;
            point.point_source_id = self.point_source_id;
            point.gps_time = self.gps_time;
            point.red = self.red;
            point.green = self.green;
            point.blue = self.blue;
            point.nir = self.nir;
            point.wave_packet = self.wave_packet;
            copy_extra_bytes(&mut point.extra_bytes, &self.extra_bytes);
        }
        raw
    }
}

fn copy_extra_bytes(dest: &mut [u8], source: &[u8]) {
    let n = dest.len().min(source.len());
    dest[..n].copy_from_slice(&source[..n]);
    for byte in &mut dest[n..] {
        *byte = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    fn scaling() -> Scaling {
        Scaling {
            scales: Vector::new(0.5, 0.5, 0.5),
            offsets: Vector::new(100., 200., 300.),
        }
    }

    #[test]
    fn from_raw_applies_scaling() {
        let mut raw = RawPoint::prepare(&Format::new(0).unwrap());
        {
            let raw = raw.point10_mut().unwrap();
            raw.x = 2;
            raw.y = 4;
            raw.z = -6;
        }
        let point = Point::from_raw(&raw, &scaling());
        assert_eq!(101., point.x);
        assert_eq!(202., point.y);
        assert_eq!(297., point.z);
    }

    #[test]
    fn raw_roundtrip_through_point() {
        let format = Format::new(3).unwrap();
        let mut raw = RawPoint::prepare(&format);
        {
            let raw = raw.point10_mut().unwrap();
            raw.x = 17;
            raw.y = -3;
            raw.z = 2_000;
            raw.intensity = 42;
            raw.return_number = 3;
            raw.number_of_returns = 4;
            raw.classification = 2;
            raw.gps_time = 123.456;
            raw.red = 1;
            raw.green = 2;
            raw.blue = 3;
        }
        let point = Point::from_raw(&raw, &scaling());
        assert_eq!(raw, point.to_raw(&format, &scaling()));
    }

    #[test]
    fn legacy_point_has_zeroed_extended_fields() {
        let raw = RawPoint::prepare(&Format::new(1).unwrap());
        let point = Point::from_raw(&raw, &Scaling::default());
        assert!(!point.overlap);
        assert_eq!(0, point.scanner_channel);
        assert_eq!(0, point.nir);
    }

    #[test]
    fn to_raw_sizes_extra_bytes() {
        let mut format = Format::new(6).unwrap();
        format.extra_bytes = 4;
        let point = Point {
            extra_bytes: vec![1, 2],
            ..Default::default()
        };
        let raw = point.to_raw(&format, &Scaling::default());
        assert_eq!(vec![1, 2, 0, 0], raw.point14().unwrap().extra_bytes);
    }
}
