//! Re-emit a legacy file as an extended one through the cross-family copy.

use las_codec::{point::Format, raw::RawPoint, Builder, Reader, Scaling, Vector, Version, Writer};
use std::io::Cursor;

#[test]
fn las_1_2_format_3_to_las_1_4_format_6() {
    let mut builder = Builder::default();
    builder.version = Version::new(1, 2);
    builder.point_format.id = 3;
    builder.scaling = Scaling {
        scales: Vector::new(0.01, 0.01, 0.01),
        offsets: Vector::new(0., 0., 0.),
    };
    let header = builder.into_header().unwrap();
    let legacy_format = *header.point_format();

    let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
    for i in 0..5i32 {
        let mut point = RawPoint::prepare(&legacy_format);
        {
            let point = point.point10_mut().unwrap();
            point.x = i * 100;
            point.y = -i * 100;
            point.z = i;
            point.intensity = (i * 7) as u16;
            point.return_number = (i % 7) as u8 + 1;
            point.number_of_returns = 7;
            point.classification = 2;
            point.synthetic = i % 2 == 0;
            point.scan_angle_rank = -45 + i as i8;
            point.gps_time = f64::from(i) + 0.125;
            point.red = (i * 3) as u16;
            point.green = (i * 5) as u16;
            point.blue = (i * 11) as u16;
        }
        writer.write_raw_point(&point).unwrap();
    }
    let legacy_file = writer.into_inner().unwrap().into_inner();

    // Re-emit every raw point through the widening copy.
    let mut reader = Reader::from_buffer(legacy_file).unwrap();
    let mut builder = Builder::default();
    builder.version = Version::new(1, 4);
    builder.point_format = Format::new(6).unwrap();
    builder.scaling = *reader.header().scaling();
    let extended_format = *builder.point_format();
    let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
    let mut legacy_points = Vec::new();
    for _ in 0..reader.header().number_of_points() {
        let mut legacy = RawPoint::prepare(&legacy_format);
        reader.read_next_raw(&mut legacy).unwrap();
        let mut extended = RawPoint::prepare(&extended_format);
        extended.copy_from_raw(&legacy);
        writer.write_raw_point(&extended).unwrap();
        legacy_points.push(legacy);
    }
    let extended_file = writer.into_inner().unwrap().into_inner();

    let mut reader = Reader::from_buffer(extended_file).unwrap();
    assert_eq!(5, reader.header().number_of_points());
    for legacy in &legacy_points {
        let mut extended = RawPoint::prepare(&extended_format);
        reader.read_next_raw(&mut extended).unwrap();
        let legacy = legacy.point10().unwrap();
        let extended = extended.point14().unwrap();
        assert_eq!(legacy.x, extended.x);
        assert_eq!(legacy.y, extended.y);
        assert_eq!(legacy.z, extended.z);
        assert_eq!(legacy.intensity, extended.intensity);
        assert_eq!(legacy.return_number, extended.return_number);
        assert_eq!(legacy.number_of_returns, extended.number_of_returns);
        assert_eq!(legacy.classification, extended.classification);
        assert_eq!(legacy.synthetic, extended.synthetic);
        assert_eq!(i16::from(legacy.scan_angle_rank), extended.scan_angle);
        assert_eq!(legacy.gps_time, extended.gps_time);
        assert_eq!(legacy.red, extended.red);
        assert_eq!(legacy.green, extended.green);
        assert_eq!(legacy.blue, extended.blue);
        assert!(!extended.overlap);
        assert_eq!(0, extended.scanner_channel);
        assert_eq!(0, extended.nir);
    }
}

#[test]
fn narrowing_back_recovers_the_maskable_fields() {
    let extended_format = Format::new(6).unwrap();
    let legacy_format = Format::new(1).unwrap();
    let mut extended = RawPoint::prepare(&extended_format);
    {
        let extended = extended.point14_mut().unwrap();
        extended.return_number = 5;
        extended.number_of_returns = 6;
        extended.classification = 17;
        extended.scan_angle = -90;
    }
    let mut legacy = RawPoint::prepare(&legacy_format);
    legacy.copy_from_raw(&extended);
    let mut roundtripped = RawPoint::prepare(&extended_format);
    roundtripped.copy_from_raw(&legacy);
    assert_eq!(
        extended.point14().unwrap().return_number,
        roundtripped.point14().unwrap().return_number
    );
    assert_eq!(
        extended.point14().unwrap().classification,
        roundtripped.point14().unwrap().classification
    );
    assert_eq!(
        extended.point14().unwrap().scan_angle,
        roundtripped.point14().unwrap().scan_angle
    );
}
