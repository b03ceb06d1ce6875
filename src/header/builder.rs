use crate::{
    header::NUMBER_OF_POINTS_BY_RETURN_SIZE, point::Format, raw, utils::AsLasStr, Bounds, Error,
    Header, Result, Scaling, Vector, Version, Vlr,
};
use chrono::NaiveDate;
use log::warn;
use uuid::Uuid;

/// Builds headers.
///
/// ```
/// use las_codec::Builder;
/// let mut builder = Builder::default();
/// builder.point_format.extra_bytes = 2;
/// let header = builder.into_header().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    /// The min/max extents of the points.
    pub bounds: Bounds,

    /// The file creation date.
    pub date: Option<NaiveDate>,

    /// The evlr block, carried through for las 1.4 files.
    pub evlr: Option<raw::header::Evlr>,

    /// The file source id, often the flight line number.
    pub file_source_id: u16,

    /// The software that produced the file.
    pub generating_software: String,

    /// The global encoding bit field.
    pub global_encoding: u16,

    /// The project id.
    pub guid: Uuid,

    /// Bytes between the standard header block and the declared header
    /// size, preserved verbatim.
    pub padding: Vec<u8>,

    /// The format the points will be stored in.
    pub point_format: Format,

    /// The scales and offsets applied to the stored coordinates.
    pub scaling: Scaling,

    /// The offset to the waveform data package record, las 1.3 and later.
    pub start_of_waveform_data_packet_record: Option<u64>,

    /// The system that produced the points.
    pub system_identifier: String,

    /// The las version.
    pub version: Version,

    /// The variable length records.
    pub vlrs: Vec<Vlr>,

    number_of_points: u64,
    number_of_points_by_return: [u64; NUMBER_OF_POINTS_BY_RETURN_SIZE],
}

impl Builder {
    /// Creates a builder from a raw header.
    ///
    /// The version and point format are validated here. The 64 bit counts
    /// of las 1.4 win over the legacy fields whenever they carry anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Builder;
    /// let builder = Builder::new(Default::default()).unwrap();
    /// ```
    pub fn new(raw: raw::Header) -> Result<Builder> {
        if !raw.version.is_supported() {
            return Err(Error::InvalidVersion(raw.version));
        }
        let point_format = Format::from_id_and_record_length(
            raw.point_data_record_format,
            raw.point_data_record_length,
        )?;
        // The 64 bit block of las 1.4 is authoritative when it carries
        // anything; files that only fill the legacy fields still read.
        let legacy_count = u64::from(raw.number_of_point_records);
        let number_of_points = match raw.large_file {
            Some(large_file) if large_file.number_of_point_records > 0 => {
                if legacy_count > 0 && legacy_count != large_file.number_of_point_records {
                    warn!(
                        "the legacy point count ({}) disagrees with the las 1.4 point count ({}), using the latter",
                        legacy_count, large_file.number_of_point_records
                    );
                }
                large_file.number_of_point_records
            }
            _ => legacy_count,
        };
        let mut legacy_by_return = [0; NUMBER_OF_POINTS_BY_RETURN_SIZE];
        for (by_return, n) in legacy_by_return
            .iter_mut()
            .zip(&raw.number_of_points_by_return)
        {
            *by_return = u64::from(*n);
        }
        let number_of_points_by_return = match raw.large_file {
            Some(large_file)
                if large_file
                    .number_of_points_by_return
                    .iter()
                    .any(|&n| n > 0) =>
            {
                large_file.number_of_points_by_return
            }
            _ => legacy_by_return,
        };
        Ok(Builder {
            bounds: Bounds {
                min: Vector::new(raw.min_x, raw.min_y, raw.min_z),
                max: Vector::new(raw.max_x, raw.max_y, raw.max_z),
            },
            date: NaiveDate::from_yo_opt(
                i32::from(raw.file_creation_year),
                u32::from(raw.file_creation_day_of_year),
            ),
            evlr: raw.evlr,
            file_source_id: raw.file_source_id,
            generating_software: raw.generating_software.as_las_str()?.to_string(),
            global_encoding: raw.global_encoding,
            guid: Uuid::from_bytes(raw.guid),
            padding: raw.padding,
            point_format,
            scaling: Scaling {
                scales: Vector::new(raw.x_scale_factor, raw.y_scale_factor, raw.z_scale_factor),
                offsets: Vector::new(raw.x_offset, raw.y_offset, raw.z_offset),
            },
            start_of_waveform_data_packet_record: raw.start_of_waveform_data_packet_record,
            system_identifier: raw.system_identifier.as_las_str()?.to_string(),
            version: raw.version,
            vlrs: Vec::new(),
            number_of_points,
            number_of_points_by_return,
        })
    }

    /// Returns the point format this builder is currently configured with.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Builder;
    /// let builder = Builder::default();
    /// assert_eq!(0, builder.point_format().id);
    /// ```
    pub fn point_format(&self) -> &Format {
        &self.point_format
    }

    /// Converts this builder into a header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Builder;
    /// let header = Builder::default().into_header().unwrap();
    /// ```
    pub fn into_header(self) -> Result<Header> {
        if !self.version.is_supported() {
            return Err(Error::InvalidVersion(self.version));
        }
        Ok(Header {
            bounds: self.bounds,
            date: self.date,
            evlr: self.evlr,
            file_source_id: self.file_source_id,
            generating_software: self.generating_software,
            global_encoding: self.global_encoding,
            guid: self.guid,
            number_of_points: self.number_of_points,
            number_of_points_by_return: self.number_of_points_by_return,
            padding: self.padding,
            point_format: self.point_format,
            scaling: self.scaling,
            start_of_waveform_data_packet_record: self.start_of_waveform_data_packet_record,
            system_identifier: self.system_identifier,
            version: self.version,
            vlrs: self.vlrs,
        })
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder {
            bounds: Bounds::default(),
            date: None,
            evlr: None,
            file_source_id: 0,
            generating_software: format!("las-codec {}", env!("CARGO_PKG_VERSION")),
            global_encoding: 0,
            guid: Uuid::nil(),
            padding: Vec::new(),
            point_format: Format::default(),
            scaling: Scaling::default(),
            start_of_waveform_data_packet_record: None,
            system_identifier: "las-codec".to_string(),
            version: Version::default(),
            vlrs: Vec::new(),
            number_of_points: 0,
            number_of_points_by_return: [0; NUMBER_OF_POINTS_BY_RETURN_SIZE],
        }
    }
}
