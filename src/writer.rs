//! Write las and laz points.
//!
//! A [Writer] takes ownership of its [Header] and uses it for
//! configuration. The header is emitted when the writer opens, and written
//! again with the final point counts when the writer closes:
//!
//! ```
//! use las_codec::{Header, Writer};
//! use std::io::Cursor;
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
//! writer.close().unwrap();
//! ```
//!
//! Dropping a writer without closing it finalizes the file too, but any
//! failure can then only be logged. Call [Writer::close] to observe it.

use crate::{io::Dest, raw::RawPoint, Error, Header, Point, Result};
use log::error;
use std::{
    fs::File,
    io::{BufWriter, Cursor, Seek, SeekFrom, Write},
    path::Path,
};

/// Writes las points to a [Dest](crate::io::Dest).
#[allow(missing_debug_implementations)]
pub struct Writer<W: Write + Seek + Send + Sync + 'static> {
    closed: bool,
    dest: Option<PointDest<W>>,
    header: Header,
    point_buffer: Vec<u8>,
    point_size: usize,
    start: u64,
}

impl<W: Write + Seek + Send + Sync + 'static> std::fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

enum PointDest<W: Write + Seek + Send + Sync + 'static> {
    Las(W),
    #[cfg(feature = "laz")]
    Laz(laz::LasZipCompressor<'static, W>),
}

impl<W: Write + Seek + Send + Sync + 'static> PointDest<W> {
    fn route(&mut self, buffer: &[u8]) -> Result<()> {
        match self {
            PointDest::Las(dest) => dest.write_record(buffer),
            #[cfg(feature = "laz")]
            PointDest::Laz(compressor) => compressor.compress_many(buffer).map_err(Error::from),
        }
    }

    fn get_mut(&mut self) -> &mut W {
        match self {
            PointDest::Las(dest) => dest,
            #[cfg(feature = "laz")]
            PointDest::Laz(compressor) => compressor.get_mut(),
        }
    }

    fn done(&mut self) -> Result<()> {
        match self {
            PointDest::Las(_) => Ok(()),
            #[cfg(feature = "laz")]
            PointDest::Laz(compressor) => compressor.done().map_err(Error::from),
        }
    }

    fn into_inner(self) -> W {
        match self {
            PointDest::Las(dest) => dest,
            #[cfg(feature = "laz")]
            PointDest::Laz(compressor) => compressor.into_inner(),
        }
    }
}

impl<W: Write + Seek + Send + Sync + 'static> Writer<W> {
    /// Creates a new writer, taking ownership of the header.
    ///
    /// The header's point counts are reset; they are maintained by the
    /// writer from here on. If the header's point format is flagged as
    /// compressed, the point data is routed through a laszip compressor
    /// and a laszip vlr is appended to the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Header, Writer};
    /// use std::io::Cursor;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
    /// ```
    pub fn new(mut dest: W, mut header: Header) -> Result<Writer<W>> {
        header.validate_for_writing()?;
        header.clear_point_counts();
        let start = dest.stream_position()?;
        let point_size = usize::from(header.point_format().len());
        let dest = if header.point_format().is_compressed {
            #[cfg(feature = "laz")]
            {
                let laz_vlr = crate::laz::build_laz_vlr(header.point_format());
                header.add_laz_vlr(&laz_vlr)?;
                header.write_to(&mut dest)?;
                PointDest::Laz(laz::LasZipCompressor::new(dest, laz_vlr)?)
            }
            #[cfg(not(feature = "laz"))]
            {
                return Err(Error::NoLazSupport);
            }
        } else {
            header.write_to(&mut dest)?;
            PointDest::Las(dest)
        };
        Ok(Writer {
            closed: false,
            dest: Some(dest),
            header,
            point_buffer: vec![0; point_size],
            point_size,
            start,
        })
    }

    /// Returns a reference to this writer's header.
    ///
    /// The point counts reflect the points written so far.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Writes one raw point.
    ///
    /// The point's format id must match the header's format exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Header, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
    /// let point = RawPoint::prepare(writer.header().point_format());
    /// writer.write_raw_point(&point).unwrap();
    /// assert_eq!(1, writer.header().number_of_points());
    /// ```
    pub fn write_raw_point(&mut self, point: &RawPoint) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        if point.format_id() != self.header.point_format().id {
            return Err(Error::IncompatiblePointFormat {
                format_id: point.format_id(),
                expected: *self.header.point_format(),
            });
        }
        if self.header.number_of_points() >= self.max_point_count() {
            return Err(Error::PointCountTooHigh(self.header.number_of_points()));
        }
        let format = *self.header.point_format();
        let point_size = self.point_size;
        let mut cursor = Cursor::new(&mut self.point_buffer[..point_size]);
        point.write_to(&mut cursor, &format)?;
        debug_assert_eq!(point_size as u64, cursor.position());
        self.dest
            .as_mut()
            .ok_or(Error::ClosedWriter)?
            .route(&self.point_buffer[..point_size])?;
        self.header.add_return(point.return_number());
        Ok(())
    }

    /// Writes a batch of raw points.
    ///
    /// All formats are checked before anything is encoded, and the points
    /// are handed to the destination as one block.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Header, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
    /// let points = vec![RawPoint::prepare(writer.header().point_format()); 3];
    /// writer.write_many_raw_points(&points).unwrap();
    /// assert_eq!(3, writer.header().number_of_points());
    /// ```
    pub fn write_many_raw_points(&mut self, points: &[RawPoint]) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        for point in points {
            if point.format_id() != self.header.point_format().id {
                return Err(Error::IncompatiblePointFormat {
                    format_id: point.format_id(),
                    expected: *self.header.point_format(),
                });
            }
        }
        let new_count = self
            .header
            .number_of_points()
            .checked_add(points.len() as u64)
            .ok_or(Error::PointCountTooHigh(self.header.number_of_points()))?;
        if new_count > self.max_point_count() {
            return Err(Error::PointCountTooHigh(self.header.number_of_points()));
        }
        let format = *self.header.point_format();
        let total = self.point_size * points.len();
        if self.point_buffer.len() < total {
            self.point_buffer.resize(total, 0);
        }
        for (index, point) in points.iter().enumerate() {
            let record = &mut self.point_buffer[index * self.point_size..][..self.point_size];
            let mut cursor = Cursor::new(record);
            point.write_to(&mut cursor, &format)?;
            debug_assert_eq!(self.point_size as u64, cursor.position());
        }
        self.dest
            .as_mut()
            .ok_or(Error::ClosedWriter)?
            .route(&self.point_buffer[..total])?;
        for point in points {
            self.header.add_return(point.return_number());
        }
        Ok(())
    }

    /// Writes one point, unscaling its coordinates with the header's
    /// scaling.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Header, Point, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
    /// let point = Point { x: 1., y: 2., z: 3., ..Default::default() };
    /// writer.write_point(&point).unwrap();
    /// ```
    pub fn write_point(&mut self, point: &Point) -> Result<()> {
        let raw = point.to_raw(self.header.point_format(), self.header.scaling());
        self.write_raw_point(&raw)
    }

    /// Closes this writer.
    ///
    /// The compressor, if any, is flushed, and the header is written again
    /// at the start of the destination with the final point counts.
    /// Closing twice is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Writer;
    /// use std::io::Cursor;
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// writer.close().unwrap();
    /// assert!(writer.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        self.dest()?.done()?;
        let start = self.start;
        let header = self.header.clone();
        let dest = self.dest()?.get_mut();
        let _ = dest.seek(SeekFrom::Start(start))?;
        header.write_to(&mut *dest)?;
        dest.flush()?;
        self.closed = true;
        Ok(())
    }

    /// Closes this writer and returns its destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Writer;
    /// use std::io::Cursor;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let cursor = writer.into_inner().unwrap();
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        let dest = self
            .dest
            .take()
            .expect("the destination is only taken here, after which the writer is dropped");
        let mut dest = dest.into_inner();
        let _ = dest.seek(SeekFrom::Start(self.start))?;
        Ok(dest)
    }

    fn dest(&mut self) -> Result<&mut PointDest<W>> {
        self.dest.as_mut().ok_or(Error::ClosedWriter)
    }

    fn max_point_count(&self) -> u64 {
        if self.header.version().minor >= 4 {
            u64::MAX
        } else {
            u64::from(u32::MAX)
        }
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a writer for the file at the path.
    ///
    /// A `.laz` or `.LAZ` extension turns on compression.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use las_codec::Writer;
    /// let writer = Writer::from_path("points.las", Default::default()).unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, mut header: Header) -> Result<Writer<BufWriter<File>>> {
        let compress = path
            .as_ref()
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("laz"));
        header.point_format_mut().is_compressed = compress;
        File::create(path)
            .map_err(Error::from)
            .and_then(|file| Writer::new(BufWriter::new(file), header))
    }
}

impl<W: Write + Seek + Send + Sync + 'static> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed && self.dest.is_some() {
            if let Err(err) = self.close() {
                error!("failed to close the writer on drop: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point::Format, Builder, Version};

    fn writer(format_id: u8, version: Version) -> Writer<Cursor<Vec<u8>>> {
        let mut builder = Builder::default();
        builder.point_format = Format::new(format_id).unwrap();
        builder.version = version;
        Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap()
    }

    #[test]
    fn write_after_close() {
        let mut writer = writer(0, Version::new(1, 2));
        writer.close().unwrap();
        let point = RawPoint::prepare(writer.header().point_format());
        assert!(matches!(
            writer.write_raw_point(&point).unwrap_err(),
            Error::ClosedWriter
        ));
    }

    #[test]
    fn incompatible_version_and_format() {
        let mut builder = Builder::default();
        builder.point_format = Format::new(6).unwrap();
        builder.version = Version::new(1, 2);
        let header = builder.into_header().unwrap();
        assert!(matches!(
            Writer::new(Cursor::new(Vec::new()), header).unwrap_err(),
            Error::IncompatibleVersionAndFormat {
                format_id: 6,
                ..
            }
        ));
    }

    #[test]
    fn mismatched_point_format() {
        let mut writer = writer(1, Version::new(1, 2));
        let point = RawPoint::prepare(&Format::new(0).unwrap());
        assert!(matches!(
            writer.write_raw_point(&point).unwrap_err(),
            Error::IncompatiblePointFormat { format_id: 0, .. }
        ));
    }

    #[test]
    fn point_count_at_the_legacy_ceiling() {
        let mut writer = writer(0, Version::new(1, 2));
        writer.header.number_of_points = u64::from(u32::MAX);
        let point = RawPoint::prepare(writer.header().point_format());
        assert!(matches!(
            writer.write_raw_point(&point).unwrap_err(),
            Error::PointCountTooHigh(_)
        ));
    }

    #[test]
    fn batch_would_cross_the_ceiling() {
        let mut writer = writer(0, Version::new(1, 2));
        writer.header.number_of_points = u64::from(u32::MAX) - 1;
        let points = vec![RawPoint::prepare(writer.header().point_format()); 2];
        assert!(matches!(
            writer.write_many_raw_points(&points).unwrap_err(),
            Error::PointCountTooHigh(_)
        ));
        // A batch that exactly reaches the ceiling is fine.
        let points = vec![RawPoint::prepare(writer.header().point_format())];
        writer.write_many_raw_points(&points).unwrap();
    }

    #[test]
    fn histogram_accumulates_by_return_number() {
        let mut writer = writer(6, Version::new(1, 4));
        let format = *writer.header().point_format();
        for return_number in [1, 1, 2, 3, 3, 3] {
            let mut point = RawPoint::prepare(&format);
            point.point14_mut().unwrap().return_number = return_number;
            writer.write_raw_point(&point).unwrap();
        }
        let by_return = writer.header().number_of_points_by_return();
        assert_eq!(2, by_return[1]);
        assert_eq!(1, by_return[2]);
        assert_eq!(3, by_return[3]);
        assert_eq!(6, writer.header().number_of_points());
    }

    #[test]
    fn batch_write_matches_single_writes() {
        let mut single = writer(0, Version::new(1, 2));
        let mut batch = writer(0, Version::new(1, 2));
        let format = *single.header().point_format();
        let points = (0..10)
            .map(|i| {
                let mut point = RawPoint::prepare(&format);
                point.point10_mut().unwrap().x = i;
                point.point10_mut().unwrap().return_number = (i % 4) as u8;
                point
            })
            .collect::<Vec<_>>();
        for point in &points {
            single.write_raw_point(point).unwrap();
        }
        batch.write_many_raw_points(&points).unwrap();
        assert_eq!(
            single.header().number_of_points_by_return(),
            batch.header().number_of_points_by_return()
        );
        let single = single.into_inner().unwrap().into_inner();
        let batch = batch.into_inner().unwrap().into_inner();
        assert_eq!(single, batch);
    }
}
