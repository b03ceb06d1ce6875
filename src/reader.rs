//! Read las and laz points.
//!
//! A [Reader] parses the header and its variable length records when it
//! opens, then hands out points strictly in file order:
//!
//! ```no_run
//! use las_codec::{raw::RawPoint, Point, Reader};
//!
//! let mut reader = Reader::from_path("points.las").unwrap();
//! let mut point = RawPoint::prepare(reader.header().point_format());
//! reader.read_next_raw(&mut point).unwrap();
//! ```
//!
//! Compressed files are detected from the header; the decompressor is fed
//! from the same source and the laszip vlr never shows up in the public
//! header. There is no random access: points come back in the order they
//! were written, and reading past the end of the point data is an error.

use crate::{io::Source, raw, raw::RawPoint, Builder, Error, Header, Point, Result, Vlr};
use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
    path::Path,
};

/// Reads las points from a [Source].
#[allow(missing_debug_implementations)]
pub struct Reader<R: Read + Seek + Send + Sync + 'static> {
    header: Header,
    index: u64,
    point_buffer: Vec<u8>,
    point_size: usize,
    source: PointSource<R>,
}

impl<R: Read + Seek + Send + Sync + 'static> std::fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader").finish_non_exhaustive()
    }
}

enum PointSource<R: Read + Seek + Send + Sync + 'static> {
    Las(R),
    #[cfg(feature = "laz")]
    Laz(laz::LasZipDecompressor<'static, R>),
}

impl<R: Read + Seek + Send + Sync + 'static> PointSource<R> {
    fn fill(&mut self, buffer: &mut [u8]) -> Result<()> {
        match self {
            PointSource::Las(source) => source.read_record(buffer),
            #[cfg(feature = "laz")]
            PointSource::Laz(decompressor) => {
                decompressor.decompress_many(buffer).map_err(Error::from)
            }
        }
    }
}

impl<R: Read + Seek + Send + Sync + 'static> Reader<R> {
    /// Creates a new reader.
    ///
    /// This does not buffer the source; if you are reading from a file,
    /// either wrap it in a `BufReader` yourself or use
    /// [Reader::from_path].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// ```
    pub fn new(mut source: R) -> Result<Reader<R>> {
        let raw = raw::Header::read_from(&mut source)?;
        let offset_to_point_data = u64::from(raw.offset_to_point_data);
        let number_of_vlrs = raw.number_of_variable_length_records;
        let mut builder = Builder::new(raw)?;
        for _ in 0..number_of_vlrs {
            builder
                .vlrs
                .push(Vlr::from_raw(raw::Vlr::read_from(&mut source)?)?);
        }
        let mut header = builder.into_header()?;
        let _ = source.seek(SeekFrom::Start(offset_to_point_data))?;

        let point_size = usize::from(header.point_format().len());
        let source = if header.point_format().is_compressed {
            #[cfg(feature = "laz")]
            {
                let vlr = header
                    .extract_laszip_vlr()
                    .ok_or(Error::MissingLaszipVlr)?;
                let laz_vlr = laz::LazVlr::from_buffer(&vlr.data)?;
                PointSource::Laz(laz::LasZipDecompressor::new(source, laz_vlr)?)
            }
            #[cfg(not(feature = "laz"))]
            {
                return Err(Error::NoLazSupport);
            }
        } else {
            PointSource::Las(source)
        };
        Ok(Reader {
            header,
            index: 0,
            point_buffer: vec![0; point_size],
            point_size,
            source,
        })
    }

    /// Returns a reference to this reader's header.
    ///
    /// For compressed files the header does not contain the laszip vlr; it
    /// is consumed when the reader opens.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next raw point into `point`.
    ///
    /// Reading past the end of the point data produces
    /// [Error::UnexpectedEof]. After any error the point contents are
    /// undefined and the caller should stop reading.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let format = *writer.header().point_format();
    /// writer.write_raw_point(&RawPoint::prepare(&format)).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// let mut point = RawPoint::prepare(&format);
    /// reader.read_next_raw(&mut point).unwrap();
    /// assert!(reader.read_next_raw(&mut point).is_err());
    /// ```
    pub fn read_next_raw(&mut self, point: &mut RawPoint) -> Result<()> {
        let format = *self.header.point_format();
        let point_size = self.point_size;
        self.source.fill(&mut self.point_buffer[..point_size])?;
        *point = RawPoint::read_from(&self.point_buffer[..point_size], &format)?;
        self.index += 1;
        Ok(())
    }

    /// Reads raw points until `points` is full.
    ///
    /// The point data is pulled from the source in a single read.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let format = *writer.header().point_format();
    /// writer.write_raw_point(&RawPoint::prepare(&format)).unwrap();
    /// writer.write_raw_point(&RawPoint::prepare(&format)).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// let mut points = vec![RawPoint::prepare(&format); 2];
    /// reader.read_many_next_raw(&mut points).unwrap();
    /// ```
    pub fn read_many_next_raw(&mut self, points: &mut [RawPoint]) -> Result<()> {
        let format = *self.header.point_format();
        let total = self.point_size * points.len();
        if self.point_buffer.len() < total {
            self.point_buffer.resize(total, 0);
        }
        self.source.fill(&mut self.point_buffer[..total])?;
        for (index, point) in points.iter_mut().enumerate() {
            let record = &self.point_buffer[index * self.point_size..][..self.point_size];
            *point = RawPoint::read_from(record, &format)?;
        }
        self.index += points.len() as u64;
        Ok(())
    }

    /// Reads the next point, with the header's scaling applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Point, Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let format = *writer.header().point_format();
    /// writer.write_raw_point(&RawPoint::prepare(&format)).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// let mut point = Point::default();
    /// reader.read_next(&mut point).unwrap();
    /// assert_eq!(0., point.x);
    /// ```
    pub fn read_next(&mut self, point: &mut Point) -> Result<()> {
        let mut raw = RawPoint::prepare(self.header.point_format());
        self.read_next_raw(&mut raw)?;
        *point = Point::from_raw(&raw, self.header.scaling());
        Ok(())
    }

    /// Returns an iterator over this reader's remaining points.
    ///
    /// The iterator stops at the point count declared in the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw::RawPoint, Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let format = *writer.header().point_format();
    /// writer.write_raw_point(&RawPoint::prepare(&format)).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// assert_eq!(1, reader.points().count());
    /// ```
    pub fn points(&mut self) -> PointIter<'_, R> {
        PointIter { reader: self }
    }
}

impl Reader<BufReader<File>> {
    /// Creates a reader for the file at the path.
    ///
    /// The file is wrapped in a `BufReader`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use las_codec::Reader;
    /// let reader = Reader::from_path("points.las").unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| Reader::new(BufReader::new(file)))
    }
}

impl Reader<Cursor<Vec<u8>>> {
    /// Creates a reader over an in-memory buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Reader, Writer};
    /// use std::io::Cursor;
    ///
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default()).unwrap();
    /// let bytes = writer.into_inner().unwrap().into_inner();
    /// let reader = Reader::from_buffer(bytes).unwrap();
    /// ```
    pub fn from_buffer(buffer: Vec<u8>) -> Result<Reader<Cursor<Vec<u8>>>> {
        Reader::new(Cursor::new(buffer))
    }
}

/// An iterator over a reader's points.
///
/// Created by [Reader::points].
#[allow(missing_debug_implementations)]
pub struct PointIter<'a, R: Read + Seek + Send + Sync + 'static> {
    reader: &'a mut Reader<R>,
}

impl<R: Read + Seek + Send + Sync + 'static> Iterator for PointIter<'_, R> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reader.index < self.reader.header.number_of_points() {
            let mut point = Point::default();
            Some(self.reader.read_next(&mut point).map(|()| point))
        } else {
            None
        }
    }
}
