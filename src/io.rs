//! The byte streams the codec reads from and writes to.
//!
//! A [Source] is anything the reader can pull las bytes out of, a [Dest] is
//! anything the writer can push them into. Both are blanket-implemented for
//! the std stream traits, so the built-in variants come for free:
//!
//! - a file, via `BufReader<File>` / `BufWriter<File>`
//! - an in-memory buffer, via `std::io::Cursor`
//! - any user-defined stream that implements `Read + Seek` (or
//!   `Write + Seek`), which is also how the laz engine is driven
//!
//! Short reads are not errors at the stream level; [Source::read_record]
//! loops until the record is full and reports a truncated stream as
//! [Error::UnexpectedEof](crate::Error), anything else as an io error.

use crate::{Error, Result};
use std::io::{ErrorKind, Read, Seek, Write};

/// A seekable stream of las bytes.
pub trait Source: Read + Seek {
    /// Returns the current position in the stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::io::Source;
    /// use std::io::Cursor;
    /// let mut source = Cursor::new(vec![0u8; 4]);
    /// assert_eq!(0, source.tell().unwrap());
    /// ```
    fn tell(&mut self) -> Result<u64> {
        self.stream_position().map_err(Error::from)
    }

    /// Fills `buf` completely, or fails.
    ///
    /// A stream that ends mid-record produces
    /// [Error::UnexpectedEof](crate::Error).
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::io::Source;
    /// use std::io::Cursor;
    /// let mut source = Cursor::new(vec![1u8, 2]);
    /// let mut record = [0u8; 2];
    /// source.read_record(&mut record).unwrap();
    /// assert!(source.read_record(&mut record).is_err());
    /// ```
    fn read_record(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_exact(buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                Error::UnexpectedEof
            } else {
                Error::from(err)
            }
        })
    }
}

impl<T: Read + Seek> Source for T {}

/// A seekable stream las bytes can be written to.
pub trait Dest: Write + Seek {
    /// Returns the current position in the stream.
    fn tell(&mut self) -> Result<u64> {
        self.stream_position().map_err(Error::from)
    }

    /// Writes all of `buf`, or fails with the underlying io error.
    fn write_record(&mut self, buf: &[u8]) -> Result<()> {
        self.write_all(buf).map_err(Error::from)
    }
}

impl<T: Write + Seek> Dest for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tell_tracks_reads() {
        let mut source = Cursor::new(vec![0u8; 8]);
        let mut buf = [0u8; 3];
        source.read_record(&mut buf).unwrap();
        assert_eq!(3, Source::tell(&mut source).unwrap());
    }

    #[test]
    fn short_read_is_unexpected_eof() {
        let mut source = Cursor::new(vec![0u8; 2]);
        let mut buf = [0u8; 4];
        assert!(matches!(
            source.read_record(&mut buf).unwrap_err(),
            Error::UnexpectedEof
        ));
    }

    #[test]
    fn write_record_then_read_back() {
        let mut dest = Cursor::new(Vec::new());
        dest.write_record(&[1, 2, 3]).unwrap();
        assert_eq!(3, Dest::tell(&mut dest).unwrap());
        assert_eq!(vec![1, 2, 3], dest.into_inner());
    }
}
