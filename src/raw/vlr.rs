//! Variable length records as laid out on disk.

use crate::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// The size of the on-disk vlr header.
pub const HEADER_SIZE: u16 = 54;

/// A raw variable length record.
///
/// The on-disk header is 54 bytes: two reserved bytes, the sixteen byte user
/// id, the record id, the payload size, and the thirty-two byte description.
/// The payload follows immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct Vlr {
    /// Must be zero.
    pub reserved: u16,

    /// ASCII identifier of the user that created the record.
    ///
    /// Not necessarily nul-terminated.
    pub user_id: [u8; 16],

    /// The record type, scoped by the user id.
    pub record_id: u16,

    /// The number of payload bytes after the 54 byte header.
    pub record_length_after_header: u16,

    /// Optional text description of the payload.
    pub description: [u8; 32],

    /// The payload.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Reads a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::raw::Vlr;
    /// use std::io::Cursor;
    /// let vlr = Vlr::read_from(Cursor::new([0u8; 54])).unwrap();
    /// assert!(vlr.data.is_empty());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Vlr> {
        let reserved = read.read_u16::<LittleEndian>()?;
        let mut user_id = [0; 16];
        read.read_exact(&mut user_id)?;
        let record_id = read.read_u16::<LittleEndian>()?;
        let record_length_after_header = read.read_u16::<LittleEndian>()?;
        let mut description = [0; 32];
        read.read_exact(&mut description)?;
        let mut data = vec![0; usize::from(record_length_after_header)];
        read.read_exact(&mut data)?;
        Ok(Vlr {
            reserved,
            user_id,
            record_id,
            record_length_after_header,
            description,
            data,
        })
    }

    /// Writes this raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::raw::Vlr;
    /// use std::io::Cursor;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Vlr::default().write_to(&mut cursor).unwrap();
    /// assert_eq!(54, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u16::<LittleEndian>(self.reserved)?;
        write.write_all(&self.user_id)?;
        write.write_u16::<LittleEndian>(self.record_id)?;
        write.write_u16::<LittleEndian>(self.record_length_after_header)?;
        write.write_all(&self.description)?;
        write.write_all(&self.data)?;
        Ok(())
    }

    /// Returns the total on-disk size of this vlr, header included.
    pub fn len(&self) -> usize {
        usize::from(HEADER_SIZE) + self.data.len()
    }

    /// Returns true if this vlr has no payload.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Vlr {
    fn default() -> Vlr {
        Vlr {
            reserved: 0,
            user_id: [0; 16],
            record_id: 0,
            record_length_after_header: 0,
            description: [0; 32],
            data: Vec::new(),
        }
    }
}
