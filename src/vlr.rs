//! Variable length records carry additional metadata in the header area.
//!
//! Vlrs contain arbitrary data:
//!
//! ```
//! use las_codec::Vlr;
//! let mut vlr = Vlr::default();
//! vlr.user_id = "LASF_Spec".to_string();
//! vlr.record_id = 4;
//! vlr.description = "Some very important data".to_string();
//! vlr.data = vec![1, 2, 3];
//! ```

use crate::{raw, utils::AsLasStr, utils::FromLasStr, Error, Result};

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that created this record.
    ///
    /// Often an official, registered user id such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// The type of the record, scoped by the user id.
    pub record_id: u16,

    /// Textual description of the record.
    pub description: String,

    /// The payload, owned.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a vlr from a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{raw, Vlr};
    /// let vlr = Vlr::from_raw(raw::Vlr::default()).unwrap();
    /// assert!(vlr.data.is_empty());
    /// ```
    pub fn from_raw(raw: raw::Vlr) -> Result<Vlr> {
        Ok(Vlr {
            user_id: raw.user_id.as_las_str()?.to_string(),
            record_id: raw.record_id,
            description: raw.description.as_las_str()?.to_string(),
            data: raw.data,
        })
    }

    /// Converts this vlr into a raw vlr.
    ///
    /// Fails if the payload is too long for the size field or a string does
    /// not fit its fixed-width field.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Vlr;
    /// let raw = Vlr::default().into_raw().unwrap();
    /// assert_eq!(0, raw.record_length_after_header);
    /// ```
    pub fn into_raw(self) -> Result<raw::Vlr> {
        if self.data.len() > usize::from(u16::MAX) {
            return Err(Error::VlrDataTooLong(self.data.len()));
        }
        let mut user_id = [0; 16];
        user_id.as_mut().from_las_str(&self.user_id)?;
        let mut description = [0; 32];
        description.as_mut().from_las_str(&self.description)?;
        Ok(raw::Vlr {
            reserved: 0,
            user_id,
            record_id: self.record_id,
            record_length_after_header: self.data.len() as u16,
            description,
            data: self.data,
        })
    }

    /// Returns the total on-disk size of this vlr, header included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Vlr;
    /// assert_eq!(54, Vlr::default().len());
    /// ```
    pub fn len(&self) -> usize {
        usize::from(raw::vlr::HEADER_SIZE) + self.data.len()
    }

    /// Returns true if this vlr has no payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Vlr;
    /// assert!(Vlr::default().is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
