//! Bridges this crate and the laz compression engine.
//!
//! The laszip vlr is implementation state, not user data: readers strip it
//! from the public header, writers synthesize it from the point format.

use crate::{point::Format, Header, Result, Vlr};
use laz::{LazItemRecordBuilder, LazItemType, LazVlr};
use std::io::Cursor;

/// Returns true if this vlr is the laszip vlr.
///
/// # Examples
///
/// ```
/// use las_codec::{laz::is_laszip_vlr, Vlr};
/// let mut vlr = Vlr::default();
/// assert!(!is_laszip_vlr(&vlr));
/// vlr.user_id = "laszip encoded".to_string();
/// vlr.record_id = 22204;
/// assert!(is_laszip_vlr(&vlr));
/// ```
pub fn is_laszip_vlr(vlr: &Vlr) -> bool {
    vlr.user_id == LazVlr::USER_ID && vlr.record_id == LazVlr::RECORD_ID
}

/// Builds the laz record description for a point format.
pub(crate) fn build_laz_vlr(format: &Format) -> LazVlr {
    let mut items = LazItemRecordBuilder::new();
    if format.is_extended() {
        let _ = items.add_item(LazItemType::Point14);
        if format.has_color() {
            if format.has_nir() {
                let _ = items.add_item(LazItemType::RGBNIR14);
            } else {
                let _ = items.add_item(LazItemType::RGB14);
            }
        }
        if format.extra_bytes > 0 {
            let _ = items.add_item(LazItemType::Byte14(format.extra_bytes));
        }
    } else {
        let _ = items.add_item(LazItemType::Point10);
        if format.has_gps_time() {
            let _ = items.add_item(LazItemType::GpsTime);
        }
        if format.has_color() {
            let _ = items.add_item(LazItemType::RGB12);
        }
        if format.extra_bytes > 0 {
            let _ = items.add_item(LazItemType::Byte(format.extra_bytes));
        }
    }
    LazVlr::from_laz_items(items.build())
}

impl Header {
    /// Appends a synthesized laszip vlr describing `laz_vlr`.
    pub(crate) fn add_laz_vlr(&mut self, laz_vlr: &LazVlr) -> Result<()> {
        let mut cursor = Cursor::new(Vec::new());
        laz_vlr.write_to(&mut cursor)?;
        self.vlrs.push(Vlr {
            user_id: LazVlr::USER_ID.to_string(),
            record_id: LazVlr::RECORD_ID,
            description: LazVlr::DESCRIPTION.to_string(),
            data: cursor.into_inner(),
        });
        Ok(())
    }

    /// Removes and returns the laszip vlr, if there is one.
    pub(crate) fn extract_laszip_vlr(&mut self) -> Option<Vlr> {
        let index = self.vlrs.iter().position(is_laszip_vlr)?;
        Some(self.vlrs.remove(index))
    }
}
