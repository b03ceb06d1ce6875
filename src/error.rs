//! Crate-specific errors.

use crate::{point::Format, Version};
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The writer is closed.
    #[error("the writer is closed")]
    ClosedWriter,

    /// The header size, as computed, is too large.
    #[error("the header is too large ({0} bytes) to convert to a raw header")]
    HeaderTooLarge(usize),

    /// The point format of a point does not match the format the writer was
    /// opened with.
    #[error("point format {format_id} does not match the writer's format {expected}")]
    IncompatiblePointFormat {
        /// The format id of the offending point.
        format_id: u8,
        /// The format the writer was configured with.
        expected: Format,
    },

    /// The las version does not support the point format.
    #[error("las version {version} does not support point format {format_id}")]
    IncompatibleVersionAndFormat {
        /// The las version.
        version: Version,
        /// The unsupported point format id.
        format_id: u8,
    },

    /// The first four bytes of the file are not "LASF".
    #[error("the file signature is not LASF: {0:?}")]
    InvalidSignature([u8; 4]),

    /// The point format id, after masking the compression bits, is not
    /// between 0 and 10.
    #[error("invalid point format id: {0}")]
    InvalidPointFormat(u8),

    /// The header-declared point record length is smaller than the standard
    /// size of its point format.
    #[error(
        "point record length {size} is below the minimum {minimum} for point format {format_id}"
    )]
    InvalidPointSize {
        /// The record length declared in the header.
        size: u16,
        /// The point format id declared in the header.
        format_id: u8,
        /// The standard size of that format.
        minimum: u16,
    },

    /// The las version is not recognized.
    #[error("invalid las version: {0}")]
    InvalidVersion(Version),

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stream ended before a full record could be read.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// Wrapper around `laz::LasZipError`.
    #[cfg(feature = "laz")]
    #[error("laz error: {0}")]
    Laz(#[from] laz::LasZipError),

    /// The file is compressed but the crate was built without laz support.
    #[cfg(not(feature = "laz"))]
    #[error("the data is compressed, but the crate was built without laz support")]
    NoLazSupport,

    /// A compressed file does not contain a laszip vlr.
    #[error("the compressed file does not have a laszip vlr")]
    MissingLaszipVlr,

    /// The computed offset to the point data does not fit in a u32.
    #[error("the offset to the point data is too large: {0}")]
    OffsetToPointDataTooLarge(usize),

    /// The point count exceeds what the las version can store.
    #[error("the point count {0} is too large for the file's las version")]
    PointCountTooHigh(u64),

    /// A string does not fit its fixed-width header field.
    #[error("string is too long for a {len} byte field: {string}")]
    StringTooLong {
        /// The string.
        string: String,
        /// The length of the target field.
        len: usize,
    },

    /// There are too many variable length records to count them in a u32.
    #[error("too many variable length records: {0}")]
    TooManyVlrs(usize),

    /// Wrapper around `std::str::Utf8Error`.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The vlr payload is too long to store its size in a u16.
    #[error("the vlr data is too long: {0}")]
    VlrDataTooLong(usize),
}
