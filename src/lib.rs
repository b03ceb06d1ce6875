//! Read and write point clouds stored in the [ASPRS
//! LAS](https://www.asprs.org/divisions-committees/lidar-division/laser-las-file-format-exchange-activities)
//! binary format, versions 1.0 through 1.4, and its laszip-compressed
//! counterpart LAZ.
//!
//! # Reading
//!
//! Open a [Reader] from a path or from anything that is `Read + Seek`,
//! then pull points off it in file order:
//!
//! ```no_run
//! use las_codec::{Point, Reader};
//!
//! let mut reader = Reader::from_path("points.las").unwrap();
//! println!("the file has {} points", reader.header().number_of_points());
//! for point in reader.points() {
//!     let point = point.unwrap();
//!     println!("({}, {}, {})", point.x, point.y, point.z);
//! }
//! ```
//!
//! Applications that care about the exact stored representation can skip
//! the scaling and work with [raw::RawPoint] instead:
//!
//! ```no_run
//! use las_codec::{raw::RawPoint, Reader};
//!
//! let mut reader = Reader::from_path("points.las").unwrap();
//! let mut point = RawPoint::prepare(reader.header().point_format());
//! reader.read_next_raw(&mut point).unwrap();
//! ```
//!
//! # Writing
//!
//! A [Writer] is configured by the [Header] it takes ownership of. The
//! header is rewritten with the final point counts when the writer closes,
//! so dropping a writer without [Writer::close] only gets to log a
//! finalization failure, not report it.
//!
//! ```
//! use las_codec::{Builder, Point, Writer};
//! use std::io::Cursor;
//!
//! let mut builder = Builder::default();
//! builder.point_format.id = 1;
//! let header = builder.into_header().unwrap();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! writer.write_point(&Point { x: 1., y: 2., z: 3., ..Default::default() }).unwrap();
//! writer.close().unwrap();
//! ```
//!
//! # Compression
//!
//! LAZ support is behind the `laz` cargo feature. When it is enabled,
//! readers detect compression from the header and writers compress
//! whenever the header's point format is flagged compressed, which
//! [Writer::from_path] derives from a `.laz` extension.

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod feature;
pub mod io;
pub mod point;
pub mod raw;
pub mod utils;

mod bounds;
mod error;
mod header;
#[cfg(feature = "laz")]
pub mod laz;
mod reader;
mod scaling;
mod vector;
mod version;
mod vlr;
mod writer;

pub use crate::{
    bounds::Bounds,
    error::Error,
    feature::Feature,
    header::{Builder, Header},
    point::Point,
    reader::{PointIter, Reader},
    scaling::Scaling,
    vector::Vector,
    version::Version,
    vlr::Vlr,
    writer::Writer,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
