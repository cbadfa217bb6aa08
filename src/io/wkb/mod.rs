//! An optimized implementation of reading and writing ISO-flavored WKB-encoded geometries.

mod api;
mod common;
mod reader;
pub mod writer;

#[cfg(feature = "rayon")]
pub use api::wkb_to_blob_par;
pub use api::{from_wkb, to_wkb, wkb_to_blob};
pub use common::{Endianness, WKBType};
pub use reader::{WkbReader, WkbReaderOptions};
pub use writer::{geometry_wkb_size, write_geometry_as_wkb};
