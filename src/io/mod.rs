//! Binary encodings of geometries, WKT display, and interoperability with the `geo` crate.

pub mod blob;
pub(crate) mod cursor;
pub mod display;
pub mod geo;
pub mod wkb;
