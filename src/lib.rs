//! Arena-backed geometry values for columnar engines: a copy-on-write vertex model, an ISO
//! WKB decoder and writer, and a compact serialized form that deserializes without copying
//! vertex data.
//!
//! Geometries borrow from a [`bumpalo::Bump`] arena or from the bytes they were read from.
//! Dropping the arena frees every geometry built in it at once.
//!
//! ```
//! use bumpalo::Bump;
//! use geocell::io::blob::{deserialize, serialize};
//! use geocell::io::wkb::from_wkb;
//!
//! // LINESTRING (0 0, 3 4), little-endian
//! let mut wkb = vec![1u8, 2, 0, 0, 0, 2, 0, 0, 0];
//! for ordinate in [0f64, 0., 3., 4.] {
//!     wkb.extend_from_slice(&ordinate.to_le_bytes());
//! }
//!
//! let arena = Bump::new();
//! let geometry = from_wkb(&wkb, &arena).unwrap();
//! let bytes = serialize(&geometry).unwrap();
//! let restored = deserialize(&bytes, &arena).unwrap();
//! assert_eq!(restored, geometry);
//! assert_eq!(restored.to_string(), "LINESTRING (0 0, 3 4)");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use geometry::Geometry;
pub use trait_::{CollectionGeometry, GeometryNode, MultiPartGeometry, SinglePartGeometry};

pub mod algorithm;
pub mod datatypes;
pub mod error;
pub mod geometry;
pub mod io;
pub mod properties;
#[cfg(test)]
pub(crate) mod test;
pub mod trait_;
mod util;
pub mod vertex;
