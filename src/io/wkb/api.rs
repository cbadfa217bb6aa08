use bumpalo::Bump;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::blob::serialize;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::reader::WkbReader;
use crate::io::wkb::writer::{geometry_wkb_size, write_geometry_as_wkb};

/// Parse a WKB buffer into a [`Geometry`] allocated from `arena`.
pub fn from_wkb<'a>(buf: &[u8], arena: &'a Bump) -> Result<Geometry<'a>> {
    WkbReader::new(arena).read_geometry(buf)
}

/// Encode a [`Geometry`] as little-endian ISO WKB.
pub fn to_wkb(geometry: &Geometry<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(geometry_wkb_size(geometry));
    write_geometry_as_wkb(&mut buf, geometry, Endianness::LittleEndian)?;
    Ok(buf)
}

/// Decode WKB and re-encode it in the serialized cell format.
///
/// The intermediate tree lives in a scratch arena dropped before returning.
pub fn wkb_to_blob(wkb: &[u8]) -> Result<Vec<u8>> {
    let arena = Bump::new();
    let geometry = from_wkb(wkb, &arena)?;
    serialize(&geometry)
}

/// [`wkb_to_blob`] over many inputs in parallel.
///
/// Each worker reuses one arena, reset between inputs. Output order matches input order.
#[cfg(feature = "rayon")]
pub fn wkb_to_blob_par(inputs: &[&[u8]]) -> Vec<Result<Vec<u8>>> {
    inputs
        .par_iter()
        .map_init(Bump::new, |arena, wkb| {
            arena.reset();
            let geometry = from_wkb(wkb, arena)?;
            serialize(&geometry)
        })
        .collect()
}
