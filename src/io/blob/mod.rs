//! The compact cell format geometries are stored in.
//!
//! A serialized geometry starts with a fixed four byte prefix that can be inspected without
//! decoding the rest, see [`GeometryBlob`]:
//!
//! ```text
//! [kind: u8][properties: u8][hash: u16]
//! ```
//!
//! An optional bounding box of four outward-rounded f32 values follows when the properties
//! carry [`HAS_BBOX`](crate::properties::GeometryProperties::HAS_BBOX). The geometry tree comes
//! last, depth first:
//!
//! ```text
//! node := kind: u32, count: u32, body
//! body := vertex bytes              Point, LineString
//!       | (count: u32, vertex bytes)*  Polygon rings
//!       | node*                     collections
//! ```
//!
//! All integers and floats are little-endian. Vertex bytes use the in-memory layout of
//! [`VertexArray`](crate::vertex::VertexArray), so deserialized nodes borrow them in place.

mod deserialize;
mod prefix;
mod serialize;

pub use deserialize::{deserialize, deserialize_with_options};
pub use prefix::GeometryBlob;
pub use serialize::{serialize, serialize_with_options, serialized_size, SerializeOptions};

/// Kind, properties and hash.
pub(crate) const PREFIX_SIZE: usize = 1 + 1 + 2;

/// Four f32 bounds.
pub(crate) const BBOX_SIZE: usize = 4 * 4;

/// Node kind and count.
pub(crate) const NODE_HEADER_SIZE: usize = 4 + 4;

/// 32-bit FNV-1a folded to 16 bits.
pub(crate) fn content_hash(bytes: &[u8]) -> u16 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let hash = bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(PRIME)
    });
    ((hash >> 16) ^ (hash & 0xffff)) as u16
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_is_stable() {
        // FNV-1a of the empty input is the offset basis
        assert_eq!(content_hash(&[]), (0x811c ^ 0x9dc5) as u16);
        assert_eq!(content_hash(b"point"), content_hash(b"point"));
        assert_ne!(content_hash(b"point"), content_hash(b"poinu"));
    }
}
