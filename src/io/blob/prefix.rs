use byteorder::{ByteOrder, LittleEndian};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoCellError, Result};
use crate::geometry::BoundingBox;
use crate::io::blob::{BBOX_SIZE, PREFIX_SIZE};
use crate::properties::GeometryProperties;

/// A serialized geometry whose prefix has been validated, but whose payload has not been
/// decoded.
///
/// ```
/// use bumpalo::Bump;
/// use geocell::datatypes::GeometryType;
/// use geocell::geometry::{Geometry, LineString};
/// use geocell::io::blob::{serialize, GeometryBlob};
/// use geocell::vertex::VertexXY;
///
/// let arena = Bump::new();
/// let line: Geometry = LineString::from_vertices(
///     &arena,
///     &[VertexXY::new(0.0, 0.0), VertexXY::new(2.0, 1.0)],
/// )
/// .into();
/// let bytes = serialize(&line).unwrap();
///
/// let blob = GeometryBlob::try_new(&bytes).unwrap();
/// assert_eq!(blob.geometry_type(), GeometryType::LineString);
/// assert_eq!(blob.bounding_box().unwrap().maxx, 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeometryBlob<'a> {
    bytes: &'a [u8],
    geometry_type: GeometryType,
    properties: GeometryProperties,
}

impl<'a> GeometryBlob<'a> {
    pub fn try_new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < PREFIX_SIZE {
            return Err(GeoCellError::InvalidBlob(
                format!(
                    "{} bytes is shorter than the {PREFIX_SIZE} byte prefix",
                    bytes.len()
                )
                .into(),
            ));
        }

        let geometry_type = GeometryType::try_from(bytes[0]).map_err(|_| {
            GeoCellError::InvalidBlob(format!("unknown geometry kind {}", bytes[0]).into())
        })?;
        let properties = GeometryProperties::from_bits_retain(bytes[1]);
        if properties.has_bbox() && bytes.len() < PREFIX_SIZE + BBOX_SIZE {
            return Err(GeoCellError::InvalidBlob(
                "bounding box flag set but the bounding box is truncated".into(),
            ));
        }

        Ok(Self {
            bytes,
            geometry_type,
            properties,
        })
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// The stored properties, including [`GeometryProperties::HAS_BBOX`] and any reserved bits.
    pub fn properties(&self) -> GeometryProperties {
        self.properties
    }

    pub fn dimension(&self) -> Dimension {
        self.properties.dimension()
    }

    /// The stored content hash.
    pub fn hash(&self) -> u16 {
        LittleEndian::read_u16(&self.bytes[2..PREFIX_SIZE])
    }

    /// The cached bounds, widened from their f32 storage. `None` when none were written.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if !self.properties.has_bbox() {
            return None;
        }
        let mut bounds = [0f32; 4];
        LittleEndian::read_f32_into(&self.bytes[PREFIX_SIZE..PREFIX_SIZE + BBOX_SIZE], &mut bounds);
        let [minx, miny, maxx, maxy] = bounds.map(f64::from);
        Some(BoundingBox::new(minx, miny, maxx, maxy))
    }

    /// The encoded geometry tree, after the prefix and bounding box.
    pub fn payload(&self) -> &'a [u8] {
        let start = if self.properties.has_bbox() {
            PREFIX_SIZE + BBOX_SIZE
        } else {
            PREFIX_SIZE
        };
        &self.bytes[start..]
    }

    /// Everything the hash covers: the bounding box, if any, and the payload.
    pub(crate) fn hashed(&self) -> &'a [u8] {
        &self.bytes[PREFIX_SIZE..]
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::geometry::{Geometry, Point};
    use crate::io::blob::{content_hash, serialize};
    use crate::vertex::VertexXYM;

    #[test]
    fn probe_without_decoding() {
        let arena = Bump::new();
        let point: Geometry = Point::new(&arena, VertexXYM::new(1.0, 2.0, 3.0)).into();
        let bytes = serialize(&point).unwrap();

        let blob = GeometryBlob::try_new(&bytes).unwrap();
        assert_eq!(blob.geometry_type(), GeometryType::Point);
        assert_eq!(blob.dimension(), Dimension::XYM);
        assert_eq!(blob.bounding_box(), None);
        assert_eq!(blob.hash(), content_hash(blob.hashed()));
        assert_eq!(blob.payload().len(), bytes.len() - PREFIX_SIZE);
    }

    #[test]
    fn rejects_short_prefix() {
        assert!(matches!(
            GeometryBlob::try_new(&[0, 0, 0]),
            Err(GeoCellError::InvalidBlob(_))
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(matches!(
            GeometryBlob::try_new(&[9, 0, 0, 0]),
            Err(GeoCellError::InvalidBlob(_))
        ));
    }

    #[test]
    fn rejects_truncated_bbox() {
        let flags = GeometryProperties::HAS_BBOX.bits();
        assert!(GeometryBlob::try_new(&[1, flags, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn reserved_bits_survive() {
        let blob = GeometryBlob::try_new(&[0, 0b1000_0000, 0, 0]).unwrap();
        assert_eq!(blob.properties().bits(), 0b1000_0000);
        assert_eq!(blob.dimension(), Dimension::XY);
    }
}
