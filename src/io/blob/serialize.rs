use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use tracing::debug;

use crate::datatypes::GeometryType;
use crate::error::{GeoCellError, Result};
use crate::geometry::{BoundingBox, Geometry};
use crate::io::blob::{content_hash, BBOX_SIZE, NODE_HEADER_SIZE, PREFIX_SIZE};
use crate::trait_::{CollectionGeometry, GeometryNode, MultiPartGeometry, SinglePartGeometry};
use crate::util::{f64_to_f32_down, f64_to_f32_up};

/// Options for [`serialize_with_options`].
#[derive(Debug, Clone, Copy)]
pub struct SerializeOptions {
    /// Cache the XY bounds ahead of the payload. Points and empty geometries never carry one.
    pub bounding_box: bool,

    /// How deeply collections may nest.
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            bounding_box: true,
            max_depth: 128,
        }
    }
}

/// Serialize a geometry with the default [`SerializeOptions`].
pub fn serialize(geometry: &Geometry<'_>) -> Result<Vec<u8>> {
    serialize_with_options(geometry, &SerializeOptions::default())
}

/// Serialize a geometry into a freshly allocated buffer of exactly [`serialized_size`] bytes.
pub fn serialize_with_options(
    geometry: &Geometry<'_>,
    options: &SerializeOptions,
) -> Result<Vec<u8>> {
    let bounds = cached_bounds(geometry, options);
    let size = serialized_size(geometry, options);
    let mut buf = Vec::with_capacity(size);

    let mut properties = geometry.properties();
    properties.set_bbox(bounds.is_some());
    buf.write_u8(geometry.geometry_type().into())?;
    buf.write_u8(properties.bits())?;
    // patched once the payload is known
    buf.write_u16::<LittleEndian>(0)?;

    if let Some(bounds) = bounds {
        buf.write_f32::<LittleEndian>(f64_to_f32_down(bounds.minx))?;
        buf.write_f32::<LittleEndian>(f64_to_f32_down(bounds.miny))?;
        buf.write_f32::<LittleEndian>(f64_to_f32_up(bounds.maxx))?;
        buf.write_f32::<LittleEndian>(f64_to_f32_up(bounds.maxy))?;
    }

    write_node(&mut buf, geometry, 0, options.max_depth)?;
    debug_assert_eq!(buf.len(), size);

    let hash = content_hash(&buf[PREFIX_SIZE..]);
    LittleEndian::write_u16(&mut buf[2..PREFIX_SIZE], hash);

    debug!(
        geometry_type = %geometry.geometry_type(),
        bytes = buf.len(),
        bbox = bounds.is_some(),
        "serialized geometry"
    );
    Ok(buf)
}

/// The number of bytes [`serialize_with_options`] produces for `geometry`.
pub fn serialized_size(geometry: &Geometry<'_>, options: &SerializeOptions) -> usize {
    let bbox_size = if cached_bounds(geometry, options).is_some() {
        BBOX_SIZE
    } else {
        0
    };
    PREFIX_SIZE + bbox_size + node_size(geometry)
}

fn cached_bounds(geometry: &Geometry<'_>, options: &SerializeOptions) -> Option<BoundingBox> {
    if !options.bounding_box || geometry.geometry_type() == GeometryType::Point {
        return None;
    }
    geometry.bounding_box()
}

fn node_size(geometry: &Geometry<'_>) -> usize {
    let body = match geometry {
        Geometry::Point(g) => g.vertex_count().min(1) * g.vertex_size(),
        Geometry::LineString(g) => g.byte_size(),
        Geometry::Polygon(g) => g.rings().iter().map(|ring| 4 + ring.byte_size()).sum(),
        Geometry::MultiPoint(g) => collection_body_size(g),
        Geometry::MultiLineString(g) => collection_body_size(g),
        Geometry::MultiPolygon(g) => collection_body_size(g),
        Geometry::GeometryCollection(g) => collection_body_size(g),
    };
    NODE_HEADER_SIZE + body
}

fn collection_body_size<'a>(geom: &impl CollectionGeometry<'a>) -> usize {
    (0..geom.part_count())
        .filter_map(|i| geom.geometry(i))
        .map(|element| node_size(&element))
        .sum()
}

fn write_count(buf: &mut Vec<u8>, count: usize) -> Result<()> {
    let count: u32 = count.try_into().map_err(|_| GeoCellError::Overflow)?;
    buf.write_u32::<LittleEndian>(count)?;
    Ok(())
}

fn write_node(
    buf: &mut Vec<u8>,
    geometry: &Geometry<'_>,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    if depth > max_depth {
        return Err(GeoCellError::General(format!(
            "geometry nesting exceeds {max_depth} levels"
        )));
    }

    buf.write_u32::<LittleEndian>(u8::from(geometry.geometry_type()).into())?;
    match geometry {
        Geometry::Point(g) => {
            // a point holds at most one vertex
            let vertices = g.vertices().slice(0, g.vertex_count().min(1));
            write_count(buf, vertices.len())?;
            buf.extend_from_slice(vertices.as_bytes());
        }
        Geometry::LineString(g) => {
            write_count(buf, g.vertex_count())?;
            buf.extend_from_slice(g.vertices().as_bytes());
        }
        Geometry::Polygon(g) => {
            write_count(buf, g.part_count())?;
            for ring in g.rings() {
                write_count(buf, ring.vertex_count())?;
                buf.extend_from_slice(ring.vertices().as_bytes());
            }
        }
        Geometry::MultiPoint(g) => write_elements(buf, g, depth, max_depth)?,
        Geometry::MultiLineString(g) => write_elements(buf, g, depth, max_depth)?,
        Geometry::MultiPolygon(g) => write_elements(buf, g, depth, max_depth)?,
        Geometry::GeometryCollection(g) => write_elements(buf, g, depth, max_depth)?,
    }
    Ok(())
}

fn write_elements<'a>(
    buf: &mut Vec<u8>,
    geom: &impl CollectionGeometry<'a>,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    write_count(buf, geom.part_count())?;
    for element in (0..geom.part_count()).filter_map(|i| geom.geometry(i)) {
        write_node(buf, &element, depth + 1, max_depth)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::datatypes::Dimension;
    use crate::geometry::{GeometryCollection, LineString, Point};
    use crate::io::blob::GeometryBlob;
    use crate::io::geo::geometry_from_geo;
    use crate::properties::GeometryProperties;
    use crate::test::{multipolygon, polygon};
    use crate::vertex::{VertexXY, VertexXYZ};

    #[test]
    fn point_layout() {
        let arena = Bump::new();
        let point: Geometry = Point::new(&arena, VertexXYZ::new(1.0, 2.0, 3.0)).into();
        let bytes = serialize(&point).unwrap();

        assert_eq!(bytes.len(), PREFIX_SIZE + NODE_HEADER_SIZE + 24);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], GeometryProperties::HAS_Z.bits());
        assert_eq!(&bytes[4..8], &0u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
        assert_eq!(&bytes[12..20], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[28..36], &3.0f64.to_le_bytes());
    }

    #[test]
    fn bbox_is_cached_for_non_points() {
        let arena = Bump::new();
        let geometry = geometry_from_geo(&geo::Geometry::Polygon(polygon::p0()), &arena);
        let bytes = serialize(&geometry).unwrap();
        let blob = GeometryBlob::try_new(&bytes).unwrap();
        assert!(blob.properties().has_bbox());
        assert_eq!(
            blob.bounding_box(),
            Some(BoundingBox::new(-111.0, 41.0, -104.0, 45.0))
        );

        let options = SerializeOptions {
            bounding_box: false,
            ..Default::default()
        };
        let without = serialize_with_options(&geometry, &options).unwrap();
        assert_eq!(without.len(), bytes.len() - BBOX_SIZE);
        assert!(GeometryBlob::try_new(&without).unwrap().bounding_box().is_none());
    }

    #[test]
    fn bbox_rounds_outward() {
        let arena = Bump::new();
        let line: Geometry = LineString::from_vertices(
            &arena,
            &[VertexXY::new(0.1, 0.2), VertexXY::new(0.3, 0.7)],
        )
        .into();
        let bytes = serialize(&line).unwrap();
        let bbox = GeometryBlob::try_new(&bytes)
            .unwrap()
            .bounding_box()
            .unwrap();
        assert!(bbox.minx <= 0.1 && bbox.miny <= 0.2);
        assert!(bbox.maxx >= 0.3 && bbox.maxy >= 0.7);
    }

    #[test]
    fn no_bbox_for_empty_geometry() {
        let geometry = Geometry::empty(GeometryProperties::default());
        let bytes = serialize(&geometry).unwrap();
        assert_eq!(bytes.len(), PREFIX_SIZE + NODE_HEADER_SIZE);
        assert!(!GeometryBlob::try_new(&bytes).unwrap().properties().has_bbox());
    }

    #[test]
    fn size_is_exact() {
        let arena = Bump::new();
        let geometry =
            geometry_from_geo(&geo::Geometry::MultiPolygon(multipolygon::mp1()), &arena);
        let options = SerializeOptions::default();
        assert_eq!(
            serialize_with_options(&geometry, &options).unwrap().len(),
            serialized_size(&geometry, &options)
        );
    }

    #[test]
    fn depth_limit() {
        let arena = Bump::new();
        let mut geometry: Geometry = Point::new(&arena, VertexXY::new(0.0, 0.0)).into();
        for _ in 0..3 {
            let mut collection = GeometryCollection::with_capacity_in(&arena, 1, Dimension::XY);
            collection.push_part(&arena, geometry);
            geometry = collection.into();
        }
        let options = SerializeOptions {
            max_depth: 2,
            ..Default::default()
        };
        assert!(serialize_with_options(&geometry, &options).is_err());
        assert!(serialize(&geometry).is_ok());
    }
}
