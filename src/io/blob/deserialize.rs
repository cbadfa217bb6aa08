use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use byteorder::LittleEndian;
use tracing::{debug, trace};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoCellError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    PartArray, Point, Polygon,
};
use crate::io::blob::{content_hash, GeometryBlob, SerializeOptions, NODE_HEADER_SIZE};
use crate::io::cursor::ByteCursor;
use crate::trait_::GeometryNode;
use crate::vertex::VertexArray;

/// Deserialize a geometry with the default [`SerializeOptions`].
///
/// Vertex data is borrowed from `bytes`, so every node of the result is read-only. Part
/// arrays are allocated from `arena`.
pub fn deserialize<'a>(bytes: &'a [u8], arena: &'a Bump) -> Result<Geometry<'a>> {
    deserialize_with_options(bytes, arena, &SerializeOptions::default())
}

/// Deserialize a geometry, rejecting trees nested deeper than `options.max_depth`.
pub fn deserialize_with_options<'a>(
    bytes: &'a [u8],
    arena: &'a Bump,
    options: &SerializeOptions,
) -> Result<Geometry<'a>> {
    let result = decode(bytes, arena, options);
    if let Err(error) = &result {
        debug!(%error, len = bytes.len(), "failed to deserialize geometry");
    }
    result
}

fn decode<'a>(bytes: &'a [u8], arena: &'a Bump, options: &SerializeOptions) -> Result<Geometry<'a>> {
    let blob = GeometryBlob::try_new(bytes)?;
    let actual = content_hash(blob.hashed());
    if actual != blob.hash() {
        return Err(GeoCellError::InvalidBlob(
            format!(
                "content hash {actual:#06x} does not match stored hash {:#06x}",
                blob.hash()
            )
            .into(),
        ));
    }

    let decoder = NodeDecoder {
        arena,
        dim: blob.dimension(),
        max_depth: options.max_depth,
    };
    let mut cursor = ByteCursor::new(blob.payload());
    let geometry = decoder.read_node(&mut cursor, 0)?;

    if geometry.geometry_type() != blob.geometry_type() {
        return Err(GeoCellError::InvalidBlob(
            format!(
                "prefix declares {} but the payload holds {}",
                blob.geometry_type(),
                geometry.geometry_type()
            )
            .into(),
        ));
    }
    if cursor.remaining() != 0 {
        return Err(GeoCellError::InvalidBlob(
            format!("{} trailing bytes after the geometry", cursor.remaining()).into(),
        ));
    }

    trace!(
        geometry_type = %geometry.geometry_type(),
        dimension = %blob.dimension(),
        bytes = bytes.len(),
        "deserialized geometry"
    );
    Ok(geometry)
}

/// Every node of a serialized tree shares the layout stored in the prefix.
struct NodeDecoder<'a> {
    arena: &'a Bump,
    dim: Dimension,
    max_depth: usize,
}

impl<'a> NodeDecoder<'a> {
    fn read_node(&self, cursor: &mut ByteCursor<'a>, depth: usize) -> Result<Geometry<'a>> {
        if depth > self.max_depth {
            return Err(GeoCellError::decode(
                cursor.position(),
                format!("geometry nesting exceeds {} levels", self.max_depth),
            ));
        }

        let position = cursor.position();
        let code = cursor.read_u32::<LittleEndian>()?;
        let geometry_type = u8::try_from(code)
            .ok()
            .and_then(|code| GeometryType::try_from(code).ok())
            .ok_or_else(|| GeoCellError::decode(position, format!("unknown node kind {code}")))?;
        let count = cursor.read_u32::<LittleEndian>()? as usize;

        let geometry = match geometry_type {
            GeometryType::Point => {
                if count > 1 {
                    return Err(GeoCellError::decode(
                        position,
                        format!("point holds {count} vertices"),
                    ));
                }
                Geometry::Point(Point::from_vertices(self.read_vertices(cursor, count)?))
            }
            GeometryType::LineString => Geometry::LineString(LineString::from_vertex_array(
                self.read_vertices(cursor, count)?,
            )),
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon(cursor, count)?),
            GeometryType::MultiPoint => Geometry::MultiPoint(MultiPoint::from_part_array(
                self.read_parts(cursor, count, depth, geometry_type, Geometry::into_point)?,
            )),
            GeometryType::MultiLineString => {
                Geometry::MultiLineString(MultiLineString::from_part_array(self.read_parts(
                    cursor,
                    count,
                    depth,
                    geometry_type,
                    Geometry::into_line_string,
                )?))
            }
            GeometryType::MultiPolygon => Geometry::MultiPolygon(MultiPolygon::from_part_array(
                self.read_parts(cursor, count, depth, geometry_type, Geometry::into_polygon)?,
            )),
            GeometryType::GeometryCollection => Geometry::GeometryCollection(
                GeometryCollection::from_part_array(
                    self.read_parts(cursor, count, depth, geometry_type, Ok)?,
                ),
            ),
        };
        Ok(geometry)
    }

    fn read_vertices(&self, cursor: &mut ByteCursor<'a>, count: usize) -> Result<VertexArray<'a>> {
        let vertex_size = self.dim.vertex_size();
        cursor.ensure_count(count, vertex_size, "vertex")?;
        let bytes = cursor.read_slice(count * vertex_size)?;
        Ok(VertexArray::reference(bytes, count, self.dim))
    }

    fn read_polygon(&self, cursor: &mut ByteCursor<'a>, count: usize) -> Result<Polygon<'a>> {
        cursor.ensure_count(count, 4, "ring")?;
        let mut rings = BumpVec::with_capacity_in(count, self.arena);
        for _ in 0..count {
            let vertex_count = cursor.read_u32::<LittleEndian>()? as usize;
            rings.push(LineString::from_vertex_array(
                self.read_vertices(cursor, vertex_count)?,
            ));
        }
        Ok(Polygon::from_part_array(PartArray::from_vec(
            rings,
            self.dim.into(),
        )))
    }

    fn read_parts<T>(
        &self,
        cursor: &mut ByteCursor<'a>,
        count: usize,
        depth: usize,
        container: GeometryType,
        convert: impl Fn(Geometry<'a>) -> std::result::Result<T, Geometry<'a>>,
    ) -> Result<PartArray<'a, T>> {
        cursor.ensure_count(count, NODE_HEADER_SIZE, "element")?;
        let mut parts = BumpVec::with_capacity_in(count, self.arena);
        for _ in 0..count {
            let position = cursor.position();
            let child = self.read_node(cursor, depth + 1)?;
            let part = convert(child).map_err(|child| {
                GeoCellError::decode(
                    position,
                    format!("{} is not allowed inside {container}", child.geometry_type()),
                )
            })?;
            parts.push(part);
        }
        Ok(PartArray::from_vec(parts, self.dim.into()))
    }
}
