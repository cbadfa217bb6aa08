//! Decode ISO WKB into an arena-backed [`Geometry`] tree.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::{debug, trace};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoCellError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    PartArray, Point, Polygon,
};
use crate::io::cursor::ByteCursor;
use crate::io::wkb::common::{Endianness, WKBType};
use crate::trait_::GeometryNode;
use crate::vertex::{VertexArray, VertexXYZM};

/// Byte order tag plus type code.
const HEADER_SIZE: usize = 1 + 4;

/// Options for [`WkbReader`].
#[derive(Debug, Clone, Copy)]
pub struct WkbReaderOptions {
    /// How deeply collections may nest before the input is rejected.
    pub max_depth: usize,
}

impl Default for WkbReaderOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Decodes WKB into geometries allocated from one arena.
///
/// Every geometry, nested ones included, carries its own byte order tag. Point, LineString,
/// Polygon, the three multi kinds and GeometryCollection are supported in XY, Z, M and ZM
/// ISO variants. EWKB flag bits are rejected as unknown type codes.
///
/// ```
/// use bumpalo::Bump;
/// use geocell::io::wkb::WkbReader;
/// use geocell::trait_::{GeometryNode, SinglePartGeometry};
///
/// // POINT (1 2), little-endian
/// let mut wkb = vec![1u8, 1, 0, 0, 0];
/// wkb.extend_from_slice(&1f64.to_le_bytes());
/// wkb.extend_from_slice(&2f64.to_le_bytes());
///
/// let arena = Bump::new();
/// let geometry = WkbReader::new(&arena).read_geometry(&wkb).unwrap();
/// let point = geometry.as_point().unwrap();
/// assert_eq!(point.vertex_count(), 1);
/// assert_eq!(point.vertex(0).y, 2.0);
/// ```
pub struct WkbReader<'a> {
    arena: &'a Bump,
    options: WkbReaderOptions,
}

impl<'a> WkbReader<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self::with_options(arena, Default::default())
    }

    pub fn with_options(arena: &'a Bump, options: WkbReaderOptions) -> Self {
        Self { arena, options }
    }

    /// Decode one geometry from the start of `buf`.
    pub fn read_geometry(&self, buf: &[u8]) -> Result<Geometry<'a>> {
        let mut cursor = ByteCursor::new(buf);
        let result = self.read_any(&mut cursor, None, 0);
        match &result {
            Ok(geometry) => trace!(
                geometry_type = %geometry.geometry_type(),
                bytes = cursor.position(),
                "decoded WKB geometry"
            ),
            Err(error) => debug!(%error, len = buf.len(), "failed to decode WKB"),
        }
        result
    }

    fn read_header(&self, cursor: &mut ByteCursor<'_>) -> Result<(Endianness, WKBType)> {
        let position = cursor.position();
        let tag = cursor.read_u8()?;
        let endianness = Endianness::try_from(tag)
            .map_err(|_| GeoCellError::decode(position, format!("unknown byte order {tag}")))?;

        let position = cursor.position();
        let code = match endianness {
            Endianness::BigEndian => cursor.read_u32::<BigEndian>()?,
            Endianness::LittleEndian => cursor.read_u32::<LittleEndian>()?,
        };
        let wkb_type = WKBType::try_from(code).map_err(|_| {
            GeoCellError::decode(position, format!("unsupported geometry type code {code}"))
        })?;

        trace!(position, ?endianness, ?wkb_type, "read WKB header");
        Ok((endianness, wkb_type))
    }

    fn read_any(
        &self,
        cursor: &mut ByteCursor<'_>,
        parent_dim: Option<Dimension>,
        depth: usize,
    ) -> Result<Geometry<'a>> {
        if depth > self.options.max_depth {
            return Err(GeoCellError::decode(
                cursor.position(),
                format!("geometry nesting exceeds {} levels", self.options.max_depth),
            ));
        }

        let position = cursor.position();
        let (endianness, wkb_type) = self.read_header(cursor)?;
        let dim = wkb_type.dimension();
        if let Some(parent_dim) = parent_dim {
            if dim != parent_dim {
                return Err(GeoCellError::decode(
                    position,
                    format!("{dim} geometry nested inside a {parent_dim} geometry"),
                ));
            }
        }

        match endianness {
            Endianness::BigEndian => self.read_body::<BigEndian>(cursor, wkb_type, depth),
            Endianness::LittleEndian => self.read_body::<LittleEndian>(cursor, wkb_type, depth),
        }
    }

    fn read_body<B: ByteOrder>(
        &self,
        cursor: &mut ByteCursor<'_>,
        wkb_type: WKBType,
        depth: usize,
    ) -> Result<Geometry<'a>> {
        let dim = wkb_type.dimension();
        let geometry = match wkb_type.geometry_type() {
            GeometryType::Point => Geometry::Point(self.read_point::<B>(cursor, dim)?),
            GeometryType::LineString => Geometry::LineString(LineString::from_vertex_array(
                self.read_vertices::<B>(cursor, dim)?,
            )),
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon::<B>(cursor, dim)?),
            GeometryType::MultiPoint => {
                let parts = self.read_parts::<B, _>(
                    cursor,
                    dim,
                    depth,
                    GeometryType::MultiPoint,
                    Geometry::into_point,
                )?;
                Geometry::MultiPoint(MultiPoint::from_part_array(parts))
            }
            GeometryType::MultiLineString => {
                let parts = self.read_parts::<B, _>(
                    cursor,
                    dim,
                    depth,
                    GeometryType::MultiLineString,
                    Geometry::into_line_string,
                )?;
                Geometry::MultiLineString(MultiLineString::from_part_array(parts))
            }
            GeometryType::MultiPolygon => {
                let parts = self.read_parts::<B, _>(
                    cursor,
                    dim,
                    depth,
                    GeometryType::MultiPolygon,
                    Geometry::into_polygon,
                )?;
                Geometry::MultiPolygon(MultiPolygon::from_part_array(parts))
            }
            GeometryType::GeometryCollection => {
                let parts = self.read_parts::<B, _>(
                    cursor,
                    dim,
                    depth,
                    GeometryType::GeometryCollection,
                    Ok,
                )?;
                Geometry::GeometryCollection(GeometryCollection::from_part_array(parts))
            }
        };
        Ok(geometry)
    }

    fn read_point<B: ByteOrder>(
        &self,
        cursor: &mut ByteCursor<'_>,
        dim: Dimension,
    ) -> Result<Point<'a>> {
        let vertex = read_vertex::<B>(cursor, dim)?;
        // NaN coordinates are how WKB spells an empty point.
        if vertex.x.is_nan() && vertex.y.is_nan() {
            return Ok(Point::empty(dim.into()));
        }
        let mut vertices = VertexArray::with_capacity_in(self.arena, 1, dim);
        vertices.push_widened(self.arena, vertex);
        Ok(Point::from_vertices(vertices))
    }

    fn read_vertices<B: ByteOrder>(
        &self,
        cursor: &mut ByteCursor<'_>,
        dim: Dimension,
    ) -> Result<VertexArray<'a>> {
        let count = cursor.read_u32::<B>()? as usize;
        cursor.ensure_count(count, dim.vertex_size(), "vertex")?;
        let mut vertices = VertexArray::with_capacity_in(self.arena, count, dim);
        for _ in 0..count {
            vertices.push_widened(self.arena, read_vertex::<B>(cursor, dim)?);
        }
        Ok(vertices)
    }

    fn read_polygon<B: ByteOrder>(
        &self,
        cursor: &mut ByteCursor<'_>,
        dim: Dimension,
    ) -> Result<Polygon<'a>> {
        let count = cursor.read_u32::<B>()? as usize;
        // every ring carries at least its own vertex count
        cursor.ensure_count(count, 4, "ring")?;
        let mut rings = BumpVec::with_capacity_in(count, self.arena);
        for _ in 0..count {
            rings.push(LineString::from_vertex_array(
                self.read_vertices::<B>(cursor, dim)?,
            ));
        }
        Ok(Polygon::from_part_array(PartArray::from_vec(
            rings,
            dim.into(),
        )))
    }

    fn read_parts<B: ByteOrder, T>(
        &self,
        cursor: &mut ByteCursor<'_>,
        dim: Dimension,
        depth: usize,
        container: GeometryType,
        convert: impl Fn(Geometry<'a>) -> std::result::Result<T, Geometry<'a>>,
    ) -> Result<PartArray<'a, T>> {
        let count = cursor.read_u32::<B>()? as usize;
        cursor.ensure_count(count, HEADER_SIZE, "element")?;
        let mut parts = BumpVec::with_capacity_in(count, self.arena);
        for _ in 0..count {
            let position = cursor.position();
            let child = self.read_any(cursor, Some(dim), depth + 1)?;
            let part = convert(child).map_err(|child| {
                GeoCellError::decode(
                    position,
                    format!("{} is not allowed inside {container}", child.geometry_type()),
                )
            })?;
            parts.push(part);
        }
        Ok(PartArray::from_vec(parts, dim.into()))
    }
}

fn read_vertex<B: ByteOrder>(cursor: &mut ByteCursor<'_>, dim: Dimension) -> Result<VertexXYZM> {
    cursor.ensure(dim.vertex_size(), "vertex")?;
    let x = cursor.read_f64::<B>()?;
    let y = cursor.read_f64::<B>()?;
    let z = if dim.has_z() {
        cursor.read_f64::<B>()?
    } else {
        f64::NAN
    };
    let m = if dim.has_m() {
        cursor.read_f64::<B>()?
    } else {
        f64::NAN
    };
    Ok(VertexXYZM::new(x, y, z, m))
}
