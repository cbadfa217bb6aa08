//! Well-known text rendering through [`std::fmt::Display`].
//!
//! ```
//! use bumpalo::Bump;
//! use geocell::geometry::Point;
//! use geocell::vertex::VertexXYZ;
//!
//! let arena = Bump::new();
//! let point = Point::new(&arena, VertexXYZ::new(1.0, 2.0, 3.5));
//! assert_eq!(point.to_string(), "POINT Z (1 2 3.5)");
//! ```

use std::fmt::{self, Display, Formatter};

use crate::datatypes::Dimension;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::trait_::{GeometryNode, SinglePartGeometry};
use crate::vertex::VertexArray;

fn write_tag<'a>(f: &mut Formatter<'_>, geom: &impl GeometryNode<'a>) -> fmt::Result {
    write!(f, "{}{} ", geom.geometry_type(), geom.dimension().wkt_tag())
}

fn write_coords(f: &mut Formatter<'_>, vertices: &VertexArray<'_>, i: usize) -> fmt::Result {
    let vertex = vertices.get_widened(i);
    write!(f, "{} {}", vertex.x, vertex.y)?;
    match vertices.dimension() {
        Dimension::XY => Ok(()),
        Dimension::XYZ => write!(f, " {}", vertex.z),
        Dimension::XYM => write!(f, " {}", vertex.m),
        Dimension::XYZM => write!(f, " {} {}", vertex.z, vertex.m),
    }
}

fn write_vertex_list(f: &mut Formatter<'_>, vertices: &VertexArray<'_>) -> fmt::Result {
    if vertices.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_str("(")?;
    for i in 0..vertices.len() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_coords(f, vertices, i)?;
    }
    f.write_str(")")
}

/// Writes `EMPTY` for no items, otherwise the comma separated items in parentheses.
fn write_list<T>(
    f: &mut Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(")")
}

fn write_polygon_body(f: &mut Formatter<'_>, polygon: &Polygon<'_>) -> fmt::Result {
    write_list(f, polygon.rings(), |f, ring| {
        write_vertex_list(f, ring.vertices())
    })
}

impl Display for Point<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_vertex_list(f, &self.vertices().slice(0, self.vertex_count().min(1)))
    }
}

impl Display for LineString<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_vertex_list(f, self.vertices())
    }
}

impl Display for Polygon<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_polygon_body(f, self)
    }
}

impl Display for MultiPoint<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_list(f, self.points(), |f, point| {
            if point.is_empty() {
                f.write_str("EMPTY")
            } else {
                write_coords(f, point.vertices(), 0)
            }
        })
    }
}

impl Display for MultiLineString<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_list(f, self.line_strings(), |f, line| {
            write_vertex_list(f, line.vertices())
        })
    }
}

impl Display for MultiPolygon<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_list(f, self.polygons(), write_polygon_body)
    }
}

impl Display for GeometryCollection<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self)?;
        write_list(f, self.geometries(), |f, geometry| write!(f, "{geometry}"))
    }
}

impl Display for Geometry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(g) => g.fmt(f),
            Geometry::LineString(g) => g.fmt(f),
            Geometry::Polygon(g) => g.fmt(f),
            Geometry::MultiPoint(g) => g.fmt(f),
            Geometry::MultiLineString(g) => g.fmt(f),
            Geometry::MultiPolygon(g) => g.fmt(f),
            Geometry::GeometryCollection(g) => g.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::io::geo::geometry_from_geo;
    use crate::properties::GeometryProperties;
    use crate::test::{geometrycollection, multipoint, polygon};
    use crate::trait_::MultiPartGeometry;
    use crate::vertex::{VertexXY, VertexXYM, VertexXYZM};

    #[test]
    fn point() {
        let arena = Bump::new();
        assert_eq!(
            Point::new(&arena, VertexXY::new(1.0, 2.0)).to_string(),
            "POINT (1 2)"
        );
        assert_eq!(
            Point::new(&arena, VertexXYM::new(1.0, 2.0, 9.0)).to_string(),
            "POINT M (1 2 9)"
        );
        assert_eq!(
            Point::empty(GeometryProperties::default()).to_string(),
            "POINT EMPTY"
        );
    }

    #[test]
    fn line_string_zm() {
        let arena = Bump::new();
        let line = LineString::from_vertices(
            &arena,
            &[
                VertexXYZM::new(0.0, 1.0, 2.0, 3.0),
                VertexXYZM::new(4.5, 5.0, 6.0, 7.0),
            ],
        );
        assert_eq!(line.to_string(), "LINESTRING ZM (0 1 2 3, 4.5 5 6 7)");
    }

    #[test]
    fn polygon_with_hole() {
        let arena = Bump::new();
        let geometry = geometry_from_geo(&geo::Geometry::Polygon(polygon::p1()), &arena);
        assert_eq!(
            geometry.to_string(),
            "POLYGON ((-111 45, -111 41, -104 41, -104 45, -111 45), \
             (-110 44, -110 42, -105 42, -105 44, -110 44))"
        );
    }

    #[test]
    fn multi_point_with_empty() {
        let arena = Bump::new();
        let mut multi = MultiPoint::with_capacity_in(&arena, 2, Dimension::XY);
        multi.push_part(&arena, Point::empty(GeometryProperties::default()));
        multi.push_part(&arena, Point::new(&arena, VertexXY::new(3.0, 4.0)));
        assert_eq!(multi.to_string(), "MULTIPOINT (EMPTY, 3 4)");

        let geometry = geometry_from_geo(&geo::Geometry::MultiPoint(multipoint::mp0()), &arena);
        assert_eq!(geometry.to_string(), "MULTIPOINT (0 1, 1 2)");
    }

    #[test]
    fn collection() {
        let arena = Bump::new();
        let geometry = geometry_from_geo(
            &geo::Geometry::GeometryCollection(geometrycollection::gc0()),
            &arena,
        );
        let text = geometry.to_string();
        assert!(text.starts_with("GEOMETRYCOLLECTION (POINT (0 1), LINESTRING (0 1, 1 2), POLYGON (("));
        assert_eq!(
            GeometryCollection::empty(GeometryProperties::new(true, false)).to_string(),
            "GEOMETRYCOLLECTION Z EMPTY"
        );
    }
}
