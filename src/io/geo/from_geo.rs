use bumpalo::Bump;

use crate::datatypes::Dimension;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::trait_::MultiPartGeometry;
use crate::vertex::{VertexArray, VertexXY};

fn vertices_from_geo<'a>(line_string: &geo::LineString, arena: &'a Bump) -> VertexArray<'a> {
    let mut vertices = VertexArray::with_capacity_in(arena, line_string.0.len(), Dimension::XY);
    for coord in line_string.coords() {
        vertices.push(arena, VertexXY::new(coord.x, coord.y));
    }
    vertices
}

/// Build an XY [`Point`] from a [`geo::Point`].
pub fn point_from_geo<'a>(point: &geo::Point, arena: &'a Bump) -> Point<'a> {
    Point::new(arena, VertexXY::new(point.x(), point.y()))
}

pub fn line_string_from_geo<'a>(line_string: &geo::LineString, arena: &'a Bump) -> LineString<'a> {
    LineString::from_vertex_array(vertices_from_geo(line_string, arena))
}

/// The exterior becomes the shell, followed by the interiors in order.
pub fn polygon_from_geo<'a>(polygon: &geo::Polygon, arena: &'a Bump) -> Polygon<'a> {
    let mut output =
        Polygon::with_capacity_in(arena, 1 + polygon.interiors().len(), Dimension::XY);
    output.push_part(arena, line_string_from_geo(polygon.exterior(), arena));
    for interior in polygon.interiors() {
        output.push_part(arena, line_string_from_geo(interior, arena));
    }
    output
}

pub fn multi_point_from_geo<'a>(multi_point: &geo::MultiPoint, arena: &'a Bump) -> MultiPoint<'a> {
    let mut output = MultiPoint::with_capacity_in(arena, multi_point.0.len(), Dimension::XY);
    for point in multi_point.iter() {
        output.push_part(arena, point_from_geo(point, arena));
    }
    output
}

pub fn multi_line_string_from_geo<'a>(
    multi_line_string: &geo::MultiLineString,
    arena: &'a Bump,
) -> MultiLineString<'a> {
    let mut output =
        MultiLineString::with_capacity_in(arena, multi_line_string.0.len(), Dimension::XY);
    for line_string in multi_line_string.iter() {
        output.push_part(arena, line_string_from_geo(line_string, arena));
    }
    output
}

pub fn multi_polygon_from_geo<'a>(
    multi_polygon: &geo::MultiPolygon,
    arena: &'a Bump,
) -> MultiPolygon<'a> {
    let mut output = MultiPolygon::with_capacity_in(arena, multi_polygon.0.len(), Dimension::XY);
    for polygon in multi_polygon.iter() {
        output.push_part(arena, polygon_from_geo(polygon, arena));
    }
    output
}

pub fn geometry_collection_from_geo<'a>(
    geometry_collection: &geo::GeometryCollection,
    arena: &'a Bump,
) -> GeometryCollection<'a> {
    let mut output =
        GeometryCollection::with_capacity_in(arena, geometry_collection.0.len(), Dimension::XY);
    for geometry in geometry_collection.iter() {
        output.push_part(arena, geometry_from_geo(geometry, arena));
    }
    output
}

/// Build a [`Geometry`] from any [`geo::Geometry`].
///
/// `Line` becomes a two-vertex LineString; `Rect` and `Triangle` become Polygons.
pub fn geometry_from_geo<'a>(geometry: &geo::Geometry, arena: &'a Bump) -> Geometry<'a> {
    match geometry {
        geo::Geometry::Point(g) => point_from_geo(g, arena).into(),
        geo::Geometry::Line(g) => {
            line_string_from_geo(&geo::LineString::new(vec![g.start, g.end]), arena).into()
        }
        geo::Geometry::LineString(g) => line_string_from_geo(g, arena).into(),
        geo::Geometry::Polygon(g) => polygon_from_geo(g, arena).into(),
        geo::Geometry::MultiPoint(g) => multi_point_from_geo(g, arena).into(),
        geo::Geometry::MultiLineString(g) => multi_line_string_from_geo(g, arena).into(),
        geo::Geometry::MultiPolygon(g) => multi_polygon_from_geo(g, arena).into(),
        geo::Geometry::GeometryCollection(g) => geometry_collection_from_geo(g, arena).into(),
        geo::Geometry::Rect(g) => polygon_from_geo(&g.to_polygon(), arena).into(),
        geo::Geometry::Triangle(g) => polygon_from_geo(&g.to_polygon(), arena).into(),
    }
}
