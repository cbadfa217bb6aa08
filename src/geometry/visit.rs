//! Static dispatch over the node kinds.

use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::trait_::{GeometryNode, MultiPartGeometry};

/// An operation defined per node kind.
///
/// Every per-kind method falls back to [`visit_any`](Self::visit_any), so an implementation
/// only overrides the kinds it treats specially. [`Geometry::visit`] picks the method.
pub trait GeometryVisitor<'a> {
    type Output;

    fn visit_any<G: GeometryNode<'a>>(&mut self, geometry: &G) -> Self::Output;

    fn visit_point(&mut self, point: &Point<'a>) -> Self::Output {
        self.visit_any(point)
    }

    fn visit_line_string(&mut self, line_string: &LineString<'a>) -> Self::Output {
        self.visit_any(line_string)
    }

    fn visit_polygon(&mut self, polygon: &Polygon<'a>) -> Self::Output {
        self.visit_any(polygon)
    }

    fn visit_multi_point(&mut self, multi_point: &MultiPoint<'a>) -> Self::Output {
        self.visit_any(multi_point)
    }

    fn visit_multi_line_string(
        &mut self,
        multi_line_string: &MultiLineString<'a>,
    ) -> Self::Output {
        self.visit_any(multi_line_string)
    }

    fn visit_multi_polygon(&mut self, multi_polygon: &MultiPolygon<'a>) -> Self::Output {
        self.visit_any(multi_polygon)
    }

    fn visit_geometry_collection(
        &mut self,
        geometry_collection: &GeometryCollection<'a>,
    ) -> Self::Output {
        self.visit_any(geometry_collection)
    }
}

impl<'a> Geometry<'a> {
    /// Call the visitor method matching this node's kind.
    pub fn visit<V: GeometryVisitor<'a>>(&self, visitor: &mut V) -> V::Output {
        match self {
            Geometry::Point(g) => visitor.visit_point(g),
            Geometry::LineString(g) => visitor.visit_line_string(g),
            Geometry::Polygon(g) => visitor.visit_polygon(g),
            Geometry::MultiPoint(g) => visitor.visit_multi_point(g),
            Geometry::MultiLineString(g) => visitor.visit_multi_line_string(g),
            Geometry::MultiPolygon(g) => visitor.visit_multi_polygon(g),
            Geometry::GeometryCollection(g) => visitor.visit_geometry_collection(g),
        }
    }
}

struct PointExtractor<F>(F);

impl<'a, F: FnMut(&Point<'a>)> GeometryVisitor<'a> for PointExtractor<F> {
    type Output = ();

    fn visit_any<G: GeometryNode<'a>>(&mut self, _: &G) {}

    fn visit_point(&mut self, point: &Point<'a>) {
        (self.0)(point)
    }

    fn visit_multi_point(&mut self, multi_point: &MultiPoint<'a>) {
        multi_point.parts().iter().for_each(&mut self.0)
    }

    fn visit_geometry_collection(&mut self, collection: &GeometryCollection<'a>) {
        for geometry in collection.parts() {
            geometry.visit(self);
        }
    }
}

struct LineExtractor<F>(F);

impl<'a, F: FnMut(&LineString<'a>)> GeometryVisitor<'a> for LineExtractor<F> {
    type Output = ();

    fn visit_any<G: GeometryNode<'a>>(&mut self, _: &G) {}

    fn visit_line_string(&mut self, line_string: &LineString<'a>) {
        (self.0)(line_string)
    }

    fn visit_multi_line_string(&mut self, multi_line_string: &MultiLineString<'a>) {
        multi_line_string.parts().iter().for_each(&mut self.0)
    }

    fn visit_geometry_collection(&mut self, collection: &GeometryCollection<'a>) {
        for geometry in collection.parts() {
            geometry.visit(self);
        }
    }
}

struct PolygonExtractor<F>(F);

impl<'a, F: FnMut(&Polygon<'a>)> GeometryVisitor<'a> for PolygonExtractor<F> {
    type Output = ();

    fn visit_any<G: GeometryNode<'a>>(&mut self, _: &G) {}

    fn visit_polygon(&mut self, polygon: &Polygon<'a>) {
        (self.0)(polygon)
    }

    fn visit_multi_polygon(&mut self, multi_polygon: &MultiPolygon<'a>) {
        multi_polygon.parts().iter().for_each(&mut self.0)
    }

    fn visit_geometry_collection(&mut self, collection: &GeometryCollection<'a>) {
        for geometry in collection.parts() {
            geometry.visit(self);
        }
    }
}

/// Call `f` on every Point, and every part of a MultiPoint, at any collection depth.
pub fn extract_points<'a, F: FnMut(&Point<'a>)>(geometry: &Geometry<'a>, f: F) {
    geometry.visit(&mut PointExtractor(f))
}

/// Call `f` on every LineString, and every part of a MultiLineString, at any collection
/// depth. Polygon rings are not visited.
pub fn extract_lines<'a, F: FnMut(&LineString<'a>)>(geometry: &Geometry<'a>, f: F) {
    geometry.visit(&mut LineExtractor(f))
}

/// Call `f` on every Polygon, and every part of a MultiPolygon, at any collection depth.
pub fn extract_polygons<'a, F: FnMut(&Polygon<'a>)>(geometry: &Geometry<'a>, f: F) {
    geometry.visit(&mut PolygonExtractor(f))
}
