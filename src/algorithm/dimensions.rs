use crate::geometry::{
    Geometry, GeometryCollection, GeometryVisitor, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::trait_::GeometryNode;

/// The topological dimension of a geometry: 0 for points, 1 for lines, 2 for polygons.
///
/// A GeometryCollection has the largest dimension among its members, and 0 when it has none.
/// Emptiness does not change the dimension of the other kinds.
pub trait TopologicalDimension {
    fn topological_dimension(&self) -> u8;
}

struct DimensionVisitor;

impl<'a> GeometryVisitor<'a> for DimensionVisitor {
    type Output = u8;

    fn visit_any<G: GeometryNode<'a>>(&mut self, _: &G) -> u8 {
        0
    }

    fn visit_line_string(&mut self, _: &LineString<'a>) -> u8 {
        1
    }

    fn visit_multi_line_string(&mut self, _: &MultiLineString<'a>) -> u8 {
        1
    }

    fn visit_polygon(&mut self, _: &Polygon<'a>) -> u8 {
        2
    }

    fn visit_multi_polygon(&mut self, _: &MultiPolygon<'a>) -> u8 {
        2
    }

    fn visit_geometry_collection(&mut self, collection: &GeometryCollection<'a>) -> u8 {
        collection
            .geometries()
            .iter()
            .map(|geometry| geometry.visit(self))
            .max()
            .unwrap_or(0)
    }
}

impl TopologicalDimension for Geometry<'_> {
    fn topological_dimension(&self) -> u8 {
        self.visit(&mut DimensionVisitor)
    }
}

macro_rules! impl_fixed {
    ($type:ident, $dim:expr) => {
        impl TopologicalDimension for $type<'_> {
            fn topological_dimension(&self) -> u8 {
                $dim
            }
        }
    };
}

impl_fixed!(Point, 0);
impl_fixed!(MultiPoint, 0);
impl_fixed!(LineString, 1);
impl_fixed!(MultiLineString, 1);
impl_fixed!(Polygon, 2);
impl_fixed!(MultiPolygon, 2);

impl TopologicalDimension for GeometryCollection<'_> {
    fn topological_dimension(&self) -> u8 {
        self.geometries()
            .iter()
            .map(TopologicalDimension::topological_dimension)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::datatypes::Dimension;
    use crate::io::geo::geometry_from_geo;
    use crate::properties::GeometryProperties;
    use crate::test::{geometrycollection, multipoint, point};
    use crate::trait_::MultiPartGeometry;

    #[test]
    fn per_kind() {
        let arena = Bump::new();
        let point = geometry_from_geo(&geo::Geometry::Point(point::p2()), &arena);
        assert_eq!(point.topological_dimension(), 0);
        let multi = geometry_from_geo(&geo::Geometry::MultiPoint(multipoint::mp1()), &arena);
        assert_eq!(multi.topological_dimension(), 0);
        assert_eq!(
            Polygon::empty(GeometryProperties::default()).topological_dimension(),
            2
        );
    }

    #[test]
    fn collection_takes_max() {
        let arena = Bump::new();
        let collection = geometry_from_geo(
            &geo::Geometry::GeometryCollection(geometrycollection::gc0()),
            &arena,
        );
        assert_eq!(collection.topological_dimension(), 2);
        assert_eq!(
            collection
                .as_geometry_collection()
                .unwrap()
                .topological_dimension(),
            2
        );

        let mut nested = GeometryCollection::with_capacity_in(&arena, 1, Dimension::XY);
        nested.push_part(
            &arena,
            geometry_from_geo(&geo::Geometry::MultiPoint(multipoint::mp0()), &arena),
        );
        let nested: Geometry = nested.into();
        assert_eq!(nested.topological_dimension(), 0);
        assert_eq!(
            GeometryCollection::empty(GeometryProperties::default()).topological_dimension(),
            0
        );
    }
}
