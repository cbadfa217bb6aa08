//! Arena-backed geometry nodes.
//!
//! [`Geometry`] is a closed sum over the seven node kinds. Point and LineString hold a
//! [`VertexArray`](crate::vertex::VertexArray); Polygon and the collection kinds hold a
//! [`PartArray`] of nested nodes. Every buffer is either a read-only borrow or an owned
//! allocation from a [`bumpalo::Bump`], see [`GeometryNode`].

use bumpalo::Bump;
use enum_as_inner::EnumAsInner;

use crate::datatypes::GeometryType;
use crate::properties::GeometryProperties;
use crate::trait_::{GeometryNode, SinglePartGeometry};

macro_rules! impl_single_part {
    ($type:ident, $geometry_type:expr) => {
        impl<'a> $crate::trait_::GeometryNode<'a> for $type<'a> {
            fn geometry_type(&self) -> $crate::datatypes::GeometryType {
                $geometry_type
            }

            fn properties(&self) -> $crate::properties::GeometryProperties {
                self.vertices.properties()
            }

            fn is_empty(&self) -> bool {
                self.vertices.is_empty()
            }

            fn is_read_only(&self) -> bool {
                !self.vertices.is_owning()
            }

            fn vertex_count(&self) -> usize {
                self.vertices.len()
            }

            fn empty(properties: $crate::properties::GeometryProperties) -> Self {
                Self {
                    vertices: $crate::vertex::VertexArray::empty(properties.dimension()),
                }
            }

            fn view(&'a self) -> Self {
                Self {
                    vertices: self.vertices.view(),
                }
            }

            fn make_mutable(&mut self, arena: &'a bumpalo::Bump) {
                self.vertices.make_owning(arena);
            }

            fn set_vertex_type(
                &mut self,
                arena: &'a bumpalo::Bump,
                has_z: bool,
                has_m: bool,
                default_z: f64,
                default_m: f64,
            ) {
                self.vertices
                    .update_vertex_type(arena, has_z, has_m, default_z, default_m);
            }

            fn reverse(&mut self, arena: &'a bumpalo::Bump) {
                self.vertices.reverse(arena);
            }

            fn bounding_box(&self) -> Option<$crate::geometry::BoundingBox> {
                $crate::geometry::BoundingBox::from_vertices(&self.vertices)
            }
        }

        impl<'a> $crate::trait_::SinglePartGeometry<'a> for $type<'a> {
            fn vertices(&self) -> &$crate::vertex::VertexArray<'a> {
                &self.vertices
            }

            fn vertices_mut(&mut self) -> &mut $crate::vertex::VertexArray<'a> {
                &mut self.vertices
            }
        }
    };
}

macro_rules! impl_multi_part {
    ($type:ident, $part:ty, $geometry_type:expr) => {
        impl<'a> $crate::trait_::GeometryNode<'a> for $type<'a> {
            fn geometry_type(&self) -> $crate::datatypes::GeometryType {
                $geometry_type
            }

            fn properties(&self) -> $crate::properties::GeometryProperties {
                self.parts.properties()
            }

            fn is_empty(&self) -> bool {
                self.parts.all_empty()
            }

            fn is_read_only(&self) -> bool {
                !self.parts.is_owning()
            }

            fn vertex_count(&self) -> usize {
                self.parts.vertex_count()
            }

            fn empty(properties: $crate::properties::GeometryProperties) -> Self {
                Self {
                    parts: $crate::geometry::PartArray::empty(properties),
                }
            }

            fn view(&'a self) -> Self {
                Self {
                    parts: self.parts.view(),
                }
            }

            fn make_mutable(&mut self, arena: &'a bumpalo::Bump) {
                self.parts.make_owning(arena);
            }

            fn set_vertex_type(
                &mut self,
                arena: &'a bumpalo::Bump,
                has_z: bool,
                has_m: bool,
                default_z: f64,
                default_m: f64,
            ) {
                self.parts
                    .set_vertex_type(arena, has_z, has_m, default_z, default_m);
            }

            fn reverse(&mut self, arena: &'a bumpalo::Bump) {
                self.parts.reverse(arena);
            }

            fn bounding_box(&self) -> Option<$crate::geometry::BoundingBox> {
                self.parts.bounding_box()
            }
        }

        impl<'a> $crate::trait_::MultiPartGeometry<'a> for $type<'a> {
            type Part = $part;

            fn part_array(&self) -> &$crate::geometry::PartArray<'a, $part> {
                &self.parts
            }

            fn part_array_mut(&mut self) -> &mut $crate::geometry::PartArray<'a, $part> {
                &mut self.parts
            }
        }

        impl<'a> $type<'a> {
            /// A node with `count` empty parts of the given layout, to be filled in place.
            pub fn new_in(
                arena: &'a bumpalo::Bump,
                count: usize,
                dim: $crate::datatypes::Dimension,
            ) -> Self {
                Self {
                    parts: $crate::geometry::PartArray::new_in(arena, count, dim.into()),
                }
            }

            /// An owned node with no parts and room for `capacity` of them.
            pub fn with_capacity_in(
                arena: &'a bumpalo::Bump,
                capacity: usize,
                dim: $crate::datatypes::Dimension,
            ) -> Self {
                Self {
                    parts: $crate::geometry::PartArray::with_capacity_in(
                        arena,
                        capacity,
                        dim.into(),
                    ),
                }
            }

            pub(crate) fn from_part_array(parts: $crate::geometry::PartArray<'a, $part>) -> Self {
                Self { parts }
            }
        }
    };
}

mod bounds;
mod geometrycollection;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod parts;
mod point;
mod polygon;
mod visit;

pub use bounds::BoundingBox;
pub use geometrycollection::GeometryCollection;
pub use linestring::LineString;
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use parts::PartArray;
pub use point::Point;
pub use polygon::Polygon;
pub use visit::{extract_lines, extract_points, extract_polygons, GeometryVisitor};

/// A geometry node of any kind.
#[derive(Debug, PartialEq, EnumAsInner)]
pub enum Geometry<'a> {
    Point(Point<'a>),
    LineString(LineString<'a>),
    Polygon(Polygon<'a>),
    MultiPoint(MultiPoint<'a>),
    MultiLineString(MultiLineString<'a>),
    MultiPolygon(MultiPolygon<'a>),
    GeometryCollection(GeometryCollection<'a>),
}

macro_rules! dispatch {
    ($value:expr, $geom:ident => $body:expr) => {
        match $value {
            Geometry::Point($geom) => $body,
            Geometry::LineString($geom) => $body,
            Geometry::Polygon($geom) => $body,
            Geometry::MultiPoint($geom) => $body,
            Geometry::MultiLineString($geom) => $body,
            Geometry::MultiPolygon($geom) => $body,
            Geometry::GeometryCollection($geom) => $body,
        }
    };
}

macro_rules! rewrap {
    ($value:expr, $geom:ident => $body:expr) => {
        match $value {
            Geometry::Point($geom) => Geometry::Point($body),
            Geometry::LineString($geom) => Geometry::LineString($body),
            Geometry::Polygon($geom) => Geometry::Polygon($body),
            Geometry::MultiPoint($geom) => Geometry::MultiPoint($body),
            Geometry::MultiLineString($geom) => Geometry::MultiLineString($body),
            Geometry::MultiPolygon($geom) => Geometry::MultiPolygon($body),
            Geometry::GeometryCollection($geom) => Geometry::GeometryCollection($body),
        }
    };
}

impl<'a> Geometry<'a> {
    /// True for MultiPoint, MultiLineString, MultiPolygon and GeometryCollection.
    pub fn is_collection(&self) -> bool {
        self.geometry_type().is_collection()
    }

    /// True when the geometry holds at least one line string, at any collection depth, and
    /// every one of them is closed. Polygon rings are not considered.
    pub fn is_closed(&self) -> bool {
        let mut lines = 0;
        let mut closed = 0;
        extract_lines(self, |line| {
            lines += 1;
            if line.is_closed() {
                closed += 1;
            }
        });
        lines > 0 && lines == closed
    }
}

impl<'a> GeometryNode<'a> for Geometry<'a> {
    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, g => g.geometry_type())
    }

    fn properties(&self) -> GeometryProperties {
        dispatch!(self, g => g.properties())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, g => g.is_empty())
    }

    fn is_read_only(&self) -> bool {
        dispatch!(self, g => g.is_read_only())
    }

    fn vertex_count(&self) -> usize {
        dispatch!(self, g => g.vertex_count())
    }

    /// Without a kind to go by, the empty geometry is an empty GeometryCollection.
    fn empty(properties: GeometryProperties) -> Self {
        Geometry::GeometryCollection(GeometryCollection::empty(properties))
    }

    fn view(&'a self) -> Self {
        rewrap!(self, g => g.view())
    }

    fn take(&mut self) -> Self {
        rewrap!(self, g => g.take())
    }

    fn make_mutable(&mut self, arena: &'a Bump) {
        dispatch!(self, g => g.make_mutable(arena))
    }

    fn set_vertex_type(
        &mut self,
        arena: &'a Bump,
        has_z: bool,
        has_m: bool,
        default_z: f64,
        default_m: f64,
    ) {
        dispatch!(self, g => g.set_vertex_type(arena, has_z, has_m, default_z, default_m))
    }

    fn reverse(&mut self, arena: &'a Bump) {
        dispatch!(self, g => g.reverse(arena))
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        dispatch!(self, g => g.bounding_box())
    }
}

macro_rules! impl_from_node {
    ($type:ident) => {
        impl<'a> From<$type<'a>> for Geometry<'a> {
            fn from(value: $type<'a>) -> Self {
                Geometry::$type(value)
            }
        }
    };
}

impl_from_node!(Point);
impl_from_node!(LineString);
impl_from_node!(Polygon);
impl_from_node!(MultiPoint);
impl_from_node!(MultiLineString);
impl_from_node!(MultiPolygon);
impl_from_node!(GeometryCollection);

#[cfg(test)]
mod test {
    use super::*;
    use crate::datatypes::Dimension;
    use crate::trait_::MultiPartGeometry;
    use crate::vertex::{VertexXY, VertexXYZ};

    #[test]
    fn take_keeps_kind_and_layout() {
        let arena = Bump::new();
        let mut geometry: Geometry =
            Point::new(&arena, VertexXYZ::new(1.0, 2.0, 3.0)).into();
        let taken = geometry.take();

        assert_eq!(taken.vertex_count(), 1);
        assert!(!taken.is_read_only());
        assert_eq!(geometry.geometry_type(), GeometryType::Point);
        assert_eq!(geometry.dimension(), Dimension::XYZ);
        assert!(geometry.is_empty());
        assert!(geometry.is_read_only());
    }

    #[test]
    fn view_is_read_only_and_equal() {
        let arena = Bump::new();
        let geometry: Geometry = LineString::from_vertices(
            &arena,
            &[VertexXY::new(0.0, 0.0), VertexXY::new(1.0, 1.0)],
        )
        .into();
        let view = geometry.view();
        assert!(view.is_read_only());
        assert!(!geometry.is_read_only());
        assert_eq!(view, geometry);
    }

    #[test]
    fn mutating_a_copy_leaves_the_original() {
        let arena = Bump::new();
        let original = LineString::from_vertices(
            &arena,
            &[VertexXY::new(0.0, 0.0), VertexXY::new(1.0, 1.0)],
        );
        let mut copy = original.view();
        copy.make_mutable(&arena);
        copy.set_vertex(0, VertexXY::new(5.0, 5.0));
        copy.append(&arena, &original);

        assert_eq!(original.vertex(0), VertexXY::new(0.0, 0.0));
        assert_eq!(original.vertex_count(), 2);
        assert_eq!(copy.vertex(0), VertexXY::new(5.0, 5.0));
        assert_eq!(copy.vertex_count(), 4);
    }

    #[test]
    fn empty_geometry_is_collection() {
        let geometry = Geometry::empty(GeometryProperties::default());
        assert!(geometry.is_collection());
        assert!(geometry.is_empty());
        assert!(geometry.as_geometry_collection().is_some());
    }

    #[test]
    fn set_vertex_type_recurses() {
        let arena = Bump::new();
        let mut collection = GeometryCollection::with_capacity_in(&arena, 2, Dimension::XY);
        collection.push_part(&arena, Point::new(&arena, VertexXY::new(1.0, 2.0)).into());
        let mut polygon = Polygon::new_in(&arena, 1, Dimension::XY);
        polygon.parts_mut()[0] = LineString::from_vertices(
            &arena,
            &[
                VertexXY::new(0.0, 0.0),
                VertexXY::new(1.0, 0.0),
                VertexXY::new(0.0, 1.0),
                VertexXY::new(0.0, 0.0),
            ],
        );
        collection.push_part(&arena, polygon.into());

        let view = collection.view();
        let mut geometry = Geometry::GeometryCollection(view);
        geometry.set_vertex_type(&arena, true, false, 7.0, 0.0);

        let collection_z = geometry.as_geometry_collection().unwrap();
        assert_eq!(collection_z.dimension(), Dimension::XYZ);
        let point = collection_z.parts()[0].as_point().unwrap();
        assert_eq!(point.vertex_as::<VertexXYZ>(0), VertexXYZ::new(1.0, 2.0, 7.0));
        let polygon = collection_z.parts()[1].as_polygon().unwrap();
        assert_eq!(polygon.dimension(), Dimension::XYZ);
        assert_eq!(
            polygon.parts()[0].vertex_as::<VertexXYZ>(2),
            VertexXYZ::new(0.0, 1.0, 7.0)
        );

        // the source collection is untouched
        assert_eq!(collection.dimension(), Dimension::XY);
        assert_eq!(collection.parts()[0].dimension(), Dimension::XY);
    }

    fn closed_ring(arena: &Bump) -> LineString<'_> {
        LineString::from_vertices(
            arena,
            &[
                VertexXY::new(0.0, 0.0),
                VertexXY::new(4.0, 0.0),
                VertexXY::new(0.0, 3.0),
                VertexXY::new(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn reverse_every_part_in_order() {
        let arena = Bump::new();
        let mut collection = GeometryCollection::with_capacity_in(&arena, 4, Dimension::XY);
        collection.push_part(&arena, Point::new(&arena, VertexXY::new(9.0, 9.0)).into());
        collection.push_part(
            &arena,
            LineString::from_vertices(&arena, &[VertexXY::new(0.0, 0.0), VertexXY::new(1.0, 2.0)])
                .into(),
        );
        let mut polygon = Polygon::with_capacity_in(&arena, 1, Dimension::XY);
        polygon.push_part(&arena, closed_ring(&arena));
        collection.push_part(&arena, polygon.into());
        collection.push_part(&arena, LineString::empty(GeometryProperties::default()).into());

        let mut reversed = Geometry::GeometryCollection(collection.view());
        reversed.reverse(&arena);

        let parts = reversed.as_geometry_collection().unwrap().parts();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].as_point().unwrap().vertex(0), VertexXY::new(9.0, 9.0));
        let line = parts[1].as_line_string().unwrap();
        assert_eq!(line.vertex(0), VertexXY::new(1.0, 2.0));
        assert_eq!(line.vertex(1), VertexXY::new(0.0, 0.0));
        let ring = &parts[2].as_polygon().unwrap().parts()[0];
        assert_eq!(ring.vertex(1), VertexXY::new(0.0, 3.0));
        assert_eq!(ring.vertex(2), VertexXY::new(4.0, 0.0));
        assert!(ring.is_closed());
        assert!(parts[3].is_empty());

        // the source collection is untouched
        let source_line = collection.parts()[1].as_line_string().unwrap();
        assert_eq!(source_line.vertex(0), VertexXY::new(0.0, 0.0));
    }

    #[test]
    fn reverse_empty_stays_read_only() {
        let arena = Bump::new();
        let mut geometry = Geometry::empty(GeometryProperties::default());
        geometry.reverse(&arena);
        assert!(geometry.is_read_only());

        let mut polygon: Geometry = Polygon::empty(GeometryProperties::default()).into();
        polygon.reverse(&arena);
        assert!(polygon.is_empty());
        assert!(polygon.is_read_only());
    }

    #[test]
    fn closed_lines_at_any_depth() {
        let arena = Bump::new();
        let open =
            LineString::from_vertices(&arena, &[VertexXY::new(0.0, 0.0), VertexXY::new(1.0, 0.0)]);

        assert!(Geometry::LineString(closed_ring(&arena)).is_closed());
        assert!(!Geometry::LineString(open.view()).is_closed());
        assert!(!Geometry::LineString(LineString::empty(GeometryProperties::default())).is_closed());

        let mut collection = GeometryCollection::with_capacity_in(&arena, 2, Dimension::XY);
        collection.push_part(&arena, closed_ring(&arena).into());
        collection.push_part(&arena, Point::new(&arena, VertexXY::new(1.0, 1.0)).into());
        assert!(Geometry::GeometryCollection(collection.view()).is_closed());

        collection.push_part(&arena, open.view().into());
        assert!(!Geometry::GeometryCollection(collection.view()).is_closed());

        let mut polygon = Polygon::with_capacity_in(&arena, 1, Dimension::XY);
        polygon.push_part(&arena, closed_ring(&arena));
        assert!(!Geometry::Polygon(polygon).is_closed());
        assert!(!Geometry::empty(GeometryProperties::default()).is_closed());
    }

    #[test]
    fn bounding_box_over_tree() {
        let arena = Bump::new();
        let mut collection = GeometryCollection::with_capacity_in(&arena, 2, Dimension::XY);
        collection.push_part(&arena, Point::new(&arena, VertexXY::new(-1.0, 2.0)).into());
        collection.push_part(
            &arena,
            LineString::from_vertices(&arena, &[VertexXY::new(0.0, 0.0), VertexXY::new(3.0, 1.0)])
                .into(),
        );
        assert_eq!(
            collection.bounding_box(),
            Some(BoundingBox::new(-1.0, 0.0, 3.0, 2.0))
        );
        assert_eq!(
            GeometryCollection::empty(GeometryProperties::default()).bounding_box(),
            None
        );
    }
}
