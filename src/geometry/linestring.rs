use bumpalo::Bump;

use crate::datatypes::{Dimension, GeometryType};
use crate::vertex::{Vertex, VertexArray};

/// A path through zero or more vertices. Polygon rings are line strings as well.
#[derive(Debug, PartialEq)]
pub struct LineString<'a> {
    vertices: VertexArray<'a>,
}

impl<'a> LineString<'a> {
    /// An owned line string of `count` zeroed vertices, to be filled in place.
    pub fn new_in(arena: &'a Bump, count: usize, dim: Dimension) -> Self {
        let mut vertices = VertexArray::with_capacity_in(arena, count, dim);
        vertices.resize(arena, count);
        Self { vertices }
    }

    /// An owned line string holding a copy of `vertices`.
    pub fn from_vertices<V: Vertex>(arena: &'a Bump, vertices: &[V]) -> Self {
        Self {
            vertices: VertexArray::from_vertices(arena, vertices),
        }
    }

    pub fn from_vertex_array(vertices: VertexArray<'a>) -> Self {
        Self { vertices }
    }
}

impl_single_part!(LineString, GeometryType::LineString);

#[cfg(test)]
mod test {
    use super::*;
    use crate::properties::GeometryProperties;
    use crate::trait_::{GeometryNode, SinglePartGeometry};
    use crate::vertex::{VertexXY, VertexXYZ};

    fn square(arena: &Bump) -> LineString<'_> {
        LineString::from_vertices(
            arena,
            &[
                VertexXY::new(0.0, 0.0),
                VertexXY::new(1.0, 0.0),
                VertexXY::new(1.0, 1.0),
                VertexXY::new(0.0, 1.0),
                VertexXY::new(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn length_and_closed() {
        let arena = Bump::new();
        let line = square(&arena);
        assert_eq!(line.length(), 4.0);
        assert!(line.is_closed());
        assert_eq!(line.vertex_count(), 5);
        assert_eq!(line.byte_size(), 80);
    }

    #[test]
    fn new_in_is_zeroed() {
        let arena = Bump::new();
        let line = LineString::new_in(&arena, 3, Dimension::XYZ);
        assert_eq!(line.vertex_count(), 3);
        assert!(!line.is_read_only());
        assert_eq!(line.vertex_as::<VertexXYZ>(2), VertexXYZ::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn reference_sub_range() {
        let arena = Bump::new();
        let line = square(&arena);
        let mut middle = LineString::empty(GeometryProperties::default());
        middle.reference_data_from(&line, 1, 3);
        assert!(middle.is_read_only());
        assert_eq!(middle.vertex_count(), 3);
        assert_eq!(middle.vertex(0), VertexXY::new(1.0, 0.0));
        assert_eq!(middle.length(), 2.0);
    }

    #[test]
    #[should_panic]
    fn reference_past_the_end() {
        let arena = Bump::new();
        let line = square(&arena);
        let mut tail = LineString::empty(GeometryProperties::default());
        tail.reference_data_from(&line, 4, 2);
    }

    #[test]
    fn copy_data_always_owns() {
        let arena = Bump::new();
        let source = square(&arena);
        let mut line = LineString::empty(GeometryProperties::default());
        line.copy_data(&arena, source.vertices().as_bytes(), 5, false, false);
        assert!(!line.is_read_only());
        assert_eq!(line, source);

        // same count again reuses the allocation
        let before = line.vertices().as_bytes().as_ptr();
        line.copy_data(&arena, source.vertices().as_bytes(), 5, false, false);
        assert_eq!(line.vertices().as_bytes().as_ptr(), before);

        line.copy_data(&arena, source.vertices().as_bytes(), 2, false, false);
        assert_eq!(line.vertex_count(), 2);
        assert!(!line.is_closed());
    }

    #[test]
    fn append_all_in_order() {
        let arena = Bump::new();
        let a = LineString::from_vertices(&arena, &[VertexXY::new(0.0, 0.0)]);
        let b = LineString::from_vertices(&arena, &[VertexXY::new(1.0, 1.0)]);
        let c = LineString::from_vertices(&arena, &[VertexXY::new(2.0, 2.0)]);
        let mut line = a.view();
        line.append_all(&arena, &[b, c]);
        assert_eq!(line.vertex_count(), 3);
        assert_eq!(line.vertex(2), VertexXY::new(2.0, 2.0));
        assert_eq!(a.vertex_count(), 1);
    }

    #[test]
    fn resize_zero_extends() {
        let arena = Bump::new();
        let source = square(&arena);
        let mut line = source.view();
        line.resize(&arena, 7);
        assert_eq!(source.vertex_count(), 5);
        assert_eq!(line.vertex(6), VertexXY::new(0.0, 0.0));
        line.resize(&arena, 1);
        assert!(line.is_closed());
    }
}
