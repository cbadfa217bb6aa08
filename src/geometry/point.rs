use bumpalo::Bump;

use crate::datatypes::GeometryType;
use crate::vertex::{Vertex, VertexArray, VertexXY};

/// A point: zero vertices when empty, otherwise one.
#[derive(Debug, PartialEq)]
pub struct Point<'a> {
    vertices: VertexArray<'a>,
}

impl<'a> Point<'a> {
    /// An owned point holding `vertex`, in the vertex's layout.
    pub fn new<V: Vertex>(arena: &'a Bump, vertex: V) -> Self {
        let mut vertices = VertexArray::with_capacity_in(arena, 1, V::DIMENSION);
        vertices.push(arena, vertex);
        Self { vertices }
    }

    pub fn from_vertices(vertices: VertexArray<'a>) -> Self {
        Self { vertices }
    }

    /// The X and Y of the point, or `None` when it is empty.
    pub fn coord(&self) -> Option<VertexXY> {
        (!self.vertices.is_empty()).then(|| self.vertices.get(0))
    }
}

impl_single_part!(Point, GeometryType::Point);
