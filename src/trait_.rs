//! Accessor protocols shared by the geometry node types.

use bumpalo::Bump;

use crate::datatypes::{Dimension, GeometryType};
use crate::geometry::{BoundingBox, Geometry, PartArray};
use crate::properties::GeometryProperties;
use crate::vertex::{Vertex, VertexArray, VertexXY};

/// Operations available on every geometry node.
///
/// `'a` bounds every buffer the node refers to: the arena its owned buffers came from, or the
/// input a read-only node borrows from.
pub trait GeometryNode<'a>: Sized {
    fn geometry_type(&self) -> GeometryType;

    fn properties(&self) -> GeometryProperties;

    fn dimension(&self) -> Dimension {
        self.properties().dimension()
    }

    fn has_z(&self) -> bool {
        self.properties().has_z()
    }

    fn has_m(&self) -> bool {
        self.properties().has_m()
    }

    /// Whether the node has no vertices. A multi-part node is empty when every part is.
    fn is_empty(&self) -> bool;

    /// Whether the node's own buffer is borrowed, and must be copied before mutation.
    fn is_read_only(&self) -> bool;

    /// Total number of vertices, at any depth.
    fn vertex_count(&self) -> usize;

    /// An empty, read-only node with the given layout.
    fn empty(properties: GeometryProperties) -> Self;

    /// A read-only node sharing this node's buffer.
    fn view(&'a self) -> Self;

    /// Move the node out, leaving an empty read-only node of the same kind and layout behind.
    fn take(&mut self) -> Self {
        let empty = Self::empty(self.properties());
        std::mem::replace(self, empty)
    }

    /// Copy a read-only buffer into an owned arena allocation. Does nothing if already owned.
    ///
    /// Only the node's own buffer is copied; parts stay read-only until they are made
    /// mutable themselves.
    fn make_mutable(&mut self, arena: &'a Bump);

    /// Migrate this node and everything below it to a new vertex layout.
    ///
    /// Ordinates the old layout lacks are set to `default_z` / `default_m`. Read-only buffers
    /// are copied first.
    fn set_vertex_type(
        &mut self,
        arena: &'a Bump,
        has_z: bool,
        has_m: bool,
        default_z: f64,
        default_m: f64,
    );

    /// Reverse the vertex order of every path and ring below this node. Part order is kept.
    /// Read-only buffers are copied first.
    fn reverse(&mut self, arena: &'a Bump);

    /// The XY extent of all vertices, or `None` when there are none.
    fn bounding_box(&self) -> Option<BoundingBox>;
}

/// Point and LineString: nodes backed directly by a [`VertexArray`].
pub trait SinglePartGeometry<'a>: GeometryNode<'a> {
    fn vertices(&self) -> &VertexArray<'a>;

    /// Mutable access to the vertex buffer. Mutating a read-only array panics unless the
    /// method takes an arena.
    fn vertices_mut(&mut self) -> &mut VertexArray<'a>;

    /// Rebind to a read-only buffer holding `count` vertices of the given layout.
    fn reference_data(&mut self, buffer: &'a [u8], count: usize, has_z: bool, has_m: bool) {
        *self.vertices_mut() =
            VertexArray::reference(buffer, count, Dimension::from_flags(has_z, has_m));
    }

    /// Rebind to `count` vertices of `other`, starting at `offset`, inheriting its layout.
    ///
    /// ## Panics
    ///
    /// - If `offset + count` exceeds the vertex count of `other`.
    fn reference_data_from<S: SinglePartGeometry<'a>>(
        &mut self,
        other: &'a S,
        offset: usize,
        count: usize,
    ) {
        *self.vertices_mut() = other.vertices().slice(offset, count);
    }

    /// Replace the vertices with an owned copy of `count` vertices read from `buffer`.
    ///
    /// The current allocation is reused when it is owned, has the same layout and holds
    /// exactly `count` vertices.
    fn copy_data(
        &mut self,
        arena: &'a Bump,
        buffer: &[u8],
        count: usize,
        has_z: bool,
        has_m: bool,
    ) {
        let dim = Dimension::from_flags(has_z, has_m);
        let source = VertexArray::reference(buffer, count, dim);
        let vertices = self.vertices_mut();
        if vertices.is_owning() && vertices.dimension() == dim && vertices.capacity() == count {
            vertices.resize(arena, 0);
        } else {
            *vertices = VertexArray::with_capacity_in(arena, count, dim);
        }
        vertices.extend_from(arena, &source);
    }

    /// Truncate, or zero-extend, to `count` vertices.
    fn resize(&mut self, arena: &'a Bump, count: usize) {
        self.vertices_mut().resize(arena, count);
    }

    /// Append the vertices of another node of the same kind.
    fn append<'b, S: SinglePartGeometry<'b>>(&mut self, arena: &'a Bump, other: &S) {
        debug_assert_eq!(self.geometry_type(), other.geometry_type());
        self.vertices_mut().extend_from(arena, other.vertices());
    }

    /// Append the vertices of every node in `others`, in order.
    fn append_all<'b, S: SinglePartGeometry<'b>>(&mut self, arena: &'a Bump, others: &[S]) {
        let total = self.vertex_count() + others.iter().map(|o| o.vertex_count()).sum::<usize>();
        self.vertices_mut().reserve(arena, total);
        for other in others {
            self.append(arena, other);
        }
    }

    /// The X and Y of vertex `i`.
    fn vertex(&self, i: usize) -> VertexXY {
        self.vertices().get(i)
    }

    /// Vertex `i` in its stored layout, which must be `V`.
    fn vertex_as<V: Vertex>(&self, i: usize) -> V {
        self.vertices().get_as(i)
    }

    /// Overwrite vertex `i`. The node must be mutable and stored as `V`.
    fn set_vertex<V: Vertex>(&mut self, i: usize, vertex: V) {
        self.vertices_mut().set(i, vertex);
    }

    fn is_closed(&self) -> bool {
        self.vertices().is_closed()
    }

    fn length(&self) -> f64 {
        self.vertices().length()
    }

    fn vertex_size(&self) -> usize {
        self.vertices().vertex_size()
    }

    fn byte_size(&self) -> usize {
        self.vertices().byte_size()
    }
}

/// Nodes backed by an array of nested nodes.
pub trait MultiPartGeometry<'a>: GeometryNode<'a> + 'a {
    type Part: GeometryNode<'a> + 'a;

    fn part_array(&self) -> &PartArray<'a, Self::Part>;

    fn part_array_mut(&mut self) -> &mut PartArray<'a, Self::Part>;

    fn part_count(&self) -> usize {
        self.part_array().len()
    }

    fn part<'s>(&'s self, i: usize) -> Option<&'s Self::Part>
    where
        'a: 's,
    {
        self.part_array().get(i)
    }

    fn parts<'s>(&'s self) -> &'s [Self::Part]
    where
        'a: 's,
    {
        self.part_array().as_slice()
    }

    /// ## Panics
    ///
    /// - If the node is read-only.
    fn parts_mut<'s>(&'s mut self) -> &'s mut [Self::Part]
    where
        'a: 's,
    {
        self.part_array_mut().as_mut_slice()
    }

    /// Append a part, copying a read-only part array first.
    fn push_part(&mut self, arena: &'a Bump, part: Self::Part) {
        self.part_array_mut().push(arena, part);
    }
}

/// MultiPoint, MultiLineString, MultiPolygon and GeometryCollection.
pub trait CollectionGeometry<'a>: MultiPartGeometry<'a> {
    /// The kind every element must have, or `None` when any kind is allowed.
    const ELEMENT_TYPE: Option<GeometryType>;

    /// Element `i` as a read-only [`Geometry`].
    fn geometry(&self, i: usize) -> Option<Geometry<'_>>;
}
