use std::fmt;

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use byteorder::{ByteOrder, LittleEndian};

use crate::datatypes::Dimension;
use crate::properties::GeometryProperties;
use crate::vertex::{Vertex, VertexXY, VertexXYZM, F64_SIZE};

enum VertexBuffer<'a> {
    /// A read-only view into memory owned by another node, an input buffer or a stored value.
    Borrowed(&'a [u8]),
    /// Exclusively owned, drawn from an arena.
    Owned(BumpVec<'a, u8>),
}

/// A copy-on-write array of vertices of one runtime-selected layout.
///
/// The array is either a read-only view or an owned arena allocation. Views are cheap to
/// create with [`view`](Self::view) or [`slice`](Self::slice); anything that mutates the array
/// first copies a view into an owned buffer. Methods that may allocate take the arena
/// explicitly.
///
/// Vertices are `vertex_size()` bytes apart, and that stride is decided at runtime: an XYM
/// array places three doubles per vertex back to back.
pub struct VertexArray<'a> {
    buffer: VertexBuffer<'a>,
    properties: GeometryProperties,
}

impl<'a> VertexArray<'a> {
    /// An empty, read-only array.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            buffer: VertexBuffer::Borrowed(&[]),
            properties: dim.into(),
        }
    }

    /// An empty, owned array able to hold `capacity` vertices without reallocating.
    pub fn with_capacity_in(arena: &'a Bump, capacity: usize, dim: Dimension) -> Self {
        Self {
            buffer: VertexBuffer::Owned(BumpVec::with_capacity_in(
                capacity * dim.vertex_size(),
                arena,
            )),
            properties: dim.into(),
        }
    }

    /// A read-only view over the first `count` vertices of `buffer`.
    ///
    /// ## Panics
    ///
    /// - If `buffer` is shorter than `count` vertices of the given layout.
    pub fn reference(buffer: &'a [u8], count: usize, dim: Dimension) -> Self {
        let byte_size = count * dim.vertex_size();
        assert!(
            byte_size <= buffer.len(),
            "buffer of {} bytes cannot hold {count} {dim} vertices",
            buffer.len()
        );
        Self {
            buffer: VertexBuffer::Borrowed(&buffer[..byte_size]),
            properties: dim.into(),
        }
    }

    /// An owned array holding a copy of `vertices`.
    pub fn from_vertices<V: Vertex>(arena: &'a Bump, vertices: &[V]) -> Self {
        let mut array = Self::with_capacity_in(arena, vertices.len(), V::DIMENSION);
        for vertex in vertices {
            array.push(arena, *vertex);
        }
        array
    }

    pub fn properties(&self) -> GeometryProperties {
        self.properties
    }

    pub fn dimension(&self) -> Dimension {
        self.properties.dimension()
    }

    pub fn has_z(&self) -> bool {
        self.properties.has_z()
    }

    pub fn has_m(&self) -> bool {
        self.properties.has_m()
    }

    /// Byte size of one vertex.
    pub fn vertex_size(&self) -> usize {
        self.properties.vertex_size()
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.as_bytes().len() / self.vertex_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of vertices that fit without reallocating. A view's capacity is its length.
    pub fn capacity(&self) -> usize {
        match &self.buffer {
            VertexBuffer::Borrowed(_) => self.len(),
            VertexBuffer::Owned(vec) => vec.capacity() / self.vertex_size(),
        }
    }

    /// The number of bytes occupied by the vertices.
    pub fn byte_size(&self) -> usize {
        self.as_bytes().len()
    }

    /// The raw vertex bytes: little-endian doubles, `vertex_size()` bytes per vertex.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.buffer {
            VertexBuffer::Borrowed(bytes) => bytes,
            VertexBuffer::Owned(vec) => vec,
        }
    }

    pub fn is_owning(&self) -> bool {
        matches!(self.buffer, VertexBuffer::Owned(_))
    }

    /// A read-only array sharing this array's vertices.
    pub fn view(&self) -> VertexArray<'_> {
        VertexArray {
            buffer: VertexBuffer::Borrowed(self.as_bytes()),
            properties: self.properties,
        }
    }

    /// A read-only array over `count` vertices starting at `start`. Never allocates.
    ///
    /// ## Panics
    ///
    /// - If `start + count > self.len()`.
    pub fn slice(&self, start: usize, count: usize) -> VertexArray<'_> {
        assert!(
            start + count <= self.len(),
            "slice {start}..{} out of bounds for {} vertices",
            start + count,
            self.len()
        );
        let vertex_size = self.vertex_size();
        VertexArray {
            buffer: VertexBuffer::Borrowed(
                &self.as_bytes()[start * vertex_size..(start + count) * vertex_size],
            ),
            properties: self.properties,
        }
    }

    fn owned_mut(&mut self) -> &mut BumpVec<'a, u8> {
        match &mut self.buffer {
            VertexBuffer::Owned(vec) => vec,
            VertexBuffer::Borrowed(_) => {
                panic!("cannot mutate a read-only vertex array; make it owning first")
            }
        }
    }

    /// Copy a read-only array into an owned buffer with room for at least one vertex.
    pub fn make_owning(&mut self, arena: &'a Bump) -> &mut Self {
        if let VertexBuffer::Borrowed(bytes) = &self.buffer {
            let bytes: &[u8] = bytes;
            let mut owned =
                BumpVec::with_capacity_in(bytes.len().max(self.vertex_size()), arena);
            owned.extend_from_slice(bytes);
            self.buffer = VertexBuffer::Owned(owned);
        }
        self
    }

    /// Grow the owned capacity to at least `count` vertices.
    pub fn reserve(&mut self, arena: &'a Bump, count: usize) -> &mut Self {
        self.make_owning(arena);
        let needed = count * self.vertex_size();
        let vec = self.owned_mut();
        if needed > vec.capacity() {
            let additional = needed - vec.len();
            vec.reserve_exact(additional);
        }
        self
    }

    /// Truncate, or extend with zeroed vertices, to exactly `count` vertices.
    pub fn resize(&mut self, arena: &'a Bump, count: usize) {
        self.make_owning(arena);
        let byte_size = count * self.vertex_size();
        self.owned_mut().resize(byte_size, 0);
    }

    /// Append one vertex. `V` must match the array's layout.
    pub fn push<V: Vertex>(&mut self, arena: &'a Bump, vertex: V) {
        debug_assert_eq!(V::DIMENSION, self.dimension(), "vertex layout mismatch");
        self.make_owning(arena);
        let vertex_size = self.vertex_size();
        let vec = self.owned_mut();
        let start = vec.len();
        vec.resize(start + vertex_size, 0);
        vertex.write(&mut vec[start..]);
    }

    /// Append one vertex of any layout, narrowing or widening it to this array's layout.
    pub(crate) fn push_widened(&mut self, arena: &'a Bump, vertex: VertexXYZM) {
        self.make_owning(arena);
        let dim = self.dimension();
        let vertex_size = self.vertex_size();
        let vec = self.owned_mut();
        let start = vec.len();
        vec.resize(start + vertex_size, 0);
        vertex.write_narrowed(&mut vec[start..], dim);
    }

    /// Append every vertex of `other` after the existing ones.
    ///
    /// When `other` has a different layout its vertices are converted on the way in: missing
    /// ordinates become zero and extra ordinates are dropped.
    pub fn extend_from(&mut self, arena: &'a Bump, other: &VertexArray<'_>) {
        self.make_owning(arena);
        if other.properties.same_layout(&self.properties) {
            self.owned_mut().extend_from_slice(other.as_bytes());
            return;
        }

        let dim = self.dimension();
        let vertex_size = self.vertex_size();
        let other_dim = other.dimension();
        let vec = self.owned_mut();
        let start = vec.len();
        vec.resize(start + other.len() * vertex_size, 0);
        for (i, chunk) in other
            .as_bytes()
            .chunks_exact(other_dim.vertex_size())
            .enumerate()
        {
            let offset = start + i * vertex_size;
            VertexXYZM::read_widened(chunk, other_dim, 0.0, 0.0)
                .write_narrowed(&mut vec[offset..offset + vertex_size], dim);
        }
    }

    fn vertex_bytes(&self, i: usize) -> &[u8] {
        let len = self.len();
        assert!(i < len, "vertex index {i} out of bounds for {len} vertices");
        let vertex_size = self.vertex_size();
        &self.as_bytes()[i * vertex_size..(i + 1) * vertex_size]
    }

    /// The X and Y of vertex `i`, whatever the layout.
    pub fn get(&self, i: usize) -> VertexXY {
        let bytes = self.vertex_bytes(i);
        VertexXY::read(&bytes[..2 * F64_SIZE])
    }

    /// Vertex `i` in its stored layout. `V` must match that layout exactly.
    pub fn get_as<V: Vertex>(&self, i: usize) -> V {
        debug_assert_eq!(V::DIMENSION, self.dimension(), "vertex layout mismatch");
        V::read(self.vertex_bytes(i))
    }

    /// All ordinates of vertex `i`; absent ones are returned as NaN.
    pub fn get_widened(&self, i: usize) -> VertexXYZM {
        VertexXYZM::read_widened(self.vertex_bytes(i), self.dimension(), f64::NAN, f64::NAN)
    }

    /// Overwrite vertex `i`. `V` must match the stored layout exactly.
    ///
    /// ## Panics
    ///
    /// - If the array is read-only.
    /// - If `i` is out of bounds.
    pub fn set<V: Vertex>(&mut self, i: usize, vertex: V) {
        debug_assert_eq!(V::DIMENSION, self.dimension(), "vertex layout mismatch");
        let len = self.len();
        assert!(i < len, "vertex index {i} out of bounds for {len} vertices");
        let vertex_size = self.vertex_size();
        let vec = self.owned_mut();
        vertex.write(&mut vec[i * vertex_size..(i + 1) * vertex_size]);
    }

    /// The X and Y of every vertex, in order.
    pub fn iter(&self) -> impl Iterator<Item = VertexXY> + '_ {
        self.as_bytes()
            .chunks_exact(self.vertex_size())
            .map(|chunk| VertexXY::read(&chunk[..2 * F64_SIZE]))
    }

    /// Every vertex with all four ordinates; absent ones are NaN.
    pub fn iter_widened(&self) -> impl Iterator<Item = VertexXYZM> + '_ {
        let dim = self.dimension();
        self.as_bytes()
            .chunks_exact(self.vertex_size())
            .map(move |chunk| VertexXYZM::read_widened(chunk, dim, f64::NAN, f64::NAN))
    }

    /// Planar length of the path through consecutive vertices.
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut vertices = self.iter();
        let Some(mut previous) = vertices.next() else {
            return length;
        };
        for vertex in vertices {
            length += (vertex.x - previous.x).hypot(vertex.y - previous.y);
            previous = vertex;
        }
        length
    }

    /// No vertices: not closed. One vertex: closed. Otherwise the first and last vertex must
    /// have exactly equal X and Y.
    pub fn is_closed(&self) -> bool {
        match self.len() {
            0 => false,
            1 => true,
            n => {
                let start = self.get(0);
                let end = self.get(n - 1);
                start.x == end.x && start.y == end.y
            }
        }
    }

    /// Reverse the vertex order in place. A read-only array with two or more vertices is
    /// copied first.
    pub fn reverse(&mut self, arena: &'a Bump) {
        let count = self.len();
        if count < 2 {
            return;
        }
        let vertex_size = self.vertex_size();
        let vec = self.make_owning(arena).owned_mut();
        for i in 0..count / 2 {
            let (head, tail) = vec.split_at_mut((count - 1 - i) * vertex_size);
            head[i * vertex_size..(i + 1) * vertex_size]
                .swap_with_slice(&mut tail[..vertex_size]);
        }
    }

    /// Reflow every vertex into a new layout, keeping X, Y and whichever of Z and M both
    /// layouts share. Ordinates the old layout lacks are set to `default_z` / `default_m`.
    pub fn update_vertex_type(
        &mut self,
        arena: &'a Bump,
        has_z: bool,
        has_m: bool,
        default_z: f64,
        default_m: f64,
    ) {
        let old_dim = self.dimension();
        let new_dim = Dimension::from_flags(has_z, has_m);
        if old_dim == new_dim {
            return;
        }

        let count = self.len();
        let old_size = old_dim.vertex_size();
        let new_size = new_dim.vertex_size();

        if new_size > old_size {
            self.make_owning(arena);
            let vec = self.owned_mut();
            vec.resize(count * new_size, 0);
            // Back to front, so that no vertex is overwritten before it has been read.
            for i in (0..count).rev() {
                let vertex = VertexXYZM::read_widened(
                    &vec[i * old_size..(i + 1) * old_size],
                    old_dim,
                    default_z,
                    default_m,
                );
                vertex.write_narrowed(&mut vec[i * new_size..(i + 1) * new_size], new_dim);
            }
        } else if new_size == old_size {
            // XYZ <-> XYM: the third slot changes meaning and takes the new default.
            self.make_owning(arena);
            let default = if has_m { default_m } else { default_z };
            let vec = self.owned_mut();
            for i in 0..count {
                let offset = i * new_size + 2 * F64_SIZE;
                LittleEndian::write_f64(&mut vec[offset..offset + F64_SIZE], default);
            }
        } else {
            let mut shrunk = BumpVec::with_capacity_in(count.max(1) * new_size, arena);
            shrunk.resize(count * new_size, 0);
            for (i, chunk) in self.as_bytes().chunks_exact(old_size).enumerate() {
                VertexXYZM::read_widened(chunk, old_dim, default_z, default_m)
                    .write_narrowed(&mut shrunk[i * new_size..(i + 1) * new_size], new_dim);
            }
            self.buffer = VertexBuffer::Owned(shrunk);
        }

        self.properties.set_z(has_z);
        self.properties.set_m(has_m);
    }
}

impl PartialEq for VertexArray<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !self.properties.same_layout(&other.properties) || self.len() != other.len() {
            return false;
        }
        self.as_bytes()
            .chunks_exact(F64_SIZE)
            .zip(other.as_bytes().chunks_exact(F64_SIZE))
            .all(|(left, right)| LittleEndian::read_f64(left) == LittleEndian::read_f64(right))
    }
}

impl fmt::Debug for VertexArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = self.dimension();
        write!(f, "VertexArray {dim} ({}/{}) [", self.len(), self.capacity())?;
        for (i, vertex) in self.iter_widened().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match dim {
                Dimension::XY => write!(f, "({}, {})", vertex.x, vertex.y)?,
                Dimension::XYZ => write!(f, "({}, {}, {})", vertex.x, vertex.y, vertex.z)?,
                Dimension::XYM => write!(f, "({}, {}, {})", vertex.x, vertex.y, vertex.m)?,
                Dimension::XYZM => write!(
                    f,
                    "({}, {}, {}, {})",
                    vertex.x, vertex.y, vertex.z, vertex.m
                )?,
            }
        }
        write!(f, "]")
    }
}
