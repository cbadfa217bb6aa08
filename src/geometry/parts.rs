use std::fmt;

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::geometry::BoundingBox;
use crate::properties::GeometryProperties;
use crate::trait_::GeometryNode;

enum PartBuffer<'a, T> {
    Borrowed(&'a [T]),
    Owned(BumpVec<'a, T>),
}

/// The copy-on-write array of nested nodes behind Polygon and the collection kinds.
///
/// Like [`VertexArray`](crate::vertex::VertexArray), it is either a read-only view or an owned
/// arena allocation. Making a view owning copies only the array of part handles; the parts
/// themselves become views of the originals.
pub struct PartArray<'a, T> {
    buffer: PartBuffer<'a, T>,
    properties: GeometryProperties,
}

impl<'a, T> PartArray<'a, T> {
    /// No parts, read-only.
    pub fn empty(properties: GeometryProperties) -> Self {
        Self {
            buffer: PartBuffer::Borrowed(&[]),
            properties,
        }
    }

    pub fn with_capacity_in(
        arena: &'a Bump,
        capacity: usize,
        properties: GeometryProperties,
    ) -> Self {
        Self {
            buffer: PartBuffer::Owned(BumpVec::with_capacity_in(capacity, arena)),
            properties,
        }
    }

    /// A read-only array over parts owned elsewhere.
    pub fn reference(parts: &'a [T], properties: GeometryProperties) -> Self {
        Self {
            buffer: PartBuffer::Borrowed(parts),
            properties,
        }
    }

    pub(crate) fn from_vec(parts: BumpVec<'a, T>, properties: GeometryProperties) -> Self {
        Self {
            buffer: PartBuffer::Owned(parts),
            properties,
        }
    }

    pub fn properties(&self) -> GeometryProperties {
        self.properties
    }

    /// The number of parts.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no parts at all. Parts that are themselves empty still count.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owning(&self) -> bool {
        matches!(self.buffer, PartBuffer::Owned(_))
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.buffer {
            PartBuffer::Borrowed(parts) => parts,
            PartBuffer::Owned(parts) => parts,
        }
    }

    /// ## Panics
    ///
    /// - If the array is read-only.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.buffer {
            PartBuffer::Owned(parts) => parts,
            PartBuffer::Borrowed(_) => {
                panic!("cannot mutate a read-only part array; make it mutable first")
            }
        }
    }

    /// A read-only array sharing this array's parts.
    pub fn view(&'a self) -> Self {
        Self::reference(self.as_slice(), self.properties)
    }
}

impl<'a, T: GeometryNode<'a>> PartArray<'a, T> {
    /// An owned array of `count` empty parts with the given layout, ready to be filled in.
    pub fn new_in(arena: &'a Bump, count: usize, properties: GeometryProperties) -> Self {
        let mut parts = BumpVec::with_capacity_in(count, arena);
        parts.extend((0..count).map(|_| T::empty(properties)));
        Self::from_vec(parts, properties)
    }

    /// Replace a borrowed array with an owned one holding views of the same parts.
    pub fn make_owning(&mut self, arena: &'a Bump) {
        if let PartBuffer::Borrowed(parts) = &self.buffer {
            let parts: &'a [T] = *parts;
            let mut owned = BumpVec::with_capacity_in(parts.len().max(1), arena);
            owned.extend(parts.iter().map(|part| part.view()));
            self.buffer = PartBuffer::Owned(owned);
        }
    }

    pub fn push(&mut self, arena: &'a Bump, part: T) {
        debug_assert!(
            part.properties().same_layout(&self.properties),
            "part layout {} does not match {}",
            part.dimension(),
            self.properties.dimension()
        );
        self.make_owning(arena);
        match &mut self.buffer {
            PartBuffer::Owned(parts) => parts.push(part),
            PartBuffer::Borrowed(_) => unreachable!(),
        }
    }

    pub fn set_vertex_type(
        &mut self,
        arena: &'a Bump,
        has_z: bool,
        has_m: bool,
        default_z: f64,
        default_m: f64,
    ) {
        if self.properties.has_z() == has_z && self.properties.has_m() == has_m {
            return;
        }
        self.make_owning(arena);
        for part in self.as_mut_slice() {
            part.set_vertex_type(arena, has_z, has_m, default_z, default_m);
        }
        self.properties.set_z(has_z);
        self.properties.set_m(has_m);
    }

    /// Reverse every part in place. Part order is kept.
    pub fn reverse(&mut self, arena: &'a Bump) {
        if self.all_empty() {
            return;
        }
        self.make_owning(arena);
        for part in self.as_mut_slice() {
            part.reverse(arena);
        }
    }

    /// True when every part is empty, including when there are no parts.
    pub(crate) fn all_empty(&self) -> bool {
        self.as_slice().iter().all(|part| part.is_empty())
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.as_slice().iter().map(|part| part.vertex_count()).sum()
    }

    pub(crate) fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::merge(self.as_slice().iter().map(|part| part.bounding_box()))
    }
}

impl<T: PartialEq> PartialEq for PartArray<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.properties.same_layout(&other.properties) && self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for PartArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartArray {} ", self.properties.dimension())?;
        f.debug_list().entries(self.as_slice()).finish()
    }
}
