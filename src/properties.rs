//! Bit-packed geometry descriptor.

use crate::datatypes::Dimension;

bitflags::bitflags! {
    /// Per-geometry flags, stored verbatim in the second byte of a serialized geometry.
    ///
    /// Bits not named here are reserved; [`GeometryProperties::from_bits_retain`] keeps them so
    /// a value read from storage writes back unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeometryProperties: u8 {
        const HAS_Z = 1 << 0;
        const HAS_M = 1 << 1;
        /// A bounding box is cached ahead of the payload.
        const HAS_BBOX = 1 << 2;
    }
}

impl GeometryProperties {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        let mut properties = Self::empty();
        properties.set(Self::HAS_Z, has_z);
        properties.set(Self::HAS_M, has_m);
        properties
    }

    pub fn has_z(&self) -> bool {
        self.contains(Self::HAS_Z)
    }

    pub fn has_m(&self) -> bool {
        self.contains(Self::HAS_M)
    }

    pub fn has_bbox(&self) -> bool {
        self.contains(Self::HAS_BBOX)
    }

    pub fn set_z(&mut self, has_z: bool) {
        self.set(Self::HAS_Z, has_z);
    }

    pub fn set_m(&mut self, has_m: bool) {
        self.set(Self::HAS_M, has_m);
    }

    pub fn set_bbox(&mut self, has_bbox: bool) {
        self.set(Self::HAS_BBOX, has_bbox);
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.has_z(), self.has_m())
    }

    /// Byte size of one vertex: `16 + 8·hasZ + 8·hasM`.
    pub fn vertex_size(&self) -> usize {
        self.dimension().vertex_size()
    }

    /// Whether two descriptors agree on the vertex layout, ignoring auxiliary flags.
    pub fn same_layout(&self, other: &Self) -> bool {
        self.has_z() == other.has_z() && self.has_m() == other.has_m()
    }
}

impl From<Dimension> for GeometryProperties {
    fn from(value: Dimension) -> Self {
        Self::new(value.has_z(), value.has_m())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vertex_size_follows_flags() {
        assert_eq!(GeometryProperties::new(false, false).vertex_size(), 16);
        assert_eq!(GeometryProperties::new(true, false).vertex_size(), 24);
        assert_eq!(GeometryProperties::new(false, true).vertex_size(), 24);
        assert_eq!(GeometryProperties::new(true, true).vertex_size(), 32);
    }

    #[test]
    fn set_flags_independently() {
        let mut properties = GeometryProperties::new(true, false);
        properties.set_m(true);
        properties.set_bbox(true);
        assert_eq!(properties.dimension(), Dimension::XYZM);
        properties.set_z(false);
        assert_eq!(properties.dimension(), Dimension::XYM);
        assert!(properties.has_bbox());
        assert_eq!(properties.bits(), 0b110);
    }

    #[test]
    fn reserved_bits_are_retained() {
        let properties = GeometryProperties::from_bits_retain(0b1000_0001);
        assert!(properties.has_z());
        assert_eq!(properties.bits(), 0b1000_0001);
        assert!(properties.same_layout(&GeometryProperties::new(true, false)));
    }
}
