use crate::datatypes::GeometryType;
use crate::geometry::{LineString, PartArray};

/// A polygon: a shell ring followed by zero or more hole rings.
#[derive(Debug, PartialEq)]
pub struct Polygon<'a> {
    parts: PartArray<'a, LineString<'a>>,
}

impl<'a> Polygon<'a> {
    /// The exterior ring, or `None` for a polygon without rings.
    pub fn shell(&self) -> Option<&LineString<'a>> {
        self.parts.get(0)
    }

    pub fn ring(&self, i: usize) -> Option<&LineString<'a>> {
        self.parts.get(i)
    }

    pub fn rings(&self) -> &[LineString<'a>] {
        self.parts.as_slice()
    }

    /// The interior rings.
    pub fn holes(&self) -> &[LineString<'a>] {
        self.rings().get(1..).unwrap_or_default()
    }
}

impl_multi_part!(Polygon, LineString<'a>, GeometryType::Polygon);
