use crate::datatypes::GeometryType;
use crate::geometry::{Geometry, LineString, PartArray};
use crate::trait_::{CollectionGeometry, GeometryNode, SinglePartGeometry};

#[derive(Debug, PartialEq)]
pub struct MultiLineString<'a> {
    parts: PartArray<'a, LineString<'a>>,
}

impl<'a> MultiLineString<'a> {
    pub fn line_strings(&self) -> &[LineString<'a>] {
        self.parts.as_slice()
    }

    /// Summed planar length of every line.
    pub fn length(&self) -> f64 {
        self.line_strings().iter().map(|line| line.length()).sum()
    }

    /// True when there is at least one line and every line is closed.
    pub fn is_closed(&self) -> bool {
        !self.parts.is_empty() && self.line_strings().iter().all(|line| line.is_closed())
    }
}

impl_multi_part!(MultiLineString, LineString<'a>, GeometryType::MultiLineString);

impl<'a> CollectionGeometry<'a> for MultiLineString<'a> {
    const ELEMENT_TYPE: Option<GeometryType> = Some(GeometryType::LineString);

    fn geometry(&self, i: usize) -> Option<Geometry<'_>> {
        self.parts
            .get(i)
            .map(|line| Geometry::LineString(line.view()))
    }
}
