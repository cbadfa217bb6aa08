use crate::datatypes::GeometryType;
use crate::geometry::{Geometry, PartArray, Point};
use crate::trait_::{CollectionGeometry, GeometryNode};

#[derive(Debug, PartialEq)]
pub struct MultiPoint<'a> {
    parts: PartArray<'a, Point<'a>>,
}

impl<'a> MultiPoint<'a> {
    pub fn points(&self) -> &[Point<'a>] {
        self.parts.as_slice()
    }
}

impl_multi_part!(MultiPoint, Point<'a>, GeometryType::MultiPoint);

impl<'a> CollectionGeometry<'a> for MultiPoint<'a> {
    const ELEMENT_TYPE: Option<GeometryType> = Some(GeometryType::Point);

    fn geometry(&self, i: usize) -> Option<Geometry<'_>> {
        self.parts.get(i).map(|point| Geometry::Point(point.view()))
    }
}
