use crate::datatypes::GeometryType;
use crate::geometry::{Geometry, PartArray, Polygon};
use crate::trait_::{CollectionGeometry, GeometryNode};

#[derive(Debug, PartialEq)]
pub struct MultiPolygon<'a> {
    parts: PartArray<'a, Polygon<'a>>,
}

impl<'a> MultiPolygon<'a> {
    pub fn polygons(&self) -> &[Polygon<'a>] {
        self.parts.as_slice()
    }
}

impl_multi_part!(MultiPolygon, Polygon<'a>, GeometryType::MultiPolygon);

impl<'a> CollectionGeometry<'a> for MultiPolygon<'a> {
    const ELEMENT_TYPE: Option<GeometryType> = Some(GeometryType::Polygon);

    fn geometry(&self, i: usize) -> Option<Geometry<'_>> {
        self.parts
            .get(i)
            .map(|polygon| Geometry::Polygon(polygon.view()))
    }
}
