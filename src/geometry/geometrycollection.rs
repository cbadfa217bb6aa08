use crate::datatypes::GeometryType;
use crate::geometry::{Geometry, PartArray};
use crate::trait_::{CollectionGeometry, GeometryNode};

/// A collection of geometries of any kind, including nested collections.
#[derive(Debug, PartialEq)]
pub struct GeometryCollection<'a> {
    parts: PartArray<'a, Geometry<'a>>,
}

impl<'a> GeometryCollection<'a> {
    pub fn geometries(&self) -> &[Geometry<'a>] {
        self.parts.as_slice()
    }
}

impl_multi_part!(
    GeometryCollection,
    Geometry<'a>,
    GeometryType::GeometryCollection
);

impl<'a> CollectionGeometry<'a> for GeometryCollection<'a> {
    const ELEMENT_TYPE: Option<GeometryType> = None;

    fn geometry(&self, i: usize) -> Option<Geometry<'_>> {
        self.parts.get(i).map(|geometry| geometry.view())
    }
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::datatypes::Dimension;
    use crate::geometry::{LineString, Point};
    use crate::trait_::MultiPartGeometry;
    use crate::vertex::VertexXY;

    #[test]
    fn heterogeneous_parts() {
        let arena = Bump::new();
        let mut collection = GeometryCollection::with_capacity_in(&arena, 2, Dimension::XY);
        collection.push_part(&arena, Point::new(&arena, VertexXY::new(1.0, 1.0)).into());
        collection.push_part(
            &arena,
            LineString::from_vertices(&arena, &[VertexXY::new(0.0, 0.0), VertexXY::new(1.0, 0.0)])
                .into(),
        );

        assert_eq!(collection.part_count(), 2);
        assert_eq!(collection.vertex_count(), 3);
        assert_eq!(
            collection.geometry(1).unwrap().geometry_type(),
            GeometryType::LineString
        );
        assert_eq!(GeometryCollection::ELEMENT_TYPE, None);
    }

    #[test]
    fn placement_default_is_empty_collection() {
        let arena = Bump::new();
        let collection = GeometryCollection::new_in(&arena, 2, Dimension::XY);
        for geometry in collection.geometries() {
            assert_eq!(geometry.geometry_type(), GeometryType::GeometryCollection);
            assert!(geometry.is_empty());
        }
        assert!(collection.is_empty());
    }
}
