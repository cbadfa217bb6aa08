use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use tracing::trace;

use crate::datatypes::GeometryType;
use crate::geometry::{
    Geometry, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon, PartArray,
};
use crate::properties::GeometryProperties;
use crate::trait_::GeometryNode;

/// Combine geometries into one collection.
///
/// Empty inputs are skipped. When every remaining input is a Point the result is a MultiPoint,
/// likewise for LineString and Polygon; any other mix gives a GeometryCollection. Members are
/// migrated to the union of the inputs' Z and M, with added ordinates set to zero. Inputs are
/// not modified: members that need migrating are copied into `arena`.
///
/// ```
/// use bumpalo::Bump;
/// use geocell::algorithm::collect;
/// use geocell::geometry::{Geometry, Point};
/// use geocell::vertex::VertexXY;
///
/// let arena = Bump::new();
/// let points: Vec<Geometry> = vec![
///     Point::new(&arena, VertexXY::new(1.0, 2.0)).into(),
///     Point::new(&arena, VertexXY::new(3.0, 4.0)).into(),
/// ];
/// assert_eq!(collect(&points, &arena).to_string(), "MULTIPOINT (1 2, 3 4)");
/// ```
pub fn collect<'a>(geometries: &'a [Geometry<'a>], arena: &'a Bump) -> Geometry<'a> {
    let has_z = geometries.iter().any(|g| g.has_z());
    let has_m = geometries.iter().any(|g| g.has_m());
    let properties = GeometryProperties::new(has_z, has_m);

    let members = || geometries.iter().filter(|g| !g.is_empty());
    let kind = members()
        .map(|g| g.geometry_type())
        .reduce(|acc, kind| {
            if acc == kind {
                acc
            } else {
                GeometryType::GeometryCollection
            }
        });
    trace!(
        inputs = geometries.len(),
        members = members().count(),
        ?kind,
        "collecting geometries"
    );

    match kind {
        None => GeometryCollection::empty(properties).into(),
        Some(GeometryType::Point) => {
            MultiPoint::from_part_array(migrate_parts(members(), arena, properties, |g| {
                g.into_point().ok()
            }))
            .into()
        }
        Some(GeometryType::LineString) => MultiLineString::from_part_array(migrate_parts(
            members(),
            arena,
            properties,
            |g| g.into_line_string().ok(),
        ))
        .into(),
        Some(GeometryType::Polygon) => {
            MultiPolygon::from_part_array(migrate_parts(members(), arena, properties, |g| {
                g.into_polygon().ok()
            }))
            .into()
        }
        Some(_) => {
            GeometryCollection::from_part_array(migrate_parts(members(), arena, properties, Some))
                .into()
        }
    }
}

fn migrate_parts<'a, T>(
    members: impl Iterator<Item = &'a Geometry<'a>>,
    arena: &'a Bump,
    properties: GeometryProperties,
    convert: impl Fn(Geometry<'a>) -> Option<T>,
) -> PartArray<'a, T> {
    let parts = BumpVec::from_iter_in(
        members.filter_map(|member| {
            let mut part = member.view();
            part.set_vertex_type(arena, properties.has_z(), properties.has_m(), 0.0, 0.0);
            convert(part)
        }),
        arena,
    );
    PartArray::from_vec(parts, properties)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datatypes::Dimension;
    use crate::geometry::{LineString, Point};
    use crate::io::geo::geometry_from_geo;
    use crate::test::{linestring, polygon};
    use crate::trait_::{MultiPartGeometry, SinglePartGeometry};
    use crate::vertex::{VertexXY, VertexXYZ};

    #[test]
    fn homogeneous_points() {
        let arena = Bump::new();
        let inputs: Vec<Geometry> = vec![
            Point::new(&arena, VertexXY::new(1.0, 2.0)).into(),
            Point::new(&arena, VertexXY::new(3.0, 4.0)).into(),
        ];
        let collected = collect(&inputs, &arena);
        assert_eq!(collected.geometry_type(), GeometryType::MultiPoint);
        assert_eq!(collected.to_string(), "MULTIPOINT (1 2, 3 4)");
    }

    #[test]
    fn homogeneous_lines_and_polygons() {
        let arena = Bump::new();
        let lines = vec![
            geometry_from_geo(&geo::Geometry::LineString(linestring::ls0()), &arena),
            geometry_from_geo(&geo::Geometry::LineString(linestring::ls1()), &arena),
        ];
        assert_eq!(
            collect(&lines, &arena).geometry_type(),
            GeometryType::MultiLineString
        );

        let polygons = vec![
            geometry_from_geo(&geo::Geometry::Polygon(polygon::p0()), &arena),
            geometry_from_geo(&geo::Geometry::Polygon(polygon::p1()), &arena),
        ];
        let collected = collect(&polygons, &arena);
        let multi = collected.as_multi_polygon().unwrap();
        assert_eq!(multi.part_count(), 2);
        assert_eq!(multi.polygons()[1].part_count(), 2);
    }

    #[test]
    fn mixed_kinds() {
        let arena = Bump::new();
        let inputs: Vec<Geometry> = vec![
            Point::new(&arena, VertexXY::new(1.0, 2.0)).into(),
            LineString::from_vertices(&arena, &[VertexXY::new(3.0, 4.0), VertexXY::new(5.0, 6.0)])
                .into(),
        ];
        assert_eq!(
            collect(&inputs, &arena).to_string(),
            "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (3 4, 5 6))"
        );
    }

    #[test]
    fn skips_empty() {
        let arena = Bump::new();
        let inputs: Vec<Geometry> = vec![
            Point::new(&arena, VertexXY::new(1.0, 2.0)).into(),
            GeometryCollection::empty(GeometryProperties::default()).into(),
        ];
        assert_eq!(collect(&inputs, &arena).to_string(), "MULTIPOINT (1 2)");
    }

    #[test]
    fn all_empty() {
        let arena = Bump::new();
        let inputs: Vec<Geometry> = vec![
            GeometryCollection::empty(GeometryProperties::default()).into(),
            Point::empty(GeometryProperties::new(true, false)).into(),
        ];
        let collected = collect(&inputs, &arena);
        assert_eq!(collected.to_string(), "GEOMETRYCOLLECTION Z EMPTY");
        assert_eq!(collect(&[], &arena).to_string(), "GEOMETRYCOLLECTION EMPTY");
    }

    #[test]
    fn unions_z_and_m() {
        let arena = Bump::new();
        let inputs: Vec<Geometry> = vec![
            Point::new(&arena, VertexXY::new(1.0, 2.0)).into(),
            Point::new(&arena, VertexXYZ::new(3.0, 4.0, 5.0)).into(),
        ];
        let collected = collect(&inputs, &arena);
        assert_eq!(collected.dimension(), Dimension::XYZ);
        let multi = collected.as_multi_point().unwrap();
        assert_eq!(
            multi.points()[0].vertex_as::<VertexXYZ>(0),
            VertexXYZ::new(1.0, 2.0, 0.0)
        );
        assert_eq!(collected.to_string(), "MULTIPOINT Z (1 2 0, 3 4 5)");

        // inputs keep their layout
        assert_eq!(inputs[0].dimension(), Dimension::XY);
    }
}
