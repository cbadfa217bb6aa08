use crate::error::{GeoCellError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::trait_::SinglePartGeometry;
use crate::vertex::VertexXY;

/// Convert a vertex to a [`geo::Coord`].
pub fn coord_to_geo(vertex: VertexXY) -> geo::Coord {
    geo::Coord {
        x: vertex.x,
        y: vertex.y,
    }
}

/// Convert a Point to a [`geo::Point`].
///
/// Only the first two dimensions will be kept. `geo` has no empty point, so an empty point is
/// an [`GeoCellError::IncorrectType`] error.
pub fn point_to_geo(point: &Point<'_>) -> Result<geo::Point> {
    point
        .coord()
        .map(|vertex| geo::Point(coord_to_geo(vertex)))
        .ok_or_else(|| GeoCellError::IncorrectType("empty point cannot be converted to geo".into()))
}

/// Convert a LineString to a [`geo::LineString`].
///
/// Only the first two dimensions will be kept.
pub fn line_string_to_geo(line_string: &LineString<'_>) -> geo::LineString {
    geo::LineString::new(line_string.vertices().iter().map(coord_to_geo).collect())
}

/// Convert a Polygon to a [`geo::Polygon`].
///
/// A polygon without rings becomes one with an empty exterior.
pub fn polygon_to_geo(polygon: &Polygon<'_>) -> geo::Polygon {
    let exterior = polygon
        .shell()
        .map(line_string_to_geo)
        .unwrap_or_else(|| geo::LineString::new(vec![]));
    let interiors = polygon.holes().iter().map(line_string_to_geo).collect();
    geo::Polygon::new(exterior, interiors)
}

/// Convert a MultiPoint to a [`geo::MultiPoint`].
pub fn multi_point_to_geo(multi_point: &MultiPoint<'_>) -> Result<geo::MultiPoint> {
    let points = multi_point
        .points()
        .iter()
        .map(point_to_geo)
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::MultiPoint::new(points))
}

/// Convert a MultiLineString to a [`geo::MultiLineString`].
pub fn multi_line_string_to_geo(multi_line_string: &MultiLineString<'_>) -> geo::MultiLineString {
    geo::MultiLineString::new(
        multi_line_string
            .line_strings()
            .iter()
            .map(line_string_to_geo)
            .collect(),
    )
}

/// Convert a MultiPolygon to a [`geo::MultiPolygon`].
pub fn multi_polygon_to_geo(multi_polygon: &MultiPolygon<'_>) -> geo::MultiPolygon {
    geo::MultiPolygon::new(multi_polygon.polygons().iter().map(polygon_to_geo).collect())
}

/// Convert a GeometryCollection to a [`geo::GeometryCollection`].
pub fn geometry_collection_to_geo(
    geometry_collection: &GeometryCollection<'_>,
) -> Result<geo::GeometryCollection> {
    let geometries = geometry_collection
        .geometries()
        .iter()
        .map(geometry_to_geo)
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::GeometryCollection::new_from(geometries))
}

/// Convert any Geometry to a [`geo::Geometry`].
pub fn geometry_to_geo(geometry: &Geometry<'_>) -> Result<geo::Geometry> {
    let geometry = match geometry {
        Geometry::Point(g) => geo::Geometry::Point(point_to_geo(g)?),
        Geometry::LineString(g) => geo::Geometry::LineString(line_string_to_geo(g)),
        Geometry::Polygon(g) => geo::Geometry::Polygon(polygon_to_geo(g)),
        Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(multi_point_to_geo(g)?),
        Geometry::MultiLineString(g) => {
            geo::Geometry::MultiLineString(multi_line_string_to_geo(g))
        }
        Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(multi_polygon_to_geo(g)),
        Geometry::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geometry_collection_to_geo(g)?)
        }
    };
    Ok(geometry)
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;

    use super::*;
    use crate::io::geo::geometry_from_geo;
    use crate::properties::GeometryProperties;
    use crate::test::{geometrycollection, multipolygon, polygon};
    use crate::trait_::GeometryNode;
    use crate::vertex::VertexXYZ;

    #[test]
    fn drops_z() {
        let arena = Bump::new();
        let point = Point::new(&arena, VertexXYZ::new(1.0, 2.0, 3.0));
        assert_eq!(point_to_geo(&point).unwrap(), geo::point!(x: 1.0, y: 2.0));
    }

    #[test]
    fn empty_point_is_an_error() {
        let point = Point::empty(GeometryProperties::default());
        assert!(matches!(
            point_to_geo(&point),
            Err(GeoCellError::IncorrectType(_))
        ));
    }

    #[test]
    fn round_trip_through_geo() {
        let arena = Bump::new();
        for fixture in [
            geo::Geometry::Polygon(polygon::p1()),
            geo::Geometry::MultiPolygon(multipolygon::mp1()),
            geo::Geometry::GeometryCollection(geometrycollection::gc0()),
        ] {
            let geometry = geometry_from_geo(&fixture, &arena);
            assert_eq!(geometry_to_geo(&geometry).unwrap(), fixture);
        }
    }
}
