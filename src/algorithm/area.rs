use crate::geometry::{
    extract_polygons, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::trait_::SinglePartGeometry;
use crate::vertex::VertexArray;

/// Signed and unsigned planar area of a geometry.
///
/// A counter-clockwise shell has positive signed area. Holes are subtracted from the shell.
/// Polygons are measured at any collection depth; other kinds have no area.
///
/// # Examples
///
/// ```
/// use bumpalo::Bump;
/// use geocell::algorithm::Area;
/// use geocell::datatypes::Dimension;
/// use geocell::geometry::{LineString, Polygon};
/// use geocell::trait_::MultiPartGeometry;
/// use geocell::vertex::VertexXY;
///
/// let arena = Bump::new();
/// let mut shell = vec![
///     VertexXY::new(0., 0.),
///     VertexXY::new(5., 0.),
///     VertexXY::new(5., 6.),
///     VertexXY::new(0., 6.),
///     VertexXY::new(0., 0.),
/// ];
/// let mut polygon = Polygon::with_capacity_in(&arena, 1, Dimension::XY);
/// polygon.push_part(&arena, LineString::from_vertices(&arena, &shell));
///
/// shell.reverse();
/// let mut reversed_polygon = Polygon::with_capacity_in(&arena, 1, Dimension::XY);
/// reversed_polygon.push_part(&arena, LineString::from_vertices(&arena, &shell));
///
/// assert_eq!(polygon.signed_area(), 30.);
/// assert_eq!(polygon.unsigned_area(), 30.);
///
/// assert_eq!(reversed_polygon.signed_area(), -30.);
/// assert_eq!(reversed_polygon.unsigned_area(), 30.);
/// ```
pub trait Area {
    fn signed_area(&self) -> f64;

    fn unsigned_area(&self) -> f64;
}

/// Shoelace formula, relative to the first vertex to limit cancellation. An open ring is
/// treated as closed.
fn ring_signed_area(ring: &VertexArray<'_>) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let origin = ring.get(0);
    let mut twice_area = 0.0;
    let mut previous = origin;
    for vertex in ring.iter().skip(1).chain(std::iter::once(origin)) {
        let (x0, y0) = (previous.x - origin.x, previous.y - origin.y);
        let (x1, y1) = (vertex.x - origin.x, vertex.y - origin.y);
        twice_area += x0 * y1 - x1 * y0;
        previous = vertex;
    }
    twice_area / 2.0
}

/// Implementation where the result is zero.
macro_rules! zero_impl {
    ($type:ident) => {
        impl Area for $type<'_> {
            fn signed_area(&self) -> f64 {
                0.0
            }

            fn unsigned_area(&self) -> f64 {
                0.0
            }
        }
    };
}

zero_impl!(Point);
zero_impl!(LineString);
zero_impl!(MultiPoint);
zero_impl!(MultiLineString);

impl Area for Polygon<'_> {
    fn signed_area(&self) -> f64 {
        let Some(shell) = self.shell() else {
            return 0.0;
        };
        let area = ring_signed_area(shell.vertices());
        let holes: f64 = self
            .holes()
            .iter()
            .map(|hole| ring_signed_area(hole.vertices()).abs())
            .sum();
        if area >= 0.0 {
            area - holes
        } else {
            area + holes
        }
    }

    fn unsigned_area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl Area for MultiPolygon<'_> {
    fn signed_area(&self) -> f64 {
        self.polygons().iter().map(Area::signed_area).sum()
    }

    fn unsigned_area(&self) -> f64 {
        self.polygons().iter().map(Area::unsigned_area).sum()
    }
}

impl Area for GeometryCollection<'_> {
    fn signed_area(&self) -> f64 {
        self.geometries().iter().map(Area::signed_area).sum()
    }

    fn unsigned_area(&self) -> f64 {
        self.geometries().iter().map(Area::unsigned_area).sum()
    }
}

impl Area for Geometry<'_> {
    fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        extract_polygons(self, |polygon| area += polygon.signed_area());
        area
    }

    fn unsigned_area(&self) -> f64 {
        let mut area = 0.0;
        extract_polygons(self, |polygon| area += polygon.unsigned_area());
        area
    }
}
