use crate::geometry::{
    extract_lines, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::trait_::SinglePartGeometry;

pub trait EuclideanLength {
    /// Planar length of the line strings in a geometry.
    ///
    /// Line strings are measured at any collection depth. Points and polygons have no length;
    /// polygon rings are not counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use bumpalo::Bump;
    /// use geocell::algorithm::EuclideanLength;
    /// use geocell::geometry::LineString;
    /// use geocell::vertex::VertexXY;
    ///
    /// let arena = Bump::new();
    /// let line_string = LineString::from_vertices(
    ///     &arena,
    ///     &[VertexXY::new(40.02, 116.34), VertexXY::new(42.02, 116.34)],
    /// );
    ///
    /// assert_eq!(line_string.euclidean_length(), 2.);
    /// ```
    fn euclidean_length(&self) -> f64;
}

/// Implementation where the result is zero.
macro_rules! zero_impl {
    ($type:ident) => {
        impl EuclideanLength for $type<'_> {
            fn euclidean_length(&self) -> f64 {
                0.0
            }
        }
    };
}

zero_impl!(Point);
zero_impl!(MultiPoint);
zero_impl!(Polygon);
zero_impl!(MultiPolygon);

impl EuclideanLength for LineString<'_> {
    fn euclidean_length(&self) -> f64 {
        self.length()
    }
}

impl EuclideanLength for MultiLineString<'_> {
    fn euclidean_length(&self) -> f64 {
        self.length()
    }
}

impl EuclideanLength for GeometryCollection<'_> {
    fn euclidean_length(&self) -> f64 {
        self.geometries().iter().map(|g| g.euclidean_length()).sum()
    }
}

impl EuclideanLength for Geometry<'_> {
    fn euclidean_length(&self) -> f64 {
        let mut length = 0.0;
        extract_lines(self, |line| length += line.length());
        length
    }
}
