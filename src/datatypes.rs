//! Geometry kinds and vertex layouts.

use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The kind of a geometry node.
///
/// The discriminant is the kind tag stored in the first byte of a serialized geometry, and
/// follows the order reported by `ST_GeometryType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    Point = 0,
    LineString = 1,
    Polygon = 2,
    MultiPoint = 3,
    MultiLineString = 4,
    MultiPolygon = 5,
    GeometryCollection = 6,
}

impl GeometryType {
    /// Point and LineString: backed directly by a vertex buffer.
    pub fn is_single_part(&self) -> bool {
        matches!(self, GeometryType::Point | GeometryType::LineString)
    }

    /// Polygon: backed by an array of rings.
    pub fn is_multi_part(&self) -> bool {
        matches!(self, GeometryType::Polygon)
    }

    /// The multi kinds and GeometryCollection: backed by an array of full geometry nodes.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLineString
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }

    /// The WKT keyword for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The vertex layout of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl Dimension {
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }

    /// Returns the number of coordinates per vertex.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM => 3,
            Dimension::XYZM => 4,
        }
    }

    /// Returns the number of bytes per vertex.
    pub fn vertex_size(&self) -> usize {
        self.size() * std::mem::size_of::<f64>()
    }

    /// The WKT dimension tag, including its leading space, or an empty string for XY.
    pub(crate) fn wkt_tag(&self) -> &'static str {
        match self {
            Dimension::XY => "",
            Dimension::XYZ => " Z",
            Dimension::XYM => " M",
            Dimension::XYZM => " ZM",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
            Dimension::XYM => write!(f, "XYM"),
            Dimension::XYZM => write!(f, "XYZM"),
        }
    }
}
