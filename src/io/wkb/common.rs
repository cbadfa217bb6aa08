use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::datatypes::{Dimension, GeometryType};

/// ISO WKB geometry type codes.
///
/// The thousands digit selects the vertex layout: none for XY, 1 for Z, 2 for M, 3 for ZM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    PointZ = 1001,
    LineStringZ = 1002,
    PolygonZ = 1003,
    MultiPointZ = 1004,
    MultiLineStringZ = 1005,
    MultiPolygonZ = 1006,
    GeometryCollectionZ = 1007,
    PointM = 2001,
    LineStringM = 2002,
    PolygonM = 2003,
    MultiPointM = 2004,
    MultiLineStringM = 2005,
    MultiPolygonM = 2006,
    GeometryCollectionM = 2007,
    PointZM = 3001,
    LineStringZM = 3002,
    PolygonZM = 3003,
    MultiPointZM = 3004,
    MultiLineStringZM = 3005,
    MultiPolygonZM = 3006,
    GeometryCollectionZM = 3007,
}

impl WKBType {
    pub fn geometry_type(&self) -> GeometryType {
        match u32::from(*self) % 1000 {
            1 => GeometryType::Point,
            2 => GeometryType::LineString,
            3 => GeometryType::Polygon,
            4 => GeometryType::MultiPoint,
            5 => GeometryType::MultiLineString,
            6 => GeometryType::MultiPolygon,
            7 => GeometryType::GeometryCollection,
            _ => unreachable!("every WKB type code has a base kind between 1 and 7"),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match u32::from(*self) / 1000 {
            0 => Dimension::XY,
            1 => Dimension::XYZ,
            2 => Dimension::XYM,
            _ => Dimension::XYZM,
        }
    }
}

/// The ISO WKB type code for a node kind and vertex layout.
pub(crate) fn wkb_type_code(geometry_type: GeometryType, dim: Dimension) -> u32 {
    let base = u8::from(geometry_type) as u32 + 1;
    let offset = match dim {
        Dimension::XY => 0,
        Dimension::XYZ => 1000,
        Dimension::XYM => 2000,
        Dimension::XYZM => 3000,
    };
    base + offset
}

/// The byte order tag that opens every WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Endianness {
    /// XDR
    BigEndian = 0,
    /// NDR
    LittleEndian = 1,
}
