use std::io::Write;

use byteorder::{BigEndian, LittleEndian};

use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::writer::geometrycollection::{collection_wkb_size, write_collection};
use crate::io::wkb::writer::linestring::{line_string_wkb_size, write_line_string};
use crate::io::wkb::writer::point::{point_wkb_size, write_point};
use crate::io::wkb::writer::polygon::{polygon_wkb_size, write_polygon};
use crate::io::wkb::writer::WkbByteOrder;

/// The byte length of a Geometry
pub fn geometry_wkb_size(geom: &Geometry<'_>) -> usize {
    match geom {
        Geometry::Point(g) => point_wkb_size(g),
        Geometry::LineString(g) => line_string_wkb_size(g),
        Geometry::Polygon(g) => polygon_wkb_size(g),
        Geometry::MultiPoint(g) => collection_wkb_size(g),
        Geometry::MultiLineString(g) => collection_wkb_size(g),
        Geometry::MultiPolygon(g) => collection_wkb_size(g),
        Geometry::GeometryCollection(g) => collection_wkb_size(g),
    }
}

/// Write a Geometry to a Writer encoded as WKB
pub fn write_geometry_as_wkb<W: Write>(
    mut writer: W,
    geom: &Geometry<'_>,
    endianness: Endianness,
) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_geometry::<W, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_geometry::<W, LittleEndian>(&mut writer, geom),
    }
}

pub(super) fn write_geometry<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geom: &Geometry<'_>,
) -> Result<()> {
    match geom {
        Geometry::Point(g) => write_point::<W, B>(writer, g),
        Geometry::LineString(g) => write_line_string::<W, B>(writer, g),
        Geometry::Polygon(g) => write_polygon::<W, B>(writer, g),
        Geometry::MultiPoint(g) => write_collection::<W, B>(writer, g),
        Geometry::MultiLineString(g) => write_collection::<W, B>(writer, g),
        Geometry::MultiPolygon(g) => write_collection::<W, B>(writer, g),
        Geometry::GeometryCollection(g) => write_collection::<W, B>(writer, g),
    }
}
