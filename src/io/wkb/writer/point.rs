use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::datatypes::GeometryType;
use crate::error::Result;
use crate::geometry::Point;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::writer::{write_header, write_ordinates, WkbByteOrder, HEADER_SIZE};
use crate::trait_::{GeometryNode, SinglePartGeometry};

/// The byte length of a WKBPoint
pub fn point_wkb_size(geom: &Point<'_>) -> usize {
    HEADER_SIZE + geom.dimension().vertex_size()
}

/// Write a Point geometry to a Writer encoded as WKB
pub fn write_point_as_wkb<W: Write>(
    mut writer: W,
    geom: &Point<'_>,
    endianness: Endianness,
) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_point::<W, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_point::<W, LittleEndian>(&mut writer, geom),
    }
}

pub(super) fn write_point<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geom: &Point<'_>,
) -> Result<()> {
    let dim = geom.dimension();
    write_header::<W, B>(writer, GeometryType::Point, dim)?;

    if geom.is_empty() {
        for _ in 0..dim.size() {
            writer.write_f64::<B>(f64::NAN)?;
        }
        return Ok(());
    }

    // a point holds exactly one vertex on the wire
    write_ordinates::<W, B>(writer, &geom.vertices().slice(0, 1))
}
