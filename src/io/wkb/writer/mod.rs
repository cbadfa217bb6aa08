//! Encode geometries as ISO WKB.
//!
//! Z, M and ZM layouts are written with the ISO type codes (`1000 +`, `2000 +`, `3000 +`). An
//! empty point is written with NaN ordinates.

mod geometry;
mod geometrycollection;
mod linestring;
mod point;
mod polygon;

pub use geometry::{geometry_wkb_size, write_geometry_as_wkb};
pub use geometrycollection::{collection_wkb_size, write_collection_as_wkb};
pub use linestring::{line_string_wkb_size, write_line_string_as_wkb};
pub use point::{point_wkb_size, write_point_as_wkb};
pub use polygon::{polygon_wkb_size, write_polygon_as_wkb};

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoCellError, Result};
use crate::io::wkb::common::{wkb_type_code, Endianness};
use crate::vertex::VertexArray;

/// Byte order tag plus type code.
pub(crate) const HEADER_SIZE: usize = 1 + 4;

/// A byteorder marker that knows its own WKB tag.
pub(crate) trait WkbByteOrder: ByteOrder {
    const ENDIANNESS: Endianness;
}

impl WkbByteOrder for BigEndian {
    const ENDIANNESS: Endianness = Endianness::BigEndian;
}

impl WkbByteOrder for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::LittleEndian;
}

fn write_header<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geometry_type: GeometryType,
    dim: Dimension,
) -> Result<()> {
    writer.write_u8(B::ENDIANNESS.into())?;
    writer.write_u32::<B>(wkb_type_code(geometry_type, dim))?;
    Ok(())
}

fn write_count<W: Write, B: WkbByteOrder>(writer: &mut W, count: usize) -> Result<()> {
    let count: u32 = count.try_into().map_err(|_| GeoCellError::Overflow)?;
    writer.write_u32::<B>(count)?;
    Ok(())
}

/// Re-encode the little-endian stored ordinates in the target byte order.
fn write_ordinates<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    vertices: &VertexArray<'_>,
) -> Result<()> {
    for ordinate in vertices.as_bytes().chunks_exact(8) {
        writer.write_f64::<B>(LittleEndian::read_f64(ordinate))?;
    }
    Ok(())
}
