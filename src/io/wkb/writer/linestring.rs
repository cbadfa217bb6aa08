use std::io::Write;

use byteorder::{BigEndian, LittleEndian};

use crate::datatypes::GeometryType;
use crate::error::Result;
use crate::geometry::LineString;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::writer::{
    write_count, write_header, write_ordinates, WkbByteOrder, HEADER_SIZE,
};
use crate::trait_::{GeometryNode, SinglePartGeometry};

/// The byte length of a WKBLineString
pub fn line_string_wkb_size(geom: &LineString<'_>) -> usize {
    HEADER_SIZE + 4 + geom.byte_size()
}

/// Write a LineString geometry to a Writer encoded as WKB
pub fn write_line_string_as_wkb<W: Write>(
    mut writer: W,
    geom: &LineString<'_>,
    endianness: Endianness,
) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_line_string::<W, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_line_string::<W, LittleEndian>(&mut writer, geom),
    }
}

pub(super) fn write_line_string<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geom: &LineString<'_>,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::LineString, geom.dimension())?;
    write_count::<W, B>(writer, geom.vertex_count())?;
    write_ordinates::<W, B>(writer, geom.vertices())
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;
    use geozero::{CoordDimensions, ToWkb};

    use super::*;
    use crate::io::geo::line_string_from_geo;
    use crate::test::linestring::{ls0, ls1};

    #[test]
    fn matches_geozero() {
        let arena = Bump::new();
        for fixture in [ls0(), ls1()] {
            let line = line_string_from_geo(&fixture, &arena);
            let mut buf = vec![];
            write_line_string_as_wkb(&mut buf, &line, Endianness::LittleEndian).unwrap();

            let expected = geo::Geometry::LineString(fixture)
                .to_wkb(CoordDimensions::xy())
                .unwrap();
            assert_eq!(buf, expected);
            assert_eq!(buf.len(), line_string_wkb_size(&line));
        }
    }
}
