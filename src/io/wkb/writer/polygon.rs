use std::io::Write;

use byteorder::{BigEndian, LittleEndian};

use crate::datatypes::GeometryType;
use crate::error::Result;
use crate::geometry::Polygon;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::writer::{
    write_count, write_header, write_ordinates, WkbByteOrder, HEADER_SIZE,
};
use crate::trait_::{GeometryNode, MultiPartGeometry, SinglePartGeometry};

/// The byte length of a WKBPolygon
pub fn polygon_wkb_size(geom: &Polygon<'_>) -> usize {
    let rings: usize = geom.rings().iter().map(|ring| 4 + ring.byte_size()).sum();
    HEADER_SIZE + 4 + rings
}

/// Write a Polygon geometry to a Writer encoded as WKB
pub fn write_polygon_as_wkb<W: Write>(
    mut writer: W,
    geom: &Polygon<'_>,
    endianness: Endianness,
) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_polygon::<W, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_polygon::<W, LittleEndian>(&mut writer, geom),
    }
}

pub(super) fn write_polygon<W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geom: &Polygon<'_>,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::Polygon, geom.dimension())?;
    write_count::<W, B>(writer, geom.part_count())?;
    for ring in geom.rings() {
        write_count::<W, B>(writer, ring.vertex_count())?;
        write_ordinates::<W, B>(writer, ring.vertices())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;
    use geozero::{CoordDimensions, ToWkb};

    use super::*;
    use crate::io::geo::polygon_from_geo;
    use crate::test::polygon::{p0, p1};

    #[test]
    fn matches_geozero() {
        let arena = Bump::new();
        for fixture in [p0(), p1()] {
            let polygon = polygon_from_geo(&fixture, &arena);
            let mut buf = vec![];
            write_polygon_as_wkb(&mut buf, &polygon, Endianness::LittleEndian).unwrap();

            let expected = geo::Geometry::Polygon(fixture)
                .to_wkb(CoordDimensions::xy())
                .unwrap();
            assert_eq!(buf, expected);
            assert_eq!(buf.len(), polygon_wkb_size(&polygon));
        }
    }
}
