use std::io::Write;

use byteorder::{BigEndian, LittleEndian};

use crate::error::Result;
use crate::io::wkb::common::Endianness;
use crate::io::wkb::writer::geometry::{geometry_wkb_size, write_geometry};
use crate::io::wkb::writer::{write_count, write_header, WkbByteOrder, HEADER_SIZE};
use crate::trait_::CollectionGeometry;

/// The byte length of a WKB MultiPoint, MultiLineString, MultiPolygon or GeometryCollection
pub fn collection_wkb_size<'a>(geom: &impl CollectionGeometry<'a>) -> usize {
    let elements: usize = (0..geom.part_count())
        .filter_map(|i| geom.geometry(i))
        .map(|element| geometry_wkb_size(&element))
        .sum();
    HEADER_SIZE + 4 + elements
}

/// Write a MultiPoint, MultiLineString, MultiPolygon or GeometryCollection to a Writer
/// encoded as WKB
pub fn write_collection_as_wkb<'a, W: Write>(
    mut writer: W,
    geom: &impl CollectionGeometry<'a>,
    endianness: Endianness,
) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_collection::<W, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_collection::<W, LittleEndian>(&mut writer, geom),
    }
}

pub(super) fn write_collection<'a, W: Write, B: WkbByteOrder>(
    writer: &mut W,
    geom: &impl CollectionGeometry<'a>,
) -> Result<()> {
    write_header::<W, B>(writer, geom.geometry_type(), geom.dimension())?;
    write_count::<W, B>(writer, geom.part_count())?;
    for element in (0..geom.part_count()).filter_map(|i| geom.geometry(i)) {
        write_geometry::<W, B>(writer, &element)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use bumpalo::Bump;
    use geozero::{CoordDimensions, ToWkb};

    use super::*;
    use crate::io::geo::geometry_from_geo;
    use crate::test::{geometrycollection, multilinestring, multipoint, multipolygon};

    fn assert_matches_geozero(fixture: geo::Geometry) {
        let arena = Bump::new();
        let geometry = geometry_from_geo(&fixture, &arena);
        let mut buf = vec![];
        match &geometry {
            crate::geometry::Geometry::MultiPoint(g) => {
                write_collection_as_wkb(&mut buf, g, Endianness::LittleEndian)
            }
            crate::geometry::Geometry::MultiLineString(g) => {
                write_collection_as_wkb(&mut buf, g, Endianness::LittleEndian)
            }
            crate::geometry::Geometry::MultiPolygon(g) => {
                write_collection_as_wkb(&mut buf, g, Endianness::LittleEndian)
            }
            crate::geometry::Geometry::GeometryCollection(g) => {
                write_collection_as_wkb(&mut buf, g, Endianness::LittleEndian)
            }
            _ => unreachable!(),
        }
        .unwrap();

        let expected = fixture.to_wkb(CoordDimensions::xy()).unwrap();
        assert_eq!(buf, expected);
        assert_eq!(buf.len(), geometry_wkb_size(&geometry));
    }

    #[test]
    fn matches_geozero() {
        assert_matches_geozero(geo::Geometry::MultiPoint(multipoint::mp0()));
        assert_matches_geozero(geo::Geometry::MultiLineString(multilinestring::ml1()));
        assert_matches_geozero(geo::Geometry::MultiPolygon(multipolygon::mp1()));
        assert_matches_geozero(geo::Geometry::GeometryCollection(
            geometrycollection::gc0(),
        ));
    }
}
