//! Plain vertex records and the copy-on-write [`VertexArray`].
//!
//! Vertices are stored as consecutive little-endian f64 values, two to four per vertex
//! depending on the [`Dimension`]. A vertex therefore has no alignment requirement, and a
//! buffer can be borrowed straight out of a serialized geometry.

mod array;

pub use array::VertexArray;

use byteorder::{ByteOrder, LittleEndian};

use crate::datatypes::Dimension;

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// A fixed vertex layout.
pub trait Vertex: Copy + std::fmt::Debug + PartialEq {
    const HAS_Z: bool;
    const HAS_M: bool;
    const DIMENSION: Dimension;

    fn x(&self) -> f64;
    fn y(&self) -> f64;

    fn z(&self) -> Option<f64> {
        None
    }

    fn m(&self) -> Option<f64> {
        None
    }

    /// Decode from exactly `DIMENSION.vertex_size()` bytes.
    fn read(bytes: &[u8]) -> Self;

    /// Encode into exactly `DIMENSION.vertex_size()` bytes.
    fn write(&self, bytes: &mut [u8]);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexXY {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexXYZ {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexXYM {
    pub x: f64,
    pub y: f64,
    pub m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexXYZM {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl VertexXY {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl VertexXYZ {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl VertexXYM {
    pub fn new(x: f64, y: f64, m: f64) -> Self {
        Self { x, y, m }
    }
}

impl VertexXYZM {
    pub fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// Decode a vertex of any layout, filling absent ordinates with the given defaults.
    pub(crate) fn read_widened(
        bytes: &[u8],
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Self {
        let x = LittleEndian::read_f64(&bytes[0..F64_SIZE]);
        let y = LittleEndian::read_f64(&bytes[F64_SIZE..2 * F64_SIZE]);
        let third = || LittleEndian::read_f64(&bytes[2 * F64_SIZE..3 * F64_SIZE]);
        match dim {
            Dimension::XY => Self::new(x, y, default_z, default_m),
            Dimension::XYZ => Self::new(x, y, third(), default_m),
            Dimension::XYM => Self::new(x, y, default_z, third()),
            Dimension::XYZM => Self::new(
                x,
                y,
                third(),
                LittleEndian::read_f64(&bytes[3 * F64_SIZE..4 * F64_SIZE]),
            ),
        }
    }

    /// Encode into the given layout, dropping the ordinates it does not carry.
    pub(crate) fn write_narrowed(&self, bytes: &mut [u8], dim: Dimension) {
        LittleEndian::write_f64(&mut bytes[0..F64_SIZE], self.x);
        LittleEndian::write_f64(&mut bytes[F64_SIZE..2 * F64_SIZE], self.y);
        match dim {
            Dimension::XY => {}
            Dimension::XYZ => LittleEndian::write_f64(&mut bytes[2 * F64_SIZE..], self.z),
            Dimension::XYM => LittleEndian::write_f64(&mut bytes[2 * F64_SIZE..], self.m),
            Dimension::XYZM => {
                LittleEndian::write_f64(&mut bytes[2 * F64_SIZE..3 * F64_SIZE], self.z);
                LittleEndian::write_f64(&mut bytes[3 * F64_SIZE..], self.m);
            }
        }
    }
}

fn read_ordinates<const N: usize>(bytes: &[u8]) -> [f64; N] {
    let mut out = [0.0; N];
    LittleEndian::read_f64_into(&bytes[..N * F64_SIZE], &mut out);
    out
}

fn write_ordinates(bytes: &mut [u8], ordinates: &[f64]) {
    LittleEndian::write_f64_into(ordinates, &mut bytes[..ordinates.len() * F64_SIZE]);
}

impl Vertex for VertexXY {
    const HAS_Z: bool = false;
    const HAS_M: bool = false;
    const DIMENSION: Dimension = Dimension::XY;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn read(bytes: &[u8]) -> Self {
        let [x, y] = read_ordinates(bytes);
        Self { x, y }
    }

    fn write(&self, bytes: &mut [u8]) {
        write_ordinates(bytes, &[self.x, self.y]);
    }
}

impl Vertex for VertexXYZ {
    const HAS_Z: bool = true;
    const HAS_M: bool = false;
    const DIMENSION: Dimension = Dimension::XYZ;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> Option<f64> {
        Some(self.z)
    }

    fn read(bytes: &[u8]) -> Self {
        let [x, y, z] = read_ordinates(bytes);
        Self { x, y, z }
    }

    fn write(&self, bytes: &mut [u8]) {
        write_ordinates(bytes, &[self.x, self.y, self.z]);
    }
}

impl Vertex for VertexXYM {
    const HAS_Z: bool = false;
    const HAS_M: bool = true;
    const DIMENSION: Dimension = Dimension::XYM;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn m(&self) -> Option<f64> {
        Some(self.m)
    }

    fn read(bytes: &[u8]) -> Self {
        let [x, y, m] = read_ordinates(bytes);
        Self { x, y, m }
    }

    fn write(&self, bytes: &mut [u8]) {
        write_ordinates(bytes, &[self.x, self.y, self.m]);
    }
}

impl Vertex for VertexXYZM {
    const HAS_Z: bool = true;
    const HAS_M: bool = true;
    const DIMENSION: Dimension = Dimension::XYZM;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> Option<f64> {
        Some(self.z)
    }

    fn m(&self) -> Option<f64> {
        Some(self.m)
    }

    fn read(bytes: &[u8]) -> Self {
        let [x, y, z, m] = read_ordinates(bytes);
        Self { x, y, z, m }
    }

    fn write(&self, bytes: &mut [u8]) {
        write_ordinates(bytes, &[self.x, self.y, self.z, self.m]);
    }
}
