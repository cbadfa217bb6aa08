use std::io::Cursor;

use byteorder::{ByteOrder, ReadBytesExt};

use crate::error::{GeoCellError, Result};

/// A read cursor that checks every read against the end of the buffer.
///
/// Short reads are reported as [`GeoCellError::Decode`] carrying the position at which the
/// read was attempted.
pub(crate) struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(buf),
        }
    }

    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Fail unless `size` more bytes can be read.
    pub fn ensure(&self, size: usize, what: &str) -> Result<()> {
        if size > self.remaining() {
            return Err(GeoCellError::decode(
                self.position(),
                format!(
                    "{what} needs {size} bytes but only {} remain",
                    self.remaining()
                ),
            ));
        }
        Ok(())
    }

    /// Fail unless `count` items of at least `item_size` bytes each could still follow.
    pub fn ensure_count(&self, count: usize, item_size: usize, what: &str) -> Result<()> {
        match count.checked_mul(item_size) {
            Some(size) => self.ensure(size, what),
            None => Err(GeoCellError::decode(
                self.position(),
                format!("{what} count {count} is too large"),
            )),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1, "byte")?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32> {
        self.ensure(4, "u32")?;
        Ok(self.inner.read_u32::<B>()?)
    }

    pub fn read_f64<B: ByteOrder>(&mut self) -> Result<f64> {
        self.ensure(8, "f64")?;
        Ok(self.inner.read_f64::<B>()?)
    }

    /// Borrow the next `size` bytes without copying them.
    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8]> {
        self.ensure(size, "slice")?;
        let start = self.position();
        let buf: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + size) as u64);
        Ok(&buf[start..start + size])
    }
}
