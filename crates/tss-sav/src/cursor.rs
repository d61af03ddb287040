//! Bounds-checked cursor over an in-memory system file.

use crate::error::{Result, SavError};

/// Sequential reader over a borrowed byte buffer.
///
/// The cursor never copies the buffer and never performs an unchecked read.
/// Readers that need to look ahead record [`position`](Self::position) and
/// restore it with [`seek`](Self::seek).
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Total buffer length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes left after the current offset.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Whether the offset sits at the end of the buffer.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.offset == self.bytes.len()
    }

    /// Move to an absolute position in `0..=len`.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.bytes.len() {
            return Err(SavError::SeekOutOfBounds {
                position,
                len: self.bytes.len(),
            });
        }
        self.offset = position;
        Ok(())
    }

    /// Step back `count` bytes.
    pub fn rewind(&mut self, count: usize) -> Result<()> {
        let position = self
            .offset
            .checked_sub(count)
            .ok_or(SavError::RewindOutOfBounds {
                offset: self.offset,
                count,
            })?;
        self.seek(position)
    }

    /// Consume the next `size` bytes.
    pub fn take(&mut self, size: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(SavError::UnexpectedEof {
                offset: self.offset,
                requested: size,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += size;
        Ok(&self.bytes[start..start + size])
    }

    /// Consume the next `N` bytes as a fixed-size array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a little-endian `i32`.
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Read a little-endian `f64`.
    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }
}

impl<'a> From<&'a [u8]> for ByteCursor<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteCursor::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_advances() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.take(3).unwrap(), &[3, 4, 5]);
        assert!(cursor.exhausted());
    }

    #[test]
    fn test_take_past_end_fails() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        cursor.take(3).unwrap();
        let err = cursor.take(2).unwrap_err();
        assert!(matches!(
            err,
            SavError::UnexpectedEof {
                offset: 3,
                requested: 2,
                remaining: 1
            }
        ));
        // A failed take leaves the offset untouched.
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_seek_bounds() {
        let data = [0u8; 8];
        let mut cursor = ByteCursor::new(&data);
        cursor.seek(8).unwrap();
        assert!(cursor.exhausted());
        assert!(matches!(
            cursor.seek(9),
            Err(SavError::SeekOutOfBounds {
                position: 9,
                len: 8
            })
        ));
        cursor.seek(0).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_rewind() {
        let data = [0u8; 8];
        let mut cursor = ByteCursor::new(&data);
        cursor.take(6).unwrap();
        cursor.rewind(4).unwrap();
        assert_eq!(cursor.position(), 2);
        let err = cursor.rewind(3).unwrap_err();
        assert!(matches!(
            err,
            SavError::RewindOutOfBounds {
                offset: 2,
                count: 3
            }
        ));
        assert!(err.to_string().contains("3 bytes back from offset 2"));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_typed_reads() {
        let mut data = Vec::new();
        data.extend_from_slice(&(-7i32).to_le_bytes());
        data.extend_from_slice(&2.5f64.to_le_bytes());
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_i32_le().unwrap(), -7);
        assert_eq!(cursor.read_f64_le().unwrap(), 2.5);
        assert!(cursor.read_i32_le().is_err());
    }
}
