//! Bounded cursor for reading typed values from a module image.
use types::{Config, Error, MalformedReason, Result};

pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn ensure(&self, bytes: usize) -> Result<()> {
        let remaining = self.remaining();
        if bytes > remaining {
            return Err(Error::malformed(
                self.offset,
                MalformedReason::Truncated {
                    needed: bytes,
                    remaining,
                },
            ));
        }
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..start + len])
    }

    /// Peek at the upcoming bytes without advancing the cursor.
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        Ok(&self.data[self.offset..self.offset + len])
    }

    fn read_word(&mut self) -> Result<[u8; Config::INT_SIZE]> {
        let mut word = [0u8; Config::INT_SIZE];
        word.copy_from_slice(self.read_bytes(Config::INT_SIZE)?);
        Ok(word)
    }

    /// Image integers are stored in host byte order.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_ne_bytes(self.read_word()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_ne_bytes(self.read_word()?))
    }

    /// Reads a signed length or count field and rejects negative values and
    /// values above `limit`. Errors point at the field itself.
    pub fn read_len(&mut self, what: &'static str, limit: usize) -> Result<usize> {
        let at = self.offset;
        let raw = self.read_i32()?;
        if raw < 0 {
            return Err(Error::malformed(
                at,
                MalformedReason::Negative { what, value: raw },
            ));
        }
        let value = raw as usize;
        if value > limit {
            return Err(Error::malformed(
                at,
                MalformedReason::LimitExceeded { what, value, limit },
            ));
        }
        Ok(value)
    }
}
