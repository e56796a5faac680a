use std::io;

use crate::error::{Error, Result};

pub const DEFAULT_INCREMENT: usize = 1024;

/// Growable big-endian write buffer used to build protocol messages.
///
/// Storage grows by whole multiples of the capacity increment whenever a
/// write would not fit. Growth is linear rather than doubling, which keeps
/// allocations tight for the small messages this is used for but makes a
/// long run of appends cost O(n^2 / increment) in copying.
#[derive(Debug, Clone)]
pub struct WriteBuffer {
    storage: Vec<u8>,
    len: usize,
    increment: usize,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Self {
            storage: vec![0; DEFAULT_INCREMENT],
            len: 0,
            increment: DEFAULT_INCREMENT,
        }
    }

    /// Creates a buffer whose initial capacity and growth step are both `increment`.
    ///
    /// A zero increment is rejected since the buffer could never grow.
    pub fn with_increment(increment: usize) -> Result<Self> {
        if increment == 0 {
            return Err(Error::InvalidConfig(
                "capacity increment must be positive".to_string(),
            ));
        }

        Ok(Self {
            storage: vec![0; increment],
            len: 0,
            increment,
        })
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.storage.len() - self.len
    }

    fn ensure_capacity(&mut self, additional: usize) {
        if self.remaining() >= additional {
            return;
        }

        let needed = self.len + additional;
        let steps = (needed + self.increment - 1) / self.increment;
        let new_size = steps * self.increment;

        log::trace!(
            "growing write buffer from {} to {} bytes ({} written, {} requested)",
            self.storage.len(),
            new_size,
            self.len,
            additional
        );

        self.storage.resize(new_size, 0);
    }

    // Callers must have reserved `bytes.len()` beforehand.
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        self.storage[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }

    pub fn write_byte(&mut self, byte: u8) -> &mut Self {
        self.ensure_capacity(1);
        self.put(&[byte]);
        self
    }

    /// Writes a single character as exactly one byte.
    ///
    /// Characters outside ASCII do not fit; only the first byte of their
    /// UTF-8 encoding is written.
    pub fn write_char(&mut self, ch: char) -> &mut Self {
        let mut encoded = [0; 4];
        let encoded = ch.encode_utf8(&mut encoded);

        if encoded.len() > 1 {
            log::warn!("truncating multi-byte char {:?} to a single byte", ch);
        }

        self.write_byte(encoded.as_bytes()[0])
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.ensure_capacity(2);
        self.put(&value.to_be_bytes());
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_i16(value as i16)
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.ensure_capacity(4);
        self.put(&value.to_be_bytes());
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_i32(value as i32)
    }

    /// Writes `s` followed by a null terminator.
    ///
    /// `s` is written verbatim, so an embedded `\0` ends the string early for
    /// whoever parses it.
    pub fn write_cstr(&mut self, s: &str) -> &mut Self {
        let byte_len = s.len() + 1;
        self.ensure_capacity(byte_len);
        self.put(s.as_bytes());
        self.put(&[0]);
        self
    }

    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.ensure_capacity(bytes.len());
        self.put(bytes);
        self
    }

    /// Returns the bytes written so far.
    ///
    /// The buffer stays usable afterwards; nothing is drained.
    #[inline]
    pub fn finalize(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.finalize().to_vec()
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.storage.truncate(self.len);
        self.storage
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn increment(&self) -> usize {
        self.increment
    }
}

impl Default for WriteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
