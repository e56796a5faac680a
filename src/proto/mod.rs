pub mod messages;
mod writer;

use crate::error::{Error, Result};

pub use writer::{WriteBuffer, DEFAULT_INCREMENT};

const LEN_PREFIX: usize = 4;

pub trait Encode {
    /// Message type byte, `None` for startup-phase messages which carry no tag.
    fn tag(&self) -> Option<u8>;

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()>;
}

/// Value of the length field for a body of `body_len` bytes.
fn frame_len(body_len: usize) -> Result<i32> {
    body_len
        .checked_add(LEN_PREFIX)
        .and_then(|len| i32::try_from(len).ok())
        .ok_or(Error::MessageTooLarge(body_len))
}

/// Encodes `msg` as a complete frame: optional tag, i32 length (which counts
/// itself but not the tag) and body.
pub fn frame<T: Encode + ?Sized>(msg: &T, increment: usize) -> Result<Vec<u8>> {
    let mut body = WriteBuffer::with_increment(increment)?;
    msg.encode_body(&mut body)?;

    let len = frame_len(body.byte_len())?;

    let mut out = WriteBuffer::with_increment(increment)?;
    if let Some(tag) = msg.tag() {
        out.write_byte(tag);
    }
    out.write_i32(len).append(body.finalize());

    log::debug!(
        "framed message {:?} with {} byte body",
        msg.tag().map(char::from),
        body.byte_len()
    );

    Ok(out.into_bytes())
}
