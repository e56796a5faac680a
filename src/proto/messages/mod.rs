mod backend;
mod frontend;

pub use backend::*;
pub use frontend::*;

use crate::error::{Error, Result};
use crate::proto::WriteBuffer;

// Peers read a string field up to its first NUL, so an embedded one would
// desync the rest of the message from its length prefix.
fn write_cstr(buf: &mut WriteBuffer, field: &str, value: &[u8]) -> Result<()> {
    if value.contains(&0) {
        return Err(Error::InvalidMessage(format!(
            "{} contains a NUL byte",
            field
        )));
    }

    buf.append(value).write_byte(0);
    Ok(())
}
