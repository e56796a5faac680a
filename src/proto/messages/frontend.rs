use secstr::SecStr;

use super::write_cstr;
use crate::error::{Error, Result};
use crate::proto::{Encode, WriteBuffer};

pub const PROTOCOL_VERSION: i32 = 196608;
pub const SSL_REQUEST_CODE: i32 = 80877103;

pub struct SSLRequest {}

impl Encode for SSLRequest {
    fn tag(&self) -> Option<u8> {
        None
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        buf.write_i32(SSL_REQUEST_CODE);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.0.iter()
    }
}

#[derive(Debug)]
pub struct StartupMessage {
    pub version: i32,
    pub params: Params,
}

impl StartupMessage {
    pub fn new(user: &str, database: Option<&str>) -> Self {
        let mut params = Params::new();
        params.push("user", user);

        if let Some(database) = database {
            params.push("database", database);
        }

        Self {
            version: PROTOCOL_VERSION,
            params,
        }
    }
}

impl Encode for StartupMessage {
    fn tag(&self) -> Option<u8> {
        None
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        buf.write_i32(self.version);

        for (name, value) in self.params.iter() {
            if name.is_empty() {
                return Err(Error::InvalidMessage(
                    "startup parameter name is empty".to_string(),
                ));
            }

            write_cstr(buf, "startup parameter name", name.as_bytes())?;
            write_cstr(buf, "startup parameter value", value.as_bytes())?;
        }

        // Parameter list terminator
        buf.write_byte(0);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Query {
    pub query: String,
}

impl Encode for Query {
    fn tag(&self) -> Option<u8> {
        Some(b'Q')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        write_cstr(buf, "query", self.query.as_bytes())
    }
}

pub struct PasswordMessage {
    pub password: SecStr,
}

impl PasswordMessage {
    pub fn new(password: String) -> Self {
        Self {
            password: SecStr::new(password.into_bytes()),
        }
    }
}

impl Encode for PasswordMessage {
    fn tag(&self) -> Option<u8> {
        Some(b'p')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        write_cstr(buf, "password", self.password.unsecure())
    }
}

/// Extended query protocol `Parse`: prepares `query` under `name`.
#[derive(Debug)]
pub struct Parse {
    pub name: String,
    pub query: String,
    pub param_types: Vec<u32>,
}

impl Encode for Parse {
    fn tag(&self) -> Option<u8> {
        Some(b'P')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        let count = i16::try_from(self.param_types.len())
            .map_err(|_| Error::MessageTooLarge(self.param_types.len()))?;

        write_cstr(buf, "statement name", self.name.as_bytes())?;
        write_cstr(buf, "query", self.query.as_bytes())?;
        buf.write_i16(count);

        for oid in self.param_types.iter() {
            buf.write_u32(*oid);
        }

        Ok(())
    }
}

pub struct Sync {}

impl Encode for Sync {
    fn tag(&self) -> Option<u8> {
        Some(b'S')
    }

    fn encode_body(&self, _buf: &mut WriteBuffer) -> Result<()> {
        Ok(())
    }
}

pub struct Terminate {}

impl Encode for Terminate {
    fn tag(&self) -> Option<u8> {
        Some(b'X')
    }

    fn encode_body(&self, _buf: &mut WriteBuffer) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{frame, DEFAULT_INCREMENT};

    #[test]
    fn test_ssl_request() {
        assert_eq!(
            frame(&SSLRequest {}, DEFAULT_INCREMENT).unwrap(),
            vec![0, 0, 0, 8, 0x04, 0xd2, 0x16, 0x2f]
        );
    }

    #[test]
    fn test_startup_message() {
        let bytes = frame(&StartupMessage::new("bob", Some("app")), 8).unwrap();

        let mut expected = vec![0, 0, 0, 31, 0, 3, 0, 0];
        expected.extend_from_slice(b"user\0bob\0database\0app\0\0");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_query() {
        let msg = Query {
            query: "select 1".to_string(),
        };
        let bytes = frame(&msg, DEFAULT_INCREMENT).unwrap();

        assert_eq!(&bytes[..5], &[b'Q', 0, 0, 0, 13]);
        assert_eq!(&bytes[5..], b"select 1\0");
    }

    #[test]
    fn test_password_message() {
        let bytes = frame(&PasswordMessage::new("hunter2".to_string()), 3).unwrap();

        assert_eq!(&bytes[..5], &[b'p', 0, 0, 0, 12]);
        assert_eq!(&bytes[5..], b"hunter2\0");
    }

    #[test]
    fn test_parse() {
        let msg = Parse {
            name: String::new(),
            query: "select $1".to_string(),
            param_types: vec![23],
        };
        let bytes = frame(&msg, 5).unwrap();

        let mut expected = vec![b'P', 0, 0, 0, 21, 0];
        expected.extend_from_slice(b"select $1\0");
        expected.extend_from_slice(&[0, 1, 0, 0, 0, 23]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(
            frame(&Sync {}, DEFAULT_INCREMENT).unwrap(),
            vec![b'S', 0, 0, 0, 4]
        );
        assert_eq!(
            frame(&Terminate {}, DEFAULT_INCREMENT).unwrap(),
            vec![b'X', 0, 0, 0, 4]
        );
    }

    #[test]
    fn test_parse_max_param_types() {
        let msg = Parse {
            name: String::new(),
            query: "select 1".to_string(),
            param_types: vec![23; i16::MAX as usize],
        };
        let bytes = frame(&msg, DEFAULT_INCREMENT).unwrap();

        // tag, length, empty name, "select 1\0", then the count
        assert_eq!(&bytes[15..17], &[0x7f, 0xff]);
        assert_eq!(bytes.len(), 17 + 4 * i16::MAX as usize);
    }

    #[test]
    fn test_parse_too_many_param_types() {
        let msg = Parse {
            name: String::new(),
            query: "select 1".to_string(),
            param_types: vec![23; i16::MAX as usize + 1],
        };

        assert!(matches!(
            frame(&msg, DEFAULT_INCREMENT),
            Err(Error::MessageTooLarge(len)) if len == i16::MAX as usize + 1
        ));
    }

    #[test]
    fn test_nul_in_string_fields_rejected() {
        let query = Query {
            query: "select 1\0; drop table t".to_string(),
        };
        assert!(matches!(
            frame(&query, DEFAULT_INCREMENT),
            Err(Error::InvalidMessage(_))
        ));

        let startup = StartupMessage::new("bob\0", None);
        assert!(matches!(
            frame(&startup, DEFAULT_INCREMENT),
            Err(Error::InvalidMessage(_))
        ));

        let mut params = Params::new();
        params.push("", "x");
        let unnamed = StartupMessage {
            version: PROTOCOL_VERSION,
            params,
        };
        assert!(matches!(
            frame(&unnamed, DEFAULT_INCREMENT),
            Err(Error::InvalidMessage(_))
        ));

        let password = PasswordMessage::new("a\0b".to_string());
        assert!(matches!(
            frame(&password, DEFAULT_INCREMENT),
            Err(Error::InvalidMessage(_))
        ));
    }
}
