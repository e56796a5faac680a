use super::write_cstr;
use crate::error::Result;
use crate::proto::{Encode, WriteBuffer};

/// Single byte answer to an `SSLRequest`, sent without tag or length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SSLResponse {
    Ssl,
    NoSsl,
}

impl SSLResponse {
    pub fn encode(&self, buf: &mut WriteBuffer) {
        buf.write_byte(match self {
            Self::Ssl => b'S',
            Self::NoSsl => b'N',
        });
    }
}

macro_rules! impl_auth_msg {
    ($(($ty:ident, $kind:expr)),+) => {
        $(impl_auth_msg!{$ty, $kind})+
    };

    ($ty:ident, $kind:expr) => {
        pub struct $ty {}

        impl Encode for $ty {
            fn tag(&self) -> Option<u8> {
                Some(b'R')
            }

            fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
                buf.write_i32($kind);
                Ok(())
            }
        }
    };
}
impl_auth_msg!(
    (AuthenticationOk, 0),
    (AuthenticationCleartextPassword, 3)
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Fatal,
    Panic,
    Warning,
    Notice,
    Debug,
    Info,
    Log,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Log => "LOG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    SeverityI18n,
    Severity,
    Code,
    Message,
    Detail,
    Hint,
    Position,
    InternalPosition,
    Query,
    Where,
    Schema,
    Table,
    Column,
    DataType,
    Constraint,
    File,
    Line,
    Routine,
}

impl Field {
    pub fn code(&self) -> u8 {
        match self {
            Self::SeverityI18n => b'S',
            Self::Severity => b'V',
            Self::Code => b'C',
            Self::Message => b'M',
            Self::Detail => b'D',
            Self::Hint => b'H',
            Self::Position => b'P',
            Self::InternalPosition => b'p',
            Self::Query => b'q',
            Self::Where => b'W',
            Self::Schema => b's',
            Self::Table => b't',
            Self::Column => b'c',
            Self::DataType => b'd',
            Self::Constraint => b'n',
            Self::File => b'F',
            Self::Line => b'L',
            Self::Routine => b'R',
        }
    }
}

pub struct ErrorResponse {
    pub fields: Vec<(Field, String)>,
}

impl ErrorResponse {
    pub fn new(severity: Severity, code: String, message: String) -> Self {
        Self {
            fields: vec![
                (Field::SeverityI18n, severity.as_str().to_string()),
                (Field::Severity, severity.as_str().to_string()),
                (Field::Code, code),
                (Field::Message, message),
            ],
        }
    }

    pub fn get_field(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }
}

impl Encode for ErrorResponse {
    fn tag(&self) -> Option<u8> {
        Some(b'E')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        for (field, value) in self.fields.iter() {
            buf.write_byte(field.code());
            write_cstr(buf, "error field", value.as_bytes())?;
        }

        buf.write_byte(0);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionStatus {
    Idle,
    InTransaction,
    Failed,
}

impl TransactionStatus {
    fn as_char(&self) -> char {
        match self {
            Self::Idle => 'I',
            Self::InTransaction => 'T',
            Self::Failed => 'E',
        }
    }
}

pub struct ReadyForQuery {
    pub transaction_status: TransactionStatus,
}

impl ReadyForQuery {
    pub fn new(transaction_status: TransactionStatus) -> Self {
        Self { transaction_status }
    }
}

impl Encode for ReadyForQuery {
    fn tag(&self) -> Option<u8> {
        Some(b'Z')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        buf.write_char(self.transaction_status.as_char());
        Ok(())
    }
}

pub struct CommandComplete {
    pub command_tag: String,
}

impl CommandComplete {
    pub fn new(command_tag: String) -> Self {
        Self { command_tag }
    }
}

impl Encode for CommandComplete {
    fn tag(&self) -> Option<u8> {
        Some(b'C')
    }

    fn encode_body(&self, buf: &mut WriteBuffer) -> Result<()> {
        write_cstr(buf, "command tag", self.command_tag.as_bytes())
    }
}
