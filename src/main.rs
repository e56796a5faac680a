use std::io::{self, Write};

use clap::{Parser, Subcommand};

use pg_writebuf::proto::messages::{
    ErrorResponse, Parse, PasswordMessage, Query, ReadyForQuery, SSLRequest, Severity,
    StartupMessage, Sync, Terminate, TransactionStatus,
};
use pg_writebuf::proto::{frame, DEFAULT_INCREMENT};
use pg_writebuf::{Encode, Result};

/// Encode a single PostgreSQL protocol message and print it as hex
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Capacity increment of the write buffers used to build the frame
    #[clap(long, default_value_t = DEFAULT_INCREMENT)]
    increment: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simple query
    Query { sql: String },
    /// Startup message for protocol 3.0
    Startup {
        #[clap(long)]
        user: String,
        #[clap(long)]
        database: Option<String>,
    },
    /// Cleartext password message
    Password { password: String },
    /// Extended query Parse with optional parameter type OIDs
    Parse {
        #[clap(long, default_value = "")]
        name: String,
        sql: String,
        #[clap(long = "param-type")]
        param_types: Vec<u32>,
    },
    Sync,
    SslRequest,
    Terminate,
    /// Backend ready for query, in the idle state
    Ready,
    /// Backend error response
    Error {
        #[clap(long, default_value = "P0001")]
        code: String,
        message: String,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();

    let msg = build(args.command);

    let bytes = match frame(msg.as_ref(), args.increment) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("failed to encode message: {}", e);
            return Err(e);
        }
    };

    log::debug!("encoded {} bytes", bytes.len());

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", hex(&bytes))?;

    Ok(())
}

fn build(command: Command) -> Box<dyn Encode> {
    match command {
        Command::Query { sql } => Box::new(Query { query: sql }),
        Command::Startup { user, database } => {
            Box::new(StartupMessage::new(&user, database.as_deref()))
        }
        Command::Password { password } => Box::new(PasswordMessage::new(password)),
        Command::Parse {
            name,
            sql,
            param_types,
        } => Box::new(Parse {
            name,
            query: sql,
            param_types,
        }),
        Command::Sync => Box::new(Sync {}),
        Command::SslRequest => Box::new(SSLRequest {}),
        Command::Terminate => Box::new(Terminate {}),
        Command::Ready => Box::new(ReadyForQuery::new(TransactionStatus::Idle)),
        Command::Error { code, message } => {
            Box::new(ErrorResponse::new(Severity::Error, code, message))
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
