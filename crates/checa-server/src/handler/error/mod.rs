//! Error types shared by all HTTP handlers.

mod http_error;
mod pg_error;

pub use self::http_error::{Error, ErrorKind, Result};
