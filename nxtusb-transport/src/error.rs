//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No device found with VID={vendor_id:04X} PID={product_id:04X}")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("Not open")]
    NotOpen,

    #[error("Already open")]
    AlreadyOpen,

    #[error("Transfer timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
