//! Transport layer for the NXT direct-command protocol
//!
//! Provides bulk USB communication with bricks.

pub mod error;
pub mod usb;

pub use error::{Error, Result};
pub use usb::{UsbConfig, UsbTransport};

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for different communication methods
///
/// One `write` followed by one `read` makes a request/reply exchange.
/// Implementations apply their own per-transfer timeout.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Find the device and claim it
    async fn open(&mut self) -> Result<()>;

    /// Release the device
    async fn close(&mut self) -> Result<()>;

    /// Check if open
    fn is_open(&self) -> bool;

    /// Send raw bytes, returning how many were transferred
    async fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Receive a single transfer of at most `max_len` bytes
    async fn read(&mut self, max_len: usize) -> Result<BytesMut>;

    /// Human-readable device location
    fn description(&self) -> String;
}
