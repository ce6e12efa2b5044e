//! # nxtusb-core
//!
//! Core protocol implementation for LEGO Mindstorms NXT direct commands.
//!
//! This crate provides the low-level protocol primitives:
//! - Request encoding
//! - Reply validation and decoding
//! - Status code table
//! - Opcode and frame type definitions

pub mod constants;
pub mod error;
pub mod field;
pub mod opcode;
pub mod packet;
pub mod reply;
pub mod status;

pub use constants::FrameType;
pub use error::{Error, Result};
pub use opcode::Opcode;
pub use packet::Request;
pub use reply::{Message, Reply};
pub use status::{Status, StatusFamily};

pub use constants::MAX_REPLY_SIZE;
