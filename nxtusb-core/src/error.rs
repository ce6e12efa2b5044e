//! Error types for nxtusb-core

use crate::{opcode::Opcode, status::Status};

/// Result type alias for nxtusb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Reply size does not match what the request calls for
    #[error("Reply length mismatch for {opcode}: expected {expected} bytes, got {actual} bytes")]
    LengthMismatch {
        opcode: Opcode,
        expected: usize,
        actual: usize,
    },

    /// First reply byte is not the command-reply marker
    #[error("Unexpected frame type in reply to {opcode}: 0x{actual:02X}")]
    UnexpectedFrameType {
        opcode: Opcode,
        actual: u8,
    },

    /// Reply answers a different command
    #[error("Opcode mismatch: expected {expected}, got 0x{actual:02X}")]
    OpcodeMismatch {
        expected: Opcode,
        actual: u8,
    },

    /// Brick reported a non-zero status
    #[error("{status}")]
    DeviceStatus {
        opcode: Opcode,
        status: Status,
    },

    /// Unknown opcode byte
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Unknown frame type byte
    #[error("Unknown frame type: 0x{0:02X}")]
    UnknownFrameType(u8),
}

impl Error {
    /// Reply had the wrong size for its command
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. })
    }

    /// Reply did not belong to the request that was sent
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedFrameType { .. } | Self::OpcodeMismatch { .. }
        )
    }

    /// Status reported by the brick, if that is what failed
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::DeviceStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
