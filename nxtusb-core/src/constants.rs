//! Protocol constants

use crate::error::{Error, Result};

/// Largest reply the brick sends in a single bulk transfer
pub const MAX_REPLY_SIZE: usize = 64;

/// Reply header size (frame type, opcode, status)
pub const REPLY_HEADER_SIZE: usize = 3;

/// Request header size (frame type, opcode)
pub const REQUEST_HEADER_SIZE: usize = 2;

/// Filename slot, 15.3 name plus terminator with room to spare
pub const FILENAME_SIZE: usize = 20;

/// Outgoing mailbox message slot
pub const MESSAGE_WRITE_SIZE: usize = 59;

/// Incoming mailbox message slot
pub const MESSAGE_READ_SIZE: usize = 58;

/// Low-speed write data slot
pub const LS_WRITE_SLOT_SIZE: usize = 20;

/// Low-speed (I2C) transfer limit
pub const LS_DATA_SIZE: usize = 16;

/// Frame type, the first byte of every packet
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameType {
    /// Direct command, reply expected
    DirectReply = 0x00,

    /// System command, reply expected
    SystemReply = 0x01,

    /// Reply sent by the brick
    CommandReply = 0x02,

    /// Direct command, no reply
    DirectNoReply = 0x80,

    /// System command, no reply
    SystemNoReply = 0x81,
}

impl FrameType {
    /// Whether the brick answers frames of this type
    pub fn expects_reply(self) -> bool {
        matches!(self, Self::DirectReply | Self::SystemReply)
    }
}

impl From<FrameType> for u8 {
    fn from(frame: FrameType) -> u8 {
        frame as u8
    }
}

impl TryFrom<u8> for FrameType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::DirectReply),
            0x01 => Ok(Self::SystemReply),
            0x02 => Ok(Self::CommandReply),
            0x80 => Ok(Self::DirectNoReply),
            0x81 => Ok(Self::SystemNoReply),
            _ => Err(Error::UnknownFrameType(value)),
        }
    }
}
