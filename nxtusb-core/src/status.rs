//! Reply status codes
//!
//! Every reply carries a status byte. `0x00` is success; everything else,
//! including codes the firmware documentation never mentions, maps to an
//! error. The mapping is total over `u8`.

use std::fmt;

/// Broad grouping of status codes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StatusFamily {
    Ok,
    /// Pending transactions, empty queues, no running program
    State,
    /// File system errors
    FileSystem,
    /// Communication and bus errors
    Communication,
    /// Out of memory or buffers
    Resource,
    /// Invalid arguments or fields
    Argument,
    /// Undocumented code
    Unknown,
}

/// Status byte of a reply
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,

    Pending,
    QueueEmpty,
    NoActiveProgram,

    NoMoreHandles,
    NoSpace,
    NoMoreFiles,
    EndOfFileExpected,
    EndOfFile,
    NotALinearFile,
    FileNotFound,
    HandleAlreadyClosed,
    NoLinearSpace,
    UndefinedError,
    FileBusy,
    NoWriteBuffers,
    AppendImpossible,
    FileIsFull,
    FileExists,
    ModuleNotFound,
    OutOfBoundary,
    IllegalFilename,
    IllegalHandle,
    RequestFailed,

    UnknownOpcode,
    InsanePacket,
    CommunicationError,
    ChannelInvalid,
    ChannelBusy,

    NoBuffer,
    NoMemory,

    DataOutOfRange,
    IllegalSize,
    IllegalMailbox,
    IllegalField,
    BadIo,
    BadArgs,

    /// Code with no documented meaning
    Unknown(u8),
}

impl Status {
    /// Wire value
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0x00,
            Self::Pending => 0x20,
            Self::QueueEmpty => 0x40,
            Self::NoMoreHandles => 0x81,
            Self::NoSpace => 0x82,
            Self::NoMoreFiles => 0x83,
            Self::EndOfFileExpected => 0x84,
            Self::EndOfFile => 0x85,
            Self::NotALinearFile => 0x86,
            Self::FileNotFound => 0x87,
            Self::HandleAlreadyClosed => 0x88,
            Self::NoLinearSpace => 0x89,
            Self::UndefinedError => 0x8A,
            Self::FileBusy => 0x8B,
            Self::NoWriteBuffers => 0x8C,
            Self::AppendImpossible => 0x8D,
            Self::FileIsFull => 0x8E,
            Self::FileExists => 0x8F,
            Self::ModuleNotFound => 0x90,
            Self::OutOfBoundary => 0x91,
            Self::IllegalFilename => 0x92,
            Self::IllegalHandle => 0x93,
            Self::RequestFailed => 0xBD,
            Self::UnknownOpcode => 0xBE,
            Self::InsanePacket => 0xBF,
            Self::DataOutOfRange => 0xC0,
            Self::CommunicationError => 0xDD,
            Self::NoBuffer => 0xDE,
            Self::ChannelInvalid => 0xDF,
            Self::ChannelBusy => 0xE0,
            Self::NoActiveProgram => 0xEC,
            Self::IllegalSize => 0xED,
            Self::IllegalMailbox => 0xEE,
            Self::IllegalField => 0xEF,
            Self::BadIo => 0xF0,
            Self::NoMemory => 0xFB,
            Self::BadArgs => 0xFF,
            Self::Unknown(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    pub fn family(self) -> StatusFamily {
        match self {
            Self::Ok => StatusFamily::Ok,
            Self::Pending | Self::QueueEmpty | Self::NoActiveProgram => StatusFamily::State,
            Self::NoMoreHandles
            | Self::NoSpace
            | Self::NoMoreFiles
            | Self::EndOfFileExpected
            | Self::EndOfFile
            | Self::NotALinearFile
            | Self::FileNotFound
            | Self::HandleAlreadyClosed
            | Self::NoLinearSpace
            | Self::UndefinedError
            | Self::FileBusy
            | Self::NoWriteBuffers
            | Self::AppendImpossible
            | Self::FileIsFull
            | Self::FileExists
            | Self::ModuleNotFound
            | Self::OutOfBoundary
            | Self::IllegalFilename
            | Self::IllegalHandle
            | Self::RequestFailed => StatusFamily::FileSystem,
            Self::UnknownOpcode
            | Self::InsanePacket
            | Self::CommunicationError
            | Self::ChannelInvalid
            | Self::ChannelBusy => StatusFamily::Communication,
            Self::NoBuffer | Self::NoMemory => StatusFamily::Resource,
            Self::DataOutOfRange
            | Self::IllegalSize
            | Self::IllegalMailbox
            | Self::IllegalField
            | Self::BadIo
            | Self::BadArgs => StatusFamily::Argument,
            Self::Unknown(_) => StatusFamily::Unknown,
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Pending => "Pending communication transaction in progress",
            Self::QueueEmpty => "Specified mailbox queue is empty",
            Self::NoMoreHandles => "No more handles",
            Self::NoSpace => "No space",
            Self::NoMoreFiles => "No more files",
            Self::EndOfFileExpected => "End of file expected",
            Self::EndOfFile => "End of file",
            Self::NotALinearFile => "Not a linear file",
            Self::FileNotFound => "File not found",
            Self::HandleAlreadyClosed => "Handle already closed",
            Self::NoLinearSpace => "No linear space",
            Self::UndefinedError => "Undefined error",
            Self::FileBusy => "File is busy",
            Self::NoWriteBuffers => "No write buffers",
            Self::AppendImpossible => "Append not possible",
            Self::FileIsFull => "File is full",
            Self::FileExists => "File exists",
            Self::ModuleNotFound => "Module not found",
            Self::OutOfBoundary => "Out of boundary",
            Self::IllegalFilename => "Illegal file name",
            Self::IllegalHandle => "Illegal handle",
            Self::RequestFailed => "Request failed (i.e. specified file not found)",
            Self::UnknownOpcode => "Unknown command opcode",
            Self::InsanePacket => "Insane packet",
            Self::DataOutOfRange => "Data contains out-of-range values",
            Self::CommunicationError => "Communication bus error",
            Self::NoBuffer => "No free memory in communication buffer",
            Self::ChannelInvalid => "Specified channel/connection is not valid",
            Self::ChannelBusy => "Specified channel/connection not configured or busy",
            Self::NoActiveProgram => "No active program",
            Self::IllegalSize => "Illegal size specified",
            Self::IllegalMailbox => "Illegal mailbox queue ID specified",
            Self::IllegalField => "Attempted to access invalid field of a structure",
            Self::BadIo => "Bad input or output specified",
            Self::NoMemory => "Insufficient memory available",
            Self::BadArgs => "Bad arguments",
            Self::Unknown(_) => "Unknown error",
        }
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        match code {
            0x00 => Self::Ok,
            0x20 => Self::Pending,
            0x40 => Self::QueueEmpty,
            0x81 => Self::NoMoreHandles,
            0x82 => Self::NoSpace,
            0x83 => Self::NoMoreFiles,
            0x84 => Self::EndOfFileExpected,
            0x85 => Self::EndOfFile,
            0x86 => Self::NotALinearFile,
            0x87 => Self::FileNotFound,
            0x88 => Self::HandleAlreadyClosed,
            0x89 => Self::NoLinearSpace,
            0x8A => Self::UndefinedError,
            0x8B => Self::FileBusy,
            0x8C => Self::NoWriteBuffers,
            0x8D => Self::AppendImpossible,
            0x8E => Self::FileIsFull,
            0x8F => Self::FileExists,
            0x90 => Self::ModuleNotFound,
            0x91 => Self::OutOfBoundary,
            0x92 => Self::IllegalFilename,
            0x93 => Self::IllegalHandle,
            0xBD => Self::RequestFailed,
            0xBE => Self::UnknownOpcode,
            0xBF => Self::InsanePacket,
            0xC0 => Self::DataOutOfRange,
            0xDD => Self::CommunicationError,
            0xDE => Self::NoBuffer,
            0xDF => Self::ChannelInvalid,
            0xE0 => Self::ChannelBusy,
            0xEC => Self::NoActiveProgram,
            0xED => Self::IllegalSize,
            0xEE => Self::IllegalMailbox,
            0xEF => Self::IllegalField,
            0xF0 => Self::BadIo,
            0xFB => Self::NoMemory,
            0xFF => Self::BadArgs,
            other => Self::Unknown(other),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        status.code()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
