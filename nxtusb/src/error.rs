//! High-level error types

use nxtusb_core::Status;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] nxtusb_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] nxtusb_transport::Error),

    #[error("Types error: {0}")]
    Types(#[from] nxtusb_types::Error),

    #[error("Short write: sent {actual} of {expected} bytes")]
    ShortWrite { expected: usize, actual: usize },

    #[error("Unexpected reply from brick: {0}")]
    UnexpectedReply(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where an exchange failed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transfer did not complete, or moved the wrong number of bytes
    Transport,
    /// Reply does not belong to the request, or carries a value the
    /// brick should never report
    Protocol,
    /// Brick answered with a non-zero status
    DeviceStatus,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::ShortWrite { .. } | Self::Io(_) => ErrorKind::Transport,
            Self::Core(e) if e.is_shape_error() => ErrorKind::Transport,
            Self::Core(nxtusb_core::Error::DeviceStatus { .. }) => ErrorKind::DeviceStatus,
            Self::Core(_) | Self::Types(_) | Self::UnexpectedReply(_) => ErrorKind::Protocol,
        }
    }

    /// Status reported by the brick, if that is what failed
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Core(e) => e.status(),
            _ => None,
        }
    }

    /// Check if the transport timed out
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport(nxtusb_transport::Error::Timeout { .. })
        )
    }
}
