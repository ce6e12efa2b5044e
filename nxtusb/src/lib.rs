//! # nxtusb
//!
//! Rust implementation of the LEGO Mindstorms NXT direct-command protocol over USB.
//!
//! ## Features
//!
//! - Type-safe request and reply layouts
//! - Async/await API using Tokio, plus a [`blocking`] wrapper
//! - Replies checked for size, identity and status before decoding
//! - Motors, sensors, sound, programs, mailboxes and the low-speed bus
//!
//! ## Quick Start
//!
//! ```no_run
//! use nxtusb::{Brick, OutputCommand, OutputPort};
//!
//! #[tokio::main]
//! async fn main() -> nxtusb::Result<()> {
//!     // Claim the first brick on the bus
//!     let brick = Brick::open().await?;
//!
//!     // Run motor A at 75% power
//!     brick.set_output_state(OutputCommand::run(OutputPort::A, 75)).await?;
//!
//!     // Release the brick
//!     brick.close().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod brick;
pub mod error;

// Re-exports
pub use brick::Brick;
pub use error::{Error, ErrorKind, Result};

// Re-export protocol and transport types
pub use nxtusb_core::{Message, Opcode, Reply, Request, Status, StatusFamily};
pub use nxtusb_transport::{Transport, UsbConfig};
pub use nxtusb_types::{
    InputPort, InputValues, MotorMode, OutputCommand, OutputPort, OutputState, RegulationMode,
    RunState, SensorMode, SensorType,
};
