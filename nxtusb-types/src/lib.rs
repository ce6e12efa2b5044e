//! Type definitions for nxtusb
//!
//! Port and mode enumerations plus the output/input state records
//! reported by the brick.

pub mod error;
pub mod motor;
pub mod port;
pub mod sensor;

pub use error::{Error, Result};
pub use motor::{MotorMode, OutputCommand, OutputState, RegulationMode, RunState};
pub use port::{InputPort, OutputPort};
pub use sensor::{InputValues, SensorMode, SensorType};
