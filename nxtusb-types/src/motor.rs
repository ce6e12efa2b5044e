//! Motor control flags and output port state

use std::fmt;

use crate::error::{Error, Result};
use crate::port::OutputPort;

bitflags::bitflags! {
    /// Motor mode flags (combinable)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MotorMode: u8 {
        /// Turn the motor on
        const ON = 0x01;
        /// Brake between PWM pulses
        const BRAKE = 0x02;
        /// Enable regulation (see [`RegulationMode`])
        const REGULATED = 0x04;
    }
}

/// Motor regulation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RegulationMode {
    Idle = 0x01,
    /// Keep the speed constant under load
    Speed = 0x02,
    /// Synchronize two motors
    Sync = 0x03,
}

impl From<RegulationMode> for u8 {
    fn from(mode: RegulationMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for RegulationMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x01 => Ok(Self::Idle),
            0x02 => Ok(Self::Speed),
            0x03 => Ok(Self::Sync),
            _ => Err(Error::InvalidValue {
                kind: "regulation mode",
                value,
            }),
        }
    }
}

/// Motor run state
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunState {
    Idle = 0x00,
    RampUp = 0x10,
    Running = 0x20,
    RampDown = 0x40,
}

impl From<RunState> for u8 {
    fn from(state: RunState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for RunState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::Idle),
            0x10 => Ok(Self::RampUp),
            0x20 => Ok(Self::Running),
            0x40 => Ok(Self::RampDown),
            _ => Err(Error::InvalidValue {
                kind: "run state",
                value,
            }),
        }
    }
}

/// Parameters of a set-output-state command
///
/// `power` and `turn_ratio` range from -100 to 100. A `tacho_limit` of 0
/// runs the motor until told otherwise.
///
/// # Examples
///
/// ```
/// use nxtusb_types::{MotorMode, OutputCommand, OutputPort, RunState};
///
/// let cmd = OutputCommand::run(OutputPort::B, 75).with_tacho_limit(360);
/// assert_eq!(cmd.mode, MotorMode::ON);
/// assert_eq!(cmd.run_state, RunState::Running);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCommand {
    pub port: OutputPort,
    pub power: i8,
    pub mode: MotorMode,
    pub regulation: RegulationMode,
    pub turn_ratio: i8,
    pub run_state: RunState,
    pub tacho_limit: u32,
}

impl OutputCommand {
    /// Idle command for `port`: no power, no flags
    pub fn new(port: OutputPort) -> Self {
        Self {
            port,
            power: 0,
            mode: MotorMode::empty(),
            regulation: RegulationMode::Idle,
            turn_ratio: 0,
            run_state: RunState::Idle,
            tacho_limit: 0,
        }
    }

    /// Run the motor at `power` with speed regulation
    pub fn run(port: OutputPort, power: i8) -> Self {
        Self::new(port)
            .with_power(power)
            .with_mode(MotorMode::ON)
            .with_regulation(RegulationMode::Speed)
            .with_run_state(RunState::Running)
    }

    /// Stop the motor and hold it in place
    pub fn brake(port: OutputPort) -> Self {
        Self::new(port).with_mode(MotorMode::BRAKE)
    }

    /// Cut power and let the motor spin down freely
    pub fn coast(port: OutputPort) -> Self {
        Self::new(port)
    }

    pub fn with_power(mut self, power: i8) -> Self {
        self.power = power;
        self
    }

    pub fn with_mode(mut self, mode: MotorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_regulation(mut self, regulation: RegulationMode) -> Self {
        self.regulation = regulation;
        self
    }

    pub fn with_turn_ratio(mut self, turn_ratio: i8) -> Self {
        self.turn_ratio = turn_ratio;
        self
    }

    pub fn with_run_state(mut self, run_state: RunState) -> Self {
        self.run_state = run_state;
        self
    }

    pub fn with_tacho_limit(mut self, tacho_limit: u32) -> Self {
        self.tacho_limit = tacho_limit;
        self
    }
}

/// Output port state as reported by the brick
///
/// Mode-like fields are kept as raw bytes: the brick may report values
/// outside the declared enumerations. Use the typed accessors to interpret
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputState {
    pub port: u8,
    pub power: i8,
    pub mode: u8,
    pub regulation: u8,
    pub turn_ratio: i8,
    pub run_state: u8,
    /// Current tacho limit
    pub tacho_limit: u32,
    /// Tacho count since the last reset
    pub tacho_count: i32,
    /// Position relative to the last programmed movement
    pub block_tacho_count: i32,
    /// Position relative to the last motor position reset
    pub rotation_count: i32,
}

impl OutputState {
    pub fn output_port(&self) -> Result<OutputPort> {
        OutputPort::try_from(self.port)
    }

    /// Mode flags, undeclared bits retained
    pub fn motor_mode(&self) -> MotorMode {
        MotorMode::from_bits_retain(self.mode)
    }

    pub fn regulation_mode(&self) -> Result<RegulationMode> {
        RegulationMode::try_from(self.regulation)
    }

    pub fn motor_run_state(&self) -> Result<RunState> {
        RunState::try_from(self.run_state)
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.motor_run_state(),
            Ok(RunState::RampUp | RunState::Running | RunState::RampDown)
        )
    }
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Output[port=0x{:02X}, power={}, tacho={}, rotation={}]",
            self.port, self.power, self.tacho_count, self.rotation_count
        )
    }
}
