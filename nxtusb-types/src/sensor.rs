//! Sensor configuration and input port readings

use std::fmt;

use crate::error::{Error, Result};
use crate::port::InputPort;

/// Sensor types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorType {
    None = 0x00,
    Switch = 0x01,
    Temperature = 0x02,
    Reflection = 0x03,
    Angle = 0x04,
    LightActive = 0x05,
    LightInactive = 0x06,
    SoundDb = 0x07,
    SoundDba = 0x08,
    Custom = 0x09,
    /// I2C sensor (ultrasonic and friends)
    LowSpeed = 0x0A,
    /// I2C sensor with 9V supply
    LowSpeed9V = 0x0B,
}

impl SensorType {
    /// Whether the sensor talks over the low-speed (I2C) bus
    pub fn is_low_speed(self) -> bool {
        matches!(self, Self::LowSpeed | Self::LowSpeed9V)
    }
}

impl From<SensorType> for u8 {
    fn from(sensor: SensorType) -> u8 {
        sensor as u8
    }
}

impl TryFrom<u8> for SensorType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::Switch),
            0x02 => Ok(Self::Temperature),
            0x03 => Ok(Self::Reflection),
            0x04 => Ok(Self::Angle),
            0x05 => Ok(Self::LightActive),
            0x06 => Ok(Self::LightInactive),
            0x07 => Ok(Self::SoundDb),
            0x08 => Ok(Self::SoundDba),
            0x09 => Ok(Self::Custom),
            0x0A => Ok(Self::LowSpeed),
            0x0B => Ok(Self::LowSpeed9V),
            _ => Err(Error::InvalidValue {
                kind: "sensor type",
                value,
            }),
        }
    }
}

/// Sensor modes
///
/// The mode occupies the upper three bits of the mode byte; the lower five
/// carry the slope used by the counting modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorMode {
    Raw = 0x00,
    Boolean = 0x20,
    TransitionCount = 0x40,
    PeriodCount = 0x60,
    PctFullScale = 0x80,
    Celsius = 0xA0,
    Fahrenheit = 0xC0,
    AngleStep = 0xE0,
}

impl SensorMode {
    pub const MODE_MASK: u8 = 0xE0;
    pub const SLOPE_MASK: u8 = 0x1F;

    /// Split a raw mode byte into the mode and its slope bits
    pub fn split(raw: u8) -> (Self, u8) {
        let mode = match raw & Self::MODE_MASK {
            0x00 => Self::Raw,
            0x20 => Self::Boolean,
            0x40 => Self::TransitionCount,
            0x60 => Self::PeriodCount,
            0x80 => Self::PctFullScale,
            0xA0 => Self::Celsius,
            0xC0 => Self::Fahrenheit,
            _ => Self::AngleStep,
        };
        (mode, raw & Self::SLOPE_MASK)
    }
}

impl From<SensorMode> for u8 {
    fn from(mode: SensorMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for SensorMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value & Self::SLOPE_MASK != 0 {
            return Err(Error::InvalidValue {
                kind: "sensor mode",
                value,
            });
        }
        Ok(Self::split(value).0)
    }
}

/// Input port readings as reported by the brick
///
/// Sensor type and mode are raw bytes; see [`InputValues::sensor`] and
/// [`InputValues::mode`] for the typed views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputValues {
    pub port: u8,
    /// Reading is valid
    pub valid: bool,
    /// A calibration file was found and applied to `calibrated_value`
    pub calibrated: bool,
    pub sensor_type: u8,
    pub sensor_mode: u8,
    /// Raw A/D value
    pub raw_value: u16,
    /// Normalized value, 0-1023, type dependent
    pub normalized_value: u16,
    /// Scaled value, mode dependent
    pub scaled_value: i16,
    /// Currently unused by the firmware
    pub calibrated_value: i16,
}

impl InputValues {
    pub fn input_port(&self) -> Result<InputPort> {
        InputPort::try_from(self.port)
    }

    pub fn sensor(&self) -> Result<SensorType> {
        SensorType::try_from(self.sensor_type)
    }

    /// Mode and slope bits
    pub fn mode(&self) -> (SensorMode, u8) {
        SensorMode::split(self.sensor_mode)
    }
}

impl fmt::Display for InputValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Input[port=0x{:02X}, valid={}, raw={}, scaled={}]",
            self.port, self.valid, self.raw_value, self.scaled_value
        )
    }
}
