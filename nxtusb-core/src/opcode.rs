//! NXT direct command opcodes

use std::fmt;

use crate::error::{Error, Result};

/// Direct command opcodes
///
/// The second byte of every request, echoed back in the reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Program control
    StartProgram = 0x00,
    StopProgram = 0x01,
    GetCurrentProgramName = 0x11,

    // Sound
    PlaySoundFile = 0x02,
    PlayTone = 0x03,
    StopSound = 0x0C,

    // Motors
    SetOutputState = 0x04,
    GetOutputState = 0x06,
    ResetMotorPosition = 0x0A,

    // Sensors
    SetInputMode = 0x05,
    GetInputValues = 0x07,
    ResetInputScaledValue = 0x08,

    // Mailboxes
    MessageWrite = 0x09,
    MessageRead = 0x13,

    // Brick status
    GetBatteryLevel = 0x0B,
    KeepAlive = 0x0D,

    // Low-speed (I2C) bus
    LsGetStatus = 0x0E,
    LsWrite = 0x0F,
    LsRead = 0x10,
}

impl Opcode {
    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::StartProgram => "STARTPROGRAM",
            Self::StopProgram => "STOPPROGRAM",
            Self::GetCurrentProgramName => "GETCURRENTPROGRAMNAME",
            Self::PlaySoundFile => "PLAYSOUNDFILE",
            Self::PlayTone => "PLAYTONE",
            Self::StopSound => "STOPSOUNDPLAYBACK",
            Self::SetOutputState => "SETOUTPUTSTATE",
            Self::GetOutputState => "GETOUTPUTSTATE",
            Self::ResetMotorPosition => "RESETMOTORPOSITION",
            Self::SetInputMode => "SETINPUTMODE",
            Self::GetInputValues => "GETINPUTVALUES",
            Self::ResetInputScaledValue => "RESETINPUTSCALEDVALUE",
            Self::MessageWrite => "MESSAGEWRITE",
            Self::MessageRead => "MESSAGEREAD",
            Self::GetBatteryLevel => "GETBATTERYLEVEL",
            Self::KeepAlive => "KEEPALIVE",
            Self::LsGetStatus => "LSGETSTATUS",
            Self::LsWrite => "LSWRITE",
            Self::LsRead => "LSREAD",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::StartProgram),
            0x01 => Ok(Self::StopProgram),
            0x02 => Ok(Self::PlaySoundFile),
            0x03 => Ok(Self::PlayTone),
            0x04 => Ok(Self::SetOutputState),
            0x05 => Ok(Self::SetInputMode),
            0x06 => Ok(Self::GetOutputState),
            0x07 => Ok(Self::GetInputValues),
            0x08 => Ok(Self::ResetInputScaledValue),
            0x09 => Ok(Self::MessageWrite),
            0x0A => Ok(Self::ResetMotorPosition),
            0x0B => Ok(Self::GetBatteryLevel),
            0x0C => Ok(Self::StopSound),
            0x0D => Ok(Self::KeepAlive),
            0x0E => Ok(Self::LsGetStatus),
            0x0F => Ok(Self::LsWrite),
            0x10 => Ok(Self::LsRead),
            0x11 => Ok(Self::GetCurrentProgramName),
            0x13 => Ok(Self::MessageRead),
            _ => Err(Error::UnknownOpcode(value)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_conversion() {
        assert_eq!(u8::from(Opcode::GetBatteryLevel), 0x0B);
        assert_eq!(Opcode::try_from(0x13).unwrap(), Opcode::MessageRead);
    }

    #[test]
    fn test_opcode_gap() {
        // 0x12 is unassigned in the direct command set
        assert!(matches!(
            Opcode::try_from(0x12),
            Err(Error::UnknownOpcode(0x12))
        ));
    }

    #[test]
    fn test_opcode_round_trip() {
        for raw in 0x00..=0x13u8 {
            if let Ok(opcode) = Opcode::try_from(raw) {
                assert_eq!(u8::from(opcode), raw);
            }
        }
    }

    #[test]
    fn test_opcode_display() {
        assert_eq!(Opcode::PlayTone.to_string(), "PLAYTONE(0x03)");
    }
}
