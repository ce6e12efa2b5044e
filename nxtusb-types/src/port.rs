//! Brick port identifiers

use std::fmt;

use crate::error::{Error, Result};

/// Motor (output) ports
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutputPort {
    A = 0x00,
    B = 0x01,
    C = 0x02,
    /// Address all three motor ports at once
    All = 0xFF,
}

impl OutputPort {
    /// The three physical ports, in wire order
    pub const PHYSICAL: [OutputPort; 3] = [Self::A, Self::B, Self::C];
}

impl From<OutputPort> for u8 {
    fn from(port: OutputPort) -> u8 {
        port as u8
    }
}

impl TryFrom<u8> for OutputPort {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::A),
            0x01 => Ok(Self::B),
            0x02 => Ok(Self::C),
            0xFF => Ok(Self::All),
            _ => Err(Error::InvalidValue {
                kind: "output port",
                value,
            }),
        }
    }
}

impl fmt::Display for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::All => write!(f, "ALL"),
        }
    }
}

/// Sensor (input) ports
///
/// Printed on the brick as 1-4, numbered from zero on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputPort {
    One = 0x00,
    Two = 0x01,
    Three = 0x02,
    Four = 0x03,
}

impl InputPort {
    pub const ALL: [InputPort; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Port number as printed on the brick housing
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl From<InputPort> for u8 {
    fn from(port: InputPort) -> u8 {
        port as u8
    }
}

impl TryFrom<u8> for InputPort {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::One),
            0x01 => Ok(Self::Two),
            0x02 => Ok(Self::Three),
            0x03 => Ok(Self::Four),
            _ => Err(Error::InvalidValue {
                kind: "input port",
                value,
            }),
        }
    }
}

impl fmt::Display for InputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_port_conversion() {
        assert_eq!(u8::from(OutputPort::B), 0x01);
        assert_eq!(OutputPort::try_from(0xFF).unwrap(), OutputPort::All);
    }

    #[test]
    fn test_output_port_rejects_undeclared() {
        let result = OutputPort::try_from(0x03);
        assert_eq!(
            result,
            Err(Error::InvalidValue {
                kind: "output port",
                value: 0x03
            })
        );
    }

    #[test]
    fn test_input_port_numbering() {
        assert_eq!(InputPort::One.number(), 1);
        assert_eq!(InputPort::Four.number(), 4);
        assert_eq!(u8::from(InputPort::Three), 0x02);
        assert_eq!(InputPort::Three.to_string(), "3");
    }

    #[test]
    fn test_input_port_rejects_undeclared() {
        assert!(InputPort::try_from(0x04).is_err());
        for port in InputPort::ALL {
            assert_eq!(InputPort::try_from(u8::from(port)).unwrap(), port);
        }
    }
}
