//! Direct command requests and their wire encoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use nxtusb_types::{InputPort, OutputCommand, OutputPort, SensorMode, SensorType};

use crate::{
    constants::{
        FrameType, FILENAME_SIZE, LS_DATA_SIZE, LS_WRITE_SLOT_SIZE, MESSAGE_WRITE_SIZE,
        REQUEST_HEADER_SIZE,
    },
    field,
    opcode::Opcode,
    reply,
};

/// A direct command
///
/// # Packet Structure
///
/// ```text
/// ┌─────────────┬─────────────┬──────────────────────────────┐
/// │ Frame type  │   Opcode    │           Payload            │
/// │   1 byte    │   1 byte    │  fixed size, per command     │
/// └─────────────┴─────────────┴──────────────────────────────┘
/// ```
///
/// Fields are packed with no padding; multi-byte integers are little-endian.
/// Every request is sent as [`FrameType::DirectReply`].
///
/// # Examples
///
/// ```
/// use nxtusb_core::Request;
///
/// let request = Request::PlayTone { frequency: 440, duration_ms: 500 };
/// assert_eq!(&request.encode()[..], &[0x00, 0x03, 0xB8, 0x01, 0xF4, 0x01]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Start a program stored on the brick (15.3 filename)
    StartProgram { filename: String },
    StopProgram,
    GetCurrentProgramName,

    PlaySoundFile { filename: String, repeat: bool },
    /// Frequency in Hz (200-14000), duration in milliseconds
    PlayTone { frequency: u16, duration_ms: u16 },
    StopSound,

    SetOutputState(OutputCommand),
    GetOutputState { port: OutputPort },
    /// `relative` resets the block position only
    ResetMotorPosition { port: OutputPort, relative: bool },

    SetInputMode {
        port: InputPort,
        sensor_type: SensorType,
        sensor_mode: SensorMode,
    },
    GetInputValues { port: InputPort },
    ResetInputScaledValue { port: InputPort },

    MessageWrite { inbox: u8, message: String },
    MessageRead {
        remote_inbox: u8,
        local_inbox: u8,
        remove: bool,
    },

    GetBatteryLevel,
    KeepAlive,

    LsGetStatus { port: InputPort },
    /// Write `data` to an I2C sensor and expect `rx_len` bytes back
    LsWrite {
        port: InputPort,
        data: Bytes,
        rx_len: u8,
    },
    LsRead { port: InputPort },
}

impl Request {
    /// Frame type used for every request
    pub const FRAME_TYPE: FrameType = FrameType::DirectReply;

    pub fn opcode(&self) -> Opcode {
        match self {
            Self::StartProgram { .. } => Opcode::StartProgram,
            Self::StopProgram => Opcode::StopProgram,
            Self::GetCurrentProgramName => Opcode::GetCurrentProgramName,
            Self::PlaySoundFile { .. } => Opcode::PlaySoundFile,
            Self::PlayTone { .. } => Opcode::PlayTone,
            Self::StopSound => Opcode::StopSound,
            Self::SetOutputState(_) => Opcode::SetOutputState,
            Self::GetOutputState { .. } => Opcode::GetOutputState,
            Self::ResetMotorPosition { .. } => Opcode::ResetMotorPosition,
            Self::SetInputMode { .. } => Opcode::SetInputMode,
            Self::GetInputValues { .. } => Opcode::GetInputValues,
            Self::ResetInputScaledValue { .. } => Opcode::ResetInputScaledValue,
            Self::MessageWrite { .. } => Opcode::MessageWrite,
            Self::MessageRead { .. } => Opcode::MessageRead,
            Self::GetBatteryLevel => Opcode::GetBatteryLevel,
            Self::KeepAlive => Opcode::KeepAlive,
            Self::LsGetStatus { .. } => Opcode::LsGetStatus,
            Self::LsWrite { .. } => Opcode::LsWrite,
            Self::LsRead { .. } => Opcode::LsRead,
        }
    }

    /// Payload size in bytes (header excluded)
    pub fn payload_len(&self) -> usize {
        match self {
            Self::StopProgram
            | Self::GetCurrentProgramName
            | Self::StopSound
            | Self::GetBatteryLevel
            | Self::KeepAlive => 0,
            Self::GetOutputState { .. }
            | Self::GetInputValues { .. }
            | Self::ResetInputScaledValue { .. }
            | Self::LsGetStatus { .. }
            | Self::LsRead { .. } => 1,
            Self::ResetMotorPosition { .. } => 2,
            Self::SetInputMode { .. } | Self::MessageRead { .. } => 3,
            Self::PlayTone { .. } => 4,
            Self::SetOutputState(_) => 10,
            Self::StartProgram { .. } => FILENAME_SIZE,
            Self::PlaySoundFile { .. } => 1 + FILENAME_SIZE,
            Self::LsWrite { .. } => 3 + LS_WRITE_SLOT_SIZE,
            Self::MessageWrite { .. } => 2 + MESSAGE_WRITE_SIZE,
        }
    }

    /// Total encoded size
    pub fn encoded_len(&self) -> usize {
        REQUEST_HEADER_SIZE + self.payload_len()
    }

    /// Exact size of the reply the brick sends back
    pub fn reply_len(&self) -> usize {
        match self {
            Self::GetOutputState { .. } => reply::OUTPUT_STATE_SIZE,
            Self::GetInputValues { .. } => reply::INPUT_VALUES_SIZE,
            Self::GetBatteryLevel => reply::BATTERY_LEVEL_SIZE,
            Self::KeepAlive => reply::KEEP_ALIVE_SIZE,
            Self::LsGetStatus { .. } => reply::LS_STATUS_SIZE,
            Self::LsRead { .. } => reply::LS_READ_SIZE,
            Self::GetCurrentProgramName => reply::PROGRAM_NAME_SIZE,
            Self::MessageRead { .. } => reply::MESSAGE_SIZE,
            _ => reply::STATUS_SIZE,
        }
    }

    /// Encode request to bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        buf.put_u8(Self::FRAME_TYPE.into());
        buf.put_u8(self.opcode().into());

        match self {
            Self::StopProgram
            | Self::GetCurrentProgramName
            | Self::StopSound
            | Self::GetBatteryLevel
            | Self::KeepAlive => {}
            Self::StartProgram { filename } => {
                field::put_str(&mut buf, filename, FILENAME_SIZE);
            }
            Self::PlaySoundFile { filename, repeat } => {
                buf.put_u8(u8::from(*repeat));
                field::put_str(&mut buf, filename, FILENAME_SIZE);
            }
            Self::PlayTone {
                frequency,
                duration_ms,
            } => {
                buf.put_u16_le(*frequency);
                buf.put_u16_le(*duration_ms);
            }
            Self::SetOutputState(cmd) => {
                buf.put_u8(cmd.port.into());
                buf.put_i8(cmd.power);
                buf.put_u8(cmd.mode.bits());
                buf.put_u8(cmd.regulation.into());
                buf.put_i8(cmd.turn_ratio);
                buf.put_u8(cmd.run_state.into());
                buf.put_u32_le(cmd.tacho_limit);
            }
            Self::GetOutputState { port } => buf.put_u8((*port).into()),
            Self::ResetMotorPosition { port, relative } => {
                buf.put_u8((*port).into());
                buf.put_u8(u8::from(*relative));
            }
            Self::SetInputMode {
                port,
                sensor_type,
                sensor_mode,
            } => {
                buf.put_u8((*port).into());
                buf.put_u8((*sensor_type).into());
                buf.put_u8((*sensor_mode).into());
            }
            Self::GetInputValues { port }
            | Self::ResetInputScaledValue { port }
            | Self::LsGetStatus { port }
            | Self::LsRead { port } => buf.put_u8((*port).into()),
            Self::MessageWrite { inbox, message } => {
                let text = field::truncate(message, MESSAGE_WRITE_SIZE - 1);
                buf.put_u8(*inbox);
                // Size counts the terminator
                buf.put_u8(text.len() as u8 + 1);
                field::put_str(&mut buf, text, MESSAGE_WRITE_SIZE);
            }
            Self::MessageRead {
                remote_inbox,
                local_inbox,
                remove,
            } => {
                buf.put_u8(*remote_inbox);
                buf.put_u8(*local_inbox);
                buf.put_u8(u8::from(*remove));
            }
            Self::LsWrite { port, data, rx_len } => {
                let tx = &data[..data.len().min(LS_DATA_SIZE)];
                buf.put_u8((*port).into());
                buf.put_u8(tx.len() as u8);
                buf.put_u8(*rx_len);
                field::put_data(&mut buf, tx, LS_WRITE_SLOT_SIZE);
            }
        }

        debug_assert_eq!(buf.len(), self.encoded_len());
        buf
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request[{}](len={}, reply_len={})",
            self.opcode(),
            self.encoded_len(),
            self.reply_len()
        )
    }
}
