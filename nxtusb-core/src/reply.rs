//! Reply validation and decoding
//!
//! Replies are not self-describing: their length and layout follow from the
//! request that was sent. Every reply goes through the same checks, in
//! order:
//!
//! 1. exact length for the request
//! 2. frame type is [`FrameType::CommandReply`]
//! 3. opcode echoes the request
//! 4. status byte is zero
//!
//! A reply that fails 1-3 is never inspected for its status.

use bytes::{Buf, Bytes};
use tracing::trace;

use nxtusb_types::{InputValues, OutputState};

use crate::{
    constants::{FrameType, FILENAME_SIZE, LS_DATA_SIZE, MESSAGE_READ_SIZE, REPLY_HEADER_SIZE},
    error::{Error, Result},
    field,
    opcode::Opcode,
    packet::Request,
    status::Status,
};

/// Header-only reply
pub const STATUS_SIZE: usize = REPLY_HEADER_SIZE;
pub const BATTERY_LEVEL_SIZE: usize = REPLY_HEADER_SIZE + 2;
pub const KEEP_ALIVE_SIZE: usize = REPLY_HEADER_SIZE + 4;
pub const LS_STATUS_SIZE: usize = REPLY_HEADER_SIZE + 1;
pub const LS_READ_SIZE: usize = REPLY_HEADER_SIZE + 1 + LS_DATA_SIZE;
pub const PROGRAM_NAME_SIZE: usize = REPLY_HEADER_SIZE + FILENAME_SIZE;
pub const MESSAGE_SIZE: usize = REPLY_HEADER_SIZE + 2 + MESSAGE_READ_SIZE;
pub const OUTPUT_STATE_SIZE: usize = REPLY_HEADER_SIZE + 22;
pub const INPUT_VALUES_SIZE: usize = REPLY_HEADER_SIZE + 13;

/// Mailbox message returned by a message-read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub local_inbox: u8,
    pub text: String,
}

/// Decoded reply payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Success with no payload
    Ok,
    BatteryLevel { millivolts: u16 },
    /// Current sleep time limit
    KeepAlive { sleep_time_ms: u32 },
    CurrentProgramName(String),
    LsStatus { bytes_ready: u8 },
    LsRead(Bytes),
    Message(Message),
    OutputState(OutputState),
    InputValues(InputValues),
}

impl Reply {
    /// Decode the reply to `request`
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if `buf` is not exactly
    ///   [`Request::reply_len`] bytes
    /// - [`Error::UnexpectedFrameType`] or [`Error::OpcodeMismatch`] if the
    ///   reply does not answer `request`
    /// - [`Error::DeviceStatus`] if the brick reported a failure
    ///
    /// # Examples
    ///
    /// ```
    /// use nxtusb_core::{Reply, Request};
    ///
    /// let reply = Reply::decode(&Request::GetBatteryLevel, &[0x02, 0x0B, 0x00, 0xE8, 0x03]).unwrap();
    /// assert_eq!(reply, Reply::BatteryLevel { millivolts: 1000 });
    /// ```
    pub fn decode(request: &Request, buf: &[u8]) -> Result<Self> {
        let opcode = request.opcode();
        let mut payload = check(opcode, request.reply_len(), buf)?;

        let reply = match request {
            Request::GetBatteryLevel => Self::BatteryLevel {
                millivolts: payload.get_u16_le(),
            },
            Request::KeepAlive => Self::KeepAlive {
                sleep_time_ms: payload.get_u32_le(),
            },
            Request::GetCurrentProgramName => Self::CurrentProgramName(field::get_str(payload)),
            Request::LsGetStatus { .. } => Self::LsStatus {
                bytes_ready: payload.get_u8(),
            },
            Request::LsRead { .. } => {
                let bytes_read = payload.get_u8() as usize;
                let len = bytes_read.min(LS_DATA_SIZE);
                Self::LsRead(Bytes::copy_from_slice(&payload[..len]))
            }
            Request::MessageRead { .. } => {
                let local_inbox = payload.get_u8();
                let size = (payload.get_u8() as usize).min(MESSAGE_READ_SIZE);
                Self::Message(Message {
                    local_inbox,
                    text: field::get_str(&payload[..size]),
                })
            }
            Request::GetOutputState { .. } => Self::OutputState(decode_output_state(payload)),
            Request::GetInputValues { .. } => Self::InputValues(decode_input_values(payload)),
            _ => Self::Ok,
        };

        trace!(opcode = %opcode, reply = ?reply, "Decoded reply");

        Ok(reply)
    }
}

/// Validate a reply and return its payload
///
/// Shape and identity are checked before the status byte is looked at.
pub fn check(opcode: Opcode, expected_len: usize, buf: &[u8]) -> Result<&[u8]> {
    if buf.len() != expected_len || buf.len() < REPLY_HEADER_SIZE {
        return Err(Error::LengthMismatch {
            opcode,
            expected: expected_len,
            actual: buf.len(),
        });
    }

    let frame_type = buf[0];
    if frame_type != u8::from(FrameType::CommandReply) {
        return Err(Error::UnexpectedFrameType {
            opcode,
            actual: frame_type,
        });
    }

    let reply_opcode = buf[1];
    if reply_opcode != u8::from(opcode) {
        return Err(Error::OpcodeMismatch {
            expected: opcode,
            actual: reply_opcode,
        });
    }

    let status = Status::from(buf[2]);
    if !status.is_ok() {
        return Err(Error::DeviceStatus { opcode, status });
    }

    Ok(&buf[REPLY_HEADER_SIZE..])
}

fn decode_output_state(mut payload: &[u8]) -> OutputState {
    OutputState {
        port: payload.get_u8(),
        power: payload.get_i8(),
        mode: payload.get_u8(),
        regulation: payload.get_u8(),
        turn_ratio: payload.get_i8(),
        run_state: payload.get_u8(),
        tacho_limit: payload.get_u32_le(),
        tacho_count: payload.get_i32_le(),
        block_tacho_count: payload.get_i32_le(),
        rotation_count: payload.get_i32_le(),
    }
}

fn decode_input_values(mut payload: &[u8]) -> InputValues {
    InputValues {
        port: payload.get_u8(),
        valid: payload.get_u8() != 0,
        calibrated: payload.get_u8() != 0,
        sensor_type: payload.get_u8(),
        sensor_mode: payload.get_u8(),
        raw_value: payload.get_u16_le(),
        normalized_value: payload.get_u16_le(),
        scaled_value: payload.get_i16_le(),
        calibrated_value: payload.get_i16_le(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};
    use nxtusb_types::{InputPort, OutputPort};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn reply_bytes(opcode: Opcode, status: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0x02, opcode.into(), status];
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_battery_level() {
        let reply = Reply::decode(&Request::GetBatteryLevel, &[0x02, 0x0B, 0x00, 0xE8, 0x03]);
        assert_eq!(reply, Ok(Reply::BatteryLevel { millivolts: 1000 }));
    }

    #[test]
    fn test_short_reply_skips_status() {
        let result = Reply::decode(&Request::GetBatteryLevel, &[0x02, 0x0B, 0xBD]);
        assert_eq!(
            result,
            Err(Error::LengthMismatch {
                opcode: Opcode::GetBatteryLevel,
                expected: 5,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_long_reply() {
        let buf = reply_bytes(Opcode::StopProgram, 0x00, &[0x00]);
        let result = Reply::decode(&Request::StopProgram, &buf);
        assert!(matches!(result, Err(Error::LengthMismatch { actual: 4, .. })));
    }

    #[test]
    fn test_empty_reply() {
        let result = Reply::decode(&Request::StopSound, &[]);
        assert!(matches!(result, Err(ref e) if e.is_shape_error()));
    }

    #[test]
    fn test_wrong_frame_type() {
        let result = Reply::decode(&Request::StopProgram, &[0x00, 0x01, 0x00]);
        assert_eq!(
            result,
            Err(Error::UnexpectedFrameType {
                opcode: Opcode::StopProgram,
                actual: 0x00,
            })
        );
    }

    #[test]
    fn test_wrong_opcode() {
        // Keep-alive answered with a battery reply of the same size is still rejected
        let buf = reply_bytes(Opcode::GetBatteryLevel, 0x00, &[0x00, 0x00, 0x00, 0x00]);
        let result = Reply::decode(&Request::KeepAlive, &buf);
        assert_eq!(
            result,
            Err(Error::OpcodeMismatch {
                expected: Opcode::KeepAlive,
                actual: 0x0B,
            })
        );
    }

    #[test]
    fn test_device_status() {
        let buf = reply_bytes(Opcode::StartProgram, 0xBD, &[]);
        let request = Request::StartProgram {
            filename: "missing.rxe".into(),
        };
        let err = Reply::decode(&request, &buf).unwrap_err();

        assert_eq!(err.status(), Some(Status::RequestFailed));
        assert_eq!(
            err.to_string(),
            "Request failed (i.e. specified file not found)"
        );
    }

    #[test]
    fn test_undocumented_status_is_error() {
        let buf = reply_bytes(Opcode::StopProgram, 0x13, &[]);
        let err = Reply::decode(&Request::StopProgram, &buf).unwrap_err();
        assert_eq!(err.status(), Some(Status::Unknown(0x13)));
    }

    #[test]
    fn test_status_only_reply() {
        let buf = reply_bytes(Opcode::PlayTone, 0x00, &[]);
        let request = Request::PlayTone {
            frequency: 440,
            duration_ms: 500,
        };
        assert_eq!(Reply::decode(&request, &buf), Ok(Reply::Ok));
    }

    #[test]
    fn test_keep_alive() {
        let buf = reply_bytes(Opcode::KeepAlive, 0x00, &600_000u32.to_le_bytes());
        assert_eq!(
            Reply::decode(&Request::KeepAlive, &buf),
            Ok(Reply::KeepAlive {
                sleep_time_ms: 600_000
            })
        );
    }

    #[test]
    fn test_current_program_name() {
        let mut name = [0u8; 20];
        name[..9].copy_from_slice(b"Motor.rxe");
        let buf = reply_bytes(Opcode::GetCurrentProgramName, 0x00, &name);

        assert_eq!(
            Reply::decode(&Request::GetCurrentProgramName, &buf),
            Ok(Reply::CurrentProgramName("Motor.rxe".into()))
        );
    }

    #[test]
    fn test_current_program_name_no_program() {
        let buf = reply_bytes(Opcode::GetCurrentProgramName, 0xEC, &[0u8; 20]);
        let err = Reply::decode(&Request::GetCurrentProgramName, &buf).unwrap_err();
        assert_eq!(err.status(), Some(Status::NoActiveProgram));
    }

    #[test]
    fn test_ls_status() {
        let buf = reply_bytes(Opcode::LsGetStatus, 0x00, &[0x02]);
        let request = Request::LsGetStatus {
            port: InputPort::Four,
        };
        assert_eq!(
            Reply::decode(&request, &buf),
            Ok(Reply::LsStatus { bytes_ready: 2 })
        );
    }

    #[test]
    fn test_ls_read() {
        let mut payload = vec![0x03, 0x10, 0x20, 0x30];
        payload.resize(17, 0xEE);
        let buf = reply_bytes(Opcode::LsRead, 0x00, &payload);
        let request = Request::LsRead {
            port: InputPort::Four,
        };

        assert_eq!(
            Reply::decode(&request, &buf),
            Ok(Reply::LsRead(Bytes::from_static(&[0x10, 0x20, 0x30])))
        );
    }

    #[test]
    fn test_ls_read_clamps_count() {
        let mut payload = vec![0xFF];
        payload.resize(17, 0x01);
        let buf = reply_bytes(Opcode::LsRead, 0x00, &payload);
        let request = Request::LsRead {
            port: InputPort::One,
        };

        match Reply::decode(&request, &buf) {
            Ok(Reply::LsRead(data)) => assert_eq!(data.len(), 16),
            other => panic!("Expected LsRead, got {:?}", other),
        }
    }

    #[test]
    fn test_message_read() {
        let mut payload = vec![0x00, 0x06];
        payload.extend_from_slice(b"hello\0");
        payload.resize(60, 0);
        let buf = reply_bytes(Opcode::MessageRead, 0x00, &payload);
        let request = Request::MessageRead {
            remote_inbox: 10,
            local_inbox: 0,
            remove: true,
        };

        assert_eq!(
            Reply::decode(&request, &buf),
            Ok(Reply::Message(Message {
                local_inbox: 0,
                text: "hello".into(),
            }))
        );
    }

    #[test]
    fn test_message_read_empty_queue() {
        let buf = reply_bytes(Opcode::MessageRead, 0x40, &[0u8; 60]);
        let request = Request::MessageRead {
            remote_inbox: 0,
            local_inbox: 0,
            remove: false,
        };
        let err = Reply::decode(&request, &buf).unwrap_err();
        assert_eq!(err.status(), Some(Status::QueueEmpty));
    }

    #[test]
    fn test_output_state() {
        let mut payload = BytesMut::new();
        payload.put_u8(0x01);
        payload.put_i8(-75);
        payload.put_u8(0x05);
        payload.put_u8(0x02);
        payload.put_i8(-20);
        payload.put_u8(0x20);
        payload.put_u32_le(720);
        payload.put_i32_le(-360);
        payload.put_i32_le(90);
        payload.put_i32_le(-1);
        let buf = reply_bytes(Opcode::GetOutputState, 0x00, &payload);
        let request = Request::GetOutputState {
            port: OutputPort::B,
        };

        assert_eq!(
            Reply::decode(&request, &buf),
            Ok(Reply::OutputState(OutputState {
                port: 0x01,
                power: -75,
                mode: 0x05,
                regulation: 0x02,
                turn_ratio: -20,
                run_state: 0x20,
                tacho_limit: 720,
                tacho_count: -360,
                block_tacho_count: 90,
                rotation_count: -1,
            }))
        );
    }

    #[test]
    fn test_output_state_undeclared_fields() {
        let mut payload = [0u8; 22];
        payload[0] = 0x09;
        payload[2] = 0xF0;
        payload[5] = 0x77;
        let buf = reply_bytes(Opcode::GetOutputState, 0x00, &payload);
        let request = Request::GetOutputState {
            port: OutputPort::A,
        };

        match Reply::decode(&request, &buf) {
            Ok(Reply::OutputState(state)) => {
                assert_eq!(state.port, 0x09);
                assert_eq!(state.mode, 0xF0);
                assert_eq!(state.run_state, 0x77);
            }
            other => panic!("Expected OutputState, got {:?}", other),
        }
    }

    #[test]
    fn test_input_values() {
        let mut payload = BytesMut::new();
        payload.put_u8(0x02);
        payload.put_u8(1);
        payload.put_u8(0);
        payload.put_u8(0x05);
        payload.put_u8(0x80);
        payload.put_u16_le(612);
        payload.put_u16_le(598);
        payload.put_i16_le(-42);
        payload.put_i16_le(0);
        let buf = reply_bytes(Opcode::GetInputValues, 0x00, &payload);
        let request = Request::GetInputValues {
            port: InputPort::Three,
        };

        assert_eq!(
            Reply::decode(&request, &buf),
            Ok(Reply::InputValues(InputValues {
                port: 0x02,
                valid: true,
                calibrated: false,
                sensor_type: 0x05,
                sensor_mode: 0x80,
                raw_value: 612,
                normalized_value: 598,
                scaled_value: -42,
                calibrated_value: 0,
            }))
        );
    }

    proptest! {
        #[test]
        fn prop_wrong_length_is_shape_error(len in 0usize..=64, status in any::<u8>()) {
            prop_assume!(len != BATTERY_LEVEL_SIZE);
            let mut buf = vec![0u8; len];
            if len >= 3 {
                buf[0] = 0x02;
                buf[1] = 0x0B;
                buf[2] = status;
            }
            let err = Reply::decode(&Request::GetBatteryLevel, &buf).unwrap_err();
            prop_assert!(err.is_shape_error());
        }

        #[test]
        fn prop_foreign_frame_type_is_protocol_error(frame in any::<u8>(), status in any::<u8>()) {
            prop_assume!(frame != 0x02);
            let buf = [frame, 0x0B, status, 0x00, 0x00];
            let err = Reply::decode(&Request::GetBatteryLevel, &buf).unwrap_err();
            prop_assert!(err.is_protocol_error());
        }

        #[test]
        fn prop_foreign_opcode_is_protocol_error(opcode in any::<u8>(), status in any::<u8>()) {
            prop_assume!(opcode != 0x0B);
            let buf = [0x02, opcode, status, 0x00, 0x00];
            let err = Reply::decode(&Request::GetBatteryLevel, &buf).unwrap_err();
            prop_assert!(err.is_protocol_error());
        }
    }
}
