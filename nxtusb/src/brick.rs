//! High-level brick interface

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use nxtusb_core::{Message, Reply, Request, MAX_REPLY_SIZE};
use nxtusb_transport::{Transport, UsbConfig, UsbTransport};
use nxtusb_types::{
    InputPort, InputValues, OutputCommand, OutputPort, OutputState, SensorMode, SensorType,
};

use crate::error::{Error, Result};

/// NXT brick
///
/// High-level interface for sending direct commands to a LEGO Mindstorms NXT
/// brick. Every command is one request and one reply; the transport stays
/// locked for the whole exchange, so a `Brick` can be shared between tasks
/// without replies getting crossed.
///
/// # Examples
///
/// ```no_run
/// use nxtusb::Brick;
///
/// #[tokio::main]
/// async fn main() -> nxtusb::Result<()> {
///     let brick = Brick::open().await?;
///
///     let mv = brick.battery_level().await?;
///     println!("Battery: {} mV", mv);
///
///     brick.close().await?;
///     Ok(())
/// }
/// ```
pub struct Brick {
    transport: Mutex<Box<dyn Transport>>,
}

impl Brick {
    /// Find the first brick on the USB bus and claim it
    pub async fn open() -> Result<Self> {
        Self::open_with(UsbConfig::default()).await
    }

    /// Find and claim a brick with custom USB settings
    pub async fn open_with(config: UsbConfig) -> Result<Self> {
        Self::connect(Box::new(UsbTransport::new(config))).await
    }

    /// Use an existing transport, opening it if needed
    pub async fn connect(mut transport: Box<dyn Transport>) -> Result<Self> {
        if !transport.is_open() {
            transport.open().await?;
        }

        info!("Connected to brick at {}", transport.description());

        Ok(Self {
            transport: Mutex::new(transport),
        })
    }

    /// Release the brick
    pub async fn close(self) -> Result<()> {
        let mut transport = self.transport.into_inner();

        info!("Closing brick at {}...", transport.description());

        transport.close().await?;
        Ok(())
    }

    /// Send one request and decode its reply
    ///
    /// Fails on a short write, a transport error, a reply of the wrong shape
    /// or identity, or a non-zero status, in that order of precedence.
    pub async fn execute(&self, request: &Request) -> Result<Reply> {
        let data = request.encode();

        let buf = {
            let mut transport = self.transport.lock().await;

            trace!("Sending {}: {}", request, hex::encode(&data));

            let sent = transport.write(&data).await?;
            if sent != data.len() {
                warn!("Short write for {}: {} of {} bytes", request, sent, data.len());
                return Err(Error::ShortWrite {
                    expected: data.len(),
                    actual: sent,
                });
            }

            transport.read(MAX_REPLY_SIZE).await?
        };

        trace!("Received {} bytes: {}", buf.len(), hex::encode(&buf));

        match Reply::decode(request, &buf) {
            Ok(reply) => Ok(reply),
            Err(e) => {
                debug!("{} failed: {}", request.opcode(), e);
                Err(e.into())
            }
        }
    }

    async fn execute_ok(&self, request: Request) -> Result<()> {
        match self.execute(&request).await? {
            Reply::Ok => Ok(()),
            other => Err(unexpected(&request, &other)),
        }
    }

    // Program control

    /// Start a program stored on the brick
    ///
    /// Names longer than 19 characters are truncated.
    pub async fn start_program(&self, filename: &str) -> Result<()> {
        debug!("Starting program {}...", filename);
        self.execute_ok(Request::StartProgram {
            filename: filename.to_owned(),
        })
        .await
    }

    /// Stop the running program
    pub async fn stop_program(&self) -> Result<()> {
        debug!("Stopping program...");
        self.execute_ok(Request::StopProgram).await
    }

    /// Name of the running program
    pub async fn current_program_name(&self) -> Result<String> {
        let request = Request::GetCurrentProgramName;
        match self.execute(&request).await? {
            Reply::CurrentProgramName(name) => Ok(name),
            other => Err(unexpected(&request, &other)),
        }
    }

    // Sound

    /// Play a sound file stored on the brick, optionally on repeat
    pub async fn play_sound_file(&self, filename: &str, repeat: bool) -> Result<()> {
        debug!("Playing {} (repeat={})...", filename, repeat);
        self.execute_ok(Request::PlaySoundFile {
            filename: filename.to_owned(),
            repeat,
        })
        .await
    }

    /// Play a tone of `frequency` Hz for `duration_ms` milliseconds
    pub async fn play_tone(&self, frequency: u16, duration_ms: u16) -> Result<()> {
        self.execute_ok(Request::PlayTone {
            frequency,
            duration_ms,
        })
        .await
    }

    /// Stop any tone or sound file that is playing
    pub async fn stop_sound(&self) -> Result<()> {
        self.execute_ok(Request::StopSound).await
    }

    // Motors

    /// Drive a motor as described by `command`
    pub async fn set_output_state(&self, command: OutputCommand) -> Result<()> {
        debug!(
            "Setting output {}: power={}, mode=0x{:02X}",
            command.port,
            command.power,
            command.mode.bits()
        );
        self.execute_ok(Request::SetOutputState(command)).await
    }

    /// Current state of a motor, including its tacho counters
    pub async fn get_output_state(&self, port: OutputPort) -> Result<OutputState> {
        let request = Request::GetOutputState { port };
        match self.execute(&request).await? {
            Reply::OutputState(state) => Ok(state),
            other => Err(unexpected(&request, &other)),
        }
    }

    /// Reset the motor position counter
    ///
    /// With `relative` set, only the block-relative position is reset.
    pub async fn reset_motor_position(&self, port: OutputPort, relative: bool) -> Result<()> {
        self.execute_ok(Request::ResetMotorPosition { port, relative })
            .await
    }

    // Sensors

    /// Configure the sensor type and mode of an input port
    pub async fn set_input_mode(
        &self,
        port: InputPort,
        sensor_type: SensorType,
        sensor_mode: SensorMode,
    ) -> Result<()> {
        debug!(
            "Setting input {}: type={:?}, mode={:?}",
            port, sensor_type, sensor_mode
        );
        self.execute_ok(Request::SetInputMode {
            port,
            sensor_type,
            sensor_mode,
        })
        .await
    }

    /// Read the values of a sensor
    pub async fn get_input_values(&self, port: InputPort) -> Result<InputValues> {
        let request = Request::GetInputValues { port };
        match self.execute(&request).await? {
            Reply::InputValues(values) => Ok(values),
            other => Err(unexpected(&request, &other)),
        }
    }

    /// Reset the scaled value of a sensor, clearing its counters
    pub async fn reset_input_scaled_value(&self, port: InputPort) -> Result<()> {
        self.execute_ok(Request::ResetInputScaledValue { port })
            .await
    }

    // Low-speed (I2C) bus

    /// Bytes waiting to be read from a low-speed sensor
    pub async fn ls_get_status(&self, port: InputPort) -> Result<u8> {
        let request = Request::LsGetStatus { port };
        match self.execute(&request).await? {
            Reply::LsStatus { bytes_ready } => Ok(bytes_ready),
            other => Err(unexpected(&request, &other)),
        }
    }

    /// Write to a low-speed sensor, expecting `rx_len` bytes in response
    ///
    /// At most 16 bytes of `data` are sent.
    pub async fn ls_write(&self, port: InputPort, data: &[u8], rx_len: u8) -> Result<()> {
        self.execute_ok(Request::LsWrite {
            port,
            data: Bytes::copy_from_slice(data),
            rx_len,
        })
        .await
    }

    /// Read the bytes a low-speed sensor has ready
    pub async fn ls_read(&self, port: InputPort) -> Result<Bytes> {
        let request = Request::LsRead { port };
        match self.execute(&request).await? {
            Reply::LsRead(data) => Ok(data),
            other => Err(unexpected(&request, &other)),
        }
    }

    // Mailboxes

    /// Write a message to one of the running program's inboxes
    ///
    /// Messages longer than 58 characters are truncated.
    pub async fn message_write(&self, inbox: u8, message: &str) -> Result<()> {
        self.execute_ok(Request::MessageWrite {
            inbox,
            message: message.to_owned(),
        })
        .await
    }

    /// Read a message from `remote_inbox`, optionally removing it from the queue
    pub async fn message_read(
        &self,
        remote_inbox: u8,
        local_inbox: u8,
        remove: bool,
    ) -> Result<Message> {
        let request = Request::MessageRead {
            remote_inbox,
            local_inbox,
            remove,
        };
        match self.execute(&request).await? {
            Reply::Message(message) => Ok(message),
            other => Err(unexpected(&request, &other)),
        }
    }

    // Brick status

    /// Battery voltage in millivolts
    pub async fn battery_level(&self) -> Result<u16> {
        match self.execute(&Request::GetBatteryLevel).await? {
            Reply::BatteryLevel { millivolts } => Ok(millivolts),
            other => Err(unexpected(&Request::GetBatteryLevel, &other)),
        }
    }

    /// Reset the sleep timer, returning the sleep time limit in milliseconds
    pub async fn keep_alive(&self) -> Result<u32> {
        match self.execute(&Request::KeepAlive).await? {
            Reply::KeepAlive { sleep_time_ms } => Ok(sleep_time_ms),
            other => Err(unexpected(&Request::KeepAlive, &other)),
        }
    }
}

fn unexpected(request: &Request, reply: &Reply) -> Error {
    Error::UnexpectedReply(format!("{:?} in answer to {}", reply, request.opcode()))
}
