//! Blocking brick interface
//!
//! Wraps [`crate::Brick`] with a private current-thread runtime, so each call
//! blocks the calling thread until the brick answers or the transfer times
//! out. Must not be used from inside an async runtime; use the async
//! [`Brick`](crate::Brick) there instead.
//!
//! ```no_run
//! let brick = nxtusb::blocking::Brick::open()?;
//! brick.play_tone(440, 500)?;
//! brick.close()?;
//! # Ok::<(), nxtusb::Error>(())
//! ```

use bytes::Bytes;
use tokio::runtime::{Builder, Runtime};

use nxtusb_core::{Message, Reply, Request};
use nxtusb_transport::{Transport, UsbConfig};
use nxtusb_types::{
    InputPort, InputValues, OutputCommand, OutputPort, OutputState, SensorMode, SensorType,
};

use crate::error::Result;

/// Blocking NXT brick
pub struct Brick {
    inner: crate::Brick,
    runtime: Runtime,
}

fn runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_time().build()?)
}

impl Brick {
    pub fn open() -> Result<Self> {
        Self::open_with(UsbConfig::default())
    }

    pub fn open_with(config: UsbConfig) -> Result<Self> {
        let runtime = runtime()?;
        let inner = runtime.block_on(crate::Brick::open_with(config))?;
        Ok(Self { inner, runtime })
    }

    pub fn connect(transport: Box<dyn Transport>) -> Result<Self> {
        let runtime = runtime()?;
        let inner = runtime.block_on(crate::Brick::connect(transport))?;
        Ok(Self { inner, runtime })
    }

    pub fn close(self) -> Result<()> {
        let Self { inner, runtime } = self;
        runtime.block_on(inner.close())
    }

    pub fn execute(&self, request: &Request) -> Result<Reply> {
        self.runtime.block_on(self.inner.execute(request))
    }

    pub fn start_program(&self, filename: &str) -> Result<()> {
        self.runtime.block_on(self.inner.start_program(filename))
    }

    pub fn stop_program(&self) -> Result<()> {
        self.runtime.block_on(self.inner.stop_program())
    }

    pub fn current_program_name(&self) -> Result<String> {
        self.runtime.block_on(self.inner.current_program_name())
    }

    pub fn play_sound_file(&self, filename: &str, repeat: bool) -> Result<()> {
        self.runtime
            .block_on(self.inner.play_sound_file(filename, repeat))
    }

    pub fn play_tone(&self, frequency: u16, duration_ms: u16) -> Result<()> {
        self.runtime
            .block_on(self.inner.play_tone(frequency, duration_ms))
    }

    pub fn stop_sound(&self) -> Result<()> {
        self.runtime.block_on(self.inner.stop_sound())
    }

    pub fn set_output_state(&self, command: OutputCommand) -> Result<()> {
        self.runtime.block_on(self.inner.set_output_state(command))
    }

    pub fn get_output_state(&self, port: OutputPort) -> Result<OutputState> {
        self.runtime.block_on(self.inner.get_output_state(port))
    }

    pub fn reset_motor_position(&self, port: OutputPort, relative: bool) -> Result<()> {
        self.runtime
            .block_on(self.inner.reset_motor_position(port, relative))
    }

    pub fn set_input_mode(
        &self,
        port: InputPort,
        sensor_type: SensorType,
        sensor_mode: SensorMode,
    ) -> Result<()> {
        self.runtime
            .block_on(self.inner.set_input_mode(port, sensor_type, sensor_mode))
    }

    pub fn get_input_values(&self, port: InputPort) -> Result<InputValues> {
        self.runtime.block_on(self.inner.get_input_values(port))
    }

    pub fn reset_input_scaled_value(&self, port: InputPort) -> Result<()> {
        self.runtime
            .block_on(self.inner.reset_input_scaled_value(port))
    }

    pub fn ls_get_status(&self, port: InputPort) -> Result<u8> {
        self.runtime.block_on(self.inner.ls_get_status(port))
    }

    pub fn ls_write(&self, port: InputPort, data: &[u8], rx_len: u8) -> Result<()> {
        self.runtime
            .block_on(self.inner.ls_write(port, data, rx_len))
    }

    pub fn ls_read(&self, port: InputPort) -> Result<Bytes> {
        self.runtime.block_on(self.inner.ls_read(port))
    }

    pub fn message_write(&self, inbox: u8, message: &str) -> Result<()> {
        self.runtime.block_on(self.inner.message_write(inbox, message))
    }

    pub fn message_read(&self, remote_inbox: u8, local_inbox: u8, remove: bool) -> Result<Message> {
        self.runtime
            .block_on(self.inner.message_read(remote_inbox, local_inbox, remove))
    }

    pub fn battery_level(&self) -> Result<u16> {
        self.runtime.block_on(self.inner.battery_level())
    }

    pub fn keep_alive(&self) -> Result<u32> {
        self.runtime.block_on(self.inner.keep_alive())
    }
}
