//! USB bulk transport for NXT bricks
//!
//! The brick exposes a single vendor interface with one bulk OUT and one
//! bulk IN endpoint. Each request is one OUT transfer; each reply is one IN
//! transfer of at most 64 bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use nusb::transfer::RequestBuffer;
use nusb::Interface;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// LEGO vendor ID
pub const VENDOR_ID: u16 = 0x0694;

/// NXT brick product ID
pub const PRODUCT_ID: u16 = 0x0002;

/// USB settings for reaching a brick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    pub endpoint_out: u8,
    pub endpoint_in: u8,
    /// Per-transfer timeout
    pub timeout: Duration,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            interface: 0,
            endpoint_out: 0x01,
            endpoint_in: 0x82,
            timeout: Duration::from_millis(1000),
        }
    }
}

impl UsbConfig {
    /// Set transfer timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Match a different vendor/product pair (firmware variants, clones)
    pub fn with_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self.product_id = product_id;
        self
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// USB transport for NXT bricks
///
/// Claims the brick's interface on [`open`](Transport::open); dropping the
/// transport releases it.
pub struct UsbTransport {
    config: UsbConfig,
    interface: Option<Interface>,
    location: Option<String>,
}

impl UsbTransport {
    /// Create new USB transport
    pub fn new(config: UsbConfig) -> Self {
        Self {
            config,
            interface: None,
            location: None,
        }
    }

    pub fn config(&self) -> &UsbConfig {
        &self.config
    }

    fn interface(&self) -> Result<&Interface> {
        self.interface.as_ref().ok_or(Error::NotOpen)
    }
}

impl Default for UsbTransport {
    fn default() -> Self {
        Self::new(UsbConfig::default())
    }
}

#[async_trait]
impl Transport for UsbTransport {
    async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        let (vendor_id, product_id) = (self.config.vendor_id, self.config.product_id);

        let info = nusb::list_devices()?
            .find(|d| d.vendor_id() == vendor_id && d.product_id() == product_id)
            .ok_or(Error::DeviceNotFound {
                vendor_id,
                product_id,
            })?;

        let location = format!(
            "usb:{:03}/{:03}",
            info.bus_number(),
            info.device_address()
        );

        debug!("Opening brick at {}...", location);

        let device = info.open()?;
        let interface = device.claim_interface(self.config.interface)?;

        debug!(
            "Claimed interface {} on {}",
            self.config.interface, location
        );

        self.interface = Some(interface);
        self.location = Some(location);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(interface) = self.interface.take() {
            debug!("Releasing {}...", self.description());
            drop(interface);
        }

        self.location = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.interface.is_some()
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        let interface = self.interface()?;

        trace!("Sending {} bytes: {:02X?}", data.len(), data);

        let transfer = interface.bulk_out(self.config.endpoint_out, data.to_vec());
        let completion = timeout(self.config.timeout, transfer)
            .await
            .map_err(|_| {
                warn!("Write timeout after {}ms", self.config.timeout_ms());
                Error::Timeout {
                    timeout_ms: self.config.timeout_ms(),
                }
            })?;

        let sent = completion
            .into_result()
            .map_err(|e| Error::Transfer(e.to_string()))?;

        Ok(sent.actual_length())
    }

    async fn read(&mut self, max_len: usize) -> Result<BytesMut> {
        let interface = self.interface()?;

        let transfer = interface.bulk_in(self.config.endpoint_in, RequestBuffer::new(max_len));
        let completion = timeout(self.config.timeout, transfer)
            .await
            .map_err(|_| {
                warn!("Read timeout after {}ms", self.config.timeout_ms());
                Error::Timeout {
                    timeout_ms: self.config.timeout_ms(),
                }
            })?;

        let data = completion
            .into_result()
            .map_err(|e| Error::Transfer(e.to_string()))?;

        trace!("Received {} bytes: {:02X?}", data.len(), &data[..]);

        Ok(BytesMut::from(&data[..]))
    }

    fn description(&self) -> String {
        self.location.clone().unwrap_or_else(|| {
            format!(
                "usb:{:04X}:{:04X}",
                self.config.vendor_id, self.config.product_id
            )
        })
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("USB transport dropped while still open");
        }
    }
}
