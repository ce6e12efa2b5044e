//! Scripted transport shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::BytesMut;
use nxtusb_transport::{Error, Result, Transport};

#[derive(Default)]
pub struct Script {
    pub writes: Vec<Vec<u8>>,
    pub replies: VecDeque<Result<Vec<u8>>>,
    /// Bytes reported as sent; `None` reports the full request
    pub short_write: Option<usize>,
    pub open: bool,
    pub closed: bool,
}

/// In-memory transport returning queued replies and recording every write
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, bytes: &[u8]) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(bytes.to_vec()));
        self
    }

    pub fn fail_read(self, error: Error) -> Self {
        self.script.lock().unwrap().replies.push_back(Err(error));
        self
    }

    pub fn short_write(self, sent: usize) -> Self {
        self.script.lock().unwrap().short_write = Some(sent);
        self
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.script.lock().unwrap().writes.clone()
    }

    pub fn reads_left(&self) -> usize {
        self.script.lock().unwrap().replies.len()
    }

    pub fn closed(&self) -> bool {
        self.script.lock().unwrap().closed
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn open(&mut self) -> Result<()> {
        self.script.lock().unwrap().open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.open = false;
        script.closed = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.script.lock().unwrap().open
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut script = self.script.lock().unwrap();
        script.writes.push(data.to_vec());
        Ok(script.short_write.unwrap_or(data.len()))
    }

    async fn read(&mut self, max_len: usize) -> Result<BytesMut> {
        let next = self
            .script
            .lock()
            .unwrap()
            .replies
            .pop_front()
            .unwrap_or(Err(Error::Timeout { timeout_ms: 1000 }));

        let mut bytes = next?;
        bytes.truncate(max_len);
        Ok(BytesMut::from(&bytes[..]))
    }

    fn description(&self) -> String {
        "scripted".to_string()
    }
}
