//! Scripted in-memory connector for unit tests.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::transport::{Connection, Connector};

#[derive(Default)]
pub struct MockState {
    pub connects: AtomicUsize,
    pub writes: AtomicUsize,
    connect_failures_left: AtomicUsize,
    write_failures_left: AtomicUsize,
    /// One entry per flushed write
    pub sent: Mutex<Vec<Vec<u8>>>,
}

impl MockState {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().clone()
    }

    pub fn fail_connects(&self, count: usize) {
        self.connect_failures_left.store(count, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, count: usize) {
        self.write_failures_left.store(count, Ordering::SeqCst);
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok()
    }
}

#[derive(Clone, Default)]
pub struct MockConnector {
    pub state: Arc<MockState>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector whose every connect fails
    pub fn unreachable() -> Self {
        let connector = Self::new();
        connector.state.fail_connects(usize::MAX);
        connector
    }
}

impl Connector for MockConnector {
    fn connect(&self, _address: &str) -> io::Result<Box<dyn Connection>> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        if MockState::take_failure(&self.state.connect_failures_left) {
            return Err(io::Error::from(io::ErrorKind::ConnectionRefused));
        }
        Ok(Box::new(MockStream {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        }))
    }
}

struct MockStream {
    state: Arc<MockState>,
    pending: Vec<u8>,
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        if MockState::take_failure(&self.state.write_failures_left) {
            self.pending.clear();
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.state.sent.lock().push(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}
