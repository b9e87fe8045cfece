//! Extra output streams

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// A registered extra output stream
pub type OutputStream = Box<dyn Write + Send>;

/// An in-memory byte sink that can be cloned and read back
///
/// Every clone shares the same buffer, so one clone can be handed to a
/// logger while another inspects what was written.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Written text split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write one line to every stream, flushing each.
///
/// A failing stream does not stop delivery to the rest; its error is
/// returned in stream order.
pub fn broadcast(streams: &mut [OutputStream], line: &str) -> Vec<io::Error> {
    let mut failures = Vec::new();
    for stream in streams.iter_mut() {
        if let Err(err) = stream.write_all(line.as_bytes()).and_then(|_| stream.flush()) {
            failures.push(err);
        }
    }
    failures
}
