use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

/// In-memory stand-in for the serial device.
#[derive(Clone, Default)]
pub struct Wire {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Wire {
    pub fn new() -> Wire {
        Wire::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    /// The written lines without their CR+LF terminator.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .split_terminator("\n\r")
            .map(|l| l.to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().unwrap().clear();
    }
}

impl Write for Wire {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
