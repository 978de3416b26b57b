use std::io;
use std::io::Write;

use anyhow::anyhow;
use log::info;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

/// Anything the controller can push hardware frames into.
pub type Link = Box<dyn Write + Send>;

pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialLink {
    /// Opens the serial device the LED driver is attached to.
    ///
    /// Arguments:
    ///   path:     Device path, e.g. `/dev/ttyUSB0`.
    ///   baudrate: Must match the firmware of the microcontroller.
    pub fn open(path: &str, baudrate: u32) -> anyhow::Result<SerialLink> {
        let port = serialport::new(path, baudrate)
            .open()
            .map_err(|e| anyhow!("failed to open {}: {}", path, e))?;
        return Ok(SerialLink { port });
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

/// Where to find the LED driver. Both values are required; if either is
/// missing the controller runs in simulated mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub devicestring: Option<String>,
    pub baudrate: Option<u32>,
}

impl LinkConfig {
    /// Returns `None` when the link is unavailable. That decision is final
    /// for the lifetime of the process; there is no reconnect.
    pub fn open_or_simulate(&self) -> Option<Link> {
        let path = match &self.devicestring {
            Some(path) => path,
            None => {
                warn!("no device path configured (running in simulated mode)");
                return None;
            }
        };
        let baudrate = match self.baudrate {
            Some(baudrate) => baudrate,
            None => {
                warn!("no baud rate configured (running in simulated mode)");
                return None;
            }
        };
        info!("trying to initialize serial connection");
        match SerialLink::open(path, baudrate) {
            Ok(link) => {
                info!("serial connection on {} initialized successfully", path);
                Some(Box::new(link))
            }
            Err(err) => {
                warn!(
                    "could not initialize serial connection on {}: {} (running in simulated mode)",
                    path, err
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_simulates() {
        let config = LinkConfig {
            devicestring: None,
            baudrate: Some(230400),
        };
        assert!(config.open_or_simulate().is_none());
    }

    #[test]
    fn missing_baudrate_simulates() {
        let config = LinkConfig {
            devicestring: Some("/dev/ttyUSB0".to_string()),
            baudrate: None,
        };
        assert!(config.open_or_simulate().is_none());
    }

    #[test]
    fn open_failure_simulates() {
        let config = LinkConfig {
            devicestring: Some("/nonexistent/light-controller-tty".to_string()),
            baudrate: Some(230400),
        };
        assert!(config.open_or_simulate().is_none());
    }
}
