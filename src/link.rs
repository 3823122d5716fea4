use crate::debug_link;
use crate::error::LinkError;
use std::io::Write;
use std::time::Duration;

// Writes to the rig block until drained; the port timeout only bounds a
// wedged controller.
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort byte sink to the motor controller.
///
/// The link is either connected or was never there; an absent link turns
/// every send into a silent no-op so the pipeline runs headless. A
/// connected link is never demoted back to absent: write failures surface
/// as errors instead of being swallowed.
pub struct LinkTransport {
    sink: Option<Box<dyn Write + Send>>,
}

impl LinkTransport {
    /// Open the serial device. 8 data bits, no parity, one stop bit, as the
    /// controller firmware expects.
    pub fn open(port: &str, baud: u32) -> Result<Self, LinkError> {
        let serial = serialport::new(port, baud)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| LinkError::Unavailable {
                port: port.to_string(),
                source,
            })?;
        debug_link!("Opened {} at {} baud", port, baud);
        Ok(LinkTransport {
            sink: Some(Box::new(serial)),
        })
    }

    /// A link that was never connected; sends are dropped.
    pub fn absent() -> Self {
        LinkTransport { sink: None }
    }

    /// Wrap an arbitrary writer. Used by tests to capture frames.
    #[cfg(test)]
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        LinkTransport { sink: Some(writer) }
    }

    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }

    /// Blocking write + flush of one frame. No-op when absent; errors are
    /// surfaced, never retried.
    pub fn send(&mut self, frame_bytes: &[u8]) -> Result<(), LinkError> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        sink.write_all(frame_bytes)?;
        sink.flush()?;
        debug_link!("Sent {} bytes", frame_bytes.len());
        Ok(())
    }

    /// Drop the underlying device. Safe to call more than once.
    pub fn close(&mut self) {
        if self.sink.take().is_some() {
            debug_link!("Link closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Shared buffer writer so the test can inspect what was sent.
    #[derive(Clone)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "controller gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_absent_link_drops_sends() {
        let mut link = LinkTransport::absent();
        assert!(!link.is_connected());
        assert!(link.send(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_connected_link_forwards_bytes() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let mut link = LinkTransport::from_writer(Box::new(SharedSink(captured.clone())));
        assert!(link.is_connected());
        link.send(&[0xAA, 0xBB]).unwrap();
        link.send(&[0xCC]).unwrap();
        assert_eq!(*captured.lock().unwrap(), vec![0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let mut link = LinkTransport::from_writer(Box::new(FailingSink));
        let err = link.send(&[0x00]).unwrap_err();
        assert!(matches!(err, LinkError::Io(_)));
        // The link stays "connected": failures are not a silent demotion.
        assert!(link.is_connected());
    }

    #[test]
    fn test_close_is_idempotent() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let mut link = LinkTransport::from_writer(Box::new(SharedSink(captured)));
        link.close();
        assert!(!link.is_connected());
        link.close();
        assert!(link.send(&[1]).is_ok());
    }
}
