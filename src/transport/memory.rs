//! In-memory transport for tests.

use crate::model::TransportError;
use crate::transport::{Link, Transport};
use std::cell::RefCell;
use std::rc::Rc;

/// Transport whose links record every write in a shared buffer.
///
/// `available = false` makes `open` fail with `NotFound`, simulating an
/// unplugged device. Clones share both the write log and availability.
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    writes: Rc<RefCell<Vec<Vec<u8>>>>,
    available: Rc<RefCell<bool>>,
    fail_writes: Rc<RefCell<bool>>,
    opens: Rc<RefCell<u32>>,
}

impl MemoryTransport {
    /// Create a transport; `available` controls whether `open` succeeds.
    pub fn new(available: bool) -> Self {
        Self {
            writes: Rc::default(),
            available: Rc::new(RefCell::new(available)),
            fail_writes: Rc::default(),
            opens: Rc::default(),
        }
    }

    /// Plug or unplug the simulated device.
    pub fn set_available(&self, available: bool) {
        *self.available.borrow_mut() = available;
    }

    /// Make subsequent writes fail.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    /// All buffers written so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.borrow().clone()
    }

    /// Number of successful `open` calls.
    pub fn opens(&self) -> u32 {
        *self.opens.borrow()
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self) -> Result<Box<dyn Link>, TransportError> {
        if !*self.available.borrow() {
            return Err(TransportError::NotFound {
                prefix: "mem".to_string(),
                attempts: 1,
                scan_limit: 1,
            });
        }
        *self.opens.borrow_mut() += 1;
        Ok(Box::new(MemoryLink {
            transport: self.clone(),
        }))
    }
}

struct MemoryLink {
    transport: MemoryTransport,
}

impl Link for MemoryLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if *self.transport.fail_writes.borrow() {
            return Err(TransportError::Write {
                location: "mem0".to_string(),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        self.transport.writes.borrow_mut().push(bytes.to_vec());
        Ok(())
    }

    fn location(&self) -> &str {
        "mem0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_transport_fails_to_open() {
        let mut transport = MemoryTransport::new(false);
        assert!(matches!(
            transport.open(),
            Err(TransportError::NotFound { .. })
        ));
        assert_eq!(transport.opens(), 0);
    }

    #[test]
    fn writes_are_recorded_in_order() {
        let mut transport = MemoryTransport::new(true);
        let mut link = transport.open().unwrap();
        link.write(b"ab").unwrap();
        link.write(b"c").unwrap();
        assert_eq!(transport.writes(), vec![b"ab".to_vec(), b"c".to_vec()]);
        assert_eq!(link.location(), "mem0");
    }

    #[test]
    fn failing_writes_report_write_error() {
        let mut transport = MemoryTransport::new(true);
        let mut link = transport.open().unwrap();
        transport.set_fail_writes(true);
        assert!(matches!(
            link.write(b"x"),
            Err(TransportError::Write { .. })
        ));
        assert!(transport.writes().is_empty());
    }
}
