//! Serial device discovery and writing.
//!
//! Devices are found by probing `<prefix>0`, `<prefix>1`, ... up to a scan
//! limit, repeating the scan a bounded number of times. Once opened, the
//! line is set to [`LineSettings`] (9600 8N1 by default) with hang-up on
//! close disabled. Platform details (path spelling, presence check, line
//! configuration) live in the `platform` module selected at build time.

use crate::model::TransportError;
use crate::transport::{Link, Transport};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Probe passes made before giving up.
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Exclusive upper bound of device indices probed per pass.
pub const DEFAULT_SCAN_LIMIT: u32 = 256;

/// Platform default device prefix (`/dev/ttyACM` or `COM`).
pub fn default_prefix() -> &'static str {
    platform::DEFAULT_PREFIX
}

/// Parity bit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// No parity bit.
    None,
    /// Even parity.
    Even,
    /// Odd parity.
    Odd,
}

/// Line parameters applied to the device when a link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    /// Bits per second.
    pub baud_rate: u32,
    /// Data bits per character, 5 to 8.
    pub data_bits: u8,
    /// Parity mode.
    pub parity: Parity,
    /// Stop bits, 1 or 2.
    pub stop_bits: u8,
}

impl LineSettings {
    /// 9600 baud, 8 data bits, no parity, one stop bit.
    pub const STANDARD: Self = Self {
        baud_rate: 9600,
        data_bits: 8,
        parity: Parity::None,
        stop_bits: 1,
    };
}

impl Default for LineSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Serial transport with bounded probing.
#[derive(Debug, Clone)]
pub struct SerialTransport {
    prefix: String,
    attempts: u32,
    scan_limit: u32,
    settings: LineSettings,
    line_control: bool,
}

impl SerialTransport {
    /// Transport probing `<prefix><i>` for `i in 0..scan_limit`, `attempts` times.
    pub fn new(prefix: impl Into<String>, attempts: u32, scan_limit: u32) -> Self {
        Self {
            prefix: prefix.into(),
            attempts: attempts.max(1),
            scan_limit,
            settings: LineSettings::STANDARD,
            line_control: true,
        }
    }

    /// Use different line parameters.
    pub fn with_line_settings(mut self, settings: LineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Line parameters applied on open.
    pub fn line_settings(&self) -> LineSettings {
        self.settings
    }

    /// Skip line configuration on open/close (for plain files standing in as devices).
    pub fn without_line_control(mut self) -> Self {
        self.line_control = false;
        self
    }

    /// Find the first present device node.
    pub fn probe(&self) -> Result<PathBuf, TransportError> {
        for attempt in 1..=self.attempts {
            for index in 0..self.scan_limit {
                let path = platform::device_path(&format!("{}{}", self.prefix, index));
                if platform::is_present(&path) {
                    debug!(path = %path.display(), attempt, "Serial device detected");
                    return Ok(path);
                }
            }
            debug!(attempt, prefix = %self.prefix, "No serial device found on this pass");
        }

        Err(TransportError::NotFound {
            prefix: self.prefix.clone(),
            attempts: self.attempts,
            scan_limit: self.scan_limit,
        })
    }
}

impl Default for SerialTransport {
    fn default() -> Self {
        Self::new(default_prefix(), DEFAULT_ATTEMPTS, DEFAULT_SCAN_LIMIT)
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<Box<dyn Link>, TransportError> {
        let path = self.probe()?;
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        if self.line_control {
            match platform::configure(&file, &self.settings) {
                Ok(()) => debug!(
                    path = %path.display(),
                    baud = self.settings.baud_rate,
                    data_bits = self.settings.data_bits,
                    parity = ?self.settings.parity,
                    stop_bits = self.settings.stop_bits,
                    "Line configured"
                ),
                Err(err) => warn!(path = %path.display(), error = %err, "Line configuration failed"),
            }
        }

        info!(path = %path.display(), "Serial link opened");
        Ok(Box::new(SerialLink {
            location: display_location(&path),
            file,
            line_control: self.line_control,
        }))
    }
}

fn display_location(path: &Path) -> String {
    path.to_string_lossy()
        .trim_start_matches(r"\\.\")
        .to_string()
}

/// Open serial device. Restores hang-up-on-close when dropped.
#[derive(Debug)]
pub struct SerialLink {
    location: String,
    file: File,
    line_control: bool,
}

impl Link for SerialLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.file
            .write_all(bytes)
            .and_then(|()| self.file.flush())
            .map_err(|source| TransportError::Write {
                location: self.location.clone(),
                source,
            })
    }

    fn location(&self) -> &str {
        &self.location
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        if self.line_control {
            if let Err(err) = platform::set_hangup(&self.file, true) {
                warn!(location = %self.location, error = %err, "Could not restore hang-up on close");
            }
        }
        debug!(location = %self.location, "Serial link released");
    }
}

#[cfg(unix)]
mod platform {
    use super::{LineSettings, Parity};
    use nix::errno::Errno;
    use nix::sys::termios::{self, BaudRate, ControlFlags, SetArg, Termios};
    use std::fs::File;
    use std::io;
    use std::path::{Path, PathBuf};

    pub const DEFAULT_PREFIX: &str = "/dev/ttyACM";

    pub fn device_path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    pub fn is_present(path: &Path) -> bool {
        path.exists()
    }

    /// Apply `settings` and clear `HUPCL` so closing the port does not reset the board.
    pub fn configure(file: &File, settings: &LineSettings) -> io::Result<()> {
        let mut attrs = termios::tcgetattr(file)?;
        apply(&mut attrs, settings)?;
        attrs.control_flags.remove(ControlFlags::HUPCL);
        termios::tcsetattr(file, SetArg::TCSANOW, &attrs)?;
        Ok(())
    }

    pub fn set_hangup(file: &File, enabled: bool) -> io::Result<()> {
        let mut attrs = termios::tcgetattr(file)?;
        attrs.control_flags.set(ControlFlags::HUPCL, enabled);
        termios::tcsetattr(file, SetArg::TCSANOW, &attrs)?;
        Ok(())
    }

    fn apply(attrs: &mut Termios, settings: &LineSettings) -> nix::Result<()> {
        termios::cfsetspeed(attrs, baud_rate(settings.baud_rate)?)?;

        let size = match settings.data_bits {
            5 => ControlFlags::CS5,
            6 => ControlFlags::CS6,
            7 => ControlFlags::CS7,
            8 => ControlFlags::CS8,
            _ => return Err(Errno::EINVAL),
        };
        attrs.control_flags &= !(ControlFlags::CSIZE
            | ControlFlags::PARENB
            | ControlFlags::PARODD
            | ControlFlags::CSTOPB);
        attrs.control_flags |= size | ControlFlags::CREAD | ControlFlags::CLOCAL;

        match settings.parity {
            Parity::None => {}
            Parity::Even => attrs.control_flags |= ControlFlags::PARENB,
            Parity::Odd => attrs.control_flags |= ControlFlags::PARENB | ControlFlags::PARODD,
        }
        match settings.stop_bits {
            1 => {}
            2 => attrs.control_flags |= ControlFlags::CSTOPB,
            _ => return Err(Errno::EINVAL),
        }
        Ok(())
    }

    fn baud_rate(rate: u32) -> nix::Result<BaudRate> {
        Ok(match rate {
            1200 => BaudRate::B1200,
            2400 => BaudRate::B2400,
            4800 => BaudRate::B4800,
            9600 => BaudRate::B9600,
            19200 => BaudRate::B19200,
            38400 => BaudRate::B38400,
            57600 => BaudRate::B57600,
            115200 => BaudRate::B115200,
            _ => return Err(Errno::EINVAL),
        })
    }

    #[cfg(all(test, target_os = "linux"))]
    mod tests {
        use super::*;
        use nix::pty::openpty;

        // The master end must outlive the test; dropping it hangs up the slave (EIO).
        fn pty_slave() -> (std::os::fd::OwnedFd, File) {
            let pty = openpty(None, None).expect("openpty");
            (pty.master, File::from(pty.slave))
        }

        #[test]
        fn configure_sets_standard_line() {
            let (_master, slave) = pty_slave();

            configure(&slave, &LineSettings::STANDARD).unwrap();

            let attrs = termios::tcgetattr(&slave).unwrap();
            assert_eq!(termios::cfgetospeed(&attrs), BaudRate::B9600);
            assert_eq!(attrs.control_flags & ControlFlags::CSIZE, ControlFlags::CS8);
            assert!(!attrs.control_flags.contains(ControlFlags::PARENB));
            assert!(!attrs.control_flags.contains(ControlFlags::CSTOPB));
            assert!(!attrs.control_flags.contains(ControlFlags::HUPCL));
        }

        #[test]
        fn configure_applies_parity_and_stop_bits() {
            let (_master, slave) = pty_slave();
            let settings = LineSettings {
                baud_rate: 19200,
                data_bits: 7,
                parity: Parity::Odd,
                stop_bits: 2,
            };

            configure(&slave, &settings).unwrap();

            let attrs = termios::tcgetattr(&slave).unwrap();
            assert_eq!(termios::cfgetospeed(&attrs), BaudRate::B19200);
            assert_eq!(attrs.control_flags & ControlFlags::CSIZE, ControlFlags::CS7);
            assert!(attrs
                .control_flags
                .contains(ControlFlags::PARENB | ControlFlags::PARODD | ControlFlags::CSTOPB));
        }

        #[test]
        fn unsupported_settings_are_rejected() {
            let (_master, slave) = pty_slave();
            let settings = LineSettings {
                baud_rate: 12345,
                ..LineSettings::STANDARD
            };

            let err = configure(&slave, &settings).unwrap_err();

            assert_eq!(err.raw_os_error(), Some(Errno::EINVAL as i32));
        }

        #[test]
        fn hangup_is_restored() {
            let (_master, slave) = pty_slave();
            configure(&slave, &LineSettings::STANDARD).unwrap();

            set_hangup(&slave, true).unwrap();

            let attrs = termios::tcgetattr(&slave).unwrap();
            assert!(attrs.control_flags.contains(ControlFlags::HUPCL));
        }

        #[test]
        fn configure_fails_on_plain_file() {
            let file = tempfile::tempfile().unwrap();
            assert!(configure(&file, &LineSettings::STANDARD).is_err());
        }
    }
}

#[cfg(windows)]
mod platform {
    use super::{LineSettings, Parity};
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::os::windows::io::AsRawHandle;
    use std::path::{Path, PathBuf};
    use windows_sys::Win32::Devices::Communication::{
        GetCommState, SetCommState, DCB, EVENPARITY, NOPARITY, ODDPARITY, ONESTOPBIT,
        TWOSTOPBITS,
    };

    pub const DEFAULT_PREFIX: &str = "COM";

    pub fn device_path(name: &str) -> PathBuf {
        if name.starts_with(r"\\.\") || name.contains(['/', '\\']) {
            PathBuf::from(name)
        } else {
            PathBuf::from(format!(r"\\.\{name}"))
        }
    }

    /// COM ports have no directory entry; a successful open is the only probe.
    pub fn is_present(path: &Path) -> bool {
        OpenOptions::new().write(true).open(path).is_ok()
    }

    pub fn configure(file: &File, settings: &LineSettings) -> io::Result<()> {
        let stop_bits = match settings.stop_bits {
            1 => ONESTOPBIT,
            2 => TWOSTOPBITS,
            _ => return Err(io::Error::from(io::ErrorKind::InvalidInput)),
        };
        let handle = file.as_raw_handle();

        // SAFETY: DCB is plain data; all-zero is a valid starting value.
        let mut dcb: DCB = unsafe { std::mem::zeroed() };
        dcb.DCBlength = std::mem::size_of::<DCB>() as u32;
        // SAFETY: `handle` is an open COM port owned by `file`.
        if unsafe { GetCommState(handle, &mut dcb) } == 0 {
            return Err(io::Error::last_os_error());
        }

        dcb.BaudRate = settings.baud_rate;
        dcb.ByteSize = settings.data_bits;
        dcb.Parity = match settings.parity {
            Parity::None => NOPARITY,
            Parity::Even => EVENPARITY,
            Parity::Odd => ODDPARITY,
        };
        dcb.StopBits = stop_bits;

        // SAFETY: as above; `dcb` was filled by GetCommState.
        if unsafe { SetCommState(handle, &dcb) } == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// COM ports have no hang-up-on-close flag.
    pub fn set_hangup(_file: &File, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}
