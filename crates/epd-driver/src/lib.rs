//! # epd-driver
//!
//! Host driver for EPD-Link: owns the transport, the pacing delays, and a
//! high-level drawing API over the pure codec in `epd-core`.
//!
//! A typical session wraps an opened serial port in an
//! [`IoTransport`](transport::IoTransport), performs a handshake, draws,
//! and updates:
//!
//! ```no_run
//! use epd_driver::{display::EpdDisplay, transport::IoTransport};
//! use std::io::BufReader;
//!
//! # fn open_port() -> (std::io::Sink, BufReader<std::io::Empty>) {
//! #     (std::io::sink(), BufReader::new(std::io::empty()))
//! # }
//! let (writer, reader) = open_port();
//! let mut display = EpdDisplay::new(IoTransport::new(writer, reader));
//! display.handshake()?;
//! display.clear()?;
//! display.draw_text(100, 100, "hello")?;
//! display.update()?;
//! # Ok::<(), epd_driver::display::DriverError>(())
//! ```

pub mod display;
pub mod transport;

pub use display::{BatchReport, DriverError, EpdDisplay, DEFAULT_PACING_DELAY};
pub use transport::{IoTransport, MemoryTransport, Transport, TransportError};
