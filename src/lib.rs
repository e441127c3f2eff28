// ULTRAK 498 race timer interface

pub mod formats;
pub mod protocol;
pub mod serial;

// Re-export commonly used types
pub use formats::{write_lap_times, CsvError};
pub use protocol::{bcd_to_int, int_to_bcd, read_all, BcdError, Record, RecordError, RecordStream};
pub use serial::{list_ports, open_input, SerialConfig, SerialError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
