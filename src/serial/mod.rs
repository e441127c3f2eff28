// Serial and file input handling
pub mod comm;

pub use comm::{list_ports, open_input, open_port, SerialConfig, SerialError};
