// Wire format of the ULTRAK 498 record stream
pub mod bcd;
pub mod record;
pub mod stream;

pub use bcd::{bcd_to_int, int_to_bcd, BcdError};
pub use record::{Record, RecordError};
pub use stream::{read_all, RecordStream};
