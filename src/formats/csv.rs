//! CSV lap-time report
//!
//! One line per finished lap of the selected race:
//! `lap,minutes:seconds.hundredths,total_hundredths`.

use crate::protocol::{Record, RecordError};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record error: {0}")]
    Record(#[from] RecordError),
}

pub type Result<T> = std::result::Result<T, CsvError>;

/// Write the lap times of one race as CSV.
///
/// Records are scanned in stream order. Each `RaceHeader` switches the
/// current race; `AbsoluteTime` records belonging to the selected race
/// produce one line each. Until a header has been seen the current race
/// is 0, so leading records match no real race id.
pub fn write_lap_times<W, I>(out: &mut W, records: I, race_id: u8) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = std::result::Result<Record, RecordError>>,
{
    let mut current_race = 0;

    for record in records {
        match record? {
            Record::RaceHeader { id, .. } => current_race = id,
            Record::AbsoluteTime {
                minutes,
                seconds,
                hundredths,
                lap,
            } if current_race == race_id => {
                let total =
                    u32::from(minutes) * 6000 + u32::from(seconds) * 100 + u32::from(hundredths);
                writeln!(
                    out,
                    "{},{}:{:02}.{:02},{}",
                    lap, minutes, seconds, hundredths, total
                )?;
            }
            _ => {}
        }
    }

    Ok(())
}
