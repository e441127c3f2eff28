// Decoded record types for the ULTRAK 498 stream.
//
// Every frame on the wire is five BCD bytes: a type code followed by
// four data fields whose meaning depends on the code.

use super::bcd::BcdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("truncated record: expected 5 bytes, got {0}")]
    TruncatedRecord(usize),

    #[error("malformed record: {0}")]
    MalformedRecord(#[from] BcdError),

    #[error("unknown record type: {0}")]
    UnknownRecordType(u8),

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// One decoded timing record.
///
/// Lap numbers are `u32` because the stream parser reconstructs values
/// past the two-digit wire limit; every other field is the raw 0..=99
/// value off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    /// Start of a race: date and the race id that scopes the records
    /// that follow.
    RaceHeader { year: u8, month: u8, day: u8, id: u8 },

    /// Split time for one lap.
    LapTime {
        minutes: u8,
        seconds: u8,
        hundredths: u8,
        lap: u32,
    },

    /// Cumulative race time at the end of a lap.
    AbsoluteTime {
        minutes: u8,
        seconds: u8,
        hundredths: u8,
        lap: u32,
    },

    /// Type-30 record; field meaning is undocumented by the vendor.
    Type30 { a: u8, b: u8, c: u8, laps: u8 },

    /// Type-40 record; field meaning is undocumented by the vendor.
    Type40 { a: u8, b: u8, c: u8, laps: u8 },

    /// End of a race: final time and lap count.
    RaceEnd {
        minutes: u8,
        seconds: u8,
        hundredths: u8,
        laps: u8,
    },
}

impl Record {
    /// Build a record from the five decoded values of one frame.
    ///
    /// The first value is the type code; the remaining four map
    /// positionally onto the variant's fields. Lap fields are the raw
    /// wire values here; rollover correction happens in the stream.
    pub fn from_values(values: [u8; 5]) -> Result<Self> {
        let [code, a, b, c, d] = values;

        let record = match code {
            0 => Record::RaceHeader {
                year: a,
                month: b,
                day: c,
                id: d,
            },
            10 => Record::LapTime {
                minutes: a,
                seconds: b,
                hundredths: c,
                lap: u32::from(d),
            },
            20 => Record::AbsoluteTime {
                minutes: a,
                seconds: b,
                hundredths: c,
                lap: u32::from(d),
            },
            30 => Record::Type30 {
                a,
                b,
                c,
                laps: d,
            },
            40 => Record::Type40 {
                a,
                b,
                c,
                laps: d,
            },
            50 => Record::RaceEnd {
                minutes: a,
                seconds: b,
                hundredths: c,
                laps: d,
            },
            other => return Err(RecordError::UnknownRecordType(other)),
        };

        Ok(record)
    }

    /// The wire type code for this record.
    pub fn type_code(&self) -> u8 {
        match self {
            Record::RaceHeader { .. } => 0,
            Record::LapTime { .. } => 10,
            Record::AbsoluteTime { .. } => 20,
            Record::Type30 { .. } => 30,
            Record::Type40 { .. } => 40,
            Record::RaceEnd { .. } => 50,
        }
    }

    /// Elapsed time in hundredths of a second for the timing variants,
    /// `None` for records that don't carry a time.
    pub fn elapsed_hundredths(&self) -> Option<u32> {
        match *self {
            Record::LapTime {
                minutes,
                seconds,
                hundredths,
                ..
            }
            | Record::AbsoluteTime {
                minutes,
                seconds,
                hundredths,
                ..
            }
            | Record::RaceEnd {
                minutes,
                seconds,
                hundredths,
                ..
            } => Some(u32::from(minutes) * 6000 + u32::from(seconds) * 100 + u32::from(hundredths)),
            _ => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Record::RaceHeader {
                year,
                month,
                day,
                id,
            } => write!(f, "race {} ({:02}/{:02}/{:02})", id, year, month, day),
            Record::LapTime {
                minutes,
                seconds,
                hundredths,
                lap,
            } => write!(f, "lap {}: {}:{:02}.{:02}", lap, minutes, seconds, hundredths),
            Record::AbsoluteTime {
                minutes,
                seconds,
                hundredths,
                lap,
            } => write!(
                f,
                "lap {} total: {}:{:02}.{:02}",
                lap, minutes, seconds, hundredths
            ),
            Record::Type30 { a, b, c, laps } => {
                write!(f, "type 30: {} {} {} (laps {})", a, b, c, laps)
            }
            Record::Type40 { a, b, c, laps } => {
                write!(f, "type 40: {} {} {} (laps {})", a, b, c, laps)
            }
            Record::RaceEnd {
                minutes,
                seconds,
                hundredths,
                laps,
            } => write!(
                f,
                "race end: {} laps in {}:{:02}.{:02}",
                laps, minutes, seconds, hundredths
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_maps_fields_positionally() {
        assert_eq!(
            Record::from_values([0, 15, 6, 21, 3]).unwrap(),
            Record::RaceHeader {
                year: 15,
                month: 6,
                day: 21,
                id: 3
            }
        );
        assert_eq!(
            Record::from_values([10, 1, 2, 30, 4]).unwrap(),
            Record::LapTime {
                minutes: 1,
                seconds: 2,
                hundredths: 30,
                lap: 4
            }
        );
        assert_eq!(
            Record::from_values([20, 1, 2, 30, 4]).unwrap(),
            Record::AbsoluteTime {
                minutes: 1,
                seconds: 2,
                hundredths: 30,
                lap: 4
            }
        );
        assert_eq!(
            Record::from_values([50, 12, 34, 56, 78]).unwrap(),
            Record::RaceEnd {
                minutes: 12,
                seconds: 34,
                hundredths: 56,
                laps: 78
            }
        );
    }

    #[test]
    fn test_from_values_rejects_unknown_codes() {
        for code in [1, 5, 11, 25, 60, 99] {
            match Record::from_values([code, 0, 0, 0, 0]) {
                Err(RecordError::UnknownRecordType(c)) => assert_eq!(c, code),
                other => panic!("expected UnknownRecordType, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_type_codes_round_trip() {
        for code in [0, 10, 20, 30, 40, 50] {
            let record = Record::from_values([code, 1, 2, 3, 4]).unwrap();
            assert_eq!(record.type_code(), code);
        }
    }

    #[test]
    fn test_elapsed_hundredths() {
        let total = Record::AbsoluteTime {
            minutes: 1,
            seconds: 2,
            hundredths: 30,
            lap: 1,
        };
        assert_eq!(total.elapsed_hundredths(), Some(6230));

        let header = Record::RaceHeader {
            year: 0,
            month: 0,
            day: 0,
            id: 1,
        };
        assert_eq!(header.elapsed_hundredths(), None);
    }

    #[test]
    fn test_display() {
        let lap = Record::LapTime {
            minutes: 1,
            seconds: 2,
            hundredths: 3,
            lap: 101,
        };
        assert_eq!(lap.to_string(), "lap 101: 1:02.03");
    }
}
