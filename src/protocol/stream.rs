// Pull parser for the 5-byte record stream.

use super::bcd;
use super::record::{Record, RecordError, Result};
use std::io::{self, Read};

const FRAME_LEN: usize = 5;

/// Lazy iterator of [`Record`]s over any byte source.
///
/// Reads one 5-byte frame at a time and decodes it. The stream owns the
/// rollover counters that reconstruct lap numbers past the two-digit
/// wire limit, so a single stream must be used for a whole capture.
///
/// The iterator ends cleanly when the source is exhausted, or when a
/// serial read times out with no bytes pending (the timer has simply
/// stopped transmitting). Any decode failure is yielded once and then
/// the iterator stays finished; there is no resynchronization.
pub struct RecordStream<R> {
    source: R,
    lap_hundreds: u32,
    abs_hundreds: u32,
    done: bool,
}

impl<R: Read> RecordStream<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            lap_hundreds: 0,
            abs_hundreds: 0,
            done: false,
        }
    }

    /// Read the next frame, or `None` at a clean end of stream.
    ///
    /// A timeout with part of a frame already buffered means the device
    /// stopped mid-record, which is a truncation like any other.
    fn read_frame(&mut self) -> Result<Option<[u8; FRAME_LEN]>> {
        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0;

        while filled < FRAME_LEN {
            match self.source.read(&mut frame[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    tracing::debug!("read timed out with {} of {} bytes", filled, FRAME_LEN);
                    break;
                }
                Err(e) => return Err(RecordError::Io(e)),
            }
        }

        match filled {
            0 => Ok(None),
            FRAME_LEN => Ok(Some(frame)),
            n => Err(RecordError::TruncatedRecord(n)),
        }
    }

    /// Decode the next record, or `None` at a clean end of stream.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let frame = match self.read_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        let mut values = [0u8; FRAME_LEN];
        for (value, byte) in values.iter_mut().zip(frame) {
            *value = bcd::bcd_byte_to_int(byte)?;
        }

        let mut record = Record::from_values(values)?;
        self.fix_rollover(&mut record);
        Ok(Some(record))
    }

    /// Reconstruct lap numbers past 99.
    ///
    /// The timer resets the two-digit lap field to 0 when it would
    /// overflow, so a raw 0 bumps the counter for that record type by
    /// 100 and every reported lap is raw value plus counter. LapTime
    /// and AbsoluteTime wrap independently.
    fn fix_rollover(&mut self, record: &mut Record) {
        match record {
            Record::LapTime { lap, .. } => *lap = adjust(&mut self.lap_hundreds, *lap),
            Record::AbsoluteTime { lap, .. } => *lap = adjust(&mut self.abs_hundreds, *lap),
            _ => {}
        }
    }
}

fn adjust(hundreds: &mut u32, raw: u32) -> u32 {
    if raw == 0 {
        *hundreds += 100;
    }
    *hundreds + raw
}

impl<R: Read> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Drain a source into a vector of records.
pub fn read_all<R: Read>(source: R) -> Result<Vec<Record>> {
    RecordStream::new(source).collect()
}
