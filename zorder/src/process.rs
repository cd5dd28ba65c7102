use crate::records::{encode_record, ParseError, RecordError};
use crate::reporter::Reporter;
use anyhow::{Context, Result};
use morton::Encoder;
use std::io::{BufRead, Write};
use std::time::Instant;

const PROGRESS_EVERY: u64 = 1_000_000;

/// Writes the code of every valid record of `reader` to `writer`, one per line
/// and in input order. Blank lines are ignored, invalid lines are logged and
/// skipped, including lines that are not valid UTF-8. Only I/O errors abort
/// the run.
pub fn process<R, W>(
    reader: R,
    mut writer: W,
    encoder: &Encoder,
    reporter: &mut Reporter,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let timer = Instant::now();
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line_number = idx + 1;
        let bytes = line.with_context(|| format!("reading line {}", line_number))?;
        let record = match std::str::from_utf8(&bytes) {
            Ok(text) => text.trim(),
            Err(e) => {
                let content = String::from_utf8_lossy(&bytes);
                let error = RecordError::from(ParseError::Encoding(e));
                skip(reporter, line_number, content.trim(), &error);
                continue;
            }
        };
        if record.is_empty() {
            continue;
        }
        match encode_record(record, encoder) {
            Ok(code) => {
                writeln!(writer, "{}", code).context("writing code")?;
                reporter.record_written();
            }
            Err(RecordError::Encode(e)) if e.is_configuration() => return Err(e.into()),
            Err(e) => skip(reporter, line_number, record, &e),
        }
        if reporter.processed() % PROGRESS_EVERY == 0 {
            debug!("{} records processed", reporter.processed());
        }
    }
    writer.flush().context("flushing output")?;
    reporter.set_elapsed(timer.elapsed());
    Ok(())
}

fn skip(reporter: &mut Reporter, line_number: usize, content: &str, error: &RecordError) {
    warn!("Error processing line {} '{}': {}", line_number, content, error);
    reporter.record_skipped(line_number, content, error);
}
