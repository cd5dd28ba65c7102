use crate::records::RecordError;
use crate::Config;
use anyhow::{Context, Result};
use chrono::prelude::*;
use morton::EncoderConfig;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Only the first skipped lines are kept for the summary, the rest are just counted.
pub const MAX_REPORTED_SKIPS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// What gets written by `--report`.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub date: String,
    pub config: &'a Config,
    pub encoder: &'a EncoderConfig,
    pub written: u64,
    pub skipped: u64,
    pub total_time_ms: u128,
    pub skipped_records: &'a [SkippedRecord],
    pub skipped_records_truncated: bool,
}

pub struct Reporter {
    date: DateTime<Utc>,
    config: Config,
    encoder: EncoderConfig,
    written: u64,
    skipped: u64,
    skipped_records: Vec<SkippedRecord>,
    duration: Option<Duration>,
}

impl Reporter {
    pub fn new(config: Config, encoder: EncoderConfig) -> Self {
        Self {
            date: Utc::now(),
            config,
            encoder,
            written: 0,
            skipped: 0,
            skipped_records: Vec::new(),
            duration: None,
        }
    }

    pub fn record_written(&mut self) {
        self.written += 1;
    }

    pub fn record_skipped(&mut self, line: usize, content: &str, error: &RecordError) {
        self.skipped += 1;
        if self.skipped_records.len() < MAX_REPORTED_SKIPS {
            self.skipped_records.push(SkippedRecord {
                line,
                content: content.to_owned(),
                reason: error.to_string(),
            });
        }
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.duration.replace(elapsed);
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// The skipped lines retained for the summary, at most `MAX_REPORTED_SKIPS`.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped_records
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped
    }

    pub fn is_truncated(&self) -> bool {
        self.skipped > self.skipped_records.len() as u64
    }

    pub fn processed(&self) -> u64 {
        self.written + self.skipped
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary {
            date: self.date.to_rfc3339(),
            config: &self.config,
            encoder: &self.encoder,
            written: self.written,
            skipped: self.skipped,
            total_time_ms: self.duration.map(|d| d.as_millis()).unwrap_or(0),
            skipped_records: &self.skipped_records,
            skipped_records_truncated: self.is_truncated(),
        }
    }

    pub fn report(&self) {
        info!(
            "Wrote {} codes to {:?}, skipped {} lines of {:?} (in {:?})",
            self.written,
            self.config.output,
            self.skipped,
            self.config.input,
            self.duration.unwrap_or_default()
        );
        if self.is_truncated() {
            info!(
                "Only the first {} skipped lines are listed in the summary",
                MAX_REPORTED_SKIPS
            );
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating report {:?}", path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.summary())
            .with_context(|| format!("writing report {:?}", path))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
