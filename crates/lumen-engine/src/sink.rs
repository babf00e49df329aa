//! Record sink implementations.
//!
//! Sinks are best-effort by contract: a sweep cannot fail once
//! spawned, so sink I/O errors are swallowed here, never propagated
//! into the sweep thread.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crossbeam_channel::Sender;
use lumen_core::{RecordSink, ThroughputRecord};

/// Append-only text-file sink: one comma-separated line per record.
pub struct FileSink {
    writer: BufWriter<File>,
    precision: usize,
}

impl FileSink {
    /// Open (or create) the file at `path` for appending.
    pub fn open_append(path: &Path, precision: usize) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            precision,
        })
    }
}

impl RecordSink for FileSink {
    fn append(&mut self, record: &ThroughputRecord) {
        // Best-effort: flush per record so laps land on disk as they
        // complete, ignore failures.
        let _ = writeln!(self.writer, "{}", record.to_line(self.precision));
        let _ = self.writer.flush();
    }
}

/// Sink that forwards records over a crossbeam channel.
///
/// Used when the console (or a test) wants to observe records live
/// instead of reading a file back. Best-effort: records are dropped if
/// the receiver has gone away.
pub struct ChannelSink {
    tx: Sender<ThroughputRecord>,
}

impl ChannelSink {
    /// Wrap a sender.
    pub fn new(tx: Sender<ThroughputRecord>) -> Self {
        Self { tx }
    }
}

impl RecordSink for ChannelSink {
    fn append(&mut self, record: &ThroughputRecord) {
        let _ = self.tx.send(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_appends_lines() {
        let dir = std::env::temp_dir().join("lumen-sink-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("records-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        {
            let mut sink = FileSink::open_append(&path, 2).unwrap();
            sink.append(&ThroughputRecord::from_throughput(1.5));
            sink.append(&ThroughputRecord::from_throughput(2.0));
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["1.50,0.00,0.00,0.00", "2.00,0.00,0.00,0.00"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_sink_appends_across_reopen() {
        let dir = std::env::temp_dir().join("lumen-sink-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("reopen-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        {
            let mut sink = FileSink::open_append(&path, 0).unwrap();
            sink.append(&ThroughputRecord::from_throughput(1.0));
        }
        {
            let mut sink = FileSink::open_append(&path, 0).unwrap();
            sink.append(&ThroughputRecord::from_throughput(2.0));
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn channel_sink_forwards_records() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelSink::new(tx);
        sink.append(&ThroughputRecord::from_throughput(4.0));
        let record = rx.try_recv().unwrap();
        assert_eq!(record.throughput(), 4.0);
    }

    #[test]
    fn channel_sink_is_best_effort_after_receiver_drop() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        // Must not panic.
        sink.append(&ThroughputRecord::from_throughput(4.0));
    }
}
