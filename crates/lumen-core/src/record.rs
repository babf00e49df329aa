//! Throughput records and the sink they are appended to.
//!
//! A record is one row of the delimited output: the property store's
//! ordered extension slots at the moment a sweep lap completed. Only
//! the first slot (the throughput estimate) is populated by this core;
//! the remaining slots are reserved extension points and stay zero.

use smallvec::SmallVec;

/// Number of numeric fields in an emitted record.
pub const RECORD_SLOT_COUNT: usize = 4;

/// One timestamped throughput measurement, ready for emission.
#[derive(Clone, Debug, PartialEq)]
pub struct ThroughputRecord {
    /// Slot values in emission order. `values[0]` is the throughput
    /// estimate; the rest are reserved and zero.
    pub values: SmallVec<[f64; RECORD_SLOT_COUNT]>,
}

impl ThroughputRecord {
    /// Build a record with the given throughput and all reserved slots
    /// zeroed.
    pub fn from_throughput(throughput: f64) -> Self {
        let mut values = SmallVec::new();
        values.push(throughput);
        values.resize(RECORD_SLOT_COUNT, 0.0);
        Self { values }
    }

    /// Build a record from slot values in emission order.
    pub fn from_slots(slots: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: slots.into_iter().collect(),
        }
    }

    /// The throughput estimate (the first slot), or zero for an empty
    /// record.
    pub fn throughput(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }

    /// Render the record as one comma-separated line, each field with
    /// `precision` decimal places.
    pub fn to_line(&self, precision: usize) -> String {
        let fields: Vec<String> = self
            .values
            .iter()
            .map(|v| format!("{v:.precision$}"))
            .collect();
        fields.join(",")
    }
}

/// Append-only destination for throughput records.
///
/// Implementations are best-effort: a sweep never fails once started,
/// so sinks swallow their own I/O errors rather than propagating them
/// into the sweep thread.
pub trait RecordSink: Send {
    /// Append one record.
    fn append(&mut self, record: &ThroughputRecord);
}
