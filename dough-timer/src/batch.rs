use serde::{Deserialize, Serialize};
use std::fmt;

pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Opaque batch identifier, unique among the batches a controller tracks.
///
/// Generated ids look like `batch-1718000000000-2a`; restored ids are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn generate(created_ms: i64, suffix: u64) -> Self {
        Self(format!("batch-{created_ms}-{suffix:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One fermentation timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    id: BatchId,
    name: String,
    end_time: i64,
    done: bool,
}

impl Batch {
    /// A new batch that becomes ready `hours` after `now_ms`.
    pub(crate) fn start(id: BatchId, name: String, now_ms: i64, hours: f64) -> Self {
        Self::restore(id, name, now_ms.saturating_add(hours_to_ms(hours)))
    }

    /// A batch with a known end time. `done` always starts out false.
    pub(crate) fn restore(id: BatchId, name: String, end_time: i64) -> Self {
        Self {
            id,
            name,
            end_time,
            done: false,
        }
    }

    pub fn id(&self) -> &BatchId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Milliseconds since the Unix epoch at which the batch is ready.
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Remaining milliseconds at `now_ms`; zero or negative once ready.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.end_time.saturating_sub(now_ms)
    }

    /// Flips `done` on. Returns true only on the first call.
    pub(crate) fn mark_done(&mut self) -> bool {
        !std::mem::replace(&mut self.done, true)
    }
}

fn hours_to_ms(hours: f64) -> i64 {
    // `as` saturates for values beyond i64
    (hours * MS_PER_HOUR as f64).round() as i64
}

/// One row of the entry form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchRow {
    pub name: String,
    pub hours: String,
}

impl BatchRow {
    pub fn new(name: impl Into<String>, hours: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hours: hours.into(),
        }
    }

    /// The trimmed name and parsed hours, or why the row produces no batch.
    pub fn validate(&self) -> Result<(String, f64), SkipReason> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SkipReason::EmptyName);
        }
        let hours = parse_hours(&self.hours).ok_or(SkipReason::InvalidHours)?;
        Ok((name.to_string(), hours))
    }
}

/// Parses an hours field. Only positive, finite numbers are accepted.
pub fn parse_hours(text: &str) -> Option<f64> {
    let hours: f64 = text.trim().parse().ok()?;
    (hours.is_finite() && hours > 0.0).then_some(hours)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyName,
    InvalidHours,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyName => write!(f, "empty name"),
            SkipReason::InvalidHours => write!(f, "hours must be a positive number"),
        }
    }
}

/// What became of one submitted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(BatchId),
    Skipped(SkipReason),
}

impl RowOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted(_))
    }
}
