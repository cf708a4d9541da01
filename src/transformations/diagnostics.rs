//! Diagnostics sinks for skipped entries.
//!
//! The engine never logs skips itself; it hands each one to the sink it was
//! built with.

use super::error::EntrySkip;

pub trait DiagnosticsSink {
    /// Record one skipped entry.
    fn warn(&mut self, skip: &EntrySkip);
}

/// Emits every skip as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn warn(&mut self, skip: &EntrySkip) {
        let (missing, malformed) = skip
            .faults()
            .map(|f| (f.missing.join(","), f.malformed.join(",")))
            .unwrap_or_default();

        tracing::warn!(
            index = skip.index(),
            kind = skip.kind().map(|k| k.name()).unwrap_or(""),
            missing = %missing,
            malformed = %malformed,
            "{}",
            skip
        );
    }
}

/// Keeps skips in memory, in the order they were reported.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    skips: Vec<EntrySkip>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skips(&self) -> &[EntrySkip] {
        &self.skips
    }

    pub fn messages(&self) -> Vec<String> {
        self.skips.iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn warn(&mut self, skip: &EntrySkip) {
        self.skips.push(skip.clone());
    }
}
