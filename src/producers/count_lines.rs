use crate::error::Result;
use crate::lines::Lines;
use crate::runner::ContentProducer;

/// Produces `line 1` through `line N`.
#[derive(Debug, Clone, Copy)]
pub struct CountLines {
    /// Number of lines to emit.
    pub lines: usize,
}

impl CountLines {
    /// Producer for `line 1` through `line {lines}`.
    #[must_use]
    pub const fn new(lines: usize) -> Self {
        Self { lines }
    }
}

impl ContentProducer for CountLines {
    fn produce(&mut self) -> Result<Lines> {
        Ok((1..=self.lines).map(|i| format!("line {i}")).collect())
    }
}
