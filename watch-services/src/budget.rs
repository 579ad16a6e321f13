//! Per-run emission cap

/// Counts emissions against a fixed cap; the count never exceeds the cap
#[derive(Debug, Clone)]
pub struct RunBudget {
    cap: usize,
    emitted: usize,
}

impl RunBudget {
    pub fn new(cap: usize) -> Self {
        Self { cap, emitted: 0 }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn remaining(&self) -> usize {
        self.cap - self.emitted
    }

    pub fn is_exhausted(&self) -> bool {
        self.emitted >= self.cap
    }

    /// Count one emission. Returns `false`, without counting, once the cap is reached.
    pub fn try_consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.emitted += 1;
        true
    }
}
