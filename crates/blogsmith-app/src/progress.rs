//! Simulated generation progress
//!
//! The backend gives no progress signal, so the loading overlay animates a
//! fixed schedule: the percentage climbs in steps of two towards each
//! checkpoint, and reaching a checkpoint swaps in its status label. The real
//! response can arrive at any point in the schedule; [`ProgressSimulator::finish`]
//! then jumps to 100%.

/// A point in the schedule where the status label changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub threshold: u8,
    pub label: &'static str,
}

/// Progress schedule, in order
pub const CHECKPOINTS: [Checkpoint; 6] = [
    Checkpoint {
        threshold: 15,
        label: "Routing request…",
    },
    Checkpoint {
        threshold: 30,
        label: "Conducting research…",
    },
    Checkpoint {
        threshold: 50,
        label: "Creating plan…",
    },
    Checkpoint {
        threshold: 70,
        label: "Writing sections…",
    },
    Checkpoint {
        threshold: 85,
        label: "Merging content…",
    },
    Checkpoint {
        threshold: 95,
        label: "Finalizing…",
    },
];

/// Label shown before the first checkpoint is reached
pub const INITIAL_LABEL: &str = "Starting…";

/// Label shown once the response has arrived
pub const FINISHED_LABEL: &str = "Done";

/// Percentage added per tick while below the next checkpoint
const STEP: u8 = 2;

/// Cosmetic progress state machine driven by ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSimulator {
    percent: u8,
    next_checkpoint: usize,
    label: &'static str,
    finished: bool,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self {
            percent: 0,
            next_checkpoint: 0,
            label: INITIAL_LABEL,
            finished: false,
        }
    }

    /// Advance one tick.
    ///
    /// Below the pending checkpoint the percentage grows by two; at or above
    /// it the checkpoint label is adopted and the next checkpoint becomes
    /// pending. No-op after the last checkpoint or after [`finish`](Self::finish).
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        let Some(checkpoint) = CHECKPOINTS.get(self.next_checkpoint) else {
            return;
        };

        if self.percent < checkpoint.threshold {
            self.percent += STEP;
        } else {
            self.label = checkpoint.label;
            self.next_checkpoint += 1;
        }
    }

    /// Stop the simulation and show 100%
    pub fn finish(&mut self) {
        self.finished = true;
        self.percent = 100;
        self.label = FINISHED_LABEL;
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Percentage as a 0.0..=1.0 ratio for gauges
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent.min(100)) / 100.0
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether further ticks can still change anything
    pub fn is_active(&self) -> bool {
        !self.finished && self.next_checkpoint < CHECKPOINTS.len()
    }
}
