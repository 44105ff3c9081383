//! Live progress reporting port.
//!
//! The host affordance this models is a single-slot inline display: each
//! update supersedes the previous one, and the slot must be cleared on every
//! exit path of an attempt. The sink is owned by the caller and passed into
//! the client; the client holds no process-wide display state.

/// Receives the full accumulated text after every decoded delta.
pub trait ProgressSink: Send {
    /// Replace the displayed text with the accumulator-so-far.
    fn update(&mut self, text: &str);

    /// Remove the display. Invoked when an attempt resolves, whether by
    /// sentinel, stream end, or error.
    fn clear(&mut self);
}

/// Default sink: discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn update(&mut self, _text: &str) {}
    fn clear(&mut self) {}
}

/// Records every update; for tests and hosts that render asynchronously.
#[derive(Debug, Default)]
pub struct MemoryProgress {
    pub updates: Vec<String>,
    pub cleared: bool,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible text, if the slot has not been cleared.
    pub fn current(&self) -> Option<&str> {
        if self.cleared {
            None
        } else {
            self.updates.last().map(String::as_str)
        }
    }
}

impl ProgressSink for MemoryProgress {
    fn update(&mut self, text: &str) {
        self.cleared = false;
        self.updates.push(text.to_string());
    }

    fn clear(&mut self) {
        self.cleared = true;
    }
}
