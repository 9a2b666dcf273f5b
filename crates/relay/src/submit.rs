use std::fmt;

/// Delay before the button label and enabled state are restored.
pub const RESTORE_DELAY_MS: u32 = 3000;

pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "\u{2713} Message Sent!";
pub const FAILED_LABEL: &str = "\u{2717} Failed to Send";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A request is already in flight; the second submit is dropped.
    AlreadyInFlight,
    /// The outcome arrived for a request that was never started.
    NotSending,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::AlreadyInFlight => f.write_str("a submission is already in flight"),
            SubmitError::NotSending => f.write_str("no submission in flight"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Submit-button state machine.
///
/// `begin` is only accepted from `Idle`, which is the in-flight guard: a
/// double-click before the disabled attribute lands cannot start a second
/// request. The control is disabled for the whole non-idle window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFlow {
    phase: SubmitPhase,
    original_label: String,
}

impl SubmitFlow {
    pub fn new(original_label: impl Into<String>) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            original_label: original_label.into(),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn begin(&mut self) -> Result<(), SubmitError> {
        if self.phase != SubmitPhase::Idle {
            return Err(SubmitError::AlreadyInFlight);
        }
        self.phase = SubmitPhase::Sending;
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<(), SubmitError> {
        if self.phase != SubmitPhase::Sending {
            return Err(SubmitError::NotSending);
        }
        self.phase = SubmitPhase::Sent;
        Ok(())
    }

    pub fn fail(&mut self) -> Result<(), SubmitError> {
        if self.phase != SubmitPhase::Sending {
            return Err(SubmitError::NotSending);
        }
        self.phase = SubmitPhase::Failed;
        Ok(())
    }

    /// Called after `RESTORE_DELAY_MS`; returns to `Idle` from an outcome
    /// state and is a no-op otherwise.
    pub fn restore(&mut self) {
        if matches!(self.phase, SubmitPhase::Sent | SubmitPhase::Failed) {
            self.phase = SubmitPhase::Idle;
        }
    }

    pub fn label(&self) -> &str {
        match self.phase {
            SubmitPhase::Idle => &self.original_label,
            SubmitPhase::Sending => SENDING_LABEL,
            SubmitPhase::Sent => SENT_LABEL,
            SubmitPhase::Failed => FAILED_LABEL,
        }
    }

    pub fn disabled(&self) -> bool {
        self.phase != SubmitPhase::Idle
    }

    /// Fields are cleared exactly once, on confirmed success.
    pub fn should_clear_fields(&self) -> bool {
        self.phase == SubmitPhase::Sent
    }
}
