//! Run configuration applied at input-handler construction.

/// Process-wide input configuration, read once when a handler is built.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Cap on the number of events served; `None` serves everything found
    /// by the pre-scan.
    pub max_events: Option<u64>,
}

impl InputConfig {
    /// Configuration with an explicit event cap.
    pub fn with_max_events(max_events: u64) -> Self {
        Self { max_events: Some(max_events) }
    }
}
