use std::time::Duration;

/// Quiet period between the last filter edit and the list fetch it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub debounce: Duration,

    /// Drop list responses that were issued before the one currently in the
    /// cache. Off by default: responses are applied in arrival order.
    pub discard_stale_responses: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            discard_stale_responses: false,
        }
    }
}
