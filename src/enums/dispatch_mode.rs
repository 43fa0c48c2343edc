use strum_macros::{Display, EnumString};

/// How a client executes its requests.
#[derive(Display, EnumString, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DispatchMode {
    /// Wait for the response and return the decoded body. This is the default.
    #[default]
    #[strum(serialize = "sync")]
    Sync,
    /// Spawn the request onto the tokio runtime and return a pending result immediately.
    #[strum(serialize = "async")]
    Async,
}

impl From<bool> for DispatchMode {
    /// `true` selects [`DispatchMode::Async`].
    fn from(is_async: bool) -> Self {
        if is_async {
            Self::Async
        } else {
            Self::Sync
        }
    }
}

impl DispatchMode {
    /// Whether requests are dispatched asynchronously.
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async)
    }
}
