//! Types for common values in requests and responses.

use std::sync::Arc;

/// A JSON parameter mapping sent as a request body, e.g. the fields of a notification.
pub type Parameters = serde_json::Map<String, serde_json::Value>;
/// The ID of a player (device) registered with the service.
pub type PlayerId = String;
/// A completion callback for asynchronous dispatches. Receives the decoded response body.
pub type Callback = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

// Types internally used by the crate.
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;
