//! A client for sending push notifications and managing players (devices) through the
//! OneSignal REST API.
//!
//! ```no_run
//! use onesignal_client::{OneSignalClient, NotificationExtras};
//!
//! # async fn run() -> Result<(), onesignal_client::Error> {
//! let client = OneSignalClient::builder("app-id", "rest-api-key").build()?;
//! let response = client
//!     .send_notification_to_all("Hello!", Some("Greetings"), NotificationExtras::new())
//!     .await?
//!     .resolve()
//!     .await?;
//!
//! println!("{response}");
//! # Ok(())
//! # }
//! ```
//!
//! Requests are dispatched synchronously by default: the call completes with the decoded
//! response body. With [`OneSignalClient::set_async`] calls return a [`PendingResult`]
//! immediately instead, which may be awaited or chained with a callback.

pub mod client;
pub mod dispatch;
pub mod enums;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

mod helpers;

pub use client::{OneSignalClient, OneSignalClientBuilder};
pub use dispatch::{DispatchResult, PendingResult};
pub use enums::{DeviceType, DispatchMode};
pub use error::{Error, ParameterError};
pub use request::{Button, GetPlayersOptions, NotificationExtras, PlayerWrite, Targeting};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use types::Parameters;
pub use helpers::API_URL;

/// The reqwest client stack used by [`ReqwestTransport`].
pub use reqwest_middleware;
