//! Error types.

use reqwest::StatusCode;

/// Result type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error that can occur while building or dispatching a request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required parameter was missing or malformed. No request was sent.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// The HTTP request could not be completed.
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    /// A middleware in the client stack failed.
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    /// The service answered with a non-success status.
    #[error("Error {}: {}", .status, .body)]
    Http {
        /// The response status.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },
    /// The response body was not valid JSON, or did not match the expected shape.
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    /// An asynchronous dispatch task failed before resolving.
    #[error("Dispatch task failed: {}", .0)]
    Join(String),
}

/// A parameter was missing or malformed.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    /// `device_type` is required to create a player.
    #[error("The `device_type` param is required as integer to create a player(device)")]
    MissingDeviceType,
    /// `device_type` must be numeric.
    #[error("The `device_type` param must be numeric, got {}", .0)]
    NonNumericDeviceType(serde_json::Value),
    /// `id` is required to edit a player.
    #[error("The `id` param is required to edit a player(device)")]
    MissingPlayerId,
    /// The endpoint URL could not be built.
    #[error("Error parsing URL: {}", .0)]
    UrlParse(#[from] url::ParseError),
    /// The base URL cannot have path segments appended, e.g. `mailto:` URLs.
    #[error("Base URL cannot be a base: {}", .0)]
    CannotBeABase(String),
    /// A credential contains characters not allowed in a header.
    #[error("Invalid header value: {}", .0)]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
    /// A required environment variable is not set.
    #[error("Missing environment variable: {}", .0)]
    MissingEnvironmentVariable(&'static str),
    /// A caller-supplied client cannot skip certificate verification on its own, so it
    /// cannot be combined with insecure notification requests.
    #[error("A custom client cannot be combined with accept_invalid_certs_for_notifications")]
    CustomClientWithInvalidCerts,
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Error {
        Error::Join(error.to_string())
    }
}

impl Error {
    /// Whether this error was raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// The response status, if the service answered with a non-success status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}
