use super::OneSignalClient;
use crate::enums::DispatchMode;
use crate::error::{ParameterError, Result};
use crate::helpers::API_URL;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Callback, HttpClient, Parameters};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::sync::atomic::AtomicBool;
use serde_json::Value;
use url::Url;

/// Environment variable for the app ID.
const ENV_APP_ID: &str = "ONESIGNAL_APP_ID";
/// Environment variable for the REST API key.
const ENV_REST_API_KEY: &str = "ONESIGNAL_REST_API_KEY";
/// Environment variable for the user auth key.
const ENV_USER_AUTH_KEY: &str = "ONESIGNAL_USER_AUTH_KEY";

/// Builder for constructing a [`OneSignalClient`].
#[derive(Clone)]
pub struct OneSignalClientBuilder {
    /// The app ID sent with every request.
    pub(crate) app_id: String,
    /// The REST API key used to authorize requests.
    pub(crate) rest_api_key: String,
    /// The user auth key.
    pub(crate) user_auth_key: Option<String>,
    /// Parameters merged over every notification.
    pub(crate) default_parameters: Parameters,
    /// Origin and base path of the API.
    pub(crate) base_url: String,
    /// How requests are dispatched.
    pub(crate) dispatch_mode: DispatchMode,
    /// Skip TLS certificate verification when sending notifications.
    pub(crate) accept_invalid_certs_for_notifications: bool,
    /// Called with the decoded body of every successful asynchronous request.
    pub(crate) callback: Option<Callback>,
    /// Client to use for requests.
    pub(crate) client: Option<HttpClient>,
    /// Transport to use for requests. Takes precedence over `client`.
    pub(crate) transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for OneSignalClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSignalClientBuilder")
            .field("app_id", &self.app_id)
            .field("default_parameters", &self.default_parameters)
            .field("base_url", &self.base_url)
            .field("dispatch_mode", &self.dispatch_mode)
            .field("accept_invalid_certs_for_notifications", &self.accept_invalid_certs_for_notifications)
            .field("callback", &self.callback.is_some())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl OneSignalClientBuilder {
    /// Creates a new [`OneSignalClientBuilder`].
    pub fn new<A, K>(app_id: A, rest_api_key: K) -> Self
    where
        A: Into<String>,
        K: Into<String>,
    {
        Self {
            app_id: app_id.into(),
            rest_api_key: rest_api_key.into(),
            user_auth_key: None,
            default_parameters: Parameters::new(),
            base_url: API_URL.into(),
            dispatch_mode: DispatchMode::default(),
            accept_invalid_certs_for_notifications: false,
            callback: None,
            client: None,
            transport: None,
        }
    }

    /// Creates a builder from the `ONESIGNAL_APP_ID`, `ONESIGNAL_REST_API_KEY` and optional
    /// `ONESIGNAL_USER_AUTH_KEY` environment variables.
    pub fn from_env() -> Result<Self> {
        fn var(key: &'static str) -> Option<String> {
            std::env::var(key).ok().filter(|value| !value.is_empty())
        }

        let app_id = var(ENV_APP_ID)
            .ok_or(ParameterError::MissingEnvironmentVariable(ENV_APP_ID))?;
        let rest_api_key = var(ENV_REST_API_KEY)
            .ok_or(ParameterError::MissingEnvironmentVariable(ENV_REST_API_KEY))?;
        let mut builder = Self::new(app_id, rest_api_key);

        builder.user_auth_key = var(ENV_USER_AUTH_KEY);
        Ok(builder)
    }

    /// The user auth key. Stored on the client; none of the requests made by this crate
    /// send it.
    pub fn user_auth_key<T: Into<String>>(mut self, user_auth_key: T) -> Self {
        self.user_auth_key = Some(user_auth_key.into());
        self
    }

    /// Parameters merged over every notification. These win over parameters of the same name
    /// given per call.
    pub fn default_parameters(mut self, default_parameters: Parameters) -> Self {
        self.default_parameters = default_parameters;
        self
    }

    /// Sets a single default parameter.
    pub fn default_parameter<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.default_parameters.insert(key.into(), value.into());
        self
    }

    /// Origin and base path of the API. Defaults to `https://onesignal.com/api/v1`.
    pub fn base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// How requests are dispatched. Defaults to [`DispatchMode::Sync`].
    pub fn dispatch_mode(mut self, dispatch_mode: DispatchMode) -> Self {
        self.dispatch_mode = dispatch_mode;
        self
    }

    /// Skip TLS certificate verification when sending notifications. Player requests are
    /// always verified. Defaults to `false`.
    ///
    /// Only supported with the default client. [`OneSignalClientBuilder::build`] fails with
    /// [`ParameterError::CustomClientWithInvalidCerts`] when this is combined with
    /// [`OneSignalClientBuilder::client`]; supply a [`Transport`] instead to control both.
    pub fn accept_invalid_certs_for_notifications(mut self, accept_invalid_certs: bool) -> Self {
        self.accept_invalid_certs_for_notifications = accept_invalid_certs;
        self
    }

    /// Called once with the decoded body of every successful asynchronous request made by
    /// the client. Failed requests do not invoke it.
    ///
    /// Each invocation runs in its own task. Invocations follow dispatch order on a
    /// current-thread runtime; on a multi-threaded runtime they may interleave.
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Client to use for every request. Cannot be combined with
    /// [`OneSignalClientBuilder::accept_invalid_certs_for_notifications`].
    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Transport to use for requests. Takes precedence over [`OneSignalClientBuilder::client`].
    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Builds the [`OneSignalClient`].
    pub fn build(self) -> Result<OneSignalClient> {
        let base_url = self.base_url.parse::<Url>()
            .map_err(ParameterError::UrlParse)?;

        if base_url.cannot_be_a_base() {
            return Err(ParameterError::CannotBeABase(self.base_url).into());
        }

        let accept_invalid_certs = self.accept_invalid_certs_for_notifications;
        let transport: Arc<dyn Transport> = match (self.transport, self.client) {
            (Some(transport), _) => transport,
            (None, Some(_)) if accept_invalid_certs => {
                return Err(ParameterError::CustomClientWithInvalidCerts.into());
            },
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => Arc::new(ReqwestTransport::with_defaults(accept_invalid_certs)?),
        };

        Ok(OneSignalClient {
            app_id: self.app_id,
            rest_api_key: self.rest_api_key,
            user_auth_key: self.user_auth_key,
            default_parameters: RwLock::new(self.default_parameters),
            is_async: AtomicBool::new(self.dispatch_mode.is_async()),
            base_url,
            accept_invalid_certs_for_notifications: accept_invalid_certs,
            callback: self.callback,
            transport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transport::mock::MockTransport;

    #[test]
    fn builds_with_defaults() {
        let client = OneSignalClientBuilder::new("app", "key")
            .transport(MockTransport::new())
            .build()
            .unwrap();

        assert_eq!(client.app_id(), "app");
        assert_eq!(client.dispatch_mode(), DispatchMode::Sync);
        assert!(client.user_auth_key().is_none());
        assert!(client.default_parameters().is_empty());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let error = OneSignalClientBuilder::new("app", "key")
            .base_url("not a url")
            .transport(MockTransport::new())
            .build()
            .unwrap_err();

        assert!(matches!(error, Error::Parameter(ParameterError::UrlParse(_))));

        let error = OneSignalClientBuilder::new("app", "key")
            .base_url("mailto:push@example.com")
            .transport(MockTransport::new())
            .build()
            .unwrap_err();

        assert!(matches!(error, Error::Parameter(ParameterError::CannotBeABase(_))));
    }

    #[test]
    fn sets_options() {
        let client = OneSignalClientBuilder::new("app", "key")
            .user_auth_key("auth")
            .default_parameter("ttl", 60)
            .dispatch_mode(DispatchMode::Async)
            .transport(MockTransport::new())
            .build()
            .unwrap();

        assert_eq!(client.user_auth_key(), Some("auth"));
        assert_eq!(client.default_parameters()["ttl"], 60);
        assert_eq!(client.dispatch_mode(), DispatchMode::Async);
    }

    #[test]
    fn rejects_custom_client_with_invalid_certs() {
        let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        let error = OneSignalClientBuilder::new("app", "key")
            .client(client.clone())
            .accept_invalid_certs_for_notifications(true)
            .build()
            .unwrap_err();

        assert!(matches!(error, Error::Parameter(ParameterError::CustomClientWithInvalidCerts)));

        let client = OneSignalClientBuilder::new("app", "key")
            .client(client)
            .build()
            .unwrap();

        assert!(!client.accept_invalid_certs_for_notifications);
    }

    #[test]
    fn transport_may_be_combined_with_invalid_certs() {
        let client = OneSignalClientBuilder::new("app", "key")
            .transport(MockTransport::new())
            .accept_invalid_certs_for_notifications(true)
            .build()
            .unwrap();

        assert!(client.accept_invalid_certs_for_notifications);
    }
}
