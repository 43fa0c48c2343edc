//! The client for sending notifications and managing players.

mod builder;

pub use builder::OneSignalClientBuilder;

use crate::dispatch::{chain_callback, DispatchResult, PendingResult};
use crate::enums::DispatchMode;
use crate::error::{ParameterError, Result};
use crate::helpers::parses_response;
use crate::request::{
    self,
    GetPlayersOptions,
    NotificationExtras,
    PlayerWrite,
    ENDPOINT_NOTIFICATIONS,
    ENDPOINT_PLAYERS,
};
use crate::transport::{ApiRequest, Transport};
use crate::types::{Callback, Parameters};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

/// Sends notifications and manages players for a single app.
///
/// Every call builds its own request from the client's credentials and default parameters, so
/// a client can be shared between tasks. Default parameters and the dispatch mode can be
/// changed at any time and apply to calls made afterwards.
pub struct OneSignalClient {
    /// The app ID sent with every request.
    app_id: String,
    /// The REST API key used to authorize requests.
    rest_api_key: String,
    /// The user auth key.
    user_auth_key: Option<String>,
    /// Parameters merged over every notification.
    default_parameters: RwLock<Parameters>,
    /// Whether requests are dispatched asynchronously.
    is_async: AtomicBool,
    /// Origin and base path of the API.
    base_url: Url,
    /// Skip TLS certificate verification when sending notifications.
    accept_invalid_certs_for_notifications: bool,
    /// Called with the decoded body of every successful asynchronous request.
    callback: Option<Callback>,
    /// Executes requests.
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for OneSignalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSignalClient")
            .field("app_id", &self.app_id)
            .field("dispatch_mode", &self.dispatch_mode())
            .field("base_url", &self.base_url.as_str())
            .field("accept_invalid_certs_for_notifications", &self.accept_invalid_certs_for_notifications)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl OneSignalClient {
    /// Builder for constructing a [`OneSignalClient`].
    pub fn builder<A, K>(app_id: A, rest_api_key: K) -> OneSignalClientBuilder
    where
        A: Into<String>,
        K: Into<String>,
    {
        OneSignalClientBuilder::new(app_id, rest_api_key)
    }

    /// Creates a client with default options.
    pub fn new<A, K, U>(
        app_id: A,
        rest_api_key: K,
        user_auth_key: U,
    ) -> Result<Self>
    where
        A: Into<String>,
        K: Into<String>,
        U: Into<String>,
    {
        Self::builder(app_id, rest_api_key)
            .user_auth_key(user_auth_key)
            .build()
    }

    /// The app ID.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The user auth key.
    pub fn user_auth_key(&self) -> Option<&str> {
        self.user_auth_key.as_deref()
    }

    /// A line describing the credentials in use, for checking configuration.
    pub fn credentials_summary(&self) -> String {
        format!("APP ID: {} REST: {}", self.app_id, self.rest_api_key)
    }

    /// Replaces all default parameters.
    pub fn add_params(&self, params: Parameters) -> &Self {
        *self.default_parameters.write().unwrap_or_else(PoisonError::into_inner) = params;
        self
    }

    /// Sets a single default parameter.
    pub fn set_param<K, V>(&self, key: K, value: V) -> &Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.default_parameters.write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        self
    }

    /// A copy of the current default parameters.
    pub fn default_parameters(&self) -> Parameters {
        self.default_parameters.read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Turns asynchronous dispatch on or off for subsequent calls.
    pub fn set_async(&self, on: bool) -> &Self {
        self.is_async.store(on, Ordering::Relaxed);
        self
    }

    /// How requests are currently dispatched.
    pub fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::from(self.is_async.load(Ordering::Relaxed))
    }

    /// Parameters for a notification to a single player, ready to send.
    pub fn build_user_notification(
        &self,
        message: &str,
        user_id: &str,
        extras: NotificationExtras,
    ) -> Parameters {
        let params = request::user_notification(&self.app_id, message, user_id, extras);

        self.build_custom_notification(params)
    }

    /// Parameters for a notification to every subscribed player, ready to send. Without a
    /// title the heading and subtitle are a single space.
    pub fn build_broadcast_notification(
        &self,
        message: &str,
        title: Option<&str>,
        extras: NotificationExtras,
    ) -> Parameters {
        let params = request::broadcast_notification(&self.app_id, message, title, extras);

        self.build_custom_notification(params)
    }

    /// Parameters for a notification to a segment, ready to send.
    pub fn build_segment_notification(
        &self,
        message: &str,
        segment: &str,
        extras: NotificationExtras,
    ) -> Parameters {
        let params = request::segment_notification(&self.app_id, message, segment, extras);

        self.build_custom_notification(params)
    }

    /// Finalizes caller-assembled notification parameters. `app_id` is always overwritten, the
    /// `all` segment is targeted when neither `included_segments` nor `include_player_ids`
    /// is given, and default parameters are merged over the result.
    pub fn build_custom_notification(
        &self,
        params: Parameters,
    ) -> Parameters {
        let defaults = self.default_parameters.read()
            .unwrap_or_else(PoisonError::into_inner);

        request::custom_notification(&self.app_id, params, &defaults)
    }

    /// Sends a notification to a single player.
    pub async fn send_notification_to_user(
        &self,
        message: &str,
        user_id: &str,
        extras: NotificationExtras,
    ) -> Result<DispatchResult> {
        let params = self.build_user_notification(message, user_id, extras);

        self.send_notification(params).await
    }

    /// Sends a notification to every subscribed player.
    pub async fn send_notification_to_all(
        &self,
        message: &str,
        title: Option<&str>,
        extras: NotificationExtras,
    ) -> Result<DispatchResult> {
        let params = self.build_broadcast_notification(message, title, extras);

        self.send_notification(params).await
    }

    /// Sends a notification to a segment.
    pub async fn send_notification_to_segment(
        &self,
        message: &str,
        segment: &str,
        extras: NotificationExtras,
    ) -> Result<DispatchResult> {
        let params = self.build_segment_notification(message, segment, extras);

        self.send_notification(params).await
    }

    /// Sends a notification with custom parameters. See
    /// <https://documentation.onesignal.com/reference/create-notification> for the fields.
    pub async fn send_notification_custom(
        &self,
        params: Parameters,
    ) -> Result<DispatchResult> {
        let params = self.build_custom_notification(params);

        self.send_notification(params).await
    }

    /// Creates a player (device). `device_type` is required and must be numeric; otherwise an
    /// error is returned without sending a request.
    pub async fn create_player(
        &self,
        params: Parameters,
    ) -> Result<DispatchResult> {
        request::validate_new_player(&params)?;

        self.send_player(params, PlayerWrite::Create).await
    }

    /// Edits a player (device). `id` is required and selects the player to edit.
    pub async fn edit_player(
        &self,
        params: Parameters,
    ) -> Result<DispatchResult> {
        let id = request::player_id(&params)?;

        self.send_player(params, PlayerWrite::Edit(id)).await
    }

    /// Lists the players of an app.
    pub async fn get_players(
        &self,
        options: GetPlayersOptions,
    ) -> Result<DispatchResult> {
        let query = options.query(&self.app_id);

        self.get(&[ENDPOINT_PLAYERS], query).await
    }

    async fn send_notification(
        &self,
        params: Parameters,
    ) -> Result<DispatchResult> {
        let accept_invalid_certs = self.accept_invalid_certs_for_notifications;

        self.post(&[ENDPOINT_NOTIFICATIONS], params, accept_invalid_certs).await
    }

    async fn send_player(
        &self,
        params: Parameters,
        write: PlayerWrite,
    ) -> Result<DispatchResult> {
        let params = request::player_parameters(&self.app_id, params);
        let url = self.get_url(&write.path_segments())?;
        let request = self.new_request(write.method(), url, Vec::new(), Some(params), false)?;

        self.dispatch(request).await
    }

    async fn post(
        &self,
        path_segments: &[&str],
        params: Parameters,
        accept_invalid_certs: bool,
    ) -> Result<DispatchResult> {
        let url = self.get_url(path_segments)?;
        let request = self.new_request(Method::POST, url, Vec::new(), Some(params), accept_invalid_certs)?;

        self.dispatch(request).await
    }

    async fn get(
        &self,
        path_segments: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<DispatchResult> {
        let url = self.get_url(path_segments)?;
        let request = self.new_request(Method::GET, url, query, None, false)?;

        self.dispatch(request).await
    }

    fn get_url(
        &self,
        path_segments: &[&str],
    ) -> Result<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ParameterError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path_segments);

        Ok(url)
    }

    /// Headers sent with every request: the REST API key and the JSON content type.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&format!("Basic {}", self.rest_api_key))
            .map_err(ParameterError::InvalidHeaderValue)?;

        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn new_request(
        &self,
        method: Method,
        url: Url,
        query: Vec<(String, String)>,
        params: Option<Parameters>,
        accept_invalid_certs: bool,
    ) -> Result<ApiRequest> {
        Ok(ApiRequest {
            method,
            url,
            headers: self.headers()?,
            query,
            body: params.map(Value::Object),
            accept_invalid_certs,
        })
    }

    async fn dispatch(
        &self,
        request: ApiRequest,
    ) -> Result<DispatchResult> {
        let mode = self.dispatch_mode();

        log::debug!("{} {} ({mode})", request.method, request.url);

        let response = self.transport.execute(request);

        match mode {
            DispatchMode::Sync => {
                let response = response.await?;
                let body = parses_response(response.status, &response.body)?;

                Ok(DispatchResult::Ready(body))
            },
            DispatchMode::Async => {
                let pending = PendingResult::spawn(async move {
                    let response = response.await?;

                    parses_response(response.status, &response.body)
                });

                Ok(DispatchResult::Pending(chain_callback(pending, self.callback.as_ref())))
            },
        }
    }
}
