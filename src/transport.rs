//! The HTTP capability requests are executed through.

use crate::error::Result;
use crate::helpers::{get_default_client, USER_AGENT_STRING};
use crate::types::HttpClient;
use std::fmt;
use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::{Method, StatusCode};
use reqwest::header::HeaderMap;
use serde_json::Value;
use url::Url;

/// A fully assembled request. Built fresh for every call and never mutated after dispatch.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// The HTTP verb.
    pub method: Method,
    /// The endpoint URL, without the query.
    pub url: Url,
    /// Headers, including `Authorization` and `Content-Type`.
    pub headers: HeaderMap,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// The JSON body, if any.
    pub body: Option<Value>,
    /// Whether TLS certificate verification should be skipped for this request.
    pub accept_invalid_certs: bool,
}

/// A raw response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The response status.
    pub status: StatusCode,
    /// The undecoded body.
    pub body: Bytes,
}

/// Executes requests. Implementations attempt each request once.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Executes the request. The returned future owns everything it needs so it can be
    /// spawned onto a runtime.
    fn execute(&self, request: ApiRequest) -> BoxFuture<'static, Result<ApiResponse>>;
}

/// A [`Transport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// The client for making requests.
    client: HttpClient,
    /// Client with certificate verification disabled. Only present when explicitly enabled.
    insecure_client: Option<HttpClient>,
}

impl ReqwestTransport {
    /// Creates a transport using `client` for every request, including those asking to skip
    /// certificate verification.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            insecure_client: None,
        }
    }

    /// Creates a transport with a default client. See [`ReqwestTransport::with_client`].
    pub fn with_defaults(accept_invalid_certs: bool) -> Result<Self> {
        Self::with_client(get_default_client(USER_AGENT_STRING, false)?, accept_invalid_certs)
    }

    /// Creates a transport using `client`. When `accept_invalid_certs` is set, an additional
    /// client that skips certificate verification is built for requests that ask for it.
    pub fn with_client(client: HttpClient, accept_invalid_certs: bool) -> Result<Self> {
        let insecure_client = if accept_invalid_certs {
            log::warn!("TLS certificate verification is disabled for notification requests");
            Some(get_default_client(USER_AGENT_STRING, true)?)
        } else {
            None
        };

        Ok(Self {
            client,
            insecure_client,
        })
    }

    fn client_for(&self, request: &ApiRequest) -> &HttpClient {
        match (&self.insecure_client, request.accept_invalid_certs) {
            (Some(insecure_client), true) => insecure_client,
            _ => &self.client,
        }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: ApiRequest) -> BoxFuture<'static, Result<ApiResponse>> {
        let client = self.client_for(&request).clone();

        Box::pin(async move {
            let mut builder = client.request(request.method, request.url)
                .headers(request.headers);

            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            log::debug!("Received response with status {status}");

            Ok(ApiResponse {
                status,
                body,
            })
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Records every request and replays canned responses in order. Once the queue is empty
    /// every request answers `200 {}`.
    #[derive(Debug, Default, Clone)]
    pub struct MockTransport {
        pub requests: Arc<Mutex<Vec<ApiRequest>>>,
        responses: Arc<Mutex<VecDeque<(StatusCode, &'static str)>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond_with(self, status: StatusCode, body: &'static str) -> Self {
            self.responses.lock().unwrap().push_back((status, body));
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn request(&self, index: usize) -> ApiRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: ApiRequest) -> BoxFuture<'static, Result<ApiResponse>> {
            self.requests.lock().unwrap().push(request);

            let (status, body) = self.responses.lock().unwrap()
                .pop_front()
                .unwrap_or((StatusCode::OK, "{}"));

            Box::pin(async move {
                Ok(ApiResponse {
                    status,
                    body: Bytes::from_static(body.as_bytes()),
                })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(accept_invalid_certs: bool) -> ApiRequest {
        ApiRequest {
            method: Method::POST,
            url: "https://onesignal.com/api/v1/notifications".parse().unwrap(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            accept_invalid_certs,
        }
    }

    #[test]
    fn insecure_client_is_not_built_by_default() {
        let transport = ReqwestTransport::with_defaults(false).unwrap();

        assert!(transport.insecure_client.is_none());
        assert!(std::ptr::eq(transport.client_for(&request(true)), &transport.client));
    }

    #[test]
    fn insecure_client_is_used_only_when_requested() {
        let transport = ReqwestTransport::with_defaults(true).unwrap();

        assert!(std::ptr::eq(transport.client_for(&request(false)), &transport.client));
        assert!(!std::ptr::eq(transport.client_for(&request(true)), &transport.client));
    }
}
