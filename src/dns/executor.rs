// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use async_trait::async_trait;
use hyper::{Method, StatusCode};
use std::sync::Arc;

/// A request for the Route 53 API, relative to the configured endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Unencoded path segments, starting with the API version.
    pub path: Vec<String>,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// XML body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// The path joined with `/`, for logging.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}

/// Whatever the provider answered, successful or not.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body.
    pub body: Vec<u8>,
}

/// Sends requests to the provider. Implementations own signing, connection reuse and
/// any retry policy.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Perform one round trip. An `Err` means no response was received.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

#[async_trait]
impl<T: HttpExecutor + ?Sized> HttpExecutor for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        (**self).execute(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_executor::ReqwestExecutor;

#[cfg(feature = "reqwest")]
mod reqwest_executor {
    use super::{HttpExecutor, HttpRequest, HttpResponse};
    use crate::common::{Error, Route53Settings};
    use async_trait::async_trait;
    use hyper::header::{HeaderMap, HeaderName, HeaderValue};
    use hyper::StatusCode;
    use reqwest::Client;
    use std::time::Duration;

    const DEBUG_REQUEST: bool = false;

    /// [`HttpExecutor`] over a `reqwest` client.
    pub struct ReqwestExecutor {
        client: Client,
        endpoint: String,
    }

    impl ReqwestExecutor {
        /// Create an executor from the `[route53]` configuration table.
        #[cfg(feature = "toml")]
        pub fn new(cub_config: &crate::common::CubConfig) -> Result<Self, Error> {
            Self::with_settings(&cub_config.route53()?)
        }

        /// Create an executor from explicit settings.
        pub fn with_settings(settings: &Route53Settings) -> Result<Self, Error> {
            let mut default_headers = HeaderMap::new();
            default_headers.insert(
                reqwest::header::USER_AGENT,
                HeaderValue::from_str(&settings.user_agent)
                    .map_err(|e| Error::String(format!("user_agent: {e}")))?,
            );
            for (name, value) in &settings.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| Error::String(format!("header {name}: {e}")))?;
                let mut value = HeaderValue::from_str(value)
                    .map_err(|e| Error::String(format!("header {name}: {e}")))?;
                value.set_sensitive(true);
                default_headers.insert(name, value);
            }
            let client = Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .default_headers(default_headers)
                .build()
                .map_err(|e| Error::String(format!("reqwest: {e}")))?;
            Ok(Self {
                client,
                endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            })
        }

        fn url(&self, request: &HttpRequest) -> String {
            let path: Vec<_> = request
                .path
                .iter()
                .map(|segment| urlencoding::encode(segment))
                .collect();
            format!("{}/{}", self.endpoint, path.join("/"))
        }
    }

    #[async_trait]
    impl HttpExecutor for ReqwestExecutor {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
            let url = self.url(&request);
            let method = request.method.clone();
            if DEBUG_REQUEST {
                println!(">> {method} {url} {:?}", request.query);
            }
            let mut builder = self.client.request(method.clone(), url);
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "text/xml")
                    .body(body);
            }
            match builder.send().await {
                Ok(r) => {
                    let status = r.status();
                    match r.bytes().await {
                        Ok(body) => Ok(HttpResponse {
                            status,
                            body: body.to_vec(),
                        }),
                        Err(e) => Err(Error::Transport(status, format!("route53 {method}: {e}"))),
                    }
                }
                Err(e) => Err(Error::Transport(
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("route53 {method}: {e}"),
                )),
            }
        }
    }
}
