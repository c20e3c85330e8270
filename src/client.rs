//! HTTP access to the LIFX cloud API.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use tokio::sync::Mutex;

use crate::device::Device;
use crate::errors::Error;
use crate::history::RequestHistory;
use crate::types::PowerState;

type Result<T> = std::result::Result<T, Error>;

/// Client for the two LIFX endpoints the bridge needs.
///
/// Every call carries the bearer token passed in, is bounded by the timeout
/// given at construction and is attempted exactly once. The vendor enforces
/// its own rate limit, so failures are reported rather than retried.
#[derive(Debug, Clone)]
pub struct LifxClient {
    http: reqwest::Client,
    base_url: String,
    history: Arc<Mutex<RequestHistory>>,
}

impl LifxClient {
    const USER_AGENT: &'static str = concat!("lifx-cloud-bridge/", env!("CARGO_PKG_VERSION"));

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| Error::http("build client", e))?;

        Ok(LifxClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            history: Arc::new(Mutex::new(RequestHistory::new())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn history(&self) -> RequestHistory {
        self.history.lock().await.clone()
    }

    /// Fetches every light visible to the token.
    pub async fn list_lights(&self, token: &str) -> Result<Vec<Device>> {
        let path = "/lights/all";
        let request = self.http.get(self.url(path)).bearer_auth(token);
        let response = self.send("GET", path, "list lights", request).await?;

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = Error::http("read body", e);
                self.record_error("GET", path, &err).await;
                return Err(err);
            }
        };

        match serde_json::from_slice(&body) {
            Ok(devices) => Ok(devices),
            Err(e) => {
                let err = Error::JsonLoad(e);
                self.record_error("GET", path, &err).await;
                Err(err)
            }
        }
    }

    /// Switches one light on or off.
    pub async fn set_power(&self, token: &str, id: &str, power: PowerState) -> Result<()> {
        let path = format!("/lights/id:{id}/state");
        let request = self
            .http
            .put(self.url(&path))
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!("power={power}"));

        let response = self.send("PUT", &path, "set power", request).await?;
        debug!("set power response for {}: {}", id, response.status());
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and rejects any non-success status.
    async fn send(
        &self,
        method: &str,
        path: &str,
        action: &str,
        request: RequestBuilder,
    ) -> Result<Response> {
        self.history.lock().await.record_request(method, path);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = Error::http("send", e);
                self.record_error(method, path, &err).await;
                return Err(err);
            }
        };

        let status = response.status();
        self.history
            .lock()
            .await
            .record_response(method, path, status.as_u16());

        if !status.is_success() {
            let err = Error::status(action, status.as_u16());
            self.record_error(method, path, &err).await;
            return Err(err);
        }
        Ok(response)
    }

    async fn record_error(&self, method: &str, path: &str, err: &Error) {
        self.history
            .lock()
            .await
            .record_error(method, path, &err.to_string());
    }
}
