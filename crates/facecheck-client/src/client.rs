//! Recognition service HTTP client.

use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use facecheck_models::{ConnectionStatus, ErrorKind, LabelCatalog, RecognitionOutcome};

use crate::error::{ClientError, ClientResult};
use crate::image::ImagePayload;
use crate::types::{
    EmployeeList, RecognizeRequest, RecognizeResponse, RegisterRequest, RegistrationResult,
    TrainingResult,
};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_THRESHOLD: f64 = 0.70;

/// Configuration for the recognition client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the recognition service
    pub endpoint: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Minimum confidence for a positive identification
    pub confidence_threshold: f64,
    /// Identity labels, in the server model's output order
    pub catalog: LabelCatalog,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            confidence_threshold: DEFAULT_THRESHOLD,
            catalog: LabelCatalog::default(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("FACECHECK_API_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout: Duration::from_millis(
                std::env::var("FACECHECK_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            confidence_threshold: std::env::var("FACECHECK_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_THRESHOLD),
            catalog: std::env::var("FACECHECK_LABELS")
                .map(|s| {
                    LabelCatalog::from_names(
                        s.split(',').map(str::trim).filter(|label| !label.is_empty()),
                    )
                })
                .unwrap_or_default(),
        }
    }
}

/// Client for the remote face recognition service.
///
/// Owns the last known [`ConnectionStatus`] instead of publishing it
/// through process-wide state: construct one instance and hand it to
/// whatever drives the capture flow. Overlapping calls are independent,
/// with no de-duplication or cancellation beyond the request timeout;
/// re-entrant triggers are the caller's to debounce.
pub struct RecognitionClient {
    http: Client,
    confidence_threshold: f64,
    catalog: LabelCatalog,
    endpoint: RwLock<String>,
    status: RwLock<ConnectionStatus>,
}

impl RecognitionClient {
    /// Create a new recognition client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Url::parse(&config.endpoint)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Network)?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let status = ConnectionStatus::new(false, &endpoint);

        Ok(Self {
            http,
            confidence_threshold: config.confidence_threshold,
            catalog: config.catalog,
            endpoint: RwLock::new(endpoint),
            status: RwLock::new(status),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Last known connection status, without touching the network.
    pub fn status(&self) -> ConnectionStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Probe `{endpoint}/health`.
    ///
    /// Connectivity problems are a status signal here, not an error: any
    /// transport failure, timeout, or non-2xx response yields
    /// `connected == false`. The stored status is updated as a side effect.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let url = self.service_url("/health");

        let connected = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("health check failed: {}", response.status());
                false
            }
            Err(e) => {
                warn!("health check error: {}", e);
                false
            }
        };

        let status = ConnectionStatus::new(connected, self.endpoint());
        self.set_status(status.clone());
        status
    }

    /// Point the client at a new endpoint and re-validate connectivity.
    ///
    /// Returns whether the new endpoint answered the health probe. An
    /// unparsable URL is rejected without touching the stored endpoint.
    pub async fn set_endpoint(&self, url: &str) -> bool {
        if Url::parse(url).is_err() {
            warn!("rejecting invalid endpoint URL: {}", url);
            return false;
        }

        debug!("endpoint changed to {}", url);
        {
            let mut guard = self.endpoint.write().unwrap_or_else(PoisonError::into_inner);
            *guard = url.trim_end_matches('/').to_string();
        }
        self.check_connection().await.connected
    }

    /// Submit one captured image for recognition.
    ///
    /// Exactly one round trip per call, attempted even when the last known
    /// status is disconnected. Every failure mode comes back as a fully
    /// shaped outcome with `success == false` and the error kind set; this
    /// method never panics or returns an error to the caller.
    pub async fn recognize(&self, image: &ImagePayload) -> RecognitionOutcome {
        let started = Instant::now();
        match self.try_recognize(image, started).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("recognition failed: {}", e);
                let kind = e.kind();
                if kind == ErrorKind::Connectivity {
                    self.set_status(ConnectionStatus::new(false, self.endpoint()));
                }
                RecognitionOutcome::failure(&self.catalog, kind, e.to_string(), elapsed_ms(started))
            }
        }
    }

    async fn try_recognize(
        &self,
        image: &ImagePayload,
        started: Instant,
    ) -> ClientResult<RecognitionOutcome> {
        if image.is_empty() {
            return Err(ClientError::invalid_input("empty image payload"));
        }

        let url = self.service_url("/recognize");
        debug!("sending recognition request to {}", url);

        let encoded = image.as_base64();
        let response = self
            .http
            .post(&url)
            .json(&RecognizeRequest { image: &encoded })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RemoteStatus { status, body });
        }

        let parsed: RecognizeResponse = response.json().await?;
        self.resolve(parsed, elapsed_ms(started))
    }

    /// Turn a wire response into a UI-ready outcome.
    ///
    /// A raw score vector takes precedence over a pre-resolved pair; a
    /// body carrying neither is a remote fault.
    fn resolve(
        &self,
        response: RecognizeResponse,
        latency_ms: u64,
    ) -> ClientResult<RecognitionOutcome> {
        if let Some(scores) = response.scores {
            return RecognitionOutcome::from_scores(
                &self.catalog,
                &scores,
                self.confidence_threshold,
                latency_ms,
            )
            .map_err(|e| ClientError::InvalidInput(e.to_string()));
        }

        match (response.person, response.confidence) {
            (Some(name), Some(confidence)) => Ok(RecognitionOutcome::from_resolved(
                &self.catalog,
                &name,
                confidence,
                self.confidence_threshold,
                latency_ms,
            )),
            _ => Err(ClientError::InvalidResponse(
                "body carries neither scores nor a person/confidence pair".into(),
            )),
        }
    }

    /// Register a labeled face sample for later server-side training.
    ///
    /// The label is trimmed but not checked against the catalog: the
    /// server owns the roster, the catalog here is only an ordering aid
    /// for `recognize`. Never returns an error; failures come back as
    /// `success == false` with the message set.
    pub async fn register(&self, label: &str, image: &ImagePayload) -> RegistrationResult {
        match self.try_register(label, image).await {
            Ok(result) => result,
            Err(e) => {
                warn!("registration failed: {}", e);
                RegistrationResult::failed(e.to_string())
            }
        }
    }

    async fn try_register(
        &self,
        label: &str,
        image: &ImagePayload,
    ) -> ClientResult<RegistrationResult> {
        let name = label.trim();
        if name.is_empty() {
            return Err(ClientError::invalid_input("empty label"));
        }
        if image.is_empty() {
            return Err(ClientError::invalid_input("empty image payload"));
        }

        let url = self.service_url("/register");
        debug!("registering sample for {} via {}", name, url);

        let encoded = image.as_base64();
        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                name,
                image: &encoded,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RemoteStatus { status, body });
        }

        Ok(response.json().await?)
    }

    /// Kick off a server-side training run.
    ///
    /// Fire-and-forget: one request/response, no polling. The run itself
    /// can take minutes; surfacing that wait to the user is the caller's
    /// job.
    pub async fn request_training(&self) -> TrainingResult {
        match self.try_request_training().await {
            Ok(result) => result,
            Err(e) => {
                warn!("training request failed: {}", e);
                TrainingResult::failed(e.to_string())
            }
        }
    }

    async fn try_request_training(&self) -> ClientResult<TrainingResult> {
        let url = self.service_url("/train");
        debug!("requesting training via {}", url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RemoteStatus { status, body });
        }

        Ok(response.json().await?)
    }

    /// Fetch the registered employee roster.
    pub async fn list_employees(&self) -> EmployeeList {
        match self.try_list_employees().await {
            Ok(list) => list,
            Err(e) => {
                warn!("employee listing failed: {}", e);
                EmployeeList::failed(e.to_string())
            }
        }
    }

    async fn try_list_employees(&self) -> ClientResult<EmployeeList> {
        let url = self.service_url("/employees");
        debug!("fetching employees from {}", url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RemoteStatus { status, body });
        }

        Ok(response.json().await?)
    }

    fn endpoint(&self) -> String {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_status(&self, status: ConnectionStatus) {
        // Whole-value assignment; readers never see a torn update.
        let mut guard = self.status.write().unwrap_or_else(PoisonError::into_inner);
        *guard = status;
    }

    fn service_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint(), path)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.confidence_threshold, 0.70);
        assert!(config.catalog.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = ClientConfig {
            endpoint: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(RecognitionClient::new(config).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            endpoint: "http://10.0.2.2:5000/".to_string(),
            ..ClientConfig::default()
        };
        let client = RecognitionClient::new(config).unwrap();
        assert_eq!(client.service_url("/health"), "http://10.0.2.2:5000/health");
    }

    #[test]
    fn test_initial_status_is_disconnected() {
        let client = RecognitionClient::new(ClientConfig::default()).unwrap();
        let status = client.status();
        assert!(!status.connected);
        assert_eq!(status.endpoint, "http://127.0.0.1:5000");
    }
}
