use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;
use edusum_core::{
    BackendLoader, Device, Error, LanguageTag, LengthBudget, ModelDescriptor, Result, SummaryBackend,
};
use crate::config::HttpBackendConfig;

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

fn with_token(request: RequestBuilder, api_token: Option<&str>) -> RequestBuilder {
    match api_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Sequence-to-sequence model served by a hosted inference endpoint.
pub struct HttpBackend {
    client: Arc<Client>,
    model_url: Url,
    model_id: String,
    device: Device,
    api_token: Option<String>,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("client", &"<reqwest::Client>")
            .field("model_url", &self.model_url.as_str())
            .field("model_id", &self.model_id)
            .field("device", &self.device)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl SummaryBackend for HttpBackend {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn device(&self) -> Device {
        self.device
    }

    async fn run(&self, text: &str, budget: LengthBudget) -> Result<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: GenerationParameters {
                min_length: budget.min_length,
                max_length: budget.max_length,
                do_sample: false,
            },
        };

        let response = with_token(self.client.post(self.model_url.clone()), self.api_token.as_deref())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SummarizationOutput>>()
            .await?;

        let summary = response
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| Error::BackendRuntime(format!("{} returned no summaries", self.model_id)))?;
        tracing::debug!("Generated summary with {}: {}", self.model_id, summary);
        Ok(summary)
    }
}

pub struct HttpBackendLoader {
    client: Arc<Client>,
    endpoint: Url,
    api_token: Option<String>,
    check_on_load: bool,
}

impl fmt::Debug for HttpBackendLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackendLoader")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("check_on_load", &self.check_on_load)
            .finish()
    }
}

impl HttpBackendLoader {
    pub fn new(config: &HttpBackendConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
            api_token: config.api_token.clone(),
            check_on_load: config.check_on_load,
        })
    }

    pub fn model_url(&self, model_id: &str) -> Result<Url> {
        let url = format!("{}/{}", self.endpoint.as_str().trim_end_matches('/'), model_id);
        Url::parse(&url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    async fn check_endpoint(&self, model_url: &Url) -> Result<()> {
        with_token(self.client.get(model_url.clone()), self.api_token.as_deref())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl BackendLoader for HttpBackendLoader {
    async fn load(&self, language: LanguageTag, descriptor: &ModelDescriptor) -> Result<Arc<dyn SummaryBackend>> {
        let model_url = self.model_url(&descriptor.model_id)?;

        if self.check_on_load {
            if let Err(e) = self.check_endpoint(&model_url).await {
                return Err(Error::BackendLoad {
                    model: descriptor.model_id.clone(),
                    reason: format!("{} is not reachable for {}: {}", model_url, language, e),
                });
            }
        }

        Ok(Arc::new(HttpBackend {
            client: self.client.clone(),
            model_url,
            model_id: descriptor.model_id.clone(),
            device: descriptor.device,
            api_token: self.api_token.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response and hands back the request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}/models", addr), handle)
    }

    fn config(endpoint: &str) -> HttpBackendConfig {
        HttpBackendConfig {
            endpoint: endpoint.to_string(),
            api_token: Some("secret-token".to_string()),
            timeout_secs: 5,
            check_on_load: false,
        }
    }

    #[test]
    fn test_loader_rejects_invalid_endpoint() {
        let result = HttpBackendLoader::new(&config("not a url"));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_model_url_composition() {
        let loader = HttpBackendLoader::new(&config("https://example.com/models/")).unwrap();
        let url = loader.model_url("facebook/bart-large-cnn").unwrap();
        assert_eq!(url.as_str(), "https://example.com/models/facebook/bart-large-cnn");
        assert!(!format!("{:?}", loader).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_run_sends_budget_and_reads_summary() {
        let (endpoint, server) = serve_once("200 OK", r#"[{"summary_text":"A short summary."}]"#).await;
        let loader = HttpBackendLoader::new(&config(&endpoint)).unwrap();
        let descriptor = ModelDescriptor::new("facebook/bart-large-cnn").with_device(Device::Accelerator);
        let backend = loader.load(LanguageTag::En, &descriptor).await.unwrap();
        assert_eq!(backend.model_id(), "facebook/bart-large-cnn");
        assert_eq!(backend.device(), Device::Accelerator);

        let summary = backend
            .run("Some long text.", LengthBudget { min_length: 3, max_length: 6 })
            .await
            .unwrap();
        assert_eq!(summary, "A short summary.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /models/facebook/bart-large-cnn"));
        assert!(request.to_lowercase().contains("authorization: bearer secret-token"));
        assert!(request.contains(r#""min_length":3"#));
        assert!(request.contains(r#""max_length":6"#));
        assert!(request.contains(r#""do_sample":false"#));
    }

    #[tokio::test]
    async fn test_run_surfaces_server_errors() {
        let (endpoint, server) = serve_once("503 Service Unavailable", r#"{"error":"loading"}"#).await;
        let loader = HttpBackendLoader::new(&config(&endpoint)).unwrap();
        let backend = loader
            .load(LanguageTag::De, &ModelDescriptor::new("facebook/mbart-large-50-many-to-many-mmt"))
            .await
            .unwrap();

        let result = backend.run("Text.", LengthBudget { min_length: 1, max_length: 1 }).await;
        assert!(result.is_err());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let (endpoint, server) = serve_once("200 OK", "[]").await;
        let loader = HttpBackendLoader::new(&config(&endpoint)).unwrap();
        let backend = loader
            .load(LanguageTag::Ru, &ModelDescriptor::new("IlyaGusev/rut5_base_sum_gazeta"))
            .await
            .unwrap();

        let result = backend.run("Текст.", LengthBudget { min_length: 1, max_length: 1 }).await;
        assert!(matches!(result, Err(Error::BackendRuntime(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_endpoint_check_failure_is_a_load_error() {
        let (endpoint, server) = serve_once("404 Not Found", r#"{"error":"missing"}"#).await;
        let mut config = config(&endpoint);
        config.check_on_load = true;
        let loader = HttpBackendLoader::new(&config).unwrap();

        let result = loader.load(LanguageTag::En, &ModelDescriptor::new("missing/model")).await;
        assert!(matches!(result, Err(Error::BackendLoad { ref model, .. }) if model == "missing/model"));
        server.await.unwrap();
    }
}
