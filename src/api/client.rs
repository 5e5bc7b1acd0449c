use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{GenerateOutcome, GenerateRequest, GenerateResponse};

/// Anything that can turn a request into an outcome. The chat loop only sees
/// this trait, so tests can swap the HTTP client for a canned responder.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> GenerateOutcome;
}

#[derive(Clone)]
pub struct GenerateClient {
    client: reqwest::Client,
    api_url: String,
}

impl GenerateClient {
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl ResponseSource for GenerateClient {
    async fn generate(&self, request: &GenerateRequest) -> GenerateOutcome {
        debug!(
            model = %request.model,
            temperature = request.temperature,
            top_p = request.top_p,
            "sending generate request"
        );

        let response = match self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "generate request failed");
                return GenerateOutcome::TransportError {
                    detail: err.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "generate request returned an error status");
            return GenerateOutcome::TransportError {
                detail: format!("HTTP error! status: {}", status.as_u16()),
            };
        }

        match response.json::<GenerateResponse>().await {
            Ok(body) => body.into_outcome(),
            Err(err) => {
                warn!(error = %err, "generate response body was malformed");
                GenerateOutcome::TransportError {
                    detail: format!("malformed response body: {err}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(message: &str) -> GenerateRequest {
        GenerateRequest {
            message: message.to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.1,
            top_p: 0.1,
        }
    }

    fn client_for(server: &MockServer) -> GenerateClient {
        GenerateClient::new(format!("{}/api/generate", server.uri()), None).expect("client")
    }

    #[tokio::test]
    async fn posts_json_body_and_returns_trimmed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "message": "Hello",
                "model": "gemini-1.5-flash",
                "temperature": 0.1,
                "top_p": 0.1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": { "message": "\n Hi! \n" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).generate(&request("Hello")).await;
        assert_eq!(
            outcome,
            GenerateOutcome::Success {
                message: "Hi!".to_string()
            }
        );
    }

    #[tokio::test]
    async fn server_reported_failure_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "message": "Content blocked: Safety"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).generate(&request("Hello")).await;
        assert_eq!(
            outcome,
            GenerateOutcome::Failure {
                message: "Content blocked: Safety".to_string()
            }
        );
    }

    #[tokio::test]
    async fn non_2xx_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(serde_json::json!({"detail": "Model API request failed"})),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).generate(&request("Hello")).await;
        assert_eq!(
            outcome,
            GenerateOutcome::TransportError {
                detail: "HTTP error! status: 502".to_string()
            }
        );
        assert_eq!(outcome.display_text(), "Error: HTTP error! status: 502");
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).generate(&request("Hello")).await;
        assert!(outcome.is_error());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let server = MockServer::start().await;
        let url = format!("{}/api/generate", server.uri());
        drop(server);

        let client = GenerateClient::new(url, Some(Duration::from_secs(5))).expect("client");
        let outcome = client.generate(&request("Hello")).await;
        assert!(outcome.is_error());
        assert!(outcome.display_text().starts_with("Error: "));
    }
}
