//! HTTP-level tests for the backend client against a simulated service.

use sarcasm_detector::backend::{Backend, BackendClient};
use sarcasm_detector::prediction::{
    InputText, PredictionLabel, PredictionRequest, MAX_INPUT_CHARS,
};
use sarcasm_detector::PredictionError;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BackendClient {
    BackendClient::with_config(&server.uri(), Duration::from_millis(300)).unwrap()
}

fn request(text: &str, timeout: Duration) -> PredictionRequest {
    PredictionRequest::with_timeout(InputText::parse(text, MAX_INPUT_CHARS).unwrap(), timeout)
}

/// A local address with nothing listening on it
fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn healthy_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).health().await);
    }

    #[tokio::test]
    async fn unhealthy_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(!client(&server).health().await);
    }

    #[tokio::test]
    async fn unhealthy_when_probe_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        assert!(!client(&server).health().await);
    }

    #[tokio::test]
    async fn unhealthy_when_nothing_listens() {
        let client =
            BackendClient::with_config(&dead_address(), Duration::from_millis(300)).unwrap();
        assert!(!client.health().await);
    }
}

mod predict {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn sends_text_and_parses_verdict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(serde_json::json!({"text": "Bagus sekali, macet lagi."})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(
                        serde_json::json!({"prediction": "Sarcasm", "confidence": 0.87}),
                    ),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .predict(&request("Bagus sekali, macet lagi.", Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(result.label, PredictionLabel::Sarcasm);
        assert_eq!(result.confidence_display(), "87.0%");
    }

    #[tokio::test]
    async fn other_label_is_non_sarcasm() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(
                    serde_json::json!({"prediction": "Non-Sarcasm", "confidence": 0.64}),
                ),
            )
            .mount(&server)
            .await;

        let result = client(&server)
            .predict(&request("Hari ini cerah.", Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(result.label, PredictionLabel::NonSarcasm);
    }

    #[tokio::test]
    async fn non_success_status_is_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad input"))
            .mount(&server)
            .await;

        let err = client(&server)
            .predict(&request("halo", Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert_eq!(err, PredictionError::BackendError { status: 422 });
    }

    #[tokio::test]
    async fn slow_response_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"prediction": "Sarcasm", "confidence": 0.9}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .predict(&request("halo", Duration::from_millis(200)))
            .await
            .unwrap_err();
        assert_eq!(err, PredictionError::TimeoutError { duration_ms: 200 });
    }

    #[tokio::test]
    async fn stalled_body_is_timeout() {
        // Headers arrive promptly, the body never finishes
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                      content-length: 64\r\n\r\n{\"prediction\":",
                )
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = BackendClient::with_config(&address, Duration::from_millis(300)).unwrap();
        let err = client
            .predict(&request("halo", Duration::from_millis(400)))
            .await
            .unwrap_err();
        assert_eq!(err, PredictionError::TimeoutError { duration_ms: 400 });
        server.abort();
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let address = dead_address();
        let client = BackendClient::with_config(&address, Duration::from_millis(300)).unwrap();

        let err = client
            .predict(&request("halo", Duration::from_secs(5)))
            .await
            .unwrap_err();
        match err {
            PredictionError::ConnectionError { url, .. } => assert_eq!(url, address),
            other => panic!("expected ConnectionError, got: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"prediction": "Sarcasm"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .predict(&request("halo", Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn wrong_type_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"prediction": 1, "confidence": "0.5"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .predict(&request("halo", Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }
}
