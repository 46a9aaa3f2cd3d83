/*!
 * Integration tests for the Anthropic client against a local HTTP stub
 */

use anyhow::Result;
use std::time::Duration;

use muilate::errors::{PipelineError, ProviderError};
use muilate::providers::Provider;
use muilate::providers::anthropic::Anthropic;
use muilate::translation::{gateway_from_config, ProviderGateway, TranslationGateway};
use crate::common::{self, strings};
use crate::common::http_stub::{anthropic_text_response, HttpStub};

#[tokio::test]
async fn test_anthropicGateway_withTextResponse_shouldSplitLines() -> Result<()> {
    let stub = HttpStub::start(200, &anthropic_text_response("Metoda przebicia\n\n  Typ lasera  \n")).await?;
    let client = Anthropic::new("test-key", stub.endpoint.clone())?.model("claude-test");
    let gateway = ProviderGateway::new(client, "English", "Polish");

    let lines = gateway.translate(&strings(&["Pierce Method", "Laser Type"])).await?;
    assert_eq!(lines, strings(&["Metoda przebicia", "Typ lasera"]));

    let request = stub.received_request().await;
    assert!(request.starts_with("POST /v1/messages"));
    assert!(request.contains("x-api-key: test-key"));
    assert!(request.contains("anthropic-version: 2023-06-01"));
    assert!(request.contains(r#""model":"claude-test""#));
    assert!(request.contains(r#"Pierce Method\nLaser Type"#));
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withUnauthorized_shouldReturnAuthenticationError() -> Result<()> {
    let stub = HttpStub::start(401, r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#).await?;
    let client = Anthropic::new("wrong-key", stub.endpoint.clone())?;

    let result = client.complete(client.build_request("Hello", &[])).await;
    match result {
        Err(ProviderError::AuthenticationError(message)) => assert!(message.contains("invalid x-api-key")),
        other => panic!("expected authentication error, got {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withRateLimit_shouldReturnRateLimitExceeded() -> Result<()> {
    let stub = HttpStub::start(429, r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#).await?;
    let client = Anthropic::new("test-key", stub.endpoint.clone())?;

    let result = client.complete(client.build_request("Hello", &[])).await;
    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withServerError_shouldReturnApiError() -> Result<()> {
    let stub = HttpStub::start(500, r#"{"type":"error","error":{"type":"api_error","message":"overloaded"}}"#).await?;
    let client = Anthropic::new("test-key", stub.endpoint.clone())?;

    let result = client.complete(client.build_request("Hello", &[])).await;
    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 500, .. })));
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withMalformedBody_shouldReturnParseError() -> Result<()> {
    let stub = HttpStub::start(200, r#"{"unexpected":true}"#).await?;
    let client = Anthropic::new("test-key", stub.endpoint.clone())?;

    let result = client.complete(client.build_request("Hello", &[])).await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    Ok(())
}

#[tokio::test]
async fn test_anthropicGateway_withoutTextBlocks_shouldReturnParseError() -> Result<()> {
    let stub = HttpStub::start(200, r#"{"content":[],"usage":{"input_tokens":1,"output_tokens":0}}"#).await?;
    let gateway = ProviderGateway::new(Anthropic::new("test-key", stub.endpoint.clone())?, "English", "Polish");

    let result = gateway.translate(&strings(&["Pierce Method"])).await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withUnreachableHost_shouldReturnConnectionError() -> Result<()> {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let endpoint = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let client = Anthropic::new("test-key", endpoint)?;
    let result = client.complete(client.build_request("Hello", &[])).await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    Ok(())
}

#[tokio::test]
async fn test_anthropic_withSilentHost_shouldTimeOutAsConnectionError() -> Result<()> {
    // the listener stays bound but never answers
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let endpoint = format!("http://{}", listener.local_addr()?);

    let client = Anthropic::with_timeout("test-key", endpoint, Duration::from_millis(300))?;
    let result = client.complete(client.build_request("Hello", &[])).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    drop(listener);
    Ok(())
}

#[tokio::test]
async fn test_gatewayFromConfig_withConfiguredKey_shouldReachEndpoint() -> Result<()> {
    let stub = HttpStub::start(200, &anthropic_text_response("Metoda przebicia")).await?;
    let config = common::anthropic_config(&stub.endpoint);

    let gateway = gateway_from_config(&config)?;
    assert!(gateway.describe().contains("claude-3-sonnet-20240229"));

    let lines = gateway.translate(&strings(&["Pierce Method"])).await?;
    assert_eq!(lines, strings(&["Metoda przebicia"]));
    Ok(())
}

#[test]
fn test_gatewayFromConfig_withMockProvider_shouldNotNeedKey() {
    let gateway = gateway_from_config(&common::mock_config());
    assert!(gateway.is_ok());
}

#[test]
fn test_gatewayFromConfig_withInvalidLanguage_shouldFail() {
    let mut config = common::mock_config();
    config.target_language = "zz".to_string();
    assert!(matches!(gateway_from_config(&config), Err(PipelineError::ServiceNotConfigured(_))));
}
