/*!
 * Integration tests for the label translation pipeline
 */

use async_trait::async_trait;

use muilate::errors::{PipelineError, ProviderError};
use muilate::providers::Provider;
use muilate::providers::mock::MockProvider;
use muilate::translation::{HeuristicClassifier, LabelPipeline, PipelineConfig, PromptTemplate, ProviderGateway};
use crate::common;

/// Answers with the rendered prompt upper-cased, ignoring the text list
#[derive(Debug)]
struct ShoutingProvider;

#[async_trait]
impl Provider for ShoutingProvider {
    type Request = String;
    type Response = String;

    fn build_request(&self, prompt: &str, _texts: &[String]) -> Self::Request {
        prompt.to_string()
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        Ok(request.to_uppercase())
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        Some(response.clone())
    }
}

fn pipeline_with(provider: MockProvider) -> LabelPipeline {
    let gateway = ProviderGateway::new(provider, "English", "Polish");
    LabelPipeline::new(PipelineConfig::new(Box::new(gateway)).with_source_name("labels.mui"))
}

fn uppercase(line: &str) -> String {
    line.to_uppercase()
}

#[tokio::test]
async fn test_run_withSampleFile_shouldTranslateOnlyLabels() {
    let output = pipeline_with(MockProvider::working()).run(common::SAMPLE_MUI).await.unwrap();

    assert!(output.document.contains("<PierceMethod>[TRANSLATED] Pierce Method</PierceMethod>"));
    assert!(output.document.contains("<Units>[TRANSLATED] mm/s</Units>"));
    assert!(output.document.contains("<ParamId>ID_1024</ParamId>"));
    assert!(output.document.contains("<Power>100</Power>"));
    assert!(output.document.contains("<Gas>O2</Gas>"));
    assert!(output.document.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(output.document.contains("<!-- Machine UI labels -->"));

    assert_eq!(output.stats.extracted, 4);
    assert_eq!(output.stats.substituted, 4);
    assert!(output.stats.skipped.is_empty());
    assert!(output.report.contains("File: labels.mui"));
}

#[tokio::test]
async fn test_run_withEchoProvider_shouldReturnInputUnchanged() {
    let output = pipeline_with(MockProvider::echo()).run(common::SAMPLE_MUI).await.unwrap();

    assert_eq!(output.document, common::SAMPLE_MUI);
    assert!(output.stats.skipped.is_empty());
}

#[tokio::test]
async fn test_run_withDuplicateLabels_shouldTranslateEachOccurrence() {
    let provider = MockProvider::working().with_custom_line(uppercase);
    let output = pipeline_with(provider).run(common::DUPLICATE_MUI).await.unwrap();

    assert_eq!(output.document, "<MUI><A>POWER</A><B>POWER</B><C>SPEED</C></MUI>");
    assert_eq!(output.stats.substituted, 3);
}

#[tokio::test]
async fn test_run_withOverlongResponse_shouldTruncate() {
    let output = pipeline_with(MockProvider::overlong()).run(common::SAMPLE_MUI).await.unwrap();

    assert_eq!(output.stats.received, 5);
    assert_eq!(output.translations.len(), 4);
    assert!(!output.document.contains("Note: all labels translated."));
}

#[tokio::test]
async fn test_run_withEmptyResponse_shouldKeepOriginals() {
    let output = pipeline_with(MockProvider::empty()).run(common::SAMPLE_MUI).await.unwrap();

    assert_eq!(output.stats.received, 0);
    assert_eq!(output.document, common::SAMPLE_MUI);
}

#[tokio::test]
async fn test_run_withNoContentResponse_shouldFailWithGatewayError() {
    let result = pipeline_with(MockProvider::no_content()).run(common::SAMPLE_MUI).await;
    assert!(matches!(result, Err(PipelineError::Gateway(_))));
}

#[tokio::test]
async fn test_run_withCodeOnlyFile_shouldFailBeforeGateway() {
    let provider = MockProvider::working();
    let observer = provider.clone();

    let result = pipeline_with(provider).run(common::CODE_ONLY_MUI).await;

    assert!(matches!(result, Err(PipelineError::NoTranslatableContent)));
    assert_eq!(observer.request_count(), 0);
}

#[tokio::test]
async fn test_run_withMalformedFile_shouldFailBeforeGateway() {
    let provider = MockProvider::working();
    let observer = provider.clone();

    let result = pipeline_with(provider).run("<MUI><A>Power</MUI>").await;

    assert!(matches!(result, Err(PipelineError::Parse(_))));
    assert_eq!(observer.request_count(), 0);
}

#[tokio::test]
async fn test_run_withBreakingTranslation_shouldNotReturnDocument() {
    let provider = MockProvider::working().with_custom_line(|line| format!("{} & more", line));
    let result = pipeline_with(provider).run(common::DUPLICATE_MUI).await;

    assert!(matches!(result, Err(PipelineError::Reconstruction(_))));
}

#[tokio::test]
async fn test_run_withStricterClassifier_shouldSendFewerTexts() {
    let gateway = ProviderGateway::new(MockProvider::working(), "English", "Polish");
    let classifier = HeuristicClassifier::new()
        .with_patterns(&[r"^[a-z]+/[a-z]+$"])
        .unwrap();
    let pipeline = LabelPipeline::new(PipelineConfig::new(Box::new(gateway)).with_classifier(Box::new(classifier)));

    let output = pipeline.run(common::SAMPLE_MUI).await.unwrap();

    assert_eq!(output.stats.extracted, 3);
    assert!(output.document.contains("<Units>mm/s</Units>"));
}

#[tokio::test]
async fn test_run_withMultiLineLabel_shouldKeepTranslationsAligned() {
    let gateway = ProviderGateway::new(ShoutingProvider, "English", "Polish")
        .with_template(PromptTemplate::new("{texts}"));
    let pipeline = LabelPipeline::new(PipelineConfig::new(Box::new(gateway)));

    let output = pipeline.run("<MUI><A>Open the\nfront door</A><B>Laser Power</B></MUI>").await.unwrap();

    assert_eq!(output.translations, vec!["OPEN THE FRONT DOOR".to_string(), "LASER POWER".to_string()]);
    assert_eq!(output.document, "<MUI><A>OPEN THE FRONT DOOR</A><B>LASER POWER</B></MUI>");
    assert_eq!(output.stats.received, 2);
    assert!(output.stats.skipped.is_empty());
}

#[test]
fn test_run_withShortResponse_shouldBackfillTail() {
    common::init_test_logging();
    let pipeline = pipeline_with(MockProvider::short(2));

    let output = tokio_test::block_on(async { pipeline.run(common::SAMPLE_MUI).await }).unwrap();

    assert_eq!(output.stats.received, 2);
    assert_eq!(output.translations[2], "Cutting Speed");
    assert!(output.document.contains("<LaserType>[TRANSLATED] Laser Type</LaserType>"));
    assert!(output.document.contains("<Speed>Cutting Speed</Speed>"));
    assert!(output.stats.skipped.is_empty());
}

#[test]
fn test_extractOnly_shouldNotNeedGateway() {
    let pipeline = pipeline_with(MockProvider::failing());
    let extraction = pipeline.extract_only(common::SAMPLE_MUI).unwrap();
    assert_eq!(extraction.nodes.len(), 4);
}
