mod common;

use chairside::advice::{AdviceRequest, StyleAdvisor};
use chairside::api::ContentPart;
use chairside::{GatewayError, ImagePayload, Language, ModelCatalog};

use common::{model_text_response, Scripted, StubProvider};

fn advisor(stub: &StubProvider) -> StyleAdvisor<StubProvider> {
    StyleAdvisor::new(stub.clone(), &ModelCatalog::default())
}

#[tokio::test]
async fn structured_verdict_round_trip() {
    let stub = StubProvider::new();
    stub.script_generate(Scripted::Ok(model_text_response(
        r#"{"recommendation":"Try a tapered crop","tips":["Trim every 3 weeks","Use light pomade"],"maintenance":"Wash and style every 2 days"}"#,
    )));

    let advice = advisor(&stub)
        .advise(
            AdviceRequest::new(Language::En)
                .with_prompt("I want a low-maintenance professional cut"),
        )
        .await
        .unwrap();

    assert_eq!(advice.recommendation, "Try a tapered crop");
    assert_eq!(advice.maintenance, "Wash and style every 2 days");
    let tips: Vec<&str> = advice.tips.iter().map(String::as_str).collect();
    assert_eq!(tips, ["Trim every 3 weeks", "Use light pomade"]);
}

#[tokio::test]
async fn missing_required_field_is_malformed() {
    let stub = StubProvider::new();
    stub.script_generate(Scripted::Ok(model_text_response(
        r#"{"recommendation":"Try a tapered crop","tips":["Trim every 3 weeks"]}"#,
    )));

    let err = advisor(&stub)
        .advise(AdviceRequest::new(Language::En).with_prompt("anything"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse(_)));
}

#[tokio::test]
async fn no_prompt_and_no_image_is_rejected_before_dispatch() {
    let stub = StubProvider::new();

    let err = advisor(&stub)
        .advise(AdviceRequest::new(Language::En).with_prompt("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::InvalidInput(_)));
    assert!(stub.generate_requests().is_empty());
}

#[tokio::test]
async fn image_only_request_gets_the_default_prompt() {
    let stub = StubProvider::new();
    stub.script_generate(Scripted::Ok(model_text_response(
        r#"{"recommendation":"r","tips":["t"],"maintenance":"m"}"#,
    )));

    let image = ImagePayload::new("image/jpeg", &b"fake-jpeg"[..]);
    advisor(&stub)
        .advise(AdviceRequest::new(Language::Es).with_image(image))
        .await
        .unwrap();

    let requests = stub.generate_requests();
    assert_eq!(requests.len(), 1);

    let parts = &requests[0].contents[0].parts;
    assert_eq!(parts.len(), 2);
    match &parts[0] {
        ContentPart::Text { text } => {
            assert_eq!(text, Language::Es.default_advice_prompt());
        }
        other => panic!("expected a text part, got {other:?}"),
    }
    match &parts[1] {
        ContentPart::InlineData { inline_data } => {
            assert_eq!(inline_data.mime_type, "image/jpeg");
        }
        other => panic!("expected an inline image part, got {other:?}"),
    }
}

#[tokio::test]
async fn request_demands_the_advice_schema() {
    let stub = StubProvider::new();
    stub.script_generate(Scripted::Ok(model_text_response(
        r#"{"recommendation":"r","tips":["t"],"maintenance":"m"}"#,
    )));

    advisor(&stub)
        .advise(AdviceRequest::new(Language::Ru).with_prompt("Какую стрижку выбрать?"))
        .await
        .unwrap();

    let request = &stub.generate_requests()[0];
    let config = request.generation_config.as_ref().unwrap();
    assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));

    let schema = config.response_schema.as_ref().unwrap();
    assert_eq!(
        schema["required"],
        serde_json::json!(["recommendation", "tips", "maintenance"])
    );

    let system = request.system_instruction.as_ref().unwrap();
    match &system.parts[0] {
        ContentPart::Text { text } => {
            assert!(text.contains("master barber"));
            assert!(text.contains("Russian"));
        }
        other => panic!("expected a text system instruction, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_propagates_unchanged() {
    let stub = StubProvider::new();
    stub.script_generate(Scripted::Err(common::transport_failure()));

    let err = advisor(&stub)
        .advise(AdviceRequest::new(Language::En).with_prompt("anything"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Provider { code: 503, .. }));
}
