use dollar_price_skill::config::RateApiConfig;
use dollar_price_skill::skill::response::OutputSpeech;
use dollar_price_skill::{CurrencyLayerClient, RequestEnvelope, Skill, SkillError};
use httpmock::prelude::*;
use serde_json::json;

fn skill_for(server: &MockServer) -> Skill<CurrencyLayerClient> {
    let mut config = RateApiConfig::new("integration-key");
    config.base_url = server.url("/api/live");
    Skill::new(CurrencyLayerClient::new(&config).unwrap())
}

fn price_event(country: &str, status: &str) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "amzn1.echo-api.session.e2e",
            "application": {"applicationId": "amzn1.ask.skill.e2e"}
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.e2e",
            "locale": "es-MX",
            "intent": {
                "name": "DllPriceMxIntent",
                "slots": {
                    "country": {
                        "name": "country",
                        "value": country,
                        "resolutions": {
                            "resolutionsPerAuthority": [{"status": {"code": status}}]
                        }
                    }
                }
            }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_price_lookup() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/live")
            .query_param("access_key", "integration-key")
            .query_param("currencies", "MXN")
            .query_param("source", "USD");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "source": "USD",
                "quotes": {"USDMXN": "17.1234"}
            }));
    });

    let skill = skill_for(&server);
    let response = skill
        .handle(&price_event("mexico", "ER_SUCCESS_MATCH"))
        .await
        .unwrap()
        .unwrap();

    api_mock.assert();

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["version"], "1.0");
    assert_eq!(wire["sessionAttributes"], json!({}));
    assert_eq!(wire["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(
        wire["response"]["outputSpeech"]["text"],
        "El valor del dólar en México es de 17.12 MXN. Hasta luego."
    );
    assert_eq!(wire["response"]["card"]["title"], "Get Dollar Price");
    assert_eq!(wire["response"]["reprompt"], serde_json::Value::Null);
    assert_eq!(wire["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn test_null_quotes_never_spoken() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/live");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"quotes": null}));
    });

    let response = skill_for(&server)
        .handle(&price_event("venezuela", "ER_SUCCESS_MATCH"))
        .await
        .unwrap()
        .unwrap();

    api_mock.assert();
    assert!(response.should_end_session());
    let text = response.speech_text();
    assert!(text.contains("Venezuela"));
    assert!(!text.contains("-1"));
}

#[tokio::test]
async fn test_api_error_body_apologizes() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/live");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": false,
                "error": {"code": 101, "type": "invalid_access_key", "info": "Invalid key"}
            }));
    });

    let response = skill_for(&server)
        .handle(&price_event("colombia", "ER_SUCCESS_MATCH"))
        .await
        .unwrap()
        .unwrap();

    api_mock.assert();
    assert!(response.should_end_session());
    assert!(response.speech_text().starts_with("Lo siento"));
}

#[tokio::test]
async fn test_no_match_makes_no_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/live");
        then.status(200).json_body(json!({"quotes": {"USDPEN": 3.7}}));
    });

    let response = skill_for(&server)
        .handle(&price_event("peru", "ER_SUCCESS_NO_MATCH"))
        .await
        .unwrap()
        .unwrap();

    api_mock.assert_hits(0);
    assert!(!response.should_end_session());
    assert!(matches!(
        response.response.reprompt.as_ref().map(|r| &r.output_speech),
        Some(OutputSpeech::PlainText { .. })
    ));
}

#[tokio::test]
async fn test_unsupported_intent_propagates() {
    let server = MockServer::start();
    let event: RequestEnvelope = serde_json::from_value(json!({
        "session": {
            "new": false,
            "sessionId": "s",
            "application": {"applicationId": "a"}
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "r",
            "intent": {"name": "AMAZON.NavigateHomeIntent"}
        }
    }))
    .unwrap();

    let err = skill_for(&server).handle(&event).await.unwrap_err();
    assert!(matches!(err, SkillError::UnsupportedIntentError { .. }));
}
