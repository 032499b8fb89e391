use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: HashMap<String, serde_json::Value>,
    pub response: SpeechletResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Exactly one of plain text or SSML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    pub fn new(response: SpeechletResponse) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: HashMap::new(),
            response,
        }
    }

    /// Plain-text speech; the card shows the same text.
    pub fn plain_text(
        title: &str,
        output: &str,
        reprompt: Option<&str>,
        should_end_session: bool,
    ) -> Self {
        Self::new(SpeechletResponse {
            output_speech: OutputSpeech::PlainText {
                text: output.to_string(),
            },
            card: Card::Simple {
                title: title.to_string(),
                content: output.to_string(),
            },
            reprompt: reprompt.map(|text| Reprompt {
                output_speech: OutputSpeech::PlainText {
                    text: text.to_string(),
                },
            }),
            should_end_session,
        })
    }

    /// SSML speech built from plain `content`, which is wrapped in
    /// `<speak>`; the card keeps the unwrapped text.
    pub fn ssml(
        title: &str,
        content: &str,
        reprompt: Option<&str>,
        should_end_session: bool,
    ) -> Self {
        Self::new(SpeechletResponse {
            output_speech: OutputSpeech::Ssml {
                ssml: speak(content),
            },
            card: Card::Simple {
                title: title.to_string(),
                content: content.to_string(),
            },
            reprompt: reprompt.map(|text| Reprompt {
                output_speech: OutputSpeech::Ssml { ssml: speak(text) },
            }),
            should_end_session,
        })
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }

    /// Spoken text with any SSML root stripped.
    pub fn speech_text(&self) -> &str {
        match &self.response.output_speech {
            OutputSpeech::PlainText { text } => text.as_str(),
            OutputSpeech::Ssml { ssml } => ssml
                .strip_prefix("<speak>")
                .and_then(|s| s.strip_suffix("</speak>"))
                .unwrap_or(ssml.as_str()),
        }
    }
}

fn speak(text: &str) -> String {
    format!("<speak>{}</speak>", escape_xml(text))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
