use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    pub session: Session,
    pub request: SkillRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    pub application: Application,
    #[serde(default)]
    pub attributes: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkillRequest {
    LaunchRequest(LaunchRequest),
    IntentRequest(IntentRequest),
    SessionEndedRequest(SessionEndedRequest),
    #[serde(other)]
    Unsupported,
}

impl SkillRequest {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SkillRequest::LaunchRequest(r) => Some(&r.request_id),
            SkillRequest::IntentRequest(r) => Some(&r.request_id),
            SkillRequest::SessionEndedRequest(r) => Some(&r.request_id),
            SkillRequest::Unsupported => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub resolutions: Option<Resolutions>,
}

impl Slot {
    /// The top-ranked authority decides; anything but an exact match is a miss.
    pub fn resolution_status(&self) -> Option<StatusCode> {
        self.resolutions
            .as_ref()
            .and_then(|r| r.resolutions_per_authority.first())
            .map(|authority| authority.status.code)
    }

    pub fn is_resolved_match(&self) -> bool {
        self.resolution_status() == Some(StatusCode::SuccessMatch)
    }

    /// Canonical name the platform resolved the spoken value to, if any.
    pub fn resolved_name(&self) -> Option<&str> {
        self.resolutions
            .as_ref()
            .and_then(|r| r.resolutions_per_authority.first())
            .and_then(|authority| authority.values.first())
            .map(|wrapper| wrapper.value.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<ResolutionAuthority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionAuthority {
    #[serde(default)]
    pub authority: Option<String>,
    pub status: ResolutionStatus,
    #[serde(default)]
    pub values: Vec<ResolvedValueWrapper>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    pub code: StatusCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    #[serde(rename = "ER_SUCCESS_MATCH")]
    SuccessMatch,
    #[serde(rename = "ER_SUCCESS_NO_MATCH")]
    SuccessNoMatch,
    #[serde(rename = "ER_ERROR_TIMEOUT")]
    ErrorTimeout,
    #[serde(rename = "ER_ERROR_EXCEPTION")]
    ErrorException,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValueWrapper {
    pub value: ResolvedValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}
