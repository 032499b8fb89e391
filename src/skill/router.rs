use crate::domain::RateProvider;
use crate::skill::handlers;
use crate::skill::request::{IntentRequest, RequestEnvelope, Session, SessionEndedRequest, SkillRequest};
use crate::skill::response::ResponseEnvelope;
use crate::utils::error::{Result, SkillError};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    DollarPrice,
    ListCountries,
    Help,
    Stop,
}

impl IntentKind {
    pub const DOLLAR_PRICE: &'static str = "DllPriceMxIntent";
    pub const LIST_COUNTRIES: &'static str = "DllPriceMxListIntent";
    pub const HELP: &'static str = "AMAZON.HelpIntent";
    pub const CANCEL: &'static str = "AMAZON.CancelIntent";
    pub const STOP: &'static str = "AMAZON.StopIntent";
}

impl FromStr for IntentKind {
    type Err = SkillError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            Self::DOLLAR_PRICE => Ok(IntentKind::DollarPrice),
            Self::LIST_COUNTRIES => Ok(IntentKind::ListCountries),
            Self::HELP => Ok(IntentKind::Help),
            Self::CANCEL | Self::STOP => Ok(IntentKind::Stop),
            other => Err(SkillError::UnsupportedIntentError {
                name: other.to_string(),
            }),
        }
    }
}

/// Entry point for one platform event. Holds no per-session state.
pub struct Skill<P: RateProvider> {
    provider: P,
    application_id: Option<String>,
}

impl<P: RateProvider> Skill<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            application_id: None,
        }
    }

    /// Rejects events addressed to any other application id.
    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    /// Routes the event to its handler. `Ok(None)` means the platform
    /// expects no response body (session ended).
    pub async fn handle(&self, event: &RequestEnvelope) -> Result<Option<ResponseEnvelope>> {
        let session = &event.session;
        tracing::info!(
            application_id = %session.application.application_id,
            "Received event"
        );

        if let Some(expected) = &self.application_id {
            if expected != &session.application.application_id {
                return Err(SkillError::InvalidApplicationIdError {
                    application_id: session.application.application_id.clone(),
                });
            }
        }

        if session.new {
            self.on_session_started(event.request.request_id().unwrap_or_default(), session);
        }

        match &event.request {
            SkillRequest::LaunchRequest(request) => {
                tracing::info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    "on_launch"
                );
                Ok(Some(handlers::welcome_response()))
            }
            SkillRequest::IntentRequest(request) => self.on_intent(request, session).await.map(Some),
            SkillRequest::SessionEndedRequest(request) => {
                self.on_session_ended(request, session);
                Ok(None)
            }
            SkillRequest::Unsupported => Err(SkillError::UnsupportedRequestError),
        }
    }

    async fn on_intent(&self, request: &IntentRequest, session: &Session) -> Result<ResponseEnvelope> {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            intent = %request.intent.name,
            "on_intent"
        );

        let response = match request.intent.name.parse::<IntentKind>()? {
            IntentKind::DollarPrice => {
                handlers::dollar_price_response(&request.intent, &self.provider).await
            }
            IntentKind::ListCountries => handlers::available_countries_response(),
            IntentKind::Help => handlers::welcome_response(),
            IntentKind::Stop => handlers::session_end_response(),
        };
        Ok(response)
    }

    fn on_session_started(&self, request_id: &str, session: &Session) {
        tracing::info!(request_id, session_id = %session.session_id, "on_session_started");
    }

    // Not called when a handler ended the session itself.
    fn on_session_ended(&self, request: &SessionEndedRequest, session: &Session) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            reason = request.reason.as_deref().unwrap_or("unknown"),
            "on_session_ended"
        );
    }
}
