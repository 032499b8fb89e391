use crate::domain::countries::{self, find_country};
use crate::domain::{CountryEntry, RateProvider, RateQuote};
use crate::skill::request::Intent;
use crate::skill::response::ResponseEnvelope;

pub const COUNTRY_SLOT: &str = "country";

const WELCOME_TITLE: &str = "Bienvenido";
const WELCOME_TEXT: &str = "Bienvenidos a el Precio del Dólar. \
    Por Favor indícame de que país quieres hacer la conversión diciendo, por ejemplo: \
    ¿Cuál es el precio del dólar en México?";
const WELCOME_REPROMPT: &str = "Por favor indícame de que país quieres conocer el \
    precio del dólar actual diciendo, por ejemplo: ¿Cuál es el precio del dólar en México?";

const SESSION_END_TITLE: &str = "Sesion Terminada";
const SESSION_END_TEXT: &str = "Gracias por usar El Precio del Dólar. Hasta luego";

const PRICE_TITLE: &str = "Get Dollar Price";
pub const UNKNOWN_COUNTRY_TEXT: &str =
    "No estoy seguro de que país estas hablando. Por favor inténtalo nuevamente.";
pub const UNKNOWN_COUNTRY_REPROMPT: &str = "No estoy seguro de que país estas hablando. \
    Por favor indícame de que país quieres conocer el precio del dólar actual diciendo, \
    por ejemplo, ¿Cuál es el precio del dólar en México?";

const COUNTRIES_TITLE: &str = "Get Available Countries";

pub fn welcome_response() -> ResponseEnvelope {
    ResponseEnvelope::ssml(WELCOME_TITLE, WELCOME_TEXT, Some(WELCOME_REPROMPT), false)
}

pub fn session_end_response() -> ResponseEnvelope {
    ResponseEnvelope::plain_text(SESSION_END_TITLE, SESSION_END_TEXT, None, true)
}

pub fn available_countries_response() -> ResponseEnvelope {
    let speech = format!(
        "Los países disponibles para esta aplicación son: {}",
        countries::list_display_names()
    );
    ResponseEnvelope::plain_text(COUNTRIES_TITLE, &speech, None, false)
}

pub async fn dollar_price_response<P>(intent: &Intent, provider: &P) -> ResponseEnvelope
where
    P: RateProvider + ?Sized,
{
    let country = match resolve_country(intent) {
        Ok(country) => country,
        Err(SlotOutcome::Missing) => return unknown_country(true),
        Err(SlotOutcome::Unmatched) => return unknown_country(false),
    };

    match provider.fetch_rate(country.currency_code).await {
        Ok(RateQuote::Available(rate)) => {
            let speech = format!(
                "El valor del dólar en {} es de {} {}. Hasta luego.",
                country.display_name, rate, country.currency_code
            );
            ResponseEnvelope::plain_text(PRICE_TITLE, &speech, None, true)
        }
        Ok(RateQuote::Unavailable) => {
            tracing::warn!(currency = country.currency_code, "No quote available");
            rate_unavailable(country)
        }
        Err(e) => {
            tracing::error!(
                currency = country.currency_code,
                severity = ?e.severity(),
                "Rate lookup failed: {}",
                e
            );
            rate_unavailable(country)
        }
    }
}

enum SlotOutcome {
    /// Slot absent or carrying no value; nothing to retry with.
    Missing,
    /// Spoken value did not resolve to a supported country.
    Unmatched,
}

fn resolve_country(intent: &Intent) -> Result<&'static CountryEntry, SlotOutcome> {
    let slot = intent.slot(COUNTRY_SLOT).ok_or(SlotOutcome::Missing)?;
    let value = slot.value.as_deref().ok_or(SlotOutcome::Missing)?;

    if !slot.is_resolved_match() {
        tracing::debug!(value, status = ?slot.resolution_status(), "Country slot not matched");
        return Err(SlotOutcome::Unmatched);
    }

    slot.resolved_name()
        .and_then(find_country)
        .or_else(|| find_country(value))
        .ok_or_else(|| {
            tracing::warn!(value, "Resolved country is not in the registry");
            SlotOutcome::Unmatched
        })
}

fn unknown_country(end_session: bool) -> ResponseEnvelope {
    let reprompt = (!end_session).then_some(UNKNOWN_COUNTRY_REPROMPT);
    ResponseEnvelope::plain_text(PRICE_TITLE, UNKNOWN_COUNTRY_TEXT, reprompt, end_session)
}

fn rate_unavailable(country: &CountryEntry) -> ResponseEnvelope {
    let speech = format!(
        "Lo siento, no pude obtener el precio del dólar en {} en este momento. \
         Por favor inténtalo más tarde.",
        country.display_name
    );
    ResponseEnvelope::plain_text(PRICE_TITLE, &speech, None, true)
}
