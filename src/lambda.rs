#[cfg(feature = "lambda")]
use dollar_price_skill::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use dollar_price_skill::{CurrencyLayerClient, RequestEnvelope, ResponseEnvelope, Skill, SkillConfig};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    skill: &Skill<CurrencyLayerClient>,
    event: LambdaEvent<RequestEnvelope>,
) -> Result<Option<ResponseEnvelope>, Error> {
    tracing::debug!(aws_request_id = %event.context.request_id, "Invocation");

    // errors surface as invocation failures instead of a spoken reply
    let response = skill.handle(&event.payload).await.map_err(|e| {
        tracing::error!("Skill invocation failed: {} (Severity: {:?})", e, e.severity());
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // configuration problems abort the cold start, never a live request
    let config = SkillConfig::from_env()?;
    config.validate()?;

    let skill = Skill::new(CurrencyLayerClient::new(&config.rate_api)?)
        .with_application_id(config.application_id.clone());
    let skill = &skill;

    tracing::info!("Dollar price skill ready");
    run(service_fn(move |event: LambdaEvent<RequestEnvelope>| async move {
        function_handler(skill, event).await
    }))
    .await
}

