use clap::Parser;
use dollar_price_skill::utils::{logger, validation::Validate};
use dollar_price_skill::{CliArgs, CurrencyLayerClient, RequestEnvelope, Skill, SkillConfig, SkillError};
use std::io::Read;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting dollar-price-skill CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    match run(&args).await {
        Ok(Some(output)) => {
            println!("{}", output);
        }
        Ok(None) => {
            tracing::info!("Session ended, no response body");
        }
        Err(e) => {
            tracing::error!(
                "❌ Skill invocation failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

async fn run(args: &CliArgs) -> Result<Option<String>, SkillError> {
    let config = match &args.config {
        Some(path) => SkillConfig::from_file(path)?,
        None => SkillConfig::from_env()?,
    };
    config.validate()?;

    let raw = if args.event == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.event)?
    };
    let event: RequestEnvelope = serde_json::from_str(&raw)?;

    let skill = Skill::new(CurrencyLayerClient::new(&config.rate_api)?)
        .with_application_id(config.application_id.clone());

    let Some(response) = skill.handle(&event).await? else {
        return Ok(None);
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(Some(output))
}
