use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, ui::SubmitEvent, FormSubmissionController, PredictionClient,
    SubmissionOutcome, UiBindings,
};
use shared::domain::FormInputSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{TerminalAlerts, TerminalButton, TerminalForm, TerminalResult};

/// Submit form fields to a prediction service and print the result.
#[derive(Parser, Debug)]
struct Args {
    /// Form field as `name=value`; repeat for each field.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "client.toml")]
    config: PathBuf,
    #[arg(long, default_value = "Predict")]
    button_label: String,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let client = PredictionClient::from_settings(&settings)
        .context("failed to build prediction client")?;
    info!(endpoint = %client.endpoint(), "prediction client ready");

    let fields: FormInputSet = args.fields.into_iter().collect();
    let result = Arc::new(TerminalResult::new());
    let ui = UiBindings {
        form: Arc::new(TerminalForm::new(fields)),
        submit: Arc::new(TerminalButton::new(args.button_label)),
        result: result.clone(),
        value: result.clone(),
        alerts: Arc::new(TerminalAlerts),
    };
    let controller = FormSubmissionController::new(Arc::new(client), ui)
        .with_reveal_delay(settings.reveal_delay());

    let outcome = controller.handle_submit(&mut SubmitEvent::new()).await;
    controller.settle().await;

    Ok(match outcome {
        SubmissionOutcome::Displayed(_) if result.is_revealed() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
