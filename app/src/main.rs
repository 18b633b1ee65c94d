// storefront-console/src/main.rs

mod commands;
mod config;
mod errors;
mod render;

use crate::commands::{Command, USAGE};
use crate::config::{ConsoleConfig, LogFormat};
use crate::errors::Result as ConsoleResult;

use std::process::ExitCode;
use std::sync::Arc;
use storefront::{ClientConfig, FileStorage, Storefront};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
  // Warnings only unless RUST_LOG says otherwise.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr);

  match format {
    LogFormat::Text => builder.try_init(),
    LogFormat::Json => builder.json().try_init(),
  }
  .map_err(|e| anyhow::anyhow!(e))
}

fn connect(config: &ConsoleConfig) -> ConsoleResult<Storefront> {
  let client_config = ClientConfig::from_env()?;
  let storage = FileStorage::open(&config.session_file)?;
  let storefront = Storefront::connect(client_config, Arc::new(storage))?;
  Ok(storefront)
}

async fn run(config: &ConsoleConfig, args: &[String]) -> ConsoleResult<String> {
  let command = Command::parse(args)?;
  if command == Command::Help {
    return Ok(USAGE.to_string());
  }

  let storefront = connect(config)?;
  let result = commands::execute(command, &storefront).await;
  if let Some(route) = storefront.session().take_redirect() {
    eprintln!("Your session has ended. Continue from {}", route);
  }
  result
}

#[tokio::main]
async fn main() -> ExitCode {
  let console_config = match ConsoleConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  if let Err(e) = init_tracing(console_config.log_format) {
    eprintln!("Logging is unavailable: {}", e);
  }

  let args: Vec<String> = std::env::args().skip(1).collect();
  match run(&console_config, &args).await {
    Ok(output) => {
      println!("{}", output);
      ExitCode::SUCCESS
    }
    Err(e) => {
      tracing::debug!(error = ?e, "Command failed.");
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
  }
}
