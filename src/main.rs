use clap::Parser;
use dotenv::dotenv;
use is_terminal::IsTerminal;
use std::time::Duration;

mod app;
mod cli;
mod commands;
mod config;
mod core;
mod credentials;
mod display;
mod input;
mod providers;
mod session;
mod system;
mod utils;
mod voice;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::commands::router::CommandRouter;
use crate::config::{Config, Provider};
use crate::core::error::JarvisError;
use crate::credentials::{KeyPrompt, NoPrompt, RememberingPrompt, TerminalPrompt, resolve_api_key};
use crate::providers::{FallbackDispatcher, ProviderFactory};
use crate::session::Session;
use crate::voice::{Transcriber, WhisperTranscriber};

/// Initialize tracing/logging. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("jarvis=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if !args.order.is_empty() {
        config.set_order(&args.order);
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
}

fn build_transcriber(
    config: &Config,
    prompt: &mut dyn KeyPrompt,
) -> Result<Option<Box<dyn Transcriber>>, JarvisError> {
    let openai = config.provider(Provider::OpenAI);
    let env = |name: &str| std::env::var(name).ok();
    let Some(api_key) = resolve_api_key(Provider::OpenAI, openai.api_key.as_deref(), env, prompt)
    else {
        return Ok(None);
    };

    let transcriber = WhisperTranscriber::new(
        api_key,
        openai.base_url,
        Duration::from_secs(config.timeout_secs.max(1)),
    )?;
    Ok(Some(Box::new(transcriber)))
}

#[tokio::main]
async fn main() -> Result<(), JarvisError> {
    dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = Config::load()?;
    apply_overrides(&mut config, &args);

    let terminal: Box<dyn KeyPrompt> = if std::io::stdin().is_terminal() && !args.no_prompt {
        Box::new(TerminalPrompt)
    } else {
        Box::new(NoPrompt)
    };
    // Adapters and the transcriber share one OpenAI key; ask for it once
    let mut prompt = RememberingPrompt::new(terminal);

    let adapters = ProviderFactory::new().build_adapters(
        &config,
        |name: &str| std::env::var(name).ok(),
        &mut prompt,
    );

    let transcriber = if args.audio.is_some() {
        build_transcriber(&config, &mut prompt)?
    } else {
        None
    };

    let dispatcher = FallbackDispatcher::new(adapters, config.system_prompt.clone());
    let session = Session::new(CommandRouter::new(), dispatcher);

    let mut app = Application::new(args, session, create_command_registry(), transcriber);
    app.run().await
}
