use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use playdeck::config::Config;
use playdeck::player::{MpvMediaElement, spawn_event_pump};
use playdeck::ui::PlayerController;
use playdeck::ui::terminal::{HELP, TerminalCommand, TerminalWidgets, parse_command};

fn main() -> Result<()> {
    // Logs go to stderr so the status line owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("playdeck=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting playdeck");

    let config = Config::load().context("Failed to load configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    let media = Arc::new(MpvMediaElement::new().context("Failed to create media element")?);
    let preview =
        Arc::new(MpvMediaElement::headless().context("Failed to create preview element")?);
    let widgets = TerminalWidgets::new();

    let (handle, controller) = PlayerController::new(media.clone(), preview, &widgets, config)
        .context("Failed to set up player controls")?;
    widgets.frame_host().attach(handle.clone());

    let controller_task = tokio::spawn(controller.run());
    let pump_task = spawn_event_pump(media, handle.clone());

    if let Some(mut errors) = handle.take_error_receiver() {
        tokio::spawn(async move {
            while let Some(error) = errors.recv().await {
                warn!("Player error: {}", error);
            }
        });
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_command(&line) {
            Some(TerminalCommand::Input(input)) => {
                handle.send(input)?;
            }
            Some(TerminalCommand::Status) => {}
            Some(TerminalCommand::Help) => {
                println!("{}", HELP);
                continue;
            }
            Some(TerminalCommand::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    println!("unknown command: {}", line.trim());
                }
                continue;
            }
        }

        let snapshot = handle.snapshot().await?;
        println!("{}", widgets.status_line(&snapshot));
    }

    debug!("Input closed, shutting down");
    widgets.frame_host().detach();
    // The loop may already be gone if stdin closed after a failure
    let _ = handle.shutdown();
    controller_task.await.context("Controller task panicked")?;
    pump_task.abort();

    info!("playdeck exited");
    Ok(())
}
