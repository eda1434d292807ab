//! # Quire
//!
//! Terminal front end: reads commands from stdin, re-renders the screen on
//! every change event.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

mod app;
mod command;
mod config;
mod notice;
mod render;
mod state;
mod telemetry;

use app::{DraftCompletion, Reply};
use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    let state = AppState::new(&config)?;

    let mut events = state.notifier.subscribe();
    let mut session = state.session();
    let (completion_tx, mut completions) = mpsc::channel::<DraftCompletion>(8);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::render_screen(&session.screen()));
    println!("{}", command::HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let reply = match command::parse(&line) {
                    Ok(Some(cmd)) => app::dispatch(&mut session, cmd, &completion_tx),
                    Ok(None) => Reply::Nothing,
                    Err(e) => {
                        println!("{e}");
                        Reply::Nothing
                    }
                };
                match reply {
                    Reply::Nothing => {}
                    Reply::Show(notice) => println!("{}", render::render_notice(&notice)),
                    Reply::Help => println!("{}", command::HELP),
                    Reply::Quit => break,
                }
            }
            Some(completion) = completions.recv() => {
                if let Reply::Show(notice) = app::finish_completion(&mut session, completion) {
                    println!("{}", render::render_notice(&notice));
                }
            }
            event = events.recv() => {
                match event {
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Coalesce a burst of events into one render.
                        while events.try_recv().is_ok() {}
                        println!("{}", render::render_screen(&session.screen()));
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::info!("Quire shutting down");
    Ok(())
}
