use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use tickguess_core::{
    GameController, Intent, PresentationSink, SeriesSource, SessionState, StartWindow,
    StatusMessage,
};

use crate::cli::PlayArgs;
use crate::error::CliError;
use crate::terminal::TerminalSink;

enum LineAction {
    Skip,
    Quit,
    Help,
    Intent(Intent),
    Unknown(String),
}

fn classify(line: &str) -> LineAction {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => LineAction::Skip,
        "quit" | "q" | "exit" => LineAction::Quit,
        "help" | "h" | "?" => LineAction::Help,
        _ => match trimmed.parse::<Intent>() {
            Ok(intent) => LineAction::Intent(intent),
            Err(error) => LineAction::Unknown(format!("{error}. Type 'help' for commands.")),
        },
    }
}

pub async fn run(
    args: &PlayArgs,
    source: Arc<dyn SeriesSource>,
    window: StartWindow,
) -> Result<(), CliError> {
    let mut game =
        GameController::new(source, TerminalSink::new(std::io::stdout())).with_window(window);
    if let Some(seed) = args.seed {
        game = game.with_rng(fastrand::Rng::with_seed(seed));
    }

    game.sink_mut().write_help();
    game.refresh();

    if let Some(ticker) = &args.ticker {
        // Failures are already on screen; the prompt stays open.
        if let Err(error) = game.dispatch(Intent::Start(ticker.clone())).await {
            tracing::debug!(code = error.code(), "initial start rejected");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        game.sink_mut().write_prompt();
        game.sink_mut().take_error()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match classify(&line) {
            LineAction::Skip => {}
            LineAction::Quit => break,
            LineAction::Help => game.sink_mut().write_help(),
            LineAction::Intent(intent) => {
                if let Err(error) = game.dispatch(intent).await {
                    tracing::debug!(code = error.code(), "intent rejected");
                }
            }
            LineAction::Unknown(text) => {
                game.sink_mut().show_status(&StatusMessage::error(text));
            }
        }
        game.sink_mut().take_error()?;
    }

    if game.session().state() == SessionState::Playing {
        game.end()?;
    }
    game.sink_mut().take_error()?;
    Ok(())
}
