use crate::cli::HistoryCommand;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{ChatTurn, TranscriptStore, NO_HISTORY, TIMESTAMP_FORMAT};
use colored::Colorize;
use prettytable::{format, Table};

/// Longest user/bot text shown in a table cell
const MAX_CELL_CHARS: usize = 40;

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let store = TranscriptStore::new(&config.history.path);

    match command {
        HistoryCommand::Show => {
            println!("{}", store.read_all()?);
        }
        HistoryCommand::List => {
            let turns = store.turns()?;

            if turns.is_empty() {
                println!("{}", NO_HISTORY.yellow());
                return Ok(());
            }

            println!("\nConversation History ({}):", store.path().display());
            build_table(&turns).printstd();
            println!();
        }
        HistoryCommand::Clear => {
            let outcome = store.clear()?;
            println!("{}", outcome.to_string().green());
        }
    }

    Ok(())
}

fn build_table(turns: &[ChatTurn]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "#".bold(),
        "Time".bold(),
        "User".bold(),
        "Bot".bold()
    ]);

    for (index, turn) in turns.iter().enumerate() {
        table.add_row(prettytable::row![
            index + 1,
            turn.timestamp.format(TIMESTAMP_FORMAT).to_string().cyan(),
            truncate(&turn.user),
            truncate(&turn.bot)
        ]);
    }

    table
}

/// Single-line preview of `text`, cut at a char boundary
fn truncate(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > MAX_CELL_CHARS {
        let cut: String = flat.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
