//! Interactive terminal front end for the viewer

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::render::render;
use super::state::Viewer;
use super::GatewayApi;

const HELP: &str = "\
Commands:
  place <text>   set the place name
  search         fetch the forecast for the place name
  lat <number>   stage a latitude
  lon <number>   stage a longitude
  fetch          fetch the forecast for the staged coordinates
  lang           switch between English and Russian
  docs           open {gateway}/api-docs in a browser
                 (the gateway itself does not serve this page, so it may
                 not be available)
  help           show this help
  quit           exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Place(String),
    Search,
    Latitude(f64),
    Longitude(f64),
    Fetch,
    Language,
    Docs,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "place" => Ok(Command::Place(rest.to_string())),
            "search" => Ok(Command::Search),
            "lat" => parse_number(rest).map(Command::Latitude),
            "lon" => parse_number(rest).map(Command::Longitude),
            "fetch" => Ok(Command::Fetch),
            "lang" => Ok(Command::Language),
            "docs" => Ok(Command::Docs),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command, type 'help'".to_string()),
            other => Err(format!("unknown command '{other}', type 'help'")),
        }
    }
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

/// Run the prompt until `quit` or end of input
///
/// A printer task redraws the view for every published snapshot, so the
/// loading indicator shows while a fetch is pending.
pub async fn run<G: GatewayApi + 'static>(mut viewer: Viewer<G>) -> Result<()> {
    let mut updates = viewer.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let view = render(&updates.borrow_and_update());
            println!("{view}");
        }
    });

    viewer.mount().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            Command::Place(text) => viewer.set_search_text(text),
            Command::Search => viewer.fetch_by_place().await,
            Command::Latitude(value) => viewer.stage_latitude(value),
            Command::Longitude(value) => viewer.stage_longitude(value),
            Command::Fetch => viewer.fetch_by_coordinates().await,
            Command::Language => viewer.toggle_language(),
            Command::Docs => {
                if let Err(e) = viewer.open_documentation() {
                    warn!("{:#}", e);
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    drop(viewer);
    printer.await?;
    Ok(())
}
