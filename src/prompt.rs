//! Line-oriented interactive prompt.
//!
//! Edits the session inputs and triggers searches, one command per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `q <keyword>` / `query <keyword>` | set the keyword (may be empty) |
//! | `from <date>` | set the from-date |
//! | `source <selector>` | set the selector (`all`, `api1`, `api2`, `api3`) |
//! | `search` or an empty line | run a search and print the results |
//! | `show` | print the current results again |
//! | `help` | list commands |
//! | `quit` / `exit` | leave |

use crate::aggregator::Aggregator;
use crate::api::FetchBody;
use crate::outputs::terminal::render_session;
use crate::session::SearchSession;
use std::error::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

const HELP: &str = "Commands: q <keyword> | from <YYYY-MM-DD> | source <all|api1|api2|api3> | search | show | help | quit\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    From(String),
    Source(String),
    Search,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "search" => Command::Search,
        "q" | "query" => Command::Query(rest.to_string()),
        "from" => Command::From(rest.to_string()),
        "source" => Command::Source(rest.to_string()),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Read commands from `input` until `quit` or end of input.
#[instrument(level = "info", skip_all)]
pub async fn run<F, R, W>(
    title: &str,
    session: &mut SearchSession,
    aggregator: &Aggregator<F>,
    input: R,
    mut output: W,
) -> Result<(), Box<dyn Error>>
where
    F: FetchBody,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(HELP.as_bytes()).await?;
    output.write_all(b"> ").await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        debug!(?command, "Prompt command");

        match command {
            Command::Query(query) => session.query = query,
            Command::From(date) => session.from_date = date,
            Command::Source(selector) => session.selector = selector,
            Command::Search => {
                session.search(aggregator).await;
                output.write_all(render_session(title, session).as_bytes()).await?;
            }
            Command::Show => {
                output.write_all(render_session(title, session).as_bytes()).await?;
            }
            Command::Help => output.write_all(HELP.as_bytes()).await?,
            Command::Quit => break,
            Command::Unknown(text) => {
                output.write_all(format!("Unknown command: {text}\n").as_bytes()).await?;
                output.write_all(HELP.as_bytes()).await?;
            }
        }

        output.write_all(b"> ").await?;
        output.flush().await?;
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::testing::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("q  model y "), Command::Query("model y".to_string()));
        assert_eq!(parse_command("query"), Command::Query(String::new()));
        assert_eq!(parse_command("from 2025-02-01"), Command::From("2025-02-01".to_string()));
        assert_eq!(parse_command("SOURCE api2"), Command::Source("api2".to_string()));
        assert_eq!(parse_command(""), Command::Search);
        assert_eq!(parse_command("search"), Command::Search);
        assert_eq!(parse_command("show"), Command::Show);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("fetch now"), Command::Unknown("fetch now".to_string()));
    }

    #[tokio::test]
    async fn test_run_edits_inputs_and_searches() {
        let aggregator = Aggregator::new(all_sources_stub(), stub_endpoints());
        let mut session = SearchSession::default();
        let input: &[u8] = b"q rivian\nfrom 2025-02-01\nsource api2\nsearch\nquit\nq ignored\n";
        let mut output = Vec::new();

        run("News", &mut session, &aggregator, input, &mut output).await.unwrap();

        assert_eq!(session.query, "rivian");
        assert_eq!(session.from_date, "2025-02-01");
        assert_eq!(session.articles().len(), 3);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Search: \"rivian\" from 2025-02-01 (api2)"));
        assert!(printed.contains("* g1"));

        let calls = aggregator_calls(&aggregator);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].query_pairs().any(|(k, v)| k == "q" && v == "rivian"));
    }

    #[tokio::test]
    async fn test_run_reports_unknown_commands() {
        let aggregator = Aggregator::new(all_sources_stub(), stub_endpoints());
        let mut session = SearchSession::default();
        let input: &[u8] = b"bogus\n";
        let mut output = Vec::new();

        run("News", &mut session, &aggregator, input, &mut output).await.unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Unknown command: bogus"));
        assert!(session.articles().is_empty());
    }

    fn aggregator_calls(aggregator: &Aggregator<StubFetcher>) -> Vec<url::Url> {
        aggregator.fetcher().calls.borrow().clone()
    }
}
