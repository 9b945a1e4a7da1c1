use crawler_core::{Msg, ViewMode};
use thiserror::Error;

pub(crate) const HELP: &str = "\
Commands:
  keywords <k1, k2, ...>     set search keywords
  year <yyyy>                set start year
  categories [<name>, ...]   check exactly these categories (empty clears)
  add <venue>                add a venue id by hand
  remove <venue>             remove a venue id
  start                      start crawling
  page <n>                   show results page n (1-based)
  size <10|25|50>            results per page
  view <search|results>      switch view
  download                   save the CSV export
  reload                     reload conference categories
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Send(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

/// Parses one line of shell input. Blank lines parse to `Msg::NoOp`.
pub(crate) fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "" => Msg::NoOp,
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "keywords" => Msg::KeywordsChanged(rest.to_string()),
        "year" => Msg::YearStartChanged(rest.to_string()),
        "categories" => Msg::CategoriesSelected(
            rest.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        ),
        "add" => Msg::ManualVenueConfirmed(rest.to_string()),
        "remove" => Msg::VenueRemoved(rest.to_lowercase()),
        "start" => Msg::StartCrawlClicked,
        "page" => match rest.parse::<usize>() {
            Ok(page) if page >= 1 => Msg::PageRequested(page - 1),
            _ => {
                return Err(CommandError::BadArgument {
                    command: "page",
                    expected: "a page number starting at 1",
                })
            }
        },
        "size" => match rest.parse::<usize>() {
            Ok(size) => Msg::PageSizeChanged(size),
            Err(_) => {
                return Err(CommandError::BadArgument {
                    command: "size",
                    expected: "10, 25 or 50",
                })
            }
        },
        "view" => match rest.to_ascii_lowercase().as_str() {
            "search" => Msg::ViewSelected(ViewMode::Search),
            "results" => Msg::ViewSelected(ViewMode::Results),
            _ => {
                return Err(CommandError::BadArgument {
                    command: "view",
                    expected: "`search` or `results`",
                })
            }
        },
        "download" => Msg::DownloadClicked,
        "reload" => Msg::ReloadCatalogClicked,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Send(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_list_is_split_on_commas() {
        assert_eq!(
            parse_command("categories AI, Machine Learning ,"),
            Ok(Command::Send(Msg::CategoriesSelected(vec![
                "AI".to_string(),
                "Machine Learning".to_string()
            ])))
        );
        assert_eq!(
            parse_command("categories"),
            Ok(Command::Send(Msg::CategoriesSelected(Vec::new())))
        );
    }

    #[test]
    fn keywords_keep_raw_text() {
        assert_eq!(
            parse_command("keywords  ml , nlp ,, "),
            Ok(Command::Send(Msg::KeywordsChanged("ml , nlp ,,".to_string())))
        );
    }

    #[test]
    fn pages_are_one_based() {
        assert_eq!(parse_command("page 3"), Ok(Command::Send(Msg::PageRequested(2))));
        assert!(matches!(
            parse_command("page 0"),
            Err(CommandError::BadArgument { command: "page", .. })
        ));
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_command("  QUIT "), Ok(Command::Quit));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command(""), Ok(Command::Send(Msg::NoOp)));
        assert_eq!(
            parse_command("crawl"),
            Err(CommandError::Unknown("crawl".to_string()))
        );
    }

    #[test]
    fn view_switch() {
        assert_eq!(
            parse_command("view results"),
            Ok(Command::Send(Msg::ViewSelected(ViewMode::Results)))
        );
    }
}
