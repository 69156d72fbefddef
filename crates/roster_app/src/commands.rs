/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    More,
    Refresh,
    /// Details for the 1-based list position.
    Info(usize),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  search <text>   filter by name (s); `search` alone clears the filter
  more            load the next page (m)
  refresh         reload from the first page (r)
  info <n>        details for entry n (i)
  show            print the list again
  help            this text (h, ?)
  quit            exit (q)";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "more" | "m" => Command::More,
        "refresh" | "r" => Command::Refresh,
        "info" | "i" => match rest.parse::<usize>() {
            Ok(position) if position > 0 => Command::Info(position),
            _ => Command::Unknown(line.to_string()),
        },
        "" | "show" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
