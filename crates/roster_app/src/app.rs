use std::io::{self, BufRead, Write};
use std::time::Duration;

use roster_engine::PagedListController;
use roster_logging::{roster_info, roster_warn};

use crate::commands::{parse_command, Command, HELP};
use crate::model::Character;
use crate::render::render;

const PROMPT: &str = "> ";

/// Line-oriented front end: read a command, wait for its fetch, print the list.
pub fn run<R: BufRead, W: Write>(
    controller: &mut PagedListController<Character>,
    input: R,
    out: &mut W,
    wait: Duration,
) -> io::Result<()> {
    settle(controller, wait, out)?;
    writeln!(out, "{}", render(&controller.snapshot()))?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        match parse_command(&line?) {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Unknown(text) => {
                writeln!(out, "Unknown command: {text} (type `help`)")?;
                continue;
            }
            Command::Info(position) => {
                match controller.state().items().get(position - 1) {
                    Some(character) => writeln!(out, "{}", character.details())?,
                    None => writeln!(out, "No entry {position} in the current list")?,
                }
                continue;
            }
            Command::Search(query) => {
                roster_info!("Search {:?}", query);
                controller.set_query(query);
            }
            Command::More => controller.load_more(),
            Command::Refresh => controller.refresh(),
            Command::Show => {}
        }
        settle(controller, wait, out)?;
        writeln!(out, "{}", render(&controller.snapshot()))?;
    }
    Ok(())
}

fn settle<W: Write>(
    controller: &mut PagedListController<Character>,
    wait: Duration,
    out: &mut W,
) -> io::Result<()> {
    if !controller.wait_idle(wait) {
        roster_warn!("Fetch still pending after {:?}", wait);
        writeln!(out, "(still loading; type `show` to check again)")?;
    }
    controller.pump();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;

    use roster_core::{PageMeta, PageRequest, PageResult};
    use roster_engine::{ControllerOptions, FetchError, PageSource, PagedListController};

    use super::run;
    use crate::model::Character;

    fn character(id: u32, name: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            ki: String::new(),
            max_ki: String::new(),
            race: "Saiyan".to_string(),
            gender: String::new(),
            affiliation: String::new(),
            description: None,
            image: None,
        }
    }

    /// Two pages for the empty query, a bare one-entry list for any search.
    struct TwoPages;

    #[async_trait::async_trait]
    impl PageSource<Character> for TwoPages {
        async fn fetch_page(
            &self,
            request: &PageRequest,
        ) -> Result<PageResult<Character>, FetchError> {
            if !request.query.is_empty() {
                return Ok(PageResult::Unpaginated(vec![character(9, &request.query)]));
            }
            let items = match request.page {
                1 => vec![character(1, "Goku"), character(2, "Vegeta")],
                _ => vec![character(3, "Gohan")],
            };
            Ok(PageResult::Paginated {
                items,
                meta: PageMeta {
                    current_page: request.page,
                    total_pages: 2,
                    total_items: Some(3),
                },
            })
        }
    }

    fn session(script: &str) -> String {
        roster_logging::initialize_for_tests();
        let mut controller =
            PagedListController::<Character>::new(Arc::new(TwoPages), ControllerOptions::default())
                .unwrap();
        let mut out = Vec::new();
        run(
            &mut controller,
            Cursor::new(script.to_string()),
            &mut out,
            Duration::from_secs(5),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn initial_list_is_printed_before_prompt() {
        let out = session("q\n");
        assert!(out.starts_with(
            "  1. Goku (Saiyan)\n  2. Vegeta (Saiyan)\nSearch: all | Items: 2 | Page: 1"
        ));
        assert!(out.ends_with("> "));
    }

    #[test]
    fn more_appends_next_page() {
        let out = session("more\nquit\n");
        assert!(out.contains("  3. Gohan (Saiyan)\nSearch: all | Items: 3 | Page: 2 | End of list"));
    }

    #[test]
    fn search_replaces_list() {
        let out = session("search Broly\n");
        assert!(out.contains(
            "  1. Broly (Saiyan)\nSearch: \"Broly\" | Items: 1 | Page: 1 | End of list"
        ));
    }

    #[test]
    fn info_prints_details_of_listed_entry() {
        let out = session("info 2\ninfo 5\n");
        assert!(out.contains("#2 Vegeta\n  Race: Saiyan"));
        assert!(out.contains("No entry 5 in the current list"));
    }

    #[test]
    fn unknown_command_is_reported() {
        let out = session("dance\nq\n");
        assert!(out.contains("Unknown command: dance"));
    }
}
