//! Raw row pager.
//!
//! Answers are matched by substring: anything containing "yes" shows the
//! next page, anything containing "no" stops. So "yes please" continues and
//! "not now" stops.

use std::io::{BufRead, Write};

use bikesharelib::{PageTable, TripTable, PAGE_SIZE};
use tracing::debug;

use crate::prompt::{Prompter, INVALID_SELECTION};

pub const VIEW_PROMPT: &str = "\nWould you like to view the data?\nEnter yes or no.\n> ";
pub const MORE_PROMPT: &str = "\nWould you like to view more data?\nEnter yes or no.\n> ";

pub fn wants_more(answer: &str) -> bool {
    answer.contains("yes")
}

pub fn wants_to_stop(answer: &str) -> bool {
    answer.contains("no")
}

fn ask_lower<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
) -> bikesharelib::Result<String> {
    let answer = prompter.ask(prompt)?.to_lowercase();
    prompter.say(&format!("\nYou selected {}.", answer))?;
    Ok(answer)
}

/// Offer the filtered rows five at a time until the user declines.
///
/// Returns the number of pages shown. Paging past the end prints an empty
/// page rather than stopping.
pub fn page_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
) -> bikesharelib::Result<usize> {
    let mut answer = ask_lower(prompter, VIEW_PROMPT)?;
    if wants_to_stop(&answer) && !wants_more(&answer) {
        return Ok(0);
    }

    let mut offset = 0;
    let mut pages = 0;
    loop {
        answer = if wants_more(&answer) {
            let page = PageTable::from_page(table, offset, PAGE_SIZE);
            if page.is_empty() {
                debug!(offset, rows = table.len(), "paged past the end of the table");
            }
            write!(prompter.output(), "{}", page.render())?;
            offset += PAGE_SIZE;
            pages += 1;
            ask_lower(prompter, MORE_PROMPT)?
        } else {
            prompter.say(INVALID_SELECTION)?;
            ask_lower(prompter, VIEW_PROMPT)?
        };

        if wants_more(&answer) {
            prompter.say("")?;
        }
        if wants_to_stop(&answer) {
            break;
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikesharelib::{read_trips, DayFilterMode};
    use std::io::Cursor;
    use std::path::Path;

    fn table(rows: usize) -> TripTable {
        let mut data =
            String::from("Start Time,Trip Duration,Start Station,End Station,User Type\n");
        for i in 0..rows {
            data.push_str(&format!(
                "2017-01-01 00:00:00,{},Station {},Dock {},Subscriber\n",
                i + 1,
                i,
                i
            ));
        }
        read_trips(data.as_bytes(), Path::new("t.csv"), DayFilterMode::default()).unwrap()
    }

    fn run(input: &str, table: &TripTable) -> (usize, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let pages = page_rows(&mut prompter, table).unwrap();
        (pages, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn test_substring_matching() {
        assert!(wants_more("yes please"));
        assert!(wants_to_stop("not now"));
        assert!(wants_to_stop("i know"));
        assert!(!wants_more("y"));
    }

    #[test]
    fn test_yes_yes_no_on_twelve_rows() {
        let (pages, out) = run("yes\nyes\nno\n", &table(12));
        assert_eq!(pages, 2);
        assert!(out.contains("Station 0"));
        assert!(out.contains("Station 9"));
        assert!(!out.contains("Station 10"));
        assert_eq!(out.matches("view more data").count(), 2);
        assert!(out.ends_with("\nYou selected no.\n"));
    }

    #[test]
    fn test_pages_past_the_end_are_empty() {
        let (pages, out) = run("yes\nyes\nyes\nyes\nno\n", &table(12));
        assert_eq!(pages, 4);
        assert!(out.contains("Station 11"));
        assert!(out.contains("Empty page (rows 15..20 of 12)"));
    }

    #[test]
    fn test_plain_no_stops_immediately() {
        let (pages, out) = run("No\n", &table(3));
        assert_eq!(pages, 0);
        assert!(out.contains("You selected no."));
        assert!(!out.contains("not valid"));
    }

    #[test]
    fn test_invalid_then_yes_then_no() {
        let (pages, out) = run("maybe\nyes\nno\n", &table(3));
        assert_eq!(pages, 1);
        assert!(out.contains("Your selection was not valid"));
        assert_eq!(out.matches("view the data?").count(), 2);
        assert!(out.contains("Station 2"));
    }

    #[test]
    fn test_empty_table() {
        let (pages, out) = run("yes\nno\n", &TripTable::default());
        assert_eq!(pages, 1);
        assert!(out.contains("Empty page (rows 0..5 of 0)"));
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut prompter = Prompter::new(Cursor::new(b"yes\n".to_vec()), Vec::new());
        assert!(page_rows(&mut prompter, &table(3)).is_err());
    }
}
