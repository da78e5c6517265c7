//! One interactive session: select, load, report, page, maybe restart.

use std::io::{BufRead, Write};

use anyhow::Context;
use bikesharelib::{load_trips, BikeshareError, CityTable, DayFilterMode};
use tracing::{debug, info};

use crate::pager::page_rows;
use crate::prompt::Prompter;
use crate::render::print_report;

pub const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub cities: CityTable,
    pub day_mode: DayFilterMode,
}

/// Only an exact, case-insensitive "yes" restarts.
pub fn wants_restart(answer: &str) -> bool {
    answer.to_lowercase() == "yes"
}

/// Run passes until the user declines to restart.
///
/// Closing stdin ends the session quietly. A missing or malformed data
/// file is returned as an error.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> anyhow::Result<()> {
    match run_passes(prompter, settings) {
        Err(err) if is_input_closed(&err) => {
            debug!("input closed, ending session");
            writeln!(prompter.output())?;
            Ok(())
        }
        other => other,
    }
}

fn is_input_closed(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<BikeshareError>(),
        Some(BikeshareError::InputClosed)
    )
}

fn run_passes<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut pass = 0;
    loop {
        pass += 1;
        let selection = prompter.collect_selection()?;
        info!(
            pass,
            city = selection.city.name(),
            month = %selection.month,
            day = %selection.day,
            "selection"
        );

        let table = load_trips(&settings.cities, &selection, settings.day_mode)
            .with_context(|| format!("loading {} trips", selection.city))?;

        print_report(prompter.output(), &table)?;
        let pages = page_rows(prompter, &table)?;
        debug!(pages, "paging finished");

        let answer = prompter.ask(RESTART_PROMPT)?;
        if !wants_restart(&answer) {
            return Ok(());
        }
    }
}
