//! Interactive prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use bikesharelib::{
    title_case, BikeshareError, City, Month, Named, PeriodFilter, Selection, Weekday,
};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const INVALID_SELECTION: &str = "\nYour selection was not valid. Please try again.";

/// Horizontal rule printed between report sections.
pub fn rule() -> String {
    "-".repeat(40)
}

/// Format names as a bracketed, quoted list: `['A', 'B']`.
pub fn quoted_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = names.into_iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn city_prompt() -> String {
    format!(
        "Please select a city\n> {} \n> ",
        quoted_list(City::ALL.iter().map(|c| c.title()))
    )
}

pub fn month_prompt() -> String {
    format!(
        "Please select a month or enter \"All\"\n> {} \n> ",
        quoted_list(Month::values().iter().map(|m| m.label()))
    )
}

pub fn day_prompt() -> String {
    format!(
        "Please select a day of the week or enter \"All\"\n> {} \n> ",
        quoted_list(Weekday::values().iter().map(|d| d.label()))
    )
}

/// Echoes the selection of one prompt attempt when dropped.
///
/// Created as soon as an answer has been read, so the echo is printed on
/// every way out of the attempt: after the invalid-selection notice, on
/// the successful return, and on early exit through `?`.
struct Echo<'a, W: Write> {
    out: &'a mut W,
    selection: String,
}

impl<'a, W: Write> Echo<'a, W> {
    fn new(out: &'a mut W, selection: String) -> Self {
        Self { out, selection }
    }

    fn note(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", text)
    }
}

impl<W: Write> Drop for Echo<'_, W> {
    fn drop(&mut self) {
        // Drop cannot propagate; a broken stdout surfaces on the next prompt.
        let _ = writeln!(self.out, "\nYou selected {}.\n", self.selection);
    }
}

/// Line-oriented console: writes prompts to `output`, reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for report output
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter, returning the writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line.
    pub fn say(&mut self, text: &str) -> bikesharelib::Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `prompt` and read one answer, without its line ending.
    pub fn ask(&mut self, prompt: &str) -> bikesharelib::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Ask until `resolve` accepts an answer.
    ///
    /// `resolve` returns the text to echo back and, for a valid answer, the
    /// resolved value. The echo is printed after every attempt, valid or not.
    fn collect<T>(
        &mut self,
        prompt: &str,
        resolve: impl Fn(&str) -> (String, Option<T>),
    ) -> bikesharelib::Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            let (shown, resolved) = resolve(&answer);
            let mut echo = Echo::new(&mut self.output, shown);
            match resolved {
                Some(value) => return Ok(value),
                None => echo.note(INVALID_SELECTION)?,
            }
        }
    }

    pub fn collect_city(&mut self) -> bikesharelib::Result<City> {
        self.collect(&city_prompt(), |answer| {
            (title_case(&City::normalize(answer)), City::resolve(answer))
        })
    }

    pub fn collect_month(&mut self) -> bikesharelib::Result<PeriodFilter<Month>> {
        self.collect(&month_prompt(), |answer| {
            (title_case(answer), PeriodFilter::resolve(answer))
        })
    }

    pub fn collect_day(&mut self) -> bikesharelib::Result<PeriodFilter<Weekday>> {
        self.collect(&day_prompt(), |answer| {
            (title_case(answer), PeriodFilter::resolve(answer))
        })
    }

    /// Greet the user and collect a full city/month/day selection.
    pub fn collect_selection(&mut self) -> bikesharelib::Result<Selection> {
        self.say(GREETING)?;
        let city = self.collect_city()?;
        let month = self.collect_month()?;
        let day = self.collect_day()?;
        self.say(&rule())?;
        Ok(Selection { city, month, day })
    }
}
