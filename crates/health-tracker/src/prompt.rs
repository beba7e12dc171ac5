//! Line-oriented prompts over any `BufRead` / `Write` pair.

use std::io::{self, BufRead, Write};

use health_core::error::{HealthError, Result};
use health_core::models::{parse_count, parse_date, parse_measure, HealthEntry};
use health_core::settings::AddArgs;

/// Read one line without its trailing newline. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Write `message` (no newline), flush, and read the answer.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)
}

/// Use `given` when present, otherwise prompt for the value.
///
/// End of input while prompting is an error: a half-entered record is never
/// stored.
fn field_value<R: BufRead, W: Write>(
    given: Option<String>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String> {
    if let Some(value) = given {
        return Ok(value);
    }
    ask(input, output, message)?.ok_or_else(|| {
        HealthError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before the entry was complete",
        ))
    })
}

/// Build an entry from `args`, prompting for every missing field.
///
/// Each answer is coerced right after it is read, so a bad value stops the
/// remaining prompts.
pub fn collect_entry<R: BufRead, W: Write>(
    args: AddArgs,
    input: &mut R,
    output: &mut W,
) -> Result<HealthEntry> {
    let date = parse_date(&field_value(
        args.date,
        input,
        output,
        "Enter date (YYYY-MM-DD): ",
    )?)?;
    let steps = parse_count(
        "steps",
        &field_value(args.steps, input, output, "Enter steps walked: ")?,
    )?;
    let sleep_hours = parse_measure(
        "sleep",
        &field_value(args.sleep, input, output, "Enter sleep hours: ")?,
    )?;
    let calories = parse_count(
        "calories",
        &field_value(args.calories, input, output, "Enter calories consumed: ")?,
    )?;
    let water_liters = parse_measure(
        "water",
        &field_value(
            args.water,
            input,
            output,
            "Enter water intake (in liters): ",
        )?,
    )?;

    Ok(HealthEntry {
        date,
        steps,
        sleep_hours,
        calories,
        water_liters,
    })
}
