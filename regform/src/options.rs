//! Option lists for the date-of-birth selects.
//!
//! Days are not calendar-aware: there are always 31 of them, whatever month
//! and year are selected.

use chrono::Datelike;
use regform_types::SelectOption;

/// Oldest year offered in the year select.
pub const EARLIEST_BIRTH_YEAR: i32 = 1940;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `"01"` = January through `"12"` = December.
pub fn month_options() -> Vec<SelectOption> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let month = idx + 1;
            SelectOption::new(format!("{month:02}"), *name)
        })
        .collect()
}

/// `"01"` through `"31"`, labelled `1` through `31`.
pub fn day_options() -> Vec<SelectOption> {
    (1..=31)
        .map(|day| SelectOption::new(format!("{day:02}"), day.to_string()))
        .collect()
}

/// `current_year` down to [`EARLIEST_BIRTH_YEAR`], newest first.
pub fn year_options(current_year: i32) -> Vec<SelectOption> {
    (EARLIEST_BIRTH_YEAR..=current_year)
        .rev()
        .map(|year| SelectOption::new(year.to_string(), year.to_string()))
        .collect()
}

/// The calendar year of the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
