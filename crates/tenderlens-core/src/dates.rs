//! Wire formats for calendar values.
//!
//! Dates are `YYYY-MM-DD`, date-times `YYYY-MM-DDThh:mm:ss` without an offset.

use time::macros::date;
use time::{Date, PrimitiveDateTime};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    pub iso_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// Stand-in date for observations that carry none; sorts before any real publication.
pub const UNDATED_SENTINEL: Date = date!(2000 - 01 - 01);

/// `date` moved back by `years`, clamping Feb 29 to Feb 28 when needed.
pub fn years_before(date: Date, years: i32) -> Date {
    let year = date.year() - years;
    Date::from_calendar_date(year, date.month(), date.day())
        .or_else(|_| Date::from_calendar_date(year, date.month(), date.day() - 1))
        .unwrap_or(Date::MIN)
}

/// `YYYY-MM-DDThh:mm:ss`, matching the wire format.
pub fn datetime_text(value: PrimitiveDateTime) -> String {
    format!(
        "{}T{:02}:{:02}:{:02}",
        value.date(),
        value.hour(),
        value.minute(),
        value.second()
    )
}
