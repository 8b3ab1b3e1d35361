use chrono::{Datelike, NaiveDate};

pub static QUOTES: [&str; 8] = [
    "Push yourself, because no one else is going to do it for you!",
    "The pain you feel today will be the strength you feel tomorrow.",
    "Success starts with self-discipline.",
    "Don't limit your challenges. Challenge your limits!",
    "Strength does not come from the physical capacity. It comes from an indomitable will.",
    "The only bad workout is the one that didn't happen.",
    "Make yourself proud.",
    "Your body can stand almost anything. It's your mind you have to convince.",
];

/// A quote that changes daily but is stable within a day.
#[must_use]
pub fn quote_of_the_day(date: NaiveDate) -> &'static str {
    #[allow(clippy::cast_possible_truncation)]
    let day = date.num_days_from_ce().unsigned_abs() as usize;
    QUOTES[day % QUOTES.len()]
}
