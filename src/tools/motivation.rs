//! Motivation tools: a quote of the day and habit-building tips

use chrono::Datelike;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Clock;

const QUOTES: [&str; 10] = [
    "The secret of getting ahead is getting started.",
    "Well done is better than well said.",
    "The journey of a thousand miles begins with a single step.",
    "It does not matter how slowly you go as long as you do not stop.",
    "Believe you can and you're halfway there.",
    "Success is the sum of small efforts repeated day in and day out.",
    "The only way to do great work is to love what you do.",
    "Don't watch the clock; do what it does. Keep going.",
    "The future depends on what you do today.",
    "You don't have to be great to start, but you have to start to be great.",
];

const TIPS: [(&str, &str); 5] = [
    (
        "Start Small",
        "Begin with habits that take less than 2 minutes to complete.",
    ),
    (
        "Be Consistent",
        "Do your habit at the same time every day to build automaticity.",
    ),
    (
        "Track Your Progress",
        "Visual tracking increases motivation and accountability.",
    ),
    (
        "Stack Your Habits",
        "Link new habits to existing ones for better success rates.",
    ),
    (
        "Celebrate Wins",
        "Acknowledge every streak and milestone, no matter how small.",
    ),
];

/// Tools that take no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<Tip>,
}

/// Same quote all day, a different one tomorrow
pub fn quote_of_the_day(clock: &dyn Clock) -> QuoteResponse {
    let day = clock.today().num_days_from_ce().unsigned_abs() as usize;
    QuoteResponse {
        quote: QUOTES[day % QUOTES.len()],
    }
}

pub fn tips() -> TipsResponse {
    TipsResponse {
        tips: TIPS
            .iter()
            .map(|&(title, description)| Tip { title, description })
            .collect(),
    }
}
