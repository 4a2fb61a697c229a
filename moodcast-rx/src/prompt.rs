//! Prompt construction for the suggestion model
//!
//! The wording is configuration, not contract: a default template ships
//! here and `MOODCAST_PROMPT_TEMPLATE` may replace it. Placeholders
//! `{time_of_day}`, `{weather}` and `{user_input}` are substituted.

use moodcast_common::TimeOfDay;

/// Default prompt template.
pub const DEFAULT_TEMPLATE: &str = "\
You are a smart music recommendation assistant. Suggest exactly 10 songs for the user based on:

Time of Day: {time_of_day}
Weather: {weather}
User Input: {user_input}

Favor a mix of well-known and lesser-known songs: include at least 3 of each.
When user input is present, weigh it above the time of day and the weather.
For each song, provide: name, artist, genre, mood.
Format strictly as a JSON array, no extra text.";

/// Build the prompt for one request.
///
/// An empty `user_input` renders as `None` so the model does not invent a
/// preference out of whitespace.
pub fn build_prompt(
    template: Option<&str>,
    weather_description: &str,
    time_of_day: TimeOfDay,
    user_input: &str,
) -> String {
    let user_input = if user_input.trim().is_empty() {
        "None"
    } else {
        user_input
    };

    template
        .unwrap_or(DEFAULT_TEMPLATE)
        .replace("{time_of_day}", time_of_day.as_str())
        .replace("{weather}", weather_description)
        .replace("{user_input}", user_input)
}
