use crate::models::{AppData, Mood, StatsResponse};
use chrono::{DateTime, Duration, Local, NaiveDate};
use std::collections::BTreeSet;

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &AppData) -> StatsResponse {
    StatsResponse {
        total_entries: data.journal_entries.len(),
        current_streak: current_streak_at(today, data),
        completion_rate: completion_rate(data),
        mood_average: mood_average(data),
    }
}

/// Consecutive local calendar days with at least one entry, walking back from
/// `today`. Several entries on one day count once; the walk stops at the
/// first empty day.
pub fn current_streak_at(today: NaiveDate, data: &AppData) -> u32 {
    let days: BTreeSet<NaiveDate> = data
        .journal_entries
        .iter()
        .filter_map(|entry| entry_day(entry.timestamp))
        .collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

pub fn completion_rate(data: &AppData) -> u32 {
    let total = data.habits.len();
    if total == 0 {
        return 0;
    }
    let completed = data.habits.iter().filter(|habit| habit.completed).count();
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Mean mood weight over ALL entries (display filters do not narrow it),
/// rounded to one decimal. `None` when there is nothing to average.
pub fn mood_average(data: &AppData) -> Option<f64> {
    if data.journal_entries.is_empty() {
        return None;
    }
    let sum: f64 = data
        .journal_entries
        .iter()
        .map(|entry| mood_weight(entry.mood))
        .sum();
    let avg = sum / data.journal_entries.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}

/// Ordinal 1..=7 scale; labels this build does not know weigh as Neutral.
pub fn mood_weight(mood: Mood) -> f64 {
    match mood {
        Mood::Sad => 1.0,
        Mood::Stressed => 2.0,
        Mood::Anxious => 3.0,
        Mood::Neutral => 4.0,
        Mood::Grateful => 5.0,
        Mood::Happy => 6.0,
        Mood::Excited => 7.0,
        Mood::Other => 4.0,
    }
}

fn entry_day(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|moment| moment.with_timezone(&Local).date_naive())
}
