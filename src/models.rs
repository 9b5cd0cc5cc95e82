use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema version of the persisted document. Documents carrying any other
/// version are discarded on load, not migrated.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Stressed,
    Anxious,
    Excited,
    Grateful,
    /// Catch-all for labels found in stored or imported data that the current
    /// build does not know. Never accepted from the submission form.
    Other,
}

impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Mood::from_label(&label).unwrap_or(Mood::Other))
    }
}

impl Mood {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "happy" => Some(Self::Happy),
            "neutral" => Some(Self::Neutral),
            "sad" => Some(Self::Sad),
            "stressed" => Some(Self::Stressed),
            "anxious" => Some(Self::Anxious),
            "excited" => Some(Self::Excited),
            "grateful" => Some(Self::Grateful),
            _ => None,
        }
    }
}

/// Immutable once created; entries are only ever inserted or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub mood: Mood,
    pub journal: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(rename = "journalEntries", default)]
    pub journal_entries: Vec<JournalEntry>,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

/// The on-disk envelope: every save rewrites the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    #[serde(default)]
    pub timestamp: i64,
    pub data: AppData,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub mood: Option<String>,
    #[serde(default)]
    pub journal: String,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct EntryListQuery {
    pub mood: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HabitListQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_entries: usize,
    pub current_streak: u32,
    pub completion_rate: u32,
    /// `None` when there are no entries to average.
    pub mood_average: Option<f64>,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
