use crate::models::{Habit, JournalEntry, Mood};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitFilter {
    All,
    Active,
    Completed,
}

impl HabitFilter {
    /// Parses the `filter` query parameter; absence means `All`.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.unwrap_or("all") {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodFilter {
    All,
    Only(Mood),
}

impl MoodFilter {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.unwrap_or("all") {
            "all" => Some(Self::All),
            label => Mood::from_label(label).map(Self::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.unwrap_or("newest") {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            _ => None,
        }
    }
}

pub fn filter_habits(habits: &[Habit], filter: HabitFilter) -> Vec<Habit> {
    habits
        .iter()
        .filter(|habit| match filter {
            HabitFilter::All => true,
            HabitFilter::Active => !habit.completed,
            HabitFilter::Completed => habit.completed,
        })
        .cloned()
        .collect()
}

pub fn filter_entries(entries: &[JournalEntry], filter: MoodFilter) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|entry| match filter {
            MoodFilter::All => true,
            MoodFilter::Only(mood) => entry.mood == mood,
        })
        .cloned()
        .collect()
}

/// Stable with respect to equal timestamps: ties keep their original
/// relative order.
pub fn sort_entries(mut entries: Vec<JournalEntry>, order: SortOrder) -> Vec<JournalEntry> {
    match order {
        SortOrder::Newest => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }
    entries
}
