use crate::errors::AppError;
use crate::filters::{HabitFilter, MoodFilter, SortOrder, filter_entries, filter_habits, sort_entries};
use crate::models::{
    EntryListQuery, Habit, HabitListQuery, JournalEntry, Mood, NewEntryRequest, NewHabitRequest,
    StatsResponse, new_id, now_ms,
};
use crate::sanitize::sanitize;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::{encode_document, parse_snapshot, persist_data};
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&build_stats(&data)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryListQuery>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let mood = MoodFilter::parse(query.mood.as_deref())
        .ok_or_else(|| AppError::bad_request("mood filter must be 'all' or a known mood"))?;
    let sort = SortOrder::parse(query.sort.as_deref())
        .ok_or_else(|| AppError::bad_request("sort must be 'newest' or 'oldest'"))?;

    let data = state.data.lock().await;
    Ok(Json(sort_entries(
        filter_entries(&data.journal_entries, mood),
        sort,
    )))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let label = payload
        .mood
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or_else(|| AppError::bad_request("a mood must be selected"))?;
    let mood = Mood::from_label(label).ok_or_else(|| AppError::bad_request("unrecognized mood"))?;

    let entry = JournalEntry {
        id: new_id(),
        mood,
        journal: sanitize(payload.journal.trim()),
        timestamp: now_ms(),
    };

    let mut data = state.data.lock().await;
    data.journal_entries.push(entry.clone());
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.journal_entries.pop();
        return Err(err);
    }

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<HabitListQuery>,
) -> Result<Json<Vec<Habit>>, AppError> {
    let filter = HabitFilter::parse(query.filter.as_deref())
        .ok_or_else(|| AppError::bad_request("filter must be 'all', 'active' or 'completed'"))?;

    let data = state.data.lock().await;
    Ok(Json(filter_habits(&data.habits, filter)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("habit text must not be empty"));
    }

    let habit = Habit {
        id: new_id(),
        text: sanitize(text),
        completed: false,
        created_at: now_ms(),
    };

    let mut data = state.data.lock().await;
    data.habits.push(habit.clone());
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits.pop();
        return Err(err);
    }

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Habit>, AppError> {
    let mut data = state.data.lock().await;
    let index = data
        .habits
        .iter()
        .position(|habit| habit.id == id)
        .ok_or_else(|| AppError::not_found("no habit with that id"))?;

    data.habits[index].completed = !data.habits[index].completed;
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits[index].completed = !data.habits[index].completed;
        return Err(err);
    }

    Ok(Json(data.habits[index].clone()))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let index = data
        .habits
        .iter()
        .position(|habit| habit.id == id)
        .ok_or_else(|| AppError::not_found("no habit with that id"))?;

    let removed = data.habits.remove(index);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits.insert(index, removed);
        return Err(err);
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

pub async fn export_snapshot(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.data.lock().await;
    let payload = encode_document(&data).map_err(AppError::internal)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"journal-export.json\"",
            ),
        ],
        payload,
    ))
}

pub async fn import_snapshot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatsResponse>, AppError> {
    let imported = parse_snapshot(&body)?;

    let mut data = state.data.lock().await;
    let previous = std::mem::replace(&mut *data, imported);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        *data = previous;
        return Err(err);
    }

    Ok(Json(build_stats(&data)))
}

pub async fn clear_all(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let previous = std::mem::take(&mut *data);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        *data = previous;
        return Err(err);
    }

    Ok(StatusCode::NO_CONTENT)
}
