use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EntryDto {
    id: String,
    mood: String,
    journal: String,
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct HabitDto {
    id: String,
    text: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct StatsDto {
    total_entries: usize,
    current_streak: u32,
    completion_rate: u32,
    mood_average: Option<f64>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_temp_path(suffix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("mood_journal_http_{}_{nanos}{suffix}", std::process::id()));
    path.to_string_lossy().to_string()
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_mood_journal"))
        .env("PORT", port.to_string())
        .env("JOURNAL_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(unique_temp_path(".json")).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_entries(client: &Client, base_url: &str, query: &str) -> Vec<EntryDto> {
    client
        .get(format!("{base_url}/api/entries{query}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn fetch_habits(client: &Client, base_url: &str, query: &str) -> Vec<HabitDto> {
    client
        .get(format!("{base_url}/api/habits{query}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn fetch_stats(client: &Client, base_url: &str) -> StatsDto {
    client
        .get(format!("{base_url}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_submit_entry_sanitizes_and_updates_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_stats(&client, &server.base_url).await;
    let start = now_ms();

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "happy", "journal": "Felt <great> & rested" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: EntryDto = response.json().await.unwrap();
    assert_eq!(created.mood, "happy");
    assert_eq!(created.journal, "Felt &lt;great&gt; &amp; rested");
    assert!(created.timestamp >= start);

    let entries = fetch_entries(&client, &server.base_url, "").await;
    assert!(entries.iter().any(|entry| entry.id == created.id));

    let after = fetch_stats(&client, &server.base_url).await;
    assert_eq!(after.total_entries, before.total_entries + 1);
    assert!(after.current_streak >= 1);
    assert!(after.mood_average.is_some());
}

#[tokio::test]
async fn http_validation_failures_change_nothing() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_stats(&client, &server.base_url).await;

    let no_mood = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "journal": "forgot to pick a mood" }))
        .send()
        .await
        .unwrap();
    assert_eq!(no_mood.status(), StatusCode::BAD_REQUEST);

    let bad_mood = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "bored", "journal": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_mood.status(), StatusCode::BAD_REQUEST);

    let blank_habit = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank_habit.status(), StatusCode::BAD_REQUEST);

    let after = fetch_stats(&client, &server.base_url).await;
    assert_eq!(after.total_entries, before.total_entries);
    assert_eq!(after.completion_rate, before.completion_rate);
}

#[tokio::test]
async fn http_habit_toggle_is_reversible_and_delete_is_precise() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let keeper: HabitDto = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "text": "  morning <walk>  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(keeper.text, "morning &lt;walk&gt;");
    assert!(!keeper.completed);

    let goner: HabitDto = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "text": "floss" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let toggled: HabitDto = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, keeper.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.completed);

    let completed = fetch_habits(&client, &server.base_url, "?filter=completed").await;
    assert!(completed.iter().any(|habit| habit.id == keeper.id));
    let active = fetch_habits(&client, &server.base_url, "?filter=active").await;
    assert!(active.iter().any(|habit| habit.id == goner.id));
    assert!(!active.iter().any(|habit| habit.id == keeper.id));

    // toggling back is allowed
    let untoggled: HabitDto = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, keeper.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!untoggled.completed);

    // re-complete it, then delete the other habit; the flag must survive
    client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, keeper.id))
        .send()
        .await
        .unwrap();

    let deleted = client
        .delete(format!("{}/api/habits/{}", server.base_url, goner.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let remaining = fetch_habits(&client, &server.base_url, "").await;
    assert!(!remaining.iter().any(|habit| habit.id == goner.id));
    let survivor = remaining
        .iter()
        .find(|habit| habit.id == keeper.id)
        .expect("kept habit should survive the delete");
    assert!(survivor.completed);

    let missing = client
        .delete(format!("{}/api/habits/{}", server.base_url, goner.id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_entry_filters_and_sort() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sad: EntryDto = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "sad", "journal": "rough afternoon" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "excited", "journal": "" }))
        .send()
        .await
        .unwrap();

    let only_sad = fetch_entries(&client, &server.base_url, "?mood=sad").await;
    assert!(only_sad.iter().all(|entry| entry.mood == "sad"));
    assert!(only_sad.iter().any(|entry| entry.id == sad.id));

    let oldest = fetch_entries(&client, &server.base_url, "?sort=oldest").await;
    assert!(oldest.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let newest = fetch_entries(&client, &server.base_url, "?sort=newest").await;
    assert!(newest.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let bad_filter = client
        .get(format!("{}/api/entries?mood=bored", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_filter.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_export_clear_import_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // make sure there is something worth exporting
    client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "grateful", "journal": "round trip" }))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "text": "water the plants" }))
        .send()
        .await
        .unwrap();

    let export_response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(export_response.status().is_success());
    let disposition = export_response
        .headers()
        .get("content-disposition")
        .expect("export should be a download")
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));

    let exported = export_response.bytes().await.unwrap();
    let snapshot: serde_json::Value = serde_json::from_slice(&exported).unwrap();
    assert_eq!(snapshot["version"], 1);
    assert!(snapshot["data"]["journalEntries"].is_array());
    assert!(snapshot["data"]["habits"].is_array());

    let cleared = client
        .post(format!("{}/api/clear", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);
    assert!(fetch_entries(&client, &server.base_url, "").await.is_empty());
    assert!(fetch_habits(&client, &server.base_url, "").await.is_empty());

    let imported = client
        .post(format!("{}/api/import", server.base_url))
        .body(exported.clone())
        .send()
        .await
        .unwrap();
    assert!(imported.status().is_success());

    let re_exported = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let round_tripped: serde_json::Value = serde_json::from_slice(&re_exported).unwrap();
    assert_eq!(round_tripped["data"], snapshot["data"]);
}

#[tokio::test]
async fn http_import_without_data_field_changes_nothing() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let before_snapshot: serde_json::Value = serde_json::from_slice(&before).unwrap();

    let rejected = client
        .post(format!("{}/api/import", server.base_url))
        .body(r#"{ "version": 1 }"#)
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let after = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let after_snapshot: serde_json::Value = serde_json::from_slice(&after).unwrap();
    assert_eq!(after_snapshot["data"], before_snapshot["data"]);
}

#[tokio::test]
async fn http_persistence_failure_rolls_back() {
    let _guard = TEST_LOCK.lock().await;

    // pointing the data path at a directory makes every write fail while the
    // server still starts from an empty state
    let dir = unique_temp_path("_dir");
    std::fs::create_dir_all(&dir).unwrap();
    let server = spawn_server(dir).await;
    let client = Client::new();

    let entry_attempt = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "happy", "journal": "should not stick" }))
        .send()
        .await
        .unwrap();
    assert_eq!(entry_attempt.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(fetch_entries(&client, &server.base_url, "").await.is_empty());

    let habit_attempt = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "text": "should not stick either" }))
        .send()
        .await
        .unwrap();
    assert_eq!(habit_attempt.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(fetch_habits(&client, &server.base_url, "").await.is_empty());

    let stats = fetch_stats(&client, &server.base_url).await;
    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.mood_average, None);
}
