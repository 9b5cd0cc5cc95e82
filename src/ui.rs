use crate::models::StatsResponse;

pub fn render_index(stats: &StatsResponse) -> String {
    let mood_average = stats
        .mood_average
        .map(|avg| format!("{avg:.1}"))
        .unwrap_or_else(|| "--".to_string());
    INDEX_HTML
        .replace("{{TOTAL}}", &stats.total_entries.to_string())
        .replace("{{STREAK}}", &stats.current_streak.to_string())
        .replace("{{RATE}}", &stats.completion_rate.to_string())
        .replace("{{MOOD_AVG}}", &mood_average)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f1ea;
      --bg-2: #cfe3d4;
      --ink: #28302b;
      --accent: #4a8f6d;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f0e6 60%, #f2f0e8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f645c;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #848b80;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .moods {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin-bottom: 12px;
    }

    .mood-btn {
      border: 2px solid transparent;
      background: rgba(47, 72, 88, 0.06);
      border-radius: 14px;
      padding: 10px 12px;
      font-size: 0.95rem;
      cursor: pointer;
      display: inline-flex;
      align-items: center;
      gap: 6px;
      transition: transform 120ms ease, border-color 120ms ease;
    }

    .mood-btn:active {
      transform: scale(0.96);
    }

    .mood-btn.selected {
      border-color: var(--accent);
      background: rgba(74, 143, 109, 0.12);
    }

    textarea,
    input[type="text"],
    select {
      width: 100%;
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 12px;
      padding: 10px 12px;
      font-family: inherit;
      font-size: 0.95rem;
      color: var(--ink);
      background: white;
    }

    textarea {
      min-height: 90px;
      resize: vertical;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      margin-top: 12px;
    }

    .row select {
      width: auto;
    }

    button.primary,
    button.ghost,
    button.danger {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button.primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(74, 143, 109, 0.3);
    }

    button.ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    button.danger {
      background: var(--danger);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    .tabs {
      display: inline-flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b6f66;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .entry-list,
    .habit-list {
      list-style: none;
      margin: 16px 0 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .entry-item {
      border: 1px solid rgba(47, 72, 88, 0.1);
      border-radius: 14px;
      padding: 12px 14px;
      display: grid;
      gap: 6px;
    }

    .entry-head {
      display: flex;
      justify-content: space-between;
      gap: 10px;
      font-size: 0.9rem;
      color: #6b6f66;
    }

    .entry-mood {
      font-weight: 600;
      color: var(--accent-2);
    }

    .entry-text {
      margin: 0;
      white-space: pre-wrap;
      overflow-wrap: anywhere;
    }

    .habit-item {
      display: flex;
      align-items: center;
      gap: 10px;
      border: 1px solid rgba(47, 72, 88, 0.1);
      border-radius: 14px;
      padding: 10px 14px;
    }

    .habit-item label {
      flex: 1;
      overflow-wrap: anywhere;
    }

    .habit-item.completed label {
      text-decoration: line-through;
      color: #8b9086;
    }

    .habit-item button {
      border: none;
      background: transparent;
      color: var(--danger);
      cursor: pointer;
      font-size: 1rem;
      padding: 4px;
    }

    .empty {
      color: #8b9086;
      font-size: 0.95rem;
      margin: 16px 0 0;
    }

    .data-controls {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    a.ghost-link {
      text-decoration: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 0.95rem;
      font-weight: 600;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    #toasts {
      position: fixed;
      right: 18px;
      bottom: 18px;
      display: grid;
      gap: 8px;
      z-index: 10;
    }

    .toast {
      background: var(--accent-2);
      color: white;
      border-radius: 12px;
      padding: 12px 16px;
      font-size: 0.92rem;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
      cursor: pointer;
      animation: rise 200ms ease;
    }

    .toast[data-type="error"] {
      background: var(--danger);
    }

    .hint {
      margin: 0;
      color: #6f7469;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p class="subtitle">Log how the day felt, keep your habits honest, watch the streak grow.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Entries</span>
        <span id="stat-total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Day streak</span>
        <span id="stat-streak" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Habits done</span>
        <span id="stat-rate" class="value">{{RATE}}%</span>
      </div>
      <div class="stat">
        <span class="label">Mood average</span>
        <span id="stat-mood" class="value">{{MOOD_AVG}}</span>
      </div>
    </section>

    <section class="card">
      <h2>How are you feeling?</h2>
      <div class="moods" id="mood-picker"></div>
      <textarea id="journal-text" placeholder="Write a few lines about today (optional)"></textarea>
      <div class="row">
        <button class="primary" id="entry-submit" type="button">Save entry</button>
      </div>
    </section>

    <section class="card">
      <h2>Entries</h2>
      <div class="row">
        <select id="entry-mood-filter">
          <option value="all">All moods</option>
        </select>
        <select id="entry-sort">
          <option value="newest">Newest first</option>
          <option value="oldest">Oldest first</option>
        </select>
      </div>
      <ul class="entry-list" id="entry-list"></ul>
      <p class="empty" id="entry-empty" hidden>No entries yet.</p>
    </section>

    <section class="card">
      <h2>Habits</h2>
      <div class="row">
        <input type="text" id="habit-text" placeholder="Add a habit, e.g. stretch for 10 minutes" />
        <button class="primary" id="habit-add" type="button">Add habit</button>
      </div>
      <div class="row">
        <div class="tabs" id="habit-tabs" role="tablist">
          <button class="tab active" type="button" data-filter="all" role="tab" aria-selected="true">All</button>
          <button class="tab" type="button" data-filter="active" role="tab" aria-selected="false">Active</button>
          <button class="tab" type="button" data-filter="completed" role="tab" aria-selected="false">Completed</button>
        </div>
      </div>
      <ul class="habit-list" id="habit-list"></ul>
      <p class="empty" id="habit-empty" hidden>No habits in this view.</p>
    </section>

    <section class="card">
      <h2>Your data</h2>
      <div class="data-controls">
        <a class="ghost-link" href="/api/export" download="journal-export.json">Export JSON</a>
        <button class="ghost" id="import-btn" type="button">Import JSON</button>
        <input type="file" id="import-file" accept="application/json" hidden />
        <button class="danger" id="clear-btn" type="button">Clear everything</button>
      </div>
      <p class="hint">Everything is stored in a single local file; export before clearing if you want a backup.</p>
    </section>
  </main>

  <div id="toasts"></div>

  <script>
    const MOODS = [
      { id: 'happy', label: 'Happy', emoji: '\u{1F60A}' },
      { id: 'neutral', label: 'Neutral', emoji: '\u{1F610}' },
      { id: 'sad', label: 'Sad', emoji: '\u{1F622}' },
      { id: 'stressed', label: 'Stressed', emoji: '\u{1F62B}' },
      { id: 'anxious', label: 'Anxious', emoji: '\u{1F630}' },
      { id: 'excited', label: 'Excited', emoji: '\u{1F929}' },
      { id: 'grateful', label: 'Grateful', emoji: '\u{1F64F}' }
    ];
    const FILTER_DEBOUNCE_MS = 300;
    const TOAST_MS = 3000;

    const moodPicker = document.getElementById('mood-picker');
    const journalText = document.getElementById('journal-text');
    const entrySubmit = document.getElementById('entry-submit');
    const entryMoodFilter = document.getElementById('entry-mood-filter');
    const entrySort = document.getElementById('entry-sort');
    const entryList = document.getElementById('entry-list');
    const entryEmpty = document.getElementById('entry-empty');
    const habitText = document.getElementById('habit-text');
    const habitAdd = document.getElementById('habit-add');
    const habitTabs = Array.from(document.querySelectorAll('#habit-tabs .tab'));
    const habitList = document.getElementById('habit-list');
    const habitEmpty = document.getElementById('habit-empty');
    const importBtn = document.getElementById('import-btn');
    const importFile = document.getElementById('import-file');
    const clearBtn = document.getElementById('clear-btn');
    const toasts = document.getElementById('toasts');

    let selectedMood = null;
    let habitFilter = 'all';

    const moodMeta = (id) => MOODS.find((mood) => mood.id === id);

    const toast = (message, type) => {
      const el = document.createElement('div');
      el.className = 'toast';
      el.dataset.type = type || 'info';
      el.textContent = message;
      el.addEventListener('click', () => el.remove());
      toasts.appendChild(el);
      setTimeout(() => el.remove(), TOAST_MS);
    };

    const debounce = (fn, delay) => {
      let timer = null;
      return (...args) => {
        clearTimeout(timer);
        timer = setTimeout(() => fn(...args), delay);
      };
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    const renderMoodPicker = () => {
      moodPicker.innerHTML = '';
      MOODS.forEach((mood) => {
        const btn = document.createElement('button');
        btn.type = 'button';
        btn.className = 'mood-btn';
        btn.dataset.mood = mood.id;
        btn.textContent = `${mood.emoji} ${mood.label}`;
        btn.addEventListener('click', () => {
          selectedMood = mood.id;
          moodPicker.querySelectorAll('.mood-btn').forEach((b) => {
            b.classList.toggle('selected', b.dataset.mood === mood.id);
          });
        });
        moodPicker.appendChild(btn);
      });

      MOODS.forEach((mood) => {
        const option = document.createElement('option');
        option.value = mood.id;
        option.textContent = `${mood.emoji} ${mood.label}`;
        entryMoodFilter.appendChild(option);
      });
    };

    const resetEntryForm = () => {
      selectedMood = null;
      journalText.value = '';
      moodPicker.querySelectorAll('.mood-btn').forEach((b) => b.classList.remove('selected'));
    };

    const renderEntries = (entries) => {
      entryList.innerHTML = '';
      entryEmpty.hidden = entries.length > 0;
      entries.forEach((entry) => {
        const meta = moodMeta(entry.mood);
        const item = document.createElement('li');
        item.className = 'entry-item';

        const head = document.createElement('div');
        head.className = 'entry-head';
        const mood = document.createElement('span');
        mood.className = 'entry-mood';
        mood.textContent = meta ? `${meta.emoji} ${meta.label}` : entry.mood;
        const when = document.createElement('span');
        when.textContent = new Date(entry.timestamp).toLocaleString();
        head.appendChild(mood);
        head.appendChild(when);
        item.appendChild(head);

        if (entry.journal) {
          const text = document.createElement('p');
          text.className = 'entry-text';
          // stored text is entity-escaped; innerHTML renders it back as plain text
          text.innerHTML = entry.journal;
          item.appendChild(text);
        }
        entryList.appendChild(item);
      });
    };

    const renderHabits = (habits) => {
      habitList.innerHTML = '';
      habitEmpty.hidden = habits.length > 0;
      habits.forEach((habit) => {
        const item = document.createElement('li');
        item.className = 'habit-item' + (habit.completed ? ' completed' : '');

        const checkbox = document.createElement('input');
        checkbox.type = 'checkbox';
        checkbox.id = `habit-${habit.id}`;
        checkbox.checked = habit.completed;
        checkbox.addEventListener('change', () => {
          toggleHabit(habit.id).catch((err) => {
            checkbox.checked = !checkbox.checked;
            toast(err.message, 'error');
          });
        });

        const label = document.createElement('label');
        label.htmlFor = checkbox.id;
        label.innerHTML = habit.text;

        const del = document.createElement('button');
        del.type = 'button';
        del.textContent = '✕';
        del.title = 'Delete habit';
        del.addEventListener('click', () => {
          if (!window.confirm('Delete this habit?')) {
            return;
          }
          deleteHabit(habit.id).catch((err) => toast(err.message, 'error'));
        });

        item.appendChild(checkbox);
        item.appendChild(label);
        item.appendChild(del);
        habitList.appendChild(item);
      });
    };

    const loadEntries = async () => {
      const params = new URLSearchParams({ mood: entryMoodFilter.value, sort: entrySort.value });
      const res = await request(`/api/entries?${params}`);
      renderEntries(await res.json());
    };

    const loadHabits = async () => {
      const params = new URLSearchParams({ filter: habitFilter });
      const res = await request(`/api/habits?${params}`);
      renderHabits(await res.json());
    };

    const loadStats = async () => {
      const res = await request('/api/stats');
      const stats = await res.json();
      document.getElementById('stat-total').textContent = stats.total_entries;
      document.getElementById('stat-streak').textContent = stats.current_streak;
      document.getElementById('stat-rate').textContent = `${stats.completion_rate}%`;
      document.getElementById('stat-mood').textContent =
        stats.mood_average === null ? '--' : stats.mood_average.toFixed(1);
    };

    const refresh = () => Promise.all([loadEntries(), loadHabits(), loadStats()]);

    const submitEntry = async () => {
      await request('/api/entries', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ mood: selectedMood, journal: journalText.value })
      });
      resetEntryForm();
      toast('Entry saved', 'ok');
      await refresh();
    };

    const addHabit = async () => {
      await request('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ text: habitText.value })
      });
      habitText.value = '';
      toast('Habit added', 'ok');
      await refresh();
    };

    const toggleHabit = async (id) => {
      await request(`/api/habits/${id}/toggle`, { method: 'POST' });
      await refresh();
    };

    const deleteHabit = async (id) => {
      await request(`/api/habits/${id}`, { method: 'DELETE' });
      toast('Habit deleted', 'ok');
      await refresh();
    };

    const importSnapshot = (file) => {
      const reader = new FileReader();
      reader.onerror = () => toast('Could not read the selected file', 'error');
      reader.onload = () => {
        request('/api/import', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: reader.result
        })
          .then(() => {
            toast('Journal imported', 'ok');
            return refresh();
          })
          .catch((err) => toast(err.message, 'error'));
      };
      reader.readAsText(file);
    };

    const reloadEntriesDebounced = debounce(() => {
      loadEntries().catch((err) => toast(err.message, 'error'));
    }, FILTER_DEBOUNCE_MS);

    const reloadHabitsDebounced = debounce(() => {
      loadHabits().catch((err) => toast(err.message, 'error'));
    }, FILTER_DEBOUNCE_MS);

    entrySubmit.addEventListener('click', () => {
      submitEntry().catch((err) => toast(err.message, 'error'));
    });

    habitAdd.addEventListener('click', () => {
      addHabit().catch((err) => toast(err.message, 'error'));
    });

    habitText.addEventListener('keydown', (event) => {
      if (event.key === 'Enter') {
        addHabit().catch((err) => toast(err.message, 'error'));
      }
    });

    entryMoodFilter.addEventListener('change', reloadEntriesDebounced);
    entrySort.addEventListener('change', reloadEntriesDebounced);

    habitTabs.forEach((tab) => {
      tab.addEventListener('click', () => {
        habitFilter = tab.dataset.filter;
        habitTabs.forEach((button) => {
          const isActive = button === tab;
          button.classList.toggle('active', isActive);
          button.setAttribute('aria-selected', String(isActive));
        });
        reloadHabitsDebounced();
      });
    });

    importBtn.addEventListener('click', () => importFile.click());
    importFile.addEventListener('change', () => {
      if (importFile.files.length > 0) {
        importSnapshot(importFile.files[0]);
        importFile.value = '';
      }
    });

    clearBtn.addEventListener('click', () => {
      if (!window.confirm('Delete every entry and habit? This cannot be undone.')) {
        return;
      }
      request('/api/clear', { method: 'POST' })
        .then(() => {
          toast('Journal cleared', 'ok');
          return refresh();
        })
        .catch((err) => toast(err.message, 'error'));
    });

    renderMoodPicker();
    refresh().catch((err) => toast(err.message, 'error'));
  </script>
</body>
</html>
"#;
