use crate::models::{GoalType, GoalView, StatsSummary};
use crate::palette::{adjust_brightness, display_percent};

pub fn render_index(views: &[GoalView], stats: &StatsSummary, categories: &[String]) -> String {
    let cards: String = views.iter().map(|view| render_goal_card(view)).collect();
    let options: String = categories
        .iter()
        .map(|category| format!(r#"<option value="{category}">{category}</option>"#))
        .collect();

    INDEX_HTML
        .replace("{{GOAL_CARDS}}", &cards)
        .replace("{{CATEGORY_OPTIONS}}", &options)
        .replace("{{COMPLETED}}", &stats.completed_count.to_string())
        .replace("{{IN_PROGRESS}}", &stats.in_progress_count.to_string())
        .replace("{{AVERAGE}}", &stats.average_progress_percent.to_string())
        .replace("{{TOTAL}}", &stats.total_count.to_string())
}

/// One goal card. The bar width uses the clamped display percentage;
/// the bar color is the goal's color darkened a notch for completed
/// goals so finished cards read as settled.
pub fn render_goal_card(view: &GoalView) -> String {
    let percent = display_percent(view.percent);
    let bar_color = if view.completed {
        adjust_brightness(&view.definition.color, -40)
    } else {
        view.definition.color.clone()
    };
    let track_color = adjust_brightness(&view.definition.color, 96);
    let done_button = if view.definition.kind == GoalType::Milestone && !view.completed {
        format!(
            r#"<form method="post" action="/goal/{id}/done"><button class="btn-done" type="submit">Mark Done</button></form>"#,
            id = view.definition.id
        )
    } else {
        String::new()
    };
    let badge = if view.completed {
        r#"<span class="badge">Completed</span>"#
    } else {
        ""
    };

    format!(
        r#"<article class="goal{done_class}" data-id="{id}" data-category="{category}">
  <header>
    <h2>{emoji} {name}</h2>
    {badge}
    <span class="count">{current}/{target} {unit}</span>
  </header>
  <div class="track" style="background:{track_color}">
    <div class="bar" style="width:{percent}%;background:{bar_color}"></div>
  </div>
  <footer>
    <span class="percent">{percent}%</span>
    <form method="post" action="/goal/{id}/sub"><button class="btn-sub" type="submit">&minus;{increment}</button></form>
    <form method="post" action="/goal/{id}/add"><button class="btn-add" type="submit">+{increment}</button></form>
    {done_button}
  </footer>
</article>
"#,
        done_class = if view.completed { " done" } else { "" },
        id = view.definition.id,
        category = view.definition.category,
        emoji = view.definition.emoji,
        name = view.definition.name,
        current = view.current,
        target = view.definition.target,
        unit = view.definition.unit,
        increment = view.definition.increment,
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Goal Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header.page {
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

    .subtitle {
      margin: 0;
      color: #5f5c57;
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
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.avg {
      color: var(--accent);
    }

    .controls {
      display: grid;
      grid-template-columns: 2fr 1fr 1fr 1fr;
      gap: 12px;
    }

    .controls input,
    .controls select {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.16);
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 0.95rem;
      font-family: inherit;
      background: white;
      color: var(--ink);
    }

    .goals {
      display: grid;
      gap: 16px;
    }

    .goal {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .goal.done {
      opacity: 0.78;
    }

    .goal header {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .goal h2 {
      margin: 0;
      font-size: 1.15rem;
      flex: 1;
    }

    .goal .count {
      color: #6b645d;
      font-size: 0.95rem;
      white-space: nowrap;
    }

    .badge {
      background: #2d7a4b;
      color: white;
      border-radius: 999px;
      padding: 3px 10px;
      font-size: 0.75rem;
      letter-spacing: 0.06em;
      text-transform: uppercase;
    }

    .track {
      width: 100%;
      height: 12px;
      border-radius: 999px;
      overflow: hidden;
    }

    .bar {
      height: 100%;
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .goal footer {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .goal .percent {
      flex: 1;
      font-weight: 600;
      color: var(--accent-2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 9px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.96);
    }

    .btn-add {
      background: var(--accent);
      color: white;
      box-shadow: 0 8px 18px rgba(255, 107, 74, 0.3);
    }

    .btn-sub {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 8px 18px rgba(47, 72, 88, 0.3);
    }

    .btn-done {
      background: #2d7a4b;
      color: white;
      box-shadow: 0 8px 18px rgba(45, 122, 75, 0.3);
    }

    .empty {
      text-align: center;
      color: #6b645d;
      padding: 24px 0;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
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
      .controls {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="page">
      <h1>Goal Tracker</h1>
      <p class="subtitle">Nudge each goal along, mark milestones done, watch the averages climb.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Completed</span>
        <span id="stat-completed" class="value">{{COMPLETED}}</span>
      </div>
      <div class="stat">
        <span class="label">In progress</span>
        <span id="stat-in-progress" class="value">{{IN_PROGRESS}}</span>
      </div>
      <div class="stat">
        <span class="label">Average</span>
        <span id="stat-average" class="value avg">{{AVERAGE}}%</span>
      </div>
      <div class="stat">
        <span class="label">Goals</span>
        <span id="stat-total" class="value">{{TOTAL}}</span>
      </div>
    </section>

    <section class="controls">
      <input id="search" type="search" placeholder="Search goals..." autocomplete="off" />
      <select id="filter">
        <option value="all">All</option>
        <option value="active">Active</option>
        <option value="completed">Completed</option>
      </select>
      <select id="category">
        <option value="all">Every category</option>
        {{CATEGORY_OPTIONS}}
      </select>
      <select id="sort">
        <option value="id">Default order</option>
        <option value="progress">Most progress</option>
        <option value="name">Name A&ndash;Z</option>
      </select>
    </section>

    <section class="goals" id="goals">
{{GOAL_CARDS}}
    </section>

    <p class="hint">Progress is clamped between zero and each goal's target and saved after every change.</p>
  </main>

  <script>
    const goalsEl = document.getElementById('goals');
    const searchEl = document.getElementById('search');
    const filterEl = document.getElementById('filter');
    const categoryEl = document.getElementById('category');
    const sortEl = document.getElementById('sort');

    const shade = (hex, delta) => {
      const match = /^#([0-9a-f]{6})$/i.exec(hex);
      if (!match) {
        return hex;
      }
      const channels = [0, 2, 4].map((i) => {
        const value = parseInt(match[1].slice(i, i + 2), 16) + delta;
        return Math.max(0, Math.min(255, value));
      });
      return '#' + channels.map((c) => c.toString(16).padStart(2, '0')).join('');
    };

    const clampPercent = (value) => Math.max(0, Math.min(100, Math.round(value)));

    const cardFor = (goal) => {
      const percent = clampPercent(goal.percent);
      const barColor = goal.completed ? shade(goal.color, -40) : goal.color;
      const card = document.createElement('article');
      card.className = goal.completed ? 'goal done' : 'goal';
      card.dataset.id = goal.id;

      const doneButton = goal.type === 'milestone' && !goal.completed
        ? '<button class="btn-done" data-action="done" type="button">Mark Done</button>'
        : '';
      const badge = goal.completed ? '<span class="badge">Completed</span>' : '';

      card.innerHTML = `
        <header>
          <h2>${goal.emoji} ${goal.name}</h2>
          ${badge}
          <span class="count">${goal.current}/${goal.target} ${goal.unit}</span>
        </header>
        <div class="track" style="background:${shade(goal.color, 96)}">
          <div class="bar" style="width:${percent}%;background:${barColor}"></div>
        </div>
        <footer>
          <span class="percent">${percent}%</span>
          <button class="btn-sub" data-action="sub" type="button">&minus;${goal.increment}</button>
          <button class="btn-add" data-action="add" type="button">+${goal.increment}</button>
          ${doneButton}
        </footer>
      `;
      return card;
    };

    const queryString = () => new URLSearchParams({
      filter: filterEl.value,
      category: categoryEl.value,
      search: searchEl.value,
      sort: sortEl.value
    }).toString();

    const loadGoals = async () => {
      const res = await fetch('/api/goals?' + queryString());
      if (!res.ok) {
        return;
      }
      const goals = await res.json();
      goalsEl.innerHTML = '';
      if (!goals.length) {
        goalsEl.innerHTML = '<p class="empty">No goals match.</p>';
        return;
      }
      goals.forEach((goal) => goalsEl.appendChild(cardFor(goal)));
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        return;
      }
      const stats = await res.json();
      document.getElementById('stat-completed').textContent = stats.completed_count;
      document.getElementById('stat-in-progress').textContent = stats.in_progress_count;
      document.getElementById('stat-average').textContent = stats.average_progress_percent + '%';
      document.getElementById('stat-total').textContent = stats.total_count;
    };

    const refresh = () => Promise.all([loadGoals(), loadStats()]);

    const mutate = async (goal, action) => {
      if (action === 'done') {
        await fetch('/api/complete', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ id: goal.dataset.id })
        });
      } else {
        const increment = parseInt(goal.querySelector('.btn-add').textContent.slice(1), 10) || 1;
        const delta = action === 'add' ? increment : -increment;
        await fetch('/api/adjust', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ id: goal.dataset.id, delta })
        });
      }
      await refresh();
    };

    goalsEl.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-action]');
      if (!button) {
        return;
      }
      const goal = button.closest('.goal');
      mutate(goal, button.dataset.action).catch(() => {});
    });

    searchEl.addEventListener('input', () => loadGoals().catch(() => {}));
    [filterEl, categoryEl, sortEl].forEach((el) => {
      el.addEventListener('change', () => loadGoals().catch(() => {}));
    });

    refresh().catch(() => {});
  </script>
</body>
</html>
"#;
