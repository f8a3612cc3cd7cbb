use crate::form::FormInput;
use crate::models::ForecastResponse;
use crate::series::{MAX_DAYS, MAX_DAYS_AHEAD, MIN_DAYS, MIN_DAYS_AHEAD};
use chrono::NaiveDate;

pub fn render_index(
    today: NaiveDate,
    default_consumption: f64,
    form: &FormInput,
    report: &ForecastResponse,
) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{DEFAULT_CONSUMPTION}}", &default_consumption.to_string())
        .replace("{{MIN_DAYS}}", &MIN_DAYS.to_string())
        .replace("{{MAX_DAYS}}", &MAX_DAYS.to_string())
        .replace("{{MIN_AHEAD}}", &MIN_DAYS_AHEAD.to_string())
        .replace("{{MAX_AHEAD}}", &MAX_DAYS_AHEAD.to_string())
        .replace("{{DAYS}}", &form.days.to_string())
        .replace("{{DAYS_AHEAD}}", &form.days_ahead.to_string())
        .replace("{{ROWS}}", &render_rows(form))
        .replace("{{TABLE}}", &render_table(report))
        .replace("{{CHART}}", &report.chart_svg)
        .replace("{{PREDICTION}}", &report.prediction.label)
}

fn render_rows(form: &FormInput) -> String {
    let mut html = String::new();
    for (index, row) in form.rows.iter().enumerate() {
        html.push_str(&format!(
            r#"<div class="entry" data-index="{index}">
          <label>Date {number}<input type="date" name="date_{index}" value="{date}" required /></label>
          <label>Consumption (kWh)<input type="number" name="consumption_{index}" value="{consumption}" min="0" step="any" required /></label>
        </div>
        "#,
            number = index + 1,
            date = row.date,
            consumption = row.consumption,
        ));
    }
    html
}

fn render_table(report: &ForecastResponse) -> String {
    let mut html = String::new();
    for row in &report.table {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            row.date, row.day_offset, row.consumption
        ));
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Energy Forecast</title>
  <style>
    :root {
      --bg-1: #eef4ec;
      --bg-2: #c9e4d2;
      --ink: #22302a;
      --accent: #2f9e6b;
      --accent-2: #2f4858;
      --forecast: #f08c2e;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4f9f2 60%, #ffffff 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #6b645d;
    }

    input {
      font: inherit;
      font-size: 1rem;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      text-transform: none;
      letter-spacing: normal;
      color: var(--ink);
    }

    .entries {
      display: grid;
      gap: 10px;
      max-height: 360px;
      overflow-y: auto;
      padding-right: 6px;
    }

    .entry {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 12px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 158, 107, 0.3);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 6px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-trend {
      stroke: var(--accent-2);
      stroke-width: 2;
      stroke-dasharray: 6 6;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-forecast {
      fill: var(--forecast);
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-axis {
      stroke: rgba(47, 72, 88, 0.25);
      stroke-dasharray: 4 6;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-label-forecast {
      fill: var(--forecast);
      font-weight: 600;
    }

    .prediction {
      background: #e6f6ec;
      color: #1f6b45;
      border-radius: 16px;
      padding: 16px 18px;
      font-weight: 600;
    }

    .status {
      min-height: 1.2em;
      color: #c63b2b;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .entry {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Daily Energy Consumption Tracker &amp; Forecast</h1>
      <p class="subtitle">Track your daily energy use and predict future consumption.</p>
    </header>

    <form id="forecast-form" method="post" action="/forecast">
      <section>
        <h2>Manual entry</h2>
        <div class="controls">
          <label>Days of data
            <input id="days" type="number" name="days" value="{{DAYS}}" min="{{MIN_DAYS}}" max="{{MAX_DAYS}}" step="1" required />
          </label>
          <label>Days ahead to predict: <span id="days-ahead-value">{{DAYS_AHEAD}}</span>
            <input id="days-ahead" type="range" name="days_ahead" value="{{DAYS_AHEAD}}" min="{{MIN_AHEAD}}" max="{{MAX_AHEAD}}" step="1" />
          </label>
        </div>
      </section>
      <section class="entries" id="entries">
        {{ROWS}}
      </section>
      <noscript><button type="submit">Update forecast</button></noscript>
    </form>

    <section>
      <h2>Energy data</h2>
      <div class="card">
        <table>
          <thead><tr><th>Date</th><th>Day</th><th>Consumption (kWh)</th></tr></thead>
          <tbody id="table-body">{{TABLE}}</tbody>
        </table>
      </div>
    </section>

    <section>
      <h2>Energy consumption over time</h2>
      <div class="card" id="chart">{{CHART}}</div>
    </section>

    <section>
      <h2>Forecast future consumption</h2>
      <div class="prediction" id="prediction">{{PREDICTION}}</div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const TODAY = '{{TODAY}}';
    const DEFAULT_CONSUMPTION = {{DEFAULT_CONSUMPTION}};
    const form = document.getElementById('forecast-form');
    const daysEl = document.getElementById('days');
    const aheadEl = document.getElementById('days-ahead');
    const aheadValueEl = document.getElementById('days-ahead-value');
    const entriesEl = document.getElementById('entries');
    const tableBody = document.getElementById('table-body');
    const chartEl = document.getElementById('chart');
    const predictionEl = document.getElementById('prediction');
    const statusEl = document.getElementById('status');

    const clamp = (value, min, max) => Math.min(Math.max(value, min), max);

    const defaultDate = (count, index) => {
      const date = new Date(TODAY + 'T00:00:00Z');
      date.setUTCDate(date.getUTCDate() - (count - index));
      return date.toISOString().slice(0, 10);
    };

    const resizeEntries = () => {
      const count = clamp(parseInt(daysEl.value, 10) || {{MIN_DAYS}}, {{MIN_DAYS}}, {{MAX_DAYS}});
      const rows = Array.from(entriesEl.querySelectorAll('.entry'));
      rows.slice(count).forEach((row) => row.remove());
      for (let index = rows.length; index < count; index += 1) {
        const row = document.createElement('div');
        row.className = 'entry';
        row.dataset.index = index;
        row.innerHTML = `
          <label>Date ${index + 1}<input type="date" name="date_${index}" value="${defaultDate(count, index)}" required /></label>
          <label>Consumption (kWh)<input type="number" name="consumption_${index}" value="${DEFAULT_CONSUMPTION}" min="0" step="any" required /></label>`;
        entriesEl.appendChild(row);
      }
    };

    const collect = () => {
      const samples = Array.from(entriesEl.querySelectorAll('.entry')).map((row) => {
        const index = row.dataset.index;
        return {
          date: row.querySelector(`[name="date_${index}"]`).value,
          consumption: Math.max(parseFloat(row.querySelector(`[name="consumption_${index}"]`).value) || 0, 0)
        };
      });
      return { samples, days_ahead: parseInt(aheadEl.value, 10) };
    };

    const render = (report) => {
      tableBody.innerHTML = report.table
        .map((row) => `<tr><td>${row.date}</td><td>${row.day_offset}</td><td>${row.consumption.toFixed(2)}</td></tr>`)
        .join('');
      chartEl.innerHTML = report.chart_svg;
      predictionEl.textContent = report.prediction.label;
    };

    const refresh = async () => {
      const res = await fetch('/api/forecast', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(collect())
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Forecast failed');
      }
      render(await res.json());
      statusEl.textContent = '';
    };

    const update = () => refresh().catch((err) => { statusEl.textContent = err.message; });

    daysEl.addEventListener('change', () => {
      resizeEntries();
      update();
    });
    aheadEl.addEventListener('input', () => {
      aheadValueEl.textContent = aheadEl.value;
      update();
    });
    entriesEl.addEventListener('change', update);
    form.addEventListener('submit', (event) => {
      event.preventDefault();
      update();
    });
  </script>
</body>
</html>
"#;
