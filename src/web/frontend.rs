//! Embedded HTML/CSS/JS frontend for the tally web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>tally Dashboard</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --purple: #bc8cff;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 24px; font-weight: 600; }
header h1 .logo { color: var(--accent); font-family: var(--mono); font-weight: 700; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.badge {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  padding: 4px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 500;
  background: var(--surface);
  border: 1px solid var(--border);
}
.badge.ok { border-color: var(--green); color: var(--green); }
.badge.warn { border-color: var(--yellow); color: var(--yellow); }

/* Filter bar */
.filters {
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
  align-items: center;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 12px;
  margin-bottom: 24px;
}
.filters input, .filters select {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 6px 10px;
  font-size: 13px;
}
.filters button, .filters a.btn {
  padding: 6px 14px;
  border: none;
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  font-size: 13px;
  font-weight: 500;
  cursor: pointer;
  text-decoration: none;
}
.filters button.secondary, .filters a.btn.secondary {
  background: transparent;
  border: 1px solid var(--border);
  color: var(--text-muted);
}

/* Stats grid */
.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
  gap: 16px;
  margin-bottom: 24px;
}
.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  text-align: center;
}
.stat-card .value {
  font-size: 30px;
  font-weight: 700;
  font-family: var(--mono);
  color: var(--accent);
  line-height: 1.1;
}
.stat-card .value.green { color: var(--green); }
.stat-card .value.purple { color: var(--purple); }
.stat-card .value.yellow { color: var(--yellow); }
.stat-card .label {
  font-size: 12px;
  color: var(--text-muted);
  margin-top: 6px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

/* Cards and tables */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 16px; }
.grid2 { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
@media (max-width: 800px) { .grid2 { grid-template-columns: 1fr; } }

table { width: 100%; border-collapse: collapse; font-size: 13px; }
th {
  text-align: left;
  color: var(--text-muted);
  font-weight: 500;
  padding: 6px 8px;
  border-bottom: 1px solid var(--border);
}
td { padding: 6px 8px; border-bottom: 1px solid var(--border); }
td.num, th.num { text-align: right; font-family: var(--mono); }
tr:last-child td { border-bottom: none; }

/* Trend bars */
.trend-row { display: flex; align-items: center; gap: 10px; margin-bottom: 6px; }
.trend-row .date { width: 90px; color: var(--text-muted); font-family: var(--mono); font-size: 12px; }
.trend-row .bar-track { flex: 1; background: var(--bg); border-radius: 4px; height: 18px; position: relative; }
.trend-row .bar { background: var(--accent); opacity: 0.5; height: 100%; border-radius: 4px; }
.trend-row .bar.done { background: var(--green); opacity: 0.9; position: absolute; top: 0; left: 0; }
.trend-row .count { width: 70px; text-align: right; font-family: var(--mono); font-size: 12px; }

/* Status distribution */
.status-bar { display: flex; height: 22px; border-radius: 6px; overflow: hidden; margin-bottom: 10px; }
.status-bar .seg.complete { background: var(--green); }
.status-bar .seg.progress { background: var(--yellow); }
.status-bar .seg.incomplete { background: var(--red); }
.legend { display: flex; gap: 16px; font-size: 12px; color: var(--text-muted); }
.legend .dot { display: inline-block; width: 9px; height: 9px; border-radius: 50%; margin-right: 4px; }

/* Insight panel */
#insight-body { white-space: pre-wrap; font-size: 13px; color: var(--text); }
#insight-body:empty::before { content: "No analysis yet."; color: var(--text-muted); }
.card .actions { display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px; }
.card .actions button {
  padding: 6px 14px; border: none; border-radius: 6px;
  background: var(--purple); color: #fff; font-size: 13px; cursor: pointer;
}
.muted { color: var(--text-muted); font-size: 12px; }
</style>
</head>
<body>
<div class="app">
  <header>
    <div>
      <h1><span class="logo">tally</span> Productivity Dashboard</h1>
      <div class="subtitle">Daily logs, KPIs, and team insights</div>
    </div>
    <span class="badge" id="health-badge">…</span>
  </header>

  <div class="filters">
    <input type="date" id="f-start">
    <input type="date" id="f-end">
    <select id="f-dept"><option value="">All departments</option></select>
    <input type="text" id="f-employee" placeholder="Employee name">
    <button onclick="applyFilters()">Apply</button>
    <button class="secondary" onclick="clearFilters()">Clear</button>
    <a class="btn secondary" id="export-link" href="/api/export.csv">Export CSV</a>
  </div>

  <div class="stats-grid">
    <div class="stat-card"><div class="value" id="kpi-tasks">–</div><div class="label">Total Tasks</div></div>
    <div class="stat-card"><div class="value green" id="kpi-completion">–</div><div class="label">Completion Rate</div></div>
    <div class="stat-card"><div class="value purple" id="kpi-hours">–</div><div class="label">Total Hours</div></div>
    <div class="stat-card"><div class="value yellow" id="kpi-util">–</div><div class="label">Utilization</div></div>
  </div>

  <div class="grid2">
    <div class="card">
      <h2>Department Performance</h2>
      <table>
        <thead><tr><th>Department</th><th class="num">Tasks</th><th class="num">Complete</th><th class="num">Util</th></tr></thead>
        <tbody id="dept-rows"></tbody>
      </table>
    </div>
    <div class="card">
      <h2>Employee Leaderboard</h2>
      <table>
        <thead><tr><th>#</th><th>Employee</th><th class="num">Done</th><th class="num">Avg hrs</th><th class="num">Util</th></tr></thead>
        <tbody id="leader-rows"></tbody>
      </table>
    </div>
  </div>

  <div class="grid2">
    <div class="card">
      <h2>Last 7 Days</h2>
      <div id="trend-rows"></div>
    </div>
    <div class="card">
      <h2>Status &amp; Data Quality</h2>
      <div class="status-bar" id="status-bar"></div>
      <div class="legend">
        <span><span class="dot" style="background:var(--green)"></span>Complete <b id="st-complete">0</b></span>
        <span><span class="dot" style="background:var(--yellow)"></span>In Progress <b id="st-progress">0</b></span>
        <span><span class="dot" style="background:var(--red)"></span>Incomplete <b id="st-incomplete">0</b></span>
      </div>
      <p class="muted" style="margin-top:12px">
        Form completeness <b id="dq-complete">–</b> ·
        Missing time entries <b id="dq-missing">–</b>
      </p>
    </div>
  </div>

  <div class="card">
    <div class="actions">
      <h2 style="margin-bottom:0">AI Insights</h2>
      <button id="insight-btn" onclick="generateInsight()">Generate</button>
    </div>
    <div id="insight-body"></div>
  </div>
</div>

<script>
const $ = (id) => document.getElementById(id);

const DEPARTMENTS = ["Data Management","Accounts/Finance","Admin/HR","IT","HSE",
  "Procurement","Maintenance","Janitorial","Inventory","Coring/Wellsite","Iso",
  "Environmental","Reception","CT/Imaging/Gamma","Rockshop","PVT/GC",
  "Scal/Routine","Business Development","Security"];

function filterQuery() {
  const params = new URLSearchParams();
  if ($('f-start').value) params.set('start', $('f-start').value);
  if ($('f-end').value) params.set('end', $('f-end').value);
  if ($('f-dept').value) params.set('department', $('f-dept').value);
  if ($('f-employee').value.trim()) params.set('employee', $('f-employee').value.trim());
  const q = params.toString();
  return q ? '?' + q : '';
}

function esc(s) {
  const div = document.createElement('div');
  div.textContent = String(s);
  return div.innerHTML;
}

async function loadMetrics() {
  const q = filterQuery();
  $('export-link').href = '/api/export.csv' + q;
  const resp = await fetch('/api/metrics' + q);
  if (!resp.ok) return;
  const m = await resp.json();
  renderSummary(m.executive_summary);
  renderDepartments(m.departments);
  renderLeaderboard(m.leaderboard);
  renderTrend(m.trend);
  renderStatus(m.status_distribution);
  renderQuality(m.data_quality);
}

function renderSummary(s) {
  $('kpi-tasks').textContent = s.total_tasks;
  $('kpi-completion').textContent = s.completion_rate.toFixed(1) + '%';
  $('kpi-hours').textContent = s.total_hours.toFixed(1);
  $('kpi-util').textContent = s.overall_utilization_rate.toFixed(1) + '%';
}

function renderDepartments(rows) {
  $('dept-rows').innerHTML = rows.map(d =>
    `<tr><td>${esc(d.department)}</td><td class="num">${d.total_tasks}</td>` +
    `<td class="num">${d.completion_rate.toFixed(1)}%</td>` +
    `<td class="num">${d.utilization_rate.toFixed(1)}%</td></tr>`
  ).join('') || '<tr><td colspan="4" class="muted">No data</td></tr>';
}

function renderLeaderboard(rows) {
  $('leader-rows').innerHTML = rows.map((e, i) =>
    `<tr><td>${i + 1}</td><td>${esc(e.name)}</td>` +
    `<td class="num">${e.completed_tasks}</td>` +
    `<td class="num">${e.avg_task_duration.toFixed(2)}</td>` +
    `<td class="num">${e.utilization_rate.toFixed(1)}%</td></tr>`
  ).join('') || '<tr><td colspan="5" class="muted">No data</td></tr>';
}

function renderTrend(points) {
  const max = Math.max(1, ...points.map(p => p.total_tasks));
  $('trend-rows').innerHTML = points.map(p =>
    `<div class="trend-row"><span class="date">${p.date}</span>` +
    `<span class="bar-track"><span class="bar" style="width:${(p.total_tasks / max) * 100}%"></span>` +
    `<span class="bar done" style="width:${(p.completed_tasks / max) * 100}%"></span></span>` +
    `<span class="count">${p.completed_tasks}/${p.total_tasks}</span></div>`
  ).join('');
}

function renderStatus(d) {
  const total = d.complete + d.in_progress + d.incomplete;
  $('st-complete').textContent = d.complete;
  $('st-progress').textContent = d.in_progress;
  $('st-incomplete').textContent = d.incomplete;
  const seg = (n, cls) => total
    ? `<span class="seg ${cls}" style="width:${(n / total) * 100}%"></span>` : '';
  $('status-bar').innerHTML =
    seg(d.complete, 'complete') + seg(d.in_progress, 'progress') + seg(d.incomplete, 'incomplete');
}

function renderQuality(q) {
  $('dq-complete').textContent = q.form_completeness_score.toFixed(1) + '%';
  $('dq-missing').textContent = q.missing_time_entries_pct.toFixed(1) + '%';
}

async function loadHealth() {
  const badge = $('health-badge');
  try {
    const h = await (await fetch('/api/health')).json();
    badge.textContent = h.log_count + ' logs';
    badge.className = 'badge ' + (h.log_count > 0 ? 'ok' : 'warn');
  } catch {
    badge.textContent = 'offline';
    badge.className = 'badge';
  }
}

async function loadInsight() {
  const resp = await fetch('/api/insights');
  if (resp.ok) {
    const data = await resp.json();
    $('insight-body').textContent = data.insight;
  }
}

async function generateInsight() {
  const btn = $('insight-btn');
  btn.disabled = true;
  btn.textContent = 'Generating…';
  try {
    const resp = await fetch('/api/insights', { method: 'POST' });
    const data = await resp.json();
    $('insight-body').textContent = resp.ok ? data.insight : 'Error: ' + data.error;
  } catch (e) {
    $('insight-body').textContent = 'Error: ' + e;
  } finally {
    btn.disabled = false;
    btn.textContent = 'Generate';
  }
}

function applyFilters() { loadMetrics(); }
function clearFilters() {
  ['f-start', 'f-end', 'f-employee'].forEach(id => $(id).value = '');
  $('f-dept').value = '';
  loadMetrics();
}

// Boot
for (const d of DEPARTMENTS) {
  const opt = document.createElement('option');
  opt.value = d;
  opt.textContent = d;
  $('f-dept').appendChild(opt);
}
loadMetrics();
loadHealth();
loadInsight();
</script>
</body>
</html>
"##;
