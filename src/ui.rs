use crate::dashboard::DashboardSnapshot;
use crate::page::{Content, WidgetId};
use crate::widgets::escape_html;

pub fn render_index(snapshot: &DashboardSnapshot) -> String {
    let mut html = INDEX_HTML.replace("{{THEME}}", snapshot.theme.as_str());

    for id in WidgetId::ALL {
        let rendered = match snapshot.widgets.widget(id).map(|w| &w.content) {
            Some(Content::Text(text)) => escape_html(text),
            Some(Content::Markup(markup)) => markup.clone(),
            _ => String::new(),
        };
        html = html.replace(&format!("{{{{{}}}}}", id.dom_id()), &rendered);
    }

    let payload = serde_json::to_string(snapshot)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    html.replace("{{SNAPSHOT}}", &payload)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pulse Dashboard</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" />
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
  <style>
    :root {
      --primary: #4361ee;
      --light-color: #f8f9fa;
      --dark-color: #212529;
      --gray-200: #e9ecef;
      --gray-300: #dee2e6;
      --gray-500: #adb5bd;
      --gray-600: #6c757d;
      --card: #ffffff;
      --bg: #f4f6fb;
      --transition: all 0.2s ease;
    }

    [data-theme="dark"] {
      --light-color: #1e1e2d;
      --dark-color: #f8f9fa;
      --gray-200: #2b2b40;
      --gray-300: #3f4254;
      --gray-600: #a1a5b7;
      --card: #1e1e2d;
      --bg: #151521;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      font-family: "Inter", "Segoe UI", sans-serif;
      background: var(--bg);
      color: var(--dark-color);
      display: flex;
      min-height: 100vh;
    }

    .sidebar {
      width: 240px;
      background: var(--card);
      border-right: 1px solid var(--gray-200);
      padding: 24px 18px;
      transition: var(--transition);
    }

    .sidebar h2 { margin: 0 0 24px; font-size: 1.2rem; color: var(--primary); }

    main { flex: 1; padding: 24px 32px; display: grid; gap: 24px; align-content: start; }

    header { display: flex; align-items: center; gap: 12px; }
    header h1 { margin: 0; font-size: 1.5rem; flex: 1; }

    button, select {
      font: inherit;
      color: inherit;
      background: var(--card);
      border: 1px solid var(--gray-300);
      border-radius: 8px;
      padding: 6px 12px;
      cursor: pointer;
    }

    .sidebar-toggle { display: none; }

    .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px; }

    .card {
      background: var(--card);
      border-radius: 12px;
      padding: 18px;
      border: 1px solid var(--gray-200);
    }

    .card .label { font-size: 0.8rem; text-transform: uppercase; color: var(--gray-600); letter-spacing: 0.08em; }
    .card .value { font-size: 1.7rem; font-weight: 600; margin-top: 6px; }

    .charts { display: grid; grid-template-columns: 2fr 1fr; gap: 16px; }
    .chart-box { height: 300px; position: relative; }
    .chart-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px; }
    .chart-header h3 { margin: 0; font-size: 1rem; }
    .chart-actions { display: flex; gap: 6px; }
    .chart-actions button.active { background: var(--primary); color: #fff; border-color: var(--primary); }

    .panels { display: grid; grid-template-columns: 2fr 1fr 1fr; gap: 16px; }

    table { width: 100%; border-collapse: collapse; }
    td, th { padding: 10px 8px; border-bottom: 1px solid var(--gray-200); text-align: left; font-size: 0.9rem; }
    .d-flex { display: flex; }
    .align-center { align-items: center; }

    .user-avatar { width: 30px; height: 30px; border-radius: 50%; margin-right: 0.75rem; object-fit: cover; }

    .btn-icon {
      background: none;
      border: none;
      color: var(--gray-500);
      width: 32px;
      height: 32px;
      border-radius: 6px;
      display: flex;
      align-items: center;
      justify-content: center;
      transition: var(--transition);
    }

    .btn-icon:hover { background: var(--gray-200); color: var(--dark-color); }

    .status { padding: 3px 10px; border-radius: 999px; font-size: 0.75rem; text-transform: capitalize; }
    .status.completed { background: rgba(75, 181, 67, 0.15); color: #4bb543; }
    .status.pending { background: rgba(249, 199, 79, 0.2); color: #c99a1c; }
    .status.failed { background: rgba(239, 71, 111, 0.15); color: #ef476f; }

    .product-item { display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid var(--gray-200); }
    .product-name { font-weight: 600; }
    .product-sales { font-size: 0.8rem; color: var(--gray-600); }

    .traffic-source { margin-bottom: 14px; }
    .source-header { display: flex; justify-content: space-between; font-size: 0.9rem; margin-bottom: 6px; }
    .progress-bar { height: 6px; background: var(--gray-200); border-radius: 999px; overflow: hidden; }
    .progress { height: 100%; border-radius: 999px; }

    .covid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; }
    .muted { color: var(--gray-600); font-size: 0.8rem; }

    .fade-in { animation: fade 400ms ease; }

    @keyframes fade { from { opacity: 0; } to { opacity: 1; } }

    @media (max-width: 992px) {
      .sidebar { position: fixed; left: -260px; top: 0; bottom: 0; z-index: 10; }
      .sidebar.active { left: 0; }
      .sidebar-toggle { display: block; }
      .charts, .panels { grid-template-columns: 1fr; }
    }
  </style>
</head>
<body>
  <aside class="sidebar" id="sidebar">
    <h2><i class="fas fa-chart-pie"></i> Pulse</h2>
    <p class="muted">Analytics overview</p>
  </aside>

  <main>
    <header>
      <button class="sidebar-toggle" id="sidebar-toggle"><i class="fas fa-bars"></i></button>
      <h1>Dashboard</h1>
      <button class="date-range"><i class="far fa-calendar"></i> <span id="date-range">{{date-range}}</span></button>
      <button id="counter-replay" title="Replay counters"><i class="fas fa-rotate"></i></button>
      <button class="theme-toggle" id="theme-toggle">{{theme-toggle}}</button>
    </header>

    <section class="cards">
      <div class="card"><div class="label">Total users</div><div class="value" id="total-users">{{total-users}}</div></div>
      <div class="card"><div class="label">Revenue</div><div class="value" id="revenue">{{revenue}}</div></div>
      <div class="card"><div class="label">Engagement</div><div class="value" id="engagement">{{engagement}}</div></div>
      <div class="card"><div class="label">New orders</div><div class="value" id="new-orders">{{new-orders}}</div></div>
    </section>

    <section class="charts">
      <div class="card">
        <div class="chart-header">
          <h3>Performance</h3>
          <div class="chart-actions" id="performance-filter">{{performance-filter}}</div>
        </div>
        <div class="chart-box"><canvas id="line-chart"></canvas></div>
      </div>
      <div class="card">
        <div class="chart-header">
          <h3>Revenue by category</h3>
          <select class="chart-filter" id="revenue-filter">
            <option>This Year</option>
            <option>Last Month</option>
            <option>This Month</option>
          </select>
        </div>
        <div class="chart-box"><canvas id="doughnut-chart"></canvas></div>
      </div>
    </section>

    <section class="panels">
      <div class="card">
        <div class="chart-header"><h3>Recent activity</h3></div>
        <table>
          <thead><tr><th>ID</th><th>User</th><th>Action</th><th>Time</th><th>Status</th><th></th></tr></thead>
          <tbody id="activity-body">{{activity-body}}</tbody>
        </table>
      </div>
      <div class="card">
        <div class="chart-header"><h3>Top products</h3></div>
        <div id="top-products">{{top-products}}</div>
      </div>
      <div class="card">
        <div class="chart-header"><h3>Traffic sources</h3></div>
        <div id="traffic-sources">{{traffic-sources}}</div>
      </div>
    </section>

    <section class="card">
      <div class="chart-header">
        <h3>Disease statistics</h3>
        <select id="covid-country">
          <option value="global">Global</option>
          <option value="usa">United States</option>
          <option value="uk">United Kingdom</option>
          <option value="de">Germany</option>
          <option value="in">India</option>
          <option value="br">Brazil</option>
        </select>
      </div>
      <div class="covid">
        <div><div class="label muted">Confirmed</div><div class="value" id="covid-confirmed">{{covid-confirmed}}</div></div>
        <div><div class="label muted">Recovered</div><div class="value" id="covid-recovered">{{covid-recovered}}</div></div>
        <div><div class="label muted">Deaths</div><div class="value" id="covid-deaths">{{covid-deaths}}</div></div>
      </div>
      <p class="muted" id="covid-updated">{{covid-updated}}</p>
    </section>
  </main>

  <script>
    const initial = {{SNAPSHOT}};
    const charts = {};
    let polling = false;

    const group = (value) => {
      const [whole, fraction] = String(value).split('.');
      const grouped = whole.replace(/\B(?=(\d{3})+(?!\d))/g, ',');
      return fraction ? `${grouped}.${fraction}` : grouped;
    };
    const currency = (value) => (value < 0 ? `-$${group(-value)}` : `$${group(value)}`);

    const withCallbacks = (config) => {
      const options = config.options;
      if (config.type === 'line') {
        Object.values(options.scales).forEach((scale) => {
          if (scale.ticks && scale.ticks.format) {
            const fmt = scale.ticks.format === 'currency' ? currency : group;
            scale.ticks.callback = (value) => fmt(value);
          }
        });
        options.plugins.tooltip.callbacks = {
          label: (ctx) => {
            let label = ctx.dataset.label || '';
            if (label) label += ': ';
            if (ctx.parsed.y !== null) label += ctx.dataset.currency ? currency(ctx.parsed.y) : group(ctx.parsed.y);
            return label;
          }
        };
      } else {
        options.plugins.tooltip.callbacks = {
          label: (ctx) => {
            const value = ctx.raw || 0;
            const total = ctx.dataset.data.reduce((a, b) => a + b, 0);
            const pct = total === 0 ? 0 : Math.round((value / total) * 100);
            return `${ctx.label || ''}: ${group(value)}% (${pct}% of total)`;
          }
        };
      }
      return config;
    };

    const renderChart = (id, canvas, config) => {
      if (typeof Chart === 'undefined') return;
      const existing = charts[id];
      if (existing && existing.meta.id === config.meta.id) {
        if (existing.meta.revision !== config.meta.revision) {
          existing.chart.options = withCallbacks(config).options;
          existing.chart.update();
          existing.meta = config.meta;
        }
        return;
      }
      if (existing) existing.chart.destroy();
      charts[id] = { meta: config.meta, chart: new Chart(canvas.getContext('2d'), withCallbacks(config)) };
    };

    const apply = (snapshot) => {
      if (!snapshot) return;
      document.documentElement.setAttribute('data-theme', snapshot.theme);
      Object.entries(snapshot.widgets).forEach(([id, widget]) => {
        const el = document.getElementById(id);
        if (!el) return;
        const { kind, value } = widget.content;
        if (kind === 'text') {
          if (el.tagName === 'SELECT') el.value = value;
          else el.textContent = value;
        } else if (kind === 'markup') {
          el.innerHTML = value;
        } else if (kind === 'chart') {
          renderChart(id, el, value);
        }
        if (id === 'sidebar') el.classList.toggle('active', widget.classes.includes('active'));
      });
      if (snapshot.counter_running && !polling) {
        polling = true;
        requestAnimationFrame(poll);
      }
    };

    const poll = async () => {
      try {
        const res = await fetch('/api/dashboard');
        const snapshot = await res.json();
        polling = false;
        apply(snapshot);
      } catch (err) {
        polling = false;
        console.error('dashboard refresh failed', err);
      }
    };

    const post = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        console.error(await res.text());
        return;
      }
      apply(await res.json());
    };

    document.getElementById('theme-toggle').addEventListener('click', () => post('/api/theme/toggle'));
    document.getElementById('sidebar-toggle').addEventListener('click', () => post('/api/sidebar/toggle'));
    document.querySelector('.date-range').addEventListener('click', () => post('/api/date-range/next'));
    document.getElementById('counter-replay').addEventListener('click', () => post('/api/counter/replay'));
    document.getElementById('performance-filter').addEventListener('click', (event) => {
      const button = event.target.closest('button');
      if (button) post('/api/filters', { chart: 'performance', value: button.textContent });
    });
    document.getElementById('revenue-filter').addEventListener('change', (event) => {
      post('/api/filters', { chart: 'revenue', value: event.target.value });
    });
    document.getElementById('covid-country').addEventListener('change', (event) => {
      post('/api/country', { country: event.target.value });
    });

    apply(initial);
  </script>
</body>
</html>
"#;
