//! Single-page UI served at `/`

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
    <title>Employee Salary Predictor</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 1000px;
            margin: 0 auto;
            padding: 20px;
            background: #f7f7f7;
            color: #222;
        }
        h1 { color: #22a7be; text-align: center; }
        .section {
            background: #fff;
            padding: 20px;
            border-radius: 12px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
        label { display: block; font-weight: 600; margin-bottom: 4px; }
        select, input { width: 100%; padding: 6px; box-sizing: border-box; }
        .badge {
            margin-top: 10px; padding: 8px;
            background: #9b3655; color: #fff;
            border-left: 6px solid #ff4b4b;
        }
        .tips { background: #9b3655; color: #fff; padding: 10px; border-radius: 8px; }
        .result { font-size: 1.6em; color: #2e7d32; }
        .warning { color: #b26a00; }
        .error { color: #c62828; }
        .bar { height: 18px; background: #22a7be; margin: 4px 0; }
        .metrics { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; }
        .metric { background: #f0f8fa; padding: 10px; border-radius: 6px; }
        table { width: 100%; border-collapse: collapse; font-size: 0.85em; }
        th, td { border-bottom: 1px solid #ddd; padding: 4px; text-align: left; }
        .note { font-size: 0.85em; color: #666; }
        button { padding: 10px 24px; background: #22a7be; color: #fff; border: 0; border-radius: 6px; }
    </style>
</head>
<body>
    <h1>💼 Monthly Employee Salary Predictor</h1>

    <div class="section">
        <div class="tips"><strong>💡 Tips for better predictions</strong><ul id="tips"></ul></div>
    </div>

    <div class="section">
        <h2>👤 Personal Information</h2>
        <div class="grid">
            <div><label for="age">Age</label><input id="age" type="number" value="30"></div>
            <div><label for="gender">Gender</label><select id="gender"></select></div>
        </div>
        <h2>🎓 Professional Details</h2>
        <div class="grid">
            <div><label for="education">Education Level</label><select id="education"></select></div>
            <div><label for="job">Job Title</label><select id="job"></select></div>
        </div>
        <h2>📈 Experience</h2>
        <label for="years">Years of Experience: <span id="years-value">5</span></label>
        <input id="years" type="range" value="5">
        <div class="badge">🏅 <strong id="tier">Mid-Junior Level</strong></div>
        <h3>💡 Career Growth Insight</h3>
        <p id="insight"></p>
        <p>
            <label for="currency">Currency</label>
            <select id="currency"><option value="INR">₹ (INR)</option><option value="USD">$ (USD)</option></select>
        </p>
        <button id="predict">Predict Salary</button>
        <div id="outcome"></div>
    </div>

    <div class="section">
        <h2>📊 Model Performance Metrics</h2>
        <div class="metrics" id="metrics"></div>
        <p class="note">Reported by offline training; not computed by this service.</p>
    </div>

    <div class="section">
        <h2>🗂 Evaluation History</h2>
        <p class="note">"Actual Salary" is simulated (prediction plus random noise), not a measured outcome.</p>
        <div id="summary"></div>
        <div id="history"></div>
        <h3>📉 Residual Plot (Prediction Errors)</h3>
        <svg id="residuals" width="100%" height="260" viewBox="0 0 600 260"></svg>
    </div>

<script>
const $ = (id) => document.getElementById(id);
const fill = (el, values) => values.forEach(v => {
    const o = document.createElement('option'); o.value = v; o.textContent = v; el.appendChild(o);
});
const esc = (s) => String(s).replace(/[&<>"]/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));
const num = (v, dp) => Number(v).toLocaleString('en-US', {minimumFractionDigits: dp, maximumFractionDigits: dp});

async function loadCatalog() {
    const c = await (await fetch('/api/catalog')).json();
    fill($('gender'), c.genders);
    fill($('education'), c.education_levels);
    fill($('job'), c.job_titles);
    $('age').min = c.age_range[0]; $('age').max = c.age_range[1];
    $('years').min = c.experience_range[0]; $('years').max = c.experience_range[1];
    c.tips.forEach(t => { const li = document.createElement('li'); li.textContent = t; $('tips').appendChild(li); });
}

async function updateTier() {
    $('years-value').textContent = $('years').value;
    const q = new URLSearchParams({job_title: $('job').value, education_level: $('education').value});
    const t = await (await fetch('/api/tier/' + $('years').value + '?' + q)).json();
    $('tier').textContent = t.tier;
    $('insight').textContent = t.insight || '';
}

async function loadMetrics() {
    const m = await (await fetch('/api/metrics')).json();
    $('metrics').innerHTML =
        `<div class="metric">Test R² Score<br><strong>${m.test_r2}</strong></div>` +
        `<div class="metric">Training R² Score<br><strong>${m.training_r2}</strong></div>` +
        `<div class="metric">Test RMSE<br><strong>₹${num(m.test_rmse_inr, 2)}</strong></div>` +
        `<div class="metric">Test MAE<br><strong>₹${num(m.test_mae_inr, 2)}</strong></div>`;
}

function drawResiduals(points) {
    const svg = $('residuals');
    if (points.length === 0) { svg.innerHTML = '<text x="20" y="130">No evaluation data yet.</text>'; return; }
    const xs = points.map(p => p.predicted_salary), ys = points.map(p => p.error);
    const xmin = Math.min(...xs), xmax = Math.max(...xs);
    const ymax = Math.max(1, ...ys.map(Math.abs));
    const sx = x => 40 + (xmax === xmin ? 260 : (x - xmin) / (xmax - xmin) * 540);
    const sy = y => 130 - y / ymax * 110;
    let body = '<line x1="40" y1="130" x2="590" y2="130" stroke="#9b3655"/>';
    points.forEach(p => { body += `<circle cx="${sx(p.predicted_salary)}" cy="${sy(p.error)}" r="4" fill="blue" opacity="0.7"/>`; });
    body += '<text x="250" y="255" font-size="12">Predicted Salary</text>';
    body += '<text x="0" y="12" font-size="12">Error (Residual)</text>';
    svg.innerHTML = body;
}

async function loadHistory() {
    const resp = await fetch('/api/history');
    const h = await resp.json();
    if (!resp.ok) { $('history').innerHTML = `<p class="error">${esc(h.details)}</p>`; return; }
    if (h.records.length === 0) {
        $('summary').innerHTML = '';
        $('history').innerHTML = '<p>No evaluation data available yet. Predict a salary to populate the table.</p>';
    } else {
        const s = h.summary;
        $('summary').innerHTML = `<p>${s.count} predictions · mean predicted ₹${num(s.mean_predicted_salary, 0)} · ` +
            `MAE ₹${num(s.mean_absolute_error, 2)} · RMSE ₹${num(s.root_mean_squared_error, 2)} (simulated)</p>`;
        const head = ['Age','Gender','Education Level','Job Title','Years of Experience','Predicted Salary','Actual Salary','Error','Absolute Error'];
        const rows = h.records.map(r => `<tr><td>${r.age}</td><td>${esc(r.gender)}</td><td>${esc(r.education_level)}</td>` +
            `<td>${esc(r.job_title)}</td><td>${r.years_experience}</td><td>${num(r.predicted_salary, 2)}</td>` +
            `<td>${num(r.actual_salary, 2)}</td><td>${num(r.error, 2)}</td><td>${num(r.absolute_error, 2)}</td></tr>`).join('');
        $('history').innerHTML = `<table><tr>${head.map(c => `<th>${c}</th>`).join('')}</tr>${rows}</table>`;
    }
    drawResiduals(h.residuals);
}

async function predict() {
    const body = {
        age: Number($('age').value),
        gender: $('gender').value,
        education_level: $('education').value,
        job_title: $('job').value,
        years_experience: Number($('years').value),
        currency: $('currency').value,
    };
    const resp = await fetch('/api/predict', {
        method: 'POST', headers: {'content-type': 'application/json'}, body: JSON.stringify(body),
    });
    const r = await resp.json();
    if (!resp.ok) { $('outcome').innerHTML = `<p class="error">${esc(r.details)}</p>`; return; }
    const total = r.breakdown.reduce((a, c) => a + c.amount, 0) || 1;
    const bars = r.breakdown.map(c =>
        `<div>${c.label}: ${esc(c.display)}<div class="bar" style="width:${c.amount / total * 100}%"></div></div>`).join('');
    $('outcome').innerHTML =
        `<p class="result">🎯 Estimated Salary: ${esc(r.display)}</p>` +
        (r.warning ? `<p class="warning">⚠ ${esc(r.warning)}</p>` : '') +
        `<h3>📊 Salary Breakdown</h3>${bars}`;
    loadHistory();
}

$('years').addEventListener('input', updateTier);
$('job').addEventListener('change', updateTier);
$('education').addEventListener('change', updateTier);
$('predict').addEventListener('click', predict);
loadCatalog().then(updateTier);
loadMetrics();
loadHistory();
</script>
</body>
</html>"##;
