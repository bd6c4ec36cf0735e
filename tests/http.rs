use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Snapshot {
    theme: String,
    country: String,
    counter_running: bool,
    widgets: BTreeMap<String, Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    content: Value,
    classes: Vec<String>,
}

impl Snapshot {
    fn text(&self, id: &str) -> Option<&str> {
        self.widgets.get(id)?.content.get("value")?.as_str()
    }

    fn chart_id(&self, id: &str) -> Option<u64> {
        self.widgets.get(id)?.content["value"]["meta"]["id"].as_u64()
    }
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

fn unique_theme_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("pulse_dashboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
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

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let stats_port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_pulse_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_THEME_PATH", unique_theme_path())
        .env("STATS_API_URL", format!("http://127.0.0.1:{stats_port}"))
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
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_snapshot(client: &Client, server: &TestServer) -> Snapshot {
    client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post(
    client: &Client,
    server: &TestServer,
    path: &str,
    body: Option<Value>,
) -> reqwest::Response {
    let mut request = client.post(format!("{}{path}", server.base_url));
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.unwrap()
}

async fn post_snapshot(client: &Client, server: &TestServer, path: &str) -> Snapshot {
    post(client, server, path, None).await.json().await.unwrap()
}

async fn wait_for_settled_counter(client: &Client, server: &TestServer) -> Snapshot {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let snapshot = get_snapshot(client, server).await;
        if !snapshot.counter_running {
            return snapshot;
        }
        if Instant::now() > deadline {
            panic!("counter never finished");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn get_index(client: &Client, server: &TestServer) -> String {
    client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_counter_settles_on_targets() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    get_index(&client, &server).await;
    let snapshot = wait_for_settled_counter(&client, &server).await;

    assert_eq!(snapshot.text("total-users"), Some("12,453"));
    assert_eq!(snapshot.text("revenue"), Some("$89,432"));
    assert_eq!(snapshot.text("engagement"), Some("67%"));
    assert_eq!(snapshot.text("new-orders"), Some("342"));
}

#[tokio::test]
async fn http_serving_page_restarts_counter() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    wait_for_settled_counter(&client, &server).await;
    let html = get_index(&client, &server).await;
    assert!(html.contains(r#""counter_running":true"#));
    assert!(get_snapshot(&client, &server).await.counter_running);

    let settled = wait_for_settled_counter(&client, &server).await;
    assert_eq!(settled.text("revenue"), Some("$89,432"));
}

#[tokio::test]
async fn http_theme_toggle_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let glyph = before.text("theme-toggle").unwrap().to_string();

    let flipped: Snapshot = post_snapshot(&client, &server, "/api/theme/toggle").await;
    assert_ne!(flipped.theme, before.theme);
    assert_ne!(flipped.text("theme-toggle").unwrap(), glyph);

    let restored: Snapshot = post_snapshot(&client, &server, "/api/theme/toggle").await;
    assert_eq!(restored.theme, before.theme);
    assert_eq!(restored.text("theme-toggle").unwrap(), glyph);
    assert_eq!(restored.chart_id("line-chart"), before.chart_id("line-chart"));
}

#[tokio::test]
async fn http_date_range_wraps_after_six() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let start = get_snapshot(&client, &server).await.text("date-range").unwrap().to_string();
    let mut last = None;
    for _ in 0..6 {
        let snapshot: Snapshot = post_snapshot(&client, &server, "/api/date-range/next").await;
        last = snapshot.text("date-range").map(str::to_string);
    }
    assert_eq!(last.as_deref(), Some(start.as_str()));
}

#[tokio::test]
async fn http_sidebar_toggle_flips_class() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let was_active = before.widgets["sidebar"].classes.iter().any(|c| c == "active");
    let after: Snapshot = post_snapshot(&client, &server, "/api/sidebar/toggle").await;
    let is_active = after.widgets["sidebar"].classes.iter().any(|c| c == "active");
    assert_ne!(was_active, is_active);
}

#[tokio::test]
async fn http_filters_mark_selection_and_reject_unknown_chart() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post(
        &client,
        &server,
        "/api/filters",
        Some(serde_json::json!({ "chart": "performance", "value": "Weekly" })),
    )
    .await;
    assert!(response.status().is_success());
    let snapshot: Snapshot = response.json().await.unwrap();
    assert!(
        snapshot
            .text("performance-filter")
            .unwrap()
            .contains(r#"<button class="active">Weekly</button>"#)
    );

    let response = post(
        &client,
        &server,
        "/api/filters",
        Some(serde_json::json!({ "chart": "orders", "value": "Weekly" })),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_failed_country_fetch_keeps_widgets() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let response = post(
        &client,
        &server,
        "/api/country",
        Some(serde_json::json!({ "country": "de" })),
    )
    .await;
    assert!(response.status().is_success());
    let after: Snapshot = response.json().await.unwrap();

    assert_eq!(after.country, "de");
    for id in ["covid-confirmed", "covid-recovered", "covid-deaths"] {
        assert_eq!(after.widgets[id].content, before.widgets[id].content);
    }
}

#[tokio::test]
async fn http_chart_reinit_replaces_instances() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_snapshot(&client, &server).await;
    let after: Snapshot = post_snapshot(&client, &server, "/api/charts/reinit").await;
    assert_ne!(after.chart_id("line-chart"), before.chart_id("line-chart"));
    assert_ne!(after.chart_id("doughnut-chart"), before.chart_id("doughnut-chart"));
    assert!(after.chart_id("line-chart").is_some());
}

#[tokio::test]
async fn http_index_renders_shell() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = get_index(&client, &server).await;
    assert!(html.contains("<canvas id=\"line-chart\"></canvas>"));
    assert!(html.contains("const initial = {"));
}
