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
struct TableRow {
    date: String,
    consumption: f64,
    day_offset: i64,
}

#[derive(Debug, Deserialize)]
struct TrendModel {
    slope: f64,
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    target_date: String,
    target_offset: i64,
    value: f64,
    label: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    table: Vec<TableRow>,
    model: TrendModel,
    prediction: Prediction,
    chart_svg: String,
}

#[derive(Debug, Deserialize)]
struct Sample {
    date: String,
    consumption: f64,
}

#[derive(Debug, Deserialize)]
struct DefaultsResponse {
    days: u32,
    days_ahead: u32,
    samples: Vec<Sample>,
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

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

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

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/health")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_energy_forecast"))
        .env("PORT", port.to_string())
        .env("FORECAST_DEFAULT_DAYS", "5")
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

#[tokio::test]
async fn http_forecast_extends_linear_trend() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-03", "consumption": 120.0 },
                { "date": "2024-01-01", "consumption": 100.0 },
                { "date": "2024-01-02", "consumption": 110.0 }
            ],
            "days_ahead": 3
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let report: ForecastResponse = response.json().await.unwrap();
    let dates: Vec<_> = report.table.iter().map(|row| row.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(report.table[2].day_offset, 2);
    assert_eq!(report.table[2].consumption, 120.0);
    assert!((report.model.slope - 10.0).abs() < 1e-6);
    assert!((report.model.intercept - 100.0).abs() < 1e-6);
    assert_eq!(report.prediction.target_date, "2024-01-06");
    assert_eq!(report.prediction.target_offset, 5);
    assert!((report.prediction.value - 150.0).abs() < 1e-6);
    assert_eq!(
        report.prediction.label,
        "Estimated energy consumption on 2024-01-06: 150.00 kWh"
    );
    assert!(report.chart_svg.starts_with("<svg"));
}

#[tokio::test]
async fn http_forecast_rejects_out_of_range_input() {
    let server = shared_server().await;
    let client = Client::new();

    let too_few = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-01", "consumption": 1.0 },
                { "date": "2024-01-02", "consumption": 2.0 }
            ],
            "days_ahead": 3
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(too_few.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-01", "consumption": 1.0 },
                { "date": "2024-01-02", "consumption": -2.0 },
                { "date": "2024-01-03", "consumption": 3.0 }
            ],
            "days_ahead": 3
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
    assert!(negative.text().await.unwrap().contains("day 2"));

    let too_far = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-01", "consumption": 1.0 },
                { "date": "2024-01-02", "consumption": 2.0 },
                { "date": "2024-01-03", "consumption": 3.0 }
            ],
            "days_ahead": 15
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(too_far.status(), StatusCode::BAD_REQUEST);

    let negative_ahead = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-01", "consumption": 1.0 },
                { "date": "2024-01-02", "consumption": 2.0 },
                { "date": "2024-01-03", "consumption": 3.0 }
            ],
            "days_ahead": -1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative_ahead.status(), StatusCode::BAD_REQUEST);

    let bad_date = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-02-30", "consumption": 1.0 },
                { "date": "2024-01-02", "consumption": 2.0 },
                { "date": "2024-01-03", "consumption": 3.0 }
            ],
            "days_ahead": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

    let huge = client
        .post(format!("{}/api/forecast", server.base_url))
        .json(&serde_json::json!({
            "samples": [
                { "date": "2024-01-01", "consumption": 1e308 },
                { "date": "2024-01-02", "consumption": 1e308 },
                { "date": "2024-01-03", "consumption": 1e308 }
            ],
            "days_ahead": 1
        }))
        .send()
        .await
        .unwrap();
    assert!(huge.status().is_success());
    let report: ForecastResponse = huge.json().await.unwrap();
    assert_eq!(report.prediction.value, 1e308);
    assert!(!report.chart_svg.contains("NaN"));
}

#[tokio::test]
async fn http_defaults_follow_configuration() {
    let server = shared_server().await;
    let client = Client::new();

    let defaults: DefaultsResponse = client
        .get(format!("{}/api/defaults", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(defaults.days, 5);
    assert_eq!(defaults.days_ahead, 3);
    assert_eq!(defaults.samples.len(), 5);
    assert!(defaults.samples.iter().all(|sample| sample.consumption == 100.0));
    assert!(defaults.samples.windows(2).all(|pair| pair[0].date < pair[1].date));

    let clamped: DefaultsResponse = client
        .get(format!("{}/api/defaults?days=99", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clamped.days, 30);
    assert_eq!(clamped.samples.len(), 30);
}

#[tokio::test]
async fn http_form_post_renders_forecast_page() {
    let server = shared_server().await;
    let client = Client::new();

    let index = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(index.status().is_success());
    let html = index.text().await.unwrap();
    assert!(html.contains(r#"name="consumption_4""#));
    assert!(!html.contains(r#"name="consumption_5""#));

    let response = client
        .post(format!("{}/forecast", server.base_url))
        .form(&[
            ("days", "3"),
            ("days_ahead", "3"),
            ("date_0", "2024-01-02"),
            ("consumption_0", "110"),
            ("date_1", "2024-01-01"),
            ("consumption_1", "100"),
            ("date_2", "2024-01-03"),
            ("consumption_2", "120"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Estimated energy consumption on 2024-01-06: 150.00 kWh"));
    let first = html.find("<td>2024-01-01</td>").unwrap();
    let second = html.find("<td>2024-01-02</td>").unwrap();
    assert!(first < second);

    let rejected = client
        .post(format!("{}/forecast", server.base_url))
        .form(&[("days", "3"), ("date_0", "not-a-date")])
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}
