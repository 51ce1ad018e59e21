use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use human_shuffle::config::AppConfig;
use human_shuffle::web::{build_router, state::AppState};

fn person(uuid: &str, first: &str, last: &str, age: u32) -> Value {
    json!({
        "gender": "female",
        "name": { "title": "Ms", "first": first, "last": last },
        "location": { "city": "Hobart", "country": "Australia" },
        "email": format!("{}@example.com", first.to_lowercase()),
        "login": { "uuid": uuid },
        "dob": { "age": age },
        "picture": { "large": format!("https://randomuser.me/api/portraits/women/{}.jpg", age) }
    })
}

fn batch() -> Value {
    json!({
        "results": [
            person("u-1", "Harper", "Young", 29),
            person("u-2", "Chloe", "Walker", 52),
            person("u-3", "Isla", "Harper", 33)
        ],
        "info": { "seed": "humanshuffle123", "results": 3, "page": 1 }
    })
}

fn app_for(server: &MockServer, render_wait: Duration) -> Router {
    let config = AppConfig {
        api_url: format!("{}/api/", server.uri()),
        render_wait,
        ..AppConfig::default()
    };
    build_router(AppState::from_config(&config).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn first_visit_renders_seeded_page_with_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .and(query_param("results", "27"))
        .and(query_param("seed", "humanshuffle123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (status, html) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Harper Young"));
    assert!(html.contains("Chloe Walker"));
    assert!(html.contains("Hobart, Australia"));
    assert!(html.contains("href=\"/?page=2\""));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn gender_filter_fetches_without_seed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("gender", "male"))
        .and(query_param_is_missing("seed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (status, html) = get(&app, "/?gender=male").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<option value=\"male\" selected>"));
    assert!(html.contains("Isla Harper"));
}

#[tokio::test]
async fn sorting_by_name_orders_the_cards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (_, html) = get(&app, "/?sort=name_asc").await;

    let chloe = html.find("Chloe Walker").unwrap();
    let harper = html.find("Harper Young").unwrap();
    let isla = html.find("Isla Harper").unwrap();
    assert!(chloe < harper && harper < isla);
}

#[tokio::test]
async fn upstream_failure_renders_error_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (status, html) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("panel-error"));
    assert!(html.contains("Unable to load profiles from the server"));
    assert!(!html.contains(&server.uri()));
    assert!(!html.contains("class=\"pagination\""));
}

#[tokio::test]
async fn reloading_after_a_failure_retries_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (_, first) = get(&app, "/").await;
    assert!(first.contains("panel-error"));

    let (status, reload) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!reload.contains("panel-error"));
    assert!(reload.contains("Harper Young"));
    assert!(reload.contains("href=\"/?page=2\""));
}

#[tokio::test]
async fn search_without_matches_shows_empty_panel_and_no_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    get(&app, "/").await;
    let (_, html) = get(&app, "/?q=zzz").await;

    assert!(html.contains("panel-empty"));
    assert!(!html.contains("class=\"pagination\""));
}

#[tokio::test]
async fn slow_upstream_renders_skeletons_and_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(batch())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_millis(20));

    let (status, html) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("card-skeleton").count(), 27);
    assert!(html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn api_reports_snapshot_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("nat", "au"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch()))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, Duration::from_secs(5));

    let (status, body) = get(&app, "/api/profiles?nat=au&q=harper").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["params"]["page"], 1);
    assert_eq!(value["params"]["nationality"], "au");
    assert_eq!(value["state"]["status"], "ready");
    let names: Vec<&str> = value["state"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"]["first"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Harper", "Isla"]);
}
