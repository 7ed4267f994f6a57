//! Integration tests for the FlagGlobe API.
//!
//! These tests run the full request cycle: the app under test talks to mock
//! REST Countries and Wikipedia servers bound to ephemeral local ports, so
//! upstream behavior (including failures) is fully scripted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use axum_test::TestServer;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use flagglobe::aggregation::Aggregator;
use flagglobe::api::{AppState, router};
use flagglobe::data_sources::{RestCountriesClient, WikipediaClient};

/// Serve a mock upstream on an ephemeral port; returns its base URL.
async fn spawn_mock(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Scripted REST Countries endpoint.
async fn facts_handler(Path(name): Path<String>) -> (StatusCode, Json<Value>) {
    let body = match name.as_str() {
        "France" | "france" => json!([{
            "name": { "common": "France", "official": "French Republic" },
            "capital": ["Paris"],
            "population": 67390000u64,
            "area": 551695.0,
            "region": "Europe",
            "subregion": "Western Europe",
            "languages": { "fra": "French" },
            "flags": { "png": "https://flagcdn.com/w320/fr.png" }
        }]),
        "Japan" => json!([{
            "name": { "common": "Japan" },
            "capital": ["Tokyo"],
            "population": 125800000u64,
            "area": 377930.0,
            "region": "Asia",
            "subregion": "Eastern Asia",
            "languages": { "jpn": "Japanese" },
            "flags": { "png": "https://flagcdn.com/w320/jp.png" }
        }]),
        // No capital, population, area, region, or subregion upstream.
        "Bouvet Island" => json!([{
            "name": { "common": "Bouvet Island" },
            "languages": {},
            "flags": { "png": "https://flagcdn.com/w320/bv.png" }
        }]),
        // Decodes fine but lacks the required flag URL.
        "Flagless" => json!([{
            "name": { "common": "Flagless" },
            "capital": ["Nowhere"]
        }]),
        // A well-formed response with zero matches.
        "Empty" => json!([]),
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "status": 404, "message": "Not Found" })),
            );
        }
    };

    (StatusCode::OK, Json(body))
}

/// Shared state for the mock Wikipedia endpoint.
#[derive(Clone, Default)]
struct WikiState {
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

/// Scripted Wikipedia search endpoint; records every call it receives.
async fn wiki_handler(
    State(state): State<WikiState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(q) = params.get("srsearch") {
        state.queries.lock().unwrap().push(q.clone());
    }

    if state.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }

    (
        StatusCode::OK,
        Json(json!({
            "batchcomplete": true,
            "query": {
                "search": [
                    {
                        "title": "France",
                        "snippet": "<span class=\"searchmatch\">France</span> is a country in Western Europe"
                    },
                    {
                        "title": "History of France",
                        "snippet": "The <b>history</b> of France begins with the Gauls"
                    }
                ]
            }
        })),
    )
}

struct TestContext {
    server: TestServer,
    wiki_calls: Arc<AtomicUsize>,
    wiki_queries: Arc<Mutex<Vec<String>>>,
}

async fn setup(fail_wiki: bool) -> TestContext {
    let facts_url = spawn_mock(Router::new().route("/v3.1/name/:name", get(facts_handler))).await;

    let wiki_state = WikiState {
        fail: fail_wiki,
        ..Default::default()
    };
    let wiki_url = spawn_mock(
        Router::new()
            .route("/w/api.php", get(wiki_handler))
            .with_state(wiki_state.clone()),
    )
    .await;

    let state = AppState {
        aggregator: Aggregator::with_clients(
            RestCountriesClient::with_base_url(&facts_url),
            WikipediaClient::with_base_url(&wiki_url),
        ),
    };

    TestContext {
        server: TestServer::new(router(state)).unwrap(),
        wiki_calls: wiki_state.calls,
        wiki_queries: wiki_state.queries,
    }
}

#[tokio::test]
async fn test_get_country_success() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/country/France").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["error"].is_null());

    let record = &body["record"];
    assert_eq!(record["name"], "France");
    assert_eq!(record["capital"], "Paris");
    assert_eq!(record["population"], json!(67390000u64));
    assert_eq!(record["area"], json!(551695.0));
    assert_eq!(record["region"], "Europe");
    assert_eq!(record["subregion"], "Western Europe");
    assert_eq!(record["languages"], json!(["French"]));
    assert_eq!(record["flag_url"], "https://flagcdn.com/w320/fr.png");

    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "France");
    assert_eq!(
        articles[0]["snippet"],
        "France is a country in Western Europe"
    );
    assert_eq!(articles[0]["url"], "https://en.wikipedia.org/wiki/France");
    assert_eq!(
        articles[1]["url"],
        "https://en.wikipedia.org/wiki/History_of_France"
    );
}

#[tokio::test]
async fn test_search_uses_resolved_canonical_name() {
    let ctx = setup(false).await;

    // Lowercase input; the facts provider resolves it to "France".
    ctx.server.get("/country/france").await.assert_status_ok();

    let queries = ctx.wiki_queries.lock().unwrap();
    assert_eq!(queries.as_slice(), ["France"]);
}

#[tokio::test]
async fn test_facts_failure_short_circuits() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/country/Atlantis").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["record"].is_null());
    assert!(body["articles"].as_array().unwrap().is_empty());

    let error = &body["error"];
    assert_eq!(error["provider"], "country_facts");
    assert_eq!(error["kind"], "upstream");

    // The encyclopedia must never be consulted after a facts failure.
    assert_eq!(ctx.wiki_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_match_list_is_an_upstream_error() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/country/Empty").await;
    let body: Value = response.json();

    assert!(body["record"].is_null());
    assert_eq!(body["error"]["kind"], "upstream");
    assert_eq!(ctx.wiki_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_required_field_is_malformed() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/country/Flagless").await;
    let body: Value = response.json();

    assert!(body["record"].is_null());
    assert_eq!(body["error"]["kind"], "malformed_response");
    assert_eq!(body["error"]["provider"], "country_facts");
    assert_eq!(ctx.wiki_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_encyclopedia_failure_degrades_silently() {
    let ctx = setup(true).await;

    let response = ctx.server.get("/country/France").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["record"]["name"], "France");
    assert!(body["error"].is_null());
    assert!(body["articles"].as_array().unwrap().is_empty());

    // The search was attempted, it just failed.
    assert_eq!(ctx.wiki_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_optional_fields_use_sentinels() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/country/Bouvet%20Island").await;
    let body: Value = response.json();

    let record = &body["record"];
    assert_eq!(record["capital"], "No capital");
    assert_eq!(record["population"], "N/A");
    assert_eq!(record["area"], "N/A");
    assert_eq!(record["region"], "N/A");
    assert_eq!(record["subregion"], "N/A");
    assert_eq!(record["languages"], json!([]));
}

#[tokio::test]
async fn test_compare_sides_are_independent() {
    let ctx = setup(false).await;

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("first", "France")
        .add_query_param("second", "Atlantis")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();

    // One side failing must not affect the other's completeness.
    assert_eq!(body["first"]["record"]["name"], "France");
    assert!(body["first"]["error"].is_null());

    assert!(body["second"]["record"].is_null());
    assert_eq!(body["second"]["error"]["kind"], "upstream");
}

#[tokio::test]
async fn test_compare_both_sides_succeed() {
    let ctx = setup(false).await;

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("first", "France")
        .add_query_param("second", "Japan")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["first"]["record"]["name"], "France");
    assert_eq!(body["second"]["record"]["name"], "Japan");
    assert_eq!(body["second"]["record"]["capital"], "Tokyo");
}

#[tokio::test]
async fn test_quiz_listing_omits_answers() {
    let ctx = setup(false).await;

    let response = ctx.server.get("/quiz").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let questions = body["questions"].as_array().unwrap();
    assert!(!questions.is_empty());

    for question in questions {
        assert!(question["question"].is_string());
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
        assert!(question.get("answer").is_none());
    }
}

#[tokio::test]
async fn test_quiz_check_scores_answers() {
    let ctx = setup(false).await;

    // Question 0 is "What is the capital of Australia?" -> Canberra.
    let response = ctx
        .server
        .post("/quiz/check")
        .json(&json!({ "question": 0, "answer": "Canberra" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["correct"], true);

    let response = ctx
        .server
        .post("/quiz/check")
        .json(&json!({ "question": 0, "answer": "Sydney" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["correct"], false);
}

#[tokio::test]
async fn test_quiz_check_unknown_index_is_not_found() {
    let ctx = setup(false).await;

    let response = ctx
        .server
        .post("/quiz/check")
        .json(&json!({ "question": 999, "answer": "Canberra" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = setup(false).await;

    ctx.server.get("/health").await.assert_status_ok();
}
