// Integration tests for the event recommender

use actix_cors::Cors;
use actix_web::{http::StatusCode, test as actix_test, web, App};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use event_recommender::core::{calculate_event_score, Scorer, UserSignals};
use event_recommender::models::{Event, RecommendRequest, ScoringWeights};
use event_recommender::routes::{self, AppState};
use serde_json::{json, Value};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn create_test_event(id: &str, title: &str, tags: &[&str], days_ahead: Option<i64>) -> Event {
    let date = match days_ahead {
        Some(days) => (fixed_now() + Duration::days(days))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
        None => "not-a-date".to_string(),
    };

    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("About {}", title)),
        venue: Some("Main Hall".to_string()),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        date,
        category: Some("Community".to_string()),
    }
}

fn create_pool() -> Vec<Event> {
    vec![
        create_test_event("1", "Jazz Night", &["music", "nightlife"], Some(1)),
        create_test_event("2", "Pottery Workshop", &["art"], Some(2)),
        create_test_event("3", "City Marathon", &["sports"], None),
        create_test_event("4", "Gallery Opening", &["Art", "Music"], Some(12)),
        create_test_event("5", "Farmers Market", &[], Some(0)),
        create_test_event("6", "Blues Jam", &["music"], Some(4)),
        create_test_event("7", "Book Swap", &["books"], None),
        create_test_event("8", "Jazz Brunch", &["food", "music"], Some(30)),
    ]
}

fn create_request(interests: &[&str], query: &str, limit: i64) -> RecommendRequest {
    RecommendRequest {
        interests: interests.iter().map(|t| t.to_string()).collect(),
        query: query.to_string(),
        limit,
        events: create_pool(),
        category: None,
    }
}

fn score_of(event: &Event, request: &RecommendRequest) -> f64 {
    let signals = UserSignals::new(&request.interests, &request.query);
    calculate_event_score(event, &signals, &ScoringWeights::default(), fixed_now()).total()
}

#[test]
fn test_output_is_sorted_stable_subsequence() {
    let scorer = Scorer::with_default_weights();

    for (interests, query) in [
        (vec!["music"], "jazz"),
        (vec!["art", "music"], ""),
        (vec![], "hall"),
        (vec![], ""),
    ] {
        let request = create_request(&interests, query, 9);
        let input = request.events.clone();
        let result = scorer.recommend_at(request.clone(), fixed_now());

        // Every output event is an unchanged input event
        for event in &result.events {
            assert!(input.contains(event), "{} not in input", event.id);
        }

        // Descending scores, ties in input order
        for pair in result.events.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (score_a, score_b) = (score_of(a, &request), score_of(b, &request));
            assert!(score_a >= score_b, "{} ranked above {}", a.id, b.id);

            if score_a == score_b {
                let pos_a = input.iter().position(|e| e.id == a.id).unwrap();
                let pos_b = input.iter().position(|e| e.id == b.id).unwrap();
                assert!(pos_a < pos_b, "tie between {} and {} reordered", a.id, b.id);
            }
        }
    }
}

#[test]
fn test_limit_property() {
    let scorer = Scorer::with_default_weights();
    let pool_size = create_pool().len();

    for limit in [-1_i64, 0, 1, 3, 8, 9, 100] {
        let result = scorer.recommend_at(create_request(&["music"], "", limit), fixed_now());
        let expected = usize::try_from(limit).unwrap_or(0).min(pool_size);
        assert_eq!(result.events.len(), expected, "limit {}", limit);
    }
}

#[test]
fn test_end_to_end_ranking() {
    let scorer = Scorer::with_default_weights();
    let result = scorer.recommend_at(create_request(&["music"], "jazz", 3), fixed_now());

    let ids: Vec<&str> = result.events.iter().map(|e| e.id.as_str()).collect();
    // Jazz Night: 3 tag + 5 text + 2.4 recency, Jazz Brunch: 3 + 5,
    // Blues Jam: 3 + 0.6
    assert_eq!(ids, vec!["1", "8", "6"]);
    assert_eq!(result.total_candidates, 8);
}

#[test]
fn test_recency_only_ranking() {
    let scorer = Scorer::with_default_weights();
    let result = scorer.recommend_at(create_request(&[], "", 4), fixed_now());

    let ids: Vec<&str> = result.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["5", "1", "2", "6"]);
}

macro_rules! init_app {
    () => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    scorer: Scorer::with_default_weights(),
                }))
                .app_data(routes::json_config(4 * 1024 * 1024))
                .wrap(Cors::permissive())
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_recommend_endpoint_ranks_and_echoes() {
    let app = init_app!();
    let today = Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({
            "interests": ["Music"],
            "query": "jazz",
            "limit": 2,
            "events": [
                { "id": "a", "title": "Quiet Reading", "date": "not-a-date" },
                { "id": "b", "title": "Jazz Night", "date": today, "tags": ["music"],
                  "description": null, "extra": "dropped" },
                { "id": "c", "title": "Jazz Brunch", "date": "not-a-date" }
            ]
        }))
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([
            {
                "id": "b", "title": "Jazz Night", "description": null, "venue": "",
                "tags": ["music"], "date": today, "category": ""
            },
            {
                "id": "c", "title": "Jazz Brunch", "description": "", "venue": "",
                "tags": [], "date": "not-a-date", "category": ""
            }
        ])
    );
}

#[actix_web::test]
async fn test_recommend_endpoint_defaults() {
    let app = init_app!();
    let events: Vec<Value> = (0..12)
        .map(|i| json!({ "id": i.to_string(), "title": "Event", "date": "not-a-date" }))
        .collect();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "events": events }))
        .to_request();

    let body: Vec<Event> = actix_test::call_and_read_body_json(&app, req).await;

    // Default limit of 9, all scores equal so input order holds
    let ids: Vec<String> = body.into_iter().map(|e| e.id).collect();
    let expected: Vec<String> = (0..9).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[actix_web::test]
async fn test_recommend_endpoint_category_filter() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({
            "category": "sports",
            "events": [
                { "id": "1", "title": "Chess Club", "date": "not-a-date", "category": "Games" },
                { "id": "2", "title": "5K Run", "date": "not-a-date", "category": "Sports" }
            ]
        }))
        .to_request();

    let body: Vec<Event> = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].id, "2");
}

#[actix_web::test]
async fn test_recommend_endpoint_rejects_malformed_json() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ \"events\": [")
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_recommend_endpoint_rejects_missing_fields() {
    let app = init_app!();

    for payload in [
        json!({ "interests": ["music"] }),
        json!({ "events": [{ "id": "1", "title": "No date" }] }),
        json!({ "events": [{ "title": "No id", "date": "2025-01-01" }] }),
        json!({ "limit": "nine", "events": [] }),
    ] {
        let req = actix_test::TestRequest::post()
            .uri("/recommend")
            .set_json(payload)
            .to_request();

        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn test_recommend_endpoint_rejects_oversized_pool() {
    let app = init_app!();
    let events: Vec<Value> = (0..10_001)
        .map(|i| json!({ "id": i.to_string(), "title": "E", "date": "x" }))
        .collect();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .set_json(json!({ "events": events }))
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_cors_allows_any_origin() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/recommend")
        .insert_header(("origin", "https://events.example.org"))
        .set_json(json!({ "events": [] }))
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = init_app!();
    let req = actix_test::TestRequest::get().uri("/health").to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
