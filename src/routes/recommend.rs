use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Scorer;
use crate::models::{ErrorResponse, HealthResponse, RecommendRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub scorer: Scorer,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend events endpoint
///
/// POST /recommend
///
/// Request body:
/// ```json
/// {
///   "interests": ["music"],
///   "query": "jazz",
///   "limit": 9,
///   "events": [{ "id": "1", "title": "Jazz Night", "date": "2024-05-01" }]
/// }
/// ```
///
/// Responds with the ranked events, echoed unchanged.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("recommend", %request_id);

    span.in_scope(|| {
        let request = req.into_inner();
        tracing::debug!(
            "Ranking {} events (interests: {}, query: {:?}, limit: {})",
            request.events.len(),
            request.interests.len(),
            request.query,
            request.limit
        );

        let result = state.scorer.recommend(request);

        tracing::info!(
            "Returning {} events (from {} candidates)",
            result.events.len(),
            result.total_candidates
        );

        HttpResponse::Ok().json(result.events)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
