use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use super::error_response;
use crate::core::{evaluate_options, DecisionFramework};
use crate::models::{EvaluateDecisionRequest, FallbackFrameworkQuery, FallbackFrameworkResponse};

/// Configure decision-evaluation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/decisions/evaluate", web::post().to(evaluate_decision))
        .route("/decisions/fallback", web::get().to(fallback_framework));
}

/// Score decision options against weighted criteria
///
/// POST /api/v1/decisions/evaluate
async fn evaluate_decision(req: web::Json<EvaluateDecisionRequest>) -> impl Responder {
    match evaluate_options(&req.framework, &req.ratings) {
        Ok(evaluation) => {
            tracing::info!(
                "Evaluated {} options for '{}', primary choice: {:?}",
                evaluation.option_scores.len(),
                evaluation.title,
                evaluation.recommendation.primary_choice
            );
            HttpResponse::Ok().json(evaluation)
        }
        Err(e) => {
            tracing::info!("Rejected decision framework: {}", e);
            error_response(StatusCode::BAD_REQUEST, "Invalid decision framework", e.to_string())
        }
    }
}

/// Generic framework for when no tailored one is available
///
/// GET /api/v1/decisions/fallback?depth=quick|balanced|thorough
async fn fallback_framework(query: web::Query<FallbackFrameworkQuery>) -> impl Responder {
    let depth = query.depth.unwrap_or_default();

    HttpResponse::Ok().json(FallbackFrameworkResponse {
        framework: DecisionFramework::fallback(depth),
        depth_profile: depth.profile(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};

    #[actix_web::test]
    async fn test_fallback_defaults_to_balanced() {
        let app = actix_test::init_service(App::new().configure(configure)).await;

        let req = actix_test::TestRequest::get().uri("/decisions/fallback").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["depth_profile"]["questions"], 6);
        assert!(body["framework"]["criteria"].as_array().is_some());
    }

    #[actix_web::test]
    async fn test_evaluate_rejects_unknown_option() {
        let app = actix_test::init_service(App::new().configure(configure)).await;

        let framework = DecisionFramework::fallback(Default::default());
        let req = actix_test::TestRequest::post()
            .uri("/decisions/evaluate")
            .set_json(serde_json::json!({
                "framework": framework,
                "ratings": { "Nonexistent option": { "Cost": 5.0 } }
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
