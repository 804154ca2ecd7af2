use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use super::{error_response, AppState};
use crate::models::{
    CompareProgramsRequest, CompareProgramsResponse, ListProgramsQuery, ListProgramsResponse,
    RecommendationView, SearchProgramsRequest, SearchProgramsResponse,
};
use crate::services::CacheKey;

/// Configure all program-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/programs", web::get().to(list_programs))
        .route("/programs/filters", web::get().to(available_filters))
        .route("/programs/search", web::post().to(search_programs))
        .route("/programs/compare", web::post().to(compare_programs))
        .route("/programs/{id}", web::get().to(get_program));
}

/// GET /api/v1/programs
async fn list_programs(state: web::Data<AppState>, query: web::Query<ListProgramsQuery>) -> impl Responder {
    let programs = state.catalog.list(&query);
    let total = programs.len();

    HttpResponse::Ok().json(ListProgramsResponse { programs, total })
}

/// GET /api/v1/programs/filters
async fn available_filters(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.available_filters())
}

/// GET /api/v1/programs/{id}
async fn get_program(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match state.catalog.get(&id) {
        Some(program) => HttpResponse::Ok().json(program),
        None => error_response(StatusCode::NOT_FOUND, "Program not found", format!("No program with id {}", id)),
    }
}

/// Rank catalog programs against a preference set
///
/// POST /api/v1/programs/search
///
/// Request body:
/// ```json
/// {
///   "preferences": {
///     "countries": ["Spain"],
///     "interests": ["culture", "internship"],
///     "budget_max": 20000
///   },
///   "limit": 8
/// }
/// ```
async fn search_programs(state: web::Data<AppState>, req: web::Json<SearchProgramsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.default_limit)
        .min(state.max_limit);

    let cache_key = match &state.cache {
        Some(_) => CacheKey::search(&req, limit).ok(),
        None => None,
    };

    if let (Some(cache), Some(key)) = (&state.cache, &cache_key) {
        if let Ok(cached) = cache.get::<SearchProgramsResponse>(key).await {
            tracing::debug!("Returning cached search results ({} programs)", cached.recommendations.len());
            return HttpResponse::Ok().json(cached);
        }
    }

    let outcome = match state.recommender.recommend(state.catalog.programs(), &req.preferences, limit) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("Rejected search preferences: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid preferences", e.to_string());
        }
    };

    let recommendations: Vec<RecommendationView> = outcome
        .results
        .into_iter()
        .filter_map(|score| {
            let program = state.catalog.get(&score.candidate_id)?.clone();
            Some(RecommendationView {
                match_score: score.rounded_total(),
                match_reasons: score.reasons,
                score_breakdown: score.per_dimension,
                program,
            })
        })
        .collect();

    tracing::info!(
        "Search returned {} of {} eligible programs ({} in catalog)",
        recommendations.len(),
        outcome.eligible_candidates,
        outcome.total_candidates
    );

    let response = SearchProgramsResponse {
        recommendations,
        search_criteria: req.into_inner().preferences,
        total_candidates: outcome.total_candidates,
        eligible_candidates: outcome.eligible_candidates,
        warning: outcome.warning,
    };

    if let (Some(cache), Some(key)) = (&state.cache, &cache_key) {
        if let Err(e) = cache.set(key, &response).await {
            tracing::warn!("Failed to cache search results: {}", e);
        }
    }

    HttpResponse::Ok().json(response)
}

/// Compare 2-3 programs side by side
///
/// POST /api/v1/programs/compare
async fn compare_programs(state: web::Data<AppState>, req: web::Json<CompareProgramsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let programs = match state.catalog.get_many(&req.program_ids) {
        Ok(programs) => programs,
        Err(e) => return error_response(StatusCode::NOT_FOUND, "Program not found", e.to_string()),
    };

    let matrix = match state.recommender.compare(&programs) {
        Ok(matrix) => matrix,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid comparison", e.to_string()),
    };

    tracing::info!(
        "Compared {} programs, {} key differences",
        programs.len(),
        matrix.differences.len()
    );

    HttpResponse::Ok().json(CompareProgramsResponse {
        comparison_id: uuid::Uuid::new_v4().to_string(),
        programs: programs.into_iter().cloned().collect(),
        comparison_matrix: matrix.rows,
        key_differences: matrix.differences,
    })
}
