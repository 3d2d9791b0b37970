//! HTTP handler functions for the club network API.

use actix_web::{HttpResponse, web};
use club_network_directory::clubs::{available_filters, clubs_data, detailed_club_data};
use club_network_directory::map::map_config_data;
use club_network_directory::paginate::{DEFAULT_PER_PAGE, paginate};
use club_network_server_models::{ApiHealth, ClientConfig, ClubQueryParams, MapQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/clubs`
///
/// Returns one page of published clubs matching the filter query.
pub async fn clubs(
    state: web::Data<AppState>,
    params: web::Query<ClubQueryParams>,
) -> HttpResponse {
    let filter = params.filter();

    match clubs_data(state.store.as_ref(), &filter, &state.settings).await {
        Ok(all) => {
            let page = params.page.unwrap_or(1);
            let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);

            HttpResponse::Ok().json(paginate(all, page, per_page))
        }
        Err(e) => {
            log::error!("Failed to query clubs: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query clubs"
            }))
        }
    }
}

/// `GET /api/clubs/{id}`
///
/// Returns the detail payload for one published club.
pub async fn club_details(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let club_id = path.into_inner();

    match detailed_club_data(state.store.as_ref(), club_id, &state.settings).await {
        Ok(Some(detail)) => HttpResponse::Ok().json(detail),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Club not found"
        })),
        Err(e) => {
            log::error!("Failed to load club {club_id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load club details"
            }))
        }
    }
}

/// `GET /api/filters`
///
/// Returns the filter choices in use across published clubs.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    match available_filters(state.store.as_ref()).await {
        Ok(options) => HttpResponse::Ok().json(options),
        Err(e) => {
            log::error!("Failed to load filters: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load filters"
            }))
        }
    }
}

/// `GET /api/map`
///
/// Returns the map configuration for the clubs matching the filter query.
pub async fn map_config(
    state: web::Data<AppState>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    let filter = params.filter();

    match map_config_data(state.store.as_ref(), &filter, &state.settings).await {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => {
            log::error!("Failed to build map config: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to build map config"
            }))
        }
    }
}

/// `GET /api/config`
///
/// Returns the client bootstrap payload derived from site settings.
pub async fn client_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ClientConfig::from_settings(&state.settings))
}
