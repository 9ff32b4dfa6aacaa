//! Request handling, independent of the socket layer.
//!
//! `handle` maps (method, url) onto the store and returns status + JSON body.
//! Every failure becomes a `{"error": ...}` body; nothing here can bring the
//! process down.

use serde::Serialize;
use serde_json::json;

use crate::config::ServerConfig;
use crate::error::StoreError;
use crate::metrics;
use crate::record::Record;
use crate::store::RecordStore;

use super::query::{decode_segment, split_url, ListParams};

pub const PLAYERS_ROUTE: &str = "/api/players";
pub const HEALTH_ROUTE: &str = "/health";
pub const METRICS_ROUTE: &str = "/metrics";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_PROMETHEUS: &str = "text/plain; version=0.0.4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: CONTENT_TYPE_JSON,
                body,
            },
            Err(e) => Self::error(500, &format!("serialize response: {}", e)),
        }
    }

    pub fn error(status: u16, msg: &str) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_JSON,
            body: json!({ "error": msg }).to_string(),
        }
    }

    fn text(status: u16, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }
}

#[derive(Serialize)]
struct PlayersPage<'a> {
    total_players: usize,
    page: usize,
    limit: usize,
    players: &'a [Record],
}

/// HTTP status for a store failure surfaced during a request.
pub fn status_for(err: &StoreError) -> u16 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}

/// Route one request.
pub fn handle(store: &dyn RecordStore, cfg: &ServerConfig, method: &str, url: &str) -> ApiResponse {
    let (path, query) = split_url(url);

    let route = match path {
        HEALTH_ROUTE => Route::Health,
        METRICS_ROUTE => Route::Metrics,
        PLAYERS_ROUTE => Route::Players,
        p => match p.strip_prefix(PLAYERS_ROUTE).and_then(|rest| rest.strip_prefix('/')) {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Player(id),
            _ => return ApiResponse::error(404, "not found"),
        },
    };

    if !method.eq_ignore_ascii_case("GET") {
        return ApiResponse::error(405, &format!("method {} not allowed", method));
    }

    match route {
        Route::Health => ApiResponse::json(200, &json!({ "status": "ok" })),
        Route::Metrics => ApiResponse::text(
            200,
            CONTENT_TYPE_PROMETHEUS,
            metrics::snapshot().to_prometheus(),
        ),
        Route::Players => list_players(store, cfg, query),
        Route::Player(raw_id) => get_player(store, &decode_segment(raw_id)),
    }
}

enum Route<'a> {
    Health,
    Metrics,
    Players,
    Player(&'a str),
}

fn list_players(store: &dyn RecordStore, cfg: &ServerConfig, query: &str) -> ApiResponse {
    let (page, limit) = match ListParams::parse(query).and_then(|q| {
        Ok((q.page_or(cfg.default_page)?, q.limit_or(cfg.default_limit)?))
    }) {
        Ok(v) => v,
        Err(msg) => return ApiResponse::error(400, &msg),
    };
    if page < 1 || limit < 1 {
        return ApiResponse::error(400, "Page and limit must be greater than 0");
    }

    let page = usize::try_from(page).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    match store.get_page(page, limit) {
        Ok(p) => ApiResponse::json(
            200,
            &PlayersPage {
                total_players: p.total_count,
                page: p.number,
                limit: p.limit,
                players: p.records(),
            },
        ),
        Err(e) => ApiResponse::error(status_for(&e), &e.to_string()),
    }
}

fn get_player(store: &dyn RecordStore, id: &str) -> ApiResponse {
    match store.get_by_key(id) {
        Ok(Some(rec)) => ApiResponse::json(200, &rec),
        Ok(None) => ApiResponse::error(404, &format!("Requested player={} is not found", id)),
        Err(e) => ApiResponse::error(status_for(&e), &e.to_string()),
    }
}
