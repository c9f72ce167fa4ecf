//! Axum route handlers for the Brochure API.

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::{
    compose, normalize, ComposeSettings, ComposedDocument, Document, FurnitureStyle, HeaderMode,
    LayoutStyle, Masthead, NormalizeOptions, PageGeometry,
};
use crate::models::PackageData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub package: PackageData,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub document: Document,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub package: PackageData,
    /// Overrides the configured page geometry.
    #[serde(default)]
    pub geometry: Option<PageGeometry>,
    #[serde(default)]
    pub style: Option<LayoutStyle>,
    #[serde(default)]
    pub mode: HeaderMode,
    /// Copyright year; defaults to the current UTC year.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub currency: Option<String>,
}

fn normalize_options(state: &AppState, currency: Option<String>) -> NormalizeOptions {
    NormalizeOptions {
        currency: currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| state.config.currency_label.clone()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/brochures/normalize
///
/// Returns the typed block sequence the layout pass would consume.
/// Useful for previewing section classification before printing.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let options = normalize_options(&state, request.currency);
    let document = normalize(&request.package, &options);
    Ok(Json(NormalizeResponse { document }))
}

/// POST /api/v1/brochures/layout
///
/// Full pipeline: normalize → paginate → stamp furniture.
/// Returns every page with resolved draw instructions, ready for an emitter.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<ComposedDocument>, AppError> {
    let year = request.year.unwrap_or_else(|| Utc::now().year());
    if !(1..=9999).contains(&year) {
        return Err(AppError::Validation(format!(
            "year must be between 1 and 9999, got {year}"
        )));
    }

    let options = normalize_options(&state, request.currency);
    let settings = ComposeSettings {
        geometry: request.geometry.unwrap_or(state.config.default_geometry),
        style: request.style.unwrap_or_default(),
        furniture: FurnitureStyle::default(),
    };
    let site_label = state.config.site_label.clone();
    let company_name = state.config.company_name.clone();
    let mode = request.mode;
    let package = request.package;
    let metrics = state.metrics.clone();

    // CPU-bound layout — spawn_blocking to avoid blocking the async executor.
    let composed = tokio::task::spawn_blocking(move || {
        let document = normalize(&package, &options);
        let masthead = Masthead {
            title: document.title.clone(),
            site_label,
            company_name,
            year,
            mode,
        };
        compose(&document, &settings, &masthead, metrics.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    info!(pages = composed.page_count, "Layout request served");

    Ok(Json(composed))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
