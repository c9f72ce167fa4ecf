use anyhow::{Context, Result};

use crate::layout::{LayoutStyle, PageGeometry};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Site identity printed in every page header.
    pub site_label: String,
    /// Company named in the copyright footer.
    pub company_name: String,
    pub currency_label: String,
    /// Page geometry used when a request does not bring its own.
    pub default_geometry: PageGeometry,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            site_label: env_or("SITE_LABEL", ""),
            company_name: env_or("COMPANY_NAME", ""),
            currency_label: env_or("CURRENCY_LABEL", "US$"),
            default_geometry: geometry_from_env()?,
        })
    }
}

/// A4 portrait in points, as printed by the brochure generator.
pub fn a4_portrait() -> PageGeometry {
    PageGeometry {
        page_width: 595.28,
        page_height: 841.89,
        margin_top: 30.0,
        margin_bottom: 30.0,
        margin_left: 50.0,
        margin_right: 50.0,
        header_reserve: 50.0,
        footer_reserve: 20.0,
        line_height: 20.0,
    }
}

/// A4 preset with optional `PAGE_*` overrides.
fn geometry_from_env() -> Result<PageGeometry> {
    let base = a4_portrait();
    checked_geometry(PageGeometry {
        page_width: env_f32("PAGE_WIDTH", base.page_width)?,
        page_height: env_f32("PAGE_HEIGHT", base.page_height)?,
        margin_top: env_f32("PAGE_MARGIN_TOP", base.margin_top)?,
        margin_bottom: env_f32("PAGE_MARGIN_BOTTOM", base.margin_bottom)?,
        margin_left: env_f32("PAGE_MARGIN_LEFT", base.margin_left)?,
        margin_right: env_f32("PAGE_MARGIN_RIGHT", base.margin_right)?,
        header_reserve: env_f32("PAGE_HEADER_RESERVE", base.header_reserve)?,
        footer_reserve: env_f32("PAGE_FOOTER_RESERVE", base.footer_reserve)?,
        line_height: env_f32("PAGE_LINE_HEIGHT", base.line_height)?,
    })
}

/// The configured geometry must hold the default style, otherwise every
/// request without its own geometry would be rejected.
fn checked_geometry(geometry: PageGeometry) -> Result<PageGeometry> {
    let style = LayoutStyle::default();
    geometry
        .validate(style.tallest_step(&geometry))
        .and_then(|()| style.validate(&geometry))
        .context("PAGE_* variables describe an unusable page")?;
    Ok(geometry)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_f32(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Environment variable '{key}' must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
