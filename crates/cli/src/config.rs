//! Environment-driven configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use codex_claim_core::{
    ClaimVariant, DEFAULT_SHEETS_API_URL, DEFAULT_SHEETS_TIMEOUT_SECS, env_non_empty,
    env_parse_with_default,
};
use codex_claim_sheets::{
    GoogleSheetsClient, MemorySheet, SheetConnector, SheetsConfig, TokenSource,
};

pub(crate) fn claim_variant() -> Result<ClaimVariant> {
    match env_non_empty("CODEX_CLAIM_VARIANT") {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(ClaimVariant::default()),
    }
}

fn token_source() -> Result<TokenSource> {
    if let Some(token) = env_non_empty("CODEX_SHEETS_TOKEN") {
        return Ok(TokenSource::Static(token));
    }
    env_non_empty("CODEX_SHEETS_TOKEN_FILE")
        .map(|path| TokenSource::File(PathBuf::from(path)))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "CODEX_SHEETS_TOKEN or CODEX_SHEETS_TOKEN_FILE environment variable must be set"
            )
        })
}

pub(crate) fn sheets_config() -> Result<SheetsConfig> {
    let spreadsheet_id = env_non_empty("CODEX_SPREADSHEET_ID")
        .context("CODEX_SPREADSHEET_ID environment variable must be set")?;
    Ok(SheetsConfig {
        api_url: env_non_empty("CODEX_SHEETS_API_URL")
            .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_owned()),
        spreadsheet_id,
        sheet_name: env_non_empty("CODEX_SHEET_NAME"),
        timeout: Duration::from_secs(nonzero_timeout(env_parse_with_default(
            "CODEX_SHEETS_TIMEOUT_SECS",
            DEFAULT_SHEETS_TIMEOUT_SECS,
        ))),
        token: token_source()?,
    })
}

/// A zero timeout would fail every request, so it falls back to the default.
fn nonzero_timeout(secs: u64) -> u64 {
    if secs == 0 {
        tracing::warn!(
            var = "CODEX_SHEETS_TIMEOUT_SECS",
            default = DEFAULT_SHEETS_TIMEOUT_SECS,
            "timeout must be positive, using default"
        );
        return DEFAULT_SHEETS_TIMEOUT_SECS;
    }
    secs
}

/// Google Sheets connector from the environment, or an in-memory sheet when
/// a seed file is given.
pub(crate) fn build_connector(memory_seed: Option<&Path>) -> Result<Arc<dyn SheetConnector>> {
    if let Some(seed) = memory_seed {
        let text = std::fs::read_to_string(seed)
            .with_context(|| format!("reading memory seed {}", seed.display()))?;
        let sheet = MemorySheet::from_json(&text)?;
        tracing::warn!(seed = %seed.display(), "using in-memory sheet; claims are not persisted");
        return Ok(Arc::new(sheet));
    }

    let config = sheets_config()?;
    tracing::info!(
        spreadsheet = %config.spreadsheet_id,
        worksheet = config.sheet_name.as_deref().unwrap_or("<first>"),
        timeout_secs = config.timeout.as_secs(),
        "using Google Sheets"
    );
    Ok(Arc::new(GoogleSheetsClient::new(config)?))
}
