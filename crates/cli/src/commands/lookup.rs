use anyhow::Result;
use codex_claim_core::normalize_name;
use codex_claim_service::ClaimService;
use std::path::PathBuf;

use crate::config::{build_connector, claim_variant};

pub(crate) async fn run(name: &str, memory_seed: Option<PathBuf>) -> Result<()> {
    let connector = build_connector(memory_seed.as_deref())?;
    let service = ClaimService::new(connector, claim_variant()?);
    let status = service.lookup(name).await?;
    let report = serde_json::json!({
        "name": normalize_name(name),
        "status": status,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
