use std::sync::Arc;

use codex_claim_core::{
    APPOGEE_COLUMN, CLAIMED_COLUMN, CLAIMED_MARKER, CODE_COLUMN, ClaimInput, ClaimOutcome,
    ClaimRequest, ClaimVariant, ContactDetails, DOB_COLUMN, EMAIL_COLUMN, KEY_COLUMN,
    MemberStatus, is_claimed_flag, normalize_name,
};
use codex_claim_sheets::{RowIndex, SheetConnector, SheetTable};
use tracing::Instrument;

use crate::ClaimError;
use crate::name_locks::NameLocks;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const CONTACT_REQUIRED: &str = "Name, email, appogee and date of birth are required.";

/// Orchestrates a claim: validate, connect, look up, check the flag, write.
pub struct ClaimService {
    connector: Arc<dyn SheetConnector>,
    variant: ClaimVariant,
    locks: NameLocks,
}

impl ClaimService {
    #[must_use]
    pub fn new(connector: Arc<dyn SheetConnector>, variant: ClaimVariant) -> Self {
        Self { connector, variant, locks: NameLocks::default() }
    }

    /// Checks required fields for the configured variant and normalizes the name.
    ///
    /// Blank (whitespace-only) values count as missing.
    pub fn validate(&self, input: &ClaimInput) -> Result<ClaimRequest, ClaimError> {
        let name = required(input.name.as_deref());

        if !self.variant.requires_contact() {
            let name = name.ok_or_else(|| ClaimError::Validation(NAME_REQUIRED.to_owned()))?;
            return Ok(ClaimRequest { normalized_name: normalize_name(name), contact: None });
        }

        match (
            name,
            required(input.email.as_deref()),
            required(input.appogee.as_deref()),
            required(input.dob.as_deref()),
        ) {
            (Some(name), Some(email), Some(appogee), Some(dob)) => Ok(ClaimRequest {
                normalized_name: normalize_name(name),
                contact: Some(ContactDetails {
                    email: email.to_owned(),
                    appogee: appogee.to_owned(),
                    dob: dob.to_owned(),
                }),
            }),
            _ => Err(ClaimError::Validation(CONTACT_REQUIRED.to_owned())),
        }
    }

    /// Runs the full claim sequence.
    ///
    /// Returns `Success` with the stored code and flags the row, or
    /// `NotFound` / `AlreadyClaimed` without writing anything.
    pub async fn claim(&self, input: &ClaimInput) -> Result<ClaimOutcome, ClaimError> {
        let request = self.validate(input)?;
        let span = tracing::info_span!(
            "claim",
            claim_id = %uuid::Uuid::new_v4(),
            name = %request.normalized_name,
        );
        self.claim_validated(request).instrument(span).await
    }

    async fn claim_validated(&self, request: ClaimRequest) -> Result<ClaimOutcome, ClaimError> {
        let table = self.connect().await?;

        // Held across lookup, flag check and write.
        let _guard = self.locks.acquire(&request.normalized_name).await;

        let Some(row) = table.find_row_by_key(&request.normalized_name, KEY_COLUMN).await? else {
            tracing::info!("no matching member");
            return Ok(ClaimOutcome::NotFound);
        };

        if row_is_claimed(table.as_ref(), row).await? {
            tracing::info!(row, "code already claimed");
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let code = table.read_cell(row, CODE_COLUMN).await?;

        let mut cells = vec![(CLAIMED_COLUMN, CLAIMED_MARKER.to_owned())];
        if let Some(contact) = request.contact {
            cells.push((EMAIL_COLUMN, contact.email));
            cells.push((APPOGEE_COLUMN, contact.appogee));
            cells.push((DOB_COLUMN, contact.dob));
        }
        table.write_cells(row, &cells).await?;

        tracing::info!(row, fields = cells.len(), "code claimed");
        Ok(ClaimOutcome::Success { code })
    }

    /// Reports a member's claim state without writing or revealing the code.
    pub async fn lookup(&self, name: &str) -> Result<MemberStatus, ClaimError> {
        let name = required(Some(name))
            .ok_or_else(|| ClaimError::Validation(NAME_REQUIRED.to_owned()))?;
        let normalized = normalize_name(name);
        let table = self.connect().await?;

        let Some(row) = table.find_row_by_key(&normalized, KEY_COLUMN).await? else {
            return Ok(MemberStatus::NotFound);
        };
        if row_is_claimed(table.as_ref(), row).await? {
            Ok(MemberStatus::Claimed)
        } else {
            Ok(MemberStatus::Unclaimed)
        }
    }

    async fn connect(&self) -> Result<Box<dyn SheetTable>, ClaimError> {
        self.connector.connect().await.map_err(ClaimError::Connection)
    }
}

async fn row_is_claimed(table: &dyn SheetTable, row: RowIndex) -> Result<bool, ClaimError> {
    let flag = table.read_cell(row, CLAIMED_COLUMN).await?;
    Ok(is_claimed_flag(&flag))
}

/// Trimmed value, or `None` when absent or blank.
fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
