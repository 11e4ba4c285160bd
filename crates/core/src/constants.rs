//! Shared constants for codex-claim.
//!
//! Column positions are 1-based, matching spreadsheet coordinates.

/// Column holding the secret redemption code (B).
pub const CODE_COLUMN: u32 = 2;

/// Column holding the claimed flag (C).
pub const CLAIMED_COLUMN: u32 = 3;

/// Column receiving the claimant's email (D).
pub const EMAIL_COLUMN: u32 = 4;

/// Column holding the normalized member name, the lookup key (E).
pub const KEY_COLUMN: u32 = 5;

/// Column receiving the claimant's appogee (F).
pub const APPOGEE_COLUMN: u32 = 6;

/// Column receiving the claimant's date of birth (G).
pub const DOB_COLUMN: u32 = 7;

/// Literal written to the claimed flag column.
pub const CLAIMED_MARKER: &str = "TRUE";

/// Default Google Sheets API base URL.
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// Default transport timeout for spreadsheet calls, in seconds.
pub const DEFAULT_SHEETS_TIMEOUT_SECS: u64 = 30;
