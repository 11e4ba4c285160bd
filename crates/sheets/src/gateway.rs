//! Gateway trait abstraction
//!
//! Splits session setup (`SheetConnector`) from row-level access
//! (`SheetTable`) so callers can open a fresh table handle per request.

use async_trait::async_trait;

use crate::error::SheetError;

/// 1-based row index in the worksheet.
pub type RowIndex = u32;

/// Opens authenticated sessions against a tabular store.
#[async_trait]
pub trait SheetConnector: Send + Sync {
    /// Establish a session and return a handle to the member worksheet.
    ///
    /// No retry: the caller re-invokes per request.
    async fn connect(&self) -> Result<Box<dyn SheetTable>, SheetError>;
}

/// Cell-level access to one worksheet. Every write is an immediate remote
/// mutation.
#[async_trait]
pub trait SheetTable: Send + Sync {
    /// First row whose cell in `column` equals `key` exactly, or `None`.
    async fn find_row_by_key(
        &self,
        key: &str,
        column: u32,
    ) -> Result<Option<RowIndex>, SheetError>;

    /// Cell value; empty cells read as `""`.
    async fn read_cell(&self, row: RowIndex, column: u32) -> Result<String, SheetError>;

    /// Overwrite one cell.
    async fn write_cell(&self, row: RowIndex, column: u32, value: &str) -> Result<(), SheetError>;

    /// Overwrite several cells of one row in a single remote call.
    async fn write_cells(&self, row: RowIndex, cells: &[(u32, String)]) -> Result<(), SheetError>;
}
