//! In-memory worksheet.
//!
//! Backs tests and local runs without spreadsheet credentials. Every write is
//! recorded so callers can assert on exactly what was mutated, and connect or
//! write failures can be injected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::SheetError;
use crate::gateway::{RowIndex, SheetConnector, SheetTable};

/// One recorded cell mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: RowIndex,
    pub column: u32,
    pub value: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<Vec<String>>,
    writes: Vec<CellWrite>,
    write_calls: usize,
    fail_connect: bool,
    fail_writes: bool,
}

/// Shared grid of cells; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySheet {
    /// Grid from rows of cells; `rows[0]` is spreadsheet row 1.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { state: Arc::new(Mutex::new(MemoryState { rows, ..MemoryState::default() })) }
    }

    /// Grid from a JSON array of string arrays.
    ///
    /// # Errors
    /// Returns an error if the text is not an array of string arrays.
    pub fn from_json(text: &str) -> Result<Self, SheetError> {
        let rows: Vec<Vec<String>> = serde_json::from_str(text).map_err(|e| {
            SheetError::JsonParse { context: "memory sheet seed".to_owned(), source: e }
        })?;
        Ok(Self::new(rows))
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current value of a cell, `""` when outside the grid.
    #[must_use]
    pub fn cell(&self, row: RowIndex, column: u32) -> String {
        let state = self.lock();
        get_cell(&state.rows, row, column)
    }

    /// Every cell write applied so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<CellWrite> {
        self.lock().writes.clone()
    }

    /// Number of write calls (a batched write counts once).
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.lock().write_calls
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.lock().fail_connect = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

fn get_cell(rows: &[Vec<String>], row: RowIndex, column: u32) -> String {
    let (Some(r), Some(c)) = (row.checked_sub(1), column.checked_sub(1)) else {
        return String::new();
    };
    rows.get(r as usize).and_then(|cells| cells.get(c as usize)).cloned().unwrap_or_default()
}

fn check_coordinate(row: RowIndex, column: u32) -> Result<(), SheetError> {
    if row == 0 || column == 0 {
        return Err(SheetError::InvalidCoordinate { row, column });
    }
    Ok(())
}

fn apply(state: &mut MemoryState, row: RowIndex, column: u32, value: &str) {
    let r = (row - 1) as usize;
    let c = (column - 1) as usize;
    if state.rows.len() <= r {
        state.rows.resize_with(r + 1, Vec::new);
    }
    let cells = &mut state.rows[r];
    if cells.len() <= c {
        cells.resize(c + 1, String::new());
    }
    cells[c] = value.to_owned();
    state.writes.push(CellWrite { row, column, value: value.to_owned() });
}

#[async_trait]
impl SheetConnector for MemorySheet {
    async fn connect(&self) -> Result<Box<dyn SheetTable>, SheetError> {
        if self.lock().fail_connect {
            return Err(SheetError::Connection("injected connect failure".to_owned()));
        }
        Ok(Box::new(self.clone()))
    }
}

// Each operation yields first, the way a remote round trip would, so
// concurrent callers interleave.
#[async_trait]
impl SheetTable for MemorySheet {
    async fn find_row_by_key(
        &self,
        key: &str,
        column: u32,
    ) -> Result<Option<RowIndex>, SheetError> {
        tokio::task::yield_now().await;
        check_coordinate(1, column)?;
        let state = self.lock();
        let c = (column - 1) as usize;
        let found = state
            .rows
            .iter()
            .position(|cells| cells.get(c).is_some_and(|v| v == key))
            .map(|idx| u32::try_from(idx + 1))
            .transpose()
            .map_err(|_| SheetError::InvalidCoordinate { row: u32::MAX, column })?;
        Ok(found)
    }

    async fn read_cell(&self, row: RowIndex, column: u32) -> Result<String, SheetError> {
        tokio::task::yield_now().await;
        check_coordinate(row, column)?;
        Ok(self.cell(row, column))
    }

    async fn write_cell(&self, row: RowIndex, column: u32, value: &str) -> Result<(), SheetError> {
        tokio::task::yield_now().await;
        check_coordinate(row, column)?;
        let mut state = self.lock();
        if state.fail_writes {
            return Err(SheetError::Injected("write rejected".to_owned()));
        }
        state.write_calls += 1;
        apply(&mut state, row, column, value);
        Ok(())
    }

    async fn write_cells(&self, row: RowIndex, cells: &[(u32, String)]) -> Result<(), SheetError> {
        tokio::task::yield_now().await;
        for (column, _) in cells {
            check_coordinate(row, *column)?;
        }
        let mut state = self.lock();
        if state.fail_writes {
            return Err(SheetError::Injected("batch write rejected".to_owned()));
        }
        state.write_calls += 1;
        for (column, value) in cells {
            apply(&mut state, row, *column, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> MemorySheet {
        MemorySheet::new(vec![
            vec!["id", "hash", "taken", "email", "normalized_name"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            vec!["1", "AAA111", "", "", "JANE SMITH"].into_iter().map(str::to_owned).collect(),
            vec!["2", "BBB222", "TRUE", "", "JOHN ROE"].into_iter().map(str::to_owned).collect(),
            vec!["3", "CCC333", "", "", "JANE SMITH"].into_iter().map(str::to_owned).collect(),
        ])
    }

    #[tokio::test]
    async fn test_find_first_match_wins() {
        let sheet = grid();
        assert_eq!(sheet.find_row_by_key("JANE SMITH", 5).await.unwrap(), Some(2));
        assert_eq!(sheet.find_row_by_key("JOHN ROE", 5).await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_find_is_exact() {
        let sheet = grid();
        assert_eq!(sheet.find_row_by_key("jane smith", 5).await.unwrap(), None);
        assert_eq!(sheet.find_row_by_key("JANE", 5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_outside_grid_is_empty() {
        let sheet = grid();
        assert_eq!(sheet.read_cell(2, 2).await.unwrap(), "AAA111");
        assert_eq!(sheet.read_cell(40, 2).await.unwrap(), "");
        assert_eq!(sheet.read_cell(2, 9).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_zero_coordinate_rejected() {
        let sheet = grid();
        assert!(matches!(
            sheet.read_cell(0, 2).await,
            Err(SheetError::InvalidCoordinate { row: 0, column: 2 })
        ));
    }

    #[tokio::test]
    async fn test_write_cells_extends_row_and_records() {
        let sheet = grid();
        sheet
            .write_cells(2, &[(3, "TRUE".to_owned()), (7, "2000-01-01".to_owned())])
            .await
            .unwrap();
        assert_eq!(sheet.cell(2, 3), "TRUE");
        assert_eq!(sheet.cell(2, 7), "2000-01-01");
        assert_eq!(sheet.write_calls(), 1);
        assert_eq!(sheet.writes().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_row_untouched() {
        let sheet = grid();
        sheet.set_fail_writes(true);
        let result = sheet.write_cells(2, &[(3, "TRUE".to_owned()), (4, "a@b.c".to_owned())]).await;
        assert!(matches!(result, Err(SheetError::Injected(_))));
        assert_eq!(sheet.cell(2, 3), "");
        assert_eq!(sheet.cell(2, 4), "");
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_injected_connect_failure() {
        let sheet = grid();
        sheet.set_fail_connect(true);
        let err = sheet.connect().await.err().unwrap();
        assert!(err.is_connection());
    }

    #[test]
    fn test_from_json() {
        let sheet = MemorySheet::from_json(r#"[["", "X1", "", "", "AMY"]]"#).unwrap();
        assert_eq!(sheet.cell(1, 5), "AMY");
        assert!(MemorySheet::from_json(r#"{"rows": 1}"#).is_err());
    }
}
