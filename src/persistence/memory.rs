use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;
use super::store::{CellPosition, CellRange, TabularStore, TextFinder};

/// A grid of cells held in memory.
///
/// This is the [`TabularStore`] the CLI works against and the fake the tests
/// use. Rows may be ragged; anything not stored reads as empty text, and the
/// "used" area is decided by the last non-empty cell, the same way hosted
/// spreadsheets report it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryStore {
    cells: Vec<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore { cells: Vec::new() }
    }

    pub fn with_header<S: AsRef<str>>(columns: &[S]) -> InMemoryStore {
        //! A store holding only a header row.

        let header = columns.iter().map(|c| c.as_ref().to_string()).collect();
        InMemoryStore {
            cells: vec![header],
        }
    }

    pub fn from_rows(cells: Vec<Vec<String>>) -> InMemoryStore {
        //! A store seeded with raw rows, header first.

        InMemoryStore { cells }
    }

    pub fn push_row<S: AsRef<str>>(&mut self, values: &[S]) {
        //! Append a raw row right below the last stored row.

        self.cells
            .push(values.iter().map(|v| v.as_ref().to_string()).collect());
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        //! Text of one cell, `""` when nothing is stored there.

        if row == 0 || column == 0 {
            return "";
        }

        self.cells
            .get(row - 1)
            .and_then(|cells| cells.get(column - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn used_rows(&self) -> usize {
        self.cells
            .iter()
            .rposition(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |index| index + 1)
    }

    fn used_columns(&self) -> usize {
        self.cells
            .iter()
            .filter_map(|cells| cells.iter().rposition(|cell| !cell.is_empty()))
            .map(|index| index + 1)
            .max()
            .unwrap_or(0)
    }

    fn block(&self, range: CellRange) -> Vec<Vec<String>> {
        (range.row..range.row + range.num_rows)
            .map(|row| {
                (range.column..range.column + range.num_columns)
                    .map(|column| self.cell(row, column).to_string())
                    .collect()
            })
            .collect()
    }
}

impl TabularStore for InMemoryStore {
    fn last_row(&self) -> Result<usize, StoreError> {
        Ok(self.used_rows())
    }

    fn last_column(&self) -> Result<usize, StoreError> {
        Ok(self.used_columns())
    }

    fn read_range(&self, range: CellRange) -> Result<Vec<Vec<String>>, StoreError> {
        if !range.is_valid() {
            return Err(range.invalid());
        }

        Ok(self.block(range))
    }

    fn read_data_range(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let (rows, columns) = (self.used_rows(), self.used_columns());
        if rows == 0 || columns == 0 {
            return Ok(Vec::new());
        }

        Ok(self.block(CellRange::new(1, 1, rows, columns)))
    }

    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> Result<(), StoreError> {
        if row == 0 || column == 0 {
            return Err(CellRange::new(row, column, 1, 1).invalid());
        }

        if self.cells.len() < row {
            self.cells.resize_with(row, Vec::new);
        }
        let cells = &mut self.cells[row - 1];
        if cells.len() < column {
            cells.resize(column, String::new());
        }
        cells[column - 1] = value.to_string();

        Ok(())
    }

    fn delete_row(&mut self, row: usize) -> Result<(), StoreError> {
        self.delete_rows(row, 1)
    }

    fn delete_rows(&mut self, start: usize, count: usize) -> Result<(), StoreError> {
        if start == 0 || count == 0 {
            return Err(CellRange::new(start, 1, count, 1).invalid());
        }

        let end = start - 1 + count;
        if end > self.cells.len() {
            return Err(StoreError::RowOutOfBounds(end));
        }

        self.cells.drain(start - 1..end);
        Ok(())
    }

    fn create_text_finder<'a>(
        &'a self,
        term: &str,
    ) -> Result<Box<dyn TextFinder + 'a>, StoreError> {
        if term.is_empty() {
            return Err(StoreError::Backend(
                "invalid argument: empty search term".to_string(),
            ));
        }

        Ok(Box::new(MemoryTextFinder {
            store: self,
            needle: term.to_lowercase(),
            last_row: self.used_rows(),
            last_column: self.used_columns(),
            next: CellPosition { row: 2, column: 1 },
        }))
    }

    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl Display for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.cells.iter().map(|cells| cells.join(" | ")).collect();
        write!(f, "{}", rows.join("\n"))
    }
}

/// Row-major, case-insensitive substring search over rows 2 and below.
struct MemoryTextFinder<'a> {
    store: &'a InMemoryStore,
    needle: String,
    last_row: usize,
    last_column: usize,
    next: CellPosition,
}

impl TextFinder for MemoryTextFinder<'_> {
    fn find_next(&mut self) -> Result<Option<CellPosition>, StoreError> {
        while self.next.row <= self.last_row && self.last_column > 0 {
            let here = self.next;

            if here.column >= self.last_column {
                self.next = CellPosition {
                    row: here.row + 1,
                    column: 1,
                };
            } else {
                self.next.column += 1;
            }

            let text = self.store.cell(here.row, here.column).to_lowercase();
            if text.contains(&self.needle) {
                return Ok(Some(here));
            }
        }

        Ok(None)
    }
}
