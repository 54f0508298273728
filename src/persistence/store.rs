//! The seam between the adapter and whatever actually holds the cells.
//!
//! Every coordinate here is 1-based, like the spreadsheet hosts this crate
//! was built against: row 1 is the header, column 1 is the leftmost column.

use super::error::StoreError;

/// A rectangular block of cells, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub row: usize,
    pub column: usize,
    pub num_rows: usize,
    pub num_columns: usize,
}

impl CellRange {
    pub fn new(row: usize, column: usize, num_rows: usize, num_columns: usize) -> CellRange {
        CellRange {
            row,
            column,
            num_rows,
            num_columns,
        }
    }

    pub fn is_valid(&self) -> bool {
        //! Hosts refuse ranges that are anchored at 0 or hold no cells.

        self.row >= 1 && self.column >= 1 && self.num_rows >= 1 && self.num_columns >= 1
    }

    pub(crate) fn invalid(&self) -> StoreError {
        StoreError::InvalidRange {
            row: self.row,
            column: self.column,
            num_rows: self.num_rows,
            num_columns: self.num_columns,
        }
    }
}

/// The location of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

/// A search cursor handed out by [`TabularStore::create_text_finder`].
///
/// Each call moves past the previous match and reports the next cell whose
/// text matches, or `None` once the data region is exhausted.
pub trait TextFinder {
    fn find_next(&mut self) -> Result<Option<CellPosition>, StoreError>;
}

/// Grid storage the table adapter is built on.
///
/// Calls are blocking and are treated as atomic enough for a single writer.
/// Implementations report their own faults through [`StoreError`]; the
/// adapter never retries.
pub trait TabularStore {
    /// Last row holding any content, 0 for an empty store.
    fn last_row(&self) -> Result<usize, StoreError>;

    /// Last column holding any content, 0 for an empty store.
    fn last_column(&self) -> Result<usize, StoreError>;

    /// Read `range` as rows of cell text. Empty cells read as `""`.
    fn read_range(&self, range: CellRange) -> Result<Vec<Vec<String>>, StoreError>;

    /// Read the whole used area, header row included.
    fn read_data_range(&self) -> Result<Vec<Vec<String>>, StoreError>;

    fn write_cell(&mut self, row: usize, column: usize, value: &str) -> Result<(), StoreError>;

    /// Remove one physical row, shifting every row below it up.
    fn delete_row(&mut self, row: usize) -> Result<(), StoreError>;

    /// Remove `count` physical rows starting at `start`.
    fn delete_rows(&mut self, start: usize, count: usize) -> Result<(), StoreError>;

    /// Cursor over the cells of the data region that contain `term`.
    fn create_text_finder<'a>(
        &'a self,
        term: &str,
    ) -> Result<Box<dyn TextFinder + 'a>, StoreError>;

    /// A fresh, globally unique identifier.
    fn generate_id(&self) -> String;
}
