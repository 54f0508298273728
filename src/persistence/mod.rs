//! Persistence as sheets needs to have the following components
//! - Store (the grid of cells, external or in memory, behind one trait)
//! - Schema (the header row; order is important, names decide field mapping)
//! - Row (column name to text, built from a Schema and a row of cells)
//! - Table (key lookup, pagination, search and mutations over a Store)
//! - Workbook (named sheets kept together for a session)
//!

//  All modules of this lib
mod error;
mod memory;
mod paging;
mod row;
mod schema;
mod store;
mod table;
mod workbook;

//  External API
pub use error::{StoreError, TableError, WorkbookError};
pub use memory::InMemoryStore;
pub use paging::{Page, str_to_num};
pub use row::Row;
pub use schema::{HIDDEN_PREFIX, OrderedSchema};
pub use store::{CellPosition, CellRange, TabularStore, TextFinder};
pub use table::{DEFAULT_KEY_COLUMN, Lookup, Table, TableReader};
pub use workbook::Workbook;
