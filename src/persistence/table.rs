use std::collections::HashSet;

use log::{debug, warn};

use super::error::{StoreError, TableError};
use super::paging::{Page, Window};
use super::row::Row;
use super::schema::OrderedSchema;
use super::store::{CellPosition, CellRange, TabularStore};

/// Key column used when the caller does not name one.
pub const DEFAULT_KEY_COLUMN: &str = "id";

/// The result of a key lookup.
///
/// A miss is a valid state, not an error: `index` is `None` and `row` is
/// empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lookup {
    pub row: Row,
    pub index: Option<usize>,
}

impl Lookup {
    fn missing() -> Lookup {
        Lookup::default()
    }

    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }

    pub fn raw_index(&self) -> i64 {
        //! Physical row number of the match, `-1` on a miss.

        self.index.map_or(-1, |index| index as i64)
    }
}

/// Read-only operations over a [`TabularStore`].
///
/// Nothing is cached between calls; every operation resolves the header and
/// the table bounds again, since the store may be edited out of band.
pub struct TableReader<'a, S: TabularStore + ?Sized> {
    store: &'a S,
}

/// Read and write operations over a [`TabularStore`].
///
/// The store is the only source of truth. A [`Table`] is a borrowed view that
/// holds no state of its own, so building one per request is free.
pub struct Table<'a, S: TabularStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: TabularStore + ?Sized> TableReader<'a, S> {
    pub fn new(store: &'a S) -> TableReader<'a, S> {
        TableReader { store }
    }

    pub fn columns(&self) -> Result<OrderedSchema, StoreError> {
        //! Resolve the header row.
        //!
        //! Returns an empty schema for a store with no columns at all.

        let last_column = self.store.last_column()?;
        if last_column == 0 {
            return Ok(OrderedSchema::default());
        }

        let header = self
            .store
            .read_range(CellRange::new(1, 1, 1, last_column))?
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(OrderedSchema::new(header))
    }

    pub fn lookup(&self, id: &str, key_column: &str) -> Result<Lookup, StoreError> {
        //! Find the first data row whose key cell equals `id`.
        //!
        //! - The key column is read in one bulk call and compared as text.
        //! - An unknown key column degrades to column 1.
        //! - The first physical match wins; later duplicates are invisible.
        //! - The matched row is materialized across the header, hidden columns
        //!   included, tombstone columns left out.

        let schema = self.columns()?;
        let last_row = self.store.last_row()?;

        if last_row < 2 {
            debug!("lookup {}={}: table has no data rows", key_column, id);
            return Ok(Lookup::missing());
        }

        let key_position = schema.key_position(key_column);
        let keys = self
            .store
            .read_range(CellRange::new(2, key_position, last_row - 1, 1))?;

        let Some(offset) = keys
            .iter()
            .position(|cells| cells.first().map(String::as_str).unwrap_or("") == id)
        else {
            debug!("lookup {}={}: no match", key_column, id);
            return Ok(Lookup::missing());
        };

        let index = offset + 2;
        let row = self.materialize(&schema, index, true)?;
        debug!("lookup {}={}: row {}", key_column, id, index);

        Ok(Lookup {
            row,
            index: Some(index),
        })
    }

    pub fn get(&self, id: &str, key_column: &str) -> Result<Row, TableError> {
        //! [`TableReader::lookup`] with a miss turned into
        //! [`TableError::NotFound`].

        let lookup = self.lookup(id, key_column)?;
        match lookup.index {
            Some(_) => Ok(lookup.row),
            None => Err(TableError::NotFound),
        }
    }

    pub fn list(&self, page: Page, include_hidden: bool) -> Result<Vec<Row>, StoreError> {
        //! Data rows in physical order, windowed by `page`.
        //!
        //! Columns starting with `_` are dropped unless `include_hidden` is set.

        let schema = self.columns()?;
        let last_row = self.store.last_row()?;

        let cells: Vec<Vec<String>> = match page.window(last_row) {
            Window::Everything => self.store.read_data_range()?.into_iter().skip(1).collect(),
            Window::Rows { start, num_rows } => {
                let rows = self
                    .store
                    .read_range(CellRange::new(start, 1, num_rows, schema.len()))?;
                page.truncate(rows)
            }
            Window::PastEnd => vec![Vec::new()],
            Window::Empty => Vec::new(),
        };

        debug!(
            "list limit={} skip={}: {} row(s) of {}",
            page.limit,
            page.skip,
            cells.len(),
            last_row.saturating_sub(1)
        );

        Ok(cells
            .iter()
            .map(|cells| schema.zip(cells, include_hidden))
            .collect())
    }

    pub fn find(&self, term: &str) -> Result<Vec<Row>, StoreError> {
        //! Rows holding `term`, one entry per matching cell, in the order the
        //! store's cursor reports them.
        //!
        //! Hidden columns are NOT filtered here, unlike [`TableReader::list`].
        //! The scan stops as soon as the cursor reports a cell it already
        //! reported.

        if term.is_empty() {
            return Ok(Vec::new());
        }

        let schema = self.columns()?;
        let mut finder = self.store.create_text_finder(term)?;
        let mut seen: HashSet<CellPosition> = HashSet::new();
        let mut rows = Vec::new();

        while let Some(position) = finder.find_next()? {
            if !seen.insert(position) {
                warn!(
                    "find {:?}: cursor repeated row {}, column {}; stopping",
                    term, position.row, position.column
                );
                break;
            }

            rows.push(self.materialize(&schema, position.row, true)?);
        }

        debug!("find {:?}: {} match(es)", term, rows.len());
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        //! Number of data rows, from the table bounds alone.

        Ok(self.store.last_row()?.saturating_sub(1))
    }

    fn materialize(
        &self,
        schema: &OrderedSchema,
        row: usize,
        include_hidden: bool,
    ) -> Result<Row, StoreError> {
        if schema.is_empty() {
            return Ok(Row::new());
        }

        let cells = self
            .store
            .read_range(CellRange::new(row, 1, 1, schema.len()))?
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(schema.zip(&cells, include_hidden))
    }
}

impl<'a, S: TabularStore + ?Sized> Table<'a, S> {
    pub fn new(store: &'a mut S) -> Table<'a, S> {
        Table { store }
    }

    pub fn reader(&self) -> TableReader<'_, S> {
        //! Borrow the table for read queries.

        TableReader::new(&*self.store)
    }

    pub fn create(&mut self, mut obj: Row, key_column: &str) -> Result<Row, TableError> {
        //! Append `obj` as a new row.
        //!
        //! - A missing or empty key gets a store-generated id.
        //! - An existing row with the same key aborts with
        //!   [`TableError::Duplicate`] before anything is written.
        //! - Fields with no header column are dropped.
        //!
        //! Returns `obj` as submitted, key included, not a re-read of the row.

        if obj.get(key_column).is_none_or(str::is_empty) {
            obj.insert(key_column, self.store.generate_id());
        }

        let key = obj.get(key_column).unwrap_or_default().to_string();
        let existing = self.reader().lookup(&key, key_column)?;
        if !existing.row.is_empty() {
            debug!("create {}={}: duplicate of row {}", key_column, key, existing.raw_index());
            return Err(TableError::Duplicate);
        }

        let schema = self.reader().columns()?;
        let new_row = self.store.last_row()? + 1;
        self.write_fields(&schema, new_row, &obj)?;

        debug!("create {}={}: row {}", key_column, key, new_row);
        Ok(obj)
    }

    pub fn update(&mut self, id: &str, obj: &Row, key_column: &str) -> Result<Row, TableError> {
        //! Merge `obj` into the row keyed by `id`.
        //!
        //! Only the fields present in `obj` are overwritten. The answer is a
        //! fresh [`TableReader::get`] of `id`, so an update that moves the key
        //! away from `id` answers [`TableError::NotFound`].

        let reader = self.reader();
        let schema = reader.columns()?;
        let Some(index) = reader.lookup(id, key_column)?.index else {
            debug!("update {}={}: not found", key_column, id);
            return Err(TableError::NotFound);
        };

        self.write_fields(&schema, index, obj)?;
        debug!("update {}={}: row {}", key_column, id, index);

        self.reader().get(id, key_column)
    }

    pub fn delete(&mut self, id: &str, key_column: &str) -> Result<(), TableError> {
        //! Physically remove the row keyed by `id`.

        let Some(index) = self.reader().lookup(id, key_column)?.index else {
            debug!("delete {}={}: not found", key_column, id);
            return Err(TableError::NotFound);
        };

        self.store.delete_row(index)?;
        debug!("delete {}={}: row {}", key_column, id, index);
        Ok(())
    }

    pub fn delete_all(&mut self) -> Result<usize, StoreError> {
        //! Remove every data row in one call, keeping the header.
        //!
        //! Returns the number of rows removed; an empty table is left alone.

        let n_rows = self.store.last_row()?.saturating_sub(1);
        if n_rows > 0 {
            self.store.delete_rows(2, n_rows)?;
        }

        debug!("delete all: {} row(s)", n_rows);
        Ok(n_rows)
    }

    fn write_fields(
        &mut self,
        schema: &OrderedSchema,
        row: usize,
        obj: &Row,
    ) -> Result<(), StoreError> {
        for (column, name) in schema.fields() {
            if let Some(value) = obj.get(name) {
                self.store.write_cell(row, column, value)?;
            }
        }
        Ok(())
    }
}
