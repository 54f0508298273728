use std::{fs, path::Path};

use indexmap::IndexMap;
use log::info;

use super::error::WorkbookError;
use super::memory::InMemoryStore;

/// A single place to keep every sheet of a session.
///
/// A [`Workbook`] is an ordered registry of named [`InMemoryStore`] sheets,
/// based on an [`IndexMap`] so sheets always list in the order they were
/// added. It can be written to and read back from a JSON file, which is how
/// the CLI keeps data between runs.
///
/// The registry does not know anything about keys or headers beyond creating
/// a sheet with one; all record semantics live in [`super::Table`].
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: IndexMap<String, InMemoryStore>,
}

impl Workbook {
    pub fn new() -> Workbook {
        Workbook {
            sheets: IndexMap::new(),
        }
    }

    pub fn exists(&self, sheet_name: &str) -> bool {
        self.sheets.contains_key(sheet_name)
    }

    pub fn create_sheet(
        &mut self,
        sheet_name: &str,
        columns: &[String],
        if_not_exists: bool,
    ) -> Result<&mut InMemoryStore, WorkbookError> {
        //! Add a sheet whose row 1 is `columns`.
        //!
        //! Fails when a sheet with the same name is already registered, unless
        //! `if_not_exists` is set, in which case that sheet is returned as is.

        if self.sheets.contains_key(sheet_name) {
            if !if_not_exists {
                return Err(WorkbookError::SheetExists(sheet_name.to_string()));
            }
        } else {
            if columns.is_empty() {
                return Err(WorkbookError::EmptyHeader);
            }

            self.sheets
                .insert(sheet_name.to_string(), InMemoryStore::with_header(columns));
            info!("sheet '{}' created with {} column(s)", sheet_name, columns.len());
        }

        self.sheet_mut(sheet_name)
    }

    pub fn insert_sheet(&mut self, sheet_name: &str, store: InMemoryStore) {
        //! Register an already populated sheet, replacing any sheet of the
        //! same name.

        self.sheets.insert(sheet_name.to_string(), store);
    }

    pub fn sheet(&self, sheet_name: &str) -> Result<&InMemoryStore, WorkbookError> {
        self.sheets
            .get(sheet_name)
            .ok_or_else(|| WorkbookError::NoSuchSheet(sheet_name.to_string()))
    }

    pub fn sheet_mut(&mut self, sheet_name: &str) -> Result<&mut InMemoryStore, WorkbookError> {
        self.sheets
            .get_mut(sheet_name)
            .ok_or_else(|| WorkbookError::NoSuchSheet(sheet_name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    pub fn drop_sheet(&mut self, sheet_name: &str) -> Option<InMemoryStore> {
        //! Remove a sheet, keeping the order of the others.

        self.sheets.shift_remove(sheet_name)
    }

    pub fn load(path: &Path) -> Result<Workbook, WorkbookError> {
        //! Read a workbook written by [`Workbook::save`].

        let text = fs::read_to_string(path)?;
        let sheets: IndexMap<String, InMemoryStore> = serde_json::from_str(&text)?;
        info!("workbook loaded from {} ({} sheet(s))", path.display(), sheets.len());

        Ok(Workbook { sheets })
    }

    pub fn load_or_default(path: &Path) -> Result<Workbook, WorkbookError> {
        //! Like [`Workbook::load`], but a missing file is a fresh workbook.

        if path.exists() {
            Workbook::load(path)
        } else {
            info!("no workbook at {}; starting empty", path.display());
            Ok(Workbook::new())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), WorkbookError> {
        let text = serde_json::to_string_pretty(&self.sheets)?;
        fs::write(path, text)?;
        info!("workbook saved to {}", path.display());
        Ok(())
    }
}
