use std::path::PathBuf;

use ferrum_sheets::persistence::{
    DEFAULT_KEY_COLUMN, Row, Table, TableReader, Workbook, WorkbookError,
};

fn _prepare_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    workbook
        .create_sheet(
            "users",
            &["id".to_string(), "name".to_string()],
            false,
        )
        .expect("invalid header or sheet exists already");
    workbook
}

fn _scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ferrum_sheets_{}_{}.json", name, std::process::id()))
}

#[test]
fn workbook_create_sheet() {
    let workbook = _prepare_workbook();

    assert!(workbook.exists("users"));
    assert_eq!(workbook.sheet_names(), vec!["users".to_string()]);
}

#[test]
fn workbook_create_existing_sheet() {
    let mut workbook = _prepare_workbook();

    let again = workbook.create_sheet("users", &["id".to_string()], false);
    assert!(matches!(again, Err(WorkbookError::SheetExists(_))));

    let reused = workbook.create_sheet("users", &[], true);
    assert!(reused.is_ok());
}

#[test]
fn workbook_create_sheet_without_columns() {
    let mut workbook = Workbook::new();

    assert!(matches!(
        workbook.create_sheet("empty", &[], false),
        Err(WorkbookError::EmptyHeader)
    ));
}

#[test]
fn workbook_sheets_keep_their_order() {
    let mut workbook = _prepare_workbook();
    workbook.create_sheet("orders", &["id".to_string()], false).unwrap();
    workbook.create_sheet("items", &["id".to_string()], false).unwrap();

    workbook.drop_sheet("orders").unwrap();

    assert_eq!(
        workbook.sheet_names(),
        vec!["users".to_string(), "items".to_string()]
    );
    assert!(matches!(
        workbook.sheet("orders"),
        Err(WorkbookError::NoSuchSheet(_))
    ));
}

#[test]
fn workbook_save_and_load() {
    let mut workbook = _prepare_workbook();
    {
        let store = workbook.sheet_mut("users").unwrap();
        let row: Row = [("id", "1"), ("name", "Jansen")].into_iter().collect();
        Table::new(store).create(row, DEFAULT_KEY_COLUMN).unwrap();
    }

    let path = _scratch_file("save_and_load");
    workbook.save(&path).unwrap();
    let loaded = Workbook::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let store = loaded.sheet("users").unwrap();
    let row = TableReader::new(store).get("1", DEFAULT_KEY_COLUMN).unwrap();
    assert_eq!(row.get("name"), Some("Jansen"));
}

#[test]
fn workbook_load_missing_file() {
    let path = _scratch_file("never_written");

    assert!(matches!(Workbook::load(&path), Err(WorkbookError::Io(_))));
    assert!(Workbook::load_or_default(&path).unwrap().sheet_names().is_empty());
}
