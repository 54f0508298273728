//! Request-style entry points. Each one runs a single table operation against
//! the given store and wraps the outcome in a [`TextOutput`].

use crate::persistence::{Page, Row, StoreError, Table, TableError, TableReader, TabularStore};

use super::{Response, TextOutput};

fn respond(result: Result<Response, TableError>) -> Result<TextOutput, StoreError> {
    match result {
        Ok(response) => Ok(response.into_output()),
        Err(TableError::Store(error)) => Err(error),
        Err(error) => Ok(Response::error(&error).into_output()),
    }
}

pub fn get<S: TabularStore + ?Sized>(
    store: &S,
    id: &str,
    key_column: &str,
) -> Result<TextOutput, StoreError> {
    //! The row keyed by `id`, or `{"error": "not found"}`.

    respond(TableReader::new(store).get(id, key_column).map(Response::Row))
}

pub fn list<S: TabularStore + ?Sized>(
    store: &S,
    limit: Option<&str>,
    skip: Option<&str>,
    include_hidden: bool,
) -> Result<TextOutput, StoreError> {
    //! A page of rows. `limit` and `skip` are raw request text and go through
    //! [`crate::persistence::str_to_num`].

    let page = Page::from_params(limit, skip);
    let rows = TableReader::new(store).list(page, include_hidden)?;
    Ok(Response::Rows(rows).into_output())
}

pub fn find<S: TabularStore + ?Sized>(store: &S, term: &str) -> Result<TextOutput, StoreError> {
    let rows = TableReader::new(store).find(term)?;
    Ok(Response::Rows(rows).into_output())
}

pub fn create<S: TabularStore + ?Sized>(
    store: &mut S,
    obj: Row,
    key_column: &str,
) -> Result<TextOutput, StoreError> {
    //! The submitted row with its key filled in, or `{"error": "duplicate"}`.

    respond(Table::new(store).create(obj, key_column).map(Response::Row))
}

pub fn update<S: TabularStore + ?Sized>(
    store: &mut S,
    id: &str,
    obj: &Row,
    key_column: &str,
) -> Result<TextOutput, StoreError> {
    //! The row as stored after the merge, or `{"error": "not found"}`.

    respond(Table::new(store).update(id, obj, key_column).map(Response::Row))
}

pub fn remove<S: TabularStore + ?Sized>(
    store: &mut S,
    id: &str,
    key_column: &str,
) -> Result<TextOutput, StoreError> {
    //! `{"result": "ok"}` once the row is gone, or `{"error": "not found"}`.

    respond(
        Table::new(store)
            .delete(id, key_column)
            .map(|_| Response::ok()),
    )
}

pub fn remove_all<S: TabularStore + ?Sized>(store: &mut S) -> Result<TextOutput, StoreError> {
    Table::new(store).delete_all()?;
    Ok(Response::ok().into_output())
}

pub fn count<S: TabularStore + ?Sized>(store: &S) -> Result<TextOutput, StoreError> {
    let count = TableReader::new(store).count()?;
    Ok(Response::Count { count }.into_output())
}
