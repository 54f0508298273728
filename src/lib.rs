//! A spreadsheet exposed as a row store.
//!
//! The first row of a sheet names the fields; every row below it is a record.
//! [`persistence::Table`] turns that grid into get/list/find/create/update/
//! delete/count operations over any [`persistence::TabularStore`], and
//! [`output`] wraps their answers as JSON payloads.

pub mod cli;
pub mod config;
pub mod output;
pub mod persistence;
pub mod sessions;
