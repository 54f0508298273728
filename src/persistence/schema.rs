use std::fmt::Display;

use super::row::Row;

/// Prefix that marks a column as hidden from default listings.
pub const HIDDEN_PREFIX: char = '_';

/// The header of a table, in physical column order.
///
/// Resolved fresh from the store on every operation; the store can be edited
/// behind the adapter's back so nothing here is ever cached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedSchema(Vec<String>);

impl OrderedSchema {
    pub fn new(columns: Vec<String>) -> OrderedSchema {
        //! Create a schema from header cells, left to right.

        OrderedSchema(columns)
    }

    pub fn names(&self) -> &[String] {
        self.0.as_ref()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        //! Column name at the 0-based `index`.

        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, column_name: &str) -> Option<usize> {
        //! 1-based store column of the first header cell named `column_name`.

        self.0
            .iter()
            .position(|name| name == column_name)
            .map(|index| index + 1)
    }

    pub fn key_position(&self, key_column: &str) -> usize {
        //! Column holding the record keys.
        //!
        //! Never fails: a key column missing from the header degrades to
        //! comparing against column 1.

        self.position(key_column).unwrap_or(1)
    }

    pub fn is_tombstone(&self, index: usize) -> bool {
        self.get(index).is_some_and(str::is_empty)
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.get(index)
            .is_some_and(|name| name.starts_with(HIDDEN_PREFIX))
    }

    pub fn fields(&self) -> impl Iterator<Item = (usize, &str)> {
        //! Real fields only, as `(1-based column, name)` pairs.
        //!
        //! Tombstones are skipped and a repeated name is reported once, at its
        //! first column, which is where writes land.

        self.0
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter(|(index, name)| self.position(name) == Some(index + 1))
            .map(|(index, name)| (index + 1, name.as_str()))
    }

    pub fn zip(&self, cells: &[String], include_hidden: bool) -> Row {
        //! Build a [`Row`] by pairing header names with `cells`.
        //!
        //! Tombstone columns never become fields. Hidden columns are kept only
        //! when `include_hidden` is set. A short row leaves its missing
        //! trailing fields out; with repeated names the rightmost cell wins.

        let mut row = Row::new();

        for (index, (name, value)) in self.0.iter().zip(cells).enumerate() {
            if name.is_empty() {
                continue;
            }
            if !include_hidden && self.is_hidden(index) {
                continue;
            }

            row.insert(name.clone(), value.clone());
        }

        row
    }
}

impl Display for OrderedSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedSchema;

    fn schema(names: &[&str]) -> OrderedSchema {
        OrderedSchema::new(names.iter().map(|name| name.to_string()).collect())
    }

    #[test]
    fn key_position_falls_back_to_first_column() {
        let header = schema(&["name", "id"]);

        assert_eq!(header.key_position("id"), 2);
        assert_eq!(header.key_position("missing"), 1);
    }

    #[test]
    fn zip_skips_tombstones_and_filters_hidden() {
        let header = schema(&["id", "", "_secret", "name"]);
        let cells: Vec<String> = ["1", "junk", "s3", "Jansen"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        let visible = header.zip(&cells, false);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible.get("name"), Some("Jansen"));
        assert!(!visible.contains("_secret"));
        assert!(!visible.contains(""));

        let all = header.zip(&cells, true);
        assert_eq!(all.get("_secret"), Some("s3"));
        assert!(!all.contains(""));
    }

    #[test]
    fn zip_of_no_cells_is_an_empty_row() {
        let header = schema(&["id", "name"]);

        assert!(header.zip(&[], true).is_empty());
    }

    #[test]
    fn fields_reports_first_occurrence_only() {
        let header = schema(&["id", "name", "", "name"]);
        let fields: Vec<(usize, &str)> = header.fields().collect();

        assert_eq!(fields, vec![(1, "id"), (2, "name")]);
    }
}
