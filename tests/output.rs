#[cfg(test)]
mod output {
    use ferrum_sheets::output::{self, MimeType, Response, TextOutput};
    use ferrum_sheets::persistence::{InMemoryStore, Row, TableError};
    use serde_json::json;

    fn _store() -> InMemoryStore {
        let mut store = InMemoryStore::with_header(&["id", "name", "_token"]);
        store.push_row(&["1", "Jansen", "t1"]);
        store.push_row(&["2", "Bonega", "t2"]);
        store.push_row(&["3", "Lorem", "t3"]);
        store
    }

    fn _row(fields: &[(&str, &str)]) -> Row {
        fields.iter().copied().collect()
    }

    fn _json(output: &TextOutput) -> serde_json::Value {
        assert_eq!(output.mime_type, MimeType::Json);
        output.value().unwrap()
    }

    #[test]
    fn output_declares_json() {
        let output = Response::ok().into_output();

        assert_eq!(output.mime_type.as_str(), "application/json");
        assert_eq!(output.content, r#"{"result":"ok"}"#);
    }

    #[test]
    fn output_error_payloads() {
        assert_eq!(
            Response::error(&TableError::NotFound).into_output().content,
            r#"{"error":"not found"}"#
        );
        assert_eq!(
            Response::error(&TableError::Duplicate).into_output().content,
            r#"{"error":"duplicate"}"#
        );
    }

    #[test]
    fn output_get() {
        let store = _store();

        assert_eq!(
            _json(&output::get(&store, "2", "id").unwrap()),
            json!({"id": "2", "name": "Bonega", "_token": "t2"})
        );
        assert_eq!(
            _json(&output::get(&store, "9", "id").unwrap()),
            json!({"error": "not found"})
        );
    }

    #[test]
    fn output_list_coerces_its_params() {
        let store = _store();

        assert_eq!(
            _json(&output::list(&store, Some("1"), Some("1"), false).unwrap()),
            json!([{"id": "2", "name": "Bonega"}])
        );
        assert_eq!(
            _json(&output::list(&store, Some("x"), None, false).unwrap())
                .as_array()
                .map(Vec::len),
            Some(3)
        );
        assert_eq!(
            _json(&output::list(&store, None, Some("99"), true).unwrap()),
            json!([{}])
        );
    }

    #[test]
    fn output_find() {
        let store = _store();

        assert_eq!(
            _json(&output::find(&store, "lorem").unwrap()),
            json!([{"id": "3", "name": "Lorem", "_token": "t3"}])
        );
    }

    #[test]
    fn output_create_and_duplicate() {
        let mut store = _store();

        assert_eq!(
            _json(&output::create(&mut store, _row(&[("id", "4"), ("name", "Malaika")]), "id").unwrap()),
            json!({"id": "4", "name": "Malaika"})
        );
        assert_eq!(
            _json(&output::create(&mut store, _row(&[("id", "4")]), "id").unwrap()),
            json!({"error": "duplicate"})
        );
        assert_eq!(
            _json(&output::count(&store).unwrap()),
            json!({"count": 4})
        );
    }

    #[test]
    fn output_update() {
        let mut store = _store();

        assert_eq!(
            _json(&output::update(&mut store, "1", &_row(&[("name", "Jimmy")]), "id").unwrap()),
            json!({"id": "1", "name": "Jimmy", "_token": "t1"})
        );
        assert_eq!(
            _json(&output::update(&mut store, "9", &_row(&[("name", "Jimmy")]), "id").unwrap()),
            json!({"error": "not found"})
        );
    }

    #[test]
    fn output_remove_and_remove_all() {
        let mut store = _store();

        assert_eq!(
            _json(&output::remove(&mut store, "1", "id").unwrap()),
            json!({"result": "ok"})
        );
        assert_eq!(
            _json(&output::remove(&mut store, "1", "id").unwrap()),
            json!({"error": "not found"})
        );
        assert_eq!(
            _json(&output::remove_all(&mut store).unwrap()),
            json!({"result": "ok"})
        );
        assert_eq!(
            _json(&output::remove_all(&mut store).unwrap()),
            json!({"result": "ok"})
        );
        assert_eq!(
            _json(&output::count(&store).unwrap()),
            json!({"count": 0})
        );
    }
}
