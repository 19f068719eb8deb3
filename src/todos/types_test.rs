use super::*;

fn item(title: &str) -> ToDoItem {
    ToDoItem { owner_id: 1, id: 1, title: title.into(), complete: false }
}

// =========================================================================
// truncate_title
// =========================================================================

#[test]
fn long_title_keeps_first_twenty_chars() {
    assert_eq!(truncate_title("a very very long todo title here", 20), "a very very long tod");
}

#[test]
fn title_at_limit_is_unchanged() {
    let title = "exactly twenty chars";
    assert_eq!(title.chars().count(), 20);
    assert_eq!(truncate_title(title, 20), title);
}

#[test]
fn short_and_empty_titles_pass_through() {
    assert_eq!(truncate_title("short", 20), "short");
    assert_eq!(truncate_title("", 20), "");
}

#[test]
fn truncation_counts_chars_not_bytes() {
    let title = "ééééééééééééééééééééééé";
    let cut = truncate_title(title, 20);
    assert_eq!(cut.chars().count(), 20);
    assert!(title.starts_with(cut));
}

#[test]
fn normalize_titles_only_touches_long_titles() {
    let items = vec![item("delectus aut autem"), item("quis ut nam facilis et officia qui")];
    let out = normalize_titles(items, 20);
    assert_eq!(out[0].title, "delectus aut autem");
    assert_eq!(out[1].title, "quis ut nam facilis ");
    assert_eq!(out[1].title.chars().count(), 20);
}

// =========================================================================
// ToDoItem wire format
// =========================================================================

#[test]
fn deserialize_wire_item() {
    let json = r#"{"userId": 3, "id": 41, "title": "do the thing", "complete": true}"#;
    let parsed: ToDoItem = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, ToDoItem { owner_id: 3, id: 41, title: "do the thing".into(), complete: true });
}

#[test]
fn deserialize_accepts_completed_alias() {
    let json = r#"{"userId": 1, "id": 2, "title": "x", "completed": true}"#;
    let parsed: ToDoItem = serde_json::from_str(json).unwrap();
    assert!(parsed.complete);
}

#[test]
fn deserialize_missing_flag_defaults_to_incomplete() {
    let json = r#"{"userId": 1, "id": 2, "title": "x"}"#;
    let parsed: ToDoItem = serde_json::from_str(json).unwrap();
    assert!(!parsed.complete);
}

#[test]
fn serialize_uses_user_id_key() {
    let value = serde_json::to_value(item("x")).unwrap();
    assert_eq!(value["userId"], 1);
    assert!(value.get("owner_id").is_none());
}

// =========================================================================
// FetchError messages
// =========================================================================

#[test]
fn transport_error_message() {
    let err = FetchError::Transport { message: "connection refused".into() };
    assert_eq!(err.to_string(), "An error occurred: connection refused");
}

#[test]
fn backend_error_message() {
    let err = FetchError::Backend { status: 404, message: "Http failure response for /todos: 404 Not Found".into() };
    assert_eq!(err.to_string(), "Backend returned code 404: Http failure response for /todos: 404 Not Found");
}
