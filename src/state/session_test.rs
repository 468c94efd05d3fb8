use super::*;

fn login(role: Role) -> LoginResponse {
    serde_json::from_value(serde_json::json!({
        "access": "access-1",
        "refresh": "refresh-1",
        "role": role.as_str(),
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
    }))
    .unwrap()
}

#[test]
fn fresh_session_has_no_token() {
    let session = Session::in_memory();
    assert!(!session.has_access_token());
    assert_eq!(session.stored_profile(), UserProfile::default());
}

#[test]
fn persist_login_writes_every_key() {
    let session = Session::in_memory();
    session.persist_login(&login(Role::Admin)).unwrap();

    assert_eq!(session.get(keys::ACCESS).as_deref(), Some("access-1"));
    assert_eq!(session.get(keys::REFRESH).as_deref(), Some("refresh-1"));
    assert_eq!(session.get(keys::ROLE).as_deref(), Some("admin"));
    assert_eq!(session.get(keys::EMAIL).as_deref(), Some("ada@example.com"));
    assert_eq!(session.get(keys::FIRST_NAME).as_deref(), Some("Ada"));
    assert_eq!(session.get(keys::LAST_NAME).as_deref(), Some("Lovelace"));
}

#[test]
fn empty_access_value_counts_as_logged_out() {
    let session = Session::in_memory();
    session.persist_tokens("", None).unwrap();
    assert_eq!(session.access_token(), None);
}

#[test]
fn persist_profile_removes_missing_fields() {
    let session = Session::in_memory();
    session.persist_login(&login(Role::Student)).unwrap();

    session.persist_profile(&UserProfile { role: Some(Role::Student), ..UserProfile::default() }).unwrap();

    assert_eq!(session.get(keys::ROLE).as_deref(), Some("student"));
    assert_eq!(session.get(keys::FIRST_NAME), None);
    assert_eq!(session.get(keys::EMAIL), None);
    // Tokens are untouched by a profile rewrite.
    assert!(session.has_access_token());
}

#[test]
fn persist_tokens_keeps_refresh_unless_rotated() {
    let session = Session::in_memory();
    session.persist_login(&login(Role::Student)).unwrap();

    session.persist_tokens("access-2", None).unwrap();
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));

    session.persist_tokens("access-3", Some("refresh-3")).unwrap();
    assert_eq!(session.access_token().as_deref(), Some("access-3"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-3"));
}

#[test]
fn clear_removes_session_keys_including_legacy_token() {
    let storage = Arc::new(MemoryStorage::new());
    let session = Session::from_shared(storage.clone());
    session.persist_login(&login(Role::Admin)).unwrap();
    storage.set_item(keys::LEGACY_TOKEN, "old").unwrap();
    storage.set_item("theme", "dark").unwrap();

    session.clear().unwrap();

    for key in keys::SESSION {
        assert_eq!(storage.get_item(key), None, "{key} should be cleared");
    }
    assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
}

#[test]
fn unknown_stored_role_reads_as_none() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(keys::ROLE, "undefined").unwrap();
    let session = Session::from_shared(storage);
    assert_eq!(session.stored_profile().role, None);
}

#[test]
fn clones_share_storage() {
    let session = Session::in_memory();
    let other = session.clone();
    session.persist_tokens("shared", None).unwrap();
    assert_eq!(other.access_token().as_deref(), Some("shared"));
}
