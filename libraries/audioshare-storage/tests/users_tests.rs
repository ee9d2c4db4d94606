//! Integration tests for the credential store


use audioshare_core::{types::CreateUser, AudioShareError, CredentialStore};
use test_helpers::*;

#[tokio::test]
async fn test_create_then_sign_in() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    let id = store
        .create_user(CreateUser {
            name: "Alice".into(),
            username: "alice".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();

    let user = store.get_user("alice", "correct horse").await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.name, "Alice");
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_duplicate_username_is_reported() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "Alice", "alice").await;

    let result = store
        .create_user(CreateUser {
            name: "Another Alice".into(),
            username: "alice".into(),
            password: "whatever".into(),
        })
        .await;

    assert!(matches!(result, Err(AudioShareError::DuplicateUser)));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "Alice", "alice").await;

    let wrong_password = store.get_user("alice", "nope").await;
    assert!(matches!(
        wrong_password,
        Err(AudioShareError::InvalidCredentials)
    ));

    let unknown = store.get_user("mallory", "alice-password").await;
    assert!(matches!(unknown, Err(AudioShareError::InvalidCredentials)));
}

#[tokio::test]
async fn test_password_is_not_stored_in_plaintext() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "Alice", "alice").await;

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
        .bind("alice")
        .fetch_one(store.pool())
        .await
        .unwrap();

    assert_ne!(hash, "alice-password");
    assert!(hash.starts_with("$2"));
}

#[tokio::test]
async fn test_list_users_sorted_by_name() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "Zed", "zed").await;
    create_test_user(store, "Amy", "amy").await;

    let users = store.list_users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
}

#[tokio::test]
async fn test_undecodable_row_is_a_database_error() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    // A blob that is not valid UTF-8 cannot decode into the name column
    sqlx::query("INSERT INTO users (name, username, password_hash) VALUES (X'FFFE', 'broken', 'x')")
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.list_users().await;
    assert!(matches!(result, Err(AudioShareError::Database(_))));
}
