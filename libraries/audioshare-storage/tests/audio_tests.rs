//! Integration tests for the audio catalog
//!
//! Tests:
//! - Upload defaults and description updates
//! - Owner-only mutation with the missing/foreign collapse
//! - Download visibility through shares
//! - List pagination, ordering and share decoration


use audioshare_core::{
    types::{AudioId, AudioListQuery, BlobId, OrderType, UpdateAudio},
    AudioCatalog, AudioShareError, ShareRegistry,
};
use test_helpers::*;

fn query(offset: u32, limit: u32, order: OrderType) -> AudioListQuery {
    AudioListQuery {
        offset,
        limit,
        order,
    }
}

fn title(t: &str) -> UpdateAudio {
    UpdateAudio {
        title: Some(t.to_string()),
        duration: None,
    }
}

#[tokio::test]
async fn test_upload_starts_blank() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let owner = create_test_user(store, "Alice", "alice").await;

    let blob = BlobId::generate();
    let id = store.upload(owner, blob).await.unwrap();

    let download = store.download(owner, id).await.unwrap();
    assert_eq!(download.title, "");
    assert_eq!(download.blob_id, blob);

    let duration: i64 = sqlx::query_scalar("SELECT duration FROM audios WHERE audio_id = ?")
        .bind(id.get())
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(duration, 0);
}

#[tokio::test]
async fn test_partial_update_keeps_other_field() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let owner = create_test_user(store, "Alice", "alice").await;
    let id = create_test_audio(store, owner).await;

    store
        .update_description(
            owner,
            id,
            UpdateAudio {
                title: Some("song".into()),
                duration: Some(180),
            },
        )
        .await
        .unwrap();

    store
        .update_description(
            owner,
            id,
            UpdateAudio {
                title: None,
                duration: Some(200),
            },
        )
        .await
        .unwrap();

    let (stored_title, duration): (String, i64) =
        sqlx::query_as("SELECT title, duration FROM audios WHERE audio_id = ?")
            .bind(id.get())
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(stored_title, "song");
    assert_eq!(duration, 200);
}

#[tokio::test]
async fn test_update_by_non_owner_fails_like_missing_audio() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let owner = create_test_user(store, "Alice", "alice").await;
    let other = create_test_user(store, "Bob", "bob").await;
    let id = create_test_audio(store, owner).await;

    let foreign = store.update_description(other, id, title("mine")).await;
    assert!(matches!(foreign, Err(AudioShareError::NotOwner)));

    let missing = store
        .update_description(other, AudioId::new(9_999), title("mine"))
        .await;
    assert!(matches!(missing, Err(AudioShareError::NotOwner)));

    // A share grants read access, not ownership
    store.share(owner, id, other).await.unwrap();
    let shared = store.update_description(other, id, title("mine")).await;
    assert!(matches!(shared, Err(AudioShareError::NotOwner)));
}

#[tokio::test]
async fn test_upload_describe_share_download_scenario() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let owner = create_test_user(store, "Alice", "alice").await;
    let other = create_test_user(store, "Bob", "bob").await;

    let id = create_test_audio(store, owner).await;
    store.update_description(owner, id, title("song")).await.unwrap();

    assert_eq!(store.download(owner, id).await.unwrap().title, "song");

    let hidden = store.download(other, id).await;
    assert!(matches!(hidden, Err(AudioShareError::AudioNotFound)));

    store.share(owner, id, other).await.unwrap();
    assert_eq!(store.download(other, id).await.unwrap().title, "song");

    store.unshare(owner, id, other).await.unwrap();
    let revoked = store.download(other, id).await;
    assert!(matches!(revoked, Err(AudioShareError::AudioNotFound)));
}

#[tokio::test]
async fn test_list_includes_owned_and_shared() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let alice = create_test_user(store, "Alice", "alice").await;
    let bob = create_test_user(store, "Bob", "bob").await;
    let carol = create_test_user(store, "Carol", "carol").await;

    let a = create_titled_audio(store, alice, "A").await;
    let b = create_titled_audio(store, bob, "B").await;
    let _private = create_titled_audio(store, bob, "private").await;

    store.share(alice, a, bob).await.unwrap();
    store.share(alice, a, carol).await.unwrap();
    store.share(bob, b, alice).await.unwrap();

    let page = store.list(alice, query(0, 10, OrderType::Owner)).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.records.len(), 2);

    // Owned first
    let first = &page.records[0];
    assert_eq!(first.id, a);
    assert!(first.is_owner);
    assert_eq!(first.owner_name, "Alice");
    let shared_with: Vec<&str> = first
        .shared_to
        .as_ref()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(shared_with, vec!["Bob", "Carol"]);

    let second = &page.records[1];
    assert_eq!(second.id, b);
    assert!(!second.is_owner);
    assert_eq!(second.owner_id, bob);
    assert_eq!(second.shared_to.as_ref().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unshared_audio_has_no_share_list() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let alice = create_test_user(store, "Alice", "alice").await;
    create_titled_audio(store, alice, "solo").await;

    let page = store
        .list(alice, query(0, 10, OrderType::Alphabet))
        .await
        .unwrap();
    assert_eq!(page.records.len(), 1);
    assert!(page.records[0].shared_to.is_none());
}

#[tokio::test]
async fn test_alphabet_order() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let alice = create_test_user(store, "Alice", "alice").await;
    let bob = create_test_user(store, "Bob", "bob").await;

    create_titled_audio(store, alice, "zebra").await;
    let shared = create_titled_audio(store, bob, "apple").await;
    create_titled_audio(store, alice, "mango").await;
    store.share(bob, shared, alice).await.unwrap();

    let page = store
        .list(alice, query(0, 10, OrderType::Alphabet))
        .await
        .unwrap();
    let titles: Vec<&str> = page.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(titles, vec!["apple", "mango", "zebra"]);

    let page = store.list(alice, query(0, 10, OrderType::Owner)).await.unwrap();
    let titles: Vec<&str> = page.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(titles, vec!["mango", "zebra", "apple"]);
}

#[tokio::test]
async fn test_pagination_windows_are_consistent() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let alice = create_test_user(store, "Alice", "alice").await;
    let bob = create_test_user(store, "Bob", "bob").await;
    let carol = create_test_user(store, "Carol", "carol").await;

    for t in ["d", "a", "c", "b"] {
        let id = create_titled_audio(store, alice, t).await;
        // Multiple shares per audio must not inflate counts or windows
        store.share(alice, id, bob).await.unwrap();
        store.share(alice, id, carol).await.unwrap();
    }

    for order in [OrderType::Owner, OrderType::Alphabet] {
        let both = store.list(alice, query(0, 2, order)).await.unwrap();
        let first = store.list(alice, query(0, 1, order)).await.unwrap();
        let second = store.list(alice, query(1, 1, order)).await.unwrap();

        assert_eq!(both.total_count, 4);
        assert_eq!(first.total_count, 4);
        assert_eq!(second.total_count, 4);

        assert_eq!(both.records.len(), 2);
        assert_eq!(first.records.len(), 1);
        assert_eq!(second.records.len(), 1);
        assert_eq!(both.records[0], first.records[0]);
        assert_eq!(both.records[1], second.records[0]);
        assert_eq!(both.records[0].shared_to.as_ref().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_window_past_the_end_keeps_total() {
    let test_db = TestDb::new().await;
    let store = test_db.store();
    let alice = create_test_user(store, "Alice", "alice").await;
    create_titled_audio(store, alice, "only").await;

    let page = store
        .list(alice, query(5, 10, OrderType::Alphabet))
        .await
        .unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.total_count, 1);
}
