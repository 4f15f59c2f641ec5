// Document store round trips against a throwaway SQLite file

use institute_server::document::DocumentOps;
use institute_server::models::{ApprovalStatus, Center};
use institute_server::store::Store;
use institute_server::AppError;

async fn test_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
    let store = Store::new(&url, 16).await.unwrap();
    store.init().await.unwrap();
    (dir, store)
}

fn center(email: &str) -> Center {
    Center::new(
        "Howrah Center".into(),
        email.into(),
        "9876543210".into(),
        "fake-hash".into(),
    )
}

#[tokio::test]
async fn create_get_update_delete() {
    let (_dir, store) = test_store().await;

    let id = Center::create(&store, &center("a@b.co")).await.unwrap();

    let (found_id, found) = Center::gen_enforce(&store, id).await.unwrap();
    assert_eq!(found_id, id);
    assert_eq!(found.email, "a@b.co");
    assert_eq!(found.status, ApprovalStatus::Pending);

    let mut updated = found.clone();
    updated.wallet_balance = 5000.0;
    Center::update(&store, id, &updated).await.unwrap();
    let (_, reloaded) = Center::gen_enforce(&store, id).await.unwrap();
    assert_eq!(reloaded.wallet_balance, 5000.0);

    Center::delete(&store, id).await.unwrap();
    assert!(Center::gen_nullable(&store, id).await.unwrap().is_none());
    assert!(Center::delete(&store, id).await.is_err());
}

#[tokio::test]
async fn keyed_lookup_finds_by_email() {
    let (_dir, store) = test_store().await;

    let id = Center::create(&store, &center("lookup@b.co")).await.unwrap();
    Center::create(&store, &center("other@b.co")).await.unwrap();

    let (found_id, _) = Center::find_by_key(&store, "email", "lookup@b.co")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found_id, id);

    assert!(Center::find_by_key(&store, "email", "nobody@b.co")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_email_creates_no_second_document() {
    let (_dir, store) = test_store().await;

    Center::create(&store, &center("dup@b.co")).await.unwrap();

    // The unique index rejects the race as a conflict, not a 500
    let err = Center::create(&store, &center("dup@b.co"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The failed insert rolled back completely
    assert_eq!(store.count_by_type("center").await.unwrap(), 1);
}

#[tokio::test]
async fn listing_is_unbounded_unless_limited() {
    use institute_server::models::Course;

    let (_dir, store) = test_store().await;
    for i in 0..120 {
        let course = Course {
            title: format!("Course {}", i),
            description: None,
            base_price: 100.0,
            pricing: Default::default(),
        };
        Course::create(&store, &course).await.unwrap();
    }

    let all = Course::gen_all(&store, None).await.unwrap();
    assert_eq!(all.len(), 120);

    let capped = Course::gen_all(&store, Some(50)).await.unwrap();
    assert_eq!(capped.len(), 50);
}

#[tokio::test]
async fn wrong_type_does_not_resolve() {
    use institute_server::models::Course;

    let (_dir, store) = test_store().await;
    let id = Center::create(&store, &center("typed@b.co")).await.unwrap();

    assert!(Course::gen_nullable(&store, id).await.unwrap().is_none());
}
