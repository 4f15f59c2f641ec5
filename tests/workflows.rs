// End-to-end workflows at the service layer: approval gating, kit order
// totals against the wallet, carts, and append-only chapter content

use chrono::Utc;

use institute_server::auth::{hash_password, verify_password};
use institute_server::document::DocumentOps;
use institute_server::models::{
    ApprovalStatus, Assignment, Cart, CartItem, Center, Company, Course, KitOrder, OrderStatus,
    SessionType,
};
use institute_server::pricing::{compute_totals, verify_totals, OrderLine};
use institute_server::store::Store;

async fn test_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
    let store = Store::new(&url, 16).await.unwrap();
    store.init().await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn registration_is_approval_gated() {
    let (_dir, store) = test_store().await;

    let center = Center::new(
        "Salt Lake Center".into(),
        "saltlake@inst.test".into(),
        "9876543210".into(),
        hash_password("pass123").unwrap(),
    );
    let id = Center::create(&store, &center).await.unwrap();

    // Correct password alone must not grant access while pending
    let (_, stored) = Center::gen_enforce(&store, id).await.unwrap();
    assert!(verify_password("pass123", &stored.password_hash).unwrap());
    assert_ne!(stored.status, ApprovalStatus::Approved);

    // Admin approval is the only path to an approved login
    let mut approved = stored.clone();
    approved.status = approved.status.transition(ApprovalStatus::Approved).unwrap();
    Center::update(&store, id, &approved).await.unwrap();

    let (_, reloaded) = Center::gen_enforce(&store, id).await.unwrap();
    assert_eq!(reloaded.status, ApprovalStatus::Approved);

    // Re-approving an already-approved account is invalid
    assert!(reloaded
        .status
        .transition(ApprovalStatus::Approved)
        .is_err());
}

#[tokio::test]
async fn company_otp_reset_round_trip() {
    let (_dir, store) = test_store().await;

    let mut company = Company::new(
        "Ledger Labs".into(),
        "ops@ledgerlabs.test".into(),
        "9123456789".into(),
        hash_password("old-pass").unwrap(),
    );
    let code = company.issue_reset_otp();
    let id = Company::create(&store, &company).await.unwrap();

    let (_, mut stored) = Company::gen_enforce(&store, id).await.unwrap();
    let now = Utc::now().timestamp();
    assert!(stored.reset_otp_matches(&code, now));

    stored.password_hash = hash_password("new-pass").unwrap();
    stored.clear_reset_otp();
    Company::update(&store, id, &stored).await.unwrap();

    let (_, reloaded) = Company::gen_enforce(&store, id).await.unwrap();
    assert!(verify_password("new-pass", &reloaded.password_hash).unwrap());
    assert!(!reloaded.reset_otp_matches(&code, now));
}

#[tokio::test]
async fn kit_order_respects_wallet_at_creation() {
    let (_dir, store) = test_store().await;

    let mut center = Center::new(
        "Park Street Center".into(),
        "park@inst.test".into(),
        "9876500000".into(),
        "hash".into(),
    );
    center.status = ApprovalStatus::Approved;
    center.wallet_balance = 1000.0;
    let center_id = Center::create(&store, &center).await.unwrap();

    let items = vec![OrderLine {
        course_id: 1,
        quantity: 2,
        unit_price: 400.0,
    }];
    let totals = compute_totals(&items).unwrap();
    assert_eq!(totals.payable, 800.0);

    // Within balance: order persists as pending
    assert!(totals.payable <= center.wallet_balance);
    let order = KitOrder::new(center_id, items.clone(), totals, Utc::now().timestamp());
    let order_id = KitOrder::create(&store, &order).await.unwrap();
    let (_, stored) = KitOrder::gen_enforce(&store, order_id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    // Over balance: the guard fires and nothing is persisted
    let big = vec![OrderLine {
        course_id: 1,
        quantity: 10,
        unit_price: 400.0,
    }];
    let big_totals = compute_totals(&big).unwrap();
    assert!(big_totals.payable > center.wallet_balance);
    assert_eq!(store.count_by_type("kit_order").await.unwrap(), 1);

    // Tampered client totals are rejected outright
    let mut claimed = compute_totals(&items).unwrap();
    claimed.payable = 1.0;
    assert!(verify_totals(&items, &claimed).is_err());

    // Fulfilment chain
    let (_, mut order) = KitOrder::gen_enforce(&store, order_id).await.unwrap();
    order.status = order.status.transition(OrderStatus::Processing).unwrap();
    order.status = order.status.transition(OrderStatus::Shipped).unwrap();
    order.status = order.status.transition(OrderStatus::Delivered).unwrap();
    assert!(order.status.transition(OrderStatus::Cancelled).is_err());
    KitOrder::update(&store, order_id, &order).await.unwrap();
}

#[tokio::test]
async fn cart_persists_per_student_and_prices_with_fallbacks() {
    let (_dir, store) = test_store().await;

    let course = Course {
        title: "GST Practitioner".into(),
        description: None,
        base_price: 2000.0,
        pricing: Default::default(),
    };
    let course_id = Course::create(&store, &course).await.unwrap();

    let mut cart = Cart::new("student-42".into());
    cart.add_item(CartItem {
        course_id,
        session: SessionType::Live,
        quantity: 2,
    });
    let cart_id = Cart::create(&store, &cart).await.unwrap();

    let (found_id, found) = Cart::find_by_key(&store, "student_id", "student-42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found_id, cart_id);

    let mut courses = std::collections::HashMap::new();
    courses.insert(course_id, course);
    // live unpriced: 1.5x base
    assert_eq!(found.total_price(&courses), 2.0 * 3000.0);
}

#[tokio::test]
async fn assignment_appends_survive_persistence() {
    let (_dir, store) = test_store().await;

    let mut assignment = Assignment::new(12, "Chapter 12 practice".into());
    assignment.add_task("Prepare invoice register".into(), None, Some(5));
    let id = Assignment::create(&store, &assignment).await.unwrap();

    let (_, mut stored) = Assignment::gen_enforce(&store, id).await.unwrap();
    let before = stored.tasks.len();
    let task = stored.add_task("File GSTR-1".into(), None, None);
    assert_eq!(task.order as usize, before);
    Assignment::update(&store, id, &stored).await.unwrap();

    let (_, reloaded) = Assignment::gen_enforce(&store, id).await.unwrap();
    assert_eq!(reloaded.tasks.len(), before + 1);
    assert_eq!(reloaded.tasks[before].order as usize, before);
}
