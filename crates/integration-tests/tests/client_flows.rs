//! The client crate driving a live storefront.

use bookstore_client::{
    AuthError, AuthGateway, CartLedger, ClientError, FileStore, GuardDecision, MemoryStore,
    SessionHolder, ShippingPolicy, StorefrontClient, View, auth, evaluate,
};
use bookstore_core::{BookId, CatalogQuery, OrderId, Price, SortOrder};
use bookstore_integration_tests::{TestServer, temp_profile};

async fn setup() -> (TestServer, StorefrontClient) {
    let server = TestServer::spawn().await;
    let client = StorefrontClient::new(server.base.clone());
    (server, client)
}

#[tokio::test]
async fn test_sign_in_verify_sign_out() {
    let (_server, client) = setup().await;
    let holder = SessionHolder::new(MemoryStore::new());

    assert_eq!(
        evaluate(holder.current().as_ref(), &View::Profile),
        GuardDecision::Redirect(View::Login)
    );

    let identity = auth::sign_in(&client, &holder, "user@example.com", "password")
        .await
        .expect("Sign-in failed");
    assert_eq!(identity.name, "John Doe");
    assert_eq!(
        evaluate(holder.current().as_ref(), &View::Profile),
        GuardDecision::Admit
    );

    let verified = auth::verify(&client, &holder).await.expect("Verify failed");
    assert_eq!(verified, Some(identity));

    let marker = holder.current().expect("No session").marker;
    auth::sign_out(&client, &holder).await.expect("Sign-out failed");
    assert!(!holder.is_authenticated());

    // The storefront forgot the marker too.
    let err = client.current_user(&marker).await.expect_err("Marker still valid");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_rejected_sign_in_keeps_session() {
    let (_server, client) = setup().await;
    let holder = SessionHolder::new(MemoryStore::new());

    auth::sign_in(&client, &holder, "john@example.com", "password123")
        .await
        .expect("Sign-in failed");
    let before = holder.current();

    let err = auth::sign_in(&client, &holder, "john@example.com", "nope")
        .await
        .expect_err("Wrong password accepted");
    assert!(matches!(err, ClientError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(holder.current(), before);

    let err = auth::sign_in(&client, &holder, "", "")
        .await
        .expect_err("Blank credentials accepted");
    assert!(matches!(err, ClientError::Auth(AuthError::MissingFields)));
}

#[tokio::test]
async fn test_register_errors_map_to_auth_errors() {
    let (_server, client) = setup().await;

    let created = auth::register(&client, "Reader", "reader@example.com", "pw")
        .await
        .expect("Register failed");
    assert_eq!(created.email.as_str(), "reader@example.com");

    let err = auth::register(&client, "Reader", "reader@example.com", "pw")
        .await
        .expect_err("Duplicate accepted");
    assert!(matches!(err, ClientError::Auth(AuthError::EmailTaken)));

    let err = auth::register(&client, "", "x@example.com", "pw")
        .await
        .expect_err("Blank name accepted");
    assert!(matches!(err, ClientError::Auth(AuthError::MissingFields)));
}

#[tokio::test]
async fn test_stale_marker_ends_session() {
    let (_server, client) = setup().await;
    let holder = SessionHolder::new(MemoryStore::new());
    auth::sign_in(&client, &holder, "user@example.com", "password")
        .await
        .expect("Sign-in failed");

    // A restarted storefront has forgotten every marker.
    let (_restarted, other) = setup().await;
    let verified = auth::verify(&other, &holder).await.expect("Verify failed");
    assert_eq!(verified, None);
    assert!(!holder.is_authenticated());
}

#[tokio::test]
async fn test_sign_out_in_one_tab_reaches_the_other() {
    let (_server, client) = setup().await;
    let store = FileStore::open(temp_profile());
    let first = SessionHolder::new(store.clone());
    let mut second = SessionHolder::new(store.new_tab());

    auth::sign_in(&client, &first, "user@example.com", "password")
        .await
        .expect("Sign-in failed");
    assert!(second.sync());
    assert!(second.is_authenticated());

    auth::sign_out(&client, &first).await.expect("Sign-out failed");
    assert!(second.sync());
    assert!(!second.is_authenticated());
}

#[tokio::test]
async fn test_session_survives_reopening_the_profile() {
    let (_server, client) = setup().await;
    let profile = temp_profile();

    {
        let holder = SessionHolder::new(FileStore::open(&profile));
        auth::sign_in(&client, &holder, "jane@example.com", "password123")
            .await
            .expect("Sign-in failed");
    }

    let holder = SessionHolder::new(FileStore::open(&profile));
    let verified = auth::verify(&client, &holder).await.expect("Verify failed");
    assert_eq!(verified.map(|i| i.name), Some("Jane Doe".to_owned()));
}

#[tokio::test]
async fn test_catalog_into_cart() {
    let (_server, client) = setup().await;

    let query = CatalogQuery {
        sort: SortOrder::PriceAsc,
        ..CatalogQuery::default()
    };
    let books = client.books(&query).await.expect("Listing failed");
    assert_eq!(books.len(), 5);

    let gatsby = client.book(BookId::new(1)).await.expect("Lookup failed");
    let orwell = client.book(BookId::new(3)).await.expect("Lookup failed");

    let mut cart = CartLedger::new();
    cart.add(&gatsby, 1).expect("Add failed");
    cart.add(&orwell, 3).expect("Add failed");
    let summary = cart.summary(&ShippingPolicy::default());
    assert_eq!(summary.subtotal, Price::from_cents(4296));
    assert_eq!(summary.total, Price::from_cents(4795));

    let err = client.book(BookId::new(99)).await.expect_err("Ghost book");
    assert!(err.is_not_found());

    let categories = client.categories().await.expect("Categories failed");
    assert_eq!(categories.first().map(String::as_str), Some("All"));
}

#[tokio::test]
async fn test_order_tracking() {
    let (_server, client) = setup().await;
    let holder = SessionHolder::new(MemoryStore::new());
    auth::sign_in(&client, &holder, "user@example.com", "password")
        .await
        .expect("Sign-in failed");
    let marker = holder.current().expect("No session").marker;

    let response = client
        .order(OrderId::new(1_234_567), &marker)
        .await
        .expect("Order lookup failed");
    assert_eq!(response.order.subtotal(), Price::from_cents(4296));
    assert_eq!(response.progress.percent, 60);

    let err = client
        .order(OrderId::new(1), &marker)
        .await
        .expect_err("Ghost order");
    assert!(err.is_not_found());
}
