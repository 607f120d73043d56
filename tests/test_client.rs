use bmclient::application::error::ApplicationError;
use bmclient::application::{BookmarkClient, RefreshOutcome};
use bmclient::domain::bookmark::BookmarkId;
use bmclient::domain::error::DomainError;
use bmclient::infrastructure::http::HttpBookmarkRepository;
use bmclient::util::testing::init_test_env;
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn client_for(url: &str) -> BookmarkClient<HttpBookmarkRepository> {
    BookmarkClient::new(Arc::new(HttpBookmarkRepository::new(url, None).unwrap()))
}

#[tokio::test]
async fn given_draft_when_create_then_posted_cleared_and_list_refetched() {
    let _ = init_test_env();
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/bookmarks")
        .match_body(Matcher::JsonString(
            r#"{"title":"Rust","url":"https://rust-lang.org"}"#.to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"id":3,"title":"Rust","url":"https://rust-lang.org"}"#)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"[{"id":3,"title":"Rust","url":"https://rust-lang.org"}]"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.set_draft_field("title", "Rust");
    client.set_draft_field("url", "https://rust-lang.org");

    let outcome = client.create().await.unwrap();

    create.assert_async().await;
    list.assert_async().await;
    assert_eq!(outcome, RefreshOutcome::Applied);
    assert!(client.draft().is_empty());
    assert_eq!(client.bookmarks()[0].id(), Some(BookmarkId::from(3)));
}

#[tokio::test]
async fn given_server_rejects_create_when_create_then_draft_kept_and_no_refresh() {
    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/api/bookmarks")
        .with_status(500)
        .with_body(r#"{"error":"Unable to create bookmark"}"#)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/bookmarks")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.set_draft_field("title", "keep");

    let err = client.create().await.unwrap_err();

    list.assert_async().await;
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Server { status: 500, .. })
    ));
    assert_eq!(client.draft().get("title"), Some(&json!("keep")));
}

#[tokio::test]
async fn given_two_bookmarks_when_remove_first_then_list_shows_second() {
    let mut server = mockito::Server::new_async().await;
    let initial = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"[{"id":1,"title":"A"},{"id":2,"title":"B"}]"#)
        .expect(1)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/bookmarks/1")
        .with_status(200)
        .create_async()
        .await;
    let after = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"[{"id":2,"title":"B"}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.refresh().await.unwrap();
    assert_eq!(client.bookmarks().len(), 2);

    client.remove(&BookmarkId::from(1)).await.unwrap();

    initial.assert_async().await;
    delete.assert_async().await;
    after.assert_async().await;
    let expected: Vec<bmclient::domain::bookmark::Bookmark> =
        serde_json::from_value(json!([{"id": 2, "title": "B"}])).unwrap();
    assert_eq!(client.bookmarks(), expected);
}

#[tokio::test]
async fn given_failed_delete_when_remove_then_list_unchanged_and_client_usable() {
    let mut server = mockito::Server::new_async().await;
    let _list = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"[{"id":1,"title":"A"}]"#)
        .expect(2)
        .create_async()
        .await;
    let _delete = server
        .mock("DELETE", "/api/bookmarks/1")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.refresh().await.unwrap();

    assert!(client.remove(&BookmarkId::from(1)).await.is_err());
    assert_eq!(client.bookmarks().len(), 1);

    // next operation still works
    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Applied);
}

#[tokio::test]
async fn given_malformed_list_when_refresh_then_prior_list_kept() {
    let mut server = mockito::Server::new_async().await;
    let _good = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"[{"id":1}]"#)
        .expect(1)
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    client.refresh().await.unwrap();
    let err = client.refresh().await.unwrap_err();

    assert!(err.as_domain().is_some_and(DomainError::is_transport));
    assert_eq!(client.bookmarks().len(), 1);
}

#[tokio::test]
async fn given_unreachable_service_when_create_then_network_error_and_draft_kept() {
    let env = init_test_env();
    let client = client_for(env.unreachable_url);
    client.set_draft_field("url", "https://offline.example");

    let err = client.create().await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Network(_))
    ));
    assert_eq!(
        client.draft().get("url"),
        Some(&json!("https://offline.example"))
    );
}
