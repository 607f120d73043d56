use bmclient::domain::bookmark::{BookmarkId, DraftBookmark};
use bmclient::domain::error::DomainError;
use bmclient::domain::repositories::repository::BookmarkRepository;
use bmclient::infrastructure::http::HttpBookmarkRepository;
use bmclient::util::testing::init_test_env;
use mockito::Matcher;
use std::time::Duration;

fn repository(url: &str) -> HttpBookmarkRepository {
    HttpBookmarkRepository::new(url, None).unwrap()
}

#[tokio::test]
async fn given_json_array_when_list_then_bookmarks_in_server_order() {
    let _ = init_test_env();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":2,"title":"B","url":"https://b.example"},{"id":1,"title":"A"}]"#)
        .create_async()
        .await;

    let bookmarks = repository(&server.url()).list().await.unwrap();

    mock.assert_async().await;
    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[0].id(), Some(BookmarkId::from(2)));
    assert_eq!(bookmarks[0].url(), Some("https://b.example"));
    assert_eq!(bookmarks[1].title(), Some("A"));
}

#[tokio::test]
async fn given_base_path_when_list_then_path_is_prefixed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/bookmarks-app/api/bookmarks")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let url = format!("{}/bookmarks-app", server.url());
    let bookmarks = repository(&url).list().await.unwrap();

    mock.assert_async().await;
    assert!(bookmarks.is_empty());
}

#[tokio::test]
async fn given_non_array_body_when_list_then_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body(r#"{"id": 1}"#)
        .create_async()
        .await;

    let err = repository(&server.url()).list().await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn given_array_of_scalars_when_list_then_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/bookmarks")
        .with_status(200)
        .with_body("[1, 2, 3]")
        .create_async()
        .await;

    let err = repository(&server.url()).list().await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn given_server_fault_when_list_then_server_error_with_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/bookmarks")
        .with_status(500)
        .with_body(r#"{"error":"Unable to fetch bookmarks"}"#)
        .create_async()
        .await;

    let err = repository(&server.url()).list().await.unwrap_err();

    match &err {
        DomainError::Server { status, .. } => assert_eq!(*status, 500),
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(
        err.server_message().as_deref(),
        Some("Unable to fetch bookmarks")
    );
}

#[tokio::test]
async fn given_unreachable_service_when_list_then_network_error() {
    let env = init_test_env();
    let repo = HttpBookmarkRepository::new(env.unreachable_url, Some(Duration::from_secs(2))).unwrap();

    let err = repo.list().await.unwrap_err();
    assert!(matches!(err, DomainError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn given_draft_when_create_then_posts_json_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bookmarks")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(
            r#"{"title":"Rust","url":"https://rust-lang.org","extra":[1,2]}"#.to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"id":10,"title":"Rust","url":"https://rust-lang.org"}"#)
        .create_async()
        .await;

    let draft =
        DraftBookmark::from_json(r#"{"title":"Rust","url":"https://rust-lang.org","extra":[1,2]}"#)
            .unwrap();
    repository(&server.url()).create(&draft).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn given_empty_draft_when_create_then_body_is_empty_object() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/bookmarks")
        .match_body("{}")
        .with_status(201)
        .create_async()
        .await;

    repository(&server.url())
        .create(&DraftBookmark::new())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn given_rejected_draft_when_create_then_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/bookmarks")
        .with_status(400)
        .with_body(r#"{"error":"Unable to parse request body"}"#)
        .create_async()
        .await;

    let err = repository(&server.url())
        .create(&DraftBookmark::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Server { status: 400, .. }));
}

#[tokio::test]
async fn given_id_when_delete_then_addressed_by_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/bookmarks/1")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    repository(&server.url())
        .delete(&BookmarkId::from(1))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn given_unknown_id_when_delete_then_not_found_surfaces() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/bookmarks/99")
        .with_status(404)
        .create_async()
        .await;

    let err = repository(&server.url())
        .delete(&BookmarkId::from(99))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Server { status: 404, .. }));
}

#[tokio::test]
async fn given_id_when_get_then_single_bookmark() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/bookmarks/5")
        .with_status(200)
        .with_body(r#"{"id":5,"title":"Five","url":"https://five.example"}"#)
        .create_async()
        .await;

    let bookmark = repository(&server.url())
        .get(&BookmarkId::from(5))
        .await
        .unwrap();
    assert_eq!(bookmark.title(), Some("Five"));
}

#[tokio::test]
async fn given_fields_when_update_then_puts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/bookmarks/5")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(r#"{"title":"Renamed"}"#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    let fields: DraftBookmark = [("title", "Renamed")].into_iter().collect();
    repository(&server.url())
        .update(&BookmarkId::from(5), &fields)
        .await
        .unwrap();

    mock.assert_async().await;
}
