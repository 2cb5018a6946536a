use std::time::Duration;

use ghsearch_core::endpoints::UserSearchQuery;
use ghsearch_core::{ClientConfig, GithubClient, SearchError};
use mockito::{Matcher, Server};

fn client_for(server: &Server, token: Option<&str>) -> GithubClient {
    GithubClient::new(ClientConfig {
        base_url: server.url(),
        timeout: Duration::from_secs(5),
        token: token.map(str::to_string),
    })
    .expect("client should build")
}

fn query(q: &str, page: u32) -> UserSearchQuery {
    UserSearchQuery {
        q: q.to_string(),
        page,
        per_page: 30,
    }
}

#[tokio::test]
async fn sends_query_parameters_and_decodes_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/users")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "octo cat".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
        ]))
        .match_header("accept", "application/vnd.github+json")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"total_count":41,"incomplete_results":false,"items":[
                {"login":"octocat","id":583231,"avatar_url":"https://avatars.githubusercontent.com/u/583231"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, None);
    let resp = client.search_users(&query("octo cat", 2)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.total_count, 41);
    assert_eq!(resp.items.len(), 1);
    assert_eq!(resp.items[0].account, "octocat");
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer s3cret")
        .with_status(200)
        .with_body(r#"{"total_count":0,"incomplete_results":false,"items":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server, Some("s3cret"));
    assert!(client.is_authenticated());
    client.search_users(&query("x", 1)).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_upstream_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .with_status(422)
        .with_body(r#"{"message":"Validation Failed","documentation_url":"https://docs.github.com/v3/search"}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let err = client.search_users(&query("", 1)).await.unwrap_err();

    match err {
        SearchError::Upstream { status, message } => {
            assert_eq!(status, 422);
            assert!(message.contains("Validation Failed"), "{message}");
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
}

#[tokio::test]
async fn exhausted_rate_limit_is_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("x-ratelimit-remaining", "0")
        .with_body(r#"{"message":"API rate limit exceeded for 127.0.0.1."}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let err = client.search_users(&query("octocat", 1)).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::Upstream { status: 403, ref message } if message.contains("rate limit")
    ));
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = client_for(&server, None);
    let err = client.search_users(&query("octocat", 1)).await.unwrap_err();

    assert!(matches!(err, SearchError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_host_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GithubClient::new(ClientConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(2),
        token: None,
    })
    .unwrap();
    let err = client.search_users(&query("octocat", 1)).await.unwrap_err();

    assert!(err.is_transport(), "{err:?}");
}
