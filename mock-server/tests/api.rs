use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

// --- final responses ---

#[tokio::test]
async fn ok_returns_200() {
    let resp = app().oneshot(get("/ok")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"ok");
}

#[tokio::test]
async fn echo_reports_path_query_and_host() {
    let request = Request::builder()
        .uri("/echo?q=test&lang=en")
        .header(header::HOST, "example.com")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(
        echo,
        Echo {
            path: "/echo".to_string(),
            query: Some("q=test&lang=en".to_string()),
            host: Some("example.com".to_string()),
        }
    );
}

// --- redirects ---

#[tokio::test]
async fn moved_is_301_to_ok() {
    let resp = app().oneshot(get("/moved")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&resp), "/ok");
}

#[tokio::test]
async fn redirect_n_counts_down() {
    let resp = app().oneshot(get("/redirect/3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/redirect/2");

    let resp = app().oneshot(get("/redirect/0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"done");
}

#[tokio::test]
async fn redirect_n_bad_count_returns_400() {
    let resp = app().oneshot(get("/redirect/many")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn redirect_to_uses_url_parameter() {
    let resp = app()
        .oneshot(get("/redirect-to?url=http%3A%2F%2Fother.example%3A81%2Fok"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "http://other.example:81/ok");
}

#[tokio::test]
async fn redirect_to_without_url_returns_400() {
    let resp = app().oneshot(get("/redirect-to")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn loop_points_at_itself() {
    let resp = app().oneshot(get("/loop")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/loop");
}

#[tokio::test]
async fn no_location_is_bare_302() {
    let resp = app().oneshot(get("/no-location")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(resp.headers().get(header::LOCATION).is_none());
}

// --- hit log ---

#[tokio::test]
async fn hits_records_targets_in_order() {
    use tower::Service;

    let mut app = app().into_service();

    for uri in ["/moved", "/ok?a=1", "/redirect/1"] {
        ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(uri))
            .await
            .unwrap();
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/hits"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let hits: Vec<String> = body_json(resp).await;
    assert_eq!(hits, vec!["/moved", "/ok?a=1", "/redirect/1"]);
}
