use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Request targets (path and query) in arrival order.
pub type Hits = Arc<RwLock<Vec<String>>>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub path: String,
    pub query: Option<String>,
    pub host: Option<String>,
}

#[derive(Deserialize)]
pub struct RedirectTo {
    pub url: String,
}

pub fn app() -> Router {
    let hits: Hits = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/ok", get(ok))
        .route("/moved", get(moved))
        .route("/redirect/{n}", get(redirect_n))
        .route("/redirect-to", get(redirect_to))
        .route("/loop", get(redirect_loop))
        .route("/no-location", get(no_location))
        .route("/echo", get(echo))
        .route("/hits", get(list_hits))
        .layer(middleware::from_fn_with_state(hits.clone(), record_hit))
        .with_state(hits)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn record_hit(State(hits): State<Hits>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    if uri.path() != "/hits" {
        let target = uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
        hits.write().await.push(target);
    }
    next.run(request).await
}

async fn ok() -> &'static str {
    "ok"
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

async fn moved() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/ok")]).into_response()
}

/// Redirects `n` times before answering 200.
async fn redirect_n(Path(n): Path<u32>) -> Response {
    match n {
        0 => (StatusCode::OK, "done").into_response(),
        n => found(&format!("/redirect/{}", n - 1)),
    }
}

async fn redirect_to(Query(target): Query<RedirectTo>) -> Response {
    found(&target.url)
}

async fn redirect_loop() -> Response {
    found("/loop")
}

async fn no_location() -> StatusCode {
    StatusCode::FOUND
}

async fn echo(uri: Uri, headers: HeaderMap) -> Json<Echo> {
    Json(Echo {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        host: headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
    })
}

async fn list_hits(State(hits): State<Hits>) -> Json<Vec<String>> {
    Json(hits.read().await.clone())
}
