//! In-process stand-in for the verse API, serving verse 1:1 only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const ARABIC: &str = r#"{"code": 200, "status": "OK", "data": {
    "text": "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    "surah": {"name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha"},
    "numberInSurah": 1, "juz": 1, "page": 1
}}"#;

const SAHIH: &str = r#"{"code": 200, "status": "OK", "data": {
    "text": "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
    "edition": {"englishName": "Saheeh International"}
}}"#;

pub type Requests = Arc<Mutex<Vec<String>>>;

async fn upstream(
    State(requests): State<Requests>,
    Path(path): Path<String>,
) -> Response {
    requests.lock().unwrap().push(path.clone());
    match path.as_str() {
        "1:1" => (StatusCode::OK, ARABIC).into_response(),
        "1:1/en.sahih" | "1:1/en.asad" => (StatusCode::OK, SAHIH).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn start_upstream() -> (SocketAddr, Requests) {
    let requests = Requests::default();
    let app = Router::new()
        .route("/v1/ayah/{*path}", get(upstream))
        .with_state(requests.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, requests)
}
