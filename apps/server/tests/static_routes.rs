use axum::{body::to_bytes, body::Body, http::Request};
use finboard_server::{
    api::{app_router, with_static_files},
    build_state,
    config::Config,
};
use tempfile::tempdir;
use tower::ServiceExt;

#[tokio::test]
async fn serves_index_html_for_unknown_route() {
    let static_dir = tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>SPA</html>").unwrap();

    let config = Config {
        static_dir: static_dir.path().to_string_lossy().to_string(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = with_static_files(app_router(state, &config), &config.static_dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/widgets/1704067200000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, "<html>SPA</html>".as_bytes());
}
