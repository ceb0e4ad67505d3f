//! # CORS ヘッダー付与ミドルウェア
//!
//! ブラウザ上の家主向けアプリから直接呼び出されるため、
//! 全レスポンス（エラー・プリフライト含む）に許可ヘッダーを付与する。

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// 許可するリクエストヘッダー
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// 許可するメソッド
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// レスポンスに CORS ヘッダーを付与する
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    response
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_エラーレスポンスにもcorsヘッダーが付く() {
        let sut = Router::new()
            .route("/", get(|| async { StatusCode::BAD_GATEWAY }))
            .layer(from_fn(cors));

        let response = sut
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
    }
}
