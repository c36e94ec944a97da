#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::errors::document::DocumentError;
    use crate::health_check;

    #[tokio::test]
    async fn test_health_check_route() {
        let app: Router = Router::new().route("/api/health", get(health_check));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app: Router = Router::new().route("/api/health", get(health_check));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_document_error_status_codes() {
        let cases = [
            (DocumentError::MissingFile, StatusCode::BAD_REQUEST),
            (
                DocumentError::UnsupportedType {
                    mime_type: "text/plain".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DocumentError::FileTooLarge {
                    size: 20_000_000,
                    max_bytes: 10_485_760,
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (DocumentError::NotFound, StatusCode::NOT_FOUND),
            (
                DocumentError::StorageWriteFailed {
                    message: "connection refused".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_document_error_body_shape() {
        let response = DocumentError::NotFound.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "OCR result not found");
    }
}
