mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use common::*;
use smartstore_api::auth::Role;
use smartstore_api::database::MemoryTenantStore;

#[tokio::test]
async fn public_routes_answer_without_a_session() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));

    let (status, envelope) = get(app.clone(), "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.data().unwrap()["name"], "SmartStore API");

    let (status, envelope) = get(app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.data().unwrap()["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_a_not_found_envelope() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));

    let (status, envelope) = get(app, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!envelope.is_success());
    assert_eq!(envelope.code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn store_failures_become_generic_internal_errors() {
    let app = test_router(Arc::new(FailingStore));
    let admin = token("a1", Role::Admin, None, Some("org_1"));

    for uri in ["/health", "/api/accounting/reports", "/api/affiliates/aff_1"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("authorization", format!("Bearer {}", admin))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(!text.contains("10.0.0.5"), "leaked detail on {}: {}", uri, text);
        assert!(!text.contains("connection reset"), "leaked detail on {}: {}", uri, text);

        let envelope = smartstore_api::middleware::Envelope::from_json(&bytes).unwrap();
        assert_eq!(envelope.code(), Some("INTERNAL_SERVER_ERROR"));
    }
}

#[tokio::test]
async fn malformed_report_query_is_a_validation_error() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));
    let admin = token("a1", Role::Admin, None, Some("org_1"));

    let (status, envelope) = get(app.clone(), "/api/accounting/reports?from=last-tuesday", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.message(), Some("Invalid report query parameters"));

    let (status, envelope) = get(
        app,
        "/api/accounting/reports?from=2026-04-01&to=2026-03-01",
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.message(), Some("'from' must not be after 'to'"));
}

#[tokio::test]
async fn bodies_carry_exactly_the_envelope_keys() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));
    let staff = token("s1", Role::Staff, None, Some("org_1"));

    let success = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/whoami")
                .header("authorization", format!("Bearer {}", staff))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(success.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["data", "success"]);

    let failure = app
        .oneshot(Request::builder().uri("/api/auth/whoami").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(failure.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["code", "message", "success"]);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_query_strings_are_validation_envelopes() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));
    let admin = token("a1", Role::Admin, None, Some("org_1"));
    let root = token("root", Role::SuperAdmin, None, None);

    for (uri, session) in [
        ("/api/affiliates/aff_1?organizationId=a&organizationId=b", &admin),
        ("/api/root/tenant?organizationId=a&organizationId=b", &root),
    ] {
        let (status, envelope) = get(app.clone(), uri, Some(session.as_str())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(envelope.code(), Some("VALIDATION_ERROR"));
        assert_eq!(envelope.message(), Some("Invalid query parameters"));
    }
}

#[tokio::test]
async fn undecodable_path_segments_are_validation_envelopes() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));
    let root = token("root", Role::SuperAdmin, None, None);

    for uri in ["/api/affiliates/%FF", "/api/root/tenant/%FF"] {
        let (status, envelope) = get(app.clone(), uri, Some(&root)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(envelope.message(), Some("Invalid path parameters"));
    }
}

#[tokio::test]
async fn wrong_method_on_a_known_path_is_an_envelope() {
    let app = test_router(Arc::new(MemoryTenantStore::seeded()));
    let root = token("root", Role::SuperAdmin, None, None);

    let requests = [
        Request::builder().method("POST").uri("/health").body(Body::empty()).unwrap(),
        Request::builder()
            .method("DELETE")
            .uri("/api/root/tenant")
            .header("authorization", format!("Bearer {}", root))
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .method("PUT")
            .uri("/api/affiliates/aff_1")
            .header("authorization", format!("Bearer {}", root))
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let (status, envelope) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.code(), Some("NOT_FOUND"));
        assert_eq!(envelope.message(), Some("Route not found"));
    }
}
