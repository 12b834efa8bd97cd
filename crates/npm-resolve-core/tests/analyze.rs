use std::time::Duration;

use npm_resolve_core::{Analyzer, AnalyzerOptions, PackageRequest, ResolveError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, encoded_name: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{encoded_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture))
        .mount(server)
        .await;
}

fn analyzer_for(server: &MockServer) -> Analyzer {
    Analyzer::new(AnalyzerOptions {
        registry: server.uri(),
        ..AnalyzerOptions::default()
    })
}

// S1: exact-version resolution of a leaf package with no dependencies.
#[tokio::test]
async fn s1_resolves_exact_version_with_no_dependencies() {
    let server = MockServer::start().await;
    mount(&server, "lodash", include_str!("fixtures/lodash.json")).await;

    let analyzer = analyzer_for(&server);
    let result = analyzer.analyze_one("lodash", "4.17.21").await.unwrap();

    assert_eq!(result.dependency_tree.name, "lodash");
    assert_eq!(result.dependency_tree.version, "4.17.21");
    assert!(result.dependency_tree.dependencies.is_empty());
    assert!(result.dependency_tree.peer_dependencies.is_empty());
}

// S2: an unknown package name fails with PackageNotFound (no mock mounted,
// wiremock answers 404 for anything unmatched).
#[tokio::test]
async fn s2_unknown_package_fails_not_found() {
    let server = MockServer::start().await;

    let analyzer = analyzer_for(&server);
    let err = analyzer
        .analyze_one("invalid-package-name-123456", "1.0.0")
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::PackageNotFound { .. }));
}

// S3: descriptor is neither an exact version, a dist-tag, nor a valid range.
#[tokio::test]
async fn s3_unresolvable_descriptor_fails_not_found() {
    let server = MockServer::start().await;
    mount(&server, "express", include_str!("fixtures/express.json")).await;

    let analyzer = analyzer_for(&server);
    let err = analyzer.analyze_one("express", "invalid-version").await.unwrap_err();

    assert!(matches!(err, ResolveError::PackageNotFound { .. }));
}

// S4: a scoped package's peer dependencies are preserved and non-empty.
#[tokio::test]
async fn s4_scoped_package_carries_peer_dependencies() {
    let server = MockServer::start().await;
    mount(
        &server,
        "@testing-library%2Freact",
        include_str!("fixtures/testing_library_react.json"),
    )
    .await;

    let analyzer = analyzer_for(&server);
    let result = analyzer
        .analyze_one("@testing-library/react", "14.1.2")
        .await
        .unwrap();

    assert!(result.dependency_tree.peer_dependencies.contains_key("react"));
}

// S5: a dist-tag descriptor resolves to the concrete version it names.
#[tokio::test]
async fn s5_dist_tag_resolves_to_concrete_version() {
    let server = MockServer::start().await;
    mount(&server, "lodash", include_str!("fixtures/lodash.json")).await;

    let analyzer = analyzer_for(&server);
    let result = analyzer.analyze_one("lodash", "latest").await.unwrap();

    assert_eq!(result.dependency_tree.version, "4.17.21");
}

// S6: analyzing a batch records one individual entry per request and
// combines them into a single hoisted root.
#[tokio::test]
async fn s6_batch_analysis_combines_into_one_hoisted_root() {
    let server = MockServer::start().await;
    mount(&server, "express", include_str!("fixtures/express.json")).await;
    mount(&server, "lodash", include_str!("fixtures/lodash.json")).await;

    let analyzer = analyzer_for(&server);
    let requests = vec![
        PackageRequest::new("express", "4.18.2"),
        PackageRequest::new("lodash", "4.17.21"),
    ];
    let result = analyzer.analyze_many(&requests).await.unwrap();

    assert!(result.individual.contains_key("express@4.18.2"));
    assert!(result.individual.contains_key("lodash@4.17.21"));
    assert!(result.combined.hoisted_tree.root.contains_key("express"));
    assert!(result.combined.hoisted_tree.root.contains_key("lodash"));
    assert!(!result.combined.hoisted_tree.root.contains_key("virtual-root"));
}

// S7: two independently-required packages disagree on a peer's version;
// neither is silently dropped, one is nested instead of hoisted.
#[tokio::test]
async fn s7_conflicting_peer_nests_the_losing_side() {
    let server = MockServer::start().await;
    mount(&server, "peer-a", include_str!("fixtures/peer_a.json")).await;
    mount(&server, "peer-b", include_str!("fixtures/peer_b.json")).await;
    mount(&server, "react", include_str!("fixtures/react_legacy.json")).await;

    let analyzer = analyzer_for(&server);
    let requests = vec![PackageRequest::new("peer-a", "1.0.0"), PackageRequest::new("peer-b", "1.0.0")];
    let result = analyzer.analyze_many(&requests).await.unwrap();

    let tree = result.combined.hoisted_tree;
    assert!(tree.root.contains_key("peer-a"));
    assert!(tree.root.contains_key("peer-b"));
    assert!(!tree.root.contains_key("react"));

    let nested_react = tree
        .nested
        .get("peer-b@1.0.0")
        .and_then(|bucket| bucket.get("react"))
        .expect("react must be nested under peer-b, not dropped");
    assert_eq!(nested_react.version, "17.0.2");
}

// S8: a registry timeout fails fast with a PackageNotFound carrying a
// transport cause.
#[tokio::test]
async fn s8_registry_timeout_fails_with_transport_cause() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lodash"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/lodash.json"))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(AnalyzerOptions {
        registry: server.uri(),
        timeout_ms: 1,
        ..AnalyzerOptions::default()
    });
    let err = analyzer.analyze_one("lodash", "4.17.21").await.unwrap_err();

    match err {
        ResolveError::PackageNotFound { cause, .. } => assert!(cause.is_some()),
        other => panic!("expected PackageNotFound, got {other:?}"),
    }
}

// Empty batch is well-formed, not an error.
#[tokio::test]
async fn empty_batch_returns_well_formed_empty_result() {
    let server = MockServer::start().await;
    let analyzer = analyzer_for(&server);

    let result = analyzer.analyze_many(&[]).await.unwrap();

    assert!(result.individual.is_empty());
    assert!(result.combined.hoisted_tree.root.is_empty());
    assert!(result.combined.flat_dependencies.is_empty());
}

// Cyclic declared dependencies must not hang the builder; the repeated
// occurrence is truncated to a childless node instead of recursing forever.
#[tokio::test]
async fn cyclic_metadata_terminates_instead_of_hanging() {
    let server = MockServer::start().await;
    mount(&server, "cycle-a", include_str!("fixtures/cycle_a.json")).await;
    mount(&server, "cycle-b", include_str!("fixtures/cycle_b.json")).await;

    let analyzer = analyzer_for(&server);
    let result = tokio::time::timeout(Duration::from_secs(5), analyzer.analyze_one("cycle-a", "1.0.0"))
        .await
        .expect("cyclic build must terminate")
        .unwrap();

    let root = &result.dependency_tree;
    assert_eq!(root.name, "cycle-a");
    let b = &root.dependencies["cycle-b"];
    assert_eq!(b.name, "cycle-b");
    let a_again = &b.dependencies["cycle-a"];
    assert_eq!(a_again.name, "cycle-a");
    assert!(a_again.dependencies.is_empty(), "revisited node must be truncated");
}

// Missing version is a validation error, not a network call.
#[tokio::test]
async fn missing_version_is_invalid_arguments() {
    let server = MockServer::start().await;
    let analyzer = analyzer_for(&server);

    let err = analyzer.analyze_one("lodash", "").await.unwrap_err();
    assert!(matches!(err, ResolveError::InvalidArguments(_)));
}
