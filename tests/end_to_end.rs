mod common;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use magcargo::domain::entities::KeyScheme;
use magcargo::routes::app_router;
use magcargo::utils::short_code::ShortCodeCodec;
use std::collections::HashSet;

#[tokio::test]
async fn test_round_trip_many_urls() {
    let app = common::create_test_app(KeyScheme::Code);
    let mut codes = HashSet::new();

    for i in 0..20 {
        let url = format!("https://example.com/page/{i}?ref=test");

        let created = app.server.post("/").form(&[("url", url.as_str())]).await;
        created.assert_status(StatusCode::CREATED);
        let code = created.text();
        assert!(code.len() >= 5);
        assert!(codes.insert(code.clone()), "duplicate code {code}");

        let resolved = app.server.get(&format!("/{code}")).await;
        resolved.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(resolved.header(header::LOCATION), url.as_str());
    }

    assert_eq!(app.state.link_service.issued_count().await.unwrap(), 20);
}

#[tokio::test]
async fn test_codes_decode_to_issued_ids() {
    let app = common::create_test_app(KeyScheme::Code);
    let codec = ShortCodeCodec::new(common::TEST_SALT, 5).unwrap();

    for expected_id in 1..=5u64 {
        let response = app
            .server
            .post("/")
            .form(&[("url", "https://example.com")])
            .await;

        assert_eq!(codec.decode_id(&response.text()).unwrap(), expected_id);
    }
}

#[tokio::test]
async fn test_links_survive_restart() {
    for key_scheme in [KeyScheme::Code, KeyScheme::Id] {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("magcargo.db");

        let code = {
            let state = common::create_test_state(&db, key_scheme);
            let server = TestServer::new(app_router(state)).unwrap();

            let response = server
                .post("/")
                .form(&[("url", "https://example.com/durable")])
                .await;
            response.assert_status(StatusCode::CREATED);
            response.text()
        };

        let state = common::create_test_state(&db, key_scheme);
        assert_eq!(state.link_service.issued_count().await.unwrap(), 1);
        let server = TestServer::new(app_router(state)).unwrap();

        let resolved = server.get(&format!("/{code}")).await;
        resolved.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            resolved.header(header::LOCATION),
            "https://example.com/durable"
        );

        // The counter continues where it stopped.
        let codec = ShortCodeCodec::new(common::TEST_SALT, 5).unwrap();
        let next = server
            .post("/")
            .form(&[("url", "https://example.com/next")])
            .await;
        next.assert_text(codec.encode_id(2));
    }
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    use clap::Parser;
    use magcargo::config::Config;
    use magcargo::server::build_state;

    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("magcargo.db");
    let db_arg = db.to_str().unwrap();

    let code = {
        let config =
            Config::try_parse_from(["magcargo", "--salt", "first", "--db", db_arg]).unwrap();
        let state = build_state(&config, "first").unwrap();
        state
            .link_service
            .shorten("https://example.com/first")
            .await
            .unwrap()
            .code
    };

    let config = Config::try_parse_from(["magcargo", "--salt", "second", "--db", db_arg]).unwrap();
    let state = build_state(&config, "second").unwrap();

    // A different salt starts a fresh sequence in its own namespace.
    assert_eq!(state.link_service.issued_count().await.unwrap(), 0);
    assert!(state.link_service.resolve(&code).await.is_err());

    let link = state
        .link_service
        .shorten("https://example.com/second")
        .await
        .unwrap();
    assert_eq!(link.id, 1);
}
