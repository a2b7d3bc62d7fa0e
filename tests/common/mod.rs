#![allow(dead_code)]

use axum_test::TestServer;
use clap::Parser;
use magcargo::config::Config;
use magcargo::domain::entities::KeyScheme;
use magcargo::routes::app_router;
use magcargo::server::build_state;
use magcargo::state::AppState;
use std::path::Path;
use tempfile::TempDir;

pub const TEST_SALT: &str = "magcargo";

/// A test server backed by a throwaway database.
///
/// The temporary directory lives as long as this value.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub dir: TempDir,
}

pub fn test_config(db: &Path, key_scheme: KeyScheme) -> Config {
    Config::try_parse_from([
        "magcargo",
        "--salt",
        TEST_SALT,
        "--db",
        db.to_str().unwrap(),
        "--minlength",
        "5",
        "--namespace",
        TEST_SALT,
        "--key-scheme",
        &key_scheme.to_string(),
    ])
    .unwrap()
}

pub fn create_test_state(db: &Path, key_scheme: KeyScheme) -> AppState {
    let config = test_config(db, key_scheme);
    build_state(&config, TEST_SALT).unwrap()
}

pub fn create_test_app(key_scheme: KeyScheme) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let state = create_test_state(&dir.path().join("magcargo.db"), key_scheme);
    let server = TestServer::new(app_router(state.clone())).unwrap();

    TestApp { server, state, dir }
}
