use jgrad_core::telemetry::{init_tracing, InitError};

#[test]
fn second_initialisation_is_rejected() {
    std::env::remove_var("JGRAD_LOG");
    std::env::remove_var("RUST_LOG");
    init_tracing("warn").expect("first init");
    tracing::debug!(target: "jgrad_core", "filtered out at warn");
    let err = init_tracing("debug").unwrap_err();
    assert!(matches!(err, InitError::AlreadyInitialised));
}
