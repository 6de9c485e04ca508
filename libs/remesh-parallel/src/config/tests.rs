//! Tests covering thread-count resolution.

use super::*;

#[test]
fn test_explicit_override_beats_environment() {
    assert_eq!(
        ExecutorConfig::resolve_thread_count(Some(3), Some("16"), Some(32)),
        3
    );
}

#[test]
fn test_environment_beats_hardware() {
    assert_eq!(
        ExecutorConfig::resolve_thread_count(None, Some("16"), Some(32)),
        16
    );
}

#[test]
fn test_zero_override_is_ignored() {
    assert_eq!(
        ExecutorConfig::resolve_thread_count(Some(0), Some("5"), Some(32)),
        5
    );
}

#[test]
fn test_invalid_environment_falls_through() {
    for env in ["0", "-4", "many", ""] {
        assert_eq!(
            ExecutorConfig::resolve_thread_count(None, Some(env), Some(6)),
            6,
            "env value {env:?} should be ignored"
        );
    }
}

#[test]
fn test_environment_tolerates_whitespace() {
    assert_eq!(
        ExecutorConfig::resolve_thread_count(None, Some(" 12\n"), None),
        12
    );
}

#[test]
fn test_fallback_is_eight() {
    assert_eq!(ExecutorConfig::resolve_thread_count(None, None, None), 8);
    assert_eq!(ExecutorConfig::resolve_thread_count(None, None, Some(0)), 8);
}

#[test]
fn test_from_env_honours_explicit_override() {
    let cfg = ExecutorConfig::from_env(Some(3));
    assert_eq!(cfg.threads(), 3);
    assert_eq!(cfg.min_parallel(), DEFAULT_MIN_PARALLEL);
}

#[test]
fn test_default_resolves_positive_count() {
    assert!(ExecutorConfig::default().threads() > 0);
}

#[test]
fn test_builders_set_fields() {
    let cfg = ExecutorConfig::with_threads(4).with_min_parallel(10);
    assert_eq!(cfg.threads(), 4);
    assert_eq!(cfg.min_parallel(), 10);
    assert_eq!(ExecutorConfig::serial().threads(), 1);
}
