use super::*;

// =============================================================================
// from_env: tests touching STUDIO_* vars serialize on a lock to avoid races.
// =============================================================================

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_studio_env() {
    unsafe {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_MS_ENV);
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_studio_env() };

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(cfg.timeout(), Duration::from_millis(5000));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_studio_env();
        std::env::set_var(BASE_URL_ENV, "https://studio.example.test/api/");
        std::env::set_var(TIMEOUT_MS_ENV, "1200");
    }

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://studio.example.test/api");
    assert_eq!(cfg.timeout_ms, 1200);

    unsafe { clear_studio_env() };
}

#[test]
fn from_env_bad_timeout_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_studio_env();
        std::env::set_var(TIMEOUT_MS_ENV, "soon");
    }

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);

    unsafe { clear_studio_env() };
}

#[test]
fn from_env_rejects_non_http_base() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_studio_env();
        std::env::set_var(BASE_URL_ENV, "ftp://studio.example.test");
    }

    let err = ApiConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));

    unsafe { clear_studio_env() };
}

// =============================================================================
// explicit construction
// =============================================================================

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ApiConfig::new("http://127.0.0.1:9000/api//").unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000/api");
}

#[test]
fn zero_timeout_rejected() {
    let err = ApiConfig::default().with_timeout_ms(0).unwrap_err();
    assert_eq!(err, ConfigError::ZeroTimeout);
}

#[test]
fn default_matches_observed_backend() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.base_url, "http://localhost:8000/api");
    assert_eq!(cfg.timeout_ms, 5000);
}
