// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use reportgate::error::GatewayError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::Config("missing section".to_string()),
        GatewayError::Upstream("origin unreachable".to_string()),
        GatewayError::InvalidRequest("bad url".to_string()),
        GatewayError::Install("bootstrap fetch failed".to_string()),
        GatewayError::CacheWrite("caching disabled".to_string()),
        GatewayError::Internal("unexpected".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_invalid_request_error() {
    let error = GatewayError::InvalidRequest("unresolvable URL 'http://['".to_string());
    assert!(format!("{}", error).contains("unresolvable URL"));
}

#[test]
fn test_upstream_error() {
    let error = GatewayError::Upstream("connection refused".to_string());
    assert!(format!("{}", error).contains("connection refused"));
}

#[test]
fn test_install_error() {
    let error = GatewayError::Install("bootstrap fetch /styles.css returned status 404".to_string());
    assert!(format!("{}", error).contains("404"));
}

#[test]
fn test_cache_write_error() {
    let error = GatewayError::CacheWrite("caching disabled".to_string());
    assert!(format!("{}", error).contains("caching disabled"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let error: GatewayError = io.into();
    assert!(format!("{}", error).contains("no such file"));
}
