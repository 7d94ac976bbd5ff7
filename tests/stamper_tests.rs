// Version stamper tests
// Author: kelexine (https://github.com/kelexine)

use proptest::prelude::*;
use reportgate::config::StamperConfig;
use reportgate::stamper::{self, stamp_html};

const VIEWER_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <link rel="stylesheet" href="styles.css?v=1.0">
  <link rel="stylesheet" href="theme.css?v=1.0">
</head>
<body>
  <iframe id="report-frame" src="about:blank"></iframe>
  <script src="script.js?v=1.0"></script>
  <script src="vendor.js?v=1.0"></script>
</body>
</html>
"#;

#[test]
fn test_run_rewrites_configured_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.html");
    std::fs::write(&index, VIEWER_HTML).unwrap();

    let config = StamperConfig {
        version: "2.0".to_string(),
        files: vec![index.to_string_lossy().to_string()],
    };
    let report = stamper::run(&config).unwrap();

    assert_eq!(report.updated.len(), 1);
    assert!(report.missing.is_empty());
    assert_eq!(report.replacements, 2);

    let stamped = std::fs::read_to_string(&index).unwrap();
    assert!(stamped.contains(r#"href="styles.css?v=2.0""#));
    assert!(stamped.contains(r#"src="script.js?v=2.0""#));
    // Only the two fixed references change
    assert!(stamped.contains(r#"href="theme.css?v=1.0""#));
    assert!(stamped.contains(r#"src="vendor.js?v=1.0""#));
}

#[test]
fn test_missing_file_does_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("index.html");
    let absent = dir.path().join("missing.html");
    std::fs::write(&present, VIEWER_HTML).unwrap();

    let config = StamperConfig {
        version: "3.1".to_string(),
        files: vec![
            absent.to_string_lossy().to_string(),
            present.to_string_lossy().to_string(),
        ],
    };
    let report = stamper::run(&config).unwrap();

    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.updated.len(), 1);

    let stamped = std::fs::read_to_string(&present).unwrap();
    assert!(stamped.contains(r#"href="styles.css?v=3.1""#));
}

#[test]
fn test_stamp_is_idempotent() {
    let (once, _) = stamp_html(VIEWER_HTML, "5.0");
    let (twice, count) = stamp_html(&once, "5.0");
    assert_eq!(once, twice);
    assert_eq!(count, 2);
}

proptest! {
    // Content with no versioned asset reference comes back byte-identical
    #[test]
    fn prop_content_without_references_is_unchanged(
        content in "[A-Za-z0-9 <>/=_.\\-\n]{0,400}"
    ) {
        prop_assume!(!content.contains("styles.css?v="));
        prop_assume!(!content.contains("script.js?v="));
        let (stamped, count) = stamp_html(&content, "9.9");
        prop_assert_eq!(count, 0);
        prop_assert_eq!(stamped, content);
    }
}
