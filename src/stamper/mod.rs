// Version stamper - rewrites ?v= asset references before deployment
// Author: kelexine (https://github.com/kelexine)

use crate::config::StamperConfig;
use crate::error::Result;
use crate::metrics;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{error, info};

lazy_static! {
    /// The stylesheet reference, e.g. `href="styles.css?v=1.0"`
    static ref CSS_REF: Regex =
        Regex::new(r#"(href="styles\.css\?v=)([0-9.]+)(")"#).unwrap();
    /// The script reference, e.g. `src="script.js?v=1.0"`
    static ref JS_REF: Regex =
        Regex::new(r#"(src="script\.js\?v=)([0-9.]+)(")"#).unwrap();
}

/// Outcome of a stamper run.
#[derive(Debug, Default, Clone)]
pub struct StampReport {
    /// Files rewritten in place.
    pub updated: Vec<String>,
    /// Configured files that did not exist.
    pub missing: Vec<String>,
    /// Total asset references rewritten.
    pub replacements: usize,
}

/// Rewrite the two fixed asset references to the given version. Every
/// other byte of the content is left untouched. Returns the stamped
/// content and the number of references rewritten.
pub fn stamp_html(content: &str, version: &str) -> (String, usize) {
    let replacement = format!("${{1}}{}${{3}}", version);

    let css_count = CSS_REF.find_iter(content).count();
    let after_css = CSS_REF.replace_all(content, replacement.as_str());
    let js_count = JS_REF.find_iter(&after_css).count();
    let stamped = JS_REF.replace_all(&after_css, replacement.as_str());

    (stamped.into_owned(), css_count + js_count)
}

/// Rewrite version references in every configured file, in place.
///
/// A missing file is reported and skipped; the run continues with the
/// remaining files. There is no rollback across files.
pub fn run(config: &StamperConfig) -> Result<StampReport> {
    info!("Stamping version references to {}", config.version);
    let mut report = StampReport::default();

    for file in &config.files {
        let path = Path::new(file);
        if !path.exists() {
            error!("File {} does not exist, skipping", file);
            metrics::record_stamp_file("missing");
            report.missing.push(file.clone());
            continue;
        }

        let content = fs::read_to_string(path)?;
        let (stamped, count) = stamp_html(&content, &config.version);
        fs::write(path, stamped)?;

        info!("Updated {} ({} references)", file, count);
        metrics::record_stamp_file("updated");
        report.updated.push(file.clone());
        report.replacements += count;
    }

    info!(
        "Stamping complete: {} updated, {} missing",
        report.updated.len(),
        report.missing.len()
    );
    Ok(report)
}
