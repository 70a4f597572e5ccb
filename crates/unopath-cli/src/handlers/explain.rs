//! Explain command handler.
//!
//! Shows every strategy attempt in `key = value` form, or as JSON.

use unopath_core::{DiscoveryReport, InstallationFinder};

use crate::error::CliError;

/// Execute the explain command.
///
/// Absence is not an error here; the report says what happened.
pub fn execute(finder: &InstallationFinder, json: bool) -> Result<(), CliError> {
    let report = finder.find_with_report()?;
    println!("{}", render(&report, json)?);
    Ok(())
}

fn render(report: &DiscoveryReport, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unopath_core::{DiscoveryConfig, OsFamily, StaticHost};

    fn report() -> DiscoveryReport {
        let host = StaticHost::with_family(OsFamily::Windows).with_env("UNO_PATH", r"C:\LO\program");
        InstallationFinder::new(DiscoveryConfig::default())
            .unwrap()
            .with_host(host)
            .find_with_report()
            .unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = render(&report(), false).unwrap();
        assert!(text.starts_with("os_family = windows\n"));
        assert!(text.contains("property = not found\n"));
        assert!(text.contains(r"environment = found C:\LO\program"));
        assert!(text.contains("registry = skipped\n"));
        assert!(text.contains("search_path = not applicable\n"));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&report(), true).unwrap()).unwrap();
        assert_eq!(json["os_family"], "windows");
        assert_eq!(json["discovery"]["source"], "environment");
        assert_eq!(json["discovery"]["path"], r"C:\LO\program");
    }
}
