//! Discovery results and the per-strategy trace behind them.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::host::OsFamily;

/// The strategy that produced (or failed to produce) a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySource {
    /// Process configuration property.
    Property,
    /// Override environment variable.
    Environment,
    /// Windows registry.
    Registry,
    /// Search-path scan.
    SearchPath,
    /// Locator subprocess.
    Locator,
    /// Legacy version-registry dotfile.
    LegacyConfig,
}

impl DiscoverySource {
    /// Every source, in chain order.
    pub const ALL: [Self; 6] = [
        Self::Property,
        Self::Environment,
        Self::Registry,
        Self::SearchPath,
        Self::Locator,
        Self::LegacyConfig,
    ];

    /// Whether this source applies on the given OS family.
    pub const fn applies_to(self, os_family: OsFamily) -> bool {
        match self {
            Self::Property | Self::Environment => true,
            Self::Registry => matches!(os_family, OsFamily::Windows),
            Self::SearchPath | Self::Locator | Self::LegacyConfig => {
                matches!(os_family, OsFamily::Unix)
            }
        }
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Property => "property",
            Self::Environment => "environment",
            Self::Registry => "registry",
            Self::SearchPath => "search_path",
            Self::Locator => "locator",
            Self::LegacyConfig => "legacy_config",
        };
        f.write_str(name)
    }
}

/// A located installation directory and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub path: PathBuf,
    pub source: DiscoverySource,
}

/// What one strategy did during a discovery call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The strategy produced this path.
    Found(PathBuf),
    /// The strategy ran and found nothing.
    NotFound,
    /// The strategy was not run: an earlier one succeeded, or the chain
    /// stopped before reaching it.
    Skipped,
    /// The strategy never runs on this OS family.
    NotApplicable,
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(path) => write!(f, "found {}", path.display()),
            Self::NotFound => f.write_str("not found"),
            Self::Skipped => f.write_str("skipped"),
            Self::NotApplicable => f.write_str("not applicable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
    pub source: DiscoverySource,
    pub outcome: AttemptOutcome,
}

/// Full trace of one discovery call.
///
/// `attempts` always lists every [`DiscoverySource`] in chain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub os_family: Option<OsFamily>,
    pub discovery: Option<Discovery>,
    pub attempts: Vec<StrategyAttempt>,
}

impl DiscoveryReport {
    /// Start a report with every source skipped, or not applicable when the
    /// OS family rules it out. An unknown family rules nothing out.
    pub(crate) fn new(os_family: Option<OsFamily>) -> Self {
        Self {
            os_family,
            discovery: None,
            attempts: DiscoverySource::ALL
                .into_iter()
                .map(|source| StrategyAttempt {
                    source,
                    outcome: match os_family {
                        Some(os) if !source.applies_to(os) => AttemptOutcome::NotApplicable,
                        _ => AttemptOutcome::Skipped,
                    },
                })
                .collect(),
        }
    }

    /// Record the outcome of `source`; a found path becomes the discovery.
    pub(crate) fn record(&mut self, source: DiscoverySource, found: Option<&PathBuf>) {
        let outcome = match found {
            Some(path) => {
                self.discovery = Some(Discovery {
                    path: path.clone(),
                    source,
                });
                AttemptOutcome::Found(path.clone())
            }
            None => AttemptOutcome::NotFound,
        };
        if let Some(attempt) = self.attempts.iter_mut().find(|a| a.source == source) {
            attempt.outcome = outcome;
        }
    }

    /// The discovered directory, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        self.discovery.as_ref().map(|d| &d.path)
    }

    /// Outcome recorded for `source`.
    pub fn outcome(&self, source: DiscoverySource) -> Option<&AttemptOutcome> {
        self.attempts
            .iter()
            .find(|a| a.source == source)
            .map(|a| &a.outcome)
    }
}

impl fmt::Display for DiscoveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.os_family {
            Some(os) => writeln!(f, "os_family = {os}")?,
            None => writeln!(f, "os_family = unknown")?,
        }
        for attempt in &self.attempts {
            writeln!(f, "{} = {}", attempt.source, attempt.outcome)?;
        }
        match &self.discovery {
            Some(found) => write!(
                f,
                "installation = {} (from {})",
                found.path.display(),
                found.source
            ),
            None => write!(f, "installation = none"),
        }
    }
}
