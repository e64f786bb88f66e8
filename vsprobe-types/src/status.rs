//! Status levels and plugin exit statuses.

use core::fmt;

/// Health of a single entity or of a whole check.
///
/// Variants are ordered so that `max()` over a set of statuses yields the
/// worst one: `Ok < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum StatusLevel {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl StatusLevel {
    /// Returns the status word used in plugin output.
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusLevel::Ok => "OK",
            StatusLevel::Warning => "WARNING",
            StatusLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Final status of a probe run, as understood by the alerting system.
///
/// `Unknown` is reserved for runs that never reached evaluation (bad
/// arguments, unreachable server, unusable metrics). It has no place in the
/// [`StatusLevel`] ordering and is only produced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum PluginStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl PluginStatus {
    /// Standard monitoring-plugin exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            PluginStatus::Ok => 0,
            PluginStatus::Warning => 1,
            PluginStatus::Critical => 2,
            PluginStatus::Unknown => 3,
        }
    }

    /// Returns the status word used in plugin output.
    pub fn symbol(&self) -> &'static str {
        match self {
            PluginStatus::Ok => "OK",
            PluginStatus::Warning => "WARNING",
            PluginStatus::Critical => "CRITICAL",
            PluginStatus::Unknown => "UNKNOWN",
        }
    }
}

impl From<StatusLevel> for PluginStatus {
    fn from(level: StatusLevel) -> Self {
        match level {
            StatusLevel::Ok => PluginStatus::Ok,
            StatusLevel::Warning => PluginStatus::Warning,
            StatusLevel::Critical => PluginStatus::Critical,
        }
    }
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(StatusLevel::Ok < StatusLevel::Warning);
        assert!(StatusLevel::Warning < StatusLevel::Critical);

        let worst = [StatusLevel::Warning, StatusLevel::Critical, StatusLevel::Ok]
            .into_iter()
            .max();
        assert_eq!(worst, Some(StatusLevel::Critical));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PluginStatus::from(StatusLevel::Ok).exit_code(), 0);
        assert_eq!(PluginStatus::from(StatusLevel::Warning).exit_code(), 1);
        assert_eq!(PluginStatus::from(StatusLevel::Critical).exit_code(), 2);
        assert_eq!(PluginStatus::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(StatusLevel::Warning.to_string(), "WARNING");
        assert_eq!(PluginStatus::Unknown.to_string(), "UNKNOWN");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&StatusLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
