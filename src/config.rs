//! Probe configuration.
//!
//! Command-line values take precedence over the `VI_*` environment:
//!
//! ```text
//! --hostname  / VI_SERVER
//! --username  / VI_USERNAME
//! --password  / VI_PASSWORD
//! ```
//!
//! The environment is read through the `config` crate so tests can inject a
//! fake one. Everything is validated here, before any connection is made.

use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use vsprobe_adapters::vsphere;
use vsprobe_types::ThresholdPair;

use crate::checks::CheckKind;
use crate::error::ConfigError;

/// Environment prefix for server and credentials.
pub const ENV_PREFIX: &str = "VI";

/// Values taken from the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub esxhost: Option<String>,
    pub test: String,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub insecure: bool,
    /// Falls back to [`ProbeConfig::DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

/// Server and credentials after merging CLI and environment.
#[derive(Debug, Default, Deserialize)]
struct ServerSettings {
    server: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

/// Fully validated configuration for one probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    /// ESX host the check is narrowed to.
    pub esxhost: Option<String>,
    pub check: CheckKind,
    pub thresholds: ThresholdPair,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    pub timeout: Duration,
}

impl ProbeConfig {
    /// Default HTTP request timeout.
    pub const DEFAULT_TIMEOUT: Duration = vsphere::DEFAULT_TIMEOUT;

    /// Merge CLI values over `env` and validate the result.
    pub fn resolve(cli: &CliOverrides, env: Environment) -> Result<Self, ConfigError> {
        let settings: ServerSettings = Config::builder()
            .add_source(env)
            .set_override_option("server", cli.hostname.clone())?
            .set_override_option("username", cli.username.clone())?
            .set_override_option("password", cli.password.clone())?
            .build()?
            .try_deserialize()?;

        let server = non_empty(settings.server).ok_or(ConfigError::MissingServer)?;
        let username = non_empty(settings.username).ok_or(ConfigError::MissingUsername)?;
        let password = non_empty(settings.password).ok_or(ConfigError::MissingPassword)?;

        let check: CheckKind = cli.test.parse()?;

        let critical = cli.critical.ok_or(ConfigError::MissingCritical)?;
        let warning = cli.warning.ok_or(ConfigError::MissingWarning)?;
        let thresholds = ThresholdPair::new(warning, critical)?;

        let timeout = cli.timeout.unwrap_or(Self::DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            server,
            username,
            password,
            esxhost: non_empty(cli.esxhost.clone()),
            check,
            thresholds,
            insecure: cli.insecure,
            timeout,
        })
    }

    /// Resolve against the process environment.
    pub fn from_env(cli: &CliOverrides) -> Result<Self, ConfigError> {
        Self::resolve(cli, Environment::with_prefix(ENV_PREFIX))
    }

    #[cfg(test)]
    pub(crate) fn for_check(check: CheckKind, thresholds: ThresholdPair) -> Self {
        Self {
            server: "vcenter.test".to_string(),
            username: "monitor".to_string(),
            password: "secret".to_string(),
            esxhost: None,
            check,
            thresholds,
            insecure: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
