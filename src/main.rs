use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vsprobe::{CliOverrides, ConfigError, ProbeConfig, ProbeError};
use vsprobe_types::PluginStatus;

#[derive(Parser, Debug)]
#[command(name = "check_vsphere", version)]
#[command(about = "Nagios plugin to check vSphere for VMware metrics")]
#[command(after_help = "Host, username and password can also be defined using the \
    environment variables VI_SERVER, VI_USERNAME and VI_PASSWORD.")]
struct Args {
    /// vSphere server to interrogate
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// ESX host to narrow the check to
    #[arg(short = 'E', long)]
    esxhost: Option<String>,

    /// vSphere username (username@domain if using SSO/AD)
    #[arg(short = 'U', long)]
    username: Option<String>,

    /// vSphere password
    #[arg(short = 'P', long)]
    password: Option<String>,

    /// Test to run (dsusage|cpuusage|memusage|dsio)
    #[arg(short = 'T', long)]
    test: String,

    /// Warning threshold
    #[arg(short = 'W', long = "warn", visible_alias = "warning")]
    warn: Option<f64>,

    /// Critical threshold
    #[arg(short = 'C', long = "crit", visible_alias = "critical")]
    crit: Option<f64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// HTTP request timeout in seconds [default: 10]
    #[arg(long)]
    timeout: Option<u64>,

    /// Output more information on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            hostname: self.hostname.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            esxhost: self.esxhost.clone(),
            test: self.test.clone(),
            warning: self.warn,
            critical: self.crit,
            insecure: self.insecure,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

fn main() {
    // Argument errors must surface as UNKNOWN, not clap's default exit code
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                PluginStatus::Unknown.exit_code()
            } else {
                0
            };
            process::exit(code);
        }
    };

    init_tracing(args.verbose);

    let status = match run(&args) {
        Ok(status) => status,
        Err(err) => {
            let (status, report) = failure_report(&err);
            match report {
                Report::Stderr(line) => eprintln!("{}", line),
                Report::Stdout(line) => println!("{}", line),
            }
            status
        }
    };

    process::exit(status.exit_code());
}

/// Logs go to stderr; stdout carries only the plugin line.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "vsprobe=debug,vsprobe_adapters=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(args: &Args) -> Result<PluginStatus> {
    let config = ProbeConfig::from_env(&args.overrides())?;

    if config.esxhost.is_some() && !config.check.honours_esxhost() {
        eprintln!("WARNING: --esxhost is ignored by the {} test", config.check);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(vsprobe::probe(&config))?;
    println!("{}", result);

    Ok(result.overall_status.into())
}

/// Where a failure message is written.
#[derive(Debug, PartialEq)]
enum Report {
    Stderr(String),
    Stdout(String),
}

/// Configuration errors go to stderr, anything after that becomes the plugin
/// output line.
fn failure_report(err: &anyhow::Error) -> (PluginStatus, Report) {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        let line = format!("ERROR: {}", config_err);
        return (config_err.status(), Report::Stderr(line));
    }

    let status = err
        .downcast_ref::<ProbeError>()
        .map_or(PluginStatus::Unknown, ProbeError::status);
    (status, Report::Stdout(format!("UNKNOWN: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsprobe::InvalidMetric;
    use vsprobe_adapters::AdapterError;

    #[test]
    fn test_config_error_goes_to_stderr() {
        let err = anyhow::Error::new(ConfigError::MissingServer);
        let (status, report) = failure_report(&err);
        assert_eq!(status.exit_code(), 3);
        let expected = Report::Stderr("ERROR: vSphere server not defined".into());
        assert_eq!(report, expected);
    }

    #[test]
    fn test_run_failures_go_to_stdout() {
        let cases = [
            (
                ProbeError::Connection(AdapterError::Auth("bad password".into())),
                "UNKNOWN: Failed to connect to vSphere server: Authentication failed: bad password",
            ),
            (
                ProbeError::Query(AdapterError::Timeout),
                "UNKNOWN: vSphere query failed: Request timed out",
            ),
            (
                ProbeError::InvalidMetric(InvalidMetric::new("ds1", "capacity is zero")),
                "UNKNOWN: Invalid metric for 'ds1': capacity is zero",
            ),
        ];

        for (err, expected) in cases {
            let (status, report) = failure_report(&anyhow::Error::new(err));
            assert_eq!(status, PluginStatus::Unknown);
            assert_eq!(report, Report::Stdout(expected.into()));
        }
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let err = anyhow::anyhow!("Failed to start async runtime");
        let (status, report) = failure_report(&err);
        assert_eq!(status.exit_code(), 3);
        let expected = Report::Stdout("UNKNOWN: Failed to start async runtime".into());
        assert_eq!(report, expected);
    }

    #[test]
    fn test_timeout_defaults_through_config() {
        let args = Args::try_parse_from(["check_vsphere", "-T", "dsusage"]).unwrap();
        assert_eq!(args.overrides().timeout, None);

        let argv = ["check_vsphere", "-T", "dsusage", "--timeout", "3"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.overrides().timeout, Some(Duration::from_secs(3)));
    }
}
