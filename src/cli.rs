//! Command-line interface.
//!
//! Flags use the `--flag=value` form. Anything else, including a known flag
//! written without `=value` or an argument that is not valid UTF-8, is set
//! aside and reported instead of aborting startup. Values are not validated:
//! the port is read like C's `atoi`.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, ServerConfig};

/// Flags understood by the parser, with whether they take a value.
const KNOWN_FLAGS: &[(&str, bool)] = &[
    ("--port", true),
    ("--telegram_url", true),
    ("--env", true),
    ("--host", true),
    ("--config", true),
    ("--log-level", true),
    ("--help", false),
    ("-h", false),
    ("--version", false),
    ("-V", false),
];

#[derive(Debug, Parser, PartialEq)]
#[command(name = "doyoque")]
#[command(version, about = "Minimal single-threaded HTTP server", long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// TCP port to listen on (0 picks a free port)
    #[arg(long, value_parser = parse_port)]
    pub port: Option<PortArg>,

    /// Telegram endpoint (accepted and reported, not called)
    #[arg(long = "telegram_url")]
    pub telegram_url: Option<String>,

    /// Deployment label
    #[arg(long, env = "DOYOQUE_ENV")]
    pub env: Option<String>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// TOML config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// A `--port` value as given, with the port it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortArg {
    pub raw: String,
    pub port: u16,
}

impl PortArg {
    /// True when the raw text was a plain in-range port number.
    pub fn is_exact(&self) -> bool {
        self.raw.parse::<u16>() == Ok(self.port)
    }
}

/// Read a port the way `atoi` would: optional leading whitespace and `+`,
/// then leading digits. No digits, or a value past `u16::MAX`, gives 0.
pub fn parse_port(raw: &str) -> Result<PortArg, Infallible> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let port = s[..end].parse::<u16>().unwrap_or(0);
    Ok(PortArg {
        raw: raw.to_string(),
        port,
    })
}

/// Something about the command line worth telling the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgWarning {
    Unknown(String),
    Port(PortArg),
}

impl std::fmt::Display for ArgWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgWarning::Unknown(arg) => write!(f, "Unknown argument: {}", arg),
            ArgWarning::Port(p) => write!(f, "Port {:?} is not a valid port number, using {}", p.raw, p.port),
        }
    }
}

impl Cli {
    /// Parse process arguments. Problems are returned as warnings, not rejected.
    ///
    /// Exits the process only for `--help` and `--version`.
    pub fn parse_lenient<I, T>(args: I) -> (Self, Vec<ArgWarning>)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (known, unknown) = partition_args(args);
        let cli = Self::parse_from(known);
        let warnings = cli.warnings(unknown);
        (cli, warnings)
    }

    /// Like [`Cli::parse_lenient`] but returns clap errors instead of exiting.
    pub fn try_parse_lenient<I, T>(args: I) -> Result<(Self, Vec<ArgWarning>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (known, unknown) = partition_args(args);
        let cli = Self::try_parse_from(known)?;
        let warnings = cli.warnings(unknown);
        Ok((cli, warnings))
    }

    fn warnings(&self, unknown: Vec<String>) -> Vec<ArgWarning> {
        let mut warnings: Vec<ArgWarning> = unknown.into_iter().map(ArgWarning::Unknown).collect();
        if let Some(port) = self.port.as_ref().filter(|p| !p.is_exact()) {
            warnings.push(ArgWarning::Port(port.clone()));
        }
        warnings
    }

    /// Build the effective configuration: defaults, then the file, then flags.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port.port;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if self.telegram_url.is_some() {
            config.app.telegram_url = self.telegram_url;
        }
        if self.env.is_some() {
            config.app.env = self.env;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        Ok(config)
    }
}

/// Split arguments into those clap should see and those it should not.
///
/// The first argument is the program name and always kept. Value flags are
/// only recognised as `--flag=value`; switches only without `=`.
pub fn partition_args<I, T>(args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut unknown = Vec::new();

    for arg in args {
        let Some(text) = arg.to_str() else {
            unknown.push(arg.to_string_lossy().into_owned());
            continue;
        };

        let (name, has_inline_value) = match text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (text, false),
        };

        let recognised = KNOWN_FLAGS
            .iter()
            .any(|(flag, takes_value)| *flag == name && *takes_value == has_inline_value);

        if recognised {
            known.push(arg);
        } else {
            unknown.push(text.to_string());
        }
    }

    (known, unknown)
}
