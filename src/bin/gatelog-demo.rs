#![deny(unsafe_code)]

//! Installs the process-wide dispatcher from configuration and emits one
//! line per tier.
//!
//! ```text
//! gatelog-demo [--syslog] [CONFIG_FILE]
//! ```
//!
//! Without a file the threshold comes from `GATELOG_LOG_LEVEL` and
//! `GATELOG_LOG_POLICY`. Lines go to stderr, or to syslog with `--syslog`.

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::path::PathBuf;
use std::{io, process::ExitCode};

use clap::Parser;
use logging::facade::{self, AlreadyInstalled};
use logging::{ConfigError, Dispatcher, EmitError, LoggingConfig, log_debug, log_info};
use logging_sink::{LineSink, LogSink};

const TAG: &str = "gatelog-demo";

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[cfg(not(unix))]
    #[error("{0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Install(#[from] AlreadyInstalled),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Emits one line per tier through the process-wide dispatcher.
#[derive(Parser, Debug)]
#[command(name = "gatelog-demo")]
#[command(version)]
struct Options {
    /// Send records to syslog instead of stderr.
    #[arg(long)]
    syslog: bool,

    /// Properties file holding `log_level` and `log_policy`.
    ///
    /// Without it the values come from `GATELOG_LOG_LEVEL` and
    /// `GATELOG_LOG_POLICY`.
    config: Option<PathBuf>,
}

impl Options {
    fn load_config(&self) -> Result<LoggingConfig, DemoError> {
        match &self.config {
            Some(path) => Ok(LoggingConfig::from_file(path)?),
            None => Ok(LoggingConfig::from_env()),
        }
    }

    fn sink(&self) -> Result<Box<dyn LogSink>, DemoError> {
        if self.syslog {
            return syslog_sink();
        }
        Ok(Box::new(LineSink::new(io::stderr())))
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn syslog_sink() -> Result<Box<dyn LogSink>, DemoError> {
    let config = logging_sink::syslog::SyslogConfig::default();
    Ok(Box::new(config.open()))
}

#[cfg(not(unix))]
fn syslog_sink() -> Result<Box<dyn LogSink>, DemoError> {
    Err(DemoError::Unsupported("--syslog is only available on unix"))
}

fn run(options: &Options) -> Result<usize, DemoError> {
    let config = options.load_config()?;
    facade::install(Dispatcher::from_config(options.sink()?, &config))?;

    let cause = io::Error::new(io::ErrorKind::TimedOut, "peer did not answer");
    let mut written = 0;
    written += facade::verbose(TAG, "verbose line")?;
    written += log_debug!(TAG, "debug line built after the gate, pid {}", std::process::id())?;
    written += log_info!(TAG, "info line at threshold {}", facade::threshold())?;
    written += facade::warn_err(TAG, Some("warn line with a cause"), Some(&cause))?;
    written += facade::error_failure(TAG, &cause)?;
    written += facade::fatal(TAG, "fatal line")?;
    Ok(written)
}

fn main() -> ExitCode {
    match run(&Options::parse()) {
        Ok(written) => {
            println!("threshold {}: {written} bytes written", facade::threshold());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{TAG}: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("gatelog-demo").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        Options::command().debug_assert();
    }

    #[test]
    fn options_accept_flag_and_file() {
        let options = parse(&["--syslog", "app.properties"]).unwrap();
        assert!(options.syslog);
        assert_eq!(options.config, Some(PathBuf::from("app.properties")));
    }

    #[test]
    fn no_arguments_means_stderr_and_environment() {
        let options = parse(&[]).unwrap();
        assert!(!options.syslog);
        assert_eq!(options.config, None);
    }

    #[test]
    fn options_reject_unknown_flags_and_extra_files() {
        assert_eq!(parse(&["--loud"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse(&["a", "b"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let options = parse(&["/definitely/missing.properties"]).unwrap();
        assert!(matches!(options.load_config(), Err(DemoError::Config(_))));
    }
}
