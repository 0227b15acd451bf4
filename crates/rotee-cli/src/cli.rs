//! Argument parsing, logging setup, and dispatch into the copier.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use rotee_config::{OpenMode, ProbePolicy, TeeConfig, defaults, parse_duration};
use rotee_copier::Copier;
use rotee_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{Instrument, debug, info_span};

use crate::error::{CliError, CliResult, EXIT_FAILURE};

const BUILD_SHA: &str = match option_env!("ROTEE_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

#[derive(Debug, Parser)]
#[command(
    name = "rotee",
    version,
    about = "Copy standard input to standard output and to FILE",
    long_about = "rotee is a version of tee that re-opens its output file when the file is \
                  moved or re-created by an external program, such as logrotate."
)]
pub(crate) struct Cli {
    /// Append to FILE. Do not truncate on open/re-open.
    #[arg(short = 'a', long = "append")]
    append: bool,
    /// Interval between checks for changes to FILE (e.g. 500ms, 5s, 1m).
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "DURATION",
        value_parser = parse_interval,
        default_value = defaults::CHECK_INTERVAL_DISPLAY
    )]
    interval: Duration,
    /// Re-open FILE as soon as a check finds it missing instead of waiting for it to reappear.
    #[arg(long = "reopen-on-missing")]
    reopen_on_missing: bool,
    /// Log level for diagnostics on standard error.
    #[arg(long, env = "ROTEE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    /// Log format for diagnostics on standard error (pretty or json). Defaults to pretty.
    #[arg(long, env = "ROTEE_LOG_FORMAT", value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
    /// File to copy input into.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

impl Cli {
    fn resolve(&self) -> CliResult<TeeConfig> {
        let path = self.file.clone().unwrap_or_default();
        Ok(TeeConfig::new(path)?
            .with_mode(OpenMode::from_append_flag(self.append))
            .with_check_interval(self.interval)
            .with_probe_policy(ProbePolicy::from_reopen_flag(self.reopen_on_missing)))
    }

    fn logging_config(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.log_level,
            format: self.log_format.unwrap_or_default(),
            build_sha: BUILD_SHA,
        }
    }
}

/// Parses process arguments and copies standard input to standard output and
/// the named file. Returns the process exit code.
pub async fn run() -> i32 {
    run_with(std::env::args_os(), tokio::io::stdin(), tokio::io::stdout()).await
}

/// Parses `args` (including the program name) and copies `input` to `output`
/// and the named file. Diagnostics go to standard error. Returns the process
/// exit code: `0` on success, `2` for usage errors, `1` for copy failures.
pub async fn run_with<I, T, R, W>(args: I, input: R, output: W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => return parse_error_exit_code(&err, &err.print()),
    };

    match dispatch(&cli, input, output).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            if err.is_usage() {
                eprintln!();
                eprintln!("{}", Cli::command().render_help());
            }
            err.exit_code()
        }
    }
}

async fn dispatch<R, W>(cli: &Cli, input: R, output: W) -> CliResult<()>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let config = cli.resolve()?;

    // A subscriber may already be installed when embedded or under test.
    let logging = init_logging(&cli.logging_config());

    let span = info_span!(
        "rotee",
        path = %config.path().display(),
        mode = %config.mode(),
        build = %build_sha()
    );
    if let Err(err) = logging {
        debug!(parent: &span, error = %err, "keeping existing tracing subscriber");
    }

    let report = Copier::new(config, input, output)
        .run()
        .instrument(span.clone())
        .await
        .map_err(CliError::from)?;

    debug!(
        parent: &span,
        bytes = report.bytes,
        chunks = report.chunks,
        reopens = report.reopens,
        "input exhausted"
    );
    Ok(())
}

/// Exit code for a clap parse outcome. Help and version requests print to
/// stdout and exit 0 unless that write fails.
fn parse_error_exit_code(err: &clap::Error, printed: &io::Result<()>) -> i32 {
    match printed {
        Ok(()) => err.exit_code(),
        Err(_) if err.exit_code() == 0 => EXIT_FAILURE,
        // Usage errors already carry a non-zero code; stderr being gone changes nothing.
        Err(_) => err.exit_code(),
    }
}

fn parse_interval(input: &str) -> Result<Duration, String> {
    parse_duration(input).map_err(|err| err.to_string())
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}
