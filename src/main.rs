use anyhow::{Context, Error, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;
use termcolor::{ColorChoice, StandardStream};

use ipreport::enrich::ipinfo::DEFAULT_BASE_URL;
use ipreport::input::FileOrStdin;
use ipreport::report::{self, DEFAULT_REPORT_PATH};
use ipreport::{summarize_log, EnrichOptions, Enricher, IpInfoConfig};

/// Check if the error chain contains a broken pipe error.
#[inline(always)]
fn is_broken_pipe(err: &Error) -> bool {
    for cause in err.chain() {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::BrokenPipe {
                return true;
            }
        }
    }
    false
}

/// Summarize the public IPv4 addresses in a log, with hit counts, reverse DNS
/// and ipinfo.io details. Writes a CSV report and prints a table.
///
/// Suitable logs include SSH server logs and journalctl output.
#[derive(Parser, Debug)]
#[clap(author, version, long_about = None)]
struct Args {
    /// Log file to scan. Use "-" to read from stdin
    #[clap(
        long,
        visible_alias = "log-file",
        value_name = "PATH",
        value_hint = clap::ValueHint::FilePath
    )]
    log: Utf8PathBuf,

    /// Access token for ipinfo.io. Without one, ISP queries are unauthenticated
    /// and return limited data
    #[clap(long, value_name = "TOKEN", num_args = 0..=1)]
    ipinfo_token: Option<Option<String>>,

    /// Skip reverse DNS lookups and the "rDNS result" column
    #[clap(long)]
    no_rdns: bool,

    /// Skip ipinfo.io lookups and the City, Region, Country and ISP columns
    #[clap(long, visible_alias = "no-isp")]
    no_isp_queries: bool,

    /// Where to write the CSV report
    #[clap(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_REPORT_PATH,
        value_hint = clap::ValueHint::FilePath
    )]
    output: Utf8PathBuf,

    /// Do not print the table to stdout
    #[clap(long)]
    no_table: bool,

    /// Use bold headers in the table
    #[clap(short = 'C', long, value_enum, default_value_t = ArgsColorChoice::Auto)]
    color: ArgsColorChoice,

    /// Timeout in seconds for each ipinfo.io request
    #[clap(long, value_name = "SECS", default_value_t = 10)]
    timeout: u64,

    /// Base URL of the ipinfo.io service
    #[clap(long, value_name = "URL", default_value = DEFAULT_BASE_URL, hide = true)]
    ipinfo_url: String,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum ArgsColorChoice {
    Always,
    Never,
    Auto,
}

impl Args {
    /// Flag present without a value, or with a blank one, means no token.
    fn token(&self) -> Option<String> {
        self.ipinfo_token
            .clone()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    fn enrich_options(&self) -> EnrichOptions {
        EnrichOptions {
            rdns: !self.no_rdns,
            isp: !self.no_isp_queries,
            token: self.token(),
        }
    }

    fn ipinfo_config(&self) -> IpInfoConfig {
        IpInfoConfig {
            base_url: self.ipinfo_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..IpInfoConfig::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let err = match run_main() {
        Ok(code) => return code,
        Err(err) => err,
    };

    // Handle broken pipe errors gracefully
    if is_broken_pipe(&err) {
        return ExitCode::SUCCESS;
    }

    // Print detailed error information based on environment variables
    let mut stderr = io::stderr();
    let _ = if std::env::var("RUST_BACKTRACE").is_ok_and(|v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        writeln!(stderr, "{:?}", err)
    } else {
        writeln!(stderr, "Error: {:#}", err)
    };

    ExitCode::FAILURE
}

fn run_main() -> Result<ExitCode> {
    let args = Args::parse();

    // auto colours only when stdout is a tty
    let colormode = match args.color {
        ArgsColorChoice::Auto => {
            if io::stdout().is_terminal() {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            }
        }
        ArgsColorChoice::Always => ColorChoice::Always,
        ArgsColorChoice::Never => ColorChoice::Never,
    };

    run(args, colormode)?;

    Ok(ExitCode::SUCCESS)
}

fn run(args: Args, colormode: ColorChoice) -> Result<()> {
    let options = args.enrich_options();
    info!(
        "rDNS lookups: {}, ISP lookups: {}",
        options.rdns, options.isp
    );

    let mut enricher = Enricher::from_options(&options, args.ipinfo_config())
        .context("failed to set up the ipinfo.io client")?;

    let source = FileOrStdin::from_path(args.log.clone());
    let summary = summarize_log(&source, &mut enricher)?;

    report::write_csv(&args.output, summary.columns, &summary.records)?;

    if !args.no_table {
        let mut out = StandardStream::stdout(colormode);
        report::render_table(&mut out, summary.columns, &summary.records)?;
    }

    Ok(())
}
