//! chat-saver - export ChatGPT and Gemini conversations from saved pages.
//!
//!   chat-saver export page.html --url https://chatgpt.com/c/abc -f md
//!   chat-saver export - --platform gemini --last 5 --stdout < page.html
//!   chat-saver inspect page.html
//!   chat-saver request page.html --request '{"action":"generateText","format":"json"}'

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chat_saver::export::{self, DirectoryDownloader};
use chat_saver::protocol::{self, GenerateRequest};
use chat_saver::retry::{self, RetryPolicy};
use chat_saver::{diagnostics, encoding, Error, ExportRequest, Format, Options, Platform, Result, SelectionMode};

/// Export AI chat conversations from saved ChatGPT or Gemini pages.
#[derive(Parser, Debug)]
#[command(name = "chat-saver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a conversation to a file (or stdout).
    Export {
        #[command(flatten)]
        page: PageArgs,

        /// Output format: txt, md, html or json.
        #[arg(short, long, default_value = "txt")]
        format: String,

        /// Export only the last N messages.
        #[arg(short, long)]
        last: Option<usize>,

        /// Directory to write the export into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the document instead of writing a file.
        #[arg(long, conflicts_with = "out_dir")]
        stdout: bool,
    },

    /// Show what each extraction strategy finds in a page.
    Inspect {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Answer an extension request and print the JSON response.
    Request {
        #[command(flatten)]
        page: PageArgs,

        /// Request body; defaults to a full txt export.
        #[arg(short, long)]
        request: Option<String>,

        /// Directory to write the export into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Saved page (`-` for stdin).
    input: PathBuf,

    /// URL the page was saved from.
    #[arg(long)]
    url: Option<String>,

    /// Page title, if the saved `<title>` is stale.
    #[arg(long)]
    title: Option<String>,

    /// Force the platform (chatgpt or gemini).
    #[arg(long)]
    platform: Option<String>,

    /// Keep retrying for up to SECS while the input file appears.
    #[arg(long, value_name = "SECS", default_value = "0")]
    wait: u64,
}

impl PageArgs {
    fn options(&self) -> Result<Options> {
        let platform = self
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()?;

        Ok(Options {
            url: self.url.clone(),
            title: self.title.clone(),
            platform,
            ..Options::default()
        })
    }

    fn read_html(&self) -> Result<String> {
        let bytes = if self.input == Path::new("-") {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| Error::io("<stdin>", e))?;
            buf
        } else {
            let policy = RetryPolicy::within(Duration::from_secs(self.wait));
            retry::retry(&policy, |_| fs::read(&self.input)).map_err(|e| Error::io(&self.input, e))?
        };
        Ok(encoding::decode_snapshot(&bytes).into_owned())
    }
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Export {
            page,
            format,
            last,
            out_dir,
            stdout,
        } => cmd_export(&page, &format, last, &out_dir, stdout),
        Commands::Inspect { page } => cmd_inspect(&page),
        Commands::Request {
            page,
            request,
            out_dir,
        } => cmd_request(&page, request.as_deref(), &out_dir),
    }
}

fn cmd_export(page: &PageArgs, format: &str, last: Option<usize>, out_dir: &Path, stdout: bool) -> Result<()> {
    let request = ExportRequest {
        format: format.parse::<Format>()?,
        selection: last.map_or(SelectionMode::Full, SelectionMode::last),
    };
    let html = page.read_html()?;
    let document = chat_saver::export(&html, &page.options()?, &request)?;

    if stdout {
        let mut out = io::stdout().lock();
        out.write_all(document.contents.as_bytes())
            .map_err(|e| Error::io("<stdout>", e))?;
        return Ok(());
    }

    let path = export::save(&document, &DirectoryDownloader::new(out_dir))?;
    info!(path = %path.display(), "export saved");
    println!("{}", path.display());
    Ok(())
}

fn cmd_inspect(page: &PageArgs) -> Result<()> {
    let html = page.read_html()?;
    let report = diagnostics::inspect(&html, &page.options()?);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_request(page: &PageArgs, body: Option<&str>, out_dir: &Path) -> Result<()> {
    let request = match body {
        Some(body) => GenerateRequest::from_json(body)?,
        None => GenerateRequest::new(ExportRequest::default()),
    };
    let html = page.read_html()?;
    let response = protocol::handle_request(&html, &page.options()?, &request, &DirectoryDownloader::new(out_dir));
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(io::stderr))
        .with(filter)
        .init();
}
