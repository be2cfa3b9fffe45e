use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use webcloud::config::WebcloudConfig;
use webcloud::core::{print_error_message, print_info_message, Pipeline};
use webcloud::env::{self, EnvVar};
use webcloud::error::{ErrorCategory, ErrorSeverity, WebcloudError, WebcloudResult};

/// Scrape web pages and turn their text into a Chinese word cloud
#[derive(Parser, Debug)]
#[command(name = "webcloud", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the URLs and generate the word cloud
    Run {
        #[command(flatten)]
        scrape: ScrapeArgs,
        #[command(flatten)]
        cloud: CloudArgs,
    },
    /// Scrape the URLs and save their text
    Scrape {
        #[command(flatten)]
        scrape: ScrapeArgs,
    },
    /// Generate the word cloud from a saved text file
    Cloud {
        /// Text file to read [default: the scraped output path]
        input: Option<PathBuf>,
        #[command(flatten)]
        cloud: CloudArgs,
    },
    /// Write an example config file
    InitConfig {
        #[arg(default_value = "webcloud.toml")]
        path: PathBuf,
    },
    /// Print the environment variable documentation
    EnvDocs,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// URLs (or local HTML files) to scrape
    urls: Vec<String>,

    /// Where to save the scraped text (supports %timestamp%)
    #[arg(long, value_name = "FILE")]
    scraped_output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Args, Debug)]
struct CloudArgs {
    /// Font file with CJK glyphs
    #[arg(short, long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Stopword file, one word per line
    #[arg(short, long, value_name = "FILE")]
    stopwords: Option<PathBuf>,

    /// Additional jieba dictionary
    #[arg(long, value_name = "FILE")]
    user_dict: Option<PathBuf>,

    /// Minimum number of occurrences for a word to be drawn
    #[arg(long)]
    min_freq: Option<usize>,

    /// Minimum word length in characters
    #[arg(long)]
    min_len: Option<usize>,

    /// Where to save the PNG (supports %timestamp%)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// How many of the most frequent words to report
    #[arg(long, value_name = "N")]
    top: Option<usize>,
}

impl ScrapeArgs {
    fn apply(self, config: &mut WebcloudConfig) {
        if !self.urls.is_empty() {
            config.urls = self.urls;
        }
        if let Some(path) = self.scraped_output {
            config.scraped_output = path;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
    }
}

impl CloudArgs {
    fn apply(self, config: &mut WebcloudConfig) {
        if let Some(font) = self.font {
            config.font_path = Some(font);
        }
        if let Some(stopwords) = self.stopwords {
            config.stopwords_path = Some(stopwords);
        }
        if let Some(user_dict) = self.user_dict {
            config.user_dict_path = Some(user_dict);
        }
        if let Some(min_freq) = self.min_freq {
            config.min_frequency = min_freq;
        }
        if let Some(min_len) = self.min_len {
            config.min_length = min_len;
        }
        if let Some(output) = self.output {
            config.wordcloud_output = output;
        }
        if let Some(top) = self.top {
            config.top_words = top;
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Some("error")
    } else {
        match verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    };

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = env::core::LogLevel::get().unwrap_or_else(|e| {
                eprintln!("Warning: {e}");
                "info".to_string()
            });
            EnvFilter::new(level)
        }),
    };

    let use_color = atty::is(atty::Stream::Stderr) && !env::core::NoColor::get_or_default(false);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> WebcloudResult<WebcloudConfig> {
    WebcloudConfig::load(path.map(PathBuf::as_path))
}

fn execute(cli: Cli) -> WebcloudResult<()> {
    match cli.command {
        Command::Run { scrape, cloud } => {
            let mut config = load_config(cli.config.as_ref())?;
            scrape.apply(&mut config);
            cloud.apply(&mut config);

            let report = Pipeline::new(config)?.run()?;
            print_info_message(&format!(
                "Scraped {}/{} page(s) into {}",
                report.scrape.succeeded,
                report.scrape.attempted,
                report.scrape.output.display()
            ));
            print_info_message(&format!(
                "Word cloud of {} word(s) saved to {}",
                report.cloud.words,
                report.cloud.output.display()
            ));
        }
        Command::Scrape { scrape } => {
            let mut config = load_config(cli.config.as_ref())?;
            scrape.apply(&mut config);

            let report = Pipeline::new(config)?.scrape()?;
            print_info_message(&format!(
                "Scraped {}/{} page(s) into {} ({} bytes)",
                report.succeeded,
                report.attempted,
                report.output.display(),
                report.summary.bytes
            ));
        }
        Command::Cloud { input, cloud } => {
            let mut config = load_config(cli.config.as_ref())?;
            cloud.apply(&mut config);

            let input = input.unwrap_or_else(|| config.scraped_output.clone());
            let report = Pipeline::new(config)?.cloud(&input)?;
            print_info_message(&format!(
                "Word cloud of {} word(s) saved to {}",
                report.words,
                report.output.display()
            ));
        }
        Command::InitConfig { path } => {
            WebcloudConfig::generate_example_config(&path)?;
            print_info_message(&format!("Example config written to {}", path.display()));
        }
        Command::EnvDocs => {
            print!("{}", env::generate_env_docs());
            println!();
            env::EnvConfig::from_env()
                .map_err(|e| WebcloudError::Config(e.to_string()))?
                .print_summary();
        }
    }

    Ok(())
}

fn exit_code(error: &WebcloudError) -> ExitCode {
    match error.category() {
        ErrorCategory::Configuration => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let label = match error.severity() {
                ErrorSeverity::Critical | ErrorSeverity::Error => "Error",
                ErrorSeverity::Warning | ErrorSeverity::Info => "Warning",
            };
            print_error_message(&format!("{label}: {error}"));
            exit_code(&error)
        }
    }
}
