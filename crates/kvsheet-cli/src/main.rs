mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kvsheet",
    version,
    about = "Extract key/value facts from profile documents into a spreadsheet"
)]
struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document (PDF, text, or JSON records) and print the records
    Parse {
        /// Path to a .pdf, .txt or .json file
        input_file: PathBuf,

        /// Output format: table (default), json or markdown
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Use pdftotext -layout when extracting PDF text
        #[arg(long)]
        layout: bool,
    },
    /// Parse a document and write the spreadsheet (and optionally a JSON dump)
    Export {
        /// Path to a .pdf, .txt or .json file
        input_file: PathBuf,

        /// Spreadsheet path (default: input file name with .xlsx)
        #[arg(long, value_name = "FILE")]
        xlsx: Option<PathBuf>,

        /// Also write the records as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Worksheet name (overrides config)
        #[arg(long)]
        sheet_name: Option<String>,

        /// Number shown in the '#' column of the first row (overrides config)
        #[arg(long)]
        start_index: Option<u64>,

        /// Use pdftotext -layout when extracting PDF text
        #[arg(long)]
        layout: bool,
    },
    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show {
        /// JSON config file to merge over the defaults
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            config,
            layout,
        } => commands::parse::run(input_file, &output, config, layout),
        Commands::Export {
            input_file,
            xlsx,
            json,
            config,
            sheet_name,
            start_index,
            layout,
        } => commands::export::run(commands::export::ExportArgs {
            input_file,
            xlsx,
            json,
            config,
            sheet_name,
            start_index,
            layout,
        }),
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::show(config),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
