use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod comments;
mod schema;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "dataset-prep")]
#[command(about = "Comment dataset and API schema preparation utilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert comments with annotations from the old format (flat) to the
    /// nested one with top-level keys `comment`, `labelling`, `entities`.
    ConvertComments {
        /// Path to a jsonl file with comments in the old format. Pass - to
        /// use stdin.
        #[arg(value_name = "PATH")]
        file: String,
    },

    /// Rewrite null-typed schema properties in an OpenAPI document so the
    /// result is usable for strict client generation.
    PreprocessSpec {
        /// OpenAPI JSON document to fix.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the corrected document.
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConvertComments { file } => {
            let reader = comments::open_input(&file)?;
            let stdout = std::io::stdout();
            let count = comments::convert(reader, &mut stdout.lock())?;
            log::debug!("converted {} comments", count);
        }
        Commands::PreprocessSpec { input, output } => {
            match schema::preprocess_spec(&input, &output)? {
                schema::Outcome::Written { path } => {
                    log::debug!("corrected spec at {}", path.display());
                }
                // The flow already reported the unresolved violations on
                // stdout; surface them in the exit status as well.
                schema::Outcome::Incomplete { violations } => {
                    log::debug!("{} violations left unresolved", violations.len());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
