//! `notebook-rdf`: Converts Jupyter notebooks to RDF and back.
//!
//! **Outputs:**
//! - `<dir>/<name>.ttl`: Turtle graph of a converted notebook
//! - `<dir>/<name>_rdf2nb.ipynb`: notebook rebuilt from an RDF graph
//!
//! The converted document is also printed to stdout.
//!
//! **Usage:**
//! ```
//! notebook-rdf <INPUT> [--from notebook|RDF] [--to notebook|RDF] [-o <OUTPUT>]
//! notebook-rdf vocabulary
//! notebook-rdf diff-executions <NOTEBOOK> --cell <I> --base <P> --remote <Q>
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use provbook_notebook_rdf::{run, select_executions, ConvertOptions, Format, Notebook};
use provbook_vocab::serializer::turtle::vocabulary_to_turtle;
use provbook_vocab::Vocabulary;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  Convert a notebook to Turtle (writes analysis.ttl):
    notebook-rdf analysis.ipynb

  Convert Turtle back to a notebook (writes analysis_rdf2nb.ipynb):
    notebook-rdf analysis.ttl

  Force the direction and choose the output file:
    notebook-rdf graph.txt --from RDF --to notebook -o rebuilt.ipynb

  Print the vocabulary used in the generated graphs:
    notebook-rdf vocabulary

  Compare executions 0 and 2 of cell 3:
    notebook-rdf diff-executions analysis.ipynb --cell 3 --base 0 --remote 2
";

/// Convert Jupyter notebooks and their provenance to RDF and back.
#[derive(Parser)]
#[command(
    name = "notebook-rdf",
    version,
    about = "Convert Jupyter notebooks and their provenance to RDF and back",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Notebook (.ipynb) or RDF (.ttl, .nt) file to convert.
    input: Option<PathBuf>,

    /// Format of the input (default: guessed from the extension).
    #[arg(long, value_enum)]
    from: Option<FormatArg>,

    /// Format to convert to (default: the other one).
    #[arg(long, value_enum)]
    to: Option<FormatArg>,

    /// Output file (default: derived from the input name, beside it).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print usage examples and exit.
    #[arg(long)]
    examples: bool,

    /// Log more (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print the RDF vocabulary as Turtle.
    Vocabulary,

    /// Print two recorded executions of a cell as single-cell notebooks.
    DiffExecutions {
        /// Notebook carrying provenance metadata.
        notebook: PathBuf,

        /// Cell index.
        #[arg(long)]
        cell: usize,

        /// Provenance position of the base execution.
        #[arg(long)]
        base: usize,

        /// Provenance position of the remote execution.
        #[arg(long)]
        remote: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Jupyter notebook JSON.
    Notebook,
    /// RDF graph (Turtle or N-Triples).
    #[value(name = "RDF", alias = "rdf")]
    Rdf,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Notebook => Format::Notebook,
            FormatArg::Rdf => Format::Rdf,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", Cli::command().render_help());
        process::exit(2);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.examples {
        print!("{EXAMPLES}");
        return Ok(());
    }

    match cli.command {
        Some(Command::Vocabulary) => {
            print!("{}", vocabulary_to_turtle(Vocabulary::full()));
            Ok(())
        }
        Some(Command::DiffExecutions {
            notebook,
            cell,
            base,
            remote,
        }) => diff_executions(&notebook, cell, base, remote),
        None => {
            let Some(input) = cli.input else {
                eprintln!("{}", Cli::command().render_usage());
                process::exit(2);
            };
            let options = ConvertOptions {
                from: cli.from.map(Format::from),
                to: cli.to.map(Format::from),
                output: cli.output,
            };
            convert(&input, &options)
        }
    }
}

fn convert(input: &Path, options: &ConvertOptions) -> Result<()> {
    let converted = run(input, options)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    info!(
        from = %converted.from,
        to = %converted.to,
        output = %converted.output.display(),
        "conversion written"
    );
    print!("{}", converted.content);
    Ok(())
}

fn diff_executions(path: &Path, cell: usize, base: usize, remote: usize) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let notebook = Notebook::from_json_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let pair = select_executions(&notebook, cell, base, remote)?;
    println!("{}", serde_json::to_string_pretty(&pair)?);
    Ok(())
}
