use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabport::convert;
use tabport::model::BoolLabels;
use tabport::{Result, TabError};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(error) = init_logging() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| TabError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export(args) => {
            require_input(&args.input)?;
            require_input(&args.columns)?;
            let labels = args.labels.to_labels();
            let written =
                convert::json_to_xlsx(&args.input, &args.columns, &labels, &args.out_dir, &args.name)?;
            println!("{}", written.display());
            Ok(())
        }
        Command::Template(args) => {
            require_input(&args.columns)?;
            let written = convert::write_template(&args.columns, &args.out_dir, &args.name)?;
            println!("{}", written.display());
            Ok(())
        }
        Command::Import(args) => {
            require_input(&args.input)?;
            require_input(&args.columns)?;
            let labels = args.labels.to_labels();
            convert::xlsx_to_json(&args.input, &args.columns, &labels, &args.output)
        }
        Command::Sort(args) => {
            require_input(&args.input)?;
            convert::sort_json(&args.input, &args.field, args.desc, &args.output)
        }
    }
}

fn require_input(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        return Err(TabError::MissingInput(path.clone()));
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Round-trip JSON record sets through xlsx workbooks, and sort them."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a JSON record file to a spreadsheet.
    Export(ExportArgs),
    /// Write a headers-only spreadsheet template for bulk imports.
    Template(TemplateArgs),
    /// Import a spreadsheet back into a JSON record file.
    Import(ImportArgs),
    /// Sort a JSON record file by one field.
    Sort(SortArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON file holding an array of records.
    #[arg(long)]
    input: PathBuf,

    /// JSON file holding the column spec list.
    #[arg(long)]
    columns: PathBuf,

    /// Directory the workbook is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Base filename; the output is `{name}.xlsx`.
    #[arg(long)]
    name: String,

    #[command(flatten)]
    labels: LabelArgs,
}

#[derive(clap::Args)]
struct TemplateArgs {
    /// JSON file holding the column spec list.
    #[arg(long)]
    columns: PathBuf,

    /// Directory the template is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Base filename; the output is `{name}_template.xlsx`.
    #[arg(long)]
    name: String,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Spreadsheet to import.
    #[arg(long)]
    input: PathBuf,

    /// JSON file holding the column spec list.
    #[arg(long)]
    columns: PathBuf,

    /// JSON file the parsed records are written to.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    labels: LabelArgs,
}

#[derive(clap::Args)]
struct SortArgs {
    /// JSON file holding an array of records.
    #[arg(long)]
    input: PathBuf,

    /// Dot-path of the field to sort by.
    #[arg(long)]
    field: String,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    /// JSON file the sorted records are written to.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct LabelArgs {
    /// Label written for boolean true cells.
    #[arg(long, default_value = "Yes")]
    truthy_label: String,

    /// Label written for boolean false cells.
    #[arg(long, default_value = "No")]
    falsy_label: String,
}

impl LabelArgs {
    fn to_labels(&self) -> BoolLabels {
        BoolLabels {
            truthy: self.truthy_label.clone(),
            falsy: self.falsy_label.clone(),
        }
    }
}
