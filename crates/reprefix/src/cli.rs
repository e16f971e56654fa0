//! CLI argument definitions.

use std::path::PathBuf;

#[derive(clap::Parser)]
#[command(
    name = "reprefix",
    about = "prepends a prefix to public & open identifiers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Rewrite public & open identifiers in a given folder
    Rewrite(RewriteArgs),
    /// Print the version string
    Version,
}

#[derive(clap::Args)]
pub struct RewriteArgs {
    /// Path to source files
    pub directory: PathBuf,

    /// Where rewritten files are written
    pub output_directory: PathBuf,

    /// Prefix to insert before renamed identifiers
    #[arg(short, long)]
    pub prefix: String,

    /// Write the aggregated identifier report to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Rewrite ids recorded in these previously produced reports
    #[arg(short, long = "include")]
    pub include: Vec<PathBuf>,

    /// Rewrite files in place (skip cleaning the output directory)
    #[arg(short = 'o', long = "in-place")]
    pub in_place: bool,

    /// Product names to rename in imports and header file names
    #[arg(short = 'n', long = "product-name")]
    pub product_names: Vec<String>,

    /// Identifiers that must never be renamed
    #[arg(short, long = "exclude")]
    pub exclude: Vec<String>,

    /// Apply only the included reports, not freshly discovered symbols
    #[arg(long = "reports-only")]
    pub reports_only: bool,

    /// Manual rename tokens in `prefix:identifier` form
    #[arg(long = "rewrite", value_name = "PREFIX:IDENTIFIER")]
    pub rewrites: Vec<String>,
}
