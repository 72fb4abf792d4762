//! Print the OpenAPI document as JSON or YAML.

use clap::{Parser, ValueEnum};
use tribune_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// Output format for the document.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Emit the OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(about = "Print the OpenAPI document")]
struct Args {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let rendered = match args.format {
        Format::Json => doc.to_pretty_json()?,
        Format::Yaml => doc.to_yaml()?,
    };
    println!("{rendered}");
    Ok(())
}
