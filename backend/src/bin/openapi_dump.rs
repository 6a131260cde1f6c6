//! Print the OpenAPI document as JSON.

use catalogue::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Dump the product catalogue OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Args {
    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{json}");
    Ok(())
}
