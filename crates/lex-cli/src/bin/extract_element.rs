use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "extract_element",
    about = "Extract assets and the root layer matching an element name from a Lottie JSON file",
    version
)]
struct Cli {
    /// Lottie JSON file to read
    lottie_json_file: PathBuf,
    /// Name matched exactly against each asset and layer `nm`
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    element_name: String,
    /// Optional output .json path to write; otherwise prints to stdout
    output_file: Option<PathBuf>,
}

fn main() {
    lex_cli::init_tracing();
    let cli: Cli = lex_cli::parse_args();
    if let Err(e) = run(&cli) {
        lex_cli::fail(&e);
    }
}

fn run(cli: &Cli) -> lex_core::Result<()> {
    let doc = lex_core::load_document(&cli.lottie_json_file)?;
    let found = lex_core::extract_element(&doc, &cli.element_name)?;
    match &cli.output_file {
        Some(out) => {
            lex_core::write_json_to_file(out, &found)?;
            info!("element extracted to: {}", out.display());
            info!(
                "assets found: {}, root layer found: {}",
                found.asset_count(),
                if found.has_layer() { "yes" } else { "no" }
            );
        }
        None => lex_cli::print_json(&found)?,
    }
    Ok(())
}
