use clap::Parser;
use lex_core::MergeOutcome;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "get_stack_order",
    about = "Record the bottom-to-top order of root layers in the sibling stack-order.json",
    version
)]
struct Cli {
    /// Lottie JSON file to read; its name up to the first '_' is the animation key
    lottie_json_file: PathBuf,
}

fn main() {
    lex_cli::init_tracing();
    let cli: Cli = lex_cli::parse_args();
    let report = lex_core::update_stack_order(&cli.lottie_json_file)
        .unwrap_or_else(|e| lex_cli::fail(&e));

    let verb = match report.outcome {
        MergeOutcome::Added => "added new",
        MergeOutcome::Replaced => "replaced existing",
    };
    info!(
        "{} entry for '{}' ({} layers)",
        verb,
        report.animation,
        report.layers.len()
    );
    info!(
        "stack order written to: {} ({} animations in file)",
        report.index_path.display(),
        report.total_keys
    );

    eprintln!();
    eprintln!("# Stack Order (bottom to top):");
    for (i, name) in report.layers.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, name);
    }
}
