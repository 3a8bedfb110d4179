//! Run command implementation.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, MatchArgs, OutputFormat, seed_or_now};
use hextowns::Color;
use hextowns::render::render_map;
use hextowns::tournament::run_match;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the match fails.
pub(crate) fn execute(
    match_args: MatchArgs,
    seed: Option<u64>,
    format: OutputFormat,
    ansi: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = match_args.resolve()?;
    let seed = seed_or_now(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Running match with seed {seed}...");
        let names: Vec<_> = config.colors.iter().copied().map(Color::name).collect();
        println!("Players: {}", names.join(", "));
        println!();
    }

    let result = run_match(seed, &config)?;

    match format {
        OutputFormat::Text => {
            if !quiet {
                print!("{}", render_map(&result.final_map, ansi));
                println!();
            }
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult::from_match_result(&result))?;
            println!("{json}");
        }
    }

    Ok(())
}
