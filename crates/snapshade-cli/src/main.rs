//! snapshade CLI - photo filters and ASCII art from the command line
//!
//! This binary applies snapshade filters to PNG and JPEG images, one at a
//! time or over a whole directory, and checks filter recipes.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use snapshade_cli::commands;

/// snapshade - Photo Filters and ASCII Art
#[derive(Parser)]
#[command(name = "snapshade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a filter to one image
    Apply {
        /// Path to the input image (PNG or JPEG)
        #[arg(short, long)]
        input: String,

        /// Filter name (see `snapshade list`)
        #[arg(short, long, conflicts_with = "recipe")]
        filter: Option<String>,

        /// Filter parameter as key=value (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE", requires = "filter")]
        params: Vec<String>,

        /// Path to a recipe file, instead of --filter
        #[arg(short, long)]
        recipe: Option<String>,

        /// Output path (default: filtered-image.png or ascii-art.txt; '-' prints ASCII art)
        #[arg(short, long)]
        out: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Apply a recipe to every image in a directory
    Batch {
        /// Directory to scan recursively for .png, .jpg and .jpeg files
        #[arg(long)]
        input_dir: String,

        /// Path to the recipe file
        #[arg(short, long)]
        recipe: String,

        /// Output root directory
        #[arg(short, long)]
        out_root: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List available filters and their default parameters
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a recipe file without filtering anything
    Validate {
        /// Path to the recipe file
        #[arg(short, long)]
        recipe: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Apply {
            input,
            filter,
            params,
            recipe,
            out,
            json,
        } => commands::apply::run(
            &input,
            filter.as_deref(),
            &params,
            recipe.as_deref(),
            out.as_deref(),
            json,
        ),
        Commands::Batch {
            input_dir,
            recipe,
            out_root,
            json,
        } => commands::batch::run(&input_dir, &recipe, &out_root, json),
        Commands::List { json } => commands::list::run(json),
        Commands::Validate { recipe, json } => commands::validate::run(&recipe, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_apply_with_params() {
        let cli = Cli::try_parse_from([
            "snapshade",
            "apply",
            "--input",
            "cat.jpg",
            "--filter",
            "duotone",
            "-p",
            "shadow=#000000",
            "--param",
            "highlight=#ffffff",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply {
                input,
                filter,
                params,
                recipe,
                out,
                json,
            } => {
                assert_eq!(input, "cat.jpg");
                assert_eq!(filter.as_deref(), Some("duotone"));
                assert_eq!(params, vec!["shadow=#000000", "highlight=#ffffff"]);
                assert!(recipe.is_none());
                assert!(out.is_none());
                assert!(!json);
            }
            _ => panic!("expected apply command"),
        }
    }

    #[test]
    fn test_cli_parses_apply_with_recipe_and_stdout() {
        let cli = Cli::try_parse_from([
            "snapshade",
            "apply",
            "-i",
            "cat.png",
            "--recipe",
            "ascii.json",
            "--out",
            "-",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply {
                recipe, out, json, ..
            } => {
                assert_eq!(recipe.as_deref(), Some("ascii.json"));
                assert_eq!(out.as_deref(), Some("-"));
                assert!(json);
            }
            _ => panic!("expected apply command"),
        }
    }

    #[test]
    fn test_cli_rejects_filter_with_recipe() {
        let result = Cli::try_parse_from([
            "snapshade",
            "apply",
            "-i",
            "cat.png",
            "--filter",
            "invert",
            "--recipe",
            "r.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_param_without_filter() {
        let result = Cli::try_parse_from([
            "snapshade",
            "apply",
            "-i",
            "cat.png",
            "--recipe",
            "r.json",
            "--param",
            "a=1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::try_parse_from([
            "snapshade",
            "batch",
            "--input-dir",
            "photos",
            "--recipe",
            "vintage.json",
            "--out-root",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Batch {
                input_dir,
                recipe,
                out_root,
                json,
            } => {
                assert_eq!(input_dir, "photos");
                assert_eq!(recipe, "vintage.json");
                assert_eq!(out_root, "out");
                assert!(!json);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_verbose_is_global_and_counted() {
        let cli = Cli::try_parse_from(["snapshade", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["snapshade", "validate", "-r", "r.json", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Validate { json: false, .. }));
    }

    #[test]
    fn test_cli_parses_list_json() {
        let cli = Cli::try_parse_from(["snapshade", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::List { json: true }));
    }
}
