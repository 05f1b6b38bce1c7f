#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generates a circular area-of-interest product around a volcano.
//!
//! Reads the AOI request from a job context document (`_context.json` in
//! the working directory by default) and writes
//! `<output-dir>/<id>/<id>.dataset.json` and `<output-dir>/<id>/<id>.met.json`.
//!
//! Silent on success unless `RUST_LOG` enables `info` output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use volcano_aoi::DirectorySink;
use volcano_aoi_models::DEFAULT_CONTEXT_FILE;

#[derive(Parser)]
#[command(
    name = "volcano_aoi",
    about = "Create a circular AOI product around a volcano"
)]
struct Cli {
    /// Job context document holding the AOI request
    #[arg(long, default_value = DEFAULT_CONTEXT_FILE)]
    context: PathBuf,

    /// Directory to create the product directory in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    execute(Cli::parse())
}

/// Runs one generation and maps the outcome to the process exit status.
///
/// Errors are logged once, with their display message.
fn execute(cli: Cli) -> ExitCode {
    let mut sink = DirectorySink::new(cli.output_dir);
    match volcano_aoi::run(&cli.context, &mut sink) {
        Ok(id) => {
            log::info!("Product {id} written to {}", sink.product_dir(&id).display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_context_in_working_directory() {
        let cli = Cli::parse_from(["volcano_aoi"]);
        assert_eq!(cli.context, PathBuf::from("_context.json"));
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn accepts_explicit_paths() {
        let cli = Cli::parse_from([
            "volcano_aoi",
            "--context",
            "/jobs/42/_context.json",
            "--output-dir",
            "/products",
        ]);
        assert_eq!(cli.context, PathBuf::from("/jobs/42/_context.json"));
        assert_eq!(cli.output_dir, PathBuf::from("/products"));
    }

    fn cli_for(dir: &std::path::Path) -> Cli {
        Cli {
            context: dir.join("_context.json"),
            output_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn missing_context_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(execute(cli_for(dir.path())), ExitCode::FAILURE);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn wrong_product_type_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_context.json"),
            r#"{"type": "lava_flow", "radius_km": 10, "volcano_name": "Test",
                "volcano_number": "0000-01", "clean_name": "test_volcano",
                "latitude": 10.0, "longitude": 20.0}"#,
        )
        .unwrap();
        assert_eq!(execute(cli_for(dir.path())), ExitCode::FAILURE);
    }

    #[test]
    fn valid_context_exits_with_success() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_context.json"),
            r#"{"type": "volcano", "radius_km": 10, "volcano_name": "Test",
                "volcano_number": "0000-01", "clean_name": "test_volcano",
                "latitude": 10.0, "longitude": 20.0}"#,
        )
        .unwrap();
        assert_eq!(execute(cli_for(dir.path())), ExitCode::SUCCESS);
        assert!(
            dir.path()
                .join("AOI-GVN_0000-01-test_volcano-v1.0")
                .join("AOI-GVN_0000-01-test_volcano-v1.0.met.json")
                .exists()
        );
    }
}
