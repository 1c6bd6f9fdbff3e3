//! Command-line interface implementation

use clap::error::ErrorKind;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::loader::{load_config, merge_cli_overrides, CliOverrides};
use crate::config::MAX_SCALE;
use crate::models::Warning;
use crate::output::{resolve_output_path, save_png, scale_image};
use crate::parser::parse_stream;
use crate::renderer::render_scene;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;

/// Pixscene - Render a line-oriented pixel scene description to PNG
#[derive(Parser, Debug)]
#[command(name = "pxs")]
#[command(about = "Pixscene - Render a line-oriented pixel scene description to PNG")]
#[command(version)]
pub struct Cli {
    /// Scene file with `png`, `color 4`, `position 2` and `drawPixels` lines
    pub input: PathBuf,

    /// Output file. If omitted, the filename from the `png` line is used
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file. If omitted, the nearest pixscene.toml above the input is used
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Strict mode: reject malformed integers and treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Scale output by integer factor (1-16)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u8>,

    /// Print progress details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not failures; every usage error exits 1
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_ERROR,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    run_render(&cli)
}

/// Print warnings, or fail if strict mode treats them as errors.
///
/// Returns false when the run must stop.
fn report_warnings(warnings: &[Warning], strict: bool) -> bool {
    if strict && !warnings.is_empty() {
        for warning in warnings {
            eprintln!("Error: {}", warning);
        }
        return false;
    }
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    true
}

/// Execute the render
fn run_render(cli: &Cli) -> ExitCode {
    let input: &Path = &cli.input;
    if cli.verbose {
        eprintln!("Input: {}", input.display());
    }

    // Open input file
    let file = match File::open(input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (mut config, config_path) = match load_config(cli.config.as_deref(), input) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    merge_cli_overrides(
        &mut config,
        &CliOverrides {
            strict: cli.strict.then_some(true),
            scale: cli.scale,
        },
    );
    if cli.verbose {
        match &config_path {
            Some(path) => eprintln!("Config: {}", path.display()),
            None => eprintln!("Config: defaults"),
        }
    }
    let strict = config.is_strict();

    // Parse the whole scene before drawing
    let parsed = match parse_stream(BufReader::new(file), &config.parse_options()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if !report_warnings(&parsed.warnings, strict) {
        return ExitCode::from(EXIT_ERROR);
    }

    let scene = &parsed.scene;
    if cli.verbose {
        eprintln!(
            "Image: {}x{} -> {}",
            scene.image.width, scene.image.height, scene.image.filename
        );
        eprintln!(
            "Records: {} color, {} position, drawPixels {}",
            scene.metadata.colors().len(),
            scene.metadata.positions().len(),
            scene.metadata.draw_count()
        );
        if parsed.ignored_lines > 0 {
            eprintln!("Ignored {} unrecognized line(s)", parsed.ignored_lines);
        }
    }

    let rendered = match render_scene(scene, &config.render_options()) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if !report_warnings(&rendered.warnings, strict) {
        return ExitCode::from(EXIT_ERROR);
    }

    let image = match scale_image(rendered.image, config.draw.scale) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let output_path = resolve_output_path(&scene.image.filename, cli.output.as_deref());
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", output_path.display());

    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_only() {
        let cli = Cli::try_parse_from(["pxs", "scene.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("scene.txt"));
        assert!(cli.output.is_none());
        assert!(!cli.strict);
        assert!(cli.scale.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "pxs",
            "scene.txt",
            "-o",
            "out/final.png",
            "--config",
            "custom.toml",
            "--strict",
            "--scale",
            "4",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out/final.png")));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.strict);
        assert_eq!(cli.scale, Some(4));
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let err = Cli::try_parse_from(["pxs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_positional_is_usage_error() {
        assert!(Cli::try_parse_from(["pxs", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_scale_range() {
        assert!(Cli::try_parse_from(["pxs", "a.txt", "--scale", "0"]).is_err());
        assert!(Cli::try_parse_from(["pxs", "a.txt", "--scale", "17"]).is_err());
        assert!(Cli::try_parse_from(["pxs", "a.txt", "--scale", "16"]).is_ok());
    }

    #[test]
    fn test_report_warnings() {
        let warnings = vec![Warning::new("coerced", 2)];
        assert!(report_warnings(&warnings, false));
        assert!(!report_warnings(&warnings, true));
        assert!(report_warnings(&[], true));
    }
}
