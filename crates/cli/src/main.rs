#![deny(unsafe_code)]
//! CLI for the constellation particle field.
//!
//! Subcommands:
//! - `render` - simulate a field for N frames, write PNG (and optionally its seed)
//! - `replay <seed.json>` - re-render a saved seed
//! - `themes` - print the built-in themes
//! - `params` - print the default field config and its schema
//! - `check-contact` - validate contact-form input

mod error;

use clap::{Parser, Subcommand};
use constellation_core::{Palette, Rgb, Seed};
use constellation_field::FieldConfig;
use constellation_raster::render_seed;
use constellation_raster::snapshot::write_png;
use constellation_widgets::ContactForm;
use error::CliError;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::process;

/// Page background behind the hero canvas.
const DEFAULT_BACKGROUND: &str = "#020617";

#[derive(Parser)]
#[command(name = "constellation", about = "Interactive particle-field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// More log output (repeat for more).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the field for N frames and write a PNG snapshot.
    Render {
        /// Theme name (nebula, emerald, supernova, deep-space, aurora, solar).
        #[arg(short, long, default_value = "nebula")]
        theme: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 960)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 540)]
        height: u32,

        /// Number of frames to simulate before rendering.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pointer position held for every frame, as "x,y".
        #[arg(long, value_parser = parse_point)]
        pointer: Option<[f64; 2]>,

        /// Field config overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        config: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Also write the scene's seed JSON to this path.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// Re-render a scene from a saved seed file.
    Replay {
        /// Path to a seed JSON file.
        seed: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the built-in themes and their colors.
    Themes,
    /// Print the default field config and its schema.
    Params,
    /// Validate contact-form input.
    CheckContact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file path.
    #[arg(short, long, default_value = "constellation.png")]
    output: PathBuf,

    /// Background color ("R G B" or hex) to flatten onto.
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    background: String,

    /// Keep the alpha channel instead of flattening onto a background.
    #[arg(long)]
    transparent: bool,
}

impl OutputArgs {
    fn background(&self) -> Result<Option<Rgb>, CliError> {
        if self.transparent {
            return Ok(None);
        }
        parse_color(&self.background).map(Some)
    }
}

fn parse_point(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok([coord(x)?, coord(y)?])
}

fn parse_color(s: &str) -> Result<Rgb, CliError> {
    let parsed = if s.starts_with('#') {
        Rgb::from_hex(s)
    } else {
        Rgb::from_triplet(s)
    };
    Ok(parsed?)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    // A logger may already be installed when run from tests.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn render_to(seed: &Seed, output: &OutputArgs) -> Result<(), CliError> {
    let background = output.background()?;
    let raster = render_seed(seed)?;
    write_png(&raster, background, &output.output)?;
    info!("wrote {}", output.output.display());
    Ok(())
}

fn report_render(seed: &Seed, output: &Path, json: bool) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "theme": seed.theme,
            "width": seed.width,
            "height": seed.height,
            "frames": seed.frames,
            "seed": seed.seed,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} frames, seed {}) -> {}",
            seed.theme,
            seed.width,
            seed.height,
            seed.frames,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Themes => {
            let names = Palette::list_names();
            if cli.json {
                let themes: Vec<_> = names
                    .iter()
                    .map(|name| {
                        let colors: Vec<String> = Palette::from_name(name)
                            .map(|p| p.colors().iter().map(|c| c.to_triplet()).collect())
                            .unwrap_or_default();
                        serde_json::json!({ "name": name, "colors": colors })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&themes)?);
            } else {
                println!("Themes:");
                for name in names {
                    let palette = Palette::from_name(name)?;
                    let colors: Vec<String> =
                        palette.colors().iter().map(|c| c.to_hex()).collect();
                    println!("  {name:<12} {}", colors.join(" "));
                }
            }
        }
        Command::Params => {
            let info = serde_json::json!({
                "defaults": FieldConfig::default().params(),
                "schema": FieldConfig::param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Render {
            theme,
            width,
            height,
            frames,
            seed,
            pointer,
            config,
            output,
            save_seed,
        } => {
            let config: serde_json::Value = serde_json::from_str(&config)
                .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;

            let mut scene = Seed::new(&theme, width, height, seed);
            scene.frames = frames;
            scene.pointer = pointer;
            scene.config = config;

            render_to(&scene, &output)?;
            if let Some(path) = save_seed {
                std::fs::write(&path, scene.to_json()?)?;
                info!("wrote seed {}", path.display());
            }
            report_render(&scene, &output.output, cli.json)?;
        }
        Command::Replay { seed, output } => {
            let text = std::fs::read_to_string(&seed)?;
            let scene = Seed::from_json(&text)?;
            render_to(&scene, &output)?;
            report_render(&scene, &output.output, cli.json)?;
        }
        Command::CheckContact {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                message,
            };
            match form.validate() {
                Ok(()) => {
                    if cli.json {
                        println!("{}", serde_json::json!({ "valid": true }));
                    } else {
                        println!("ok");
                    }
                }
                Err(errors) => {
                    if cli.json {
                        let info = serde_json::json!({ "valid": false, "errors": errors });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        for (field, msg) in [
                            ("name", &errors.name),
                            ("email", &errors.email),
                            ("message", &errors.message),
                        ] {
                            if let Some(msg) = msg {
                                println!("{field}: {msg}");
                            }
                        }
                    }
                    return Err(CliError::Input(format!(
                        "{} invalid contact field(s)",
                        errors.len()
                    )));
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("constellation").chain(args.iter().copied()))
            .unwrap()
    }

    // -- Argument parsing --

    #[test]
    fn parse_point_accepts_pair() {
        assert_eq!(parse_point("12.5, 40"), Ok([12.5, 40.0]));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn parse_color_accepts_hex_and_triplet() {
        assert_eq!(parse_color("#020617").unwrap(), Rgb::new(2, 6, 23));
        assert_eq!(parse_color("2 6 23").unwrap(), Rgb::new(2, 6, 23));
        assert_eq!(parse_color("nope").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn verbosity_flags_are_global() {
        let parsed = cli(&["themes", "-vv"]);
        assert_eq!(parsed.verbose, 2);
        assert!(!parsed.quiet);
    }

    // -- Commands --

    #[test]
    fn render_writes_png_and_seed() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("out.png");
        let seed = dir.path().join("seed.json");
        run(cli(&[
            "render",
            "-W",
            "64",
            "-H",
            "32",
            "--frames",
            "5",
            "--pointer",
            "10,10",
            "-o",
            png.to_str().unwrap(),
            "--save-seed",
            seed.to_str().unwrap(),
        ]))
        .unwrap();

        let img = image::open(&png).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (64, 32));
        let saved = Seed::from_json(&std::fs::read_to_string(&seed).unwrap()).unwrap();
        assert_eq!(saved.frames, 5);
        assert_eq!(saved.pointer, Some([10.0, 10.0]));
    }

    #[test]
    fn replay_reproduces_render() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        let seed = dir.path().join("seed.json");
        run(cli(&[
            "render",
            "-W",
            "48",
            "-H",
            "48",
            "--theme",
            "solar",
            "-o",
            first.to_str().unwrap(),
            "--save-seed",
            seed.to_str().unwrap(),
        ]))
        .unwrap();
        run(cli(&[
            "replay",
            seed.to_str().unwrap(),
            "-o",
            second.to_str().unwrap(),
        ]))
        .unwrap();

        let a = image::open(&first).unwrap().to_rgba8();
        let b = image::open(&second).unwrap().to_rgba8();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn render_with_unknown_theme_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("out.png");
        let err = run(cli(&["render", "--theme", "plaid", "-o", png.to_str().unwrap()]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn render_with_bad_config_json_is_input_error() {
        let err = run(cli(&["render", "--config", "{nope"])).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn render_with_zero_width_is_field_error() {
        let err = run(cli(&["render", "-W", "0"])).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn replay_missing_file_is_io_error() {
        let err = run(cli(&["replay", "/nonexistent/seed.json"])).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn check_contact_reports_invalid_input() {
        let err = run(cli(&["check-contact", "--name", "A"])).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        run(cli(&[
            "check-contact",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "Hello there, nice site!",
        ]))
        .unwrap();
    }

    #[test]
    fn themes_and_params_succeed() {
        run(cli(&["themes"])).unwrap();
        run(cli(&["--json", "themes"])).unwrap();
        run(cli(&["params"])).unwrap();
    }
}
