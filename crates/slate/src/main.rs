use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slate_core::{ConfigManager, FrameRate, Settings, Timecode};

/// Frame-accurate timecode calculator for editing and export workflows.
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(about = "Timecode arithmetic, parsing and drop-frame conversion")]
struct Args {
    /// Frame rate, e.g. 23.976, 24, 25, 29.97df, 29.97, 59.94 or any custom fps
    #[arg(short, long, global = true, value_parser = parse_rate)]
    rate: Option<FrameRate>,

    /// Path to the settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Always print a sign in front of timecodes
    #[arg(long, global = true)]
    sign: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timecode for a frame count
    Format {
        #[arg(allow_hyphen_values = true)]
        frames: i64,
    },
    /// Print the frame count for a timecode
    Parse {
        #[arg(allow_hyphen_values = true)]
        timecode: String,
    },
    /// Add two timecodes
    Add {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// Subtract the second timecode from the first
    Sub {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// Multiply a timecode by an integer
    Mul {
        #[arg(allow_hyphen_values = true)]
        timecode: String,
        #[arg(allow_hyphen_values = true)]
        scalar: i64,
    },
    /// Display a timecode at another rate
    Convert {
        #[arg(allow_hyphen_values = true)]
        timecode: String,

        /// Target frame rate
        #[arg(long, value_parser = parse_rate)]
        to: FrameRate,

        /// Keep the wall-clock duration instead of the frame count
        #[arg(long)]
        keep_duration: bool,
    },
    /// Print the duration of a timecode in seconds
    Seconds {
        #[arg(allow_hyphen_values = true)]
        timecode: String,
    },
    /// List the standard frame rates
    Rates,
}

fn parse_rate(s: &str) -> Result<FrameRate, String> {
    s.parse().map_err(|e| format!("Invalid frame rate: {}", e))
}

/// Settings from the config file, or defaults when it is missing or unreadable.
/// Never writes the file.
fn load_settings(path: Option<PathBuf>) -> Settings {
    let mut manager = ConfigManager::new(path);
    match manager.load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!(
                "Ignoring settings at {}: {}",
                manager.config_path().display(),
                e
            );
            Settings::default()
        }
    }
}

/// Command line flags take precedence over saved settings.
fn resolve_display(
    rate: Option<FrameRate>,
    sign: bool,
    settings: &Settings,
) -> (FrameRate, bool) {
    (
        rate.unwrap_or(settings.default_frame_rate),
        sign || settings.always_show_sign,
    )
}

/// Execute a subcommand and return what it prints.
fn run(command: &Command, rate: FrameRate, show_sign: bool) -> Result<String> {
    let parse = |input: &str| -> Result<Timecode> {
        Timecode::parse(input, rate).with_context(|| format!("parsing '{}' at {}", input, rate))
    };

    let output = match command {
        Command::Format { frames } => Timecode::from_frames(*frames, rate).formatted(show_sign),
        Command::Parse { timecode } => parse(timecode)?.frames().to_string(),
        Command::Add { a, b } => parse(a)?.checked_add(&parse(b)?)?.formatted(show_sign),
        Command::Sub { a, b } => parse(a)?.checked_sub(&parse(b)?)?.formatted(show_sign),
        Command::Mul { timecode, scalar } => {
            parse(timecode)?.checked_mul(*scalar)?.formatted(show_sign)
        }
        Command::Convert {
            timecode,
            to,
            keep_duration,
        } => {
            let source = parse(timecode)?;
            let converted = if *keep_duration {
                source.converting_duration(*to)?
            } else {
                source.converting_rate(*to)
            };
            format!("{} @ {}", converted.formatted(show_sign), to)
        }
        Command::Seconds { timecode } => format!("{:.6}", parse(timecode)?.duration_in_seconds()),
        Command::Rates => FrameRate::STANDARD
            .iter()
            .map(|rate| {
                format!(
                    "{:<10} nominal {:>2}  {:.6} fps{}",
                    rate.display_name(),
                    rate.nominal_frame_rate(),
                    rate.frames_per_second(),
                    if rate.is_drop_frame() { "  drop-frame" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = load_settings(args.config);
    let (rate, show_sign) = resolve_display(args.rate, args.sign, &settings);

    log::debug!("Using {} (sign: {})", rate, show_sign);

    println!("{}", run(&args.command, rate, show_sign)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_rate_arguments() {
        let args = Args::try_parse_from(["slate", "--rate", "29.97df", "format", "1800"]).unwrap();
        assert_eq!(args.rate, Some(FrameRate::Fps29_97Df));
        assert!(matches!(args.command, Command::Format { frames: 1800 }));
        assert!(Args::try_parse_from(["slate", "--rate", "0", "rates"]).is_err());
    }

    #[test]
    fn test_negative_operands_are_values() {
        let args = Args::try_parse_from(["slate", "add", "-00:00:01:00", "00:00:02:00"]).unwrap();
        match args.command {
            Command::Add { a, b } => {
                assert_eq!(a, "-00:00:01:00");
                assert_eq!(b, "00:00:02:00");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_target() {
        assert!(Args::try_parse_from(["slate", "convert", "00:00:01:00"]).is_err());
        let args =
            Args::try_parse_from(["slate", "convert", "00:00:01:00", "--to", "25", "--keep-duration"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Convert {
                to: FrameRate::Fps25,
                keep_duration: true,
                ..
            }
        ));
    }

    #[test]
    fn test_format_and_parse_commands() {
        let rate = FrameRate::Fps29_97Df;
        let out = run(&Command::Format { frames: 1800 }, rate, false).unwrap();
        assert_eq!(out, "00:01:00;02");
        let out = run(
            &Command::Parse {
                timecode: "01:00:00;00".to_string(),
            },
            rate,
            false,
        )
        .unwrap();
        assert_eq!(out, "107892");
    }

    #[test]
    fn test_arithmetic_commands() {
        let rate = FrameRate::Fps24;
        let add = Command::Add {
            a: "01:00:00:00".to_string(),
            b: "00:00:01:00".to_string(),
        };
        assert_eq!(run(&add, rate, false).unwrap(), "01:00:01:00");

        let sub = Command::Sub {
            a: "00:00:01:00".to_string(),
            b: "00:00:02:00".to_string(),
        };
        assert_eq!(run(&sub, rate, false).unwrap(), "-00:00:01:00");

        let mul = Command::Mul {
            timecode: "00:00:01:00".to_string(),
            scalar: 3,
        };
        assert_eq!(run(&mul, rate, true).unwrap(), "+00:00:03:00");
    }

    #[test]
    fn test_convert_command() {
        let keep_frames = Command::Convert {
            timecode: "00:00:01:00".to_string(),
            to: FrameRate::Fps25,
            keep_duration: false,
        };
        assert_eq!(
            run(&keep_frames, FrameRate::Fps24, false).unwrap(),
            "00:00:00:24 @ 25"
        );

        let keep_duration = Command::Convert {
            timecode: "00:00:01:00".to_string(),
            to: FrameRate::Fps25,
            keep_duration: true,
        };
        assert_eq!(
            run(&keep_duration, FrameRate::Fps24, false).unwrap(),
            "00:00:01:00 @ 25"
        );
    }

    #[test]
    fn test_invalid_input_reports_context() {
        let parse = Command::Parse {
            timecode: "01:60:00:00".to_string(),
        };
        let err = run(&parse, FrameRate::Fps24, false).unwrap_err();
        assert_eq!(err.to_string(), "parsing '01:60:00:00' at 24");
        assert!(format!("{:#}", err).contains("minutes value 60 is out of range"));
    }

    #[test]
    fn test_seconds_and_rates_commands() {
        let seconds = Command::Seconds {
            timecode: "00:00:02:12".to_string(),
        };
        assert_eq!(run(&seconds, FrameRate::Fps24, false).unwrap(), "2.500000");

        let rates = run(&Command::Rates, FrameRate::Fps24, false).unwrap();
        assert_eq!(rates.lines().count(), FrameRate::STANDARD.len());
        assert!(rates.lines().any(|line| line.ends_with("drop-frame")));
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            default_frame_rate: FrameRate::Fps25,
            always_show_sign: true,
            allow_custom_rates: false,
        };
        assert_eq!(
            resolve_display(None, false, &settings),
            (FrameRate::Fps25, true)
        );
        assert_eq!(
            resolve_display(Some(FrameRate::Fps29_97Df), false, &settings),
            (FrameRate::Fps29_97Df, true)
        );
        assert_eq!(
            resolve_display(None, true, &Settings::default()),
            (FrameRate::Fps24, true)
        );
        assert_eq!(
            resolve_display(None, false, &Settings::default()),
            (FrameRate::Fps24, false)
        );
    }

    #[test]
    fn test_unusable_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let settings = load_settings(Some(blocker.join("slate").join("config.json")));
        assert_eq!(settings, Settings::default());

        let corrupt = temp_dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(load_settings(Some(corrupt)), Settings::default());

        let missing = temp_dir.path().join("missing").join("config.json");
        assert_eq!(load_settings(Some(missing.clone())), Settings::default());
        assert!(!missing.exists());
    }
}
