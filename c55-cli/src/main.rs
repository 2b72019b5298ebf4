//! Command line tool to inspect the content kinds of c55 and to encode or decode single map nodes.
#![expect(clippy::print_stdout, reason = "reports are written to stdout")]

mod commands;
mod config_file;
mod settings;

use std::path::PathBuf;

use clap::Parser;
use commands::Command;
use log::LevelFilter;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbosity level (up to -vvv)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file to use instead of the nearest `c55.conf`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // `RUST_LOG` takes precedence over `-v`
    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    let settings = Settings::load(args.config.as_deref())?;
    let report = args.command.run(&settings)?;
    print!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use c55_core::ContentId;

    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(7), LevelFilter::Trace);
    }

    #[test]
    fn parse_arguments() {
        let args = Args::try_parse_from(["c55", "-vv", "face", "air", "3"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.config.is_none());
        assert!(matches!(
            args.command,
            Command::Face {
                first: ContentId::AIR,
                second: ContentId::LIGHT
            }
        ));

        let args = Args::try_parse_from([
            "c55", "encode", "water", "--param", "-1", "-f", "2", "--config", "my.conf",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.conf")));
        assert!(matches!(
            args.command,
            Command::Encode {
                content: ContentId::WATER,
                param: -1,
                aux: 0,
                format_version: Some(2)
            }
        ));

        let args = Args::try_parse_from(["c55", "to-grid", "-15", "0.5", "4"]).unwrap();
        assert!(matches!(args.command, Command::ToGrid { .. }));
    }

    #[test]
    fn reject_invalid_arguments() {
        assert!(Args::try_parse_from(["c55", "describe", "lava"]).is_err());
        assert!(Args::try_parse_from(["c55", "unpack-dir", "256"]).is_err());
        assert!(Args::try_parse_from(["c55"]).is_err());
    }
}
