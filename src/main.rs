//! Entry point for the **nirimatic** dashboard.
//!
//! Parses the command line, sets up logging to a file (the terminal belongs
//! to the UI), loads the application config and hands over to the event
//! loop.

use log::{error, info, warn};
use nirimatic::config::{config_dir, state_dir, Config};
use nirimatic::system::SystemRunner;
use nirimatic::tui::app::App;
use nirimatic::tui::terminal;
use nirimatic::tui::theme::Theme;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "\
Usage: nirimatic [OPTIONS]

Options:
  --config <path>       Read dashboard settings from <path>
                        (default: $XDG_CONFIG_HOME/nirimatic/config.json)
  --niri-config <path>  Edit the niri config at <path>
                        (default: $XDG_CONFIG_HOME/niri/config.kdl)
  -h, --help            Print this help
  -V, --version         Print the version

Logs are written to $XDG_STATE_HOME/nirimatic/nirimatic.log;
set RUST_LOG to control verbosity.";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    niri_config: Option<PathBuf>,
    help: bool,
    version: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-V" | "--version" => parsed.version = true,
            "--config" | "--niri-config" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{} needs a path", arg))?;
                if arg == "--config" {
                    parsed.config = Some(value.into());
                } else {
                    parsed.niri_config = Some(value.into());
                }
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

/// Send `env_logger` output to the log file.  If the file cannot be
/// opened, logging is disabled rather than written over the UI.
fn init_logging() {
    let dir = state_dir();
    let path = dir.join("nirimatic.log");
    let file = std::fs::create_dir_all(&dir).and_then(|()| {
        OpenOptions::new().create(true).append(true).open(&path)
    });

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

/// Load the config from `path` (or `$XDG_CONFIG_HOME/nirimatic/config.json`),
/// falling back to compiled-in defaults.
fn load_config(path: Option<PathBuf>) -> Config {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) if explicit => {
            warn!("{}, using defaults", e);
            eprintln!("nirimatic: {}, using defaults", e);
            Config::default()
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("nirimatic: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return;
    }
    if args.version {
        println!("nirimatic {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_logging();
    info!("nirimatic {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config);
    if let Some(path) = args.niri_config {
        config.niri_config = Some(path);
    }
    info!("editing {}", config.niri_config_path().display());

    let app = App::new(&config, Theme::default());
    if let Err(e) = terminal::run(app, Arc::new(SystemRunner::new())) {
        error!("terminal error: {}", e);
        eprintln!("nirimatic: terminal error: {}", e);
        std::process::exit(1);
    }
    info!("bye");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn paths_and_flags() {
        let parsed = args(&["--niri-config", "/tmp/c.kdl", "--config", "/tmp/n.json", "-V"]).unwrap();
        assert_eq!(parsed.niri_config, Some(PathBuf::from("/tmp/c.kdl")));
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/n.json")));
        assert!(parsed.version);
        assert!(!parsed.help);
    }

    #[test]
    fn missing_value_and_unknown_flag_are_errors() {
        assert_eq!(args(&["--config"]).unwrap_err(), "--config needs a path");
        assert!(args(&["--bogus"]).is_err());
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().join("missing.json")));
        assert_eq!(config.services, Config::default().services);
    }
}
