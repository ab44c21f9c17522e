use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    rc::Rc,
};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, debug, error};
use pxplore::{
    PrintOptions, builtins, snapshot::FrameSnapshot, write_module_symbols, write_symbols,
};

/// Print the symbols visible in a Python frame or module
#[derive(Debug, Parser)]
#[command(name = "pxplore", author, version, about, long_about = None)]
struct Cli {
    /// TOML file with print options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the symbols of the built-in module
    Builtins {
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Print the symbols of a frame snapshot
    Frame {
        /// Snapshot file describing the frame
        snapshot: PathBuf,

        /// Leave out the global scope
        #[arg(long)]
        no_globals: bool,

        /// Include the built-in scope
        #[arg(long)]
        show_builtins: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(Debug, Args)]
struct DisplayArgs {
    /// Include names starting with the hidden marker
    #[arg(long)]
    show_hidden: bool,

    /// Prefix of every symbol line
    #[arg(long)]
    alignment: Option<String>,

    /// Python minor version used for the built-in namespace (e.g. 12 for 3.12)
    #[arg(long)]
    python_version: Option<u8>,
}

impl DisplayArgs {
    fn apply(self, options: &mut PrintOptions) {
        options.show_hidden |= self.show_hidden;
        if let Some(alignment) = self.alignment {
            options.alignment = alignment;
        }
        if let Some(python_version) = self.python_version {
            options.python_version = python_version;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    match run(cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}

fn run<W: Write + ?Sized>(cli: Cli, out: &mut W) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => {
            debug!("Loading print options from {}", path.display());
            PrintOptions::from_file(path)?
        }
        None => PrintOptions::default(),
    };

    match cli.command {
        Command::Builtins { display } => {
            display.apply(&mut options);
            let module = builtins::module(options.python_version);
            write_module_symbols(out, &module, &options)
        }
        Command::Frame {
            snapshot,
            no_globals,
            show_builtins,
            display,
        } => {
            display.apply(&mut options);
            options.show_globals &= !no_globals;
            options.show_builtins |= show_builtins;

            let builtins = Rc::new(builtins::module(options.python_version));
            let frame = FrameSnapshot::from_file(&snapshot)?.into_frame(builtins)?;
            write_symbols(out, &frame, &options)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const SNAPSHOT: &str = r#"
file = "app.py"
line = 7
function = "main"

[globals]
VERSION = "1.0"
_private = 0

[locals]
x = 1
"#;

    fn render(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_frame_subcommand_defaults() {
        let dir = TempDir::new().unwrap();
        let snapshot = write_file(&dir, "frame.toml", SNAPSHOT);

        let output = render(&["pxplore", "frame", &snapshot]).unwrap();
        assert_eq!(
            output,
            "File \"app.py\", line 7, in main\n  global:  VERSION = '1.0'\n  local:   x = 1\n"
        );
    }

    #[test]
    fn test_frame_subcommand_flags() {
        let dir = TempDir::new().unwrap();
        let snapshot = write_file(&dir, "frame.toml", SNAPSHOT);

        let output = render(&[
            "pxplore",
            "frame",
            &snapshot,
            "--no-globals",
            "--show-hidden",
            "--alignment",
            "> ",
        ])
        .unwrap();
        assert_eq!(output, "File \"app.py\", line 7, in main\n> local:   x = 1\n");

        let output = render(&["pxplore", "frame", &snapshot, "--show-builtins"]).unwrap();
        assert!(output.contains("  buildin: len = <built-in function len>"));
        assert!(output.contains("  buildin: True = <bool object at 0x"));
    }

    #[test]
    fn test_flags_take_precedence_over_config() {
        let dir = TempDir::new().unwrap();
        let snapshot = write_file(&dir, "frame.toml", SNAPSHOT);
        let config = write_file(
            &dir,
            "pxplore.toml",
            "show-globals = true\nalignment = \"    \"\n",
        );

        let from_config = render(&["pxplore", "--config", &config, "frame", &snapshot]).unwrap();
        assert_eq!(
            from_config,
            "File \"app.py\", line 7, in main\n    global:  VERSION = '1.0'\n    local:   x = 1\n"
        );

        let overridden = render(&[
            "pxplore",
            "frame",
            &snapshot,
            "--config",
            &config,
            "--no-globals",
            "--alignment",
            "\t",
        ])
        .unwrap();
        assert_eq!(overridden, "File \"app.py\", line 7, in main\n\tlocal:   x = 1\n");
    }

    #[test]
    fn test_config_enables_what_flags_leave_unset() {
        let dir = TempDir::new().unwrap();
        let snapshot = write_file(&dir, "frame.toml", SNAPSHOT);
        let config = write_file(&dir, "pxplore.toml", "show-globals = false\nshow-hidden = true\n");

        let output = render(&["pxplore", "--config", &config, "frame", &snapshot]).unwrap();
        assert_eq!(output, "File \"app.py\", line 7, in main\n  local:   x = 1\n");
    }

    #[test]
    fn test_builtins_subcommand() {
        let output = render(&["pxplore", "builtins", "--python-version", "12"]).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "<module 'builtins' (built-in)>");
        assert!(lines.contains(&"  len = <built-in function len>"));
        assert!(!lines.iter().any(|line| line.starts_with("  __")));

        let hidden = render(&["pxplore", "builtins", "--show-hidden"]).unwrap();
        assert!(hidden.lines().any(|line| line == "  __name__ = 'builtins'"));
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let err = render(&["pxplore", "frame", "/nonexistent/frame.toml"]).unwrap_err();
        assert!(
            format!("{err:#}").contains("/nonexistent/frame.toml"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "pxplore.toml", "show_globals = false\n");
        assert!(render(&["pxplore", "--config", &config, "builtins"]).is_err());
    }
}
