//! Command-line bootstrap for the `hlasm-lsp` binary.
//!
//! Arguments are parsed by hand rather than with a declarative CLI crate:
//! an LSP server only ever receives a handful of flags from the client's
//! launch configuration, so a small hand-rolled loop is clearer than
//! pulling in a parser generator for four flags.

use std::path::PathBuf;

/// Upper bound on how many `--macro-dir` entries are honoured; a runaway
/// launch configuration cannot make the search list unbounded.
const MAX_MACRO_DIRS: usize = 64;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub data_dir: Option<PathBuf>,
    pub macro_dirs: Vec<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Parse `--data-dir <path>`, `--macro-dir <path>` (repeatable, capped at
/// [`MAX_MACRO_DIRS`]), `--log-level <level>` and `--log-file <path>` out
/// of `args`. Unrecognised flags, and any flag missing its value, are
/// silently ignored rather than treated as an error, a server should not
/// refuse to start over an unfamiliar launch argument.
pub fn parse_args(args: &[String]) -> CliOptions {
    let mut opts = CliOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                if let Some(v) = args.get(i + 1) {
                    opts.data_dir = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--macro-dir" => {
                if let Some(v) = args.get(i + 1) {
                    if opts.macro_dirs.len() < MAX_MACRO_DIRS {
                        opts.macro_dirs.push(PathBuf::from(v));
                    }
                    i += 1;
                }
            }
            "--log-level" => {
                if let Some(v) = args.get(i + 1) {
                    opts.log_level = Some(v.clone());
                    i += 1;
                }
            }
            "--log-file" => {
                if let Some(v) = args.get(i + 1) {
                    opts.log_file = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    opts
}

/// Configure `env_logger` from the parsed options. Logging always goes to
/// a file when `--log-file` is given (stdout/stderr are reserved for the
/// LSP transport and must never carry log output), and otherwise to
/// stderr. Defaults to `Off` when `--log-level` is absent or unrecognised,
/// so a server launched by an editor produces no log output unless a
/// developer opts in explicitly.
pub fn setup_env_logger(opts: &CliOptions) {
    let level = opts
        .log_level
        .as_deref()
        .and_then(|s| s.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Off);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);

    if let Some(path) = &opts.log_file {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("hlasm-lsp: could not open log file {}: {e}", path.display());
            }
        }
    }

    builder.init();
}
