use anyhow::{Context, Result, bail};
use outline_code_config::Config;
use outline_code_engine::{
    Cmd, LanguageRegistry, LanguageSupport, Session, build_outline, io, render_outline,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::{env, process};

const USAGE: &str =
    "Usage: outline-code <file> [--mode <mode>] [--config <path>] [--demote <line>|--promote <line>] [--write]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    mode: Option<String>,
    config: Option<PathBuf>,
    command: Option<Cmd>,
    /// Write the rewritten buffer back to `file` instead of printing it
    write: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut file = None;
    let mut mode = None;
    let mut config = None;
    let mut command = None;
    let mut write = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => mode = Some(value_for(&arg, args.next())?),
            "--config" => config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--write" => write = true,
            "--demote" | "--promote" => {
                if command.is_some() {
                    bail!("Only one of --demote and --promote may be given");
                }
                let line = parse_line(&value_for(&arg, args.next())?)?;
                command = Some(if arg == "--demote" {
                    Cmd::DemoteSubtree { line }
                } else {
                    Cmd::PromoteSubtree { line }
                });
            }
            flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
            _ if file.is_some() => bail!("Unexpected argument {arg}"),
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let Some(file) = file else {
        bail!("No file given");
    };
    if write && command.is_none() {
        bail!("--write needs --demote or --promote");
    }

    Ok(Args {
        file,
        mode,
        config,
        command,
        write,
    })
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.with_context(|| format!("{flag} needs a value"))
}

/// Parse a 1-based line number into a 0-based index.
fn parse_line(value: &str) -> Result<usize> {
    let line: usize = value
        .parse()
        .with_context(|| format!("Invalid line number {value:?}"))?;
    if line == 0 {
        bail!("Line numbers start at 1");
    }
    Ok(line - 1)
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => Config::expand_path(path),
        None => Config::config_path(),
    };
    log::debug!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)? {
        Some(config) => Ok(config),
        None if path.is_some() => bail!("Config file {} not found", config_path.display()),
        None => Ok(Config::default()),
    }
}

fn run(args: Args) -> Result<String> {
    let config = load_config(args.config.as_ref())?;
    let registry = LanguageRegistry::with_overrides(config.language_patterns);
    let support = LanguageSupport::new(Arc::new(registry), config.max_standard_level);

    let text = io::read_file(&args.file)?;
    let mode = args
        .mode
        .unwrap_or_else(|| io::mode_for_path(&args.file).to_string());

    let mut session = Session::new()?;
    session.add_activation_hook(Arc::new(support));
    let name = args.file.display().to_string();
    let id = session.open_buffer(&name, &mode, &text);
    let buffer = session
        .buffer_mut(id)
        .context("Buffer closed while opening")?;
    log::info!(
        "Opened {name} as {mode}, language outline {}",
        if buffer.language_state().is_active() {
            "active"
        } else {
            "inactive"
        }
    );

    let Some(cmd) = args.command else {
        return Ok(render_outline(&build_outline(buffer.headlines())));
    };

    let line = cmd.line() + 1;
    let patch = buffer
        .apply(cmd)
        .with_context(|| format!("Cannot edit headline on line {line}"))?;
    log::info!("Changed {} range(s)", patch.changed.len());

    if args.write {
        io::write_file(&args.file, &buffer.text())?;
        log::info!("Wrote {name}");
        return Ok(String::new());
    }
    Ok(buffer.text())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    match run(args) {
        Ok(output) if output.is_empty() || output.ends_with('\n') => print!("{output}"),
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
