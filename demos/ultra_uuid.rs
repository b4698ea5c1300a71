//! Simple command that prints one or '-n count' identifiers of the form chosen by '-m mode'

use std::{env, io, io::Write, process::ExitCode};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ultra_uuid::{Config, Generator};

#[derive(Clone, Copy, Debug)]
enum Mode {
    Hashed,
    V4,
    Short,
}

struct Options {
    count: usize,
    mode: Mode,
}

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = env::args();
    let program = args.next();
    let opts = match parse_args(args) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-n count] [-m hashed|v4|short]",
                program.as_deref().unwrap_or("ultra_uuid")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut g = Generator::with_config(config);
    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count {
        match opts.mode {
            Mode::Hashed => writeln!(buf, "{}", g.generate())?,
            Mode::V4 => writeln!(buf, "{}", g.generate_v4())?,
            Mode::Short => writeln!(buf, "{}", g.generate_short())?,
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut count = None;
    let mut mode = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            "-m" => {
                if mode.is_some() {
                    return Err("option 'm' given more than once".to_owned());
                }
                let Some(m_arg) = args.next() else {
                    return Err("argument to option 'm' missing".to_owned());
                };
                mode.replace(match m_arg.as_str() {
                    "hashed" => Mode::Hashed,
                    "v4" => Mode::V4,
                    "short" => Mode::Short,
                    _ => return Err(format!("invalid argument to option 'm': '{}'", m_arg)),
                });
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(Options {
        count: count.unwrap_or(1),
        mode: mode.unwrap_or(Mode::Hashed),
    })
}
