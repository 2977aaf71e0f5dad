use std::env;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliArgs, String> {
    match parse_from(env::args().skip(1))? {
        Some(parsed) => Ok(parsed),
        None => {
            print_help();
            std::process::exit(0);
        }
    }
}

/// Returns `None` when help was requested.
fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Option<CliArgs>, String> {
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --port".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port value: {value}"))?;
                parsed.port = Some(port);
            }
            "--db" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --db".to_string())?;
                parsed.db_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_string())?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(Some(parsed))
}

pub fn print_help() {
    println!(
        "Toll Reports\n\n\
Usage:\n  toll-reports [--port <port>] [--db <path>] [--config <path>]\n\n\
Options:\n  --port <port>    Override the configured port for this run only\n  --db <path>      Use this SQLite database instead of the configured one\n  --config <path>  Read settings from this file\n  -h, --help       Show this help message\n"
    );
}
