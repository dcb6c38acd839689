//! supabase-bootstrap — entry point.
//!
//! Startup sequence:
//!   1. Parse args
//!   2. Load .env (if present)
//!   3. Load config
//!   4. Init logger from RUST_LOG, else the configured `log_level`
//!   5. Run the requested command
//!
//! # Usage
//!
//! ```text
//! supabase-bootstrap [--config <path>] [command]
//!
//! Commands:
//!   check          report whether the Supabase client could be built (default)
//!   build-config   print the dev-server build descriptor as JSON
//!   ping           check the Supabase project answers over HTTP
//! ```

use std::path::PathBuf;
use std::process;

use supabase_bootstrap::config;
use supabase_bootstrap::descriptor::BuildDescriptor;
use supabase_bootstrap::error::AppError;
use supabase_bootstrap::logger;
use supabase_bootstrap::supabase;
use tracing::{debug, info};

struct Args {
    config: Option<PathBuf>,
    command: Option<String>,
}

fn parse_args() -> Args {
    let mut config = None;
    let mut command = None;
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                config = iter.next().map(PathBuf::from);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            _ if command.is_none() => command = Some(arg),
            _ => {
                eprintln!("unexpected argument: {arg}");
                print_help();
                process::exit(2);
            }
        }
    }

    Args { config, command }
}

fn print_help() {
    eprintln!("usage: supabase-bootstrap [--config <path>] [command]");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  check           report Supabase client status (default)");
    eprintln!("  build-config    print the build descriptor as JSON");
    eprintln!("  ping            probe the Supabase auth health endpoint");
    eprintln!();
    eprintln!("flags:");
    eprintln!("  --config, -c <path>   config file (default: config/default.toml)");
    eprintln!("  --help,   -h          print this help");
    eprintln!();
    eprintln!("environment:");
    eprintln!("  {}  project URL", supabase::SUPABASE_URL_ENV);
    eprintln!("  {}  anon key", supabase::SUPABASE_KEY_ENV);
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<i32, AppError> {
    let args = parse_args();

    // .env is optional.
    let _ = dotenvy::dotenv();

    let config = config::load(args.config.as_deref())?;
    logger::init(&config.log_level)?;

    debug!(
        log_level = %config.log_level,
        project_root = %config.project_root.display(),
        "config loaded"
    );

    match args.command.as_deref().unwrap_or("check") {
        "check" => Ok(check()),
        "build-config" => {
            let descriptor = BuildDescriptor::from_settings(&config.project_root, &config.build)?;
            println!("{}", descriptor.to_json_pretty()?);
            Ok(0)
        }
        "ping" => ping(),
        other => {
            eprintln!("unknown command: {other}");
            print_help();
            Ok(2)
        }
    }
}

fn check() -> i32 {
    let state = supabase::global();
    match state.client() {
        Some(client) => {
            println!("✓ Supabase client ready: url={}", client.base_url());
            0
        }
        None => {
            println!("✗ {}", state.config_error().unwrap_or_default());
            1
        }
    }
}

fn ping() -> Result<i32, AppError> {
    let Some(client) = supabase::global().client() else {
        return Ok(check());
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(client.ping()) {
        Ok(()) => {
            info!(url = %client.auth_url(), "supabase reachable");
            println!("✓ reachable: {}", client.base_url());
            Ok(0)
        }
        Err(e) => {
            println!("✗ {e}");
            Ok(1)
        }
    }
}
