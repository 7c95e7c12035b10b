#![deny(unsafe_code)]
pub mod commands;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

use commands::command::Command;
use commands::load::Load;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::{error, info};
use vcfload_lib::VcfLoadError;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,

    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
enum Subcommand {
    #[command(display_order = 1)]
    Load(Load),
}

fn main() {
    let args = Args::parse();
    // RUST_LOG still wins over --log-level when set.
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    info!("Running vcfload version {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = args.subcommand.execute() {
        error!("{err:#}");
        let code = err.downcast_ref::<VcfLoadError>().map_or(1, VcfLoadError::exit_code);
        std::process::exit(code);
    }
}
