use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tui_base::LogLevel;
use tui_base::core::config::{self, CliOverrides};
use tui_base::core::theme::Theme;
use tui_base::tui;

#[derive(Parser)]
#[command(name = "tui-base", version, about = "A basic terminal UI application")]
struct Args {
    /// Config file to load instead of ~/.tui-base/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme to start with
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Directory screenshots are saved into
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "tui-base.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Stdout belongs to the terminal UI, so everything goes to the log file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level.filter(), log_config, log_file);
    }

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tui-base: {e}");
            std::process::exit(2);
        }
    };

    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            theme: args.theme,
            screenshot_dir: args.screenshot_dir,
        },
    );

    if args.print_config {
        println!("{resolved:#?}");
        return Ok(());
    }

    log::info!(
        "{} v{} starting up (theme: {})",
        resolved.metadata.title,
        resolved.metadata.version,
        resolved.theme.label()
    );

    tui::run(resolved)
}
