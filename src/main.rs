//! input-widgets - terminal demo for the keyboard, mouse and gamepad widgets

use anyhow::{bail, Result};
use clap::{Parser as ClapParser, Subcommand};
use input_widgets::config::{Config, WidgetKind};
use input_widgets::demo::DemoApp;
use input_widgets::frontend::{Frontend, TuiFrontend};
use std::path::PathBuf;
use std::time::Instant;

#[derive(ClapParser)]
#[command(name = "input-widgets")]
#[command(about = "On-screen keyboard, mouse and gamepad widgets in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Widget to show first
    #[arg(short, long, value_enum)]
    widget: Option<WidgetKind>,

    /// Font size the widgets scale against (13 is unscaled)
    #[arg(long)]
    font_size: Option<f32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as TOML
    DumpConfig,

    /// Check that a configuration file parses
    ValidateConfig {
        /// Config file to validate (default: ~/.input-widgets/config.toml)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    if let Some(widget) = cli.widget {
        config.demo.widget = widget;
    }
    if let Some(font_size) = cli.font_size {
        if !(font_size.is_finite() && font_size > 0.0) {
            bail!("--font-size must be a positive number, got {}", font_size);
        }
        config.demo.font_size = font_size;
    }
    Ok(config)
}

fn main() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG to control the level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("input-widgets.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        match command {
            Commands::DumpConfig => {
                let config = load_config(&cli)?;
                print!("{}", config.to_toml_string()?);
            }
            Commands::ValidateConfig { path } => {
                let path = match path {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                println!("Validating config file: {:?}", path);
                let config = Config::load_from_file(&path)?;
                println!("✓ Config loaded successfully");
                println!(
                    "  widget: {}, keyboard: {}, mouse: {}, gamepad: {}",
                    config.demo.widget.name(),
                    config.demo.keyboard_layout().name(),
                    config.demo.mouse_layout().name(),
                    config.demo.gamepad_layout().name()
                );
            }
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    run_tui(config)
}

fn run_tui(config: Config) -> Result<()> {
    let mut app = DemoApp::new(&config);
    let mut frontend = TuiFrontend::new()?;
    app.key_releases = frontend.reports_key_releases();
    tracing::info!(
        "Starting demo with the {} widget ({}x{} cells)",
        app.widget.name(),
        frontend.size().0,
        frontend.size().1
    );

    while app.running {
        app.begin_frame(Instant::now());

        for event in frontend.poll_events()? {
            app.handle_event(&event);
        }
        app.sync_gamepad_axes();

        frontend.render(&mut app)?;
        app.end_frame();
    }

    frontend.cleanup()?;
    tracing::info!("Demo exited");
    Ok(())
}
