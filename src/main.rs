use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server_monitor::{
    events, ui, App, FileSource, HostSource, MonitorConfig, Report, ServerMonitor,
};

#[derive(Parser, Debug)]
#[command(name = "server-monitor")]
#[command(about = "Server utilization monitor with rolling history and alarm blinking")]
struct Args {
    /// Path to the host snapshot JSON file
    #[arg(short, long, default_value = "host.json")]
    file: PathBuf,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Warning utilization threshold (e.g. 0.75)
    #[arg(long)]
    warn: Option<f64>,

    /// Alarm utilization threshold (e.g. 0.9)
    #[arg(long)]
    alarm: Option<f64>,

    /// Number of history slots
    #[arg(long)]
    history: Option<usize>,

    /// Sim time between history appends
    #[arg(long)]
    cadence: Option<i64>,

    /// Alarm blink interval in milliseconds
    #[arg(long)]
    blink_ms: Option<u64>,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "50")]
    tick_ms: u64,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Sample the host once, write a JSON report to this path and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings.
    fn apply_overrides(&self, config: &mut MonitorConfig) {
        if let Some(warn) = self.warn {
            config.thresholds.warning = warn;
        }
        if let Some(alarm) = self.alarm {
            config.thresholds.alarm = alarm;
        }
        if let Some(history) = self.history {
            config.history_len = history;
        }
        if let Some(cadence) = self.cadence {
            config.cadence = cadence;
        }
        if let Some(blink_ms) = self.blink_ms {
            config.blink_interval_ms = blink_ms;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = MonitorConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if let Some(ref export_path) = args.export {
        init_logging(None)?;
        return export_to_file(&args.file, export_path, config);
    }

    if let Some(ref log_path) = args.log_file {
        init_logging(Some(log_path.as_path()))?;
    }

    info!(file = %args.file.display(), ?config, "starting server monitor");
    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, config, Duration::from_millis(args.tick_ms))
}

/// Install the tracing subscriber, writing to `path` or to stderr.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Run the TUI with the given host source
fn run_tui(
    source: Box<dyn HostSource>,
    config: MonitorConfig,
    tick_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, config);
    let result = run_app(&mut terminal, &mut app, tick_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_interval: Duration,
) -> Result<()> {
    while app.running {
        // One monitor tick per frame
        app.tick(Instant::now());

        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(tick_interval)? {
            events::handle_event(app, event);
        }
    }

    Ok(())
}

/// Take one sample from the host file and write the report
fn export_to_file(host_path: &Path, export_path: &Path, config: MonitorConfig) -> Result<()> {
    let mut source = FileSource::new(host_path);
    let host = source.snapshot().with_context(|| {
        format!(
            "no host snapshot in {}: {}",
            host_path.display(),
            source.error().unwrap_or("unknown error")
        )
    })?;

    let mut monitor = ServerMonitor::new(config);
    monitor.activate();
    monitor.tick(Some(&host), Instant::now());

    let report = Report::from_monitor(&monitor).context("monitor produced no data")?;
    report.write_to(export_path)?;

    info!(path = %export_path.display(), servers = host.servers.len(), "exported report");
    println!("Exported monitor state to: {}", export_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_loaded_settings() {
        let args = Args::try_parse_from([
            "server-monitor",
            "--alarm",
            "0.95",
            "--history",
            "8",
            "--blink-ms",
            "500",
        ])
        .unwrap();

        let mut config = MonitorConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.thresholds.alarm, 0.95);
        assert_eq!(config.history_len, 8);
        assert_eq!(config.blink_interval_ms, 500);
        // Flags not given leave the loaded values alone
        assert_eq!(config.thresholds.warning, 0.75);
        assert_eq!(config.cadence, 60);
        assert_eq!(args.file, PathBuf::from("host.json"));
    }
}
