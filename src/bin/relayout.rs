use std::path::{Path, PathBuf};
#[cfg(target_os = "macos")]
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use relayout::common::config::{Config, config_file};
use relayout::common::log::{self, Verbosity};
use relayout::layout_engine::{Restorer, capture_layout};
use relayout::model::{Snapshot, store};
use relayout::sys::axuielement::Accessibility;
use tracing::{error, info, warn};

#[cfg(target_os = "macos")]
const ACCESSIBILITY_WAIT: Duration = Duration::from_secs(10);

/// Save the positions of all on-screen windows, or put them back.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Print the current layout as JSON instead of restoring the saved one.
    #[arg(short, long)]
    save: bool,

    /// Log every window that is looked at.
    #[arg(short, long)]
    debug: bool,

    /// Layout file to restore from. Defaults to the config setting, then
    /// ~/.layout.json.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Config file. Defaults to ~/.relayout.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// With --save, write the layout here instead of stdout.
    #[arg(short, long, requires = "save")]
    output: Option<PathBuf>,
}

fn main() {
    sigpipe::reset();
    let opt: Cli = Parser::parse();

    log::init_logging(Verbosity::from_debug_flag(opt.debug));
    install_panic_hook();

    let config = load_config(opt.config.as_deref());

    if let Err(e) = run(&opt, &config) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Config {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file);
    let mut config = if path.exists() {
        match Config::read(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Could not load config {}: {e:#}. Using defaults.", path.display());
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    for issue in config.validate() {
        warn!("Config issue: {issue}");
    }
    let fixes = config.auto_fix_values();
    if fixes > 0 {
        warn!("Reset {fixes} config value(s) to their defaults");
    }
    config
}

#[cfg(target_os = "macos")]
fn run(opt: &Cli, config: &Config) -> anyhow::Result<()> {
    use objc2::MainThreadMarker;
    use relayout::sys::{accessibility, axuielement, screen, window_server};

    let mtm = MainThreadMarker::new().context("relayout must be started on the main thread")?;
    let snapshot = Snapshot::capture(&screen::Actual::new(mtm), &window_server::Actual);

    if opt.save {
        return save(opt, &snapshot);
    }

    accessibility::check_accessibility_permission(ACCESSIBILITY_WAIT);
    restore(opt, config, &snapshot, &axuielement::Actual);
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run(_opt: &Cli, _config: &Config) -> anyhow::Result<()> {
    anyhow::bail!("relayout only runs on macOS")
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn save(opt: &Cli, snapshot: &Snapshot) -> anyhow::Result<()> {
    let layout = capture_layout(snapshot);
    match &opt.output {
        Some(path) => {
            store::write(&layout, path)
                .with_context(|| format!("writing layout to {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", store::to_string_pretty(&layout)?),
    }
    Ok(())
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn restore(opt: &Cli, config: &Config, snapshot: &Snapshot, ax: &impl Accessibility) {
    let path = opt.layout.clone().unwrap_or_else(|| config.settings.layout_file());
    info!("Restoring from {}", path.display());

    let layout = store::read_or_empty(&path);
    let report = Restorer::new(&config.settings.restore, ax).run(&layout, snapshot);

    let summary = report
        .counts()
        .iter()
        .map(|(outcome, n)| format!("{outcome}={n}"))
        .collect::<Vec<_>>()
        .join(" ");
    info!(
        "Done: moved {} of {} windows ({summary})",
        report.moved(),
        report.windows.len()
    );
}

#[cfg(panic = "unwind")]
fn install_panic_hook() {
    // Abort on panic instead of unwinding through FFI callbacks.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        std::process::abort();
    }));
}

#[cfg(not(panic = "unwind"))]
fn install_panic_hook() {}
