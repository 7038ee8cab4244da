use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

/// How chatty a run should be when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    pub fn from_debug_flag(debug: bool) -> Verbosity {
        if debug { Verbosity::Debug } else { Verbosity::Normal }
    }

    fn default_level(self) -> LevelFilter {
        match self {
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Installs the global subscriber. Output goes to stderr so that a saved
/// layout printed on stdout stays machine readable.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.default_level().into())
        .from_env_lossy();

    let tree = HierarchicalLayer::default()
        .with_writer(std::io::stderr)
        .with_indent_lines(true)
        .with_indent_amount(2)
        .with_targets(verbosity == Verbosity::Debug)
        .with_bracketed_fields(true);

    // Fails only if a subscriber is already installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
}
