use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Install the global fmt subscriber at INFO unless one is already set.
pub fn init_logging() {
    init_logging_with_level(Level::INFO);
}

pub fn init_logging_with_level(level: Level) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .init();
        });
    }
}
