//! Log subscriber setup for the command-line front end.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity setting. `RUST_LOG` overrides it.
#[must_use]
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "truecapture=warn"
    } else if verbose {
        "truecapture=debug,info"
    } else {
        "truecapture=info"
    }
}

/// Install a compact stderr subscriber.
///
/// Does nothing if a global subscriber is already set.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_filter(true, true), "truecapture=warn");
        assert_eq!(default_filter(true, false), "truecapture=debug,info");
        assert_eq!(default_filter(false, false), "truecapture=info");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false, true);
        init(true, false);
    }
}
