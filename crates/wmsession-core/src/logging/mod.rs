use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional verbose mode.
///
/// By default only error-level events are emitted, so stdout/stderr stay
/// clean for scripting. When `verbose` is true, info-level and above events
/// are emitted as JSON lines on stderr.
pub fn init_logging(verbose: bool) {
    let directives: &[&str] = if verbose {
        &["wmsession=info", "wmsession_core=info"]
    } else {
        &["wmsession=error", "wmsession_core=error"]
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in directives {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring invalid log directive '{}': {}", directive, e),
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
