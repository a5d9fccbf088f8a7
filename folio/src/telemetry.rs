use folio_config::SentryConfig;
use folio_utils::folio_version;
use sentry::{integrations::tracing::EventFilter, ClientInitGuard};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log to stderr, filtered by `RUST_LOG`, and forward events to sentry.
///
/// Events only reach sentry once [`init_sentry`] has been called.
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    let sentry_layer = sentry::integrations::tracing::layer().event_filter(|meta| {
        match *meta.level() {
            Level::ERROR => EventFilter::Exception,
            Level::WARN => EventFilter::Event,
            Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
            Level::TRACE => EventFilter::Ignore,
        }
    });

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .with(sentry_layer)
        .init();
}

/// The returned guard flushes pending events when dropped.
pub fn init_sentry(config: Option<&SentryConfig>) -> Option<ClientInitGuard> {
    let config = config?;
    Some(sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: Some(folio_version().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}
