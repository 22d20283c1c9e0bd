use crate::layer::EventLogLayer;
use crate::logger::EventLogger;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Options for installing the tracing bridge.
///
/// **Fields**
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt` layer is
///   stacked on top of [`EventLogLayer`] so events are also printed to
///   the console.
#[derive(Clone, Debug)]
pub struct InitConfig {
    pub enable_stdout: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
        }
    }
}

/// Install the given logger as the global `tracing` subscriber.
///
/// Every `tracing` event in the process at `INFO` and above is converted
/// into a record and written to the logger's sink. The logger is consumed:
/// the global subscriber now holds the live channel sender and the writer
/// task runs for the rest of the process, draining on its own. Code that
/// needs an explicit drain-and-flush should keep the [`EventLogger`] and
/// call [`EventLogger::shutdown`] instead of installing it globally.
pub fn init_tracing_with_config(logger: EventLogger, config: InitConfig) {
    let layer = EventLogLayer::new(&logger);
    // The layer holds its own sender; the logger handle is no longer needed.
    drop(logger);

    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    }
}

/// Install the tracing bridge with default options.
///
/// Equivalent to calling [`init_tracing_with_config`] with
/// [`InitConfig::default`].
pub fn init_tracing(logger: EventLogger) {
    init_tracing_with_config(logger, InitConfig::default());
}
