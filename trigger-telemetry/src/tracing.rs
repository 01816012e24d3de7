use std::io::Write;
use std::sync::{Once, OnceLock};
use std::{
    backtrace::{Backtrace, BacktraceStatus},
    panic::PanicHookInfo,
};
use thiserror::Error;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_log::{LogTracer, log_tracer::SetLoggerError};
use tracing_subscriber::{EnvFilter, FmtSubscriber, Registry, fmt, layer::SubscriberExt};
use trigger_config::Environment;

/// JSON field name for pipeline identification in logs.
const PIPELINE_ARN_KEY_IN_LOG: &str = "pipeline_arn";

/// Errors that can occur during tracing initialization.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to init log tracer: {0}")]
    InitLogTracer(#[from] SetLoggerError),

    #[error("failed to set global default subscriber: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),
}

static INIT_TEST_TRACING: Once = Once::new();

/// Initializes tracing for test environments.
///
/// Call once at the beginning of tests. Set `ENABLE_TRACING=1` to view tracing output:
/// ```bash
/// ENABLE_TRACING=1 cargo test test_name
/// ```
pub fn init_test_tracing() {
    INIT_TEST_TRACING.call_once(|| {
        if std::env::var("ENABLE_TRACING").is_ok() {
            // Tests are easier to follow with the pretty console output.
            init_tracing("test", Environment::Dev).expect("Failed to initialize tracing for tests");
        }
    });
}

/// Global pipeline ARN storage.
static PIPELINE_ARN: OnceLock<String> = OnceLock::new();

/// Sets the global pipeline ARN for all tracing events.
///
/// The ARN will be injected into all structured log entries as a top-level field named
/// "pipeline_arn" for identification and filtering.
pub fn set_global_pipeline_arn(pipeline_arn: String) {
    let _ = PIPELINE_ARN.set(pipeline_arn);
}

/// Returns the current global pipeline ARN.
///
/// Returns `None` if no pipeline ARN has been set.
pub fn get_global_pipeline_arn() -> Option<&'static str> {
    PIPELINE_ARN.get().map(|s| s.as_str())
}

/// Writer wrapper that injects top-level fields into JSON log entries.
struct FieldInjectingWriter<W> {
    inner: W,
    pipeline_arn: Option<&'static str>,
}

impl<W> FieldInjectingWriter<W> {
    fn new(inner: W) -> Self {
        Self::with_pipeline_arn(inner, get_global_pipeline_arn())
    }

    fn with_pipeline_arn(inner: W, pipeline_arn: Option<&'static str>) -> Self {
        Self {
            inner,
            pipeline_arn,
        }
    }
}

impl<W> Write for FieldInjectingWriter<W>
where
    W: Write,
{
    /// Writes log data, injecting the pipeline ARN into JSON entries.
    ///
    /// Non-JSON content and entries that already carry the field are written unchanged.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Some(output) = self.pipeline_arn.and_then(|arn| inject_field(buf, arn)) {
            // Report the original length, callers track what they handed us.
            return self.inner.write_all(output.as_bytes()).map(|_| buf.len());
        }

        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Returns `buf` with a top-level `pipeline_arn` field added, or `None` if nothing changes.
fn inject_field(buf: &[u8], pipeline_arn: &str) -> Option<String> {
    let json_str = std::str::from_utf8(buf).ok()?;
    let serde_json::Value::Object(mut map) =
        serde_json::from_str::<serde_json::Value>(json_str).ok()?
    else {
        return None;
    };

    if map.contains_key(PIPELINE_ARN_KEY_IN_LOG) {
        return None;
    }

    map.insert(
        PIPELINE_ARN_KEY_IN_LOG.to_string(),
        serde_json::Value::String(pipeline_arn.to_string()),
    );

    let modified = serde_json::to_string(&map).ok()?;

    // Preserve trailing newline if present
    if json_str.ends_with('\n') {
        Some(format!("{modified}\n"))
    } else {
        Some(modified)
    }
}

/// Initializes tracing for the application.
///
/// Sets up structured logging with environment-appropriate configuration.
pub fn init_tracing(app_name: &str, environment: Environment) -> Result<(), TracingError> {
    init_tracing_with_top_level_fields(app_name, environment, None)
}

/// Initializes tracing with an optional pipeline ARN added to each JSON log entry.
pub fn init_tracing_with_top_level_fields(
    app_name: &str,
    environment: Environment,
    pipeline_arn: Option<String>,
) -> Result<(), TracingError> {
    if let Some(pipeline_arn) = pipeline_arn {
        set_global_pipeline_arn(pipeline_arn);
    }

    // Initialize the log tracer to capture logs from the `log` crate
    // and send them to the `tracing` subscriber. This captures logs
    // from libraries that use the `log` crate.
    LogTracer::init()?;

    // Set the default log level to `info` if not specified in the `RUST_LOG` environment variable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    if environment.is_prod() {
        configure_prod_tracing(filter)?;
    } else {
        configure_dev_tracing(filter)?;
    }

    set_tracing_panic_hook();

    tracing::debug!(app_name, %environment, "tracing initialized");

    Ok(())
}

/// Configures tracing for production environments.
///
/// Sets up structured JSON logging on stdout with top-level field injection. Lines are written
/// synchronously: the function runtime may freeze the process as soon as an invocation returns,
/// so nothing may stay buffered on a background thread.
fn configure_prod_tracing(filter: EnvFilter) -> Result<(), TracingError> {
    let format = fmt::format()
        .with_level(true)
        // ANSI colors are only for terminal output
        .with_ansi(false)
        // Disable target to reduce noise in the logs
        .with_target(false);

    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .event_format(format)
            .with_writer(|| FieldInjectingWriter::new(std::io::stdout()))
            .json()
            .with_current_span(true)
            .with_span_list(true),
    );

    set_global_default(subscriber)?;

    Ok(())
}

/// Configures tracing for development environments.
///
/// Sets up pretty-printed console logging with ANSI colors for readability.
fn configure_dev_tracing(filter: EnvFilter) -> Result<(), TracingError> {
    let format = fmt::format()
        .with_level(true)
        .with_ansi(true)
        .pretty()
        // Disable line number and file in the log output to reduce noise
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let subscriber = FmtSubscriber::builder()
        .event_format(format)
        .with_env_filter(filter)
        .finish();

    set_global_default(subscriber)?;

    Ok(())
}

/// Replaces the default panic hook so panics reach the tracing output.
///
/// The previous hook still runs after ours.
fn set_tracing_panic_hook() {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        panic_hook(info);
        prev_hook(info);
    }));
}

fn panic_hook(panic_info: &PanicHookInfo) {
    let backtrace = Backtrace::capture();
    let (backtrace, note) = match backtrace.status() {
        BacktraceStatus::Captured => (Some(backtrace), None),
        BacktraceStatus::Disabled => (
            None,
            Some("run with RUST_BACKTRACE=1 to display backtraces"),
        ),
        BacktraceStatus::Unsupported => {
            (None, Some("backtraces are not supported on this platform"))
        }
        _ => (None, Some("backtrace status is unknown")),
    };

    let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    };

    let location = panic_info.location().map(|location| location.to_string());

    tracing::error!(
        panic.payload = payload,
        payload.location = location,
        panic.backtrace = backtrace.map(tracing::field::display),
        panic.note = note,
        "a panic occurred",
    );
}
