pub mod console;
pub mod file;

use tracing::Subscriber;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::layer::Layered;
use tracing_subscriber::registry::LookupSpan;

/// Plain-text fmt layer shared by the console and file sinks.
pub type SinkLayer<S> =
    tracing_fmt::Layer<S, format::DefaultFields, format::Format<format::Full>, BoxMakeWriter>;

/// `S` with one sink layer applied.
pub type WithSink<S> = Layered<SinkLayer<S>, S>;

fn sink_layer<S>(writer: BoxMakeWriter) -> SinkLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
}
