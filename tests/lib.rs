mod intervals;
mod layouts;
#[cfg(feature = "serde")]
mod serde;

/// A type alias we use for tests.
///
/// Returning a `Result` lets each test use `?` on the fallible constructors
/// and parsers instead of sprinkling `unwrap` everywhere.
type Result = std::result::Result<(), tempora::Error>;

/// A simple logger that writes every record to stderr.
///
/// Tests call `crate::Logger::init()` when they want to see the `trace` and
/// `debug` records emitted with the `logging` feature.
#[derive(Debug)]
struct Logger(());

static LOGGER: Logger = Logger(());

impl Logger {
    fn init() -> std::result::Result<(), log::SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        eprintln!(
            "{}|{}|{}",
            record.level(),
            record.target(),
            record.args(),
        );
    }

    fn flush(&self) {}
}
