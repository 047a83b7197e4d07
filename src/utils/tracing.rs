/// Log an error together with its chain of sources. With a message the error
/// is considered recovered and logged as a warning.
#[macro_export]
macro_rules! tracing_report {
    ($error:expr) => {
        tracing::error!(err = %snafu::Report::from_error(&$error))
    };
    ($error:expr, $message:literal) => {
        tracing::warn!(err = %snafu::Report::from_error(&$error), $message)
    };
}
