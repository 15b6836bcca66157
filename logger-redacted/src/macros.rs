// Logging macros
// The formatted message is passed through the global redactor before it is emitted

#[macro_export]
macro_rules! redacted_info {
    ($($arg:tt)*) => {
        tracing::info!("{}", $crate::redact(&format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! redacted_warn {
    ($($arg:tt)*) => {
        tracing::warn!("{}", $crate::redact(&format!($($arg)*)))
    };
}
