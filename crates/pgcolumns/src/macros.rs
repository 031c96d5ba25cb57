/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
///
/// Without the feature the arguments are not evaluated.
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
