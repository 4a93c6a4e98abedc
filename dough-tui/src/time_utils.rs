use time::UtcOffset;

/// The local UTC offset, or UTC when it cannot be determined.
///
/// Read this before any other thread is spawned; on Unix the lookup refuses
/// to run in a multi-threaded process.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
