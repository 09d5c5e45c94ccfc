/// Logs through `tracing::info!`, optionally tagged with a label and/or timed.
/// Pass a `DateTime<Local>` start point first and the elapsed seconds are appended.
/// ```ignore
/// info_time!("Found {} group urls", 12);
/// info_time!(label: "Downloading", "{}", url);
/// let start = chrono::Local::now();
/// info_time!(start, "Finished collecting pages");
/// ```
#[macro_export]
macro_rules! info_time {
    (label: $label:literal, $strfm:literal $(,)? $($arg:expr),*) => {{
        ::tracing::info!("{:>12} {}", $label, format!($strfm, $($arg),*));
    }};
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        ::tracing::info!("{}", format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let run_time = (::chrono::Local::now() - $time)
                .num_microseconds()
                .map(|n| n as f64 / 1_000_000.0)
                .unwrap_or(0.0);
        ::tracing::info!("{} RUNTIME: {} sec", format!($strfm, $($arg),*), run_time);
    }};
}
