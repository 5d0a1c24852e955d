/// Render a position in seconds as a zero-padded `HH:MM:SS` timecode.
///
/// Positions that are not finite or are negative render as `00:00:00`,
/// which matches what a media element reports before metadata arrives.
pub fn format_timecode(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
