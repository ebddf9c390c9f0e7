// Status channel text: fixed messages and time formatting.

pub const PLAYING: &str = "Playing...";
pub const PAUSED: &str = "Paused";
pub const COMPLETED: &str = "Completed";
pub const AUDIO_NOT_FOUND: &str = "Audio file not found";
pub const PLAYBACK_FAILED: &str = "Playback failed";

/// Format a position or duration in seconds as `MM:SS`.
///
/// Values the media runtime cannot measure yet (`NaN` before metadata, or an
/// infinite duration on live streams) render as `00:00`. Minutes are padded
/// to two digits but never truncated, so long files read `100:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "00:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn ready_status(duration: f64) -> String {
    format!("Ready to play ({})", format_time(duration))
}

pub fn progress_status(elapsed: f64, duration: f64) -> String {
    format!("{} / {}", format_time(elapsed), format_time(duration))
}
