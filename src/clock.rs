use time::OffsetDateTime;

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;

    /// Wall clock time of day, `HH:MM:SS`.
    fn time_of_day(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }

    fn time_of_day(&self) -> String {
        // local offset is unavailable once other threads are running on some unixes
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format_time_of_day(now)
    }
}

pub fn format_time_of_day(at: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
}

#[cfg(test)]
pub(crate) use manual::ManualClock;
