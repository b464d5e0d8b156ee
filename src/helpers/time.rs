use chrono::{DateTime, Utc};

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// Unix seconds to a UTC timestamp, `None` when out of range.
pub fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_unix_seconds() {
        let ts = from_unix(1_234_567_890).unwrap();
        assert_eq!(ts.timestamp(), 1_234_567_890);
        assert!(from_unix(i64::MAX).is_none());
    }
}
