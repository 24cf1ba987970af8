use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;
use std::fmt::Display;

/// Record timestamps are kept at microsecond precision, which is
/// the finest resolution PostgreSQL's `timestamptz` can hold. Every
/// backend then hands back exactly what it was given.
///
/// They are formatted as [RFC 3339] in UTC (`YYYY-MM-DDTHH:MM:SS.SSSSSSZ`).
///
/// [RFC 3339]: https://www.rfc-editor.org/rfc/rfc3339
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] object based on the current time
    /// in the system.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(6))
    }

    /// Current time, but strictly later than `previous`.
    ///
    /// Two mutations in the same microsecond (or a clock stepping
    /// backwards) would otherwise produce an `updated_at` that does
    /// not move forward.
    #[must_use]
    pub fn now_after(previous: Self) -> Self {
        let now = Self::now();
        if now > previous {
            now
        } else {
            Self(previous.0 + Duration::microseconds(1))
        }
    }

    #[must_use]
    pub const fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_after_is_strictly_later() {
        let far_future = Timestamp::from(Utc::now() + Duration::days(1));
        let next = Timestamp::now_after(far_future);
        assert!(next > far_future);
        assert_eq!(
            next.into_datetime() - far_future.into_datetime(),
            Duration::microseconds(1)
        );

        let past = Timestamp::from(Utc::now() - Duration::days(1));
        assert!(Timestamp::now_after(past) > past);
    }

    #[test]
    fn test_display_is_rfc3339_utc() {
        let value = Timestamp::from(Utc.with_ymd_and_hms(2024, 5, 1, 13, 30, 0).unwrap());
        assert_eq!(value.to_string(), "2024-05-01T13:30:00.000000Z");
    }

    #[test]
    fn test_precision_is_microseconds() {
        let value = Timestamp::now();
        assert_eq!(value.into_datetime().timestamp_subsec_nanos() % 1_000, 0);
    }
}
