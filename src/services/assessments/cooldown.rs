//! 重测冷却期
//!
//! 同一用户在同一 (类型, 级别, 语言) 上两次测评之间至少间隔 `cooldown_days` 天。

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// 仅在冷却中时给出
    pub next_available_at: Option<DateTime<Utc>>,
}

impl Availability {
    const OPEN: Availability = Availability {
        available: true,
        next_available_at: None,
    };
}

/// `cooldown_days <= 0` 时不限制；恰好到期的时刻视为可测
pub fn check_cooldown(
    last_completed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown_days: i64,
) -> Availability {
    let Some(last) = last_completed_at else {
        return Availability::OPEN;
    };
    if cooldown_days <= 0 {
        return Availability::OPEN;
    }

    let next = last + Duration::days(cooldown_days);
    if now < next {
        Availability {
            available: false,
            next_available_at: Some(next),
        }
    } else {
        Availability::OPEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_first_attempt_is_available() {
        let result = check_cooldown(None, at(1, 0), 7);
        assert!(result.available);
        assert_eq!(result.next_available_at, None);
    }

    #[test]
    fn test_within_cooldown_is_blocked() {
        let result = check_cooldown(Some(at(1, 12)), at(5, 0), 7);
        assert!(!result.available);
        assert_eq!(result.next_available_at, Some(at(8, 12)));
    }

    #[test]
    fn test_boundary_instant_is_available() {
        let result = check_cooldown(Some(at(1, 12)), at(8, 12), 7);
        assert!(result.available);

        let just_before = at(8, 12) - Duration::seconds(1);
        assert!(!check_cooldown(Some(at(1, 12)), just_before, 7).available);
    }

    #[test]
    fn test_non_positive_days_disable_rule() {
        assert!(check_cooldown(Some(at(1, 0)), at(1, 0), 0).available);
        assert!(check_cooldown(Some(at(1, 0)), at(1, 0), -3).available);
    }
}
