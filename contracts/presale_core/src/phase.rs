use crate::SaleConfig;

/// Sale window a timestamp falls into.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    NotStarted,
    /// Only buyers holding enough of the whitelist token may purchase.
    WhitelistOnly,
    Public,
    Ended,
}

/// Phase of the sale at `now` (Unix seconds).
///
/// The whitelist window is skipped entirely when its duration is zero. With
/// both durations zero the sale never closes by time.
pub fn phase_at(config: &SaleConfig, now: u64) -> Phase {
    if now < config.start_time {
        return Phase::NotStarted;
    }
    if now < config.whitelist_end() {
        return Phase::WhitelistOnly;
    }
    match config.public_end() {
        Some(end) if now >= end => Phase::Ended,
        _ => Phase::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SECONDS_PER_HOUR;

    const START: u64 = 1_000_000;

    fn config(whitelist_hours: u64, public_hours: u64) -> SaleConfig {
        SaleConfig {
            whitelist_duration: whitelist_hours,
            public_duration: public_hours,
            start_time: START,
            ..SaleConfig::default()
        }
    }

    #[test]
    fn test_phase_boundaries() {
        let c = config(12, 24);
        assert_eq!(phase_at(&c, 0), Phase::NotStarted);
        assert_eq!(phase_at(&c, START - 1), Phase::NotStarted);
        assert_eq!(phase_at(&c, START), Phase::WhitelistOnly);
        assert_eq!(
            phase_at(&c, START + 12 * SECONDS_PER_HOUR - 1),
            Phase::WhitelistOnly
        );
        assert_eq!(phase_at(&c, START + 12 * SECONDS_PER_HOUR), Phase::Public);
        assert_eq!(
            phase_at(&c, START + 36 * SECONDS_PER_HOUR - 1),
            Phase::Public
        );
        assert_eq!(phase_at(&c, START + 36 * SECONDS_PER_HOUR), Phase::Ended);
        assert_eq!(phase_at(&c, u64::MAX), Phase::Ended);
    }

    #[test]
    fn test_no_whitelist_window_goes_straight_to_public() {
        let c = config(0, 12);
        assert_eq!(phase_at(&c, START - 1), Phase::NotStarted);
        assert_eq!(phase_at(&c, START), Phase::Public);
        assert_eq!(phase_at(&c, START + 12 * SECONDS_PER_HOUR), Phase::Ended);
    }

    #[test]
    fn test_zero_durations_never_end() {
        let c = config(0, 0);
        assert_eq!(phase_at(&c, START - 1), Phase::NotStarted);
        assert_eq!(phase_at(&c, START), Phase::Public);
        assert_eq!(phase_at(&c, u64::MAX), Phase::Public);
    }

    #[test]
    fn test_whitelist_only_sale_ends_with_whitelist_window() {
        let c = config(6, 0);
        assert_eq!(phase_at(&c, START), Phase::WhitelistOnly);
        assert_eq!(
            phase_at(&c, START + 6 * SECONDS_PER_HOUR - 1),
            Phase::WhitelistOnly
        );
        assert_eq!(phase_at(&c, START + 6 * SECONDS_PER_HOUR), Phase::Ended);
        assert_eq!(phase_at(&c, u64::MAX), Phase::Ended);
    }
}
