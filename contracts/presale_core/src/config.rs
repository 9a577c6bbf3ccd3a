use crate::ConfigError;

/// Whitelist and public durations are counted in whole hours.
pub const SECONDS_PER_HOUR: u64 = 3_600;

/// Number of positional sale parameters accepted by [`SaleConfig::from_params`].
pub const PARAM_COUNT: usize = 9;

/// Names of the positional sale parameters, in order.
pub const PARAM_NAMES: [&str; PARAM_COUNT] = [
    "min_buy",
    "max_buy",
    "soft_cap",
    "hard_cap",
    "whitelist_threshold",
    "whitelist_duration",
    "tokens_to_sell",
    "public_duration",
    "start_time",
];

/// Immutable parameters of a sale, fixed at deployment.
///
/// Amounts are in the smallest unit of the payment asset. A zero `max_buy`,
/// `hard_cap` or `tokens_to_sell` means "not bounded / not tracked".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SaleConfig {
    pub min_buy: i128,
    pub max_buy: i128,
    /// Informational target; never enforced.
    pub soft_cap: i128,
    pub hard_cap: i128,
    /// Whitelist-token balance a buyer needs during the whitelist window.
    pub whitelist_threshold: i128,
    /// Hours after `start_time` during which only whitelisted buyers may purchase.
    pub whitelist_duration: u64,
    pub tokens_to_sell: i128,
    /// Hours the public window stays open after the whitelist window.
    /// Zero together with a zero whitelist duration leaves the sale open
    /// until the hard cap closes it.
    pub public_duration: u64,
    /// Unix timestamp (seconds) the sale opens.
    pub start_time: u64,
}

impl SaleConfig {
    /// Build a config from the nine positional parameters, in deploy order:
    /// min buy, max buy, soft cap, hard cap, whitelist threshold, whitelist
    /// duration, tokens to sell, public duration, start time.
    pub fn from_params(params: &[i128]) -> Result<Self, ConfigError> {
        if params.len() != PARAM_COUNT {
            return Err(ConfigError::ParamCount {
                expected: PARAM_COUNT,
                actual: params.len(),
            });
        }

        let config = SaleConfig {
            min_buy: params[0],
            max_buy: params[1],
            soft_cap: params[2],
            hard_cap: params[3],
            whitelist_threshold: params[4],
            whitelist_duration: to_u64(params[5], PARAM_NAMES[5])?,
            tokens_to_sell: params[6],
            public_duration: to_u64(params[7], PARAM_NAMES[7])?,
            start_time: to_u64(params[8], PARAM_NAMES[8])?,
        };
        config.validate()?;
        Ok(config)
    }

    /// The config as positional parameters, the inverse of [`Self::from_params`].
    pub fn to_params(&self) -> [i128; PARAM_COUNT] {
        [
            self.min_buy,
            self.max_buy,
            self.soft_cap,
            self.hard_cap,
            self.whitelist_threshold,
            self.whitelist_duration as i128,
            self.tokens_to_sell,
            self.public_duration as i128,
            self.start_time as i128,
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            (self.min_buy, PARAM_NAMES[0]),
            (self.max_buy, PARAM_NAMES[1]),
            (self.soft_cap, PARAM_NAMES[2]),
            (self.hard_cap, PARAM_NAMES[3]),
            (self.whitelist_threshold, PARAM_NAMES[4]),
            (self.tokens_to_sell, PARAM_NAMES[6]),
        ];
        for (value, name) in amounts {
            if value < 0 {
                return Err(ConfigError::Negative(name));
            }
        }

        if self.max_buy != 0 && self.min_buy > self.max_buy {
            return Err(ConfigError::MinAboveMax);
        }
        if self.hard_cap != 0 && self.soft_cap > self.hard_cap {
            return Err(ConfigError::SoftCapAboveHardCap);
        }
        if self.hard_cap != 0 && self.max_buy > self.hard_cap {
            return Err(ConfigError::MaxBuyAboveHardCap);
        }
        Ok(())
    }

    /// First second of the public window.
    pub fn whitelist_end(&self) -> u64 {
        self.start_time
            .saturating_add(self.whitelist_duration.saturating_mul(SECONDS_PER_HOUR))
    }

    /// First second after the public window, or `None` when it never closes.
    ///
    /// Only a sale with both durations zero is open-ended. A whitelist-only
    /// sale ends when its whitelist window does.
    pub fn public_end(&self) -> Option<u64> {
        if self.whitelist_duration == 0 && self.public_duration == 0 {
            return None;
        }
        Some(
            self.whitelist_end()
                .saturating_add(self.public_duration.saturating_mul(SECONDS_PER_HOUR)),
        )
    }

    pub fn soft_cap_reached(&self, total_raised: i128) -> bool {
        self.soft_cap != 0 && total_raised >= self.soft_cap
    }
}

fn to_u64(value: i128, name: &'static str) -> Result<u64, ConfigError> {
    if value < 0 {
        return Err(ConfigError::Negative(name));
    }
    u64::try_from(value).map_err(|_| ConfigError::OutOfRange(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: i128 = 10_000_000;

    fn params() -> [i128; PARAM_COUNT] {
        [
            3 * ONE / 10,
            15 * ONE,
            50 * ONE,
            200 * ONE,
            1_500 * ONE,
            12,
            0,
            24,
            1_662_645_600,
        ]
    }

    #[test]
    fn test_from_params_keeps_positional_order() {
        let config = SaleConfig::from_params(&params()).unwrap();
        assert_eq!(config.min_buy, 3_000_000);
        assert_eq!(config.max_buy, 150_000_000);
        assert_eq!(config.soft_cap, 500_000_000);
        assert_eq!(config.hard_cap, 2_000_000_000);
        assert_eq!(config.whitelist_threshold, 15_000_000_000);
        assert_eq!(config.whitelist_duration, 12);
        assert_eq!(config.tokens_to_sell, 0);
        assert_eq!(config.public_duration, 24);
        assert_eq!(config.start_time, 1_662_645_600);
        assert_eq!(config.to_params(), params());
    }

    #[test]
    fn test_wrong_param_count_rejected() {
        assert_eq!(
            SaleConfig::from_params(&params()[..8]),
            Err(ConfigError::ParamCount {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_negative_and_inconsistent_params_rejected() {
        let mut p = params();
        p[0] = -1;
        assert_eq!(
            SaleConfig::from_params(&p),
            Err(ConfigError::Negative("min_buy"))
        );

        let mut p = params();
        p[8] = -5;
        assert_eq!(
            SaleConfig::from_params(&p),
            Err(ConfigError::Negative("start_time"))
        );

        let mut p = params();
        p[0] = 20 * ONE;
        assert_eq!(SaleConfig::from_params(&p), Err(ConfigError::MinAboveMax));

        let mut p = params();
        p[2] = 300 * ONE;
        assert_eq!(
            SaleConfig::from_params(&p),
            Err(ConfigError::SoftCapAboveHardCap)
        );

        let mut p = params();
        p[1] = 500 * ONE;
        assert_eq!(
            SaleConfig::from_params(&p),
            Err(ConfigError::MaxBuyAboveHardCap)
        );

        let mut p = params();
        p[7] = i128::from(u64::MAX) + 1;
        assert_eq!(
            SaleConfig::from_params(&p),
            Err(ConfigError::OutOfRange("public_duration"))
        );
    }

    #[test]
    fn test_unbounded_caps_skip_cross_checks() {
        let mut p = params();
        p[1] = 0;
        p[3] = 0;
        p[2] = 10_000 * ONE;
        assert!(SaleConfig::from_params(&p).is_ok());
    }

    #[test]
    fn test_window_boundaries() {
        let config = SaleConfig::from_params(&params()).unwrap();
        assert_eq!(config.whitelist_end(), 1_662_645_600 + 12 * 3_600);
        assert_eq!(config.public_end(), Some(1_662_645_600 + 36 * 3_600));

        let whitelist_only = SaleConfig {
            public_duration: 0,
            ..config
        };
        assert_eq!(
            whitelist_only.public_end(),
            Some(1_662_645_600 + 12 * 3_600)
        );

        let open_ended = SaleConfig {
            whitelist_duration: 0,
            public_duration: 0,
            ..config
        };
        assert_eq!(open_ended.public_end(), None);
    }

    #[test]
    fn test_soft_cap_reached() {
        let config = SaleConfig::from_params(&params()).unwrap();
        assert!(!config.soft_cap_reached(49 * ONE));
        assert!(config.soft_cap_reached(50 * ONE));

        let no_target = SaleConfig {
            soft_cap: 0,
            ..config
        };
        assert!(!no_target.soft_cap_reached(1_000 * ONE));
    }
}
