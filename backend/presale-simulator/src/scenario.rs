//! Scenario replay: fund accounts, then run timed steps against a ledger and
//! check each outcome.

use std::sync::Arc;

use presale_core::SECONDS_PER_HOUR;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, info_span};

use crate::address::{Address, PaymentAsset};
use crate::bank::{HolderBalances, InMemoryBank};
use crate::clock::{Clock, ManualClock};
use crate::config::{ConfigError, DeployConfig};
use crate::ledger::{LedgerError, PresaleLedger, SharedLedger};
use crate::units::{format_units, parse_units, UnitsError};

/// Outcome name for a successful step.
pub const OK: &str = "Ok";

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("holding of {holder}: {source}")]
    Holding {
        holder: Address,
        #[source]
        source: UnitsError,
    },
    #[error("step {step}: clock advance overflows")]
    Time { step: usize },
    #[error("step {step}: {source}")]
    Amount {
        step: usize,
        #[source]
        source: UnitsError,
    },
    #[error("step {step} ({action}): expected {expected}, got {actual}")]
    Unexpected {
        step: usize,
        action: &'static str,
        expected: String,
        actual: String,
    },
}

/// An account balance set up before the first step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub holder: Address,
    /// Decimal quantity, e.g. `"100"`.
    pub amount: String,
    /// Asset address; the sale's payment asset when absent.
    #[serde(default)]
    pub asset: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Move the clock forward.
    Advance {
        #[serde(default)]
        hours: u64,
        #[serde(default)]
        minutes: u64,
        #[serde(default)]
        seconds: u64,
    },
    Buy {
        from: Address,
        amount: String,
        /// Payment asset address; the sale's payment asset when absent.
        #[serde(default)]
        asset: Option<Address>,
        /// `"Ok"` or an error name. Unchecked when absent.
        #[serde(default)]
        expect: Option<String>,
    },
    Withdraw {
        from: Address,
        #[serde(default)]
        expect: Option<String>,
        /// Expected amount paid out.
        #[serde(default)]
        amount: Option<String>,
    },
    AssertBalance {
        amount: String,
    },
    AssertUser {
        user: Address,
        #[serde(default)]
        bought: Option<String>,
        #[serde(default)]
        whitelist_bought: Option<String>,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Advance { .. } => "advance",
            Step::Buy { .. } => "buy",
            Step::Withdraw { .. } => "withdraw",
            Step::AssertBalance { .. } => "assert_balance",
            Step::AssertUser { .. } => "assert_user",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unix time of the clock before the first step.
    pub clock_start: u64,
    #[serde(default)]
    pub funds: Vec<Holding>,
    /// Whitelist-token balances, scaled by the deploy config's
    /// whitelist decimals. Ignored when the sale has no whitelist token.
    #[serde(default)]
    pub whitelist_holdings: Vec<Holding>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub now: u64,
    pub outcome: String,
}

/// Final ledger state after a replay, amounts formatted in whole units.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub phase: String,
    pub total_raised: String,
    pub balance: String,
    pub soft_cap_reached: bool,
    pub buyers: usize,
}

/// Replay `scenario` against a fresh ledger built from `deploy`.
///
/// Stops at the first step whose outcome differs from its expectation.
pub fn run(deploy: &DeployConfig, scenario: &Scenario) -> Result<Report, ScenarioError> {
    let sale = deploy.sale_config()?;
    let asset = deploy.payment_asset();
    let decimals = deploy.decimals;
    let amount = |step: usize, text: &str| {
        parse_units(text, decimals).map_err(|source| ScenarioError::Amount { step, source })
    };
    let asset_or_default = |address: &Option<Address>| match address {
        Some(address) => PaymentAsset::from_address(address.clone()),
        None => asset.clone(),
    };

    let holding = |entry: &Holding, decimals: u32| {
        parse_units(&entry.amount, decimals).map_err(|source| ScenarioError::Holding {
            holder: entry.holder.clone(),
            source,
        })
    };

    let mut bank = InMemoryBank::new();
    for funds in &scenario.funds {
        let value = holding(funds, decimals)?;
        bank.mint(&asset_or_default(&funds.asset), &funds.holder, value);
    }

    let mut holders = HolderBalances::new();
    if deploy.whitelist_token.is_some() {
        let whitelist_decimals = deploy.whitelist_decimals();
        for held in &scenario.whitelist_holdings {
            holders.set(held.holder.clone(), holding(held, whitelist_decimals)?);
        }
    } else if !scenario.whitelist_holdings.is_empty() {
        info!("sale has no whitelist token; ignoring whitelist holdings");
    }

    let clock = Arc::new(ManualClock::new(scenario.clock_start));
    let ledger = SharedLedger::new(
        PresaleLedger::new(sale, asset.clone(), deploy.owner.clone(), bank, holders),
        clock.clone(),
    );

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let number = index + 1;
        let action = step.action();
        let span = info_span!("step", step = number, action);
        let _enter = span.enter();

        let unexpected = |expected: String, actual: String| ScenarioError::Unexpected {
            step: number,
            action,
            expected,
            actual,
        };

        let outcome = match step {
            Step::Advance {
                hours,
                minutes,
                seconds,
            } => {
                let delta = hours
                    .checked_mul(SECONDS_PER_HOUR)
                    .zip(minutes.checked_mul(60))
                    .and_then(|(h, m)| h.checked_add(m))
                    .and_then(|d| d.checked_add(*seconds))
                    .ok_or(ScenarioError::Time { step: number })?;
                if clock.now().checked_add(delta).is_none() {
                    return Err(ScenarioError::Time { step: number });
                }
                let now = clock.advance(delta);
                info!(delta, now, "clock advanced");
                OK.to_string()
            }
            Step::Buy {
                from,
                amount: value,
                asset,
                expect,
            } => {
                let value = amount(number, value)?;
                let result = ledger.purchase(from, value, &asset_or_default(asset));
                let actual = outcome_name(&result);
                check(expect.as_deref(), &actual).map_err(|e| unexpected(e, actual.clone()))?;
                actual
            }
            Step::Withdraw {
                from,
                expect,
                amount: expected_amount,
            } => {
                let result = ledger.withdraw(from);
                let actual = outcome_name(&result);
                check(expect.as_deref(), &actual).map_err(|e| unexpected(e, actual.clone()))?;
                if let (Ok(paid), Some(text)) = (&result, expected_amount) {
                    let expected = amount(number, text)?;
                    if *paid != expected {
                        return Err(unexpected(
                            format!("withdrawal of {}", format_units(expected, decimals)),
                            format!("withdrawal of {}", format_units(*paid, decimals)),
                        ));
                    }
                }
                actual
            }
            Step::AssertBalance { amount: text } => {
                let expected = amount(number, text)?;
                let balance = ledger.balance();
                if balance != expected {
                    return Err(unexpected(
                        format!("balance {}", format_units(expected, decimals)),
                        format!("balance {}", format_units(balance, decimals)),
                    ));
                }
                OK.to_string()
            }
            Step::AssertUser {
                user,
                bought,
                whitelist_bought,
            } => {
                let info = ledger.user_info(user);
                assert_user_field("bought", bought, info.bought, decimals)
                    .map_err(|(e, a)| unexpected(e, a))?;
                assert_user_field(
                    "whitelist_bought",
                    whitelist_bought,
                    info.whitelist_bought,
                    decimals,
                )
                .map_err(|(e, a)| unexpected(e, a))?;
                OK.to_string()
            }
        };

        steps.push(StepReport {
            step: number,
            action,
            now: clock.now(),
            outcome,
        });
    }

    let report = ledger.with_ledger(|ledger| Report {
        steps,
        phase: format!("{:?}", ledger.phase(clock.now())),
        total_raised: format_units(ledger.state().total_raised(), decimals),
        balance: format_units(ledger.balance(), decimals),
        soft_cap_reached: ledger.soft_cap_reached(),
        buyers: ledger.state().buyers(),
    });
    info!(
        total_raised = %report.total_raised,
        balance = %report.balance,
        "scenario complete"
    );
    Ok(report)
}

fn outcome_name<T>(result: &Result<T, LedgerError>) -> String {
    match result {
        Ok(_) => OK.to_string(),
        Err(err) => err.name().to_string(),
    }
}

fn check(expected: Option<&str>, actual: &str) -> Result<(), String> {
    match expected {
        Some(expected) if expected != actual => Err(expected.to_string()),
        _ => Ok(()),
    }
}

fn assert_user_field(
    field: &str,
    expected: &Option<String>,
    actual: i128,
    decimals: u32,
) -> Result<(), (String, String)> {
    let Some(text) = expected else {
        return Ok(());
    };
    // Unparseable expectations surface as a mismatch against the raw text.
    let matches = parse_units(text, decimals).is_ok_and(|expected| expected == actual);
    if matches {
        return Ok(());
    }
    Err((
        format!("{field} {text}"),
        format!("{field} {}", format_units(actual, decimals)),
    ))
}
