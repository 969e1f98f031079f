use crate::domain::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

/// Default delay between an escrow credit and its earliest release: 20h.
pub const DEFAULT_HOLD_DURATION: Timestamp = 20 * 60 * 60;

/// The metric the best-merchant ranking accumulates on each purchase.
///
/// The observed behavior of the system is consistent with either rule, so
/// it is configurable; quantity is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    /// Units sold, regardless of price.
    #[default]
    Quantity,
    /// Revenue attributed (total paid, after discount).
    Revenue,
}

/// Engine-wide constants fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The one account allowed to register merchants and force-release
    /// escrowed funds.
    pub admin: AccountId,
    /// Hold applied uniformly to every escrow credit, purchases and
    /// refund reversals alike.
    pub hold_duration: Timestamp,
    pub ranking: RankingMetric,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admin: 0,
            hold_duration: DEFAULT_HOLD_DURATION,
            ranking: RankingMetric::default(),
        }
    }
}
