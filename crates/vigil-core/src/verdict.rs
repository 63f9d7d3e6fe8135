//! Persisted fraud verdict

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmed fraud determination for a user at a point in time
///
/// Created only after the scoring oracle confirms risk; immutable once
/// built, ownership moves to the verdict sink for durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudScore {
    pub user_id: String,

    /// Decision time
    pub timestamp: DateTime<Utc>,

    /// Risk score, conventionally in [0, 1]; the oracle may emit values
    /// above 1.0 to signal maximal severity
    pub score: f64,

    /// Human-readable justification from the oracle
    pub reason: String,
}

impl FraudScore {
    /// Create a new fraud score
    pub fn new(user_id: String, timestamp: DateTime<Utc>, score: f64, reason: String) -> Self {
        Self {
            user_id,
            timestamp,
            score,
            reason,
        }
    }
}
