use serde::{Deserialize, Serialize};

/// A claim row. Claims share their `id` key space with encounters, which is
/// what the encounter-claim join rides on; not every encounter has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    /// Primary diagnosis code (SNOMED in the reference dataset).
    pub diagnosis_1: Option<String>,
    pub provider_id: String,
}
