use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub user_id: i64,
    pub investment_amount: f64,
    /// Free-form label from the caller; resolved to a known profile with a
    /// fallback to moderate.
    pub risk_profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub asset: String,
    pub percentage: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub total_amount: f64,
    pub allocations: Vec<AssetAllocation>,
    pub rationale: String,
}
