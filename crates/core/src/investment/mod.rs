use crate::domain::portfolio::{AllocationRequest, AssetAllocation, PortfolioResponse};
use crate::domain::risk::RiskProfileKind;
use crate::domain::round2;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AllocationLine {
    pub asset: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileTemplate {
    pub allocations: Vec<AllocationLine>,
    pub rationale: String,
}

/// Static allocation templates plus rationale text, one per risk profile.
/// Dispatch is a closed match over the three profiles, so the fallback to
/// moderate happens in the label parse, never as a missed lookup here.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationBook {
    conservative: ProfileTemplate,
    moderate: ProfileTemplate,
    aggressive: ProfileTemplate,
}

impl AllocationBook {
    /// The fixed production templates. Percentages in each template sum to
    /// 100.
    pub fn builtin() -> Self {
        fn line(asset: &str, percentage: f64) -> AllocationLine {
            AllocationLine {
                asset: asset.to_string(),
                percentage,
            }
        }

        Self {
            conservative: ProfileTemplate {
                allocations: vec![
                    line("Government Bonds / FDs", 50.0),
                    line("Large-Cap Mutual Funds", 20.0),
                    line("Gold / REITs", 15.0),
                    line("Blue-Chip Stocks", 10.0),
                    line("Cash / Liquid Funds", 5.0),
                ],
                rationale: "Your conservative profile prioritises capital preservation. \
                            The portfolio is weighted heavily towards fixed-income instruments and gold \
                            to minimise volatility while generating steady returns."
                    .to_string(),
            },
            moderate: ProfileTemplate {
                allocations: vec![
                    line("Large-Cap Stocks", 30.0),
                    line("Mid-Cap Mutual Funds", 25.0),
                    line("Government Bonds", 20.0),
                    line("Gold / Commodities", 15.0),
                    line("Crypto (BTC/ETH)", 10.0),
                ],
                rationale: "Your moderate profile balances growth and stability. \
                            The mix of equities, bonds, and a small crypto allocation aims to \
                            outperform inflation while managing downside risk."
                    .to_string(),
            },
            aggressive: ProfileTemplate {
                allocations: vec![
                    line("Growth Stocks", 35.0),
                    line("Small/Mid-Cap Funds", 25.0),
                    line("Crypto (BTC/ETH/Alt)", 20.0),
                    line("International ETFs", 10.0),
                    line("Commodities & Gold", 10.0),
                ],
                rationale: "Your aggressive profile targets maximum long-term growth. \
                            High allocation to growth equities and crypto reflects your higher \
                            risk tolerance and longer investment horizon."
                    .to_string(),
            },
        }
    }

    pub fn template(&self, kind: RiskProfileKind) -> &ProfileTemplate {
        match kind {
            RiskProfileKind::Conservative => &self.conservative,
            RiskProfileKind::Moderate => &self.moderate,
            RiskProfileKind::Aggressive => &self.aggressive,
        }
    }

    /// Expand a template into concrete monetary amounts. The amount is not
    /// range-checked here; validation, if any, belongs to the request layer.
    /// Never fails: unrecognized labels resolve to the moderate template.
    pub fn generate_portfolio(&self, request: &AllocationRequest) -> PortfolioResponse {
        let kind = RiskProfileKind::parse_or_moderate(&request.risk_profile);
        let template = self.template(kind);

        let allocations = template
            .allocations
            .iter()
            .map(|line| AssetAllocation {
                asset: line.asset.clone(),
                percentage: line.percentage,
                amount: round2(request.investment_amount * line.percentage / 100.0),
            })
            .collect();

        PortfolioResponse {
            total_amount: request.investment_amount,
            allocations,
            rationale: template.rationale.clone(),
        }
    }
}
