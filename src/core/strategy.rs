use serde::Serialize;

use super::types::{FinancialProfile, RiskLevel, RiskStrategy};
use crate::data::{self, AssetReturns};

pub const STRATEGIES: [RiskStrategy; 3] = [
    RiskStrategy::Aggressive,
    RiskStrategy::Balanced,
    RiskStrategy::Conservative,
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOption {
    pub name: &'static str,
    pub allocation: f64,
    pub expected_return: f64,
    pub risk: RiskLevel,
    pub description: &'static str,
    pub tax_implications: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPlan {
    pub strategy: RiskStrategy,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub suitability: &'static str,
    pub options: Vec<AllocationOption>,
    pub weighted_return: f64,
    pub monthly_investment: f64,
    pub investment_years: u32,
    pub future_value_contributions: f64,
    pub future_value_current_savings: f64,
    pub projected_corpus: f64,
}

pub fn allocate_strategy(profile: &FinancialProfile, strategy: RiskStrategy) -> StrategyPlan {
    let country = data::country_or_default(&profile.country);
    let options = strategy_options(strategy, &country.average_returns);
    let weighted_return = options
        .iter()
        .map(|option| option.allocation / 100.0 * option.expected_return)
        .sum::<f64>();

    let investment_years = profile.years_to_retirement();
    let monthly_investment = profile.monthly_savings();
    let future_value_contributions =
        future_value_of_monthly(monthly_investment, weighted_return, investment_years);
    let future_value_current_savings = profile.current_savings
        * (1.0 + weighted_return / 100.0).powi(investment_years as i32);

    StrategyPlan {
        strategy,
        title: strategy_title(strategy),
        subtitle: strategy_subtitle(strategy),
        suitability: strategy_suitability(strategy, investment_years),
        options,
        weighted_return,
        monthly_investment,
        investment_years,
        future_value_contributions,
        future_value_current_savings,
        projected_corpus: future_value_contributions + future_value_current_savings,
    }
}

pub fn all_strategy_plans(profile: &FinancialProfile) -> Vec<StrategyPlan> {
    STRATEGIES
        .iter()
        .map(|strategy| allocate_strategy(profile, *strategy))
        .collect()
}

fn strategy_options(strategy: RiskStrategy, returns: &AssetReturns) -> Vec<AllocationOption> {
    match strategy {
        RiskStrategy::Aggressive => vec![
            AllocationOption {
                name: "Large Cap Equity Funds",
                allocation: 40.0,
                expected_return: returns.equity,
                risk: RiskLevel::Medium,
                description: "Stable large companies with growth potential",
                tax_implications: "Long-term capital gains tax applicable",
            },
            AllocationOption {
                name: "Mid & Small Cap Funds",
                allocation: 30.0,
                expected_return: returns.equity + 2.0,
                risk: RiskLevel::High,
                description: "Higher growth potential with increased volatility",
                tax_implications: "Higher tax on short-term gains",
            },
            AllocationOption {
                name: "International Equity",
                allocation: 20.0,
                expected_return: returns.equity - 2.0,
                risk: RiskLevel::Medium,
                description: "Global diversification and currency hedge",
                tax_implications: "Foreign tax credit may apply",
            },
            AllocationOption {
                name: "Debt Funds",
                allocation: 10.0,
                expected_return: returns.debt,
                risk: RiskLevel::Low,
                description: "Stability and capital preservation",
                tax_implications: "Taxed as per income slab",
            },
        ],
        RiskStrategy::Balanced => vec![
            AllocationOption {
                name: "Large Cap Equity Funds",
                allocation: 50.0,
                expected_return: returns.equity,
                risk: RiskLevel::Medium,
                description: "Core equity allocation for steady growth",
                tax_implications: "Long-term capital gains tax applicable",
            },
            AllocationOption {
                name: "Mid Cap Funds",
                allocation: 20.0,
                expected_return: returns.equity + 1.0,
                risk: RiskLevel::High,
                description: "Enhanced growth with moderate risk",
                tax_implications: "Higher tax on short-term gains",
            },
            AllocationOption {
                name: "Debt Funds",
                allocation: 20.0,
                expected_return: returns.debt,
                risk: RiskLevel::Low,
                description: "Stability and regular income",
                tax_implications: "Taxed as per income slab",
            },
            AllocationOption {
                name: "Gold/Commodity ETFs",
                allocation: 10.0,
                expected_return: returns.gold,
                risk: RiskLevel::Medium,
                description: "Inflation hedge and portfolio diversification",
                tax_implications: "Capital gains tax on profits",
            },
        ],
        RiskStrategy::Conservative => vec![
            AllocationOption {
                name: "Large Cap Equity Funds",
                allocation: 30.0,
                expected_return: returns.equity,
                risk: RiskLevel::Medium,
                description: "Limited equity exposure for growth",
                tax_implications: "Long-term capital gains tax applicable",
            },
            AllocationOption {
                name: "Hybrid Funds",
                allocation: 30.0,
                expected_return: (returns.equity + returns.debt) / 2.0,
                risk: RiskLevel::Medium,
                description: "Balanced equity-debt allocation",
                tax_implications: "Mixed taxation based on allocation",
            },
            AllocationOption {
                name: "Debt Funds",
                allocation: 30.0,
                expected_return: returns.debt,
                risk: RiskLevel::Low,
                description: "Capital preservation and steady returns",
                tax_implications: "Taxed as per income slab",
            },
            AllocationOption {
                name: "Fixed Deposits/Government Bonds",
                allocation: 10.0,
                expected_return: returns.debt - 1.0,
                risk: RiskLevel::Low,
                description: "Guaranteed returns and tax benefits",
                tax_implications: "TDS applicable on interest",
            },
        ],
    }
}

fn strategy_title(strategy: RiskStrategy) -> &'static str {
    match strategy {
        RiskStrategy::Aggressive => "Aggressive Growth",
        RiskStrategy::Balanced => "Balanced Growth",
        RiskStrategy::Conservative => "Conservative Wealth Preservation",
    }
}

fn strategy_subtitle(strategy: RiskStrategy) -> &'static str {
    match strategy {
        RiskStrategy::Aggressive => "High risk, high reward for long-term growth",
        RiskStrategy::Balanced => "Optimal mix of growth and stability",
        RiskStrategy::Conservative => "Capital protection with moderate growth",
    }
}

fn strategy_suitability(strategy: RiskStrategy, years_to_retirement: u32) -> &'static str {
    match strategy {
        RiskStrategy::Aggressive => {
            if years_to_retirement >= 20 {
                "Highly Suitable"
            } else if years_to_retirement >= 10 {
                "Moderately Suitable"
            } else {
                "Not Recommended"
            }
        }
        RiskStrategy::Balanced => "Suitable for Most Investors",
        RiskStrategy::Conservative => {
            if years_to_retirement <= 10 {
                "Highly Suitable"
            } else {
                "Conservative Approach"
            }
        }
    }
}

fn future_value_of_monthly(monthly_amount: f64, annual_rate: f64, years: u32) -> f64 {
    let months = years * 12;
    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate.abs() < 1e-12 {
        return monthly_amount * f64::from(months);
    }
    monthly_amount * ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            current_age: 30,
            retirement_age: 60,
            country: "IN".to_string(),
            monthly_income: 50_000.0,
            monthly_expenses: 35_000.0,
            current_savings: 500_000.0,
            salary_increment_rate: 8.0,
            expense_increment_rate: 6.0,
            expected_inflation: 6.0,
            expected_returns: 12.0,
            desired_retirement_income: 80.0,
            life_events: Vec::new(),
        }
    }

    #[test]
    fn allocations_sum_to_one_hundred_for_every_strategy() {
        let profile = sample_profile();
        for plan in all_strategy_plans(&profile) {
            let total: f64 = plan.options.iter().map(|option| option.allocation).sum();
            assert_close(total, 100.0, 1e-9);
        }
    }

    #[test]
    fn weighted_return_stays_within_the_bucket_range() {
        let profile = sample_profile();
        for plan in all_strategy_plans(&profile) {
            let min = plan
                .options
                .iter()
                .map(|option| option.expected_return)
                .fold(f64::INFINITY, f64::min);
            let max = plan
                .options
                .iter()
                .map(|option| option.expected_return)
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(plan.weighted_return >= min && plan.weighted_return <= max);
        }
    }

    #[test]
    fn balanced_weighted_return_matches_the_indian_reference_returns() {
        let plan = allocate_strategy(&sample_profile(), RiskStrategy::Balanced);
        // 0.5x14 + 0.2x15 + 0.2x8 + 0.1x8
        assert_close(plan.weighted_return, 12.4, 1e-9);
    }

    #[test]
    fn aggressive_and_conservative_weighted_returns_bracket_balanced() {
        let profile = sample_profile();
        let aggressive = allocate_strategy(&profile, RiskStrategy::Aggressive);
        let balanced = allocate_strategy(&profile, RiskStrategy::Balanced);
        let conservative = allocate_strategy(&profile, RiskStrategy::Conservative);

        assert_close(aggressive.weighted_return, 13.6, 1e-9);
        assert_close(conservative.weighted_return, 10.6, 1e-9);
        assert!(conservative.weighted_return < balanced.weighted_return);
        assert!(balanced.weighted_return < aggressive.weighted_return);
    }

    #[test]
    fn unknown_country_uses_the_fallback_returns() {
        let mut profile = sample_profile();
        profile.country = "ZZ".to_string();
        let plan = allocate_strategy(&profile, RiskStrategy::Balanced);

        // Fallback record carries the Indian-market reference returns.
        assert_close(plan.weighted_return, 12.4, 1e-9);
    }

    #[test]
    fn projection_combines_annuity_and_lump_sum_compounding() {
        let plan = allocate_strategy(&sample_profile(), RiskStrategy::Balanced);

        let monthly_rate = plan.weighted_return / 100.0 / 12.0;
        let expected_contributions =
            15_000.0 * ((1.0 + monthly_rate).powi(360) - 1.0) / monthly_rate;
        let expected_lump = 500_000.0 * (1.0 + plan.weighted_return / 100.0).powi(30);

        assert_close(plan.future_value_contributions, expected_contributions, 1e-3);
        assert_close(plan.future_value_current_savings, expected_lump, 1e-3);
        assert_close(
            plan.projected_corpus,
            expected_contributions + expected_lump,
            1e-3,
        );
    }

    #[test]
    fn zero_rate_projection_degrades_to_plain_sums() {
        assert_close(future_value_of_monthly(1_000.0, 0.0, 10), 120_000.0, 1e-9);
    }

    #[test]
    fn suitability_labels_follow_the_horizon() {
        let mut profile = sample_profile();

        let aggressive = allocate_strategy(&profile, RiskStrategy::Aggressive);
        assert_eq!(aggressive.suitability, "Highly Suitable");

        profile.retirement_age = 45;
        let aggressive = allocate_strategy(&profile, RiskStrategy::Aggressive);
        assert_eq!(aggressive.suitability, "Moderately Suitable");
        let conservative = allocate_strategy(&profile, RiskStrategy::Conservative);
        assert_eq!(conservative.suitability, "Conservative Approach");

        profile.retirement_age = 35;
        let aggressive = allocate_strategy(&profile, RiskStrategy::Aggressive);
        assert_eq!(aggressive.suitability, "Not Recommended");
        let conservative = allocate_strategy(&profile, RiskStrategy::Conservative);
        assert_eq!(conservative.suitability, "Highly Suitable");

        let balanced = allocate_strategy(&profile, RiskStrategy::Balanced);
        assert_eq!(balanced.suitability, "Suitable for Most Investors");
    }
}
