use super::types::{FinancialProfile, GapAnalysis, LifeEvent, Milestone, YearProjection};

pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

pub fn required_corpus(profile: &FinancialProfile) -> f64 {
    let years_to_retirement = profile.years_to_retirement();
    let target_monthly_expenses =
        profile.monthly_income * (profile.desired_retirement_income / 100.0);
    let inflation_adjusted_expenses = target_monthly_expenses
        * growth_factor(profile.expected_inflation, years_to_retirement as i32);
    let annual_retirement_expenses = inflation_adjusted_expenses * 12.0;
    annual_retirement_expenses / SAFE_WITHDRAWAL_RATE
}

pub fn life_events_cost(profile: &FinancialProfile) -> f64 {
    profile
        .life_events
        .iter()
        .map(|event| {
            inflation_adjusted_event_cost(event, profile.current_age, profile.expected_inflation)
        })
        .sum()
}

fn inflation_adjusted_event_cost(event: &LifeEvent, current_age: u32, inflation_rate: f64) -> f64 {
    let years_from_now = i64::from(event.target_age) - i64::from(current_age);
    let base_cost = event.estimated_cost * growth_factor(inflation_rate, years_from_now as i32);

    match (event.is_recurring, event.recurring_years) {
        (true, Some(repeats)) if repeats > 0 => {
            // Each annual payment inflates one more step on top of the
            // already-adjusted base cost.
            (0..repeats)
                .map(|step| base_cost * growth_factor(inflation_rate, step as i32))
                .sum()
        }
        _ => base_cost,
    }
}

pub fn project_wealth(profile: &FinancialProfile) -> Vec<YearProjection> {
    let years_to_retirement = profile.years_to_retirement();
    let event_outflows = event_outflows_by_year(profile, years_to_retirement);

    let mut projections = Vec::with_capacity(years_to_retirement as usize + 1);
    projections.push(YearProjection {
        year: 0,
        age: profile.current_age,
        corpus: profile.current_savings,
        annual_income: profile.monthly_income * 12.0,
        annual_expenses: profile.monthly_expenses * 12.0,
        annual_savings: profile.monthly_savings() * 12.0,
        life_events_cost: 0.0,
        total_invested: profile.current_savings,
        net_worth: profile.current_savings,
    });

    for year in 1..=years_to_retirement {
        let annual_income = profile.monthly_income
            * 12.0
            * growth_factor(profile.salary_increment_rate, year as i32);
        let annual_expenses = profile.monthly_expenses
            * 12.0
            * growth_factor(profile.expense_increment_rate, year as i32);
        let annual_savings = annual_income - annual_expenses;

        let previous = projections[year as usize - 1];
        let investment_returns = previous.corpus * (profile.expected_returns / 100.0);
        let life_events_cost = event_outflows[year as usize];
        // Clamped at zero; any excess deduction is absorbed, not carried as debt.
        let corpus =
            (previous.corpus + investment_returns + annual_savings - life_events_cost).max(0.0);
        let total_invested = previous.total_invested + annual_savings;

        projections.push(YearProjection {
            year,
            age: profile.current_age + year,
            corpus,
            annual_income,
            annual_expenses,
            annual_savings,
            life_events_cost,
            total_invested,
            net_worth: corpus,
        });
    }

    projections
}

fn event_outflows_by_year(profile: &FinancialProfile, years_to_retirement: u32) -> Vec<f64> {
    let mut outflows = vec![0.0; years_to_retirement as usize + 1];
    for event in &profile.life_events {
        let offset = i64::from(event.target_age) - i64::from(profile.current_age);
        // Year 0 is the fixed starting state; deductions land in years 1..=N
        // at their raw cost (the aggregator reports the inflated total).
        if offset >= 1 && offset <= i64::from(years_to_retirement) {
            outflows[offset as usize] += event.estimated_cost;
        }
    }
    outflows
}

pub fn analyze_gap(profile: &FinancialProfile) -> GapAnalysis {
    let required_corpus = required_corpus(profile);
    let life_events_cost = life_events_cost(profile);
    let total_required = required_corpus + life_events_cost;
    let projected_corpus = approximate_projected_corpus(profile);
    let shortfall = total_required - projected_corpus;
    let is_on_track = shortfall <= 0.0;

    let years_to_retirement = profile.years_to_retirement();
    let additional_monthly_needed = if shortfall > 0.0 {
        solve_monthly_contribution(shortfall, profile.expected_returns, years_to_retirement)
    } else {
        0.0
    };

    GapAnalysis {
        required_corpus,
        life_events_cost,
        total_required,
        projected_corpus,
        shortfall,
        is_on_track,
        additional_monthly_needed,
        years_to_retirement,
        monthly_savings: profile.monthly_savings(),
    }
}

fn approximate_projected_corpus(profile: &FinancialProfile) -> f64 {
    let years_to_retirement = profile.years_to_retirement();

    let mut accumulated_savings = 0.0;
    for year in 0..years_to_retirement {
        let annual_income = profile.monthly_income
            * 12.0
            * growth_factor(profile.salary_increment_rate, year as i32);
        let annual_expenses = profile.monthly_expenses
            * 12.0
            * growth_factor(profile.expense_increment_rate, year as i32);
        accumulated_savings += annual_income - annual_expenses;
    }

    let future_value_current_savings = profile.current_savings
        * growth_factor(profile.expected_returns, years_to_retirement as i32);
    // Mid-point approximation: the pooled savings compound over half the horizon.
    let future_value_savings = accumulated_savings
        * (1.0 + profile.expected_returns / 100.0).powf(f64::from(years_to_retirement) / 2.0);

    future_value_current_savings + future_value_savings
}

fn solve_monthly_contribution(shortfall: f64, annual_rate: f64, years: u32) -> f64 {
    let months = years * 12;
    if months == 0 {
        // No contribution months remain; the gap is an immediate top-up.
        return shortfall;
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate.abs() < 1e-12 {
        return shortfall / f64::from(months);
    }

    let annuity_factor = ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate;
    shortfall / annuity_factor
}

pub fn corpus_milestones(
    projections: &[YearProjection],
    ladder: &[(f64, &'static str)],
) -> Vec<Milestone> {
    ladder
        .iter()
        .map(|&(amount, label)| {
            let reached = projections.iter().find(|row| row.corpus >= amount);
            Milestone {
                amount,
                label,
                achieved: reached.is_some(),
                year: reached.map(|row| row.year),
                age: reached.map(|row| row.age),
            }
        })
        .collect()
}

fn growth_factor(rate_percent: f64, periods: i32) -> f64 {
    (1.0 + rate_percent / 100.0).powi(periods)
}
