use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum EventCategory {
    Property,
    Education,
    Family,
    Health,
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStrategy {
    Aggressive,
    Balanced,
    Conservative,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone)]
pub struct LifeEvent {
    pub id: String,
    pub name: String,
    pub target_age: u32,
    pub estimated_cost: f64,
    pub priority: Priority,
    pub category: EventCategory,
    pub is_recurring: bool,
    pub recurring_years: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct FinancialProfile {
    pub current_age: u32,
    pub retirement_age: u32,
    pub country: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub salary_increment_rate: f64,
    pub expense_increment_rate: f64,
    pub expected_inflation: f64,
    pub expected_returns: f64,
    pub desired_retirement_income: f64,
    pub life_events: Vec<LifeEvent>,
}

impl FinancialProfile {
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn monthly_savings(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: u32,
    pub age: u32,
    pub corpus: f64,
    pub annual_income: f64,
    pub annual_expenses: f64,
    pub annual_savings: f64,
    pub life_events_cost: f64,
    pub total_invested: f64,
    pub net_worth: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub required_corpus: f64,
    pub life_events_cost: f64,
    pub total_required: f64,
    pub projected_corpus: f64,
    pub shortfall: f64,
    pub is_on_track: bool,
    pub additional_monthly_needed: f64,
    pub years_to_retirement: u32,
    pub monthly_savings: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub amount: f64,
    pub label: &'static str,
    pub achieved: bool,
    pub year: Option<u32>,
    pub age: Option<u32>,
}
