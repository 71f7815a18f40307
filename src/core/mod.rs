mod engine;
mod strategy;
mod types;

pub use engine::{
    SAFE_WITHDRAWAL_RATE, analyze_gap, corpus_milestones, life_events_cost, project_wealth,
    required_corpus,
};
pub use strategy::{
    AllocationOption, STRATEGIES, StrategyPlan, all_strategy_plans, allocate_strategy,
};
pub use types::{
    EventCategory, FinancialProfile, GapAnalysis, LifeEvent, Milestone, Priority, RiskLevel,
    RiskStrategy, YearProjection,
};
