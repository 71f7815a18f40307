use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    EventCategory, FinancialProfile, GapAnalysis, LifeEvent, Milestone, Priority, RiskStrategy,
    StrategyPlan, YearProjection, all_strategy_plans, analyze_gap, corpus_milestones,
    project_wealth,
};
use crate::data::{self, CountryRecord, EventTemplate};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MILESTONE_LADDER: [(f64, &'static str); 5] = [
    (10_000_000.0, "1 Cr"),
    (50_000_000.0, "5 Cr"),
    (100_000_000.0, "10 Cr"),
    (200_000_000.0, "20 Cr"),
    (500_000_000.0, "50 Cr"),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRiskStrategy {
    Aggressive,
    Balanced,
    Conservative,
}

impl From<CliRiskStrategy> for RiskStrategy {
    fn from(value: CliRiskStrategy) -> Self {
        match value {
            CliRiskStrategy::Aggressive => RiskStrategy::Aggressive,
            CliRiskStrategy::Balanced => RiskStrategy::Balanced,
            CliRiskStrategy::Conservative => RiskStrategy::Conservative,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRiskStrategy {
    Aggressive,
    Balanced,
    Conservative,
}

impl From<ApiRiskStrategy> for RiskStrategy {
    fn from(value: ApiRiskStrategy) -> Self {
        match value {
            ApiRiskStrategy::Aggressive => RiskStrategy::Aggressive,
            ApiRiskStrategy::Balanced => RiskStrategy::Balanced,
            ApiRiskStrategy::Conservative => RiskStrategy::Conservative,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPriority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl From<ApiPriority> for Priority {
    fn from(value: ApiPriority) -> Self {
        match value {
            ApiPriority::High => Priority::High,
            ApiPriority::Medium => Priority::Medium,
            ApiPriority::Low => Priority::Low,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiEventCategory {
    #[serde(alias = "Property")]
    Property,
    #[serde(alias = "Education")]
    Education,
    #[serde(alias = "Family")]
    Family,
    #[serde(alias = "Health")]
    Health,
    #[serde(alias = "Other")]
    Other,
}

impl From<ApiEventCategory> for EventCategory {
    fn from(value: ApiEventCategory) -> Self {
        match value {
            ApiEventCategory::Property => EventCategory::Property,
            ApiEventCategory::Education => EventCategory::Education,
            ApiEventCategory::Family => EventCategory::Family,
            ApiEventCategory::Health => EventCategory::Health,
            ApiEventCategory::Other => EventCategory::Other,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LifeEventPayload {
    #[serde(default)]
    id: Option<String>,
    name: String,
    target_age: u32,
    #[serde(default)]
    estimated_cost: Option<f64>,
    #[serde(default)]
    priority: Option<ApiPriority>,
    #[serde(default)]
    category: Option<ApiEventCategory>,
    #[serde(default)]
    is_recurring: Option<bool>,
    #[serde(default)]
    recurring_years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    country: Option<String>,
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    current_savings: Option<f64>,
    salary_increment_rate: Option<f64>,
    expense_increment_rate: Option<f64>,
    expected_inflation: Option<f64>,
    expected_returns: Option<f64>,
    desired_retirement_income: Option<f64>,
    life_events: Option<Vec<LifeEventPayload>>,
    strategy: Option<ApiRiskStrategy>,
}

#[derive(Parser, Debug)]
#[command(
    name = "wealthplan",
    about = "Retirement planner (required corpus, life events, wealth projection, allocations)"
)]
struct Cli {
    #[arg(long, default_value_t = 30, help = "Current age in years")]
    current_age: u32,
    #[arg(long, default_value_t = 60, help = "Planned retirement age in years")]
    retirement_age: u32,
    #[arg(
        long,
        default_value = "IN",
        help = "Country code used for currency, inflation and market-return reference data"
    )]
    country: String,
    #[arg(long, default_value_t = 50000.0)]
    monthly_income: f64,
    #[arg(long, default_value_t = 30000.0)]
    monthly_expenses: f64,
    #[arg(long, default_value_t = 500000.0)]
    current_savings: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Annual salary increment in percent"
    )]
    salary_increment_rate: f64,
    #[arg(
        long,
        default_value_t = 6.0,
        help = "Annual expense increment in percent"
    )]
    expense_increment_rate: f64,
    #[arg(
        long,
        help = "Expected annual inflation in percent; defaults to the country's reference rate"
    )]
    expected_inflation: Option<f64>,
    #[arg(
        long,
        default_value_t = 12.0,
        help = "Expected annual investment return in percent"
    )]
    expected_returns: f64,
    #[arg(
        long,
        default_value_t = 80.0,
        help = "Desired retirement income as a percent of current income"
    )]
    desired_retirement_income: f64,
    #[arg(
        long = "life-event",
        value_name = "NAME,AGE[,COST[,YEARS]]",
        help = "Planned life event, repeatable; COST defaults from the reference table and YEARS makes the event recurring"
    )]
    life_events: Vec<String>,
    #[arg(
        long,
        value_enum,
        default_value_t = CliRiskStrategy::Balanced,
        help = "Risk strategy for the investment allocation"
    )]
    strategy: CliRiskStrategy,
}

#[derive(Debug)]
struct PlanRequest {
    profile: FinancialProfile,
    strategy: RiskStrategy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    country: &'static CountryRecord,
    selected_strategy: RiskStrategy,
    analysis: GapAnalysis,
    projections: Vec<YearProjection>,
    milestones: Vec<Milestone>,
    strategies: Vec<StrategyPlan>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceResponse {
    countries: &'static [CountryRecord],
    event_templates: &'static [EventTemplate],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_profile(cli: Cli, life_events: Vec<LifeEvent>) -> Result<FinancialProfile, String> {
    if cli.retirement_age <= cli.current_age {
        return Err("--retirement-age must be > --current-age".to_string());
    }

    for (name, value) in [
        ("--monthly-income", cli.monthly_income),
        ("--monthly-expenses", cli.monthly_expenses),
        ("--current-savings", cli.current_savings),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    for (name, rate) in [
        ("--salary-increment-rate", cli.salary_increment_rate),
        ("--expense-increment-rate", cli.expense_increment_rate),
    ] {
        if !rate.is_finite() || !(0.0..=50.0).contains(&rate) {
            return Err(format!("{name} must be between 0 and 50"));
        }
    }

    let country = cli.country.trim().to_ascii_uppercase();
    let expected_inflation = cli
        .expected_inflation
        .unwrap_or_else(|| data::country_or_default(&country).inflation_rate);
    if !expected_inflation.is_finite() || !(0.0..=50.0).contains(&expected_inflation) {
        return Err("--expected-inflation must be between 0 and 50".to_string());
    }

    // The shortfall annuity solve needs a positive rate.
    if !cli.expected_returns.is_finite()
        || cli.expected_returns <= 0.0
        || cli.expected_returns > 50.0
    {
        return Err("--expected-returns must be > 0 and <= 50".to_string());
    }

    if !cli.desired_retirement_income.is_finite()
        || !(1.0..=200.0).contains(&cli.desired_retirement_income)
    {
        return Err("--desired-retirement-income must be between 1 and 200".to_string());
    }

    for (index, event) in life_events.iter().enumerate() {
        validate_life_event(event, cli.current_age, cli.retirement_age)?;
        if life_events[..index].iter().any(|other| other.id == event.id) {
            return Err(format!("life event id '{}' is duplicated", event.id));
        }
    }

    Ok(FinancialProfile {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        country,
        monthly_income: cli.monthly_income,
        monthly_expenses: cli.monthly_expenses,
        current_savings: cli.current_savings,
        salary_increment_rate: cli.salary_increment_rate,
        expense_increment_rate: cli.expense_increment_rate,
        expected_inflation,
        expected_returns: cli.expected_returns,
        desired_retirement_income: cli.desired_retirement_income,
        life_events,
    })
}

fn validate_life_event(
    event: &LifeEvent,
    current_age: u32,
    retirement_age: u32,
) -> Result<(), String> {
    if event.name.trim().is_empty() {
        return Err("life event name must not be empty".to_string());
    }

    if event.target_age < current_age || event.target_age > retirement_age {
        return Err(format!(
            "life event '{}' target age must be between {current_age} and {retirement_age}",
            event.name
        ));
    }

    if !event.estimated_cost.is_finite() || event.estimated_cost < 0.0 {
        return Err(format!("life event '{}' cost must be >= 0", event.name));
    }

    if event.is_recurring {
        match event.recurring_years {
            Some(years) if (1..=30).contains(&years) => {}
            _ => {
                return Err(format!(
                    "life event '{}' recurring years must be between 1 and 30",
                    event.name
                ));
            }
        }
    }

    Ok(())
}

fn resolve_life_event(payload: LifeEventPayload, index: usize, country_code: &str) -> LifeEvent {
    let template = data::template_by_name(&payload.name);

    let priority = payload
        .priority
        .map(Priority::from)
        .or_else(|| template.map(|template| template.priority))
        .unwrap_or(Priority::Medium);
    let category = payload
        .category
        .map(EventCategory::from)
        .or_else(|| template.map(|template| template.category))
        .unwrap_or(EventCategory::Other);
    let is_recurring = payload
        .is_recurring
        .or_else(|| template.map(|template| template.is_recurring))
        .unwrap_or(false);
    let recurring_years = payload
        .recurring_years
        .or_else(|| template.and_then(|template| template.recurring_years));
    let estimated_cost = payload
        .estimated_cost
        .unwrap_or_else(|| data::default_event_cost(&payload.name, country_code));

    LifeEvent {
        id: payload
            .id
            .unwrap_or_else(|| format!("event-{}", index + 1)),
        name: payload.name,
        target_age: payload.target_age,
        estimated_cost,
        priority,
        category,
        is_recurring,
        recurring_years,
    }
}

fn parse_life_event_arg(raw: &str, index: usize, country_code: &str) -> Result<LifeEvent, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 4 {
        return Err(format!(
            "--life-event '{raw}' must look like NAME,AGE[,COST[,YEARS]]"
        ));
    }

    let name = parts[0];
    if name.is_empty() {
        return Err(format!("--life-event '{raw}' is missing a name"));
    }

    let target_age = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("--life-event '{raw}' has an invalid age"))?;

    let estimated_cost = match parts.get(2) {
        Some(cost) if !cost.is_empty() => cost
            .parse::<f64>()
            .map_err(|_| format!("--life-event '{raw}' has an invalid cost"))?,
        _ => data::default_event_cost(name, country_code),
    };

    let explicit_years = match parts.get(3) {
        Some(years) => Some(
            years
                .parse::<u32>()
                .map_err(|_| format!("--life-event '{raw}' has an invalid year count"))?,
        ),
        None => None,
    };

    let template = data::template_by_name(name);
    let (is_recurring, recurring_years) = match explicit_years {
        Some(years) => (true, Some(years)),
        None => (
            template.map(|template| template.is_recurring).unwrap_or(false),
            template.and_then(|template| template.recurring_years),
        ),
    };

    Ok(LifeEvent {
        id: format!("event-{}", index + 1),
        name: name.to_string(),
        target_age,
        estimated_cost,
        priority: template
            .map(|template| template.priority)
            .unwrap_or(Priority::Medium),
        category: template
            .map(|template| template.category)
            .unwrap_or(EventCategory::Other),
        is_recurring,
        recurring_years,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 60,
        country: "IN".to_string(),
        monthly_income: 50_000.0,
        monthly_expenses: 30_000.0,
        current_savings: 500_000.0,
        salary_increment_rate: 8.0,
        expense_increment_rate: 6.0,
        expected_inflation: None,
        expected_returns: 12.0,
        desired_retirement_income: 80.0,
        life_events: Vec::new(),
        strategy: CliRiskStrategy::Balanced,
    }
}

fn plan_request_from_payload(payload: PlanPayload) -> Result<PlanRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.country {
        cli.country = v;
    }
    if let Some(v) = payload.monthly_income {
        cli.monthly_income = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.salary_increment_rate {
        cli.salary_increment_rate = v;
    }
    if let Some(v) = payload.expense_increment_rate {
        cli.expense_increment_rate = v;
    }
    if let Some(v) = payload.expected_inflation {
        cli.expected_inflation = Some(v);
    }
    if let Some(v) = payload.expected_returns {
        cli.expected_returns = v;
    }
    if let Some(v) = payload.desired_retirement_income {
        cli.desired_retirement_income = v;
    }

    let strategy = payload
        .strategy
        .map(RiskStrategy::from)
        .unwrap_or(RiskStrategy::Balanced);

    let country_code = cli.country.trim().to_ascii_uppercase();
    let life_events = payload
        .life_events
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, event)| resolve_life_event(event, index, &country_code))
        .collect();

    let profile = build_profile(cli, life_events)?;
    Ok(PlanRequest { profile, strategy })
}

fn build_plan_response(profile: &FinancialProfile, strategy: RiskStrategy) -> PlanResponse {
    let projections = project_wealth(profile);
    let milestones = corpus_milestones(&projections, &MILESTONE_LADDER);

    PlanResponse {
        country: data::country_or_default(&profile.country),
        selected_strategy: strategy,
        analysis: analyze_gap(profile),
        projections,
        milestones,
        strategies: all_strategy_plans(profile),
    }
}

pub fn run_plan_command(args: &[String]) -> Result<String, String> {
    let cli = Cli::try_parse_from(
        std::iter::once("wealthplan".to_string()).chain(args.iter().cloned()),
    )
    .map_err(|e| e.to_string())?;

    let strategy = RiskStrategy::from(cli.strategy);
    let country_code = cli.country.trim().to_ascii_uppercase();
    let life_events = cli
        .life_events
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_life_event_arg(raw, index, &country_code))
        .collect::<Result<Vec<_>, _>>()?;

    let profile = build_profile(cli, life_events)?;
    let response = build_plan_response(&profile, strategy);
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route("/api/reference", get(reference_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("WealthPlan HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn reference_handler() -> Response {
    json_response(
        StatusCode::OK,
        ReferenceResponse {
            countries: &data::COUNTRIES,
            event_templates: &data::EVENT_TEMPLATES,
        },
    )
}

async fn plan_get_handler(Query(payload): Query<PlanPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn plan_post_handler(Json(payload): Json<PlanPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn plan_handler_impl(payload: PlanPayload) -> Response {
    let request = match plan_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let response = build_plan_response(&request.profile, request.strategy);
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn plan_request_from_json(json: &str) -> Result<PlanRequest, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    plan_request_from_payload(payload)
}
