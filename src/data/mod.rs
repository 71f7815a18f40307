use serde::Serialize;

use crate::core::{EventCategory, Priority};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReturns {
    pub equity: f64,
    pub debt: f64,
    pub real_estate: f64,
    pub gold: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    pub income: f64,
    pub capital_gains: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub symbol: &'static str,
    pub inflation_rate: f64,
    pub average_returns: AssetReturns,
    pub tax_rates: TaxRates,
}

pub static COUNTRIES: [CountryRecord; 8] = [
    CountryRecord {
        code: "IN",
        name: "India",
        currency: "INR",
        symbol: "₹",
        inflation_rate: 6.0,
        average_returns: AssetReturns {
            equity: 14.0,
            debt: 8.0,
            real_estate: 10.0,
            gold: 8.0,
        },
        tax_rates: TaxRates {
            income: 30.0,
            capital_gains: 20.0,
        },
    },
    CountryRecord {
        code: "US",
        name: "United States",
        currency: "USD",
        symbol: "$",
        inflation_rate: 3.0,
        average_returns: AssetReturns {
            equity: 10.0,
            debt: 5.0,
            real_estate: 8.0,
            gold: 6.0,
        },
        tax_rates: TaxRates {
            income: 25.0,
            capital_gains: 15.0,
        },
    },
    CountryRecord {
        code: "GB",
        name: "United Kingdom",
        currency: "GBP",
        symbol: "£",
        inflation_rate: 2.5,
        average_returns: AssetReturns {
            equity: 9.0,
            debt: 4.0,
            real_estate: 7.0,
            gold: 5.0,
        },
        tax_rates: TaxRates {
            income: 20.0,
            capital_gains: 10.0,
        },
    },
    CountryRecord {
        code: "CA",
        name: "Canada",
        currency: "CAD",
        symbol: "C$",
        inflation_rate: 2.8,
        average_returns: AssetReturns {
            equity: 9.5,
            debt: 4.5,
            real_estate: 7.5,
            gold: 5.5,
        },
        tax_rates: TaxRates {
            income: 26.0,
            capital_gains: 13.0,
        },
    },
    CountryRecord {
        code: "AU",
        name: "Australia",
        currency: "AUD",
        symbol: "A$",
        inflation_rate: 3.2,
        average_returns: AssetReturns {
            equity: 10.5,
            debt: 5.5,
            real_estate: 8.5,
            gold: 6.5,
        },
        tax_rates: TaxRates {
            income: 30.0,
            capital_gains: 15.0,
        },
    },
    CountryRecord {
        code: "DE",
        name: "Germany",
        currency: "EUR",
        symbol: "€",
        inflation_rate: 2.2,
        average_returns: AssetReturns {
            equity: 8.5,
            debt: 3.5,
            real_estate: 6.5,
            gold: 4.5,
        },
        tax_rates: TaxRates {
            income: 42.0,
            capital_gains: 26.0,
        },
    },
    CountryRecord {
        code: "SG",
        name: "Singapore",
        currency: "SGD",
        symbol: "S$",
        inflation_rate: 2.0,
        average_returns: AssetReturns {
            equity: 9.0,
            debt: 4.0,
            real_estate: 7.0,
            gold: 5.0,
        },
        tax_rates: TaxRates {
            income: 17.0,
            capital_gains: 0.0,
        },
    },
    CountryRecord {
        code: "AE",
        name: "UAE",
        currency: "AED",
        symbol: "د.إ",
        inflation_rate: 2.5,
        average_returns: AssetReturns {
            equity: 8.0,
            debt: 5.0,
            real_estate: 9.0,
            gold: 6.0,
        },
        tax_rates: TaxRates {
            income: 0.0,
            capital_gains: 0.0,
        },
    },
];

// Unrecognized codes resolve to Indian-market reference numbers, kept as one
// named record instead of inline literals at each lookup site.
pub static FALLBACK_COUNTRY: CountryRecord = CountryRecord {
    code: "",
    name: "Default",
    currency: "INR",
    symbol: "₹",
    inflation_rate: 6.0,
    average_returns: AssetReturns {
        equity: 14.0,
        debt: 8.0,
        real_estate: 10.0,
        gold: 8.0,
    },
    tax_rates: TaxRates {
        income: 30.0,
        capital_gains: 20.0,
    },
};

pub fn country_by_code(code: &str) -> Option<&'static CountryRecord> {
    COUNTRIES.iter().find(|country| country.code == code)
}

pub fn country_or_default(code: &str) -> &'static CountryRecord {
    country_by_code(code).unwrap_or(&FALLBACK_COUNTRY)
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub name: &'static str,
    pub priority: Priority,
    pub category: EventCategory,
    pub is_recurring: bool,
    pub recurring_years: Option<u32>,
}

pub static EVENT_TEMPLATES: [EventTemplate; 9] = [
    EventTemplate {
        name: "House Purchase",
        priority: Priority::High,
        category: EventCategory::Property,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Child Education (School)",
        priority: Priority::High,
        category: EventCategory::Education,
        is_recurring: true,
        recurring_years: Some(12),
    },
    EventTemplate {
        name: "Child Higher Education",
        priority: Priority::High,
        category: EventCategory::Education,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Child Marriage",
        priority: Priority::High,
        category: EventCategory::Family,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Emergency Health Fund",
        priority: Priority::High,
        category: EventCategory::Health,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Car Purchase",
        priority: Priority::Medium,
        category: EventCategory::Other,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Vacation Fund",
        priority: Priority::Low,
        category: EventCategory::Other,
        is_recurring: true,
        recurring_years: Some(1),
    },
    EventTemplate {
        name: "Home Renovation",
        priority: Priority::Medium,
        category: EventCategory::Property,
        is_recurring: false,
        recurring_years: None,
    },
    EventTemplate {
        name: "Parent Care Fund",
        priority: Priority::High,
        category: EventCategory::Family,
        is_recurring: true,
        recurring_years: Some(10),
    },
];

pub fn template_by_name(name: &str) -> Option<&'static EventTemplate> {
    EVENT_TEMPLATES.iter().find(|template| template.name == name)
}

const DEFAULT_EVENT_COST: f64 = 100_000.0;

pub fn default_event_cost(event_name: &str, country_code: &str) -> f64 {
    match event_name {
        "House Purchase" => match country_code {
            "IN" => 5_000_000.0,
            "US" => 400_000.0,
            "GB" => 300_000.0,
            "CA" => 500_000.0,
            "AU" => 600_000.0,
            "DE" => 350_000.0,
            "SG" => 800_000.0,
            "AE" => 1_000_000.0,
            _ => DEFAULT_EVENT_COST,
        },
        "Child Education (School)" => match country_code {
            "IN" => 50_000.0,
            "US" => 15_000.0,
            "GB" => 12_000.0,
            "CA" => 18_000.0,
            "AU" => 20_000.0,
            "DE" => 8_000.0,
            "SG" => 25_000.0,
            "AE" => 40_000.0,
            _ => DEFAULT_EVENT_COST,
        },
        "Child Higher Education" => match country_code {
            "IN" => 1_500_000.0,
            "US" => 200_000.0,
            "GB" => 150_000.0,
            "CA" => 180_000.0,
            "AU" => 200_000.0,
            "DE" => 50_000.0,
            "SG" => 150_000.0,
            "AE" => 300_000.0,
            _ => DEFAULT_EVENT_COST,
        },
        "Child Marriage" => match country_code {
            "IN" => 2_000_000.0,
            "US" => 50_000.0,
            "GB" => 40_000.0,
            "CA" => 60_000.0,
            "AU" => 70_000.0,
            "DE" => 35_000.0,
            "SG" => 80_000.0,
            "AE" => 150_000.0,
            _ => DEFAULT_EVENT_COST,
        },
        "Emergency Health Fund" => match country_code {
            "IN" => 1_000_000.0,
            "US" => 100_000.0,
            "GB" => 80_000.0,
            "CA" => 120_000.0,
            "AU" => 150_000.0,
            "DE" => 70_000.0,
            "SG" => 100_000.0,
            "AE" => 200_000.0,
            _ => DEFAULT_EVENT_COST,
        },
        _ => DEFAULT_EVENT_COST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_are_unique() {
        for (index, country) in COUNTRIES.iter().enumerate() {
            for other in &COUNTRIES[index + 1..] {
                assert_ne!(country.code, other.code);
            }
        }
    }

    #[test]
    fn known_codes_resolve_to_their_record() {
        let india = country_by_code("IN").expect("India must be present");
        assert_eq!(india.name, "India");
        assert_eq!(india.symbol, "₹");
        assert_eq!(india.average_returns.equity, 14.0);

        let uae = country_by_code("AE").expect("UAE must be present");
        assert_eq!(uae.tax_rates.income, 0.0);
    }

    #[test]
    fn unknown_codes_resolve_to_the_fallback_record() {
        let record = country_or_default("ZZ");
        assert_eq!(record.name, "Default");
        assert_eq!(record.symbol, "₹");
        assert_eq!(record.inflation_rate, 6.0);
        assert_eq!(record.average_returns.debt, 8.0);
    }

    #[test]
    fn templates_cover_the_standard_events() {
        assert_eq!(EVENT_TEMPLATES.len(), 9);

        let school = template_by_name("Child Education (School)").expect("template present");
        assert!(school.is_recurring);
        assert_eq!(school.recurring_years, Some(12));

        let house = template_by_name("House Purchase").expect("template present");
        assert!(!house.is_recurring);
        assert_eq!(house.recurring_years, None);

        assert!(template_by_name("Yacht Purchase").is_none());
    }

    #[test]
    fn recurring_templates_always_carry_a_year_count() {
        for template in &EVENT_TEMPLATES {
            if template.is_recurring {
                assert!(template.recurring_years.is_some(), "{}", template.name);
            } else {
                assert!(template.recurring_years.is_none(), "{}", template.name);
            }
        }
    }

    #[test]
    fn event_costs_vary_by_country_with_a_flat_fallback() {
        assert_eq!(default_event_cost("House Purchase", "IN"), 5_000_000.0);
        assert_eq!(default_event_cost("House Purchase", "DE"), 350_000.0);
        assert_eq!(default_event_cost("Child Marriage", "SG"), 80_000.0);
        assert_eq!(default_event_cost("Emergency Health Fund", "AU"), 150_000.0);

        // Unknown event, and known event in an unknown country, both flatten out.
        assert_eq!(default_event_cost("Car Purchase", "IN"), 100_000.0);
        assert_eq!(default_event_cost("House Purchase", "ZZ"), 100_000.0);
    }
}
