//! Built-in catalog of financial-planning scenarios.
//!
//! Pure data: every scenario, its backend route and its slider inputs are
//! compiled in and never mutated. Lookups return `Option` so callers decide
//! what an unknown identifier means.

use serde::Serialize;

/// One numeric range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    /// Control id and submission key; unique within a scenario.
    pub id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioDescriptor {
    pub label: &'static str,
    /// Backend simulation route. Stored only, never called from here.
    pub endpoint: &'static str,
    /// Render order.
    pub sliders: &'static [SliderSpec],
}

impl ScenarioDescriptor {
    pub fn slider(&self, id: &str) -> Option<&'static SliderSpec> {
        self.sliders.iter().find(|s| s.id == id)
    }
}

/// Ordered, immutable scenario table.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRegistry {
    entries: &'static [(&'static str, ScenarioDescriptor)],
}

impl ScenarioRegistry {
    pub const fn new(entries: &'static [(&'static str, ScenarioDescriptor)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&'static ScenarioDescriptor> {
        self.entry(id).map(|(_, desc)| desc)
    }

    /// Resolve an id to the registry's own key and descriptor.
    pub fn entry(&self, id: &str) -> Option<(&'static str, &'static ScenarioDescriptor)> {
        let entries: &'static [(&'static str, ScenarioDescriptor)] = self.entries;
        entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(key, desc)| (*key, desc))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static ScenarioDescriptor)> {
        let entries: &'static [(&'static str, ScenarioDescriptor)] = self.entries;
        entries.iter().map(|(key, desc)| (*key, desc))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn slider(
    id: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
) -> SliderSpec {
    SliderSpec { id, label, min, max, step, default }
}

// =============================================================================
// Built-in scenarios
// =============================================================================

const EMERGENCY_FUND: &[SliderSpec] = &[
    slider("target_amount", "Target Emergency Fund Amount (₱)", 5000.0, 500000.0, 1000.0, 100000.0),
    slider("monthly_contribution", "Monthly Savings Contribution (₱)", 500.0, 20000.0, 500.0, 5000.0),
    slider("current_savings", "Current Emergency Savings (₱)", 0.0, 100000.0, 1000.0, 20000.0),
];

const BUDGETING: &[SliderSpec] = &[
    slider("income", "Monthly Income (₱)", 10000.0, 100000.0, 1000.0, 40000.0),
    slider("fixed_expenses", "Fixed Monthly Expenses (₱)", 0.0, 50000.0, 500.0, 15000.0),
    slider("discretionary_pct", "Discretionary Spending (% of Income)", 10.0, 50.0, 1.0, 20.0),
    slider("target_savings", "Target Monthly Savings (₱)", 0.0, 30000.0, 1000.0, 5000.0),
];

const DEBT_REDUCTION: &[SliderSpec] = &[
    slider("total_debt", "Total Debt Amount (₱)", 20000.0, 1000000.0, 10000.0, 200000.0),
    slider("interest_rate", "Annual Interest Rate (%)", 5.0, 30.0, 0.5, 10.0),
    slider("monthly_payment", "Current Monthly Debt Payment (₱)", 1000.0, 50000.0, 1000.0, 5000.0),
    slider("additional_payment", "Additional Monthly Payment (₱)", 0.0, 20000.0, 500.0, 2000.0),
];

const INVESTING: &[SliderSpec] = &[
    slider("monthly_contribution", "Monthly Contribution (₱)", 500.0, 30000.0, 500.0, 5000.0),
    slider("investment_years", "Investment Horizon (Years)", 1.0, 40.0, 1.0, 10.0),
    slider("annual_return", "Expected Annual Return (%)", 1.0, 15.0, 0.1, 6.0),
    slider("current_savings", "Current Investment/Savings Amount (₱)", 0.0, 500000.0, 10000.0, 100000.0),
];

const EDUCATION_FUNDING: &[SliderSpec] = &[
    slider("target_cost_today", "Target Education Cost (Today) (₱)", 100000.0, 3000000.0, 50000.0, 1000000.0),
    slider("years_until_enrollment", "Years Until Enrollment", 1.0, 18.0, 1.0, 5.0),
    slider("current_savings", "Current Education Savings (₱)", 0.0, 500000.0, 10000.0, 100000.0),
    slider("monthly_contribution", "Monthly Savings Contribution (₱)", 500.0, 20000.0, 500.0, 3000.0),
    slider("annual_return", "Expected Annual Investment Return (%)", 1.0, 10.0, 0.1, 5.0),
    slider("inflation_rate", "Annual Education Inflation Rate (%)", 3.0, 7.0, 0.1, 4.0),
];

const MAJOR_PURCHASE: &[SliderSpec] = &[
    slider("purchase_price", "Target Purchase Price (₱)", 500000.0, 10000000.0, 100000.0, 3000000.0),
    slider("down_payment_pct", "Desired Down Payment (%)", 10.0, 30.0, 1.0, 20.0),
    slider("years_to_save", "Years to Save for Down Payment", 1.0, 10.0, 1.0, 3.0),
    slider("current_savings", "Current Savings (₱)", 0.0, 1000000.0, 10000.0, 200000.0),
    slider("monthly_contribution", "Monthly Savings Contribution (₱)", 1000.0, 50000.0, 1000.0, 10000.0),
    slider("savings_return", "Expected Annual Savings Return (%)", 1.0, 5.0, 0.1, 3.0),
    slider("loan_interest", "Loan Interest Rate (Annual %)", 5.0, 15.0, 0.1, 8.0),
    slider("loan_term_years", "Loan Term (Years)", 5.0, 30.0, 1.0, 15.0),
];

const SCENARIOS: &[(&str, ScenarioDescriptor)] = &[
    (
        "emergency_fund",
        ScenarioDescriptor {
            label: "Building an Emergency Fund",
            endpoint: "/simulate/emergency-fund",
            sliders: EMERGENCY_FUND,
        },
    ),
    (
        "budgeting",
        ScenarioDescriptor {
            label: "Effective Budgeting and Expense Tracking",
            endpoint: "/simulate/budgeting",
            sliders: BUDGETING,
        },
    ),
    (
        "debt_reduction",
        ScenarioDescriptor {
            label: "Managing and Reducing Debt",
            endpoint: "/simulate/debt",
            sliders: DEBT_REDUCTION,
        },
    ),
    (
        "investing",
        ScenarioDescriptor {
            label: "Starting to Save and Invest for the Future",
            endpoint: "/simulate/investment",
            sliders: INVESTING,
        },
    ),
    (
        "education_funding",
        ScenarioDescriptor {
            label: "Education Funding",
            endpoint: "/simulate/education",
            sliders: EDUCATION_FUNDING,
        },
    ),
    (
        "major_purchase",
        ScenarioDescriptor {
            label: "Major Purchase Planning",
            endpoint: "/simulate/purchase",
            sliders: MAJOR_PURCHASE,
        },
    ),
];

/// The scenario catalog shipped with the dashboard.
pub static REGISTRY: ScenarioRegistry = ScenarioRegistry::new(SCENARIOS);
