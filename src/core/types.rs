use serde::Serialize;

/// User-supplied simulation parameters. Callers must validate all four
/// values as strictly positive before handing them to the engine; behavior
/// on non-positive inputs is unspecified.
#[derive(Debug, Clone, Copy)]
pub struct Inputs {
    pub balance: f64,
    pub apr: f64,
    pub minimum_percentage: f64,
    pub fixed_amount: f64,
}

/// One simulated month of one repayment scenario. `balance` is the amount
/// remaining after this month's payment is applied; all three monetary
/// fields are rounded to two decimals at recording time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub month: u32,
    pub balance: f64,
    pub payment: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub minimum_payments: Vec<MonthlyEntry>,
    pub fixed_minimum_payments: Vec<MonthlyEntry>,
    pub fixed_custom_payments: Vec<MonthlyEntry>,
    pub total_paid_minimum: f64,
    pub total_paid_fixed_minimum: f64,
    pub total_paid_fixed_custom: f64,
    pub time_to_pay_minimum: u32,
    pub time_to_pay_fixed_minimum: u32,
    pub time_to_pay_fixed_custom: u32,
    pub initial_minimum_payment: f64,
}
