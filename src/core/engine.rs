use super::types::{Inputs, MonthlyEntry, SimulationResult};

/// A percentage-based minimum payment never drops below this amount.
const MINIMUM_PAYMENT_FLOOR: f64 = 25.0;

/// Hard cap of 50 years; bounds schedules whose payments never outpace
/// interest accrual.
const MAX_MONTHS: u32 = 600;

/// Remaining balances below this are treated as fully paid off.
const PAYOFF_EPSILON: f64 = 0.01;

enum PaymentRule {
    PercentageOfBalance(f64),
    Fixed(f64),
}

impl PaymentRule {
    fn nominal(&self, current_balance: f64) -> f64 {
        match self {
            PaymentRule::PercentageOfBalance(percentage) => {
                minimum_payment(*percentage, current_balance)
            }
            PaymentRule::Fixed(amount) => *amount,
        }
    }
}

struct ScenarioOutcome {
    entries: Vec<MonthlyEntry>,
    total_paid: f64,
}

pub fn run_simulation(inputs: &Inputs) -> SimulationResult {
    let monthly_rate = inputs.apr / 100.0 / 12.0;
    let initial_minimum_payment = minimum_payment(inputs.minimum_percentage, inputs.balance);

    let minimum = run_scenario(
        inputs.balance,
        monthly_rate,
        PaymentRule::PercentageOfBalance(inputs.minimum_percentage),
    );
    let fixed_minimum = run_scenario(
        inputs.balance,
        monthly_rate,
        PaymentRule::Fixed(initial_minimum_payment),
    );
    let fixed_custom = run_scenario(
        inputs.balance,
        monthly_rate,
        PaymentRule::Fixed(inputs.fixed_amount),
    );

    SimulationResult {
        total_paid_minimum: round2(minimum.total_paid),
        total_paid_fixed_minimum: round2(fixed_minimum.total_paid),
        total_paid_fixed_custom: round2(fixed_custom.total_paid),
        time_to_pay_minimum: minimum.entries.len() as u32,
        time_to_pay_fixed_minimum: fixed_minimum.entries.len() as u32,
        time_to_pay_fixed_custom: fixed_custom.entries.len() as u32,
        minimum_payments: minimum.entries,
        fixed_minimum_payments: fixed_minimum.entries,
        fixed_custom_payments: fixed_custom.entries,
        initial_minimum_payment: round2(initial_minimum_payment),
    }
}

fn run_scenario(starting_balance: f64, monthly_rate: f64, rule: PaymentRule) -> ScenarioOutcome {
    let mut entries = Vec::new();
    let mut current_balance = starting_balance;
    let mut month = 0_u32;
    let mut total_paid = 0.0;

    while current_balance > 0.0 && month < MAX_MONTHS {
        month += 1;

        let interest = current_balance * monthly_rate;
        // The final payment is capped at what extinguishes the debt.
        let payment = rule.nominal(current_balance).min(current_balance + interest);

        current_balance = (current_balance + interest - payment).max(0.0);
        total_paid += payment;

        // Rounding is an output step; the exact balance carries forward.
        entries.push(MonthlyEntry {
            month,
            balance: round2(current_balance),
            payment: round2(payment),
            interest: round2(interest),
        });

        if current_balance < PAYOFF_EPSILON {
            break;
        }
    }

    ScenarioOutcome {
        entries,
        total_paid,
    }
}

fn minimum_payment(percentage: f64, current_balance: f64) -> f64 {
    (percentage / 100.0 * current_balance).max(MINIMUM_PAYMENT_FLOOR)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
