use super::session::DrinksPerDay;

/// Share of weekly drinks members keep after their first 30 days
pub const FIRST_MONTH_RETENTION: f64 = 0.68;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklySummary {
    pub total_drinks: u32,
    pub dry_days: usize,
}

impl WeeklySummary {
    pub fn from_drinks(drinks: &DrinksPerDay) -> Self {
        Self {
            total_drinks: drinks.total(),
            dry_days: drinks.dry_days(),
        }
    }
}

pub fn weekly_spend(total_drinks: u32, spend_per_drink: f64) -> f64 {
    total_drinks as f64 * spend_per_drink
}

/// Weekly drinks expected after the first month on the plan
pub fn projected_weekly_drinks(starting: f64) -> u32 {
    (starting * FIRST_MONTH_RETENTION).round().max(0.0) as u32
}

pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}
