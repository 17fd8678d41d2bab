//! Answers accumulated over one onboarding session.
//!
//! Nothing here is persisted. The sequencer owns the only copy and views
//! reach it through [`Route`](super::Route) slices or the typed setters below.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::catalog::{ConcernLevel, EffectFrequency, IdealOutcome, ImprovementArea};
use super::input::MAX_DRINKS_PER_DAY;

/// Default estimate for the price of one drink
pub const DEFAULT_SPEND_PER_DRINK: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Single-letter label used in the day strip
    pub fn initial(self) -> &'static str {
        &self.name()[..1]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(name))
    }
}

/// Drink counts for a typical week. Every weekday is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinksPerDay {
    counts: [u32; 7],
}

impl DrinksPerDay {
    pub fn get(&self, day: Weekday) -> u32 {
        self.counts[day.index()]
    }

    pub fn set(&mut self, day: Weekday, count: u32) {
        self.counts[day.index()] = count;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u32)> + '_ {
        Weekday::ALL.into_iter().map(|day| (day, self.get(day)))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0, |sum, count| sum.saturating_add(*count))
    }

    pub fn dry_days(&self) -> usize {
        self.counts.iter().filter(|count| **count == 0).count()
    }

    /// Build from the backend's weekday map. Values may arrive as numbers or
    /// numeric strings; unknown keys are ignored and missing days stay at 0.
    /// Counts are capped like typed entries.
    pub fn from_backend(map: &serde_json::Map<String, Value>) -> Self {
        let mut drinks = Self::default();
        for (key, value) in map {
            let Some(day) = Weekday::from_name(key) else {
                continue;
            };
            let count = match value {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                _ => 0.0,
            };
            drinks.set(day, (count.max(0.0).round() as u32).min(MAX_DRINKS_PER_DAY));
        }
        drinks
    }
}

impl Serialize for DrinksPerDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, count) in self.iter() {
            map.serialize_entry(day.name(), &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    goals: BTreeSet<String>,
    primary_goal: Option<String>,
    drinks_per_day: DrinksPerDay,
    spend_per_drink: f64,
    ideal_outcome: Option<IdealOutcome>,
    effect_frequency: Option<EffectFrequency>,
    alcohol_concern: Option<ConcernLevel>,
    improvement_areas: BTreeSet<ImprovementArea>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            goals: BTreeSet::new(),
            primary_goal: None,
            drinks_per_day: DrinksPerDay::default(),
            spend_per_drink: DEFAULT_SPEND_PER_DRINK,
            ideal_outcome: None,
            effect_frequency: None,
            alcohol_concern: None,
            improvement_areas: BTreeSet::new(),
        }
    }
}

impl SessionState {
    pub fn goals(&self) -> &BTreeSet<String> {
        &self.goals
    }

    pub fn is_goal_selected(&self, goal: &str) -> bool {
        self.goals.contains(goal)
    }

    /// Select the goal if absent, deselect it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle_goal(&mut self, goal: &str) -> bool {
        if self.goals.remove(goal) {
            false
        } else {
            self.goals.insert(goal.to_string());
            true
        }
    }

    pub fn primary_goal(&self) -> Option<&str> {
        self.primary_goal.as_deref()
    }

    pub fn set_primary_goal(&mut self, goal: impl Into<String>) {
        self.primary_goal = Some(goal.into());
    }

    pub fn drinks_per_day(&self) -> &DrinksPerDay {
        &self.drinks_per_day
    }

    pub fn set_drinks(&mut self, day: Weekday, count: u32) {
        self.drinks_per_day.set(day, count);
    }

    pub fn spend_per_drink(&self) -> f64 {
        self.spend_per_drink
    }

    pub fn set_spend_per_drink(&mut self, amount: f64) {
        self.spend_per_drink = amount.max(0.0);
    }

    pub fn ideal_outcome(&self) -> Option<IdealOutcome> {
        self.ideal_outcome
    }

    pub fn set_ideal_outcome(&mut self, outcome: IdealOutcome) {
        self.ideal_outcome = Some(outcome);
    }

    pub fn effect_frequency(&self) -> Option<EffectFrequency> {
        self.effect_frequency
    }

    pub fn set_effect_frequency(&mut self, frequency: EffectFrequency) {
        self.effect_frequency = Some(frequency);
    }

    pub fn alcohol_concern(&self) -> Option<ConcernLevel> {
        self.alcohol_concern
    }

    pub fn set_alcohol_concern(&mut self, level: ConcernLevel) {
        self.alcohol_concern = Some(level);
    }

    pub fn improvement_areas(&self) -> &BTreeSet<ImprovementArea> {
        &self.improvement_areas
    }

    pub fn set_improvement_areas(&mut self, areas: BTreeSet<ImprovementArea>) {
        self.improvement_areas = areas;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekday_lookup_is_case_insensitive() {
        assert_eq!(Weekday::from_name("monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_name("SUNDAY"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_name("Funday"), None);
    }

    #[test]
    fn drinks_serialize_as_named_weekday_map() {
        let mut drinks = DrinksPerDay::default();
        drinks.set(Weekday::Friday, 4);

        let value = serde_json::to_value(&drinks).unwrap();
        assert_eq!(
            value,
            json!({
                "Monday": 0, "Tuesday": 0, "Wednesday": 0, "Thursday": 0,
                "Friday": 4, "Saturday": 0, "Sunday": 0,
            })
        );
    }

    #[test]
    fn backend_map_accepts_numeric_strings() {
        let map = json!({ "Monday": "2", "Saturday": 5, "Holiday": 9 });
        let drinks = DrinksPerDay::from_backend(map.as_object().unwrap());

        assert_eq!(drinks.get(Weekday::Monday), 2);
        assert_eq!(drinks.get(Weekday::Saturday), 5);
        assert_eq!(drinks.total(), 7);
        assert_eq!(drinks.dry_days(), 5);
    }

    #[test]
    fn oversized_backend_counts_are_capped() {
        let map = json!({ "Monday": 5e9, "Tuesday": 5e9, "Friday": "1e12" });
        let drinks = DrinksPerDay::from_backend(map.as_object().unwrap());

        assert_eq!(drinks.get(Weekday::Monday), MAX_DRINKS_PER_DAY);
        assert_eq!(drinks.get(Weekday::Friday), MAX_DRINKS_PER_DAY);
        assert_eq!(drinks.total(), 3 * MAX_DRINKS_PER_DAY);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let mut drinks = DrinksPerDay::default();
        drinks.set(Weekday::Monday, u32::MAX);
        drinks.set(Weekday::Tuesday, 1);
        assert_eq!(drinks.total(), u32::MAX);
    }

    #[test]
    fn negative_spend_is_clamped() {
        let mut session = SessionState::default();
        session.set_spend_per_drink(-3.0);
        assert_eq!(session.spend_per_drink(), 0.0);
    }
}
