use std::fmt;

/// Progress sections shown in the strip at the top of every view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Goals,
    Habits,
    About,
    Plan,
    Start,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Goals,
        Section::Habits,
        Section::About,
        Section::Plan,
        Section::Start,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Goals => "Goals",
            Section::Habits => "Habits",
            Section::About => "About",
            Section::Plan => "Plan",
            Section::Start => "Start",
        }
    }
}

/// The defined questionnaire steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Intro,
    Goals,
    PrimaryGoal,
    FocusGoal,
    GoalScience,
    GoalOutcome,
    IdealOutcome,
    PlanSet,
    GoalsComplete,
    HabitsIntro,
    HabitsDetail,
    DrinksPerDay,
    WeeklySummary,
    SpendPerDrink,
    WeeklySpend,
    EffectFrequency,
    AlcoholConcern,
    ImprovementAreas,
    WeeklyReduction,
    HabitsComplete,
}

impl Step {
    pub const ALL: [Step; 20] = [
        Step::Intro,
        Step::Goals,
        Step::PrimaryGoal,
        Step::FocusGoal,
        Step::GoalScience,
        Step::GoalOutcome,
        Step::IdealOutcome,
        Step::PlanSet,
        Step::GoalsComplete,
        Step::HabitsIntro,
        Step::HabitsDetail,
        Step::DrinksPerDay,
        Step::WeeklySummary,
        Step::SpendPerDrink,
        Step::WeeklySpend,
        Step::EffectFrequency,
        Step::AlcoholConcern,
        Step::ImprovementAreas,
        Step::WeeklyReduction,
        Step::HabitsComplete,
    ];

    /// Number of defined steps. The sequencer index runs from 0 to this
    /// value inclusive, the last index being the completion state.
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Intro => "Welcome",
            Step::Goals
            | Step::PrimaryGoal
            | Step::FocusGoal
            | Step::GoalScience
            | Step::GoalOutcome => "Your Goals",
            Step::IdealOutcome => "Your Ideal Outcome",
            Step::PlanSet => "Your Plan",
            Step::GoalsComplete => "Goals Complete",
            Step::HabitsComplete => "Habits Complete",
            _ => "Your Habits",
        }
    }

    pub fn section(self) -> Section {
        if self.index() <= Step::GoalsComplete.index() {
            Section::Goals
        } else {
            Section::Habits
        }
    }

    /// Backend endpoint this step writes to, if any
    pub fn save_endpoint(self) -> Option<&'static str> {
        use crate::api::constants::paths;
        match self {
            Step::Goals => Some(paths::GOALS),
            Step::PrimaryGoal => Some(paths::PRIMARY_GOAL),
            Step::IdealOutcome => Some(paths::SAVE_IDEAL_OUTCOME),
            Step::DrinksPerDay => Some(paths::SAVE_DRINKS),
            Step::SpendPerDrink => Some(paths::SAVE_SPEND),
            Step::EffectFrequency => Some(paths::SAVE_ALCOHOL_FREQUENCY),
            Step::AlcoholConcern => Some(paths::SAVE_ALCOHOL_CONCERN),
            Step::ImprovementAreas => Some(paths::SAVE_IMPROVEMENT_AREAS),
            _ => None,
        }
    }

    /// Backend endpoint this step reads from when it is entered, if any
    pub fn fetch_endpoint(self) -> Option<&'static str> {
        use crate::api::constants::paths;
        match self {
            Step::FocusGoal | Step::GoalScience | Step::GoalOutcome => Some(paths::USER_SELECTIONS),
            Step::PlanSet => Some(paths::GET_IDEAL_OUTCOME),
            Step::WeeklySummary => Some(paths::DRINKS_PER_DAY),
            Step::WeeklySpend => Some(paths::WEEKLY_SPEND),
            Step::WeeklyReduction => Some(paths::TOTAL_DRINKS),
            _ => None,
        }
    }

    /// Dialog text for a failed save. Steps without one only log the failure.
    pub fn save_failure_alert(self) -> Option<&'static str> {
        match self {
            Step::Goals => Some("There was a problem saving your selection. Please try again."),
            Step::PrimaryGoal => Some("There was a problem saving your goal."),
            Step::IdealOutcome => Some("Failed to save your choice. Please try again."),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_declaration_order() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::from_index(Step::COUNT), None);
    }

    #[test]
    fn sections_split_after_goals_complete() {
        assert_eq!(Step::GoalsComplete.section(), Section::Goals);
        assert_eq!(Step::HabitsIntro.section(), Section::Habits);
        assert_eq!(Step::HabitsComplete.section(), Section::Habits);
    }

    #[test]
    fn only_goal_choices_alert_on_failed_save() {
        assert_eq!(
            Step::PrimaryGoal.save_failure_alert(),
            Some("There was a problem saving your goal.")
        );
        assert_eq!(
            Step::IdealOutcome.save_failure_alert(),
            Some("Failed to save your choice. Please try again.")
        );
        assert_ne!(Step::Goals.save_failure_alert(), Step::PrimaryGoal.save_failure_alert());
        assert_eq!(Step::DrinksPerDay.save_failure_alert(), None);
    }
}
