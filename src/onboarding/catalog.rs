//! Option lists and per-goal lookups shown by the questionnaire views.

use serde::{Deserialize, Serialize};

/// How a goal metric moves as total drinks go down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The metric falls with drinking (hangovers, weight)
    Direct,
    /// The metric rises as drinking falls (sleep, savings)
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalInfo {
    /// String the backend stores for this goal
    pub key: &'static str,
    pub label: &'static str,
    pub focus_area: &'static str,
    pub relation: Relation,
    pub science_topic: &'static str,
    pub outcome_message: &'static str,
}

pub const GOALS: [GoalInfo; 10] = [
    GoalInfo {
        key: "Improve health and Wellness",
        label: "Improve Health and Wellness",
        focus_area: "Overall Health",
        relation: Relation::Inverse,
        science_topic: "Overall Health",
        outcome_message: "Resulting in a happier, healthier you.",
    },
    GoalInfo {
        key: "Slow Down Effects of Aging",
        label: "Slow Down Effects of Aging",
        focus_area: "Effects of Aging",
        relation: Relation::Direct,
        science_topic: "Slow Down Effects of Aging",
        outcome_message: "Allowing you to age gracefully, with lower impact on your health.",
    },
    GoalInfo {
        key: "Lose Weight and Improve Fitness",
        label: "Lose Weight and Improve Fitness",
        focus_area: "Weight",
        relation: Relation::Direct,
        science_topic: "Lose Weight and Improve Fitness",
        outcome_message: "Helping you reach your weight and fitness goals.",
    },
    GoalInfo {
        key: "Improve Sleep Quality",
        label: "Improve Sleep Quality",
        focus_area: "Sleep Quality",
        relation: Relation::Inverse,
        science_topic: "Improve Sleep Quality",
        outcome_message: "Resulting in deeper, more restful sleep.",
    },
    GoalInfo {
        key: "Avoid Hangovers",
        label: "Avoid Hangovers",
        focus_area: "Hangovers",
        relation: Relation::Direct,
        science_topic: "Avoid Hangovers",
        outcome_message: "Resulting in fewer next day effects, and brighter, more productive days.",
    },
    GoalInfo {
        key: "Stop Blacking or Graying Out",
        label: "Stop Blacking or Graying Out",
        focus_area: "Impact on Memory",
        relation: Relation::Direct,
        science_topic: "Stop Blacking or Graying Out",
        outcome_message: "Resulting in lower impact to memory, and brighter, more productive days.",
    },
    GoalInfo {
        key: "Save Money",
        label: "Save Money",
        focus_area: "Dollars Saved",
        relation: Relation::Inverse,
        science_topic: "Save Money",
        outcome_message: "Resulting in less money spent on alcohol, and more dollars in your pocket.",
    },
    GoalInfo {
        key: "Find healthier Coping Strategies",
        label: "Find Healthier Coping Strategies",
        focus_area: "Emotional Resilience",
        relation: Relation::Inverse,
        science_topic: "Find Healthier Coping Strategies",
        outcome_message: "Resulting in less reliance on alcohol for coping, and healthier strategies in its place.",
    },
    GoalInfo {
        key: "Reduce Stress and Anxietyy",
        label: "Reduce Stress and Anxiety",
        focus_area: "Stress & Anxiety",
        relation: Relation::Direct,
        science_topic: "Reduce Stress and Anxiety",
        outcome_message: "Resulting in lower stress and anxiety, and improved overall mental health.",
    },
    GoalInfo {
        key: "Improve Relationships",
        label: "Improve Relationships",
        focus_area: "Relationship Quality",
        relation: Relation::Inverse,
        science_topic: "Improve Relationships",
        outcome_message: "Resulting in healthier relationships with the people who matter to you.",
    },
];

/// Topic used when the stored goal is unknown or could not be fetched
pub const DEFAULT_SCIENCE_TOPIC: &str = "Overall Health";

/// Looks a goal up by its backend key or its display label
pub fn goal_info(name: &str) -> Option<&'static GoalInfo> {
    GOALS
        .iter()
        .find(|goal| goal.key == name || goal.label.eq_ignore_ascii_case(name))
}

pub fn science_topic(goal: Option<&str>) -> &'static str {
    goal.and_then(goal_info)
        .map(|info| info.science_topic)
        .unwrap_or(DEFAULT_SCIENCE_TOPIC)
}

/// One-paragraph research summary for a goal topic
pub fn science_summary(topic: &str) -> &'static str {
    match topic {
        "Slow Down Effects of Aging" => "Reducing alcohol consumption can benefit biological aging by decreasing cellular damage caused by alcohol.",
        "Lose Weight and Improve Fitness" => "Alcohol is high in calories and sugar. Drinking less can improve metabolism and lead to healthier dietary habits.",
        "Improve Sleep Quality" => "Alcohol disrupts the natural sleep cycle, particularly REM sleep. Drinking more mindfully should reduce that impact.",
        "Avoid Hangovers" => "Drinking less overall lowers the risk of dehydration, low blood sugar and inflammation the next day.",
        "Stop Blacking or Graying Out" => "Healthier habits on drinking days avoid rapid spikes in BAC associated with memory loss.",
        "Save Money" => "A healthier relationship with alcohol reduces direct spending and avoids external costs like poor purchase decisions.",
        "Find Healthier Coping Strategies" => "Reducing alcohol intake creates room for positive coping mechanisms such as seeking social support.",
        "Reduce Stress and Anxiety" => "Alcohol itself can act as a stressor. Mood tends to stabilise as alcohol-induced stressors are removed.",
        "Improve Relationships" => "Lower consumption is linked to better emotional regulation and healthier interactions with others.",
        _ => "Lower alcohol consumption is linked with improved sleep, brain function and mental health, and a reduced risk of long-term conditions.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdealOutcome {
    DrinkLess,
    CompleteZero,
    NotSure,
}

impl IdealOutcome {
    pub const ALL: [IdealOutcome; 3] = [
        IdealOutcome::DrinkLess,
        IdealOutcome::CompleteZero,
        IdealOutcome::NotSure,
    ];

    /// Identifier stored by the backend
    pub fn id(self) -> u8 {
        match self {
            IdealOutcome::DrinkLess => 1,
            IdealOutcome::CompleteZero => 2,
            IdealOutcome::NotSure => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|outcome| outcome.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            IdealOutcome::DrinkLess => "Drink Less",
            IdealOutcome::CompleteZero => "Complete Zero",
            IdealOutcome::NotSure => "I'm not sure yet",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            IdealOutcome::DrinkLess => "I'd like to continue drinking, but with healthier habits.",
            IdealOutcome::CompleteZero => "I eventually want to cut alcohol out entirely.",
            IdealOutcome::NotSure => "I know I want to make a change, but I'm not sure where it'll take me.",
        }
    }

    pub fn plan_prompt(self) -> &'static str {
        match self {
            IdealOutcome::DrinkLess => "Great! We'll design your plan around drinking less without quitting entirely.",
            IdealOutcome::CompleteZero => "Great! We'll design your plan around eventually cutting alcohol out entirely.",
            IdealOutcome::NotSure => "No worries! We'll start your plan with a gradual reduction in drinks, and can determine next steps from there.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectFrequency {
    LessThanMonthly,
    MonthlyOnceOrTwice,
    WeeklyOnceOrTwice,
    WeeklyThreeOrFour,
    Daily,
}

impl EffectFrequency {
    pub const ALL: [EffectFrequency; 5] = [
        EffectFrequency::LessThanMonthly,
        EffectFrequency::MonthlyOnceOrTwice,
        EffectFrequency::WeeklyOnceOrTwice,
        EffectFrequency::WeeklyThreeOrFour,
        EffectFrequency::Daily,
    ];

    /// Label shown to the user and sent to the backend verbatim
    pub fn label(self) -> &'static str {
        match self {
            EffectFrequency::LessThanMonthly => "Less than once a month",
            EffectFrequency::MonthlyOnceOrTwice => "1-2 times per month",
            EffectFrequency::WeeklyOnceOrTwice => "1-2 times per week",
            EffectFrequency::WeeklyThreeOrFour => "3-4 times per week",
            EffectFrequency::Daily => "Daily or almost daily",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConcernLevel {
    Never,
    Rarely,
    Occasionally,
    Frequently,
    Constantly,
}

impl ConcernLevel {
    pub const ALL: [ConcernLevel; 5] = [
        ConcernLevel::Never,
        ConcernLevel::Rarely,
        ConcernLevel::Occasionally,
        ConcernLevel::Frequently,
        ConcernLevel::Constantly,
    ];

    /// 1 (never) through 5 (constantly)
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            ConcernLevel::Never => "Never Concerned",
            ConcernLevel::Rarely => "Rarely Concerned",
            ConcernLevel::Occasionally => "Occasionally Concerned",
            ConcernLevel::Frequently => "Frequently Concerned",
            ConcernLevel::Constantly => "Constantly Concerned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementArea {
    Frequency,
    Moderation,
    Intensity,
    Monitoring,
}

impl ImprovementArea {
    pub const ALL: [ImprovementArea; 4] = [
        ImprovementArea::Frequency,
        ImprovementArea::Moderation,
        ImprovementArea::Intensity,
        ImprovementArea::Monitoring,
    ];

    /// Key sent to the backend
    pub fn key(self) -> &'static str {
        match self {
            ImprovementArea::Frequency => "frequency",
            ImprovementArea::Moderation => "moderation",
            ImprovementArea::Intensity => "intensity",
            ImprovementArea::Monitoring => "monitoring",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ImprovementArea::Frequency => "Frequency",
            ImprovementArea::Moderation => "Moderation",
            ImprovementArea::Intensity => "Intensity",
            ImprovementArea::Monitoring => "Monitoring",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImprovementArea::Frequency => "Drink fewer days of the week.",
            ImprovementArea::Moderation => "Have fewer drinks per typical drinking day.",
            ImprovementArea::Intensity => "Avoid/eliminate unusually heavy drinking days.",
            ImprovementArea::Monitoring => "Keep tabs on my total consumption.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_goal_falls_back_to_overall_health() {
        assert_eq!(science_topic(None), DEFAULT_SCIENCE_TOPIC);
        assert_eq!(science_topic(Some("Learn Juggling")), DEFAULT_SCIENCE_TOPIC);
        assert_eq!(science_topic(Some("Save Money")), "Save Money");
    }

    #[test]
    fn goals_resolve_by_backend_key_or_label() {
        let stress = goal_info("Reduce Stress and Anxietyy").unwrap();
        assert_eq!(stress.label, "Reduce Stress and Anxiety");
        assert_eq!(goal_info("reduce stress and anxiety"), Some(stress));
        assert_eq!(
            goal_info("Improve Health and Wellness").map(|goal| goal.key),
            Some("Improve health and Wellness")
        );
        assert_eq!(
            science_topic(Some("Find healthier Coping Strategies")),
            "Find Healthier Coping Strategies"
        );
    }

    #[test]
    fn outcome_ids_are_one_based() {
        assert_eq!(IdealOutcome::from_id(1), Some(IdealOutcome::DrinkLess));
        assert_eq!(IdealOutcome::from_id(3), Some(IdealOutcome::NotSure));
        assert_eq!(IdealOutcome::from_id(0), None);
        assert_eq!(IdealOutcome::from_id(4), None);
    }

    #[test]
    fn concern_levels_span_one_to_five() {
        let values: Vec<u8> = ConcernLevel::ALL.iter().map(|level| level.value()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}
