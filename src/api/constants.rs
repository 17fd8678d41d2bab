//! Backend endpoints used by the onboarding questionnaire

/// Production backend
pub const DEFAULT_BASE_URL: &str = "https://healthapp-backend-i5i6.onrender.com";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("healthapp-onboarding/", env!("CARGO_PKG_VERSION"));

/// Endpoint paths, relative to the base URL
pub mod paths {
    pub const GOALS: &str = "/api/goals";
    pub const PRIMARY_GOAL: &str = "/api/primary-goal";
    pub const SAVE_IDEAL_OUTCOME: &str = "/api/save-ideal-outcome";
    pub const SAVE_DRINKS: &str = "/api/save-drinks";
    pub const SAVE_SPEND: &str = "/api/save-spend";
    pub const SAVE_ALCOHOL_CONCERN: &str = "/api/save-alcohol-concern";
    pub const SAVE_ALCOHOL_FREQUENCY: &str = "/api/save-alcohol-frequency";
    pub const SAVE_IMPROVEMENT_AREAS: &str = "/api/save-alcohol-improvement-areas";

    pub const USER_SELECTIONS: &str = "/api/user-selections";
    pub const WEEKLY_SPEND: &str = "/api/weekly-spend";
    pub const TOTAL_DRINKS: &str = "/api/total-drinks";
    pub const DRINKS_PER_DAY: &str = "/api/drinks-per-day";
    pub const GET_IDEAL_OUTCOME: &str = "/api/get-ideal-outcome";
}

/// Join a configured base URL and an endpoint path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            endpoint("http://localhost:3000/", paths::GOALS),
            "http://localhost:3000/api/goals"
        );
        assert_eq!(
            endpoint(DEFAULT_BASE_URL, paths::SAVE_SPEND),
            "https://healthapp-backend-i5i6.onrender.com/api/save-spend"
        );
    }
}
