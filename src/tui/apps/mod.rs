pub mod onboarding;

pub use onboarding::{Onboarding, OnboardingFlags};
