use anyhow::Result;
use colored::*;

use crate::onboarding::{Section, Step};

/// Print the ordered step list with sections and backend endpoints
pub fn steps_command() -> Result<()> {
    println!("{}", "Questionnaire steps".bold());
    println!("{}", "===================".bold());

    let mut section: Option<Section> = None;
    for step in Step::ALL {
        if section != Some(step.section()) {
            section = Some(step.section());
            println!("\n{}", step.section().label().bright_blue().bold());
        }

        let mut line = format!("  {:>2}  {:<18}", step.index(), step.to_string());
        if let Some(path) = step.save_endpoint() {
            line.push_str(&format!(" {} {}", "POST".bright_green(), path));
        }
        if let Some(path) = step.fetch_endpoint() {
            line.push_str(&format!(" {} {}", "GET".bright_cyan(), path));
        }
        println!("{}", line);
    }

    println!(
        "\n  {:>2}  {}",
        Step::COUNT,
        "Complete (local recap)".dimmed()
    );
    Ok(())
}
