use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::io::{self, Write};

use crate::{
    rewards::calculator::{Allocation, MentorReward},
    utils,
};

/// Serializable summary of an allocation run
#[derive(Debug, Clone, Serialize)]
pub struct RewardReport {
    pub currency: String,
    pub reward_per_project: u64,
    pub total_received: u64,
    pub eligible_projects: usize,
    pub participating_projects: usize,
    pub per_project_share: f64,
    pub mentors: Vec<MentorReward>,
    pub total_rewarded: u64,
    pub leftover: u64,
    pub forfeited_projects: Vec<String>,
    pub ineligible_projects: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl RewardReport {
    pub fn from_allocation(allocation: &Allocation, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            reward_per_project: allocation.reward_per_project,
            total_received: allocation.total_received,
            eligible_projects: allocation.eligible_projects,
            participating_projects: allocation.participating_projects,
            per_project_share: allocation.per_project_share(),
            mentors: allocation.rewards.clone(),
            total_rewarded: allocation.total_rewarded(),
            leftover: allocation.leftover(),
            forfeited_projects: allocation.forfeited_projects.clone(),
            ineligible_projects: allocation.ineligible_projects.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report: summary lines, one row per mentor, then the leftover
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", "=== GSoC Mentor Rewards ===".cyan().bold())?;
        writeln!(
            out,
            "Total reward received:        {}",
            utils::format_amount(self.total_received, &self.currency)
        )?;
        writeln!(out, "Projects that receive reward: {}", self.participating_projects)?;
        writeln!(
            out,
            "Reward per project:           {}",
            utils::format_share(self.per_project_share, &self.currency)
        )?;

        if !self.forfeited_projects.is_empty() {
            writeln!(
                out,
                "Forfeited (no mentor accepts): {}",
                self.forfeited_projects.join(", ").yellow()
            )?;
        }
        if !self.ineligible_projects.is_empty() {
            writeln!(
                out,
                "Not funded:                   {}",
                self.ineligible_projects.join(", ").dimmed()
            )?;
        }

        writeln!(out)?;
        utils::write_table_border(out, 60)?;
        utils::write_table_row(out, &["Mentor".normal(), "Reward".normal()], &[40, 18])?;
        utils::write_table_border(out, 60)?;
        for mentor in &self.mentors {
            utils::write_table_row(
                out,
                &[
                    mentor.name.as_str().normal(),
                    utils::format_amount(mentor.amount, &self.currency),
                ],
                &[40, 18],
            )?;
        }
        utils::write_table_border(out, 60)?;

        writeln!(
            out,
            "\n(leftover): {}",
            utils::format_amount(self.leftover, &self.currency)
        )
    }
}
