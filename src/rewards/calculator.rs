use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, RewardError},
    rewards::types::Project,
};

/// Rounded reward owed to a single mentor
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MentorReward {
    pub name: String,
    /// Whole currency units actually paid out
    pub amount: u64,
    /// Accumulated reward before flooring
    pub exact: f64,
}

/// Outcome of splitting the received sponsorship money among mentors
#[derive(Debug, Clone)]
pub struct Allocation {
    pub reward_per_project: u64,
    pub total_received: u64,
    pub eligible_projects: usize,
    pub participating_projects: usize,
    /// Eligible projects whose mentors all declined the reward
    pub forfeited_projects: Vec<String>,
    pub ineligible_projects: Vec<String>,
    /// Sorted by descending amount, then ascending name
    pub rewards: Vec<MentorReward>,
}

impl Allocation {
    /// Split `reward_per_project` for every eligible project evenly among the
    /// participating projects, then evenly among each project's
    /// reward-accepting mentors.
    ///
    /// Shares are accumulated as exact fractions over a common denominator
    /// (participating projects times the lcm of recipient counts), so the
    /// floor taken at the end is never off by a float rounding error.
    pub fn calculate(projects: &[Project], reward_per_project: u64) -> Result<Self> {
        let eligible: Vec<&Project> = projects.iter().filter(|p| p.eligible).collect();
        let ineligible_projects: Vec<String> = projects
            .iter()
            .filter(|p| !p.eligible)
            .map(|p| p.name.clone())
            .collect();

        let total_received = reward_per_project
            .checked_mul(eligible.len() as u64)
            .ok_or(RewardError::ArithmeticOverflow)?;

        let (participating, forfeited): (Vec<&Project>, Vec<&Project>) =
            eligible.iter().copied().partition(|p| p.is_participating());

        debug!(
            "{} projects, {} eligible, {} participating, {} received",
            projects.len(),
            eligible.len(),
            participating.len(),
            total_received
        );

        if participating.is_empty() {
            return Err(RewardError::NoParticipants(format!(
                "none of the {} eligible projects has a mentor accepting the reward",
                eligible.len()
            )));
        }

        let mut lcm: u128 = 1;
        for project in &participating {
            let recipients = project.reward_recipients().count() as u128;
            if recipients == 0 {
                return Err(RewardError::NoParticipants(format!(
                    "project '{}' has no mentor accepting the reward",
                    project.name
                )));
            }
            lcm = checked_lcm(lcm, recipients)?;
        }

        let denominator = (participating.len() as u128)
            .checked_mul(lcm)
            .ok_or(RewardError::ArithmeticOverflow)?;

        // Numerators over `denominator`, keyed by mentor name
        let mut ledger: HashMap<&str, u128> = HashMap::new();

        for project in &participating {
            warn_on_duplicate_mentors(project);

            let recipients = project.reward_recipients().count() as u128;
            let units = (total_received as u128)
                .checked_mul(lcm / recipients)
                .ok_or(RewardError::ArithmeticOverflow)?;

            for mentor in project.reward_recipients() {
                let entry = ledger.entry(mentor.name.as_str()).or_insert(0);
                *entry = entry
                    .checked_add(units)
                    .ok_or(RewardError::ArithmeticOverflow)?;
            }
        }

        let mut rewards: Vec<MentorReward> = ledger
            .into_iter()
            .map(|(name, numerator)| MentorReward {
                name: name.to_string(),
                // Bounded by total_received, so it always fits
                amount: (numerator / denominator) as u64,
                exact: numerator as f64 / denominator as f64,
            })
            .collect();

        rewards.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));

        let allocation = Self {
            reward_per_project,
            total_received,
            eligible_projects: eligible.len(),
            participating_projects: participating.len(),
            forfeited_projects: forfeited.iter().map(|p| p.name.clone()).collect(),
            ineligible_projects,
            rewards,
        };

        info!(
            "Allocated {} of {} to {} mentors (leftover {})",
            allocation.total_rewarded(),
            allocation.total_received,
            allocation.rewards.len(),
            allocation.leftover()
        );

        Ok(allocation)
    }

    /// Share of the pool each participating project receives
    pub fn per_project_share(&self) -> f64 {
        self.total_received as f64 / self.participating_projects as f64
    }

    pub fn total_rewarded(&self) -> u64 {
        self.rewards.iter().map(|r| r.amount).sum()
    }

    /// Money lost to flooring individual rewards
    pub fn leftover(&self) -> u64 {
        self.total_received - self.total_rewarded()
    }

    pub fn reward_for(&self, mentor: &str) -> Option<u64> {
        self.rewards
            .iter()
            .find(|r| r.name == mentor)
            .map(|r| r.amount)
    }
}

fn warn_on_duplicate_mentors(project: &Project) {
    let mut seen = HashSet::new();
    for mentor in &project.mentors {
        if !seen.insert(mentor.name.as_str()) {
            warn!(
                "Mentor '{}' is listed more than once in project '{}'",
                mentor.name, project.name
            );
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn checked_lcm(a: u128, b: u128) -> Result<u128> {
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(RewardError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::types::Mentor;

    fn project(name: &str, mentors: &[(&str, bool)]) -> Project {
        Project::new(
            name,
            mentors
                .iter()
                .map(|(n, accepts)| Mentor::new(*n, *accepts))
                .collect(),
        )
    }

    #[test]
    fn test_single_project_with_declining_mentor() {
        let projects = vec![project("p1", &[("A", true), ("B", false)])];
        let allocation = Allocation::calculate(&projects, 500).unwrap();

        assert_eq!(allocation.total_received, 500);
        assert_eq!(allocation.participating_projects, 1);
        assert_eq!(allocation.per_project_share(), 500.0);
        assert_eq!(allocation.reward_for("A"), Some(500));
        assert_eq!(allocation.reward_for("B"), None);
        assert_eq!(allocation.leftover(), 0);
    }

    #[test]
    fn test_forfeited_share_is_redistributed() {
        let projects = vec![
            project("p1", &[("A", true)]),
            project("p2", &[("B", false)]),
        ];
        let allocation = Allocation::calculate(&projects, 500).unwrap();

        assert_eq!(allocation.total_received, 1000);
        assert_eq!(allocation.eligible_projects, 2);
        assert_eq!(allocation.participating_projects, 1);
        assert_eq!(allocation.per_project_share(), 1000.0);
        assert_eq!(allocation.reward_for("A"), Some(1000));
        assert_eq!(allocation.forfeited_projects, vec!["p2".to_string()]);
        assert_eq!(allocation.leftover(), 0);
    }

    #[test]
    fn test_no_participants() {
        let projects = vec![
            project("p1", &[("A", false)]),
            project("p2", &[("B", false), ("C", false)]),
        ];
        let result = Allocation::calculate(&projects, 500);
        assert!(matches!(result, Err(RewardError::NoParticipants(_))));

        let empty: Vec<Project> = Vec::new();
        assert!(matches!(
            Allocation::calculate(&empty, 500),
            Err(RewardError::NoParticipants(_))
        ));
    }

    #[test]
    fn test_ineligible_project_contributes_nothing() {
        let projects = vec![
            project("p1", &[("A", true)]),
            project("p2", &[("B", true)]).ineligible(),
        ];
        let allocation = Allocation::calculate(&projects, 500).unwrap();

        assert_eq!(allocation.total_received, 500);
        assert_eq!(allocation.participating_projects, 1);
        assert_eq!(allocation.reward_for("A"), Some(500));
        assert_eq!(allocation.reward_for("B"), None);
        assert_eq!(allocation.ineligible_projects, vec!["p2".to_string()]);
    }

    #[test]
    fn test_only_ineligible_participants_is_an_error() {
        let projects = vec![
            project("p1", &[("A", false)]),
            project("p2", &[("B", true)]).ineligible(),
        ];
        assert!(matches!(
            Allocation::calculate(&projects, 500),
            Err(RewardError::NoParticipants(_))
        ));
    }

    #[test]
    fn test_declining_mentor_does_not_dilute_share() {
        let with_decliner = vec![project("p1", &[("A", true), ("B", false), ("C", true)])];
        let without = vec![project("p1", &[("A", true), ("C", true)])];

        let a = Allocation::calculate(&with_decliner, 500).unwrap();
        let b = Allocation::calculate(&without, 500).unwrap();

        assert_eq!(a.reward_for("A"), Some(250));
        assert_eq!(a.reward_for("C"), Some(250));
        assert_eq!(a.rewards, b.rewards);
    }

    #[test]
    fn test_rewards_accumulate_across_projects() {
        let projects = vec![
            project("p1", &[("A", true), ("B", true)]),
            project("p2", &[("A", true)]),
        ];
        let allocation = Allocation::calculate(&projects, 500).unwrap();

        assert_eq!(allocation.reward_for("A"), Some(750));
        assert_eq!(allocation.reward_for("B"), Some(250));
        assert_eq!(allocation.rewards[0].name, "A");
    }

    #[test]
    fn test_flooring_and_leftover() {
        let projects = vec![project("p1", &[("A", true), ("B", true), ("C", true)])];
        let allocation = Allocation::calculate(&projects, 500).unwrap();

        for reward in &allocation.rewards {
            assert_eq!(reward.amount, 166);
            assert!((reward.exact - 500.0 / 3.0).abs() < 1e-9);
        }
        assert_eq!(allocation.total_rewarded(), 498);
        assert_eq!(allocation.leftover(), 2);
    }

    #[test]
    fn test_exact_thirds_sum_to_whole_amount() {
        // Three projects of 1000/3 each: a float accumulation can land just below 1000
        let projects = vec![
            project("p1", &[("A", true)]),
            project("p2", &[("A", true)]),
            project("p3", &[("A", true)]),
        ];
        let allocation = Allocation::calculate(&projects, 1000).unwrap();
        assert_eq!(allocation.reward_for("A"), Some(3000));

        let projects = vec![
            project("p1", &[("A", true), ("B", true), ("C", true)]),
            project("p2", &[("A", true), ("B", true), ("C", true)]),
            project("p3", &[("A", true), ("B", true), ("C", true)]),
        ];
        let allocation = Allocation::calculate(&projects, 100).unwrap();
        assert_eq!(allocation.reward_for("A"), Some(100));
        assert_eq!(allocation.leftover(), 0);
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let projects = vec![project("p1", &[("Zed", true), ("Amy", true), ("Bob", true)])];
        let allocation = Allocation::calculate(&projects, 300).unwrap();

        let names: Vec<&str> = allocation.rewards.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Bob", "Zed"]);
    }

    #[test]
    fn test_overflow_is_reported() {
        let projects = vec![project("p1", &[("A", true)]), project("p2", &[("B", true)])];
        assert!(matches!(
            Allocation::calculate(&projects, u64::MAX),
            Err(RewardError::ArithmeticOverflow)
        ));
    }

    #[test]
    fn test_invariants_over_generated_rosters() {
        // Small deterministic LCG so every run checks the same rosters
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = |bound: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % bound
        };
        let names = ["Ana", "Ben", "Cy", "Dee", "Eli", "Fay", "Gus"];

        for _ in 0..200 {
            let project_count = 1 + next(6) as usize;
            let mut projects = Vec::new();
            for i in 0..project_count {
                let mut mentors = Vec::new();
                for name in names.iter() {
                    if next(3) == 0 {
                        mentors.push(Mentor::new(*name, next(4) != 0));
                    }
                }
                let mut p = Project::new(format!("p{}", i), mentors);
                if next(5) == 0 {
                    p = p.ineligible();
                }
                projects.push(p);
            }
            let reward_per_project = 1 + next(1000);

            let allocation = match Allocation::calculate(&projects, reward_per_project) {
                Ok(a) => a,
                Err(RewardError::NoParticipants(_)) => {
                    assert!(!projects.iter().any(|p| p.is_participating()));
                    continue;
                }
                Err(e) => panic!("unexpected error: {}", e),
            };

            let eligible = projects.iter().filter(|p| p.eligible).count() as u64;
            assert_eq!(allocation.total_received, reward_per_project * eligible);
            assert_eq!(
                allocation.total_rewarded() + allocation.leftover(),
                allocation.total_received
            );
            assert!(allocation.leftover() < allocation.rewards.len() as u64);

            for pair in allocation.rewards.windows(2) {
                assert!(
                    pair[0].amount > pair[1].amount
                        || (pair[0].amount == pair[1].amount && pair[0].name < pair[1].name)
                );
            }

            for reward in &allocation.rewards {
                assert!(projects
                    .iter()
                    .filter(|p| p.is_participating())
                    .any(|p| p.reward_recipients().any(|m| m.name == reward.name)));
            }
        }
    }
}
