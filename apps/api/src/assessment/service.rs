//! Runs the scoring engine over every generated job and folds the results
//! into what the dashboard and scheme pages show.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::advisor::JobRequirementSet;
use crate::scoring::{round2, ScoringEngine, UserSkillSet};

/// One dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobGapResult {
    pub job: String,
    pub score: f64,
    /// `100 - score`
    pub gap: f64,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub results: Vec<JobGapResult>,
    /// Union of every job's missing skills, sorted and deduplicated.
    pub missing_skills: Vec<String>,
}

pub fn assess(engine: &ScoringEngine, user_skills: &UserSkillSet, jobs: &JobRequirementSet) -> Assessment {
    let mut results = Vec::with_capacity(jobs.len());
    let mut all_missing = BTreeSet::new();

    for (job, requirement) in jobs.iter() {
        let result = engine.score(user_skills, requirement);
        all_missing.extend(result.missing.iter().cloned());
        results.push(JobGapResult {
            job: job.to_string(),
            score: result.score,
            gap: round2(100.0 - result.score),
            missing: result.missing,
        });
    }

    Assessment {
        results,
        missing_skills: all_missing.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(raw: &str) -> JobRequirementSet {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_gap_is_complement_of_score() {
        let user: UserSkillSet = [("sql", 2), ("python", 3)].into_iter().collect();
        let jobs = jobs(
            r#"{"Data Analyst": {
                "SQL": {"req_prof": 3, "weight": 2},
                "Python": {"req_prof": 2, "weight": 1}
            }}"#,
        );
        let assessment = assess(&ScoringEngine::default(), &user, &jobs);
        assert_eq!(
            assessment.results,
            vec![JobGapResult {
                job: "Data Analyst".to_string(),
                score: 75.0,
                gap: 25.0,
                missing: vec!["SQL".to_string()],
            }]
        );
        assert_eq!(assessment.missing_skills, vec!["SQL"]);
    }

    #[test]
    fn test_gap_shares_rounding_with_score() {
        let user: UserSkillSet = [("e", 1)].into_iter().collect();
        let jobs = jobs(
            r#"{"Analyst": {
                "a": {"req_prof": 3, "weight": 3},
                "b": {"req_prof": 3, "weight": 3},
                "c": {"req_prof": 3, "weight": 3},
                "d": {"req_prof": 2, "weight": 2},
                "e": {"req_prof": 1, "weight": 1}
            }}"#,
        );
        let result = &assess(&ScoringEngine::default(), &user, &jobs).results[0];
        assert_eq!(result.score, 3.12);
        assert_eq!(result.gap, 96.88);
        assert_eq!(round2(result.score + result.gap), 100.0);
    }

    #[test]
    fn test_missing_skills_unioned_across_jobs() {
        let user = UserSkillSet::new();
        let jobs = jobs(
            r#"{
                "Backend": {"Rust": {"req_prof": 2, "weight": 3}, "SQL": {"req_prof": 1, "weight": 1}},
                "Data": {"SQL": {"req_prof": 2, "weight": 2}, "Excel": {"req_prof": 1, "weight": 1}}
            }"#,
        );
        let assessment = assess(&ScoringEngine::default(), &user, &jobs);
        assert_eq!(assessment.results.len(), 2);
        assert_eq!(assessment.results[0].job, "Backend");
        assert_eq!(assessment.results[1].gap, 100.0);
        assert_eq!(assessment.missing_skills, vec!["Excel", "Rust", "SQL"]);
    }

    #[test]
    fn test_no_jobs_yields_empty_assessment() {
        let user: UserSkillSet = [("rust", 3)].into_iter().collect();
        let assessment = assess(&ScoringEngine::default(), &user, &JobRequirementSet::new());
        assert!(assessment.results.is_empty());
        assert!(assessment.missing_skills.is_empty());
    }
}
