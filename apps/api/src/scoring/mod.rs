//! Employability scoring — compares a user's skills with a job's requirements.
//!
//! Pure and synchronous. `AppState` shares one `ScoringEngine` behind an `Arc`.
//!
//! Algorithm:
//! 1. Normalize user skill names (trim + lowercase).
//! 2. For each required skill `(name, req_prof, weight)`:
//!    - `max_score += req_prof * weight`
//!    - resolve the user's proficiency through the matcher chain (0 if unresolved)
//!    - below `req_prof` → `name` goes to `missing`
//!    - `total_score += min(resolved, req_prof) * weight`
//! 3. `score = total_score / max_score * 100`, or 0 when `max_score <= 0`,
//!    rounded to 2 decimals.

pub mod matcher;
pub mod ordered;
pub mod similarity;

use serde::{Deserialize, Serialize};

use crate::scoring::matcher::{
    normalize_skill_name, ExactMatcher, FuzzyMatcher, NormalizedSkills, SkillMatcher,
    SubstringMatcher,
};
use crate::scoring::ordered::OrderedMap;
use crate::scoring::similarity::SimilarityMetric;

/// Skill mastery, nominally 1–3. Values are not range-checked.
pub type Proficiency = i32;

/// Skill name → proficiency, as extracted from a resume.
pub type UserSkillSet = OrderedMap<Proficiency>;

/// Skill name → requirement, for one job title.
pub type JobRequirement = OrderedMap<SkillRequirement>;

pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub req_prof: Proficiency,
    pub weight: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0 – 100, two decimals.
    pub score: f64,
    /// Required skills the user falls short on, in requirement order.
    pub missing: Vec<String>,
}

pub struct ScoringEngine {
    matchers: Vec<Box<dyn SkillMatcher>>,
}

impl ScoringEngine {
    pub fn new(matchers: Vec<Box<dyn SkillMatcher>>) -> Self {
        Self { matchers }
    }

    /// Exact → substring → fuzzy.
    pub fn with_fuzzy(cutoff: f64, metric: SimilarityMetric) -> Self {
        Self::new(vec![
            Box::new(ExactMatcher),
            Box::new(SubstringMatcher),
            Box::new(FuzzyMatcher { cutoff, metric }),
        ])
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn score(&self, user_skills: &UserSkillSet, job: &JobRequirement) -> ScoreResult {
        let skills = NormalizedSkills::from_user_skills(user_skills);

        let mut missing = Vec::new();
        let mut total_score: i64 = 0;
        let mut max_score: i64 = 0;

        for (skill, req) in job.iter() {
            let req_prof = i64::from(req.req_prof);
            let weight = i64::from(req.weight);
            max_score += req_prof * weight;

            let user_prof = i64::from(self.resolve(&normalize_skill_name(skill), &skills));
            if user_prof < req_prof {
                missing.push(skill.to_string());
            }
            total_score += user_prof.min(req_prof) * weight;
        }

        let score = if max_score > 0 {
            round2(total_score as f64 / max_score as f64 * 100.0)
        } else {
            0.0
        };

        ScoreResult { score, missing }
    }

    fn resolve(&self, required: &str, skills: &NormalizedSkills) -> Proficiency {
        if skills.is_empty() {
            return 0;
        }
        for matcher in &self.matchers {
            if let Some(prof) = matcher.resolve(required, skills) {
                tracing::trace!(skill = required, tier = matcher.name(), prof, "skill resolved");
                return prof;
            }
        }
        0
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_fuzzy(DEFAULT_FUZZY_CUTOFF, SimilarityMetric::Gestalt)
    }
}

/// Rounds to 2 decimals, ties to even on the exact binary value.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
