//! Skill matchers — the resolution tiers tried in order for every required skill.
//!
//! `ScoringEngine` holds an ordered `Vec<Box<dyn SkillMatcher>>`; the first
//! matcher that returns `Some` decides the user's proficiency for that skill.

use crate::scoring::ordered::OrderedMap;
use crate::scoring::similarity::{best_match, SimilarityMetric};
use crate::scoring::{Proficiency, UserSkillSet};

/// Lowercased, trimmed skill name used for every comparison.
pub fn normalize_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// User skills keyed by normalized name.
///
/// Names that collide after normalization keep the value inserted last
/// (`"SQL": 3` followed by `"sql ": 1` resolves to 1).
#[derive(Debug, Clone, Default)]
pub struct NormalizedSkills(OrderedMap<Proficiency>);

impl NormalizedSkills {
    pub fn from_user_skills(skills: &UserSkillSet) -> Self {
        Self(
            skills
                .iter()
                .map(|(name, prof)| (normalize_skill_name(name), *prof))
                .collect(),
        )
    }

    pub fn get(&self, normalized_name: &str) -> Option<Proficiency> {
        self.0.get(normalized_name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Proficiency)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait SkillMatcher: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Resolves the user's proficiency for `required` (already normalized),
    /// or `None` to defer to the next tier.
    fn resolve(&self, required: &str, skills: &NormalizedSkills) -> Option<Proficiency>;
}

/// Verbatim hit on the normalized name. A stored proficiency of 0 still counts.
pub struct ExactMatcher;

impl SkillMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn resolve(&self, required: &str, skills: &NormalizedSkills) -> Option<Proficiency> {
        skills.get(required)
    }
}

/// Containment in either direction ("sql" / "advanced sql"), taking the
/// highest proficiency over all hits. A non-positive best defers.
pub struct SubstringMatcher;

impl SkillMatcher for SubstringMatcher {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn resolve(&self, required: &str, skills: &NormalizedSkills) -> Option<Proficiency> {
        let best = skills
            .iter()
            .filter(|(user_skill, _)| user_skill.contains(required) || required.contains(user_skill))
            .fold(0, |best, (_, prof)| best.max(prof));
        (best > 0).then_some(best)
    }
}

/// Closest user skill by string similarity, if it clears `cutoff`.
pub struct FuzzyMatcher {
    pub cutoff: f64,
    pub metric: SimilarityMetric,
}

impl SkillMatcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn resolve(&self, required: &str, skills: &NormalizedSkills) -> Option<Proficiency> {
        let (name, _) = best_match(required, skills.names(), self.cutoff, self.metric)?;
        skills.get(name)
    }
}
