//! Career advisor — the AI-backed collaborators around the scoring engine.
//!
//! Every operation degrades to an empty value when the model call or its
//! JSON fails; the failure is logged, never returned to the caller.
//! `AppState` holds an `Arc<dyn CareerAdvisor>` so handlers can be exercised
//! without a model.

pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::advisor::prompts::{
    job_requirements_prompt, resume_skills_prompt, schemes_prompt, JOB_REQUIREMENTS_SYSTEM,
    SCHEMES_SYSTEM,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_reply, GeminiClient, JsonShape, LlmError};
use crate::scoring::ordered::OrderedMap;
use crate::scoring::{JobRequirement, UserSkillSet};

/// Job title → requirement set, as generated for one target job.
pub type JobRequirementSet = OrderedMap<JobRequirement>;

/// A government upskilling scheme or portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    /// Skill name → proficiency found in the resume text. Empty on blank text or failure.
    async fn extract_skills(&self, resume_text: &str) -> UserSkillSet;

    /// Requirements for `target_job`, keyed by the job title the model echoes back.
    async fn job_requirements(&self, target_job: &str) -> JobRequirementSet;

    /// Schemes covering `missing_skills`. Empty (and no model call) when nothing is missing.
    async fn suggest_schemes(&self, target_job: &str, missing_skills: &[String]) -> Vec<Scheme>;
}

pub struct GeminiAdvisor {
    llm: GeminiClient,
}

impl GeminiAdvisor {
    pub fn new(llm: GeminiClient) -> Self {
        Self { llm }
    }

    async fn request(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.llm.call(prompt, system).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl CareerAdvisor for GeminiAdvisor {
    async fn extract_skills(&self, resume_text: &str) -> UserSkillSet {
        if resume_text.trim().is_empty() {
            warn!("Resume text is empty; skipping skill extraction");
            return UserSkillSet::new();
        }

        let prompt = resume_skills_prompt(resume_text);
        let result = self
            .request(&prompt, JSON_ONLY_SYSTEM)
            .await
            .and_then(|text| parse_skills(&text));

        match result {
            Ok(skills) => {
                info!(count = skills.len(), "AI extracted skills from resume");
                skills
            }
            Err(e) => {
                error!("Skill extraction failed: {e}");
                UserSkillSet::new()
            }
        }
    }

    async fn job_requirements(&self, target_job: &str) -> JobRequirementSet {
        info!(target_job, "Generating industry requirements");

        let prompt = job_requirements_prompt(target_job);
        let result = self
            .request(&prompt, JOB_REQUIREMENTS_SYSTEM)
            .await
            .and_then(|text| parse_job_requirements(&text));

        match result {
            Ok(reqs) => {
                info!(target_job, jobs = reqs.len(), "Generated job requirements");
                reqs
            }
            Err(e) => {
                error!(target_job, "Job requirement generation failed: {e}");
                JobRequirementSet::new()
            }
        }
    }

    async fn suggest_schemes(&self, target_job: &str, missing_skills: &[String]) -> Vec<Scheme> {
        if missing_skills.is_empty() {
            return Vec::new();
        }

        let prompt = schemes_prompt(target_job, missing_skills);
        let result = self
            .request(&prompt, SCHEMES_SYSTEM)
            .await
            .and_then(|text| parse_schemes(&text));

        match result {
            Ok(schemes) => {
                info!(target_job, count = schemes.len(), "AI suggested schemes");
                schemes
            }
            Err(e) => {
                error!(target_job, "Scheme suggestion failed: {e}");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SkillsEnvelope {
    #[serde(default)]
    skills: UserSkillSet,
}

/// Parses `{"skills": {name: level}}`. A missing `skills` key yields an empty set.
pub fn parse_skills(reply: &str) -> Result<UserSkillSet, LlmError> {
    parse_json_reply::<SkillsEnvelope>(reply, JsonShape::Object).map(|e| e.skills)
}

/// Parses `{job_title: {skill: {"req_prof": n, "weight": n}}}`.
pub fn parse_job_requirements(reply: &str) -> Result<JobRequirementSet, LlmError> {
    parse_json_reply(reply, JsonShape::Object)
}

/// Parses `[{"name", "description", "link"}]`.
pub fn parse_schemes(reply: &str) -> Result<Vec<Scheme>, LlmError> {
    parse_json_reply(reply, JsonShape::Array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SkillRequirement;

    #[test]
    fn test_parse_skills_from_fenced_reply() {
        let reply = "```json\n{\"skills\": {\"Python\": 2, \"SQL\": 3}}\n```";
        let skills = parse_skills(reply).unwrap();
        assert_eq!(skills.get("Python"), Some(&2));
        assert_eq!(skills.get("SQL"), Some(&3));
        assert_eq!(skills.keys().collect::<Vec<_>>(), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_parse_skills_without_key_is_empty() {
        let skills = parse_skills("{\"name\": \"Jane\"}").unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn test_parse_skills_rejects_non_integer_levels() {
        assert!(parse_skills("{\"skills\": {\"Python\": \"expert\"}}").is_err());
    }

    #[test]
    fn test_parse_job_requirements_keeps_order() {
        let reply = r#"Here is the JSON:
        {"Data Analyst": {
            "SQL": {"req_prof": 3, "weight": 3},
            "Excel": {"req_prof": 2, "weight": 2}
        }}"#;
        let reqs = parse_job_requirements(reply).unwrap();
        let job = reqs.get("Data Analyst").unwrap();
        assert_eq!(job.keys().collect::<Vec<_>>(), vec!["SQL", "Excel"]);
        assert_eq!(
            job.get("Excel"),
            Some(&SkillRequirement {
                req_prof: 2,
                weight: 2
            })
        );
    }

    #[test]
    fn test_parse_job_requirements_missing_fields_fail() {
        assert!(parse_job_requirements(r#"{"Dev": {"Rust": {"req_prof": 3}}}"#).is_err());
    }

    #[test]
    fn test_parse_schemes_tolerates_missing_description() {
        let reply = r#"[{"name": "SWAYAM", "link": "https://swayam.gov.in"}]"#;
        let schemes = parse_schemes(reply).unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].name, "SWAYAM");
        assert!(schemes[0].description.is_empty());
    }

    #[test]
    fn test_parse_schemes_requires_array() {
        assert!(matches!(
            parse_schemes("{\"name\": \"NPTEL\"}"),
            Err(LlmError::NoJson("array"))
        ));
    }

    #[tokio::test]
    async fn test_no_missing_skills_skips_model_call() {
        let advisor = GeminiAdvisor::new(GeminiClient::new(String::new()));
        assert!(advisor.suggest_schemes("Analyst", &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_resume_skips_model_call() {
        let advisor = GeminiAdvisor::new(GeminiClient::new(String::new()));
        assert!(advisor.extract_skills("   \n").await.is_empty());
    }
}
