// Career advisor LLM prompt templates.
// All prompts for the advisor module are defined here.

use crate::llm_client::prompts::LEVEL_SCALE;

pub const RESUME_SKILLS_PROMPT: &str = r#"Extract technical skills from this resume.
Estimate proficiency from 1 to 3.
{level_scale}
Return ONLY valid JSON:

{
    "skills": {
        "Python": 2,
        "SQL": 3
    }
}

Resume:
{resume_text}"#;

pub const JOB_REQUIREMENTS_SYSTEM: &str = "\
You are an expert HR recruiter. \
You MUST respond with a single valid JSON object only, no markdown fences, no explanations.";

pub const JOB_REQUIREMENTS_PROMPT: &str = r#"Define the top 5 most critical technical skills required for the role of "{target_job}".

IMPORTANT RULE: Keep skill names very short and standardized.
Use "Excel" instead of "Advanced Microsoft Excel".
Use "SQL" instead of "SQL (Structured Query Language)".

Assign a required proficiency (1 to 3) and an importance weight (1 to 3).
{level_scale}

Return ONLY a valid JSON object in this exact format:
{
    "{target_job}": {
        "Skill Name 1": {"req_prof": 3, "weight": 3},
        "Skill Name 2": {"req_prof": 2, "weight": 2}
    }
}"#;

pub const SCHEMES_SYSTEM: &str = "\
You are an expert career counselor in India. \
Only suggest real, official programmes with their official URLs. \
You MUST respond with a single valid JSON array only.";

pub const SCHEMES_PROMPT: &str = r#"A student is aiming for the role of "{target_job}" and needs to learn the following skills: {skills}.

Suggest 3 to 4 real, official Indian government upskilling schemes, educational portals, or certifications (such as PMKVY, SWAYAM, NPTEL, Skill India Digital, or specific Sector Skill Councils) where they can learn these exact skills.

Return ONLY a valid JSON array in this exact format:
[
    {
        "name": "Name of the Scheme or Portal",
        "description": "A 1-sentence description of how it helps with their missing skills.",
        "link": "The official URL"
    }
]"#;

pub fn resume_skills_prompt(resume_text: &str) -> String {
    RESUME_SKILLS_PROMPT
        .replace("{level_scale}", LEVEL_SCALE)
        .replace("{resume_text}", resume_text)
}

pub fn job_requirements_prompt(target_job: &str) -> String {
    JOB_REQUIREMENTS_PROMPT
        .replace("{level_scale}", LEVEL_SCALE)
        .replace("{target_job}", target_job)
}

pub fn schemes_prompt(target_job: &str, missing_skills: &[String]) -> String {
    SCHEMES_PROMPT
        .replace("{target_job}", target_job)
        .replace("{skills}", &missing_skills.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_prompt_embeds_text_last() {
        let prompt = resume_skills_prompt("Built ETL pipelines in Python");
        assert!(prompt.ends_with("Built ETL pipelines in Python"));
        assert!(!prompt.contains("{level_scale}"));
    }

    #[test]
    fn test_job_prompt_keys_example_by_title() {
        let prompt = job_requirements_prompt("Data Analyst");
        assert!(prompt.contains("role of \"Data Analyst\""));
        assert!(prompt.contains("\"Data Analyst\": {"));
        assert!(!prompt.contains("{target_job}"));
    }

    #[test]
    fn test_schemes_prompt_lists_skills() {
        let prompt = schemes_prompt("Web Developer", &["React".to_string(), "Node.js".to_string()]);
        assert!(prompt.contains("React, Node.js"));
        assert!(prompt.contains("\"Web Developer\""));
    }
}
