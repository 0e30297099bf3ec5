use serde::Serialize;
use sqlx::FromRow;

/// Most frequently logged skill across all users.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillFrequencyRow {
    pub name: String,
    pub frequency: i64,
}
