//! Aggregate usage statistics.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::skill::SkillFrequencyRow;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminStats {
    pub total_users: i64,
    /// `"None"` until any skill has been logged.
    pub top_skill: String,
    pub total_skills_logged: i64,
}

pub async fn get_admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let top_skill = sqlx::query_as::<_, SkillFrequencyRow>(
        r#"
        SELECT s.name, COUNT(us.skill_id) AS frequency
        FROM user_skills us
        JOIN skills s ON us.skill_id = s.id
        GROUP BY s.name
        ORDER BY frequency DESC, s.name
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    let total_skills_logged: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_skills")
        .fetch_one(pool)
        .await?;

    Ok(AdminStats {
        total_users,
        top_skill: top_skill.map_or_else(|| "None".to_string(), |row| row.name),
        total_skills_logged,
    })
}

/// GET /api/v1/admin/stats
pub async fn handle_admin_stats(State(state): State<AppState>) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(get_admin_stats(&state.db).await?))
}
