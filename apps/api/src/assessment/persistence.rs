use sqlx::PgPool;
use uuid::Uuid;

use crate::scoring::UserSkillSet;

/// Records the extracted skills for a user in one transaction.
/// Unknown skill names are added to the catalogue; existing proficiencies are overwritten.
pub async fn save_extracted_skills(
    pool: &PgPool,
    user_id: Uuid,
    skills: &UserSkillSet,
) -> Result<usize, sqlx::Error> {
    if skills.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;

    for (name, proficiency) in skills.iter() {
        sqlx::query("INSERT INTO skills (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let skill_id: i32 = sqlx::query_scalar("SELECT id FROM skills WHERE name = $1")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, skill_id, proficiency)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, skill_id)
            DO UPDATE SET proficiency = EXCLUDED.proficiency, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(skill_id)
        .bind(*proficiency)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(skills.len())
}
