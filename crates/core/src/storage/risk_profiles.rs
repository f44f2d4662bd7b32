use crate::domain::quiz::RiskProfile;
use crate::domain::risk::RiskProfileKind;
use anyhow::Context;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Durable record of a computed risk profile. Persistence is best-effort on
/// the caller's side; scoring itself never depends on this succeeding.
pub async fn record(pool: &sqlx::PgPool, profile: &RiskProfile) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO risk_profiles (id, user_id, score, profile, generated_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .persistent(false)
    .bind(id)
    .bind(profile.user_id)
    .bind(profile.score)
    .bind(profile.profile.as_str())
    .bind(profile.generated_at)
    .execute(pool)
    .await
    .context("insert risk_profiles failed")?;

    tracing::debug!(%id, user_id = profile.user_id, "risk profile recorded");
    Ok(id)
}

pub async fn fetch_latest_for_user(
    pool: &sqlx::PgPool,
    user_id: i64,
) -> anyhow::Result<Option<(Uuid, RiskProfile)>> {
    let row = sqlx::query_as::<_, (Uuid, i64, f64, String, DateTime<Utc>)>(
        "SELECT id, user_id, score, profile, generated_at \
         FROM risk_profiles \
         WHERE user_id = $1 \
         ORDER BY generated_at DESC, recorded_at DESC \
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("select risk_profiles failed")?;

    let Some((id, user_id, score, profile, generated_at)) = row else {
        return Ok(None);
    };

    let profile = RiskProfileKind::from_label(&profile)
        .with_context(|| format!("invalid profile label in DB: {profile}"))?;

    Ok(Some((
        id,
        RiskProfile {
            user_id,
            score,
            profile,
            generated_at,
        },
    )))
}
