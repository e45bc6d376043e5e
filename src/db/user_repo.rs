/// User repository - database operations for reporter accounts.
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, points, created_at";

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Atomically add points to a user's balance. The arithmetic runs inside the
/// UPDATE so concurrent awards for the same user never lose an increment.
/// Returns None when the user does not exist.
pub async fn add_points(
    pool: &PgPool,
    user_id: Uuid,
    points: i32,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET points = points + $1
        WHERE id = $2
        RETURNING id, username, email, points, created_at
        "#,
    )
    .bind(points)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Conditionally deduct points. The balance guard is part of the UPDATE, so
/// the balance can never go negative even under concurrent redemptions.
/// Returns true when the deduction happened.
pub async fn try_deduct_points(
    pool: &PgPool,
    user_id: Uuid,
    cost: i32,
) -> Result<bool, sqlx::Error> {
    let updated: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE users
        SET points = points - $1
        WHERE id = $2 AND points >= $1
        RETURNING id
        "#,
    )
    .bind(cost)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(updated.is_some())
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
