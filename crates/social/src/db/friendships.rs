//! Friendship queries.
//!
//! A pair of users has at most one row, whichever direction the request
//! went; the unique index on `(min, max)` of the two ids enforces it.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{FriendshipId, FriendshipStatus, UserId};

use super::RepositoryError;
use crate::models::Friendship;

const FRIENDSHIP_COLUMNS: &str = "id, requester_id, addressee_id, status, created_at";

/// Insert a pending request.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the pair already has a row.
pub async fn create<'e, E>(
    conn: E,
    requester: UserId,
    addressee: UserId,
) -> Result<Friendship, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Friendship>(&format!(
        "INSERT INTO friendships (requester_id, addressee_id, status, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING {FRIENDSHIP_COLUMNS}"
    ))
    .bind(requester)
    .bind(addressee)
    .bind(FriendshipStatus::Pending)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .map_err(|e| RepositoryError::from_write(e, "friendship already exists"))
}

/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: FriendshipId) -> Result<Option<Friendship>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let friendship = sqlx::query_as::<_, Friendship>(&format!(
        "SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(friendship)
}

/// Pending requests addressed to `user`, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn pending_for<'e, E>(conn: E, user: UserId) -> Result<Vec<Friendship>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let requests = sqlx::query_as::<_, Friendship>(&format!(
        "SELECT {FRIENDSHIP_COLUMNS} FROM friendships
         WHERE addressee_id = ? AND status = ? ORDER BY id"
    ))
    .bind(user)
    .bind(FriendshipStatus::Pending)
    .fetch_all(conn)
    .await?;

    Ok(requests)
}

/// Accepted friendships on either side of `user`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn accepted_for<'e, E>(conn: E, user: UserId) -> Result<Vec<Friendship>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let friends = sqlx::query_as::<_, Friendship>(&format!(
        "SELECT {FRIENDSHIP_COLUMNS} FROM friendships
         WHERE (requester_id = ?1 OR addressee_id = ?1) AND status = ?2 ORDER BY id"
    ))
    .bind(user)
    .bind(FriendshipStatus::Accepted)
    .fetch_all(conn)
    .await?;

    Ok(friends)
}

/// Take SQLite's write lock before reading a request that is about to be
/// decided.
///
/// Without it the transaction starts as a reader, and a racing decision
/// makes its later `UPDATE` fail with `SQLITE_BUSY` instead of waiting.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the lock cannot be taken.
pub async fn lock_for_decision<'e, E>(conn: E, id: FriendshipId) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE friendships SET status = status WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Move a row from `from` to `to`. Returns `None` if the row is no longer in
/// `from`, so two racing decisions cannot both apply.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn transition<'e, E>(
    conn: E,
    id: FriendshipId,
    from: FriendshipStatus,
    to: FriendshipStatus,
) -> Result<Option<Friendship>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let friendship = sqlx::query_as::<_, Friendship>(&format!(
        "UPDATE friendships SET status = ? WHERE id = ? AND status = ?
         RETURNING {FRIENDSHIP_COLUMNS}"
    ))
    .bind(to)
    .bind(id)
    .bind(from)
    .fetch_optional(conn)
    .await?;

    Ok(friendship)
}

/// Delete the pair's row in either direction, whatever its status. Returns
/// `false` if there was none.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete_pair<'e, E>(conn: E, a: UserId, b: UserId) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "DELETE FROM friendships
         WHERE (requester_id = ?1 AND addressee_id = ?2)
            OR (requester_id = ?2 AND addressee_id = ?1)",
    )
    .bind(a)
    .bind(b)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_one_row_per_pair() {
        let pool = testing::pool().await;
        let a = testing::user(&pool, "hal").await;
        let b = testing::user(&pool, "ida").await;

        create(&pool, a, b).await.unwrap();
        assert!(matches!(
            create(&pool, b, a).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(matches!(
            create(&pool, a, b).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_transition_is_conditional() {
        let pool = testing::pool().await;
        let a = testing::user(&pool, "jo").await;
        let b = testing::user(&pool, "kai").await;
        let request = create(&pool, a, b).await.unwrap();

        let accepted = transition(
            &pool,
            request.id,
            FriendshipStatus::Pending,
            FriendshipStatus::Accepted,
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);

        let again = transition(
            &pool,
            request.id,
            FriendshipStatus::Pending,
            FriendshipStatus::Rejected,
        )
        .await
        .unwrap();
        assert!(again.is_none());

        assert_eq!(accepted_for(&pool, a).await.unwrap().len(), 1);
        assert_eq!(accepted_for(&pool, b).await.unwrap().len(), 1);
        assert!(pending_for(&pool, b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_pair_either_direction() {
        let pool = testing::pool().await;
        let a = testing::user(&pool, "lu").await;
        let b = testing::user(&pool, "mo").await;
        create(&pool, a, b).await.unwrap();

        assert!(delete_pair(&pool, b, a).await.unwrap());
        assert!(!delete_pair(&pool, a, b).await.unwrap());
    }
}
