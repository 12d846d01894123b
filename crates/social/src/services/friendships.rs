//! Friend requests and friendships.
//!
//! Every change runs in one transaction together with the notification it
//! produces: a request notifies the addressee, a decision notifies the
//! requester. Decisions follow [`FriendshipStatus`]'s transitions, so only a
//! pending request can be accepted or rejected.

use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{FriendshipId, FriendshipStatus, TransitionError, UserId};

use crate::db::{self, RepositoryError, UserRepository};
use crate::models::{Friendship, User};

/// Errors from friendship operations.
#[derive(Debug, Error)]
pub enum FriendshipError {
    #[error("Cannot send a friend request to yourself")]
    SelfRequest,

    #[error("User not found")]
    UserNotFound,

    /// The pair already has a row, in either direction and any status.
    #[error("Friend request already exists")]
    AlreadyExists,

    /// Missing request, or the caller is not its addressee.
    #[error("Permission denied")]
    Forbidden,

    /// The request was already decided.
    #[error("Friend request is already {0}")]
    NotPending(FriendshipStatus),

    /// A concurrent decision won.
    #[error("Friend request was already decided")]
    AlreadyDecided,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for FriendshipError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// Send a friend request from `requester` to `addressee_id`.
///
/// # Errors
///
/// Returns `FriendshipError::SelfRequest`, `FriendshipError::UserNotFound`
/// or `FriendshipError::AlreadyExists`.
#[tracing::instrument(skip(pool, requester), fields(requester_id = %requester.id))]
pub async fn send_request(
    pool: &SqlitePool,
    requester: &User,
    addressee_id: UserId,
) -> Result<Friendship, FriendshipError> {
    if requester.id == addressee_id {
        return Err(FriendshipError::SelfRequest);
    }
    if UserRepository::new(pool).get_by_id(addressee_id).await?.is_none() {
        return Err(FriendshipError::UserNotFound);
    }

    let mut tx = pool.begin().await?;

    let request = db::friendships::create(&mut *tx, requester.id, addressee_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => FriendshipError::AlreadyExists,
            other => FriendshipError::Repository(other),
        })?;
    db::notifications::create(
        &mut *tx,
        addressee_id,
        &format!("{} sent you a friend request", requester.username),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(friendship_id = %request.id, "friend request sent");
    Ok(request)
}

/// Pending requests addressed to `user_id`.
///
/// # Errors
///
/// Returns `FriendshipError::Repository` if the query fails.
pub async fn pending_requests(
    pool: &SqlitePool,
    user_id: UserId,
) -> Result<Vec<Friendship>, FriendshipError> {
    Ok(db::friendships::pending_for(pool, user_id).await?)
}

/// Accept a pending request addressed to `addressee`.
///
/// # Errors
///
/// Returns `FriendshipError::Forbidden` if the request is missing or
/// addressed to someone else, and `FriendshipError::NotPending` if it was
/// already decided.
pub async fn accept(
    pool: &SqlitePool,
    addressee: &User,
    request_id: FriendshipId,
) -> Result<Friendship, FriendshipError> {
    decide(pool, addressee, request_id, FriendshipStatus::accept, "accepted").await
}

/// Reject a pending request addressed to `addressee`.
///
/// # Errors
///
/// Same as [`accept`].
pub async fn reject(
    pool: &SqlitePool,
    addressee: &User,
    request_id: FriendshipId,
) -> Result<Friendship, FriendshipError> {
    decide(pool, addressee, request_id, FriendshipStatus::reject, "rejected").await
}

#[tracing::instrument(skip(pool, addressee, next), fields(addressee_id = %addressee.id))]
async fn decide(
    pool: &SqlitePool,
    addressee: &User,
    request_id: FriendshipId,
    next: fn(FriendshipStatus) -> Result<FriendshipStatus, TransitionError>,
    verb: &str,
) -> Result<Friendship, FriendshipError> {
    let mut tx = pool.begin().await?;

    db::friendships::lock_for_decision(&mut *tx, request_id).await?;

    let request = db::friendships::get(&mut *tx, request_id)
        .await?
        .filter(|r| r.addressee_id == addressee.id)
        .ok_or(FriendshipError::Forbidden)?;

    let to = next(request.status).map_err(|e| FriendshipError::NotPending(e.from))?;

    // Conditional on the status read above; a concurrent decision leaves
    // nothing to update.
    let decided = db::friendships::transition(&mut *tx, request.id, request.status, to)
        .await?
        .ok_or(FriendshipError::AlreadyDecided)?;

    db::notifications::create(
        &mut *tx,
        decided.requester_id,
        &format!("{} {verb} your friend request", addressee.username),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(friendship_id = %decided.id, status = %decided.status, "friend request decided");
    Ok(decided)
}

/// Accepted friendships of `user_id`.
///
/// # Errors
///
/// Returns `FriendshipError::Repository` if the query fails.
pub async fn friends(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Friendship>, FriendshipError> {
    Ok(db::friendships::accepted_for(pool, user_id).await?)
}

/// Remove any friendship row between the two users. Succeeds whether or not
/// there was one.
///
/// # Errors
///
/// Returns `FriendshipError::Repository` if the delete fails.
pub async fn unfriend(pool: &SqlitePool, user_id: UserId, friend_id: UserId) -> Result<(), FriendshipError> {
    if db::friendships::delete_pair(pool, user_id, friend_id).await? {
        tracing::info!(%user_id, %friend_id, "unfriended");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::testing;

    async fn member(pool: &SqlitePool, name: &str) -> User {
        let id = testing::user(pool, name).await;
        UserRepository::new(pool).get_by_id(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_request_accept_flow_notifies_both() {
        let pool = testing::pool().await;
        let ann = member(&pool, "ann").await;
        let ben = member(&pool, "ben").await;

        let request = send_request(&pool, &ann, ben.id).await.unwrap();
        assert_eq!(request.status, FriendshipStatus::Pending);

        let inbox = db::notifications::for_user(&pool, ben.id).await.unwrap();
        assert_eq!(inbox[0].message, "ann sent you a friend request");

        let pending = pending_requests(&pool, ben.id).await.unwrap();
        assert_eq!(pending.len(), 1);

        let accepted = accept(&pool, &ben, request.id).await.unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);

        let inbox = db::notifications::for_user(&pool, ann.id).await.unwrap();
        assert_eq!(inbox[0].message, "ben accepted your friend request");

        assert_eq!(friends(&pool, ann.id).await.unwrap().len(), 1);
        assert_eq!(friends(&pool, ben.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_request_validation() {
        let pool = testing::pool().await;
        let cat = member(&pool, "cat").await;
        let dan = member(&pool, "dan").await;

        assert!(matches!(
            send_request(&pool, &cat, cat.id).await,
            Err(FriendshipError::SelfRequest)
        ));
        assert!(matches!(
            send_request(&pool, &cat, UserId::new(999)).await,
            Err(FriendshipError::UserNotFound)
        ));

        send_request(&pool, &cat, dan.id).await.unwrap();
        assert!(matches!(
            send_request(&pool, &dan, cat.id).await,
            Err(FriendshipError::AlreadyExists)
        ));
        // The failed request left no notification behind.
        assert!(db::notifications::for_user(&pool, cat.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_only_addressee_decides_and_only_once() {
        let pool = testing::pool().await;
        let eve = member(&pool, "eve").await;
        let fin = member(&pool, "fin").await;
        let request = send_request(&pool, &eve, fin.id).await.unwrap();

        assert!(matches!(
            accept(&pool, &eve, request.id).await,
            Err(FriendshipError::Forbidden)
        ));
        assert!(matches!(
            accept(&pool, &fin, FriendshipId::new(999)).await,
            Err(FriendshipError::Forbidden)
        ));

        reject(&pool, &fin, request.id).await.unwrap();
        let err = accept(&pool, &fin, request.id).await.unwrap_err();
        assert!(matches!(err, FriendshipError::NotPending(_)));
        assert_eq!(err.to_string(), "Friend request is already rejected");
        assert!(friends(&pool, fin.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_racing_decisions_yield_one_conflict() {
        let path = std::env::temp_dir().join(format!("threefold-social-{}.db", uuid::Uuid::new_v4()));
        let url = secrecy::SecretString::from(format!("sqlite://{}", path.display()));
        let pool = db::create_pool(&url).await.unwrap();
        db::MIGRATOR.run(&pool).await.unwrap();

        let requester = member(&pool, "ivo").await;
        let addressee = member(&pool, "jun").await;

        for round in 0..10 {
            let request = send_request(&pool, &requester, addressee.id).await.unwrap();

            let (a, b) = tokio::join!(
                accept(&pool, &addressee, request.id),
                reject(&pool, &addressee, request.id)
            );

            let (winner, loser) = if a.is_ok() { (a, b) } else { (b, a) };
            assert!(winner.is_ok(), "round {round}: no decision applied");
            assert!(
                matches!(
                    loser,
                    Err(FriendshipError::NotPending(_) | FriendshipError::AlreadyDecided)
                ),
                "round {round}: unexpected {loser:?}"
            );

            unfriend(&pool, requester.id, addressee.id).await.unwrap();
        }

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn test_unfriend_allows_new_request() {
        let pool = testing::pool().await;
        let gil = member(&pool, "gil").await;
        let hay = member(&pool, "hay").await;
        let request = send_request(&pool, &gil, hay.id).await.unwrap();
        reject(&pool, &hay, request.id).await.unwrap();

        unfriend(&pool, hay.id, gil.id).await.unwrap();
        unfriend(&pool, hay.id, gil.id).await.unwrap();

        send_request(&pool, &hay, gil.id).await.unwrap();
    }
}
