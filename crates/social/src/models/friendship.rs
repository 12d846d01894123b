//! Friendships.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{FriendshipId, FriendshipStatus, UserId};

/// A friend request and its outcome. `requester_id` sent it; only
/// `addressee_id` may accept or reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Friendship {
    pub id: FriendshipId,
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    /// Whether `user` is one side of this friendship.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.requester_id == user || self.addressee_id == user
    }

    /// The side that is not `user`.
    #[must_use]
    pub fn other(&self, user: UserId) -> UserId {
        if self.requester_id == user {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        let friendship = Friendship {
            id: FriendshipId::new(1),
            requester_id: UserId::new(3),
            addressee_id: UserId::new(9),
            status: FriendshipStatus::Accepted,
            created_at: Utc::now(),
        };

        assert_eq!(friendship.other(UserId::new(3)), UserId::new(9));
        assert_eq!(friendship.other(UserId::new(9)), UserId::new(3));
        assert!(friendship.involves(UserId::new(9)));
        assert!(!friendship.involves(UserId::new(4)));
    }
}
