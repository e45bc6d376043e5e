//! Points ledger: per-user integer balances accrued through report
//! resolution and other rewarded actions.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::UserStore;

/// Standard point values for actions rewarded outside the resolution flow.
/// The lifecycle engine computes resolution awards from urgency instead.
pub const POINTS_REPORT_SUBMISSION: i32 = 15;
pub const POINTS_QR_SCAN: i32 = 10;
pub const POINTS_EDUCATION_COMPLETE: i32 = 20;
pub const POINTS_PROPER_DISPOSAL: i32 = 25;
pub const POINTS_COMMUNITY_CLEANUP: i32 = 50;
pub const POINTS_REFERRAL: i32 = 30;

#[derive(Clone)]
pub struct PointsService {
    users: Arc<dyn UserStore>,
}

impl PointsService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Award points to a user. A missing user or a non-positive amount is a
    /// logged no-op, never an error; resolution must not fail because the
    /// reporter was anonymous or has since been deleted.
    pub async fn award_points(
        &self,
        user_id: Option<Uuid>,
        points: i32,
        reason: &str,
    ) -> Result<()> {
        let Some(user_id) = user_id else {
            warn!("attempted to award points without a user");
            return Ok(());
        };

        if points <= 0 {
            warn!(%user_id, points, "attempted to award non-positive points");
            return Ok(());
        }

        match self.users.add_points(user_id, points).await? {
            Some(user) => {
                info!(
                    %user_id,
                    points,
                    reason,
                    new_balance = user.points,
                    "awarded points to {}",
                    user.username
                );
            }
            None => warn!(%user_id, "attempted to award points to unknown user"),
        }

        Ok(())
    }

    /// True iff the user exists and the balance covers the cost.
    pub async fn can_redeem(&self, user_id: Uuid, cost: i32) -> Result<bool> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .is_some_and(|user| user.points >= cost))
    }

    /// Deduct `cost` from the balance in exchange for `item`. The deduction
    /// is conditional in the store, so the balance never goes below zero
    /// even when redemptions race.
    pub async fn redeem_points(&self, user_id: Uuid, cost: i32, item: &str) -> Result<()> {
        if cost <= 0 {
            return Err(AppError::BadRequest(
                "redemption cost must be positive".to_string(),
            ));
        }

        if !self.users.try_deduct_points(user_id, cost).await? {
            return Err(AppError::InsufficientBalance);
        }

        info!(%user_id, cost, item, "redeemed points");
        Ok(())
    }

    /// Current balance; 0 for an unknown user.
    pub async fn balance_of(&self, user_id: Uuid) -> Result<i32> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.points)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_point_values() {
        assert_eq!(POINTS_REPORT_SUBMISSION, 15);
        assert_eq!(POINTS_QR_SCAN, 10);
        assert_eq!(POINTS_EDUCATION_COMPLETE, 20);
        assert_eq!(POINTS_PROPER_DISPOSAL, 25);
        assert_eq!(POINTS_COMMUNITY_CLEANUP, 50);
        assert_eq!(POINTS_REFERRAL, 30);
    }
}
