//! Promotion Pipeline Service
//!
//! Tracks how content advances through marketing stages. Two machines live
//! here:
//!
//! - **Per-post flags**: `is_winner` → `promoted_to_main` → `became_ad`.
//!   The flags are independent booleans with enforced precedence; they are
//!   only ever set, never cleared, so promotion is a one-way pipeline.
//!   Setting a flag out of precedence order is a rejected transition, not a
//!   silent no-op. Setting an already-set flag is idempotent.
//! - **Per-account test status**: `Active → {Paused | Completed}`,
//!   `Paused → Active` (resume), and `Completed → Winner` when the
//!   account's win rate clears a caller-supplied threshold.
//!
//! Which posts count as winners in the first place is a pluggable
//! [`WinnerPolicy`]; the shipped policy takes the top K posts by engagement
//! with an optional minimum-reach floor.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::entities::account::{Account, TestStatus};
use crate::domain::entities::content_post::ContentPost;
use crate::domain::errors::EngineError;
use crate::domain::services::aggregator::MetricAggregator;
use crate::domain::value_objects::metric_key::PostMetricKey;

/// Aggregate stage counts reported to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionCounters {
    pub winners: usize,
    pub promoted: usize,
    pub ads: usize,
}

/// Selection rule deciding which of a test account's posts are winners.
pub trait WinnerPolicy {
    fn select_winners(&self, posts: &[ContentPost]) -> Vec<String>;
}

/// Top K posts by engagement, optionally requiring a minimum reach.
/// Ties break on post id for determinism.
pub struct TopKByEngagement {
    pub k: usize,
    pub min_reach: Option<f64>,
}

impl TopKByEngagement {
    pub fn new(k: usize) -> Self {
        TopKByEngagement { k, min_reach: None }
    }

    pub fn with_min_reach(mut self, min_reach: f64) -> Self {
        self.min_reach = Some(min_reach);
        self
    }
}

impl WinnerPolicy for TopKByEngagement {
    fn select_winners(&self, posts: &[ContentPost]) -> Vec<String> {
        let eligible: Vec<&ContentPost> = posts
            .iter()
            .filter(|p| match self.min_reach {
                Some(floor) => p.reach.value() >= floor,
                None => true,
            })
            .collect();
        MetricAggregator::top_posts(&eligible, PostMetricKey::Engagement, self.k)
            .into_iter()
            .map(|p| p.id.clone())
            .collect()
    }
}

pub struct PromotionPipeline;

impl PromotionPipeline {
    /// Flag a post as a winner within its test cohort.
    pub fn mark_winner(post: &mut ContentPost) -> Result<(), EngineError> {
        if !post.is_winner {
            post.is_winner = true;
            info!(post_id = %post.id, "Post marked as winner");
        }
        Ok(())
    }

    /// Flag a winner post as reproduced on a sub/main account.
    ///
    /// # Errors
    /// Rejected when the post is not a winner yet.
    pub fn promote_to_main(post: &mut ContentPost) -> Result<(), EngineError> {
        if !post.is_winner {
            return Err(EngineError::InvalidTransition {
                post_id: post.id.clone(),
                reason: "promotedToMain requires isWinner".to_string(),
            });
        }
        if !post.promoted_to_main {
            post.promoted_to_main = true;
            info!(post_id = %post.id, "Post promoted to main");
        }
        Ok(())
    }

    /// Flag a promoted post as converted into a paid-media asset.
    ///
    /// # Errors
    /// Rejected when the post has not been promoted yet.
    pub fn convert_to_ad(post: &mut ContentPost) -> Result<(), EngineError> {
        if !post.promoted_to_main {
            return Err(EngineError::InvalidTransition {
                post_id: post.id.clone(),
                reason: "becameAd requires promotedToMain".to_string(),
            });
        }
        if !post.became_ad {
            post.became_ad = true;
            info!(post_id = %post.id, "Post converted to ad");
        }
        Ok(())
    }

    /// Run a winner policy over an account's posts and flag the selected
    /// ones. Returns how many posts were newly flagged.
    pub fn apply_winner_policy(
        account: &mut Account,
        policy: &dyn WinnerPolicy,
    ) -> Result<usize, EngineError> {
        let selected = policy.select_winners(&account.posts);
        let mut newly_flagged = 0;
        for post in &mut account.posts {
            if selected.contains(&post.id) && !post.is_winner {
                Self::mark_winner(post)?;
                newly_flagged += 1;
            }
        }
        debug!(
            account_id = %account.id,
            selected = selected.len(),
            newly_flagged,
            "Applied winner policy"
        );
        Ok(newly_flagged)
    }

    /// Stage counts over one post set.
    pub fn counters(posts: &[ContentPost]) -> PromotionCounters {
        PromotionCounters {
            winners: posts.iter().filter(|p| p.is_winner).count(),
            promoted: posts.iter().filter(|p| p.promoted_to_main).count(),
            ads: posts.iter().filter(|p| p.became_ad).count(),
        }
    }

    /// Stage counts over one account's posts.
    pub fn account_counters(account: &Account) -> PromotionCounters {
        Self::counters(&account.posts)
    }

    /// Stage counts over every post in an account collection.
    pub fn collection_counters(accounts: &[Account]) -> PromotionCounters {
        accounts
            .iter()
            .map(Self::account_counters)
            .fold(PromotionCounters::default(), |acc, c| PromotionCounters {
                winners: acc.winners + c.winners,
                promoted: acc.promoted + c.promoted,
                ads: acc.ads + c.ads,
            })
    }

    /// Advance a test account's lifecycle status.
    ///
    /// Allowed: `Active → Paused`, `Active → Completed`, `Paused → Active`,
    /// and `Completed → Winner` when `win_rate` exceeds the threshold.
    ///
    /// # Errors
    /// Rejected for accounts without a test status and for any other
    /// from/to pair.
    pub fn transition_status(
        account: &mut Account,
        to: TestStatus,
        win_rate_threshold: f64,
    ) -> Result<(), EngineError> {
        let from = account.test_status.ok_or_else(|| {
            EngineError::InvalidStatusTransition {
                account_id: account.id.clone(),
                from: "none".to_string(),
                to: to.name().to_string(),
            }
        })?;

        let allowed = matches!(
            (from, to),
            (TestStatus::Active, TestStatus::Paused)
                | (TestStatus::Active, TestStatus::Completed)
                | (TestStatus::Paused, TestStatus::Active)
        ) || (from == TestStatus::Completed
            && to == TestStatus::Winner
            && account.win_rate.value() > win_rate_threshold);

        if !allowed {
            return Err(EngineError::InvalidStatusTransition {
                account_id: account.id.clone(),
                from: from.name().to_string(),
                to: to.name().to_string(),
            });
        }

        account.test_status = Some(to);
        info!(
            account_id = %account.id,
            from = from.name(),
            to = to.name(),
            "Test account status transition"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::{AccountKind, Platform};
    use crate::domain::value_objects::metric_value::MetricValue;
    use crate::domain::value_objects::percent::Percent;
    use chrono::Utc;

    fn post(id: &str, engagement: f64, reach: f64) -> ContentPost {
        ContentPost::new(
            id,
            MetricValue::new(engagement).unwrap(),
            MetricValue::new(reach).unwrap(),
            Utc::now(),
        )
        .unwrap()
    }

    fn test_account(id: &str) -> Account {
        Account::new(
            id,
            format!("Test {}", id),
            format!("@{}", id),
            Platform::TikTok,
            AccountKind::Test,
            Some("sub-1".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_promote_requires_winner() {
        let mut p = post("p1", 100.0, 1000.0);
        let err = PromotionPipeline::promote_to_main(&mut p).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert!(!p.promoted_to_main);

        PromotionPipeline::mark_winner(&mut p).unwrap();
        assert!(PromotionPipeline::promote_to_main(&mut p).is_ok());
        assert!(p.promoted_to_main);
    }

    #[test]
    fn test_ad_requires_promotion_even_for_winner() {
        let mut p = post("p1", 100.0, 1000.0);
        PromotionPipeline::mark_winner(&mut p).unwrap();

        // Winner alone is not enough
        let err = PromotionPipeline::convert_to_ad(&mut p).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert!(!p.became_ad);

        PromotionPipeline::promote_to_main(&mut p).unwrap();
        assert!(PromotionPipeline::convert_to_ad(&mut p).is_ok());
        assert!(p.became_ad);
    }

    #[test]
    fn test_flags_are_idempotent_once_set() {
        let mut p = post("p1", 100.0, 1000.0);
        PromotionPipeline::mark_winner(&mut p).unwrap();
        PromotionPipeline::mark_winner(&mut p).unwrap();
        PromotionPipeline::promote_to_main(&mut p).unwrap();
        PromotionPipeline::promote_to_main(&mut p).unwrap();
        assert!(p.is_winner && p.promoted_to_main);
    }

    #[test]
    fn test_counter_conservation() {
        let mut posts: Vec<ContentPost> = (0..10)
            .map(|i| post(&format!("p{}", i), 100.0 + i as f64, 1000.0))
            .collect();
        for p in posts.iter_mut().take(4) {
            PromotionPipeline::mark_winner(p).unwrap();
        }
        for p in posts.iter_mut().take(2) {
            PromotionPipeline::promote_to_main(p).unwrap();
        }
        PromotionPipeline::convert_to_ad(&mut posts[0]).unwrap();

        let counters = PromotionPipeline::counters(&posts);
        assert_eq!(
            counters,
            PromotionCounters {
                winners: 4,
                promoted: 2,
                ads: 1
            }
        );
    }

    #[test]
    fn test_collection_counters_span_accounts() {
        let mut a = test_account("t1");
        a.posts = vec![post("p1", 10.0, 100.0), post("p2", 20.0, 100.0)];
        PromotionPipeline::mark_winner(&mut a.posts[0]).unwrap();

        let mut b = test_account("t2");
        b.posts = vec![post("p3", 30.0, 100.0)];
        PromotionPipeline::mark_winner(&mut b.posts[0]).unwrap();
        PromotionPipeline::promote_to_main(&mut b.posts[0]).unwrap();

        let counters = PromotionPipeline::collection_counters(&[a, b]);
        assert_eq!(counters.winners, 2);
        assert_eq!(counters.promoted, 1);
        assert_eq!(counters.ads, 0);
    }

    #[test]
    fn test_top_k_by_engagement_policy() {
        let mut account = test_account("t1");
        account.posts = vec![
            post("p1", 50.0, 5000.0),
            post("p2", 300.0, 8000.0),
            post("p3", 200.0, 200.0),
            post("p4", 120.0, 4000.0),
        ];

        // p3 has the second-best engagement but misses the reach floor
        let policy = TopKByEngagement::new(2).with_min_reach(1000.0);
        let flagged =
            PromotionPipeline::apply_winner_policy(&mut account, &policy).unwrap();
        assert_eq!(flagged, 2);
        assert!(account.posts[1].is_winner); // p2
        assert!(account.posts[3].is_winner); // p4
        assert!(!account.posts[2].is_winner); // p3 below reach floor
    }

    #[test]
    fn test_winner_policy_is_idempotent() {
        let mut account = test_account("t1");
        account.posts = vec![post("p1", 50.0, 5000.0), post("p2", 300.0, 8000.0)];
        let policy = TopKByEngagement::new(1);

        assert_eq!(
            PromotionPipeline::apply_winner_policy(&mut account, &policy).unwrap(),
            1
        );
        assert_eq!(
            PromotionPipeline::apply_winner_policy(&mut account, &policy).unwrap(),
            0
        );
    }

    #[test]
    fn test_status_active_to_paused_and_back() {
        let mut account = test_account("t1");
        assert_eq!(account.test_status, Some(TestStatus::Active));

        PromotionPipeline::transition_status(&mut account, TestStatus::Paused, 50.0).unwrap();
        assert_eq!(account.test_status, Some(TestStatus::Paused));

        PromotionPipeline::transition_status(&mut account, TestStatus::Active, 50.0).unwrap();
        assert_eq!(account.test_status, Some(TestStatus::Active));
    }

    #[test]
    fn test_status_completed_to_winner_needs_win_rate() {
        let mut account = test_account("t1");
        PromotionPipeline::transition_status(&mut account, TestStatus::Completed, 50.0).unwrap();

        account.win_rate = Percent::new(42.0).unwrap();
        let err = PromotionPipeline::transition_status(&mut account, TestStatus::Winner, 50.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStatusTransition { .. }));

        account.win_rate = Percent::new(67.5).unwrap();
        PromotionPipeline::transition_status(&mut account, TestStatus::Winner, 50.0).unwrap();
        assert_eq!(account.test_status, Some(TestStatus::Winner));
    }

    #[test]
    fn test_status_rejected_without_test_metadata() {
        let mut account = Account::new(
            "main-1",
            "Brand HQ",
            "@brand",
            Platform::Instagram,
            AccountKind::Main,
            None,
        )
        .unwrap();
        let err = PromotionPipeline::transition_status(&mut account, TestStatus::Paused, 50.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_status_winner_directly_from_active_rejected() {
        let mut account = test_account("t1");
        account.win_rate = Percent::new(90.0).unwrap();
        let err = PromotionPipeline::transition_status(&mut account, TestStatus::Winner, 50.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStatusTransition { .. }));
    }
}
