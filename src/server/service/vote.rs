use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::socket::ServerEvent,
    server::{
        cache::{keys, CacheHandle},
        data::{
            poll::PollRepository, poll_option::PollOptionRepository, user::UserRepository,
            vote::VoteRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            pagination::{Page, PageRequest},
            poll::Poll,
            vote::{CastVoteParams, IdentityKind, Vote, VoteOutcome, VoteRecord},
        },
        service::poll::{poll_not_found, PollService},
    },
};

/// Service for casting and moderating votes.
///
/// Duplicate votes are rejected per identity: the user account and IP address
/// are checked against the database, the IP, session and device identifiers
/// against cache markers that are written once a vote commits.
pub struct VoteService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a CacheHandle,
}

impl<'a> VoteService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a CacheHandle) -> Self {
        Self { db, cache }
    }

    /// Records a vote and broadcasts the new results.
    ///
    /// Checks run in order and the first failure is returned: poll exists, poll
    /// is open, deadline not passed, option belongs to the poll, authentication
    /// when required, duplicate vote.
    ///
    /// # Returns
    /// - `Ok(VoteOutcome)` - The stored vote and fresh results
    /// - `Err(AppError::NotFound)` - Poll does not exist
    /// - `Err(AppError::BadRequest)` - Poll closed or expired, foreign option, or duplicate
    /// - `Err(AppError::AuthErr)` - Poll requires a signed-in voter
    pub async fn cast_vote(&self, params: CastVoteParams) -> Result<VoteOutcome, AppError> {
        let (poll, options) = PollRepository::new(self.db)
            .get_with_options(&params.poll_id)
            .await?
            .ok_or_else(poll_not_found)?;
        let poll = Poll::from_entity(poll, options)?;

        if !poll.is_active {
            return Err(AppError::BadRequest("Poll is closed".to_string()));
        }
        if poll.deadline_passed(Utc::now()) {
            return Err(AppError::BadRequest("Poll deadline has passed".to_string()));
        }
        if !poll.has_option(&params.option_id) {
            return Err(AppError::BadRequest("Invalid option".to_string()));
        }
        if poll.require_auth && params.user_id.is_none() {
            return Err(AuthError::AuthenticationRequired(
                "Authentication required to vote".to_string(),
            )
            .into());
        }

        let scope_option = poll.allow_multiple.then_some(params.option_id.as_str());
        let scope = keys::vote_scope(&poll.id, scope_option);
        let duplicate = || {
            AppError::BadRequest(
                if poll.allow_multiple {
                    "You already voted for this option"
                } else {
                    "You already voted this"
                }
                .to_string(),
            )
        };

        let ip_address = params
            .ip_address
            .as_deref()
            .filter(|_| poll.ip_restriction);

        if self.has_db_vote(self.db, &poll.id, scope_option, &params, ip_address, true).await? {
            return Err(duplicate());
        }
        if let Some(session_id) = params.session_id.as_deref() {
            if self
                .cache
                .has_voted(&scope, IdentityKind::Session, session_id)
                .await
            {
                return Err(duplicate());
            }
        }
        if let Some(device_id) = params.device_id.as_deref() {
            if self
                .cache
                .has_voted(&scope, IdentityKind::Device, device_id)
                .await
            {
                return Err(duplicate());
            }
        }

        let txn = self.db.begin().await?;
        if self.has_db_vote(&txn, &poll.id, scope_option, &params, ip_address, false).await? {
            txn.rollback().await?;
            return Err(duplicate());
        }
        let vote = VoteRepository::new(&txn).create(&params).await?;
        PollOptionRepository::new(&txn)
            .adjust_vote_count(&params.option_id, 1)
            .await?;
        PollRepository::new(&txn)
            .adjust_total_votes(&poll.id, 1)
            .await?;
        txn.commit().await?;

        if let Some(ip) = ip_address {
            self.cache.mark_voted(&scope, IdentityKind::Ip, ip).await;
        }
        if let Some(session_id) = params.session_id.as_deref() {
            self.cache
                .mark_voted(&scope, IdentityKind::Session, session_id)
                .await;
        }
        if let Some(device_id) = params.device_id.as_deref() {
            self.cache
                .mark_voted(&scope, IdentityKind::Device, device_id)
                .await;
        }
        self.cache.invalidate_results(&poll.id).await;

        let results = PollService::new(self.db, self.cache)
            .get_results(&poll.id)
            .await?;
        self.cache
            .publish(&ServerEvent::VoteUpdate(results.clone().into_dto(None)))
            .await;

        tracing::debug!("Vote {} cast on poll {}", vote.id, poll.id);

        Ok(VoteOutcome {
            vote: Vote::from_entity(vote),
            results,
        })
    }

    /// Database duplicate check for the user account and the IP address.
    ///
    /// The IP cache marker is consulted first when `check_markers` is set.
    async fn has_db_vote<C: sea_orm::ConnectionTrait>(
        &self,
        db: &C,
        poll_id: &str,
        option_id: Option<&str>,
        params: &CastVoteParams,
        ip_address: Option<&str>,
        check_markers: bool,
    ) -> Result<bool, AppError> {
        let repo = VoteRepository::new(db);

        if let Some(user_id) = params.user_id.as_deref() {
            if repo.exists_for_user(poll_id, option_id, user_id).await? {
                return Ok(true);
            }
        }

        if let Some(ip) = ip_address {
            if check_markers {
                let scope = keys::vote_scope(poll_id, option_id);
                if self.cache.has_voted(&scope, IdentityKind::Ip, ip).await {
                    return Ok(true);
                }
            }
            if repo.exists_for_ip(poll_id, option_id, ip).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Lists a poll's votes with option text and voter, newest first.
    pub async fn get_poll_votes(
        &self,
        poll_id: &str,
        request: PageRequest,
    ) -> Result<Page<VoteRecord>, AppError> {
        let (votes, total) = VoteRepository::new(self.db)
            .get_by_poll_paginated(poll_id, request)
            .await?;

        let mut option_ids: Vec<String> = votes.iter().map(|v| v.option_id.clone()).collect();
        option_ids.sort();
        option_ids.dedup();
        let options: HashMap<String, entity::poll_option::Model> =
            PollOptionRepository::new(self.db)
                .find_by_ids(option_ids)
                .await?
                .into_iter()
                .map(|o| (o.id.clone(), o))
                .collect();

        let user_repo = UserRepository::new(self.db);
        let mut users: HashMap<String, entity::user::Model> = HashMap::new();
        for user_id in votes.iter().filter_map(|v| v.user_id.as_ref()) {
            if users.contains_key(user_id) {
                continue;
            }
            if let Some(user) = user_repo.find_by_id(user_id).await? {
                users.insert(user.id.clone(), user);
            }
        }

        let records = votes
            .into_iter()
            .map(|vote| {
                let option = options.get(&vote.option_id);
                let user = vote.user_id.as_ref().and_then(|id| users.get(id));
                VoteRecord::from_entity(vote, option, user)
            })
            .collect();

        Ok(Page::new(records, total, request))
    }

    /// Removes a vote and reverses its counter increments.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such vote
    /// - `Err(AppError::BadRequest)` - The vote belongs to another poll
    pub async fn delete_vote(&self, vote_id: &str, poll_id: &str) -> Result<(), AppError> {
        let vote = VoteRepository::new(self.db)
            .find_by_id(vote_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vote not found".to_string()))?;

        if vote.poll_id != poll_id {
            return Err(AppError::BadRequest(
                "Vote does not belong to this poll".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        VoteRepository::new(&txn).delete(&vote.id).await?;
        PollOptionRepository::new(&txn)
            .adjust_vote_count(&vote.option_id, -1)
            .await?;
        PollRepository::new(&txn)
            .adjust_total_votes(&vote.poll_id, -1)
            .await?;
        txn.commit().await?;

        self.cache.invalidate_results(poll_id).await;

        tracing::info!("Deleted vote {} from poll {}", vote_id, poll_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        cache::{memory::MemoryCache, PollCache},
        error::cache::CacheError,
        realtime::hub::Hub,
    };
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::Arc;
    use test_utils::{builder::TestBuilder, factory};

    fn cache(hub: &Hub) -> CacheHandle {
        CacheHandle::new(Arc::new(MemoryCache::new(hub.clone())), 5, 60)
    }

    /// Store whose every operation fails, like an unreachable Redis.
    struct BrokenCache;

    fn broken() -> CacheError {
        CacheError::Decode(serde_json::from_str::<()>("not json").unwrap_err())
    }

    #[async_trait]
    impl PollCache for BrokenCache {
        async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
            Err(broken())
        }

        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(broken())
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), CacheError> {
            Err(broken())
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(broken())
        }

        async fn publish(&self, _channel: &str, _payload: &str) -> Result<(), CacheError> {
            Err(broken())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            Err(broken())
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    fn ballot(poll_id: &str, option_id: &str) -> CastVoteParams {
        CastVoteParams {
            poll_id: poll_id.to_string(),
            option_id: option_id.to_string(),
            ..Default::default()
        }
    }

    fn bad_request(result: Result<VoteOutcome, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {:?}", other.map(|o| o.vote)),
        }
    }

    /// Tests the happy path of casting a vote.
    ///
    /// Verifies that counters move together, percentages are computed and a
    /// vote-update event reaches the hub.
    ///
    /// Expected: Ok with total 1 and option at 100%
    #[tokio::test]
    async fn casts_vote_and_publishes_update() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let mut rx = hub.subscribe();
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::create_poll(db).await.unwrap();

        let outcome = service
            .cast_vote(CastVoteParams {
                ip_address: Some("1.1.1.1".to_string()),
                ..ballot(&poll.id, &options[1].id)
            })
            .await
            .unwrap();

        assert_eq!(outcome.vote.option_id, options[1].id);
        assert_eq!(outcome.results.total_votes, 1);
        let dto = outcome.results.into_dto(None);
        assert_eq!(dto.options[1].vote_count, 1);
        assert_eq!(dto.options[1].percentage, 100);
        assert_eq!(dto.options[0].percentage, 0);

        let message = rx.recv().await.unwrap();
        assert_eq!(message.poll_id, poll.id);
        assert!(message.payload.contains("\"event\":\"vote-update\""));
    }

    /// Tests the order and messages of rejection checks.
    ///
    /// Expected: each precondition produces its own error
    #[tokio::test]
    async fn rejects_invalid_ballots() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (open, open_options) = factory::create_poll(db).await.unwrap();
        let (closed, closed_options) = factory::poll::PollFactory::new(db)
            .active(false)
            .build()
            .await
            .unwrap();
        let (expired, expired_options) = factory::poll::PollFactory::new(db)
            .deadline(Utc::now() - Duration::minutes(1))
            .build()
            .await
            .unwrap();
        let (auth_only, auth_options) = factory::poll::PollFactory::new(db)
            .require_auth(true)
            .build()
            .await
            .unwrap();

        assert!(matches!(
            service.cast_vote(ballot("missing", &open_options[0].id)).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(
            bad_request(service.cast_vote(ballot(&closed.id, &closed_options[0].id)).await),
            "Poll is closed"
        );
        assert_eq!(
            bad_request(service.cast_vote(ballot(&expired.id, &expired_options[0].id)).await),
            "Poll deadline has passed"
        );
        assert_eq!(
            bad_request(service.cast_vote(ballot(&open.id, &closed_options[0].id)).await),
            "Invalid option"
        );
        assert!(matches!(
            service.cast_vote(ballot(&auth_only.id, &auth_options[0].id)).await,
            Err(AppError::AuthErr(AuthError::AuthenticationRequired(_)))
        ));
    }

    /// Tests duplicate detection for each identity scheme on a single-vote poll.
    ///
    /// Expected: second vote from the same user, IP, session or device is rejected
    #[tokio::test]
    async fn rejects_duplicates_per_identity() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::create_poll(db).await.unwrap();
        let user = factory::create_user(db).await.unwrap();

        let first = [
            CastVoteParams {
                user_id: Some(user.id.clone()),
                ..ballot(&poll.id, &options[0].id)
            },
            CastVoteParams {
                ip_address: Some("2.2.2.2".to_string()),
                ..ballot(&poll.id, &options[0].id)
            },
            CastVoteParams {
                session_id: Some("sess".to_string()),
                ..ballot(&poll.id, &options[0].id)
            },
            CastVoteParams {
                device_id: Some("dev".to_string()),
                ..ballot(&poll.id, &options[0].id)
            },
        ];

        for params in first {
            service.cast_vote(params.clone()).await.unwrap();

            let again = CastVoteParams {
                option_id: options[1].id.clone(),
                ..params
            };
            assert_eq!(
                bad_request(service.cast_vote(again).await),
                "You already voted this"
            );
        }

        let results = PollService::new(db, &cache).get_results(&poll.id).await.unwrap();
        assert_eq!(results.total_votes, 4);
        assert_eq!(results.options[0].vote_count, 4);
        assert_eq!(results.options[1].vote_count, 0);
    }

    /// Tests that the IP database fallback catches votes without a cache marker.
    ///
    /// Expected: rejected even though the marker store is empty
    #[tokio::test]
    async fn falls_back_to_database_for_ip() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::create_poll(db).await.unwrap();
        factory::vote::VoteFactory::new(db, &poll.id, &options[0].id)
            .ip_address("3.3.3.3")
            .counted()
            .build()
            .await
            .unwrap();

        let result = service
            .cast_vote(CastVoteParams {
                ip_address: Some("3.3.3.3".to_string()),
                ..ballot(&poll.id, &options[1].id)
            })
            .await;

        assert_eq!(bad_request(result), "You already voted this");
    }

    /// Tests voting while every cache operation fails.
    ///
    /// Expected: the vote is stored and a repeat from the same IP is still
    /// rejected through the database check
    #[tokio::test]
    async fn votes_survive_cache_failures() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let cache = CacheHandle::new(Arc::new(BrokenCache), 5, 60);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::create_poll(db).await.unwrap();

        let outcome = service
            .cast_vote(CastVoteParams {
                ip_address: Some("4.4.4.4".to_string()),
                session_id: Some("sess-broken".to_string()),
                ..ballot(&poll.id, &options[0].id)
            })
            .await
            .unwrap();
        assert_eq!(outcome.results.total_votes, 1);

        let result = service
            .cast_vote(CastVoteParams {
                ip_address: Some("4.4.4.4".to_string()),
                ..ballot(&poll.id, &options[1].id)
            })
            .await;
        assert_eq!(bad_request(result), "You already voted this");
        assert_eq!(cache.status().await, "disconnected");
    }

    /// Tests that IP checks are skipped when the poll disables IP restriction.
    ///
    /// Expected: two votes from the same IP both succeed
    #[tokio::test]
    async fn ignores_ip_without_restriction() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::poll::PollFactory::new(db)
            .ip_restriction(false)
            .build()
            .await
            .unwrap();

        for option in &options {
            service
                .cast_vote(CastVoteParams {
                    ip_address: Some("4.4.4.4".to_string()),
                    ..ballot(&poll.id, &option.id)
                })
                .await
                .unwrap();
        }
        service
            .cast_vote(CastVoteParams {
                ip_address: Some("4.4.4.4".to_string()),
                ..ballot(&poll.id, &options[0].id)
            })
            .await
            .unwrap();

        assert!(!cache.has_voted(&poll.id, IdentityKind::Ip, "4.4.4.4").await);
    }

    /// Tests allow-multiple polls, where the duplicate scope is the option.
    ///
    /// Expected: different options accepted, same option rejected
    #[tokio::test]
    async fn allows_one_vote_per_option_when_multiple() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::poll::PollFactory::new(db)
            .allow_multiple(true)
            .build()
            .await
            .unwrap();
        let identity = |option_id: &str| CastVoteParams {
            ip_address: Some("5.5.5.5".to_string()),
            session_id: Some("s-5".to_string()),
            ..ballot(&poll.id, option_id)
        };

        service.cast_vote(identity(&options[0].id)).await.unwrap();
        service.cast_vote(identity(&options[1].id)).await.unwrap();

        assert_eq!(
            bad_request(service.cast_vote(identity(&options[0].id)).await),
            "You already voted for this option"
        );

        let results = PollService::new(db, &cache).get_results(&poll.id).await.unwrap();
        assert_eq!(results.total_votes, 2);
    }

    /// Tests listing votes with their option text and voter.
    ///
    /// Expected: records newest first with joined details
    #[tokio::test]
    async fn lists_poll_votes() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (user, poll, options) = factory::helpers::create_poll_with_creator(db).await.unwrap();
        factory::vote::VoteFactory::new(db, &poll.id, &options[1].id)
            .user_id(&user.id)
            .counted()
            .build()
            .await
            .unwrap();
        factory::create_vote(db, &poll.id, &options[0].id).await.unwrap();

        let page = service
            .get_poll_votes(&poll.id, PageRequest::new(None, None, 50, 100))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let with_voter = page
            .items
            .iter()
            .find(|record| record.voter.is_some())
            .unwrap();
        assert_eq!(with_voter.option_text.as_deref(), Some("Option B"));
        assert_eq!(with_voter.voter.as_ref().unwrap().email, user.email);
    }

    /// Tests deleting a vote and the counter rollback.
    ///
    /// Expected: counters back to zero; wrong poll and missing vote rejected
    #[tokio::test]
    async fn deletes_vote_and_decrements_counters() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let cache = cache(&hub);
        let service = VoteService::new(db, &cache);

        let (poll, options) = factory::create_poll(db).await.unwrap();
        let (other, _) = factory::create_poll(db).await.unwrap();
        let vote = factory::create_vote(db, &poll.id, &options[0].id).await.unwrap();

        assert!(matches!(
            service.delete_vote(&vote.id, &other.id).await,
            Err(AppError::BadRequest(msg)) if msg == "Vote does not belong to this poll"
        ));

        service.delete_vote(&vote.id, &poll.id).await.unwrap();

        let results = PollService::new(db, &cache).get_results(&poll.id).await.unwrap();
        assert_eq!(results.total_votes, 0);
        assert_eq!(results.options[0].vote_count, 0);

        assert!(matches!(
            service.delete_vote(&vote.id, &poll.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
