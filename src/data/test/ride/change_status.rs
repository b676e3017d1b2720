use super::*;

async fn apply(
    repo: &RideRepository<'_>,
    ride_id: i32,
    to_status: RideStatus,
    actor_role: ActorRole,
    reason: Option<&str>,
) -> Option<crate::model::ride::Ride> {
    let params = change(ride_id, to_status, actor_role, reason);
    let allowed = allowed_from(actor_role, to_status);
    repo.change_status(&params, &allowed).await.unwrap()
}

/// Tests a client canceling a freshly requested ride.
///
/// Verifies the cancellation timestamp and reason are set and that the audit
/// record captures the requested -> canceled transition.
///
/// Expected: Ok(Some) with canceled_at set and one new history row
#[tokio::test]
async fn client_cancels_a_requested_ride() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RideRepository::new(db);
    let ride = repo
        .create(CreateRideParams {
            client_id: 7,
            ..Default::default()
        })
        .await
        .unwrap();

    let canceled = apply(
        &repo,
        ride.id,
        RideStatus::Canceled,
        ActorRole::Client,
        Some("changed my mind"),
    )
    .await
    .unwrap();

    assert_eq!(canceled.status, RideStatus::Canceled);
    assert!(canceled.canceled_at.is_some());
    assert_eq!(canceled.cancellation_reason.as_deref(), Some("changed my mind"));
    assert_eq!(canceled.status_reason.as_deref(), Some("changed my mind"));
    assert!(canceled.updated_at >= ride.updated_at);

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].from_status, Some(RideStatus::Requested));
    assert_eq!(history[1].to_status, RideStatus::Canceled);
    assert_eq!(history[1].reason.as_deref(), Some("changed my mind"));
}

/// Tests a driver walking a ride through the whole pickup sequence.
///
/// Verifies each step of accepted -> arrived -> started -> completed, the
/// status-specific timestamps, and the audit trail chain.
///
/// Expected: all steps Ok(Some); started_at <= completed_at; four new
/// history rows chaining the statuses
#[tokio::test]
async fn driver_moves_through_the_pickup_sequence() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = RideFactory::new(db)
        .status(RideStatus::DriverAssigned)
        .driver_profile_id(Some(5))
        .build()
        .await
        .unwrap();

    let repo = RideRepository::new(db);
    let steps = [
        RideStatus::Accepted,
        RideStatus::Arrived,
        RideStatus::Started,
        RideStatus::Completed,
    ];
    let mut last = None;
    for to_status in steps {
        last = apply(&repo, ride.id, to_status, ActorRole::Driver, None).await;
        assert!(last.is_some(), "step into {to_status:?} must succeed");
    }

    let completed = last.unwrap();
    assert_eq!(completed.status, RideStatus::Completed);
    let started_at = completed.started_at.unwrap();
    let completed_at = completed.completed_at.unwrap();
    assert!(started_at <= completed_at);
    assert!(completed.canceled_at.is_none());

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 4);
    let mut from = RideStatus::DriverAssigned;
    for (row, to_status) in history.iter().zip(steps) {
        assert_eq!(row.from_status, Some(from));
        assert_eq!(row.to_status, to_status);
        assert_eq!(row.actor_role, ActorRole::Driver);
        from = to_status;
    }
}

/// Tests that a role cannot take a shortcut the table does not allow.
///
/// A driver may only complete a started ride; trying to complete a
/// requested one must leave the ride and its audit trail untouched.
///
/// Expected: Ok(None), ride unchanged, no history row
#[tokio::test]
async fn rejects_a_transition_the_role_may_not_make() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = RideFactory::new(db).build().await.unwrap();

    let repo = RideRepository::new(db);
    let result = apply(&repo, ride.id, RideStatus::Completed, ActorRole::Driver, None).await;
    assert!(result.is_none());

    let unchanged = repo.get_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, RideStatus::Requested);
    assert!(unchanged.completed_at.is_none());

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

/// Tests that a missing ride reports the same no-op as a rejected
/// transition.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_ride_is_a_noop() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RideRepository::new(db);
    let result = apply(&repo, 999999, RideStatus::Canceled, ActorRole::Client, None).await;

    assert!(result.is_none());
}

/// Tests that terminal statuses absorb every transition attempt.
///
/// For both `completed` and `canceled`, every (role, target) combination
/// must be a no-op.
///
/// Expected: Ok(None) for all combinations, no history rows
#[tokio::test]
async fn terminal_statuses_admit_no_transitions() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RideRepository::new(db);
    for terminal in [RideStatus::Completed, RideStatus::Canceled] {
        let ride = RideFactory::new(db)
            .status(terminal)
            .driver_profile_id(Some(5))
            .build()
            .await
            .unwrap();

        for actor_role in [ActorRole::Client, ActorRole::Driver, ActorRole::System] {
            for to_status in RideStatus::iter() {
                let result =
                    apply(&repo, ride.id, to_status, actor_role, None).await;
                assert!(
                    result.is_none(),
                    "{actor_role:?} must not move a {terminal:?} ride to {to_status:?}"
                );
            }
        }

        let history = RideStatusHistoryRepository::new(db)
            .list_for_ride(ride.id)
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}

/// Tests that of two conflicting writers, the loser observes a no-op.
///
/// The driver completes a started ride; a cancellation arriving afterwards
/// finds the ride outside its permitted `from` set and must not apply.
///
/// Expected: first Ok(Some), second Ok(None), exactly one history row
#[tokio::test]
async fn losing_writer_observes_a_noop() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = RideFactory::new(db)
        .status(RideStatus::Started)
        .driver_profile_id(Some(5))
        .build()
        .await
        .unwrap();

    let repo = RideRepository::new(db);
    let completed = apply(&repo, ride.id, RideStatus::Completed, ActorRole::Driver, None).await;
    assert!(completed.is_some());

    let canceled = apply(
        &repo,
        ride.id,
        RideStatus::Canceled,
        ActorRole::Driver,
        Some("too late"),
    )
    .await;
    assert!(canceled.is_none());

    let fresh = repo.get_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(fresh.status, RideStatus::Completed);
    assert!(fresh.canceled_at.is_none());

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

/// Tests that the transition metadata lands in the audit record.
///
/// Expected: history row carries actor, role, reason and meta
#[tokio::test]
async fn records_actor_and_meta_in_the_audit_trail() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = RideFactory::new(db).build().await.unwrap();

    let repo = RideRepository::new(db);
    let params = ChangeStatusParams {
        ride_id: ride.id,
        to_status: RideStatus::DriverAssigned,
        actor_id: Some(1001),
        actor_role: ActorRole::System,
        reason: Some("auto-dispatch".to_string()),
        meta: Some(serde_json::json!({"dispatcher": "radius-search"})),
    };
    let allowed = allowed_from(ActorRole::System, RideStatus::DriverAssigned);
    repo.change_status(&params, &allowed).await.unwrap().unwrap();

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].changed_by, Some(1001));
    assert_eq!(history[0].actor_role, ActorRole::System);
    assert_eq!(history[0].reason.as_deref(), Some("auto-dispatch"));
    assert_eq!(
        history[0].meta,
        Some(serde_json::json!({"dispatcher": "radius-search"}))
    );
}
