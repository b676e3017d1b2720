use super::*;

/// Tests that the audit trail reads back in causal order.
///
/// Creates a ride and pushes it through two transitions; the trail must
/// chain creation -> driver_assigned -> accepted with linked from/to
/// statuses and non-decreasing timestamps.
///
/// Expected: three rows, oldest first, statuses chained
#[tokio::test]
async fn returns_rows_in_causal_order() {
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

    for to_status in [RideStatus::DriverAssigned, RideStatus::Accepted] {
        let params = ChangeStatusParams {
            ride_id: ride.id,
            to_status,
            actor_id: None,
            actor_role: ActorRole::System,
            reason: None,
            meta: None,
        };
        let allowed = allowed_from(ActorRole::System, to_status);
        repo.change_status(&params, &allowed).await.unwrap().unwrap();
    }

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(ride.id)
        .await
        .unwrap();

    assert_eq!(history.len(), 3);
    let chain: Vec<_> = history
        .iter()
        .map(|row| (row.from_status, row.to_status))
        .collect();
    assert_eq!(
        chain,
        vec![
            (None, RideStatus::Requested),
            (Some(RideStatus::Requested), RideStatus::DriverAssigned),
            (Some(RideStatus::DriverAssigned), RideStatus::Accepted),
        ]
    );
    assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

/// Tests reading the trail of a ride that does not exist.
///
/// Expected: empty vector
#[tokio::test]
async fn unknown_ride_has_no_history() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let history = RideStatusHistoryRepository::new(db)
        .list_for_ride(999999)
        .await
        .unwrap();

    assert!(history.is_empty());
}
