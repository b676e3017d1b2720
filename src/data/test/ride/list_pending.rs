use super::*;

/// Tests that the feed only surfaces rides still awaiting a driver.
///
/// Expected: only `requested` and `driver_assigned` rides returned
#[tokio::test]
async fn returns_only_rides_awaiting_a_driver() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let requested = RideFactory::new(db).build().await.unwrap();
    let assigned = RideFactory::new(db)
        .status(RideStatus::DriverAssigned)
        .build()
        .await
        .unwrap();
    for status in [
        RideStatus::Accepted,
        RideStatus::Started,
        RideStatus::Completed,
        RideStatus::Canceled,
    ] {
        RideFactory::new(db).status(status).build().await.unwrap();
    }

    let pending = RideRepository::new(db).list_pending(50).await.unwrap();

    let ids: Vec<_> = pending.iter().map(|ride| ride.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&requested.id));
    assert!(ids.contains(&assigned.id));
}

/// Tests the feed ordering: newest requests first.
///
/// Expected: rides in reverse creation order
#[tokio::test]
async fn lists_newest_first() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = RideFactory::new(db).build().await.unwrap();
    let second = RideFactory::new(db).build().await.unwrap();
    let third = RideFactory::new(db).build().await.unwrap();

    let pending = RideRepository::new(db).list_pending(50).await.unwrap();

    let ids: Vec<_> = pending.iter().map(|ride| ride.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

/// Tests the caller-supplied bound on the feed size.
///
/// Expected: at most `limit` rides
#[tokio::test]
async fn respects_the_limit() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        RideFactory::new(db).build().await.unwrap();
    }

    let pending = RideRepository::new(db).list_pending(2).await.unwrap();

    assert_eq!(pending.len(), 2);
}

/// Tests polling an empty feed.
///
/// Expected: empty vector, no error
#[tokio::test]
async fn empty_feed_is_fine() {
    let test = TestBuilder::new().with_ride_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let pending = RideRepository::new(db).list_pending(50).await.unwrap();

    assert!(pending.is_empty());
}
