//! Occupancy protocol behavior tests
//!
//! Exercises key contention and billing on a paused tokio clock, so every
//! simulated day takes its configured duration without any wall time.

use std::{sync::Arc, time::Duration};

use hotelsim_core::{
    ClientId, Environment, EventSink, Hotel, HotelConfig, HotelEvent, PriceSchedule, RoomId, Stay,
};
use hotelsim_harness::{ExclusiveRoomHold, Invariant, RecordingSink, RunSnapshot, SimEnv};
use proptest::prelude::*;

fn single_room_hotel(price: u64, sink: &RecordingSink) -> Arc<Hotel<SimEnv, RecordingSink>> {
    let config =
        HotelConfig { room_count: 1, prices: PriceSchedule::flat(price), ..HotelConfig::default() };
    Arc::new(Hotel::open(config, SimEnv::with_seed(0), sink.clone()))
}

fn spawn_stay<S: EventSink>(
    hotel: &Arc<Hotel<SimEnv, S>>,
    client: u32,
    budget: u64,
) -> tokio::task::JoinHandle<Stay> {
    let hotel = Arc::clone(hotel);
    tokio::spawn(async move {
        let room = hotel.registry().get(RoomId(1)).unwrap();
        hotel.occupancy().occupy(ClientId(client), room, budget).await
    })
}

/// A second guest who picked the same room waits for the key and only then
/// starts paying.
#[tokio::test(start_paused = true)]
async fn second_guest_waits_for_key() {
    let sink = RecordingSink::new();
    let hotel = single_room_hotel(2000, &sink);
    let start = hotel.env().now();

    let first = spawn_stay(&hotel, 1, 6000);
    let second = spawn_stay(&hotel, 2, 4000);

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert_eq!(first.days, 3);
    assert_eq!(second.days, 2);
    assert_eq!(hotel.revenue().total(), 10_000);
    assert!(!hotel.registry().get(RoomId(1)).unwrap().is_occupied());

    // Five days of two seconds each, one guest after the other
    assert!(hotel.env().now() - start >= Duration::from_secs(10));

    let run = RunSnapshot::from_events(sink.events());
    assert_eq!(ExclusiveRoomHold.check(&run), Ok(()));

    let check_ins: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            HotelEvent::CheckedIn { client, .. } => Some(client),
            _ => None,
        })
        .collect();
    assert_eq!(check_ins, vec![ClientId(1), ClientId(2)]);
}

/// Many guests queued on one key never overlap.
#[tokio::test(start_paused = true)]
async fn queued_guests_never_overlap() {
    let sink = RecordingSink::new();
    let hotel = single_room_hotel(1000, &sink);

    let handles: Vec<_> = (1..=8).map(|client| spawn_stay(&hotel, client, 2500)).collect();
    for handle in handles {
        let stay = handle.await.unwrap();
        assert_eq!(stay.days, 2);
        assert_eq!(stay.remaining, 500);
    }

    assert_eq!(hotel.revenue().total(), 8 * 2000);
    assert_eq!(ExclusiveRoomHold.check(&RunSnapshot::from_events(sink.events())), Ok(()));
}

/// Stays in different rooms run side by side.
#[tokio::test(start_paused = true)]
async fn separate_rooms_bill_concurrently() {
    let sink = RecordingSink::new();
    let config =
        HotelConfig { room_count: 2, prices: PriceSchedule::flat(2000), ..HotelConfig::default() };
    let hotel = Arc::new(Hotel::open(config, SimEnv::with_seed(0), sink.clone()));
    let start = hotel.env().now();

    let handles: Vec<_> = [1u32, 2]
        .into_iter()
        .map(|id| {
            let hotel = Arc::clone(&hotel);
            tokio::spawn(async move {
                let room = hotel.registry().get(RoomId(id)).unwrap();
                hotel.occupancy().occupy(ClientId(id), room, 6000).await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().days, 3);
    }

    let elapsed = hotel.env().now() - start;
    assert!(elapsed >= Duration::from_secs(6));
    assert!(elapsed < Duration::from_secs(12), "stays in separate rooms must not serialize");
    assert_eq!(hotel.revenue().total(), 12_000);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a budget covering exactly k days bills exactly k days
    #[test]
    fn prop_stay_length_is_budget_over_rate(
        rate in 500u64..10_000,
        budget in 0u64..100_000,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()?;
        let sink = RecordingSink::new();
        let hotel = single_room_hotel(rate, &sink);

        let stay = runtime.block_on(async {
            let room = hotel.registry().get(RoomId(1)).unwrap();
            hotel.occupancy().occupy(ClientId(1), room, budget).await
        });

        prop_assert_eq!(stay.days, budget / rate);
        prop_assert_eq!(stay.paid, stay.days * rate);
        prop_assert!(stay.remaining < rate);
        prop_assert_eq!(stay.remaining + stay.paid, budget);
        prop_assert_eq!(hotel.revenue().total(), stay.paid);

        let days_logged = sink
            .events()
            .iter()
            .filter(|event| matches!(event, HotelEvent::DayElapsed { .. }))
            .count() as u64;
        prop_assert_eq!(days_logged, stay.days);
    }
}
