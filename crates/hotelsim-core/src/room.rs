//! Room registry and availability query.
//!
//! The registry is a fixed, ordered set of rooms built once per simulation.
//! Each room carries its own key (a tokio mutex). The `occupied` flag is
//! only written by the key holder but is read without the key by
//! [`RoomRegistry::available_rooms`], so an "available" room is a hint: by
//! the time a client reaches for the key someone else may hold it.

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use tokio::sync::{Mutex, MutexGuard};

use crate::config::PriceSchedule;

/// Room number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced, lockable room.
///
/// # Invariants
///
/// - `occupied` is true only while a client holds `key`
/// - At most one client holds `key` at a time
pub struct Room {
    id: RoomId,
    daily_cost: u64,
    occupied: AtomicBool,
    key: Mutex<()>,
}

/// Proof that the caller holds a room's key.
///
/// Dropping it releases the room to the next waiting client.
pub struct RoomKey<'a> {
    room: &'a Room,
    _guard: MutexGuard<'a, ()>,
}

impl Room {
    fn new(id: RoomId, daily_cost: u64) -> Self {
        Self { id, daily_cost, occupied: AtomicBool::new(false), key: Mutex::new(()) }
    }

    /// Room number.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Price of one day.
    pub fn daily_cost(&self) -> u64 {
        self.daily_cost
    }

    /// Whether a client is currently staying in the room.
    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    /// Whether a client with `budget` could rent this room right now.
    pub fn is_available_for(&self, budget: u64) -> bool {
        !self.is_occupied() && budget >= self.daily_cost
    }

    /// Wait for the key and mark the room occupied.
    ///
    /// Waiters are served in FIFO order by tokio's mutex.
    pub async fn acquire(&self) -> RoomKey<'_> {
        let guard = self.key.lock().await;
        self.occupied.store(true, Ordering::Release);
        RoomKey { room: self, _guard: guard }
    }

    /// Take the key only if nobody holds it.
    pub fn try_acquire(&self) -> Option<RoomKey<'_>> {
        let guard = self.key.try_lock().ok()?;
        self.occupied.store(true, Ordering::Release);
        Some(RoomKey { room: self, _guard: guard })
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("daily_cost", &self.daily_cost)
            .field("occupied", &self.is_occupied())
            .finish_non_exhaustive()
    }
}

impl RoomKey<'_> {
    /// The room this key opens.
    pub fn room(&self) -> &Room {
        self.room
    }
}

impl Drop for RoomKey<'_> {
    fn drop(&mut self) {
        // Cleared while the guard is still held so a release never
        // overwrites the flag of the next holder.
        self.room.occupied.store(false, Ordering::Release);
    }
}

/// Fixed, ordered collection of rooms.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Build `room_count` free rooms priced by `prices`.
    ///
    /// Room ids are `index + 1`. Callers validate `room_count` and `prices`
    /// through [`crate::HotelConfig::validate`].
    pub fn initialize(room_count: usize, prices: &PriceSchedule) -> Self {
        let rooms = (0..room_count)
            .map(|index| Room::new(RoomId(index as u32 + 1), prices.price_for(index)))
            .collect();

        Self { rooms }
    }

    /// All rooms in registry order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room by number.
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.rooms.get(index)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the registry has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Lowest daily rate in the hotel.
    pub fn cheapest_rate(&self) -> Option<u64> {
        self.rooms.iter().map(Room::daily_cost).min()
    }

    /// Number of rooms currently marked occupied.
    pub fn occupied_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.is_occupied()).count()
    }

    /// Free rooms a client with `budget` can afford for at least one day,
    /// in registry order.
    ///
    /// Reads occupancy flags without taking any key.
    pub fn available_rooms(&self, budget: u64) -> Vec<&Room> {
        let available: Vec<&Room> =
            self.rooms.iter().filter(|room| room.is_available_for(budget)).collect();

        tracing::trace!(budget, available = available.len(), "availability scan");
        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rooms: &[&Room]) -> Vec<u32> {
        rooms.iter().map(|room| room.id().0).collect()
    }

    #[test]
    fn initialize_assigns_ids_and_tiers() {
        let registry = RoomRegistry::initialize(25, &PriceSchedule::default());

        assert_eq!(registry.len(), 25);
        assert_eq!(registry.get(RoomId(1)).map(Room::daily_cost), Some(2000));
        assert_eq!(registry.get(RoomId(10)).map(Room::daily_cost), Some(2000));
        assert_eq!(registry.get(RoomId(11)).map(Room::daily_cost), Some(4000));
        assert_eq!(registry.get(RoomId(20)).map(Room::daily_cost), Some(4000));
        assert_eq!(registry.get(RoomId(21)).map(Room::daily_cost), Some(6000));
        assert_eq!(registry.get(RoomId(25)).map(Room::daily_cost), Some(6000));
        assert!(registry.rooms().iter().all(|room| !room.is_occupied()));
        assert_eq!(registry.cheapest_rate(), Some(2000));
    }

    #[test]
    fn get_rejects_out_of_range_ids() {
        let registry = RoomRegistry::initialize(3, &PriceSchedule::flat(100));

        assert!(registry.get(RoomId(0)).is_none());
        assert!(registry.get(RoomId(4)).is_none());
    }

    #[test]
    fn budget_below_cheapest_rate_finds_nothing() {
        let registry = RoomRegistry::initialize(25, &PriceSchedule::default());

        assert!(registry.available_rooms(0).is_empty());
        assert!(registry.available_rooms(1999).is_empty());
    }

    #[test]
    fn availability_filters_by_price_in_registry_order() {
        let registry = RoomRegistry::initialize(25, &PriceSchedule::default());

        assert_eq!(ids(&registry.available_rooms(2000)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&registry.available_rooms(5999)), (1..=20).collect::<Vec<_>>());
        assert_eq!(ids(&registry.available_rooms(18_000)), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn availability_is_idempotent() {
        let registry = RoomRegistry::initialize(25, &PriceSchedule::default());

        let first = ids(&registry.available_rooms(4500));
        let second = ids(&registry.available_rooms(4500));
        assert_eq!(first, second);
    }

    #[test]
    fn occupied_rooms_are_hidden_until_released() {
        let registry = RoomRegistry::initialize(3, &PriceSchedule::flat(100));
        let room = registry.get(RoomId(2)).unwrap();

        let key = room.try_acquire().unwrap();
        assert!(room.is_occupied());
        assert_eq!(ids(&registry.available_rooms(100)), vec![1, 3]);
        assert_eq!(registry.occupied_count(), 1);

        drop(key);
        assert!(!room.is_occupied());
        assert_eq!(ids(&registry.available_rooms(100)), vec![1, 2, 3]);
    }

    #[test]
    fn key_is_exclusive() {
        let registry = RoomRegistry::initialize(1, &PriceSchedule::flat(100));
        let room = registry.get(RoomId(1)).unwrap();

        let key = room.try_acquire().unwrap();
        assert_eq!(key.room().id(), RoomId(1));
        assert!(room.try_acquire().is_none());

        drop(key);
        assert!(room.try_acquire().is_some());
    }

    #[tokio::test]
    async fn acquire_waits_for_release() {
        let registry = std::sync::Arc::new(RoomRegistry::initialize(1, &PriceSchedule::flat(100)));
        let room = registry.get(RoomId(1)).unwrap();
        let key = room.acquire().await;

        let waiter = {
            let registry = std::sync::Arc::clone(&registry);
            tokio::spawn(async move {
                let room = registry.get(RoomId(1)).unwrap();
                let key = room.acquire().await;
                key.room().is_occupied()
            })
        };

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        drop(key);
        assert!(waiter.await.unwrap());
        assert!(!room.is_occupied());
    }
}
