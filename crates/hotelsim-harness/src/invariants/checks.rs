//! Standard invariant checks.
//!
//! These capture what must be true of any run, not specific scenarios.

use hotelsim_core::{ClientId, HotelEvent};

use super::{Invariant, InvariantResult, RunSnapshot, Violation};

/// At most one client holds a room's key at any instant.
///
/// Per room, check-ins and check-outs must alternate, and each check-out
/// must come from the client that checked in. A finished run leaves no room
/// held.
pub struct ExclusiveRoomHold;

impl Invariant for ExclusiveRoomHold {
    fn name(&self) -> &'static str {
        "ExclusiveRoomHold"
    }

    fn check(&self, run: &RunSnapshot) -> InvariantResult {
        for (room, holds) in run.holds_by_room() {
            let mut holder: Option<ClientId> = None;

            for event in holds {
                match (event, holder) {
                    (HotelEvent::CheckedIn { client, .. }, None) => holder = Some(*client),
                    (HotelEvent::CheckedIn { client, .. }, Some(current)) => {
                        return Err(Violation {
                            invariant: self.name(),
                            message: format!(
                                "room {room}: client {client} checked in while client {current} \
                                 holds the key"
                            ),
                        });
                    },
                    (HotelEvent::CheckedOut { client, .. }, Some(current)) if *client == current => {
                        holder = None;
                    },
                    (HotelEvent::CheckedOut { client, .. }, _) => {
                        return Err(Violation {
                            invariant: self.name(),
                            message: format!(
                                "room {room}: client {client} checked out without holding the key"
                            ),
                        });
                    },
                    _ => {},
                }
            }

            if let (Some(current), Some(_)) = (holder, run.reported_revenue()) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("room {room}: client {current} still holds the key at close"),
                });
            }
        }
        Ok(())
    }
}

/// A stay lasts exactly as many days as the budget covers.
///
/// Day numbers run 1, 2, ... with `remaining = budget - day * rate`, and the
/// check-out reports `budget / rate` days and `days * rate` paid.
pub struct StayAccounting;

impl StayAccounting {
    fn violation(&self, client: ClientId, message: String) -> Violation {
        Violation { invariant: self.name(), message: format!("client {client}: {message}") }
    }
}

impl Invariant for StayAccounting {
    fn name(&self) -> &'static str {
        "StayAccounting"
    }

    fn check(&self, run: &RunSnapshot) -> InvariantResult {
        for (client, events) in run.by_client() {
            let mut budget = None;
            let mut rate = None;
            let mut days_seen = 0u64;

            for event in events {
                match event {
                    HotelEvent::Arrived { budget: amount, .. } => budget = Some(*amount),
                    HotelEvent::RoomChosen { daily_cost, .. } => rate = Some(*daily_cost),
                    HotelEvent::DayElapsed { day, remaining, .. } => {
                        days_seen += 1;
                        if *day != days_seen {
                            return Err(self.violation(
                                client,
                                format!("day {day} reported, expected day {days_seen}"),
                            ));
                        }

                        let expected = budget.zip(rate).and_then(|(b, r)| b.checked_sub(day * r));
                        if expected != Some(*remaining) {
                            return Err(self.violation(
                                client,
                                format!("day {day} left {remaining}, expected {expected:?}"),
                            ));
                        }
                    },
                    HotelEvent::CheckedOut { days, paid, .. } => {
                        let Some((b, r)) = budget.zip(rate) else {
                            return Err(self.violation(
                                client,
                                "checked out without an arrival budget and a chosen rate"
                                    .to_string(),
                            ));
                        };

                        if b.checked_div(r) != Some(*days) || *days != days_seen {
                            return Err(self.violation(
                                client,
                                format!(
                                    "stayed {days} days ({days_seen} billed) on budget {b} at \
                                     rate {r}"
                                ),
                            ));
                        }

                        if *paid != days * r {
                            return Err(self.violation(
                                client,
                                format!("paid {paid} for {days} days at rate {r}"),
                            ));
                        }
                    },
                    _ => {},
                }
            }
        }
        Ok(())
    }
}

/// Reported revenue equals the sum of what every guest paid.
pub struct RevenueConservation;

impl Invariant for RevenueConservation {
    fn name(&self) -> &'static str {
        "RevenueConservation"
    }

    fn check(&self, run: &RunSnapshot) -> InvariantResult {
        let Some(reported) = run.reported_revenue() else {
            return Ok(());
        };

        let paid = run.paid_total();
        if reported != paid {
            return Err(Violation {
                invariant: self.name(),
                message: format!("reported revenue {reported}, guests paid {paid}"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Expected,
    Arrived,
    Chosen,
    InRoom,
    Out,
    Done,
}

/// Each client's events follow the visit order.
///
/// `Arrived` then either `TurnedAway`, or `RoomChosen`, `CheckedIn`, any
/// number of `DayElapsed`, `CheckedOut`, `Departed`. In a finished run every
/// client has reached the end of its visit.
pub struct VisitLifecycle;

impl Invariant for VisitLifecycle {
    fn name(&self) -> &'static str {
        "VisitLifecycle"
    }

    fn check(&self, run: &RunSnapshot) -> InvariantResult {
        let finished = run.reported_revenue().is_some();

        for (client, events) in run.by_client() {
            let mut phase = Phase::Expected;

            for event in events {
                phase = match (phase, event) {
                    (Phase::Expected, HotelEvent::Arrived { .. }) => Phase::Arrived,
                    (Phase::Arrived, HotelEvent::TurnedAway { .. })
                    | (Phase::Out, HotelEvent::Departed { .. }) => Phase::Done,
                    (Phase::Arrived, HotelEvent::RoomChosen { .. }) => Phase::Chosen,
                    (Phase::Chosen, HotelEvent::CheckedIn { .. })
                    | (Phase::InRoom, HotelEvent::DayElapsed { .. }) => Phase::InRoom,
                    (Phase::InRoom, HotelEvent::CheckedOut { .. }) => Phase::Out,
                    (phase, event) => {
                        return Err(Violation {
                            invariant: self.name(),
                            message: format!("client {client}: {event:?} in phase {phase:?}"),
                        });
                    },
                };
            }

            if finished && phase != Phase::Done {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("client {client}: run finished in phase {phase:?}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hotelsim_core::RoomId;
    use proptest::prelude::*;

    use super::*;
    use crate::invariants::InvariantRegistry;

    fn stay(client: u32, room: u32, budget: u64, rate: u64) -> Vec<HotelEvent> {
        let client = ClientId(client);
        let room = RoomId(room);
        let days = budget / rate;

        let mut events = vec![
            HotelEvent::Arrived { client, budget },
            HotelEvent::RoomChosen { client, room, daily_cost: rate },
            HotelEvent::CheckedIn { client, room },
        ];
        for day in 1..=days {
            events.push(HotelEvent::DayElapsed { client, room, day, remaining: budget - day * rate });
        }
        events.push(HotelEvent::CheckedOut { client, room, days, paid: days * rate });
        events.push(HotelEvent::Departed { client, room });
        events
    }

    #[test]
    fn sequential_stays_in_one_room_pass() {
        let mut events = stay(1, 4, 6000, 2000);
        events.extend(stay(2, 4, 4500, 2000));
        events.push(HotelEvent::AllClientsLeft { clients: 2 });
        events.push(HotelEvent::RevenueReported { revenue: 10_000 });

        let run = RunSnapshot::from_events(events);
        assert_eq!(ExclusiveRoomHold.check(&run), Ok(()));
        assert_eq!(StayAccounting.check(&run), Ok(()));
        assert_eq!(RevenueConservation.check(&run), Ok(()));
        assert_eq!(VisitLifecycle.check(&run), Ok(()));
    }

    #[test]
    fn overlapping_check_in_is_detected() {
        let run = RunSnapshot::from_events(vec![
            HotelEvent::CheckedIn { client: ClientId(1), room: RoomId(7) },
            HotelEvent::CheckedIn { client: ClientId(2), room: RoomId(7) },
        ]);

        assert!(ExclusiveRoomHold.check(&run).is_err());
    }

    #[test]
    fn check_out_by_stranger_is_detected() {
        let run = RunSnapshot::from_events(vec![
            HotelEvent::CheckedIn { client: ClientId(1), room: RoomId(7) },
            HotelEvent::CheckedOut { client: ClientId(2), room: RoomId(7), days: 0, paid: 0 },
        ]);

        assert!(ExclusiveRoomHold.check(&run).is_err());
    }

    #[test]
    fn short_stay_is_detected() {
        let client = ClientId(1);
        let room = RoomId(1);
        let run = RunSnapshot::from_events(vec![
            HotelEvent::Arrived { client, budget: 4000 },
            HotelEvent::RoomChosen { client, room, daily_cost: 2000 },
            HotelEvent::CheckedIn { client, room },
            HotelEvent::DayElapsed { client, room, day: 1, remaining: 2000 },
            HotelEvent::CheckedOut { client, room, days: 1, paid: 2000 },
        ]);

        assert!(StayAccounting.check(&run).is_err());
    }

    #[test]
    fn revenue_mismatch_is_detected() {
        let mut events = stay(1, 1, 2000, 2000);
        events.push(HotelEvent::RevenueReported { revenue: 4000 });

        let violation = RevenueConservation.check(&RunSnapshot::from_events(events)).unwrap_err();
        assert_eq!(violation.invariant, "RevenueConservation");
    }

    #[test]
    fn out_of_order_visit_is_detected() {
        let client = ClientId(3);
        let run = RunSnapshot::from_events(vec![
            HotelEvent::Arrived { client, budget: 2000 },
            HotelEvent::CheckedIn { client, room: RoomId(1) },
        ]);

        assert!(VisitLifecycle.check(&run).is_err());
    }

    #[test]
    fn unfinished_visit_in_closed_run_is_detected() {
        let run = RunSnapshot::from_events(vec![
            HotelEvent::Arrived { client: ClientId(1), budget: 2000 },
            HotelEvent::RevenueReported { revenue: 0 },
        ]);

        assert!(VisitLifecycle.check(&run).is_err());
    }

    /// One visit per entry: `None` is a turned-away client, otherwise
    /// `(room, budget, rate)` for a stay.
    fn visits() -> impl Strategy<Value = Vec<Option<(u32, u64, u64)>>> {
        prop::collection::vec(
            prop::option::of((1u32..=3, 0u64..30_000, 500u64..5000)),
            1..20,
        )
    }

    fn sequential_run(visits: &[Option<(u32, u64, u64)>]) -> Vec<HotelEvent> {
        let mut events = Vec::new();
        let mut revenue = 0;
        for (index, visit) in visits.iter().enumerate() {
            let client = index as u32 + 1;
            match *visit {
                Some((room, budget, rate)) => {
                    events.extend(stay(client, room, budget, rate));
                    revenue += budget / rate * rate;
                },
                None => {
                    let client = ClientId(client);
                    events.push(HotelEvent::Arrived { client, budget: 0 });
                    events.push(HotelEvent::TurnedAway { client, budget: 0 });
                },
            }
        }
        events.push(HotelEvent::AllClientsLeft { clients: visits.len() });
        events.push(HotelEvent::RevenueReported { revenue });
        events
    }

    proptest! {
        /// Property: any log of back-to-back visits satisfies every
        /// standard invariant
        #[test]
        fn prop_sequential_visits_pass(visits in visits()) {
            let run = RunSnapshot::from_events(sequential_run(&visits));
            let result = InvariantRegistry::standard().check_all(&run);
            prop_assert!(result.is_ok(), "violations: {:?}", result);
        }

        /// Property: dropping the final day of any stay breaks the day count
        #[test]
        fn prop_missing_day_is_detected(visits in visits(), pick in any::<prop::sample::Index>()) {
            let mut events = sequential_run(&visits);
            let days: Vec<usize> = events
                .iter()
                .enumerate()
                .filter(|(_, event)| matches!(event, HotelEvent::DayElapsed { .. }))
                .map(|(position, _)| position)
                .collect();
            prop_assume!(!days.is_empty());

            let position = days[pick.index(days.len())];
            events.remove(position);

            let run = RunSnapshot::from_events(events);
            prop_assert!(InvariantRegistry::standard().check_all(&run).is_err());
        }
    }
}
