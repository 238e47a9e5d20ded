//! Arrival estimates and the slot identity they are matched on.

use super::{Direction, LineRef, MapId, StationRef, StopId};

/// Identity of a sign row: which trains it shows.
///
/// A slot accepts an estimate exactly when all three fields agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub line: LineRef,
    pub direction: Direction,
    pub destination: StationRef,
}

/// A train's reported position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One arrival prediction for a specific train run at the sign's station.
///
/// Estimates are rebuilt from every feed response and never outlive the
/// refresh cycle that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Run number of the train.
    pub run_number: u32,

    /// Station the prediction is for.
    pub map_id: Option<MapId>,

    /// Platform the prediction is for.
    pub stop_id: Option<StopId>,

    pub line: LineRef,

    /// `None` when the feed omitted the direction; such estimates match no slot.
    pub direction: Option<Direction>,

    /// Resolved (and possibly Loop-corrected) destination.
    pub destination: StationRef,

    /// Compass heading in degrees.
    pub heading: Option<u16>,

    pub position: Option<Position>,

    /// Whole minutes until arrival, never negative.
    pub minutes_away: u32,

    pub is_approaching: bool,

    /// Schedule-based rather than tracked live.
    pub is_scheduled: bool,

    pub is_delayed: bool,

    /// Flagged by the feed as a possibly faulty prediction.
    pub is_faulty: bool,
}

impl Estimate {
    /// The slot identity this estimate belongs to, if it has a direction.
    pub fn slot_key(&self) -> Option<SlotKey> {
        Some(SlotKey {
            line: self.line,
            direction: self.direction?,
            destination: self.destination,
        })
    }

    /// Single-letter status flags in priority order: scheduled, delayed, faulty.
    pub fn status_flags(&self) -> String {
        [
            (self.is_scheduled, 'S'),
            (self.is_delayed, 'D'),
            (self.is_faulty, 'F'),
        ]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .collect()
    }

    /// Sign text for this estimate: minutes right-aligned to two columns,
    /// followed by a space and the status flags when any are set.
    ///
    /// ```text
    ///  3
    /// 12 SD
    /// ```
    pub fn display(&self) -> String {
        let mut text = format!("{:>2}", self.minutes_away);
        let flags = self.status_flags();
        if !flags.is_empty() {
            text.push(' ');
            text.push_str(&flags);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(minutes: u32) -> Estimate {
        Estimate {
            run_number: 421,
            map_id: Some(MapId(40260)),
            stop_id: Some(StopId(30050)),
            line: LineRef(1),
            direction: Some(Direction::North),
            destination: StationRef(4),
            heading: Some(89),
            position: None,
            minutes_away: minutes,
            is_approaching: false,
            is_scheduled: false,
            is_delayed: false,
            is_faulty: false,
        }
    }

    #[test]
    fn slot_key_requires_direction() {
        let mut e = estimate(3);
        assert_eq!(
            e.slot_key(),
            Some(SlotKey {
                line: LineRef(1),
                direction: Direction::North,
                destination: StationRef(4),
            })
        );

        e.direction = None;
        assert_eq!(e.slot_key(), None);
    }

    #[test]
    fn display_pads_minutes() {
        assert_eq!(estimate(3).display(), " 3");
        assert_eq!(estimate(12).display(), "12");
        assert_eq!(estimate(104).display(), "104");
    }

    #[test]
    fn display_flags_in_priority_order() {
        let mut e = estimate(7);
        e.is_faulty = true;
        e.is_scheduled = true;
        assert_eq!(e.display(), " 7 SF");

        e.is_delayed = true;
        assert_eq!(e.display(), " 7 SDF");

        let mut e = estimate(0);
        e.is_delayed = true;
        assert_eq!(e.display(), " 0 D");
    }

    #[test]
    fn approaching_is_not_a_flag() {
        let mut e = estimate(0);
        e.is_approaching = true;
        assert_eq!(e.status_flags(), "");
    }
}
