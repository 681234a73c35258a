use std::fmt;

use ringbuffer::{AllocRingBuffer, RingBuffer};

use super::direction::Direction;

/// Debounces a noisy per-frame direction signal into a stable command.
///
/// Keeps the last `capacity` concrete classifications. A direction becomes the
/// stabilized value once it appears at least `quorum` times in that window;
/// without a quorum the previous stabilized value is kept. Ties between equally
/// frequent directions go to the one seen most recently.
pub struct DirectionVoter {
    history: AllocRingBuffer<Direction>,
    quorum: usize,
    stabilized: Option<Direction>,
}

impl DirectionVoter {
    pub fn new(capacity: usize, quorum: usize) -> Self {
        Self {
            history: AllocRingBuffer::new(capacity),
            quorum,
            stabilized: None,
        }
    }

    /// Record one classification; `None` frames are dropped
    pub fn push(&mut self, raw: Option<Direction>) {
        if let Some(direction) = raw {
            self.history.enqueue(direction);
        }
    }

    /// Re-evaluate the window and return the (sticky) stabilized direction
    pub fn stabilize(&mut self) -> Option<Direction> {
        if let Some((direction, count)) = self.leader() {
            if count >= self.quorum {
                self.stabilized = Some(direction);
            }
        }
        self.stabilized
    }

    /// Last stabilized value, without re-evaluating
    pub fn current(&self) -> Option<Direction> {
        self.stabilized
    }

    pub fn history(&self) -> Vec<Direction> {
        self.history.iter().copied().collect()
    }

    /// Most frequent direction in the window and its count.
    fn leader(&self) -> Option<(Direction, usize)> {
        // (count, index of most recent occurrence)
        let mut tally: [(usize, usize); 4] = [(0, 0); 4];
        for (index, direction) in self.history.iter().enumerate() {
            let slot = &mut tally[Self::slot(*direction)];
            slot.0 += 1;
            slot.1 = index;
        }

        Direction::ALL
            .into_iter()
            .zip(tally)
            .filter(|(_, (count, _))| *count > 0)
            .max_by_key(|(_, rank)| *rank)
            .map(|(direction, (count, _))| (direction, count))
    }

    fn slot(direction: Direction) -> usize {
        match direction {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Debug for DirectionVoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionVoter")
            .field("history", &self.history())
            .field("quorum", &self.quorum)
            .field("stabilized", &self.stabilized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn voter_with(raw: &[Option<Direction>]) -> DirectionVoter {
        let mut voter = DirectionVoter::new(5, 3);
        for r in raw {
            voter.push(*r);
        }
        voter
    }

    #[test]
    fn test_empty_history_has_no_direction() {
        let mut voter = DirectionVoter::new(5, 3);
        assert_eq!(voter.stabilize(), None);
    }

    #[test]
    fn test_three_of_five_wins() {
        let mut voter = voter_with(&[
            Some(Right),
            Some(Right),
            Some(Right),
            Some(Left),
            Some(Left),
        ]);
        assert_eq!(voter.stabilize(), Some(Right));
    }

    #[test]
    fn test_split_keeps_previous_value() {
        let mut voter = voter_with(&[Some(Up), Some(Up), Some(Up)]);
        assert_eq!(voter.stabilize(), Some(Up));

        for r in [Some(Right), Some(Right), Some(Left), Some(Left), None] {
            voter.push(r);
        }
        // Window is now [Up, Right, Right, Left, Left]: no quorum
        assert_eq!(voter.stabilize(), Some(Up));
    }

    #[test]
    fn test_split_without_previous_value_is_none() {
        let mut voter = voter_with(&[Some(Right), Some(Right), Some(Left), Some(Left), None]);
        assert_eq!(voter.history().len(), 4);
        assert_eq!(voter.stabilize(), None);
    }

    #[test]
    fn test_none_is_not_recorded() {
        let mut voter = voter_with(&[Some(Down), None, Some(Down), None, None, Some(Down)]);
        assert_eq!(voter.history(), vec![Down, Down, Down]);
        assert_eq!(voter.stabilize(), Some(Down));
    }

    #[test]
    fn test_oldest_entries_evicted() {
        let mut voter = voter_with(&[Some(Left), Some(Left), Some(Left)]);
        assert_eq!(voter.stabilize(), Some(Left));

        for _ in 0..3 {
            voter.push(Some(Up));
        }
        assert_eq!(voter.history(), vec![Left, Left, Up, Up, Up]);
        assert_eq!(voter.stabilize(), Some(Up));

        voter.push(Some(Down));
        voter.push(Some(Down));
        assert_eq!(voter.history(), vec![Up, Up, Up, Down, Down]);
        assert_eq!(voter.stabilize(), Some(Up));
    }

    #[test]
    fn test_tie_goes_to_most_recent() {
        let mut voter = DirectionVoter::new(4, 2);
        for r in [Right, Right, Up, Up] {
            voter.push(Some(r));
        }
        assert_eq!(voter.stabilize(), Some(Up));

        voter.push(Some(Right));
        voter.push(Some(Right));
        // [Up, Up, Right, Right]
        assert_eq!(voter.stabilize(), Some(Right));
    }

    #[test]
    fn test_current_does_not_reevaluate() {
        let mut voter = voter_with(&[Some(Left), Some(Left), Some(Left)]);
        assert_eq!(voter.current(), None);
        voter.stabilize();
        assert_eq!(voter.current(), Some(Left));
    }
}
