//! Stand-in for the camera + hand-landmark classifier.
//!
//! The terminal has no camera, so the player's "hand" is a pose held with the
//! keyboard and this classifier turns it into the kind of per-frame labels a
//! real model produces: mostly right, sometimes wrong, sometimes nothing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::{Direction, GestureFrame};

/// What the player is physically doing in front of the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandPose {
    pub visible: bool,
    pub pointing: Option<Direction>,
}

impl HandPose {
    pub fn pointing(direction: Direction) -> Self {
        Self {
            visible: true,
            pointing: Some(direction),
        }
    }
}

/// Emits one noisy classification per captured frame
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    /// Chance a visible pose is labelled with a random direction
    noise: f64,
    /// Chance a visible pose yields no label
    dropout: f64,
    rng: StdRng,
}

impl SimulatedClassifier {
    pub fn new(noise: f64, dropout: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            noise: noise.clamp(0.0, 1.0),
            dropout: dropout.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn classify(&mut self, pose: HandPose) -> GestureFrame {
        if !pose.visible {
            return GestureFrame::absent();
        }

        let raw = if self.rng.gen_bool(self.dropout) {
            None
        } else if self.rng.gen_bool(self.noise) {
            Direction::ALL.choose(&mut self.rng).copied()
        } else {
            pose.pointing
        };

        GestureFrame {
            raw,
            presence: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_hand_is_absent() {
        let mut classifier = SimulatedClassifier::new(0.5, 0.5, Some(3));
        for _ in 0..100 {
            assert_eq!(classifier.classify(HandPose::default()), GestureFrame::absent());
        }
    }

    #[test]
    fn test_clean_classifier_is_exact() {
        let mut classifier = SimulatedClassifier::new(0.0, 0.0, Some(3));
        let frame = classifier.classify(HandPose::pointing(Direction::Left));
        assert_eq!(frame, GestureFrame::pointing(Direction::Left));
    }

    #[test]
    fn test_open_palm_has_presence_only() {
        let mut classifier = SimulatedClassifier::new(0.0, 0.0, Some(3));
        let pose = HandPose {
            visible: true,
            pointing: None,
        };
        let frame = classifier.classify(pose);
        assert!(frame.presence);
        assert_eq!(frame.raw, None);
    }

    #[test]
    fn test_full_dropout_never_labels() {
        let mut classifier = SimulatedClassifier::new(0.0, 1.0, Some(3));
        for _ in 0..100 {
            let frame = classifier.classify(HandPose::pointing(Direction::Up));
            assert!(frame.presence);
            assert_eq!(frame.raw, None);
        }
    }

    #[test]
    fn test_noisy_labels_mostly_correct() {
        let mut classifier = SimulatedClassifier::new(0.2, 0.1, Some(11));
        let pose = HandPose::pointing(Direction::Down);
        let correct = (0..1000)
            .filter(|_| classifier.classify(pose).raw == Some(Direction::Down))
            .count();
        // Expected ~ 0.9 * (0.8 + 0.2 / 4) = 76.5%
        assert!((650..=850).contains(&correct), "correct = {correct}");
    }
}
