//! Passing the device around: one player at a time, in reveal order, with
//! the word visible only while the current player holds the card.

use tracing::debug;

use super::round::Round;

/// Raw input from the press-and-hold card.
///
/// Every gesture that can end a hold hides the word, including the pointer
/// sliding off the card, so a word is never left on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealGesture {
    /// Mouse or pen pressed on the card.
    PointerDown,
    /// Mouse or pen released.
    PointerUp,
    /// Pointer left the card while pressed.
    PointerLeave,
    /// Finger placed on the card.
    TouchStart,
    /// Finger lifted.
    TouchEnd,
    /// The platform aborted the touch.
    TouchCancel,
}

impl RevealGesture {
    /// Whether this gesture starts (`true`) or ends (`false`) a hold.
    #[must_use]
    pub fn holds(self) -> bool {
        matches!(self, Self::PointerDown | Self::TouchStart)
    }
}

/// What the card currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace<'a> {
    /// Nothing about the assignment is shown.
    Hidden,
    /// The word, and whether to add the imposter notice.
    Shown {
        /// The secret word, or the imposter placeholder.
        word: &'a str,
        /// Whether the holder is an imposter.
        is_imposter: bool,
    },
}

/// The reveal screen for the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCard<'a> {
    /// 1-based position in reveal order ("Player 2 of 5").
    pub position: usize,
    /// Number of players in the round.
    pub total: usize,
    /// Who should be holding the device.
    pub name: &'a str,
    /// Whether confirming this player ends the reveal phase.
    pub is_last: bool,
    /// The card face.
    pub face: CardFace<'a>,
}

/// Result of confirming the current player.
#[derive(Debug)]
pub enum RevealProgress {
    /// Hand the device to the next player.
    NextPlayer(RevealSequencer),
    /// Everyone has seen their card.
    Complete(Round),
}

/// Walks a dealt round one player at a time.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    round: Round,
    current_index: usize,
    visible: bool,
}

impl RevealSequencer {
    /// Starts at the first player with the card hidden.
    #[must_use]
    pub fn new(round: Round) -> Self {
        Self {
            round,
            current_index: 0,
            visible: false,
        }
    }

    /// Zero-based index of the current player.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the current player's word is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of players in the round.
    #[must_use]
    pub fn total(&self) -> usize {
        self.round.len()
    }

    /// Whether the current player is the last one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.round.len()
    }

    /// Shows or hides the current player's word.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Applies a raw hold gesture.
    pub fn handle_gesture(&mut self, gesture: RevealGesture) {
        self.set_visible(gesture.holds());
    }

    /// The current reveal screen. The word is only reachable through a
    /// [`CardFace::Shown`] face, which requires an active hold.
    #[must_use]
    pub fn current(&self) -> RevealCard<'_> {
        let assignment = &self.round.assignments()[self.current_index];
        let face = if self.visible {
            CardFace::Shown {
                word: assignment.display_word(),
                is_imposter: assignment.is_imposter(),
            }
        } else {
            CardFace::Hidden
        };
        RevealCard {
            position: self.current_index + 1,
            total: self.round.len(),
            name: assignment.name(),
            is_last: self.is_last(),
            face,
        }
    }

    /// Confirms the current player and moves on. The card is always hidden
    /// for the next player. There is no way back.
    #[must_use]
    pub fn advance(self) -> RevealProgress {
        if self.is_last() {
            debug!(total = self.round.len(), "reveal complete");
            return RevealProgress::Complete(self.round);
        }
        let next = self.current_index + 1;
        debug!(position = next + 1, total = self.round.len(), "next player");
        RevealProgress::NextPlayer(Self {
            round: self.round,
            current_index: next,
            visible: false,
        })
    }
}
