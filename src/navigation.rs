// ABOUTME: Navigation state machine for the deck-slides library
// ABOUTME: Owns the current slide index, bounds/loop policy and the autoplay timer

use crate::transitions::Direction;
use log::debug;

/// A validated request to move between two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

struct AutoPlay {
    interval_ms: u64,
    elapsed_ms: u64,
}

/// Slide navigation controller.
///
/// Produces validated [`SlideChange`] requests; invalid or redundant
/// requests (out of bounds, same index, after destruction) yield `None` and
/// must stay silent. Autoplay advances on the cooperative clock via
/// [`tick_auto_play`](Navigator::tick_auto_play).
#[derive(Default)]
pub struct Navigator {
    current: usize,
    destroyed: bool,
    auto_play: Option<AutoPlay>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.auto_play.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Request a move to the following slide, wrapping to the first when
    /// looping is enabled.
    pub fn next(&self, deck_len: usize, looping: bool) -> Option<SlideChange> {
        if deck_len == 0 {
            return None;
        }
        if self.current < deck_len - 1 {
            self.go_to(self.current + 1, deck_len)
        } else if looping {
            self.go_to(0, deck_len)
        } else {
            None
        }
    }

    /// Request a move to the preceding slide, wrapping to the last when
    /// looping is enabled.
    pub fn prev(&self, deck_len: usize, looping: bool) -> Option<SlideChange> {
        if deck_len == 0 {
            return None;
        }
        if self.current > 0 {
            self.go_to(self.current - 1, deck_len)
        } else if looping {
            self.go_to(deck_len - 1, deck_len)
        } else {
            None
        }
    }

    /// Request a move to a specific index. Out-of-bounds and same-index
    /// requests are no-ops.
    ///
    /// Direction is classified by plain index comparison, so a looping move
    /// from the last slide to the first still counts as backward-pointing
    /// indices going "forward" only when `to > from`.
    pub fn go_to(&self, index: usize, deck_len: usize) -> Option<SlideChange> {
        if self.destroyed || index >= deck_len || index == self.current {
            return None;
        }

        let direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(SlideChange {
            from: self.current,
            to: index,
            direction,
        })
    }

    /// Commit a change produced by one of the request methods.
    pub fn apply(&mut self, change: &SlideChange) {
        self.current = change.to;
    }

    /// Arm the repeating autoplay timer. Ignored unless `interval_ms > 0`;
    /// a valid call replaces any armed timer.
    pub fn start_auto_play(&mut self, interval_ms: u64) {
        if self.destroyed || interval_ms == 0 {
            return;
        }
        debug!("Autoplay armed at {} ms", interval_ms);
        self.auto_play = Some(AutoPlay {
            interval_ms,
            elapsed_ms: 0,
        });
    }

    /// Disarm the autoplay timer. Idempotent.
    pub fn stop_auto_play(&mut self) {
        self.auto_play = None;
    }

    /// Advance the autoplay clock and report how many intervals fell due.
    pub fn tick_auto_play(&mut self, elapsed_ms: u64) -> u32 {
        let Some(auto_play) = self.auto_play.as_mut() else {
            return 0;
        };

        auto_play.elapsed_ms += elapsed_ms;
        let mut due = 0;
        while auto_play.elapsed_ms >= auto_play.interval_ms {
            auto_play.elapsed_ms -= auto_play.interval_ms;
            due += 1;
        }
        due
    }

    /// Stop autoplay, reset to the first slide and reject all further
    /// navigation requests.
    pub fn destroy(&mut self) {
        self.stop_auto_play();
        self.current = 0;
        self.destroyed = true;
    }
}
