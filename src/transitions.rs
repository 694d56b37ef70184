// ABOUTME: Transition engine for the deck-slides library
// ABOUTME: Runs directional animated hand-offs between slides under a cooperative clock

use crate::config::{TransitionSpeed, TransitionType};
use log::debug;

/// Direction of a slide hand-off, classified by index comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Visibility of one slide while the deck is idle or mid-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePhase {
    Active,
    Hidden,
    Entering {
        effect: TransitionType,
        direction: Direction,
    },
    Leaving {
        effect: TransitionType,
        direction: Direction,
    },
}

/// A transition that has run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedTransition {
    pub outgoing: usize,
    pub incoming: usize,
    pub direction: Direction,
}

/// Outcome of asking the engine to begin a hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A transition was already in flight; the request was dropped.
    Dropped,
    /// The hand-off completed instantly (type `none` or zero duration).
    Done(FinishedTransition),
    /// The hand-off entered the animating state; completion arrives via
    /// [`TransitionEngine::tick`].
    Animating,
}

struct ActiveTransition {
    outgoing: usize,
    incoming: usize,
    direction: Direction,
    effect: TransitionType,
    remaining_ms: u64,
}

/// Animates the hand-off between an outgoing and an incoming slide.
///
/// At most one transition is in flight at a time; a request arriving while
/// one is animating is dropped, never queued. Time advances only through
/// [`tick`](TransitionEngine::tick), so hosts own the clock.
pub struct TransitionEngine {
    transition: TransitionType,
    speed: TransitionSpeed,
    active: Option<ActiveTransition>,
}

impl TransitionEngine {
    pub fn new(transition: TransitionType, speed: TransitionSpeed) -> Self {
        Self {
            transition,
            speed,
            active: None,
        }
    }

    /// Change the transition strategy. Takes effect on the next transition;
    /// one already in flight is not altered.
    pub fn set_transition(&mut self, transition: TransitionType) {
        self.transition = transition;
    }

    /// Change the transition duration. Takes effect on the next transition.
    pub fn set_speed(&mut self, speed: TransitionSpeed) {
        self.speed = speed;
    }

    pub fn transition(&self) -> TransitionType {
        self.transition
    }

    pub fn speed(&self) -> TransitionSpeed {
        self.speed
    }

    /// True while a hand-off is animating.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a hand-off from `outgoing` to `incoming`.
    pub fn begin(&mut self, outgoing: usize, incoming: usize, direction: Direction) -> BeginOutcome {
        if self.active.is_some() {
            debug!("Transition already in flight, dropping request");
            return BeginOutcome::Dropped;
        }

        let finished = FinishedTransition {
            outgoing,
            incoming,
            direction,
        };

        let duration = self.speed.as_millis();
        if self.transition == TransitionType::None || duration == 0 {
            return BeginOutcome::Done(finished);
        }

        self.active = Some(ActiveTransition {
            outgoing,
            incoming,
            direction,
            effect: self.transition,
            remaining_ms: duration,
        });
        BeginOutcome::Animating
    }

    /// Advance the animation clock by `elapsed_ms`. Returns the finished
    /// hand-off once the configured duration has been held.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<FinishedTransition> {
        let active = self.active.as_mut()?;
        active.remaining_ms = active.remaining_ms.saturating_sub(elapsed_ms);
        if active.remaining_ms > 0 {
            return None;
        }

        let active = self.active.take().unwrap();
        Some(FinishedTransition {
            outgoing: active.outgoing,
            incoming: active.incoming,
            direction: active.direction,
        })
    }

    /// Visibility of slide `index` given the current slide and any
    /// transition in flight.
    pub fn phase_of(&self, index: usize, current: usize) -> SlidePhase {
        if let Some(active) = &self.active {
            if index == active.incoming {
                return SlidePhase::Entering {
                    effect: active.effect,
                    direction: active.direction,
                };
            }
            if index == active.outgoing {
                return SlidePhase::Leaving {
                    effect: active.effect,
                    direction: active.direction,
                };
            }
        }
        if index == current {
            SlidePhase::Active
        } else {
            SlidePhase::Hidden
        }
    }
}
