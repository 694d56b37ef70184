// ABOUTME: Presentation facade for the deck-slides library
// ABOUTME: Wires parser, navigator, transition engine and events into one instance

use crate::config::{Config, TransitionSpeed, TransitionType};
use crate::errors::Result;
use crate::events::{Event, EventEmitter, EventKind, HandlerId};
use crate::keyboard::{Action, KeyboardMap};
use crate::navigation::{Navigator, SlideChange};
use crate::parser::Parser;
use crate::slide::SlideRecord;
use crate::transitions::{BeginOutcome, SlidePhase, TransitionEngine};
use log::{debug, info, warn};

/// Snapshot of the presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckState {
    pub initialized: bool,
    pub slide_count: usize,
    pub current_slide: usize,
    pub is_playing: bool,
    pub is_fullscreen: bool,
    pub is_overview: bool,
}

/// One presentation instance. Hosts construct these explicitly; there is no
/// process-wide registry.
///
/// The deck is populated exactly once by [`init`](Presentation::init) (or
/// [`init_with_input`](Presentation::init_with_input)); afterwards only the
/// navigation state machine mutates the current index. Time is cooperative:
/// hosts call [`tick`](Presentation::tick) to advance autoplay and settle
/// transitions.
pub struct Presentation {
    config: Config,
    slides: Vec<SlideRecord>,
    navigator: Navigator,
    transitions: TransitionEngine,
    emitter: EventEmitter,
    keyboard: Option<KeyboardMap>,
    initialized: bool,
    is_fullscreen: bool,
    is_overview: bool,
}

impl Presentation {
    /// Create a presentation with the given settings. Keyboard shortcut
    /// overrides are resolved here so a bad action name fails fast.
    pub fn new(config: Config) -> Result<Self> {
        let keyboard = KeyboardMap::with_overrides(&config.keyboard_shortcuts)?;
        let transitions = TransitionEngine::new(config.transition, config.transition_speed);
        Ok(Self {
            config,
            slides: Vec::new(),
            navigator: Navigator::new(),
            transitions,
            emitter: EventEmitter::new(),
            keyboard: Some(keyboard),
            initialized: false,
            is_fullscreen: false,
            is_overview: false,
        })
    }

    /// Load the configured source, parse it and populate the deck.
    ///
    /// Emits `Ready` on success. On failure an `Error` notification is
    /// emitted and the error re-raised; the deck stays empty.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            warn!("Presentation already initialized");
            return Ok(());
        }
        self.config.validate()?;

        let parsed = Parser::new(&self.config).load_and_parse();
        self.finish_init(parsed)
    }

    /// Initialize from raw input supplied by the host instead of the
    /// configured data/URL fields.
    pub fn init_with_input(&mut self, raw: &str) -> Result<()> {
        if self.initialized {
            warn!("Presentation already initialized");
            return Ok(());
        }

        let parsed = Parser::new(&self.config).parse(raw);
        self.finish_init(parsed)
    }

    fn finish_init(&mut self, parsed: Result<Vec<SlideRecord>>) -> Result<()> {
        match parsed {
            Ok(slides) => {
                self.slides = slides;
                self.navigator = Navigator::new();
                self.initialized = true;
                info!("Presentation initialized with {} slides", self.slides.len());
                self.emitter.emit(&Event::Ready);

                if self.config.auto_slide > 0 {
                    self.navigator.start_auto_play(self.config.auto_slide);
                }
                Ok(())
            }
            Err(err) => {
                self.emitter.emit(&Event::Error {
                    cause: err.to_string(),
                });
                Err(err)
            }
        }
    }

    // ----- observers -------------------------------------------------------

    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        self.emitter.on(kind, callback)
    }

    pub fn once<F>(&mut self, kind: EventKind, callback: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        self.emitter.once(kind, callback)
    }

    pub fn off(&mut self, id: HandlerId) -> bool {
        self.emitter.off(id)
    }

    // ----- navigation ------------------------------------------------------

    pub fn next(&mut self) {
        if !self.initialized {
            return;
        }
        let change = self
            .navigator
            .next(self.slides.len(), self.config.loop_slides);
        self.request(change);
    }

    pub fn prev(&mut self) {
        if !self.initialized {
            return;
        }
        let change = self
            .navigator
            .prev(self.slides.len(), self.config.loop_slides);
        self.request(change);
    }

    pub fn go_to(&mut self, index: usize) {
        if !self.initialized {
            return;
        }
        let change = self.navigator.go_to(index, self.slides.len());
        self.request(change);
    }

    pub fn go_to_first(&mut self) {
        self.go_to(0);
    }

    pub fn go_to_last(&mut self) {
        if !self.initialized || self.slides.is_empty() {
            return;
        }
        self.go_to(self.slides.len() - 1);
    }

    /// Perform a validated change: before notification, index mutation, then
    /// the animated hand-off. The after notification follows once the
    /// animation settles. A request arriving while a transition is in flight
    /// is dropped, never queued.
    fn request(&mut self, change: Option<SlideChange>) {
        let Some(change) = change else { return };

        if self.transitions.is_active() {
            debug!(
                "Transition in flight, dropping navigation to {}",
                change.to
            );
            return;
        }

        self.emitter.emit(&Event::BeforeSlideChange {
            from: change.from,
            to: change.to,
        });
        self.navigator.apply(&change);

        match self
            .transitions
            .begin(change.from, change.to, change.direction)
        {
            BeginOutcome::Animating => {
                self.emitter.emit(&Event::TransitionStart {
                    outgoing: change.from,
                    incoming: change.to,
                    direction: change.direction,
                });
            }
            // Instant swap: no animation window, the change settles at once.
            BeginOutcome::Done(_) => {
                self.emitter.emit(&Event::AfterSlideChange {
                    from: change.from,
                    to: change.to,
                });
            }
            BeginOutcome::Dropped => {}
        }
    }

    // ----- autoplay and the cooperative clock ------------------------------

    /// Start autoplay at the configured interval.
    pub fn start(&mut self) {
        if !self.initialized {
            return;
        }
        self.navigator.start_auto_play(self.config.auto_slide);
    }

    /// Start autoplay at an explicit interval, replacing any armed timer.
    pub fn start_auto_play(&mut self, interval_ms: u64) {
        if !self.initialized {
            return;
        }
        self.navigator.start_auto_play(interval_ms);
    }

    /// Stop autoplay. Idempotent; an in-flight transition is not touched.
    pub fn stop(&mut self) {
        self.navigator.stop_auto_play();
    }

    /// Advance the cooperative clock. Settles a due transition (emitting
    /// `TransitionEnd` then `AfterSlideChange`) and fires autoplay intervals
    /// that fell due.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if let Some(finished) = self.transitions.tick(elapsed_ms) {
            self.emitter.emit(&Event::TransitionEnd {
                outgoing: finished.outgoing,
                incoming: finished.incoming,
                direction: finished.direction,
            });
            self.emitter.emit(&Event::AfterSlideChange {
                from: finished.outgoing,
                to: finished.incoming,
            });
        }

        if !self.initialized {
            return;
        }
        let due = self.navigator.tick_auto_play(elapsed_ms);
        for _ in 0..due {
            self.next();
        }
    }

    // ----- input and mode toggles ------------------------------------------

    /// Translate a key name through the shortcut map and run the bound
    /// action. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str) {
        if !self.initialized {
            return;
        }
        let Some(action) = self.keyboard.as_ref().and_then(|map| map.resolve(key)) else {
            return;
        };

        match action {
            Action::Next => self.next(),
            Action::Prev => self.prev(),
            Action::First => self.go_to_first(),
            Action::Last => self.go_to_last(),
            Action::Pause => {
                if self.navigator.is_playing() {
                    self.stop();
                } else {
                    self.start();
                }
            }
            Action::Fullscreen => self.toggle_fullscreen(),
            Action::Overview => self.toggle_overview(),
            Action::Escape => {
                self.is_fullscreen = false;
                self.is_overview = false;
            }
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if !self.initialized {
            return;
        }
        self.is_fullscreen = !self.is_fullscreen;
    }

    pub fn toggle_overview(&mut self) {
        if !self.initialized {
            return;
        }
        self.is_overview = !self.is_overview;
    }

    // ----- transition settings ---------------------------------------------

    /// Applies to the next transition; one already in flight is unchanged.
    pub fn set_transition(&mut self, transition: TransitionType) {
        self.transitions.set_transition(transition);
    }

    pub fn set_transition_speed(&mut self, speed: TransitionSpeed) {
        self.transitions.set_speed(speed);
    }

    // ----- accessors -------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_slide(&self) -> usize {
        self.navigator.current()
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn current_record(&self) -> Option<&SlideRecord> {
        self.slides.get(self.navigator.current())
    }

    pub fn is_playing(&self) -> bool {
        self.navigator.is_playing()
    }

    /// Visibility of one slide for renderers, including the entering/leaving
    /// window of an in-flight transition.
    pub fn slide_phase(&self, index: usize) -> SlidePhase {
        self.transitions.phase_of(index, self.navigator.current())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> DeckState {
        DeckState {
            initialized: self.initialized,
            slide_count: self.slides.len(),
            current_slide: self.navigator.current(),
            is_playing: self.navigator.is_playing(),
            is_fullscreen: self.is_fullscreen,
            is_overview: self.is_overview,
        }
    }

    /// Tear the presentation down: stop autoplay, release the keyboard map,
    /// drop all handlers and reset the deck state to empty. Every call after
    /// this is a no-op. An in-flight transition is not aborted; it settles
    /// on later ticks, with no observers left to notify.
    pub fn destroy(&mut self) {
        if !self.initialized {
            return;
        }
        self.navigator.destroy();
        self.keyboard = None;
        self.slides.clear();
        self.emitter.off_all();
        self.initialized = false;
        self.is_fullscreen = false;
        self.is_overview = false;
        info!("Presentation destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Source;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three_slide_deck(loop_slides: bool, transition: TransitionType) -> Presentation {
        let config = Config {
            source: Source::Markdown,
            loop_slides,
            transition,
            transition_speed: TransitionSpeed::Millis(100),
            ..Config::default()
        };
        let mut presentation = Presentation::new(config).unwrap();
        presentation
            .init_with_input("# One\n---\n# Two\n---\n# Three")
            .unwrap();
        presentation
    }

    fn record_events(presentation: &mut Presentation) -> Rc<RefCell<Vec<Event>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::BeforeSlideChange,
            EventKind::AfterSlideChange,
            EventKind::TransitionStart,
            EventKind::TransitionEnd,
        ] {
            let sink = Rc::clone(&seen);
            presentation.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        }
        seen
    }

    #[test]
    fn init_populates_the_deck_and_emits_ready() {
        let config = Config {
            source: Source::Markdown,
            data: Some("# One\n---\n# Two".to_string()),
            ..Config::default()
        };
        let mut presentation = Presentation::new(config).unwrap();

        let ready = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ready);
        presentation.on(EventKind::Ready, move |_| *flag.borrow_mut() = true);

        presentation.init().unwrap();
        assert!(*ready.borrow());
        assert!(presentation.is_initialized());
        assert_eq!(presentation.total_slides(), 2);
        assert_eq!(presentation.current_slide(), 0);
    }

    #[test]
    fn failed_init_emits_error_and_leaves_the_deck_empty() {
        let config = Config {
            source: Source::Json,
            data: Some("{broken".to_string()),
            ..Config::default()
        };
        let mut presentation = Presentation::new(config).unwrap();

        let cause = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&cause);
        presentation.on(EventKind::Error, move |event| {
            if let Event::Error { cause } = event {
                *sink.borrow_mut() = Some(cause.clone());
            }
        });

        assert!(presentation.init().is_err());
        assert!(cause.borrow().is_some());
        assert!(!presentation.is_initialized());
        assert_eq!(presentation.total_slides(), 0);
    }

    #[test]
    fn instant_transition_orders_before_then_after() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        let seen = record_events(&mut presentation);

        presentation.next();
        assert_eq!(presentation.current_slide(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![
                Event::BeforeSlideChange { from: 0, to: 1 },
                Event::AfterSlideChange { from: 0, to: 1 },
            ]
        );
    }

    #[test]
    fn animated_transition_settles_through_tick() {
        let mut presentation = three_slide_deck(false, TransitionType::Slide);
        let seen = record_events(&mut presentation);

        presentation.next();
        assert_eq!(presentation.current_slide(), 1);
        assert_eq!(seen.borrow().len(), 2); // before + transitionStart

        presentation.tick(100);
        let events = seen.borrow();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[2], Event::TransitionEnd { .. }));
        assert_eq!(events[3], Event::AfterSlideChange { from: 0, to: 1 });
    }

    #[test]
    fn navigation_during_a_transition_is_dropped() {
        let mut presentation = three_slide_deck(false, TransitionType::Slide);

        presentation.next();
        presentation.next();
        assert_eq!(presentation.current_slide(), 1);

        presentation.tick(100);
        presentation.next();
        presentation.tick(100);
        assert_eq!(presentation.current_slide(), 2);
    }

    #[test]
    fn go_to_current_index_emits_nothing() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        let seen = record_events(&mut presentation);

        presentation.go_to(0);
        assert!(seen.borrow().is_empty());
        assert_eq!(presentation.current_slide(), 0);
    }

    #[test]
    fn next_at_the_boundary_respects_the_loop_flag() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        presentation.go_to(2);
        presentation.next();
        assert_eq!(presentation.current_slide(), 2);

        let mut presentation = three_slide_deck(true, TransitionType::None);
        presentation.go_to(2);
        presentation.next();
        assert_eq!(presentation.current_slide(), 0);
    }

    #[test]
    fn autoplay_advances_on_tick() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        presentation.start_auto_play(200);
        assert!(presentation.is_playing());

        presentation.tick(199);
        assert_eq!(presentation.current_slide(), 0);
        presentation.tick(1);
        assert_eq!(presentation.current_slide(), 1);

        presentation.stop();
        presentation.tick(400);
        assert_eq!(presentation.current_slide(), 1);
        assert!(!presentation.is_playing());
    }

    #[test]
    fn configured_auto_slide_arms_on_init() {
        let config = Config {
            source: Source::Markdown,
            auto_slide: 150,
            ..Config::default()
        };
        let mut presentation = Presentation::new(config).unwrap();
        presentation.init_with_input("# One\n---\n# Two").unwrap();
        assert!(presentation.is_playing());
        presentation.tick(150);
        assert_eq!(presentation.current_slide(), 1);
    }

    #[test]
    fn keyboard_actions_drive_navigation() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        presentation.handle_key("ArrowRight");
        assert_eq!(presentation.current_slide(), 1);
        presentation.handle_key("End");
        assert_eq!(presentation.current_slide(), 2);
        presentation.handle_key("Home");
        assert_eq!(presentation.current_slide(), 0);
        presentation.handle_key("unbound");
        assert_eq!(presentation.current_slide(), 0);
    }

    #[test]
    fn destroy_turns_every_call_into_a_no_op() {
        let mut presentation = three_slide_deck(false, TransitionType::None);
        presentation.start_auto_play(100);
        presentation.next();
        assert_eq!(presentation.current_slide(), 1);
        presentation.destroy();

        let state = presentation.state();
        assert!(!state.initialized);
        assert_eq!(state.slide_count, 0);
        assert_eq!(state.current_slide, 0);
        assert!(!state.is_playing);

        presentation.next();
        presentation.tick(500);
        assert_eq!(presentation.current_slide(), 0);
    }

    #[test]
    fn slide_phase_tracks_the_animation_window() {
        let mut presentation = three_slide_deck(false, TransitionType::Fade);
        presentation.next();
        assert!(matches!(
            presentation.slide_phase(1),
            SlidePhase::Entering { .. }
        ));
        assert!(matches!(
            presentation.slide_phase(0),
            SlidePhase::Leaving { .. }
        ));

        presentation.tick(100);
        assert_eq!(presentation.slide_phase(1), SlidePhase::Active);
        assert_eq!(presentation.slide_phase(0), SlidePhase::Hidden);
    }
}
