//! Asset load tracking and the overlay/scene-ready sequencing that follows it.
//!
//! [`LoadingManager`] aggregates per-item start/end notifications into progress
//! and completion events. [`LoadingSequencer`] turns completion into a timed
//! overlay fade and the one-shot scene-ready gate.

use fnv::FnvHashSet;
use smallvec::SmallVec;

use crate::constants::{
    OVERLAY_FADE_DELAY_SEC, OVERLAY_FADE_DURATION_SEC, OVERLAY_PRE_DELAY_SEC,
    SCENE_READY_DELAY_SEC,
};
use crate::tween::{Ease, Tween};

/// Notifications produced by the loading manager.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    Progress {
        url: String,
        loaded: usize,
        total: usize,
    },
    Complete,
}

impl LoadEvent {
    pub fn ratio(&self) -> Option<f32> {
        match self {
            LoadEvent::Progress { loaded, total, .. } => Some(progress_ratio(*loaded, *total)),
            LoadEvent::Complete => None,
        }
    }
}

/// `loaded / total`, clamped to [0, 1]; zero when nothing was requested.
#[inline]
pub fn progress_ratio(loaded: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        (loaded as f32 / total as f32).clamp(0.0, 1.0)
    }
}

/// Counts outstanding items by URL.
#[derive(Debug, Default)]
pub struct LoadingManager {
    started: FnvHashSet<String>,
    ended: FnvHashSet<String>,
    failed: FnvHashSet<String>,
    completed: bool,
}

impl LoadingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Starting the same URL twice counts it once.
    pub fn item_start(&mut self, url: &str) {
        if self.started.insert(url.to_string()) {
            self.completed = false;
            log::debug!("[loader] start {url} ({} items)", self.started.len());
        }
    }

    /// Mark an item finished and report progress (and completion when it was the last).
    pub fn item_end(&mut self, url: &str) -> SmallVec<[LoadEvent; 2]> {
        let mut events = SmallVec::new();
        if !self.started.contains(url) {
            log::warn!("[loader] end for unknown item {url}");
            return events;
        }
        if !self.ended.insert(url.to_string()) {
            return events;
        }
        events.push(LoadEvent::Progress {
            url: url.to_string(),
            loaded: self.loaded(),
            total: self.total(),
        });
        if self.is_complete() && !self.completed {
            self.completed = true;
            log::info!(
                "[loader] all {} items done ({} failed)",
                self.total(),
                self.failed.len()
            );
            events.push(LoadEvent::Complete);
        }
        events
    }

    /// A failed item still counts as ended so loading can complete.
    pub fn item_error(&mut self, url: &str) -> SmallVec<[LoadEvent; 2]> {
        log::warn!("[loader] failed to load {url}");
        self.failed.insert(url.to_string());
        self.item_end(url)
    }

    pub fn loaded(&self) -> usize {
        self.ended.len()
    }

    pub fn total(&self) -> usize {
        self.started.len()
    }

    pub fn failed(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.total() > 0 && self.loaded() == self.total()
    }
}

/// Sequencer phases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequencerState {
    /// Assets are loading, or finished less than the pre-delay ago.
    Loading { completed_at: Option<f64> },
    /// The overlay fade has been scheduled; the gate is still closed.
    Fading { completed_at: f64 },
    /// The scene-ready gate is open.
    Ready { completed_at: f64 },
}

/// Transitions reported by [`LoadingSequencer::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    FadeStarted,
    SceneReady,
}

pub type SequencerEvents = SmallVec<[SequencerEvent; 2]>;

/// Timing of the load-complete sequence, relative to completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequencerTiming {
    pub pre_delay: f64,
    pub fade_delay: f64,
    pub fade_duration: f64,
    pub ready_delay: f64,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            pre_delay: OVERLAY_PRE_DELAY_SEC,
            fade_delay: OVERLAY_FADE_DELAY_SEC,
            fade_duration: OVERLAY_FADE_DURATION_SEC,
            ready_delay: SCENE_READY_DELAY_SEC,
        }
    }
}

/// Loading → Fading → Ready, driven by injected time in seconds.
#[derive(Clone, Debug)]
pub struct LoadingSequencer {
    state: SequencerState,
    timing: SequencerTiming,
    progress: f32,
}

impl LoadingSequencer {
    pub fn new(timing: SequencerTiming) -> Self {
        Self {
            state: SequencerState::Loading { completed_at: None },
            timing,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn timing(&self) -> SequencerTiming {
        self.timing
    }

    pub fn progress_ratio(&self) -> f32 {
        self.progress
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SequencerState::Ready { .. })
    }

    pub fn on_progress(&mut self, _url: &str, loaded: usize, total: usize) {
        self.progress = progress_ratio(loaded, total);
    }

    /// Record completion. Later calls are ignored.
    pub fn on_complete(&mut self, now: f64) {
        if let SequencerState::Loading { completed_at: None } = self.state {
            log::info!("[sequencer] assets loaded at {now:.3}s");
            self.progress = 1.0;
            self.state = SequencerState::Loading {
                completed_at: Some(now),
            };
        }
    }

    /// Feed a manager event.
    pub fn on_load_event(&mut self, event: &LoadEvent, now: f64) {
        match event {
            LoadEvent::Progress { url, loaded, total } => self.on_progress(url, *loaded, *total),
            LoadEvent::Complete => self.on_complete(now),
        }
    }

    /// Apply every transition due at `now`, in order.
    pub fn advance(&mut self, now: f64) -> SequencerEvents {
        let mut events = SequencerEvents::new();
        if let SequencerState::Loading {
            completed_at: Some(t0),
        } = self.state
        {
            if now >= t0 + self.timing.pre_delay {
                log::info!("[sequencer] overlay fade scheduled");
                self.state = SequencerState::Fading { completed_at: t0 };
                events.push(SequencerEvent::FadeStarted);
            }
        }
        if let SequencerState::Fading { completed_at: t0 } = self.state {
            if now >= t0 + self.timing.ready_delay {
                log::info!("[sequencer] scene ready");
                self.state = SequencerState::Ready { completed_at: t0 };
                events.push(SequencerEvent::SceneReady);
            }
        }
        events
    }

    fn completed_at(&self) -> Option<f64> {
        match self.state {
            SequencerState::Loading { completed_at } => completed_at,
            SequencerState::Fading { completed_at } | SequencerState::Ready { completed_at } => {
                Some(completed_at)
            }
        }
    }

    /// The overlay fade tween, once loading has completed.
    pub fn overlay_tween(&self) -> Option<Tween> {
        let t0 = self.completed_at()?;
        Some(
            Tween::new(
                1.0,
                0.0,
                t0 + self.timing.pre_delay,
                self.timing.fade_delay,
                self.timing.fade_duration,
            )
            .with_ease(Ease::Power1Out),
        )
    }

    /// Overlay opacity at `now`: 1 until the fade begins, then eased to 0.
    pub fn overlay_alpha(&self, now: f64) -> f32 {
        match (self.state, self.overlay_tween()) {
            (SequencerState::Loading { .. }, _) | (_, None) => 1.0,
            (_, Some(tween)) => tween.value_at(now) as f32,
        }
    }
}

impl Default for LoadingSequencer {
    fn default() -> Self {
        Self::new(SequencerTiming::default())
    }
}
