//! Dual-track animation scheduler.
//!
//! Two independent interpolation tracks share one redraw loop:
//!
//! - the **entrance** track runs once per chart lifetime, starting when the
//!   renderer first reports ready;
//! - the **visibility** track fades each series toward 1 (visible) or 0
//!   (hidden) whenever the hidden-series set changes identity.
//!
//! Both use cubic ease-out over a caller-supplied clock. The loop is started
//! by whichever track activates first, restarts are no-ops while it runs,
//! and it stops itself the frame both tracks converge. The host wires
//! `request_redraw` to its frame clock and calls [`AnimationScheduler::tick`]
//! on every redraw; [`AnimationScheduler::draw_once`] re-renders the current
//! static values without touching the loop.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use plotline_core::easing::ease_out_cubic;

/// Default track duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// Snap distance: a visibility value this close to its target is settled.
const VISIBILITY_EPSILON: f32 = 1e-3;

/// Animation configuration shared by both tracks.
#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub enabled: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            enabled: true,
        }
    }
}

impl AnimationConfig {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether interpolation can make progress at all. A zero duration is
    /// treated as disabled so a track can never fail to terminate.
    fn animates(&self) -> bool {
        self.enabled && !self.duration.is_zero()
    }
}

/// The hidden-series set, with an identity generation.
///
/// Identity, not value equality, triggers the visibility track: callers
/// construct a "new set" by mutating through these methods, each of which
/// bumps the generation, mirroring hosts that only allocate a new set object
/// on an actual toggle.
#[derive(Debug, Clone, Default)]
pub struct HiddenSeries {
    hidden: HashSet<usize>,
    generation: u64,
}

impl HiddenSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.hidden.contains(&index)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Toggle one series and bump the identity generation.
    pub fn toggle(&mut self, index: usize) {
        if !self.hidden.remove(&index) {
            self.hidden.insert(index);
        }
        self.generation += 1;
    }

    /// Replace the whole set and bump the identity generation, even when the
    /// contents are value-equal.
    pub fn replace(&mut self, hidden: impl IntoIterator<Item = usize>) {
        self.hidden = hidden.into_iter().collect();
        self.generation += 1;
    }
}

/// Callback receiving `(entrance_progress, per_series_visibility)`.
pub type RenderCallback = Box<dyn FnMut(f32, &[f32])>;

/// Hook asking the host for another animation frame.
pub type RedrawHook = Box<dyn FnMut()>;

/// Drives entrance and visibility interpolation without re-entering the
/// host's UI update path.
pub struct AnimationScheduler {
    config: AnimationConfig,
    callback: Option<RenderCallback>,
    redraw: Option<RedrawHook>,

    entrance_started: bool,
    entrance_start: Option<Instant>,
    entrance_progress: f32,

    visibility: Vec<f32>,
    from: Vec<f32>,
    to: Vec<f32>,
    visibility_start: Option<Instant>,
    seen_generation: Option<u64>,

    loop_active: bool,
    cancelled: bool,
}

impl AnimationScheduler {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            callback: None,
            redraw: None,
            entrance_started: false,
            entrance_start: None,
            entrance_progress: 0.0,
            visibility: Vec::new(),
            from: Vec::new(),
            to: Vec::new(),
            visibility_start: None,
            seen_generation: None,
            loop_active: false,
            cancelled: false,
        }
    }

    /// Install the host's redraw request hook.
    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.redraw = Some(hook);
    }

    /// Install or replace the render callback. The most recently supplied
    /// callback is the one invoked, including mid-animation.
    pub fn set_callback(&mut self, callback: RenderCallback) {
        self.callback = Some(callback);
    }

    /// Current entrance progress, eased, in `[0, 1]`.
    pub fn entrance_progress(&self) -> f32 {
        self.entrance_progress
    }

    /// Current per-series visibility values.
    pub fn visibility(&self) -> &[f32] {
        &self.visibility
    }

    /// Whether the redraw loop is running.
    pub fn is_animating(&self) -> bool {
        self.loop_active
    }

    /// Notify the scheduler of renderer readiness. The first `true` starts
    /// the entrance track; later calls are ignored, so entrance fires at
    /// most once per scheduler lifetime.
    pub fn set_ready(&mut self, ready: bool, now: Instant) {
        if !ready || self.entrance_started || self.cancelled {
            return;
        }
        self.entrance_started = true;
        if self.config.animates() {
            self.entrance_start = Some(now);
            self.start_loop();
        } else {
            self.entrance_progress = 1.0;
        }
    }

    /// Resize the visibility vector for a new series count.
    ///
    /// Existing values are preserved by index; new slots start at 1, or 0
    /// when the hidden set already hides them. Entrance is unaffected.
    pub fn set_series_count(&mut self, count: usize, hidden: &HiddenSeries) {
        let initial = |i: usize| if hidden.contains(i) { 0.0 } else { 1.0 };
        for i in self.visibility.len()..count {
            self.visibility.push(initial(i));
            self.from.push(initial(i));
            self.to.push(initial(i));
        }
        self.visibility.truncate(count);
        self.from.truncate(count);
        self.to.truncate(count);
    }

    /// Observe the hidden-series set; a generation change retargets the
    /// visibility track.
    pub fn sync_hidden(&mut self, hidden: &HiddenSeries, now: Instant) {
        if self.cancelled || self.seen_generation == Some(hidden.generation()) {
            return;
        }
        let first_observation = self.seen_generation.is_none();
        self.seen_generation = Some(hidden.generation());

        let targets: Vec<f32> = (0..self.visibility.len())
            .map(|i| if hidden.contains(i) { 0.0 } else { 1.0 })
            .collect();

        if first_observation {
            // Adoption of the initial set is not a toggle.
            self.visibility.copy_from_slice(&targets);
            self.from.copy_from_slice(&targets);
            self.to = targets;
            return;
        }

        if !self.config.animates() {
            self.visibility.copy_from_slice(&targets);
            self.from.copy_from_slice(&targets);
            self.to = targets;
            // Jump straight to the targets, but still redraw once.
            self.invoke_callback();
            return;
        }

        self.from.copy_from_slice(&self.visibility);
        self.to = targets;
        self.visibility_start = Some(now);
        self.start_loop();
    }

    /// Advance both tracks and invoke the render callback once.
    ///
    /// Both tracks finish updating before the callback runs, so one
    /// invocation always sees a consistent entrance+visibility snapshot.
    /// Elapsed time is absolute: skipped host frames produce a larger step,
    /// not an error.
    pub fn tick(&mut self, now: Instant) {
        if self.cancelled || !self.loop_active {
            return;
        }

        if let Some(start) = self.entrance_start {
            let t = elapsed_fraction(start, now, self.config.duration);
            self.entrance_progress = ease_out_cubic(t);
            if t >= 1.0 {
                self.entrance_progress = 1.0;
                self.entrance_start = None;
            }
        }

        if let Some(start) = self.visibility_start {
            let eased = ease_out_cubic(elapsed_fraction(start, now, self.config.duration));
            let mut settled = true;
            for i in 0..self.visibility.len() {
                let mut value = self.from[i] + (self.to[i] - self.from[i]) * eased;
                if (value - self.to[i]).abs() < VISIBILITY_EPSILON {
                    value = self.to[i];
                } else {
                    settled = false;
                }
                self.visibility[i] = value;
            }
            if settled {
                self.visibility_start = None;
            }
        }

        self.invoke_callback();

        if self.entrance_start.is_none() && self.visibility_start.is_none() {
            self.loop_active = false;
        } else {
            self.request_redraw();
        }
    }

    /// Invoke the callback once with the current (possibly static) values.
    /// Never starts or restarts the loop.
    pub fn draw_once(&mut self) {
        if self.cancelled {
            return;
        }
        self.invoke_callback();
    }

    /// Stop the loop permanently; no further callback invocations occur.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.loop_active = false;
    }

    fn start_loop(&mut self) {
        if self.loop_active || self.cancelled {
            return;
        }
        self.loop_active = true;
        self.request_redraw();
    }

    fn request_redraw(&mut self) {
        if let Some(hook) = &mut self.redraw {
            hook();
        }
    }

    fn invoke_callback(&mut self) {
        if let Some(callback) = &mut self.callback {
            callback(self.entrance_progress, &self.visibility);
        }
    }
}

fn elapsed_fraction(start: Instant, now: Instant, duration: Duration) -> f32 {
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    struct Recorded {
        scheduler: AnimationScheduler,
        frames: Rc<RefCell<Vec<(f32, Vec<f32>)>>>,
    }

    fn recorded(config: AnimationConfig) -> Recorded {
        let frames: Rc<RefCell<Vec<(f32, Vec<f32>)>>> = Rc::default();
        let mut scheduler = AnimationScheduler::new(config);
        let sink = frames.clone();
        scheduler.set_callback(Box::new(move |entrance, visibility| {
            sink.borrow_mut().push((entrance, visibility.to_vec()));
        }));
        Recorded { scheduler, frames }
    }

    #[test]
    fn entrance_runs_to_completion_and_loop_stops() {
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        assert!(scheduler.is_animating());

        for step in 1..=80u64 {
            scheduler.tick(t0 + ms(step * 10));
        }
        assert_eq!(scheduler.entrance_progress(), 1.0);
        assert!(!scheduler.is_animating());

        // Further ticks are silent until a new trigger.
        let drawn = frames.borrow().len();
        scheduler.tick(t0 + ms(2_000));
        assert_eq!(frames.borrow().len(), drawn);
    }

    #[test]
    fn entrance_progress_is_monotonic() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);

        let mut last = 0.0;
        for step in 1..=70u64 {
            scheduler.tick(t0 + ms(step * 10));
            let p = scheduler.entrance_progress();
            assert!(p >= last);
            last = p;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn entrance_fires_once_per_lifetime() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        scheduler.tick(t0 + ms(1_000));
        assert_eq!(scheduler.entrance_progress(), 1.0);

        // A second readiness report must not restart the track.
        scheduler.set_ready(true, t0 + ms(1_100));
        assert!(!scheduler.is_animating());
        assert_eq!(scheduler.entrance_progress(), 1.0);
    }

    #[test]
    fn disabled_entrance_is_immediately_complete() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default().disabled());
        scheduler.set_ready(true, Instant::now());
        assert_eq!(scheduler.entrance_progress(), 1.0);
        assert!(!scheduler.is_animating());
    }

    #[test]
    fn zero_duration_cannot_loop_forever() {
        let Recorded { mut scheduler, .. } =
            recorded(AnimationConfig::default().with_duration(ms(0)));
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        assert_eq!(scheduler.entrance_progress(), 1.0);
        assert!(!scheduler.is_animating());
    }

    #[test]
    fn visibility_toggle_fades_to_target() {
        // Scenario: two series, hidden set {} -> {0}, duration 600.
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(2, &hidden);
        scheduler.sync_hidden(&hidden, t0);
        assert_eq!(scheduler.visibility(), &[1.0, 1.0]);

        hidden.replace([0]);
        scheduler.sync_hidden(&hidden, t0);
        // Immediately after the trigger nothing has moved yet.
        assert_eq!(scheduler.visibility(), &[1.0, 1.0]);
        assert!(scheduler.is_animating());

        scheduler.tick(t0 + ms(600));
        assert_eq!(scheduler.visibility(), &[0.0, 1.0]);
        assert!(!scheduler.is_animating());
        assert!(!frames.borrow().is_empty());
    }

    #[test]
    fn visibility_converges_from_any_tick_cadence() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(3, &hidden);
        scheduler.sync_hidden(&hidden, t0);
        hidden.replace([1, 2]);
        scheduler.sync_hidden(&hidden, t0);

        // Irregular, monotonically increasing timestamps.
        let mut t = t0;
        for step in [3u64, 7, 16, 160, 90, 410, 33] {
            t += ms(step);
            scheduler.tick(t);
        }
        assert_eq!(scheduler.visibility(), &[1.0, 0.0, 0.0]);
        assert!(!scheduler.is_animating());
    }

    #[test]
    fn retarget_mid_fade_snapshots_current_values() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(1, &hidden);
        scheduler.sync_hidden(&hidden, t0);

        hidden.replace([0]);
        scheduler.sync_hidden(&hidden, t0);
        scheduler.tick(t0 + ms(120));
        let mid = scheduler.visibility()[0];
        assert!(mid > 0.0 && mid < 1.0);

        // Toggle back while fading out: the fade-in starts from `mid`.
        hidden.replace([]);
        scheduler.sync_hidden(&hidden, t0 + ms(120));
        scheduler.tick(t0 + ms(121));
        assert!(scheduler.visibility()[0] >= mid);
        scheduler.tick(t0 + ms(800));
        assert_eq!(scheduler.visibility(), &[1.0]);
    }

    #[test]
    fn value_equal_replacement_still_retargets() {
        // Identity, not contents, drives the trigger.
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(2, &hidden);
        scheduler.sync_hidden(&hidden, t0);

        hidden.replace([]);
        scheduler.sync_hidden(&hidden, t0);
        // Values already match their targets, so the first tick settles and
        // stops, but a frame was scheduled and drawn.
        scheduler.tick(t0 + ms(10));
        assert!(!scheduler.is_animating());
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn disabled_visibility_jumps_and_redraws_once() {
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default().disabled());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(2, &hidden);
        scheduler.sync_hidden(&hidden, t0);
        assert!(frames.borrow().is_empty());

        hidden.replace([1]);
        scheduler.sync_hidden(&hidden, t0);
        assert_eq!(scheduler.visibility(), &[1.0, 0.0]);
        assert!(!scheduler.is_animating());
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn series_resize_preserves_values_by_index() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let mut hidden = HiddenSeries::new();
        scheduler.set_series_count(3, &hidden);
        scheduler.sync_hidden(&hidden, t0);

        // Drive series 1 to a mid-fade value.
        hidden.replace([1]);
        scheduler.sync_hidden(&hidden, t0);
        scheduler.tick(t0 + ms(150));
        let before = scheduler.visibility().to_vec();
        assert!(before[1] > 0.0 && before[1] < 1.0);

        hidden.replace([1, 3]);
        scheduler.set_series_count(5, &hidden);
        let after = scheduler.visibility();
        assert_eq!(&after[..3], &before[..]);
        assert_eq!(after[3], 0.0);
        assert_eq!(after[4], 1.0);

        // Shrinking keeps the prefix.
        scheduler.set_series_count(2, &hidden);
        assert_eq!(scheduler.visibility(), &before[..2]);
    }

    #[test]
    fn resize_does_not_restart_entrance() {
        let Recorded { mut scheduler, .. } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        let hidden = HiddenSeries::new();
        scheduler.set_ready(true, t0);
        scheduler.tick(t0 + ms(1_000));
        assert_eq!(scheduler.entrance_progress(), 1.0);

        scheduler.set_series_count(4, &hidden);
        assert_eq!(scheduler.entrance_progress(), 1.0);
        assert!(!scheduler.is_animating());
    }

    #[test]
    fn draw_once_uses_latest_values_without_looping() {
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default());
        let hidden = HiddenSeries::new();
        scheduler.set_series_count(2, &hidden);
        scheduler.sync_hidden(&hidden, Instant::now());

        scheduler.draw_once();
        assert!(!scheduler.is_animating());
        let frames = frames.borrow();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].1, vec![1.0, 1.0]);
    }

    #[test]
    fn replaced_callback_receives_subsequent_frames() {
        let mut scheduler = AnimationScheduler::new(AnimationConfig::default());
        let first: Rc<RefCell<u32>> = Rc::default();
        let second: Rc<RefCell<u32>> = Rc::default();

        let sink = first.clone();
        scheduler.set_callback(Box::new(move |_, _| *sink.borrow_mut() += 1));
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        scheduler.tick(t0 + ms(50));
        assert_eq!(*first.borrow(), 1);

        // Swap mid-animation; the old callback never runs again.
        let sink = second.clone();
        scheduler.set_callback(Box::new(move |_, _| *sink.borrow_mut() += 1));
        scheduler.tick(t0 + ms(100));
        scheduler.tick(t0 + ms(1_000));
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn cancel_stops_all_callbacks() {
        let Recorded {
            mut scheduler,
            frames,
        } = recorded(AnimationConfig::default());
        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        scheduler.tick(t0 + ms(10));
        let drawn = frames.borrow().len();

        scheduler.cancel();
        scheduler.tick(t0 + ms(20));
        scheduler.draw_once();
        scheduler.set_ready(true, t0 + ms(30));
        assert_eq!(frames.borrow().len(), drawn);
        assert!(!scheduler.is_animating());
    }

    #[test]
    fn redraw_hook_drives_the_loop() {
        let requests: Rc<RefCell<u32>> = Rc::default();
        let mut scheduler = AnimationScheduler::new(AnimationConfig::default());
        let sink = requests.clone();
        scheduler.set_redraw_hook(Box::new(move || *sink.borrow_mut() += 1));

        let t0 = Instant::now();
        scheduler.set_ready(true, t0);
        assert_eq!(*requests.borrow(), 1);

        scheduler.tick(t0 + ms(100));
        assert_eq!(*requests.borrow(), 2);

        // Convergence stops the requests.
        scheduler.tick(t0 + ms(1_000));
        assert_eq!(*requests.borrow(), 2);
    }
}
