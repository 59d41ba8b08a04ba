//! Mount/unmount lifecycle for the particle background.
//!
//! An [`Animator`] owns a [`ParticleField`] and a drawing surface. While
//! mounted it keeps one frame request outstanding with the host
//! [`Scheduler`] and listens to the host's pointer, resize and theme
//! [`Signal`]s. Unmounting (explicitly or by drop) cancels the pending frame
//! and detaches every listener before returning.
//!
//! Nothing here returns an error to the host at runtime. A missing surface
//! yields an animator that never starts; events that cannot be applied are
//! logged and dropped.

use crate::{FieldConfig, ParticleField};
use constellation_core::{
    ConstellationError, DVec2, FrameHandle, Palette, RandomSource, Scheduler, Signal,
    Subscription, Surface, Viewport,
};
use log::{info, trace, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Pointer notifications in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(DVec2),
    /// The pointer left the window.
    Left,
}

/// The host capabilities an [`Animator`] mounts against.
#[derive(Clone)]
pub struct Environment {
    pub scheduler: Rc<dyn Scheduler>,
    pub pointer: Signal<PointerEvent>,
    pub resize: Signal<Viewport>,
    pub theme: Signal<Palette>,
}

impl Environment {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pointer: Signal::new(),
            resize: Signal::new(),
            theme: Signal::new(),
        }
    }

    /// Total listeners attached across all three signals.
    pub fn listener_count(&self) -> usize {
        self.pointer.listener_count() + self.resize.listener_count() + self.theme.listener_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Not mounted, unmounted, or mounted without a surface.
    Stopped,
    /// Frame loop active and listeners attached.
    Running,
}

struct Shared {
    field: ParticleField,
    surface: Box<dyn Surface>,
    rng: Box<dyn RandomSource>,
    scheduler: Rc<dyn Scheduler>,
    pending: Option<FrameHandle>,
    frames: u64,
}

/// A mounted particle background.
pub struct Animator {
    shared: Option<Rc<RefCell<Shared>>>,
    subscriptions: Vec<Subscription>,
}

impl Animator {
    /// Mounts the animator: builds the field for the surface's viewport,
    /// attaches listeners and requests the first frame.
    ///
    /// With `surface == None` (the host has no 2D context) the returned
    /// animator is inert: [`AnimatorState::Stopped`], no listeners, no frames.
    /// Only an invalid `config` is an error.
    pub fn mount(
        env: &Environment,
        surface: Option<Box<dyn Surface>>,
        palette: Palette,
        config: FieldConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConstellationError> {
        config.validate()?;
        let Some(surface) = surface else {
            warn!("no 2D drawing surface available; particle background disabled");
            return Ok(Self::inert());
        };

        let viewport = surface.viewport();
        let field = ParticleField::new(viewport, palette, config, rng.as_mut())?;
        let shared = Rc::new(RefCell::new(Shared {
            field,
            surface,
            rng,
            scheduler: Rc::clone(&env.scheduler),
            pending: None,
            frames: 0,
        }));

        let subscriptions = vec![
            env.pointer.subscribe(with_shared(&shared, on_pointer)),
            env.resize.subscribe(with_shared(&shared, on_resize)),
            env.theme.subscribe(with_shared(&shared, on_theme)),
        ];
        schedule_frame(&shared);
        info!(
            "particle background mounted at {}x{}",
            viewport.width, viewport.height
        );

        Ok(Self {
            shared: Some(shared),
            subscriptions,
        })
    }

    fn inert() -> Self {
        Self {
            shared: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn state(&self) -> AnimatorState {
        if self.shared.is_some() {
            AnimatorState::Running
        } else {
            AnimatorState::Stopped
        }
    }

    /// Frames simulated and rendered since mount.
    pub fn frames(&self) -> u64 {
        self.shared.as_ref().map_or(0, |s| s.borrow().frames)
    }

    /// Runs `f` against the live field. `None` when stopped.
    pub fn inspect<R>(&self, f: impl FnOnce(&ParticleField) -> R) -> Option<R> {
        self.shared.as_ref().map(|s| f(&s.borrow().field))
    }

    /// Cancels the pending frame and detaches every listener. Idempotent.
    pub fn unmount(&mut self) {
        self.subscriptions.clear();
        let Some(shared) = self.shared.take() else {
            return;
        };
        let mut shared = shared.borrow_mut();
        if let Some(handle) = shared.pending.take() {
            shared.scheduler.cancel_frame(handle);
        }
        info!("particle background unmounted after {} frames", shared.frames);
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Adapts a handler over `Shared` into a signal listener holding only a weak
/// reference, so listeners never keep an unmounted animator alive.
fn with_shared<T>(
    shared: &Rc<RefCell<Shared>>,
    handler: fn(&mut Shared, &T),
) -> impl FnMut(&T) + 'static
where
    T: 'static,
{
    let weak: Weak<RefCell<Shared>> = Rc::downgrade(shared);
    move |event: &T| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        match shared.try_borrow_mut() {
            Ok(mut shared) => handler(&mut shared, event),
            Err(_) => trace!("event arrived mid-frame; dropped"),
        };
    }
}

fn on_pointer(shared: &mut Shared, event: &PointerEvent) {
    match *event {
        PointerEvent::Moved(client) => {
            let local = client - shared.surface.origin();
            shared.field.set_pointer(local);
        }
        PointerEvent::Left => shared.field.clear_pointer(),
    }
}

fn on_resize(shared: &mut Shared, viewport: &Viewport) {
    let Shared {
        field,
        surface,
        rng,
        ..
    } = shared;
    surface.resize(*viewport);
    field.resize(*viewport, rng.as_mut());
}

fn on_theme(shared: &mut Shared, palette: &Palette) {
    let Shared { field, rng, .. } = shared;
    field.set_palette(palette.clone(), rng.as_mut());
}

fn schedule_frame(shared: &Rc<RefCell<Shared>>) {
    let weak = Rc::downgrade(shared);
    let scheduler = Rc::clone(&shared.borrow().scheduler);
    let handle = scheduler.request_frame(Box::new(move |_timestamp| {
        if let Some(shared) = weak.upgrade() {
            run_frame(&shared);
        }
    }));
    shared.borrow_mut().pending = Some(handle);
}

fn run_frame(shared: &Rc<RefCell<Shared>>) {
    {
        let mut guard = shared.borrow_mut();
        let Shared {
            field,
            surface,
            pending,
            frames,
            ..
        } = &mut *guard;
        *pending = None;
        field.tick(surface.as_mut());
        *frames += 1;
    }
    schedule_frame(shared);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_core::{DrawCommand, ManualScheduler, Recorder, Rgb, Xorshift64};

    struct Harness {
        scheduler: ManualScheduler,
        env: Environment,
        recorder: Recorder,
    }

    fn harness(width: u32, height: u32) -> Harness {
        let scheduler = ManualScheduler::new();
        let env = Environment::new(Rc::new(scheduler.clone()));
        Harness {
            scheduler,
            env,
            recorder: Recorder::new(Viewport::new(width, height)),
        }
    }

    fn mount(h: &Harness) -> Animator {
        Animator::mount(
            &h.env,
            Some(Box::new(h.recorder.clone())),
            Palette::default(),
            FieldConfig::default(),
            Box::new(Xorshift64::new(42)),
        )
        .unwrap()
    }

    #[test]
    fn mount_starts_running_with_one_pending_frame() {
        let h = harness(800, 600);
        let animator = mount(&h);
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(h.scheduler.pending(), 1);
        assert_eq!(h.env.listener_count(), 3);
        assert_eq!(animator.inspect(|f| f.particles().len()), Some(80));
    }

    #[test]
    fn each_frame_steps_renders_and_reschedules() {
        let h = harness(400, 300);
        let animator = mount(&h);
        h.scheduler.run_frames(5);
        assert_eq!(animator.frames(), 5);
        assert_eq!(h.recorder.frames(), 5);
        assert_eq!(h.scheduler.pending(), 1);
    }

    #[test]
    fn unmount_before_first_frame_leaves_nothing_behind() {
        let h = harness(800, 600);
        let mut animator = mount(&h);
        animator.unmount();
        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.env.listener_count(), 0);

        h.scheduler.run_frames(3);
        h.env.resize.emit(&Viewport::new(100, 100));
        h.env.pointer.emit(&PointerEvent::Moved(DVec2::new(5.0, 5.0)));
        assert!(h.recorder.commands().is_empty());
        assert!(h.recorder.resizes().is_empty());
        assert_eq!(animator.frames(), 0);

        // second unmount is a no-op
        animator.unmount();
    }

    #[test]
    fn dropping_the_animator_unmounts() {
        let h = harness(800, 600);
        let animator = mount(&h);
        h.scheduler.run_frame();
        drop(animator);
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.env.listener_count(), 0);
        h.scheduler.run_frames(2);
        assert_eq!(h.recorder.frames(), 1);
    }

    #[test]
    fn missing_surface_is_inert() {
        let h = harness(800, 600);
        let animator = Animator::mount(
            &h.env,
            None,
            Palette::default(),
            FieldConfig::default(),
            Box::new(Xorshift64::new(1)),
        )
        .unwrap();
        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.env.listener_count(), 0);
        assert!(animator.inspect(|f| f.particles().len()).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let h = harness(800, 600);
        let cfg = FieldConfig {
            px_per_particle: 0.0,
            ..FieldConfig::default()
        };
        let result = Animator::mount(
            &h.env,
            Some(Box::new(h.recorder.clone())),
            Palette::default(),
            cfg,
            Box::new(Xorshift64::new(1)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn resize_resizes_surface_and_regenerates_field() {
        let h = harness(800, 600);
        let animator = mount(&h);
        h.env.resize.emit(&Viewport::new(1920, 1080));
        assert_eq!(h.recorder.resizes(), vec![Viewport::new(1920, 1080)]);
        assert_eq!(animator.inspect(|f| f.particles().len()), Some(160));
        assert_eq!(animator.state(), AnimatorState::Running);
        h.scheduler.run_frame();
        assert!(animator
            .inspect(|f| f.particles().iter().all(|p| f.viewport().contains(p.position)))
            .unwrap());
    }

    #[test]
    fn theme_change_recolors_within_one_reinitialization() {
        let h = harness(1000, 700);
        let animator = mount(&h);
        h.scheduler.run_frames(3);
        let solar = Palette::from_name("solar").unwrap();
        h.env.theme.emit(&solar);
        h.scheduler.run_frame();

        let colors: Vec<Rgb> = h
            .recorder
            .last_frame()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { color, .. } => Some(color.rgb()),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 100);
        assert!(colors.iter().all(|&c| solar.contains(c)));
        assert_eq!(animator.inspect(|f| f.palette().clone()), Some(solar));
    }

    #[test]
    fn pointer_is_translated_into_surface_space() {
        let scheduler = ManualScheduler::new();
        let env = Environment::new(Rc::new(scheduler.clone()));
        let recorder = Recorder::new(Viewport::new(500, 500)).with_origin(DVec2::new(100.0, 40.0));
        let animator = Animator::mount(
            &env,
            Some(Box::new(recorder)),
            Palette::default(),
            FieldConfig::default(),
            Box::new(Xorshift64::new(3)),
        )
        .unwrap();
        env.pointer.emit(&PointerEvent::Moved(DVec2::new(350.0, 240.0)));
        assert_eq!(animator.inspect(|f| f.pointer()), Some(DVec2::new(250.0, 200.0)));
        env.pointer.emit(&PointerEvent::Left);
        assert_eq!(animator.inspect(|f| f.pointer()), Some(crate::POINTER_ABSENT));
    }

    #[test]
    fn zero_width_surface_runs_empty_frames() {
        let h = harness(0, 0);
        let animator = mount(&h);
        h.scheduler.run_frames(4);
        assert_eq!(animator.frames(), 4);
        assert_eq!(h.recorder.frames(), 4);
        assert!(h.recorder.last_frame().is_empty());
    }

    #[test]
    fn two_animators_share_a_host_independently() {
        let h = harness(300, 300);
        let mut first = mount(&h);
        let second = mount(&h);
        assert_eq!(h.env.listener_count(), 6);
        first.unmount();
        assert_eq!(h.env.listener_count(), 3);
        h.scheduler.run_frame();
        assert_eq!(second.frames(), 1);
    }
}
