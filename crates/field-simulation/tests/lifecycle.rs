//! Drives an animator through a simulated event loop.

use field_simulation::{
    Animator, AnimatorState, Color, DrawContext, FieldParams, FrameHandle, FrameScheduler,
    ListenerId, ResizeEvents, Surface,
};
use glam::Vec2;
use std::collections::HashSet;

/// Counts every mutation made through the context.
#[derive(Default)]
struct Writes(usize);

impl DrawContext for Writes {
    fn fill(&mut self, _: Color) {
        self.0 += 1;
    }
    fn stroke_gradient_line(&mut self, _: Vec2, _: Vec2, _: Color, _: Color, _: f32) {
        self.0 += 1;
    }
    fn fill_radial(&mut self, _: Vec2, _: f32, _: Color, _: Color) {
        self.0 += 1;
    }
    fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {
        self.0 += 1;
    }
    fn fill_radial_rect(&mut self, _: Vec2, _: f32, _: Color, _: Color) {
        self.0 += 1;
    }
}

struct Viewport {
    size: (u32, u32),
    writes: Writes,
}

impl Surface for Viewport {
    type Context = Writes;

    fn width(&self) -> u32 {
        self.size.0
    }
    fn height(&self) -> u32 {
        self.size.1
    }
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
    fn context(&mut self) -> Option<&mut Writes> {
        if self.size.0 == 0 || self.size.1 == 0 {
            None
        } else {
            Some(&mut self.writes)
        }
    }
}

/// Event loop where a cancelled frame may still be sitting in the queue.
#[derive(Default)]
struct EventLoop {
    next: u64,
    queued: Vec<FrameHandle>,
    cancelled: HashSet<FrameHandle>,
    listeners: HashSet<ListenerId>,
}

impl EventLoop {
    /// Fire every queued frame, honouring cancellations unless `lazy`.
    fn tick(&mut self, animator: &mut Animator<Viewport>, lazy: bool) {
        for handle in std::mem::take(&mut self.queued) {
            if lazy || !self.cancelled.contains(&handle) {
                animator.frame(self);
            }
        }
    }

    fn resize(&mut self, animator: &mut Animator<Viewport>, width: u32, height: u32) {
        if !self.listeners.is_empty() {
            animator.resize(width, height);
        }
    }
}

impl FrameScheduler for EventLoop {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.queued.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.insert(handle);
    }
}

impl ResizeEvents for EventLoop {
    fn subscribe(&mut self) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.listeners.insert(id);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

fn viewport(width: u32, height: u32) -> Viewport {
    Viewport {
        size: (width, height),
        writes: Writes::default(),
    }
}

#[test]
fn runs_until_stopped() {
    let mut host = EventLoop::default();
    let mut animator = Animator::with_seed(FieldParams::default(), 11);
    animator.start(viewport(1280, 720), &mut host);

    for _ in 0..60 {
        host.tick(&mut animator, false);
    }
    assert_eq!(animator.frames_drawn(), 60);

    animator.stop(&mut host);
    let writes = animator.surface().map(|s| s.writes.0);

    // A stale callback that slipped past cancellation must not draw.
    host.tick(&mut animator, true);
    host.tick(&mut animator, true);
    assert_eq!(animator.surface().map(|s| s.writes.0), writes);
    assert_eq!(animator.frames_drawn(), 60);
    assert!(host.queued.is_empty());
}

#[test]
fn resize_only_reaches_a_running_animator() {
    let mut host = EventLoop::default();
    let mut animator = Animator::with_seed(FieldParams::default(), 12);
    animator.start(viewport(1500, 800), &mut host);
    host.tick(&mut animator, false);
    assert_eq!(animator.particles().len(), 80);

    host.resize(&mut animator, 3000, 800);
    assert_eq!(animator.particles().len(), 160);

    animator.stop(&mut host);
    host.resize(&mut animator, 750, 400);
    assert_eq!(animator.particles().len(), 160);
    assert_eq!(animator.surface().map(|s| s.size), Some((3000, 800)));
}

#[test]
fn particles_stay_within_one_step_of_bounds() {
    let mut host = EventLoop::default();
    let mut params = FieldParams::default().with_density(2_000.0);
    params.speed = 6.0;
    let mut animator = Animator::with_seed(params, 13);
    animator.start(viewport(200, 150), &mut host);

    for _ in 0..2_000 {
        host.tick(&mut animator, false);
        for p in animator.particles() {
            let slack = p.vel().abs() + Vec2::splat(1e-3);
            assert!(p.position[0] >= -slack.x && p.position[0] <= 200.0 + slack.x);
            assert!(p.position[1] >= -slack.y && p.position[1] <= 150.0 + slack.y);
        }
    }
}

#[test]
fn empty_viewport_defers_start() {
    let mut host = EventLoop::default();
    let mut animator = Animator::with_seed(FieldParams::default(), 14);
    animator.start(viewport(0, 0), &mut host);
    assert_eq!(animator.state(), AnimatorState::Stopped);
    assert!(host.queued.is_empty());

    if let Some(surface) = animator.surface_mut() {
        surface.set_size(1500, 800);
    }
    animator.resume(&mut host);
    assert_eq!(animator.state(), AnimatorState::Running);
    assert_eq!(animator.particles().len(), 80);
}

#[test]
fn connections_respect_threshold() {
    let mut host = EventLoop::default();
    let mut animator = Animator::with_seed(FieldParams::default(), 15);
    animator.start(viewport(1024, 768), &mut host);
    host.tick(&mut animator, false);

    let particles = animator.particles();
    let max = FieldParams::default()
        .connections
        .map(|c| c.max_distance)
        .unwrap_or_default();
    for c in animator.connections() {
        let d = particles[c.from].pos().distance(particles[c.to].pos());
        assert!(d < max);
        assert!(c.alpha > 0.0 && c.alpha <= 0.3);
    }
}
