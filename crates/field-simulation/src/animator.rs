//! Particle-field animator
//!
//! Owns the particle set and drives it through an explicit two-state machine:
//!
//! - `start` moves Stopped -> Running: particles are generated for the surface,
//!   a resize listener is registered and the first frame is requested.
//! - every `frame` while Running clears, steps, reconnects and draws, then
//!   requests the next frame.
//! - `stop` moves Running -> Stopped: the pending frame is cancelled and the
//!   resize listener removed.
//!
//! A `frame` that arrives while Stopped is ignored, which covers hosts whose
//! cancellation is not synchronous with an already queued callback.

use crate::{paint, FieldParams, FrameHandle, FrameScheduler, Host, ListenerId, Surface};
use field_physics::{find_connections, spawn_particles, Connection, Particle};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Stopped,
    Running,
}

/// Host registrations held while Running
#[derive(Debug)]
struct Running {
    frame: Option<FrameHandle>,
    listener: ListenerId,
}

pub struct Animator<S: Surface> {
    params: FieldParams,
    surface: Option<S>,
    particles: Vec<Particle>,
    connections: Vec<Connection>,
    rng: StdRng,
    next_id: u32,
    running: Option<Running>,
    frames_drawn: u64,
}

impl<S: Surface> Animator<S> {
    pub fn new(params: FieldParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Deterministic particle layout for a given seed
    pub fn with_seed(params: FieldParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: FieldParams, rng: StdRng) -> Self {
        Self {
            params,
            surface: None,
            particles: Vec::new(),
            connections: Vec::new(),
            rng,
            next_id: 0,
            running: None,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> AnimatorState {
        if self.running.is_some() {
            AnimatorState::Running
        } else {
            AnimatorState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Connections computed by the most recent frame
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Take ownership of `surface` and begin animating onto it.
    ///
    /// Does nothing while already Running. If the surface cannot provide a
    /// drawing context the animator keeps the surface but stays Stopped; a
    /// later [`resume`](Self::resume) retries.
    pub fn start<H: Host + ?Sized>(&mut self, surface: S, host: &mut H) {
        if self.running.is_some() {
            log::warn!("Animator already running; ignoring start");
            return;
        }
        self.surface = Some(surface);
        self.resume(host);
    }

    /// Start again on the surface already held, e.g. after [`stop`](Self::stop).
    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.running.is_some() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("No surface attached; start skipped");
            return;
        };
        if surface.context().is_none() {
            log::debug!(
                "Surface {}x{} has no drawing context; start skipped",
                surface.width(),
                surface.height()
            );
            return;
        }

        let (width, height) = (surface.width(), surface.height());
        self.regenerate(width, height);

        let listener = host.subscribe();
        let frame = host.request_frame();
        self.running = Some(Running {
            frame: Some(frame),
            listener,
        });

        log::info!(
            "Particle field started: {}x{}, {} particles",
            width,
            height,
            self.particles.len()
        );
    }

    /// Resize the surface and replace the whole particle set.
    ///
    /// Nothing of the previous set survives; positions are not carried over.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("Resize to {}x{} with no surface attached", width, height);
            return;
        };
        surface.set_size(width, height);
        self.regenerate(width, height);

        log::debug!(
            "Particle field resized to {}x{}, {} particles",
            width,
            height,
            self.particles.len()
        );
    }

    /// Cancel the pending frame and the resize listener. Safe to call any
    /// number of times, including before `start`.
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(running) = self.running.take() else {
            return;
        };
        if let Some(frame) = running.frame {
            host.cancel_frame(frame);
        }
        host.unsubscribe(running.listener);

        log::info!("Particle field stopped after {} frames", self.frames_drawn);
    }

    /// Frame callback: update, draw, and schedule the next frame.
    pub fn frame<H: FrameScheduler + ?Sized>(&mut self, host: &mut H) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        running.frame = None;

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let mut ctx = surface.context();

        if let Some(ctx) = ctx.as_deref_mut() {
            paint::clear(ctx, &self.params);
        }

        for p in &mut self.particles {
            p.step(width, height);
        }

        match &self.params.connections {
            Some(style) => find_connections(
                &self.particles,
                style.max_distance,
                style.max_alpha,
                &mut self.connections,
            ),
            None => self.connections.clear(),
        }

        if let Some(ctx) = ctx {
            paint::draw_field(
                ctx,
                &self.params,
                &self.particles,
                &self.connections,
                width,
                height,
            );
            self.frames_drawn += 1;
        }

        running.frame = Some(host.request_frame());
    }

    fn regenerate(&mut self, width: u32, height: u32) {
        let count = self.params.particle_count(width, height);
        let ranges = self.params.spawn_ranges();
        spawn_particles(
            &mut self.rng,
            &mut self.particles,
            count,
            width as f32,
            height as f32,
            &ranges,
            &mut self.next_id,
        );
        self.connections.clear();
    }
}
