//! Celebration particles.
//!
//! The physics is plain Rust so it can be stepped in tests; [`CanvasConfetti`]
//! draws a burst on a throwaway full-screen canvas and removes it once every
//! piece has faded or fallen off the bottom of the viewport.

use crate::config::{
    CONFETTI_COLORS, CONFETTI_COUNT, CONFETTI_FRAME_MS, CONFETTI_GRAVITY,
    CONFETTI_LIFETIME_FRAMES,
};
use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use rand::Rng;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Viewport coordinates in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait ParticleEffect {
    /// Fire and forget. Implementations must not fail loudly.
    fn launch(&mut self, origin: Point);
    /// Tear down anything still on screen. Called once when the owner unmounts.
    fn dispose(&mut self) {}
}

/// Effect that does nothing, for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoParticles;

impl ParticleEffect for NoParticles {
    fn launch(&mut self, _origin: Point) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub rotation: f64,
    pub spin: f64,
    pub size: f64,
    pub color: &'static str,
    pub round: bool,
    pub frame: u32,
}

impl ConfettiPiece {
    pub fn random<R: Rng + ?Sized>(origin: Point, rng: &mut R) -> Self {
        Self {
            x: origin.x + rng.random_range(-50.0..50.0),
            y: origin.y + rng.random_range(-50.0..50.0),
            vx: rng.random_range(-15.0..15.0),
            vy: rng.random_range(-20.0..-5.0),
            rotation: rng.random_range(0.0..360.0),
            spin: rng.random_range(-5.0..5.0),
            size: rng.random_range(5.0..15.0),
            color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
            round: rng.random_bool(0.5),
            frame: 0,
        }
    }

    /// Advance one animation frame.
    pub fn step(&mut self) {
        self.frame += 1;
        self.vy += CONFETTI_GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.rotation += self.spin;
    }

    fn progress(&self) -> f64 {
        (f64::from(self.frame) / f64::from(CONFETTI_LIFETIME_FRAMES)).min(1.0)
    }

    /// Fully opaque for the first 80% of its life, then a linear fade.
    pub fn opacity(&self) -> f64 {
        let progress = self.progress();
        if progress > 0.8 {
            (1.0 - (progress - 0.8) * 5.0).max(0.0)
        } else {
            1.0
        }
    }

    pub fn is_done(&self, viewport_height: f64) -> bool {
        self.progress() >= 1.0 || self.y > viewport_height
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfettiBurst {
    pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    pub fn new<R: Rng + ?Sized>(origin: Point, count: usize, rng: &mut R) -> Self {
        Self {
            pieces: (0..count)
                .map(|_| ConfettiPiece::random(origin, rng))
                .collect(),
        }
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    /// Step every piece and drop the finished ones.
    pub fn step(&mut self, viewport_height: f64) {
        for piece in &mut self.pieces {
            piece.step();
        }
        self.pieces.retain(|p| !p.is_done(viewport_height));
    }

    pub fn is_finished(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Live bursts in launch order.
///
/// Ids are reserved before a burst starts so its frame callback can remove
/// exactly its own entry when it finishes.
#[derive(Debug)]
pub struct BurstRegistry<H> {
    next_id: u64,
    live: Vec<(u64, H)>,
}

impl<H> Default for BurstRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            live: Vec::new(),
        }
    }
}

impl<H> BurstRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert(&mut self, id: u64, handle: H) {
        self.live.push((id, handle));
    }

    /// Take the handle of a finished burst. Unknown ids yield `None`.
    pub fn finish(&mut self, id: u64) -> Option<H> {
        let pos = self.live.iter().position(|(live_id, _)| *live_id == id)?;
        Some(self.live.remove(pos).1)
    }

    /// Take every live handle, oldest first.
    pub fn drain(&mut self) -> Vec<H> {
        self.live.drain(..).map(|(_, handle)| handle).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

struct LiveBurst {
    _interval: Interval,
    canvas: HtmlCanvasElement,
}

/// Draws each burst on its own fixed, pointer-transparent canvas
/// (`.confetti-canvas`). Overlapping bursts finish independently.
#[derive(Default)]
pub struct CanvasConfetti {
    bursts: Rc<RefCell<BurstRegistry<LiveBurst>>>,
}

impl CanvasConfetti {
    pub fn new() -> Self {
        Self::default()
    }

    fn try_launch(&mut self, origin: Point) -> Result<(), String> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| format!("create canvas: {:?}", e))?
            .dyn_into()
            .map_err(|_| "element is not a canvas")?;
        canvas.set_class_name("confetti-canvas");
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| format!("get context: {:?}", e))?
            .ok_or("2d context unavailable")?
            .dyn_into()
            .map_err(|_| "context is not 2d")?;
        body.append_child(&canvas)
            .map_err(|e| format!("append canvas: {:?}", e))?;

        let mut burst = ConfettiBurst::new(origin, CONFETTI_COUNT, &mut rand::rng());
        debug!(
            "Launching {} confetti pieces at ({:.0}, {:.0})",
            CONFETTI_COUNT, origin.x, origin.y
        );

        let id = self.bursts.borrow_mut().reserve();
        let bursts = self.bursts.clone();
        let frame_canvas = canvas.clone();
        let interval = Interval::new(CONFETTI_FRAME_MS, move || {
            burst.step(height);
            ctx.clear_rect(0.0, 0.0, width, height);
            if burst.is_finished() {
                frame_canvas.remove();
                // The interval cannot be dropped from inside its own callback
                if let Some(done) = bursts.borrow_mut().finish(id) {
                    Timeout::new(0, move || drop(done)).forget();
                }
                return;
            }
            for piece in burst.pieces() {
                draw_piece(&ctx, piece);
            }
        });
        self.bursts.borrow_mut().insert(
            id,
            LiveBurst {
                _interval: interval,
                canvas,
            },
        );
        Ok(())
    }
}

impl ParticleEffect for CanvasConfetti {
    fn launch(&mut self, origin: Point) {
        if let Err(err) = self.try_launch(origin) {
            warn!("Confetti skipped: {}", err);
        }
    }

    /// Stop every running burst and detach its canvas.
    fn dispose(&mut self) {
        let live = self.bursts.borrow_mut().drain();
        debug!("Clearing {} confetti bursts", live.len());
        for burst in live {
            burst.canvas.remove();
        }
    }
}

fn draw_piece(ctx: &CanvasRenderingContext2d, piece: &ConfettiPiece) {
    ctx.save();
    ctx.set_global_alpha(piece.opacity());
    ctx.set_fill_style_str(piece.color);
    if ctx.translate(piece.x, piece.y).is_ok() && ctx.rotate(piece.rotation * PI / 180.0).is_ok() {
        let half = piece.size / 2.0;
        if piece.round {
            ctx.begin_path();
            if ctx.arc(0.0, 0.0, half, 0.0, 2.0 * PI).is_ok() {
                ctx.fill();
            }
        } else {
            ctx.fill_rect(-half, -half, piece.size, piece.size);
        }
    }
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pieces_start_near_origin_and_rise() {
        let mut rng = StdRng::seed_from_u64(3);
        let origin = Point::new(400.0, 300.0);
        let burst = ConfettiBurst::new(origin, CONFETTI_COUNT, &mut rng);
        assert_eq!(burst.pieces().len(), 150);
        for p in burst.pieces() {
            assert!((p.x - origin.x).abs() <= 50.0);
            assert!((p.y - origin.y).abs() <= 50.0);
            assert!(p.vy < 0.0);
            assert!((5.0..15.0).contains(&p.size));
            assert!(CONFETTI_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn gravity_pulls_pieces_down() {
        let mut piece = ConfettiPiece {
            x: 0.0,
            y: 0.0,
            vx: 2.0,
            vy: -5.0,
            rotation: 0.0,
            spin: 1.0,
            size: 10.0,
            color: "#ffffff",
            round: true,
            frame: 0,
        };
        piece.step();
        assert_eq!((piece.x, piece.y, piece.vy, piece.rotation), (2.0, -4.5, -4.5, 1.0));
        for _ in 0..30 {
            piece.step();
        }
        assert!(piece.vy > 0.0);
    }

    #[test]
    fn fades_over_the_last_fifth() {
        let mut piece = ConfettiPiece::random(Point::default(), &mut StdRng::seed_from_u64(1));
        piece.frame = 100;
        assert_eq!(piece.opacity(), 1.0);
        piece.frame = 180;
        assert!((piece.opacity() - 0.5).abs() < 1e-9);
        piece.frame = 200;
        assert!(piece.opacity() < 1e-9);
        assert!(piece.is_done(f64::MAX));
    }

    #[test]
    fn overlapping_bursts_finish_independently() {
        let mut registry = BurstRegistry::new();
        let first = registry.reserve();
        registry.insert(first, "canvas-1");
        let second = registry.reserve();
        registry.insert(second, "canvas-2");
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        // The second burst starting must not orphan the first one
        assert_eq!(registry.finish(first), Some("canvas-1"));
        assert_eq!(registry.finish(first), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.finish(second), Some("canvas-2"));
        assert!(registry.is_empty());
    }

    #[test]
    fn drain_hands_back_every_live_burst() {
        let mut registry = BurstRegistry::new();
        for name in ["a", "b", "c"] {
            let id = registry.reserve();
            registry.insert(id, name);
        }
        assert_eq!(registry.finish(2), Some("b"));
        assert_eq!(registry.drain(), vec!["a", "c"]);
        assert!(registry.is_empty());
        assert_eq!(registry.reserve(), 4);
    }

    #[test]
    fn burst_finishes_when_everything_falls_off_screen() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut burst = ConfettiBurst::new(Point::new(100.0, 100.0), 20, &mut rng);
        let mut frames = 0;
        while !burst.is_finished() {
            burst.step(600.0);
            frames += 1;
            assert!(frames <= CONFETTI_LIFETIME_FRAMES);
        }
    }
}
