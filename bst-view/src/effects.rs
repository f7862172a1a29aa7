//! Transient visual effects layered over the drawn tree.
//!
//! Effects animate in the viewer only. They never enter the layout or the
//! render sink, and the next draw discards them.

use bst_core::types::Key;
use glam::Vec2;

/// How long a focus ring holds still before sliding away, in seconds.
const FOCUS_HOLD: f64 = 1.0;
/// Duration of the focus ring's slide.
const FOCUS_SLIDE: f64 = 1.5;
/// Where the ring slides to, relative to where it started.
const FOCUS_OFFSET: Vec2 = Vec2::new(10.0, 10.0);
/// Duration of the delete slide and fade.
const DELETE_SLIDE: f64 = 0.5;

/// Ring geometry handed to the painter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusRing {
    pub center: Vec2,
    pub radius: f32,
    pub stroke_width: f32,
}

/// Calls attention to one node: a coral ring appears around it, holds for a
/// second, then slides away down-right over 1.5 seconds and stays at its
/// final position until the effect is dropped.
#[derive(Clone, Copy, Debug)]
pub struct FocusEffect {
    center: Vec2,
    node_radius: f32,
    started: f64,
}

impl FocusEffect {
    pub fn new(center: Vec2, node_radius: f32, started: f64) -> Self {
        Self {
            center,
            node_radius,
            started,
        }
    }

    /// Ring geometry at time `now`. The ring is 1.2 node radii wide with a
    /// stroke a third of the node radius.
    pub fn ring(&self, now: f64) -> FocusRing {
        let elapsed = now - self.started;
        let t = if elapsed <= FOCUS_HOLD {
            0.0
        } else {
            ((elapsed - FOCUS_HOLD) / FOCUS_SLIDE).min(1.0) as f32
        };
        FocusRing {
            center: self.center + FOCUS_OFFSET * t,
            radius: self.node_radius * 1.2,
            stroke_width: self.node_radius / 3.0,
        }
    }

    /// True once the slide has finished and repaints can stop.
    pub fn settled(&self, now: f64) -> bool {
        now - self.started >= FOCUS_HOLD + FOCUS_SLIDE
    }
}

/// Slides the destination node onto the source's position over half a
/// second while the source fades out.
///
/// Connectors are left alone. Only circles and labels carry the effect.
#[derive(Clone, Copy, Debug)]
pub struct DeleteEffect {
    src_key: Key,
    dst_key: Key,
    movement: Vec2,
    started: f64,
}

impl DeleteEffect {
    /// `movement` is the vector from the destination's circle to the
    /// source's, so the destination ends up exactly where the source was.
    pub fn new(src_key: Key, dst_key: Key, movement: Vec2, started: f64) -> Self {
        Self {
            src_key,
            dst_key,
            movement,
            started,
        }
    }

    pub fn src_key(&self) -> Key {
        self.src_key
    }

    pub fn dst_key(&self) -> Key {
        self.dst_key
    }

    fn progress(&self, now: f64) -> f32 {
        ((now - self.started) / DELETE_SLIDE).clamp(0.0, 1.0) as f32
    }

    /// Current translation of the destination node.
    pub fn dst_offset(&self, now: f64) -> Vec2 {
        self.movement * self.progress(now)
    }

    /// Current opacity of the fading source node.
    pub fn src_opacity(&self, now: f64) -> f32 {
        1.0 - self.progress(now)
    }

    /// True once the slide has finished and repaints can stop.
    pub fn settled(&self, now: f64) -> bool {
        now - self.started >= DELETE_SLIDE
    }
}
