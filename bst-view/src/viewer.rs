//! Interactive binary search tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the visualization session
//! (tree, layout, search pacing) and implements [`eframe::App`] to render
//! and control it through an egui UI.

use bst_core::{
    config::Config, primitives::Color, search::SearchState, session::Session, types::Key,
};
use eframe::App;
use glam::Vec2;
use rand::{Rng, rng};

use crate::effects::{DeleteEffect, FocusEffect};
use crate::svg::SvgSink;

/// Key range trees are generated over.
const KEY_LOWER: f32 = 0.0;
const KEY_UPPER: f32 = 100.0;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The visualization core: [`Session`] plus the [`SvgSink`] it renders into.
/// - UI configuration (pan/zoom, search target, effect inputs).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. Advance a running search through [`Session::tick`].
/// 3. Paint the layout and any active effect overlays.
///
/// ### Fields
/// - `session` - Tree, layout and search state being visualized.
/// - `svg` - Serialized copy of the drawn tree, for export.
///
/// - `rng` - Random number generator for tree spawns and search targets.
///
/// - `target` - Key the next search will look for.
/// - `delete_src` - Key the delete demo fades out.
/// - `delete_dst` - Key the delete demo slides onto the source.
///
/// - `pending_search` - Whether a search should start on the next frame.
/// - `status` - Latest search progress line for the status bar.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `focus` - Focus ring overlay, while one is showing.
/// - `delete` - Delete animation overlay, while one is showing.
pub struct Viewer {
    session: Session,
    svg: SvgSink,

    rng: rand::rngs::ThreadRng,

    target: Key,
    delete_src: Key,
    delete_dst: Key,

    pending_search: bool,
    status: String,
    zoom: f32,
    pan: egui::Vec2,

    focus: Option<FocusEffect>,
    delete: Option<DeleteEffect>,
}

fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn color32_alpha(c: Color, opacity: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (opacity * 255.0) as u8)
}

impl Viewer {
    /// Creates a new viewer with a freshly drawn tree and a random search
    /// target queued up, the way the visualization starts from scratch.
    ///
    /// The camera starts zoomed to fit the default bounds comfortably in a
    /// desktop window, with no pan.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new() -> Self {
        let mut rng = rng();
        let cfg = Config::default();
        let mut svg = SvgSink::new("visual", cfg.top_left, cfg.bottom_right);
        let mut session = Session::new(cfg);
        session.draw(KEY_LOWER, KEY_UPPER, &mut rng, &mut svg);
        let target = Self::random_target(&mut rng);

        Self {
            session,
            svg,
            rng,
            target,
            delete_src: 25,
            delete_dst: 75,
            pending_search: true,
            status: String::new(),
            zoom: 6.0,
            pan: egui::vec2(0.0, 0.0),
            focus: None,
            delete: None,
        }
    }

    /// Uniform random key over the generation range.
    fn random_target(rng: &mut rand::rngs::ThreadRng) -> Key {
        rng.random_range(KEY_LOWER..=KEY_UPPER).round() as Key
    }

    /// Replaces the current tree with a fresh one and queues a search for a
    /// new random target, discarding any effect overlays.
    fn draw_new_tree(&mut self) {
        self.focus = None;
        self.delete = None;

        let cfg = self.session.config();
        self.svg = SvgSink::new("visual", cfg.top_left, cfg.bottom_right);
        self.session
            .draw(KEY_LOWER, KEY_UPPER, &mut self.rng, &mut self.svg);

        self.target = Self::random_target(&mut self.rng);
        self.pending_search = true;
        self.status.clear();
    }

    /// Starts animating a search for the current target.
    fn begin_search(&mut self, now: f64) {
        self.focus = None;
        self.delete = None;
        if self.session.begin_search(self.target, now, &mut self.svg) {
            self.status = format!("searching for {}", self.target);
        }
    }

    /// Rings the current target's circle, if it is drawn.
    fn focus_target(&mut self, now: f64) {
        if let (Some(out), Some(radius)) = (self.session.layout(), self.session.radius())
            && let Some(center) = out.circle_point(self.target)
        {
            tracing::debug!(key = self.target, "focus effect started");
            self.focus = Some(FocusEffect::new(center, radius, now));
        }
    }

    /// Starts the delete demo: `delete_src` fades out while `delete_dst`
    /// slides onto its position. Needs two distinct keys that are both
    /// actually drawn.
    fn start_delete(&mut self, now: f64) {
        if self.delete_src == self.delete_dst {
            return;
        }
        let Some(out) = self.session.layout() else {
            return;
        };
        if let (Some(src), Some(dst)) = (
            out.circle_point(self.delete_src),
            out.circle_point(self.delete_dst),
        ) {
            tracing::debug!(
                src = self.delete_src,
                dst = self.delete_dst,
                "delete effect started"
            );
            self.delete = Some(DeleteEffect::new(
                self.delete_src,
                self.delete_dst,
                src - dst,
                now,
            ));
        }
    }

    /// True while an effect still needs repaints to animate.
    fn animating(&self, now: f64) -> bool {
        self.focus.as_ref().is_some_and(|f| !f.settled(now))
            || self.delete.as_ref().is_some_and(|d| !d.settled(now))
    }

    /// Center of the drawing bounds, mapped to the middle of the screen rect.
    fn world_center(&self) -> Vec2 {
        let cfg = self.session.config();
        (cfg.top_left + cfg.bottom_right) / 2.0
    }

    /// Converts a layout-space position to screen-space.
    ///
    /// Layout coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is not flipped: layout
    /// space already grows downward, like screen space.
    ///
    /// ### Parameters
    /// - `p` - Layout-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let mid = self.world_center();
        egui::pos2(
            center.x + (p.x - mid.x) * self.zoom + self.pan.x,
            center.y + (p.y - mid.y) * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to layout-space.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`] (up to floating
    /// point rounding), using the same `zoom`, `pan`, and `rect` center.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let mid = self.world_center();
        Vec2::new(
            (p.x - center.x - self.pan.x) / self.zoom + mid.x,
            (p.y - center.y - self.pan.y) / self.zoom + mid.y,
        )
    }

    /// Helper to draw a labeled [`egui::DragValue`] over a key.
    fn labeled_drag_key(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut Key,
        range: std::ops::RangeInclusive<Key>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (draw, search, export, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let busy = self.session.is_searching();

                if ui
                    .add_enabled(!busy, egui::Button::new("Draw tree"))
                    .clicked()
                {
                    self.draw_new_tree();
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.target)
                        .prefix("target = ")
                        .range(0..=100)
                        .speed(1),
                );
                if ui.add_enabled(!busy, egui::Button::new("Search")).clicked() {
                    let now = ctx.input(|i| i.time);
                    self.begin_search(now);
                }
                if ui.add_enabled(!busy, egui::Button::new("Focus")).clicked() {
                    let now = ctx.input(|i| i.time);
                    self.focus_target(now);
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.session.config_mut().step_delay)
                        .prefix("step = ")
                        .range(0.05..=5.0)
                        .speed(0.05)
                        .suffix(" s"),
                );

                if ui.button("Copy SVG").clicked() {
                    ctx.copy_text(self.svg.document());
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.5..=20.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (search progress, tree stats).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("step = {:.2} s", self.session.config().step_delay));
                ui.separator();
                ui.label(format!("nodes = {}", self.session.node_count()));
                ui.label(format!("height = {}", self.session.height()));
                if let Some(radius) = self.session.radius() {
                    ui.label(format!("radius = {radius:.2}"));
                }
                ui.separator();
                if !self.status.is_empty() {
                    ui.label(self.status.as_str());
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Generation");
                Self::labeled_drag_f32(
                    ui,
                    "spawn_multiplier:",
                    &mut self.session.config_mut().spawn_multiplier,
                    0.0..=12.0,
                    0.1,
                );

                ui.separator();
                ui.label("Layout");
                Self::labeled_drag_f32(
                    ui,
                    "max_radius:",
                    &mut self.session.config_mut().max_radius,
                    0.5..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "width:",
                    &mut self.session.config_mut().bottom_right.x,
                    20.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "height:",
                    &mut self.session.config_mut().bottom_right.y,
                    20.0..=1000.0,
                    1.0,
                );
                ui.label("Takes effect on the next draw.");

                ui.separator();
                ui.label("Delete demo");
                Self::labeled_drag_key(ui, "delete:", &mut self.delete_src, 0..=100);
                Self::labeled_drag_key(ui, "successor:", &mut self.delete_dst, 0..=100);
                if ui.button("Animate delete").clicked() {
                    let now = ctx.input(|i| i.time);
                    self.start_delete(now);
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    *self.session.config_mut() = Config::default();
                }
            });
    }

    /// Position and opacity of one keyed primitive under the delete effect:
    /// the source fades in place, the destination translates, everything
    /// else is untouched. Connectors never pass through here.
    fn effect_placement(&self, key: Key, point: Vec2, now: f64) -> (Vec2, f32) {
        if let Some(del) = &self.delete {
            if key == del.src_key() {
                return (point, del.src_opacity(now));
            }
            if key == del.dst_key() {
                return (point + del.dst_offset(now), 1.0);
            }
        }
        (point, 1.0)
    }

    /// Paints the laid-out tree: connectors first, then circles, then labels.
    fn paint_tree(&self, painter: &egui::Painter, rect: egui::Rect, now: f64) {
        let Some(out) = self.session.layout() else {
            return;
        };

        for line in &out.lines {
            let a = self.world_to_screen(line.src, rect);
            let b = self.world_to_screen(line.dst, rect);
            painter.line_segment(
                [a, b],
                egui::Stroke::new(line.stroke_width * self.zoom, color32(line.stroke)),
            );
        }

        for circle in &out.circles {
            let (center, opacity) = self.effect_placement(circle.key, circle.center, now);
            painter.circle(
                self.world_to_screen(center, rect),
                circle.radius * self.zoom,
                color32_alpha(circle.fill, opacity),
                egui::Stroke::new(
                    circle.stroke_width * self.zoom,
                    color32_alpha(circle.stroke, opacity),
                ),
            );
        }

        for label in &out.labels {
            let (point, opacity) = self.effect_placement(label.key, label.point, now);
            painter.text(
                self.world_to_screen(point, rect),
                egui::Align2::CENTER_CENTER,
                label.key.to_string(),
                egui::FontId::proportional(label.font_size * self.zoom),
                color32_alpha(label.fill, opacity),
            );
        }
    }

    /// Paints the focus ring overlay, when one is active.
    fn paint_focus(&self, painter: &egui::Painter, rect: egui::Rect, now: f64) {
        let Some(focus) = &self.focus else {
            return;
        };
        let ring = focus.ring(now);
        painter.circle_stroke(
            self.world_to_screen(ring.center, rect),
            ring.radius * self.zoom,
            egui::Stroke::new(ring.stroke_width * self.zoom, color32(Color::CORAL)),
        );
    }

    /// Builds the central panel where the tree is drawn and interacted with.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            if ui.ctx().input(|i| i.raw_scroll_delta.y != 0.0) {
                let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                    let world_before = self.screen_to_world(pointer_screen, rect);

                    let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                    self.zoom = (self.zoom * factor).clamp(0.5, 20.0);

                    let screen_after = self.world_to_screen(world_before, rect);
                    self.pan += pointer_screen - screen_after;
                }
            }

            let now = ctx.input(|i| i.time);

            self.paint_tree(&painter, rect, now);
            self.paint_focus(&painter, rect, now);

            // A fresh draw searches for its random target right away.
            if self.pending_search {
                self.pending_search = false;
                self.begin_search(now);
            }

            // Advance a running search at the configured pace.
            if self.session.is_searching() {
                match self.session.tick(now, &mut self.svg) {
                    Ok(Some(SearchState::Visiting(key))) => {
                        self.status = format!("visiting {key}");
                    }
                    Ok(Some(SearchState::Found(key))) => {
                        self.status = format!("found {key}");
                    }
                    Ok(None) => {}
                    Err(err) => {
                        self.status = err.to_string();
                    }
                }

                ctx.request_repaint();
            } else if self.animating(now) {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the config side panel.
    /// - Draws the central tree view and handles interactions.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new();
        // Use non-trivial zoom and pan to exercise the math.
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let world_points = [
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 95.0),
            Vec2::new(-3.5, 8.25),
        ];

        let eps = 1e-4;

        for p in world_points {
            let screen = viewer.world_to_screen(p, rect);
            let back = viewer.screen_to_world(screen, rect);

            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn new_viewer_draws_a_tree_and_queues_a_search() {
        let viewer = Viewer::new();

        // The default multiplier always spawns the top four levels.
        assert!(viewer.session.node_count() >= 15);
        assert!((0..=100).contains(&viewer.target));
        assert!(viewer.pending_search);
        assert!(!viewer.session.is_searching());
        assert!(viewer.svg.document().contains("<circle data-value=\"50\""));
    }

    #[test]
    fn drawing_again_discards_effects_and_requeues_the_search() {
        let mut viewer = Viewer::new();
        viewer.pending_search = false;
        viewer.focus = Some(FocusEffect::new(Vec2::new(50.0, 15.0), 5.0, 0.0));
        viewer.status = "found 50".to_owned();

        viewer.draw_new_tree();

        assert!(viewer.focus.is_none());
        assert!(viewer.delete.is_none());
        assert!(viewer.pending_search);
        assert!(viewer.status.is_empty());
        assert!(viewer.session.node_count() >= 15);
    }

    #[test]
    fn delete_demo_needs_two_distinct_present_keys() {
        let mut viewer = Viewer::new();

        // 25 and 75 always exist one level below the root.
        viewer.delete_src = 25;
        viewer.delete_dst = 75;
        viewer.start_delete(1.0);
        assert!(viewer.delete.is_some());

        // Equal keys are refused.
        viewer.delete = None;
        viewer.delete_dst = 25;
        viewer.start_delete(1.0);
        assert!(viewer.delete.is_none());
    }

    #[test]
    fn focusing_an_absent_key_is_a_no_op() {
        let mut viewer = Viewer::new();

        // Keys never exceed the generation range.
        viewer.target = 101;
        viewer.focus_target(0.0);
        assert!(viewer.focus.is_none());

        // The root is always drawn.
        viewer.target = 50;
        viewer.focus_target(0.0);
        assert!(viewer.focus.is_some());
    }
}
