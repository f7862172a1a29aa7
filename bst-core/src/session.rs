//! Visualization session: owns the tree, its layout, and the search pacing.

use rand::Rng;

use crate::config::Config;
use crate::generate::generate;
use crate::layout::{Layout, layout, radius_for_height};
use crate::render::RenderSink;
use crate::search::{SearchAnimation, SearchError, SearchOutcome, SearchState, StepTimer};
use crate::tree::TreeNode;
use crate::types::Key;

/// One tree-and-search lifecycle, driven by a caller-owned clock.
///
/// A session holds at most one tree and at most one running search. Drawing
/// replaces the tree wholesale; searching steps along it at the configured
/// delay. While a search is running, draw and search requests are ignored
/// rather than interrupting the animation in flight.
#[derive(Debug)]
pub struct Session {
    cfg: Config,
    tree: Option<Box<TreeNode>>,
    height: u32,
    layout: Option<Layout>,
    search: Option<SearchAnimation>,
    timer: StepTimer,
    last_outcome: Option<SearchOutcome>,
}

impl Session {
    pub fn new(cfg: Config) -> Self {
        Self {
            timer: StepTimer::new(cfg.step_delay),
            cfg,
            tree: None,
            height: 0,
            layout: None,
            search: None,
            last_outcome: None,
        }
    }

    /// Generates a fresh tree over `lower..upper` and pushes its layout to
    /// the sink, replacing whatever was drawn before.
    ///
    /// A generation that spawns no root clears the sink instead. Ignored
    /// while a search is running.
    ///
    /// ### Parameters
    /// - `lower`, `upper` - Key range to generate over.
    /// - `rng` - Randomness for the spawn decisions.
    /// - `sink` - Receiver of the resulting primitives.
    pub fn draw(
        &mut self,
        lower: f32,
        upper: f32,
        rng: &mut impl Rng,
        sink: &mut impl RenderSink,
    ) {
        if self.search.is_some() {
            tracing::debug!("draw ignored, search in flight");
            return;
        }

        let (tree, height) = generate(lower, upper, self.cfg.spawn_multiplier, rng);
        self.height = height;
        self.last_outcome = None;

        match tree {
            Some(root) => {
                let radius = radius_for_height(
                    self.cfg.top_left,
                    self.cfg.bottom_right,
                    height,
                    self.cfg.max_radius,
                );
                let out = layout(&root, radius, self.cfg.top_left, self.cfg.bottom_right);
                sink.replace(&out);
                let nodes = out.node_count();
                tracing::info!(nodes, height, radius, "tree drawn");
                self.tree = Some(root);
                self.layout = Some(out);
            }
            None => {
                sink.clear();
                tracing::info!("tree drawn empty");
                self.tree = None;
                self.layout = None;
            }
        }
    }

    /// Starts animating a search for `target`, highlighting the root
    /// immediately and scheduling the rest at the configured step delay.
    ///
    /// Returns whether the search was accepted. A session with no tree, or
    /// one already mid-search, refuses and stays untouched.
    pub fn begin_search(&mut self, target: Key, now: f64, sink: &mut impl RenderSink) -> bool {
        if self.search.is_some() {
            tracing::debug!(key = target, "search ignored, another is in flight");
            return false;
        }
        let (Some(tree), Some(out)) = (self.tree.as_deref(), self.layout.as_mut()) else {
            tracing::debug!(key = target, "search ignored, nothing drawn");
            return false;
        };

        tracing::info!(key = target, "search started");
        let mut anim = SearchAnimation::new(tree, target);
        if let Ok(SearchState::Visiting(key)) = anim.step(out) {
            tracing::debug!(key, "visiting");
        }
        sink.replace(out);

        self.timer = StepTimer::new(self.cfg.step_delay);
        self.timer.arm(now);
        self.search = Some(anim);
        self.last_outcome = None;
        true
    }

    /// Advances a running search if a step delay has elapsed since the last
    /// step. Call once per frame with the current clock.
    ///
    /// ### Returns
    /// - `Ok(None)` when idle or between steps.
    /// - `Ok(Some(state))` when a step ran; the sink has been given the
    ///   updated layout. A `Found` state ends the search.
    /// - `Err(SearchError::KeyNotFound)` when the search ran out of tree;
    ///   the search ends and the sink keeps the last visited styling.
    pub fn tick(
        &mut self,
        now: f64,
        sink: &mut impl RenderSink,
    ) -> Result<Option<SearchState>, SearchError> {
        if self.search.is_none() || !self.timer.ready(now) {
            return Ok(None);
        }
        let (Some(anim), Some(out)) = (self.search.as_mut(), self.layout.as_mut()) else {
            return Ok(None);
        };
        let target = anim.target();

        match anim.step(out) {
            Ok(SearchState::Visiting(key)) => {
                sink.replace(out);
                tracing::debug!(key, "visiting");
                Ok(Some(SearchState::Visiting(key)))
            }
            Ok(SearchState::Found(key)) => {
                sink.replace(out);
                self.search = None;
                self.last_outcome = Some(SearchOutcome::Found(key));
                tracing::info!(key, "target found");
                Ok(Some(SearchState::Found(key)))
            }
            Err(err) => {
                self.search = None;
                self.last_outcome = Some(SearchOutcome::NotFound);
                tracing::warn!(key = target, "target not in tree");
                Err(err)
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.cfg
    }

    pub fn node_count(&self) -> usize {
        self.layout.as_ref().map_or(0, Layout::node_count)
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Circle radius of the current layout, if a tree is drawn.
    pub fn radius(&self) -> Option<f32> {
        self.layout
            .as_ref()
            .and_then(Layout::root_circle)
            .map(|c| c.radius)
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// How the most recent completed search ended. Cleared when a draw or a
    /// new search begins.
    pub fn last_outcome(&self) -> Option<SearchOutcome> {
        self.last_outcome
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
}
