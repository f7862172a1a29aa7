//! Binary search over a key tree, animated one visited node per step.
//!
//! The descent is traced up front by [`search_path`]; [`SearchAnimation`]
//! then replays the trace against a [`Layout`], one highlight per step, so
//! the pacing logic never has to hold a borrow into the tree.

use thiserror::Error;

use crate::layout::Layout;
use crate::tree::TreeNode;
use crate::types::Key;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("key {0} not found")]
    KeyNotFound(Key),
}

/// Where a traced descent ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Key),
    NotFound,
}

/// What a single animation step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// Stepped onto this key and highlighted it.
    Visiting(Key),
    /// Confirmed the previously highlighted key as the target.
    Found(Key),
}

/// A complete descent: every key compared against, in visit order, plus how
/// the descent ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPath {
    pub visits: Vec<Key>,
    pub outcome: SearchOutcome,
}

/// Traces the binary descent for `target` without touching any layout.
///
/// Starting at the root, each node's key is recorded; an equal key ends the
/// descent as found, a smaller target continues left and a larger one right.
/// Running off a missing child ends the descent as not found. The result
/// always contains at least the root's key.
///
/// ### Parameters
/// - `root` - Tree to descend.
/// - `target` - Key to look for.
///
/// ### Returns
/// The ordered visits and the outcome of the descent.
pub fn search_path(root: &TreeNode, target: Key) -> SearchPath {
    let mut visits = Vec::new();
    let mut node = root;
    loop {
        visits.push(node.key);
        if target == node.key {
            return SearchPath {
                visits,
                outcome: SearchOutcome::Found(target),
            };
        }
        let child = if target < node.key {
            &node.left
        } else {
            &node.right
        };
        match child {
            Some(next) => node = next,
            None => {
                return SearchPath {
                    visits,
                    outcome: SearchOutcome::NotFound,
                };
            }
        }
    }
}

/// Replays a traced descent against a layout, one node per step.
///
/// Each [`step`](SearchAnimation::step) highlights the next visited node.
/// Once the trace is exhausted, one further step resolves the run: the
/// target's circle is recolored in the found style, or the step fails with
/// [`SearchError::KeyNotFound`]. Callers drop the animation after that
/// resolving step.
#[derive(Debug)]
pub struct SearchAnimation {
    target: Key,
    visits: Vec<Key>,
    outcome: SearchOutcome,
    next: usize,
}

impl SearchAnimation {
    pub fn new(root: &TreeNode, target: Key) -> Self {
        let path = search_path(root, target);
        Self {
            target,
            visits: path.visits,
            outcome: path.outcome,
            next: 0,
        }
    }

    pub fn target(&self) -> Key {
        self.target
    }

    /// Advances the animation by one step, mutating `layout` styles.
    ///
    /// ### Returns
    /// - `Ok(SearchState::Visiting(key))` while the trace still has nodes.
    /// - `Ok(SearchState::Found(key))` on the resolving step of a successful
    ///   descent.
    /// - `Err(SearchError::KeyNotFound)` on the resolving step of a failed
    ///   one; the layout is left exactly as the last visit left it.
    pub fn step(&mut self, layout: &mut Layout) -> Result<SearchState, SearchError> {
        if self.next < self.visits.len() {
            let key = self.visits[self.next];
            self.next += 1;
            layout.highlight(key);
            return Ok(SearchState::Visiting(key));
        }
        match self.outcome {
            SearchOutcome::Found(key) => {
                layout.mark_found(key);
                Ok(SearchState::Found(key))
            }
            SearchOutcome::NotFound => Err(SearchError::KeyNotFound(self.target)),
        }
    }
}

/// Wall-clock gate between animation steps.
///
/// `ready` consumes an interval when one has elapsed, so a caller polling
/// every frame advances exactly once per interval regardless of frame rate.
#[derive(Clone, Copy, Debug)]
pub struct StepTimer {
    interval: f64,
    last: f64,
}

impl StepTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: f64::NEG_INFINITY,
        }
    }

    /// Restarts the interval from `now`.
    pub fn arm(&mut self, now: f64) {
        self.last = now;
    }

    /// True once per elapsed interval.
    pub fn ready(&mut self, now: f64) -> bool {
        if now - self.last >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
