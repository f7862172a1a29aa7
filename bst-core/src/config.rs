use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Scales how likely a subtree spawns as the candidate range narrows.
    pub spawn_multiplier: f32,
    /// Cap on circle radius for shallow trees.
    pub max_radius: f32,
    /// Seconds between search animation steps.
    pub step_delay: f64,
    /// Corners of the drawing bounds.
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_multiplier: 8.0,
            max_radius: 5.0,
            step_delay: 1.0,
            top_left: Vec2::new(0.0, 0.0),
            bottom_right: Vec2::new(100.0, 100.0),
        }
    }
}
