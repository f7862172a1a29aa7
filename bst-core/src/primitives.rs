use crate::types::Key;
use glam::Vec2;

/// Solid RGB color carried by primitive style fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CORAL: Self = Self::rgb(255, 127, 80);
    pub const LIME: Self = Self::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ff7f50`.
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Filled circle drawn for one tree node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleMark {
    pub key: Key,
    pub center: Vec2,
    pub radius: f32,
    pub stroke: Color,
    pub stroke_width: f32,
    pub fill: Color,
}

/// Edge between a parent anchor and a child anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorLine {
    pub src_key: Key,
    pub dst_key: Key,
    pub src: Vec2,
    pub dst: Vec2,
    pub stroke: Color,
    pub stroke_width: f32,
}

/// Key text centered on its node's circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelText {
    pub key: Key,
    pub point: Vec2,
    pub font_size: f32,
    pub fill: Color,
}

/// Borrowed view over any primitive, in the form sinks serialize.
#[derive(Clone, Copy, Debug)]
pub enum PrimitiveRef<'a> {
    Line(&'a ConnectorLine),
    Circle(&'a CircleMark),
    Label(&'a LabelText),
}
