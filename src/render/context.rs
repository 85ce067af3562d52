//! Drawing surface abstraction.
//!
//! Overlay renderers draw through `DrawContext` so the same feature code runs
//! against the browser's Canvas 2D context and against the recording context
//! used by tests and headless replay.

/// Canvas-style immediate-mode drawing operations
///
/// Coordinates are logical (CSS) pixels; DPR scaling is the host's concern.
pub trait DrawContext {
    /// Push the current drawing state (styles, dash, clip)
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching `save`
    fn restore(&mut self);

    fn set_fill_style(&mut self, color: &str);

    fn set_stroke_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    /// Dash pattern; an empty slice restores solid lines
    fn set_line_dash(&mut self, segments: &[f64]);

    fn set_global_alpha(&mut self, alpha: f64);

    fn set_font(&mut self, font: &str);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Intersect the clip region with a rectangle
    fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn close_path(&mut self);

    fn fill(&mut self);

    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
