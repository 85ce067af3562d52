//! Recording draw context for tests and headless replay.

use serde::Serialize;

use super::DrawContext;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Save,
    Restore,
    FillStyle { color: String },
    StrokeStyle { color: String },
    LineWidth { width: f64 },
    LineDash { segments: Vec<f64> },
    GlobalAlpha { alpha: f64 },
    Font { font: String },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeRect { x: f64, y: f64, w: f64, h: f64 },
    ClipRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

/// A `DrawContext` that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    depth: usize,
    unbalanced_restores: usize,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current save/restore nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True if every `save` was matched by a `restore` and no extra restores happened
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.unbalanced_restores == 0
    }

    /// Rectangles filled so far, as `(x, y, w, h)`
    pub fn filled_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { x, y, w, h } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.unbalanced_restores = 0;
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            self.unbalanced_restores += 1;
        } else {
            self.depth -= 1;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillStyle {
            color: color.to_string(),
        });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeStyle {
            color: color.to_string(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth { width });
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.commands.push(DrawCommand::LineDash {
            segments: segments.to_vec(),
        });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha { alpha });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font {
            font: font.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h });
    }

    fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClipRect { x, y, w, h });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}
