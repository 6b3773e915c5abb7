use crate::error::ChartResult;
use crate::render::{RenderFrame, RenderLayer, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_command_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_layers: Vec<RenderLayer>,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.len();
        self.last_line_count = frame.lines().count();
        self.last_text_count = frame.texts().count();
        self.last_layers = frame.layers();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
