use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::extensions::ChartPlugin;
use crate::history::HistorySource;
use crate::render::Renderer;

use super::validation::validate_render_style;
use super::{PluginEvent, RenderStyle, ValueFormatter, engine_core::EngineCore};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns one chart's bars, viewport, gesture/momentum state and
/// history bridge, and hands each draw to its renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) formatter: Box<dyn ValueFormatter>,
    pub(super) history_source: Option<Box<dyn HistorySource>>,
    pub(super) plugins: IndexMap<String, Box<dyn ChartPlugin>>,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.core.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.core.style = validate_render_style(style)?;
        Ok(())
    }

    pub fn set_value_formatter(&mut self, formatter: Box<dyn ValueFormatter>) {
        self.formatter = formatter;
    }

    /// Installs the collaborator asked for older bars at the left edge.
    pub fn set_history_source(&mut self, source: Box<dyn HistorySource>) {
        self.history_source = Some(source);
    }

    /// Runs one draw: edge detection for lazy history, frame build, backend.
    pub fn render(&mut self, now_ms: i64) -> ChartResult<()> {
        self.observe_history_edge(now_ms);
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by host draw callbacks while keeping the renderer
    /// implementation decoupled from any toolkit.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        now_ms: i64,
    ) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        self.observe_history_edge(now_ms);
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
