use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, LinePrimitive, LineStrokeStyle, PathPrimitive, PathSegment,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

const GLOW_ALPHA_SCALE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub paths_drawn: usize,
    pub clips_pushed: usize,
}

/// Renderers that can draw into an external Cairo context (for example a
/// host toolkit's draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Supports offscreen image-surface rendering through `Renderer::render` and
/// in-place rendering on an external context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(0.05, 0.06, 0.09),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for entry in &frame.commands {
            match &entry.command {
                DrawCommand::Line(line) => {
                    draw_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Rect(rect) => {
                    draw_rect(context, rect)?;
                    stats.rects_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
                DrawCommand::Path(path) => {
                    draw_path(context, path)?;
                    stats.paths_drawn += 1;
                }
                DrawCommand::PushClip(clip) => {
                    context
                        .save()
                        .map_err(|err| map_backend_error("failed to save context", err))?;
                    context.rectangle(clip.x, clip.y, clip.width, clip.height);
                    context.clip();
                    stats.clips_pushed += 1;
                }
                DrawCommand::PopClip => {
                    context
                        .restore()
                        .map_err(|err| map_backend_error("failed to restore context", err))?;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    match line.stroke_style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed { dash_px, gap_px } => context.set_dash(&[dash_px, gap_px], 0.0),
    }
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let result = context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err));
    context.set_dash(&[], 0.0);
    result
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };

    apply_color(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    if let Some(fill) = path.fill {
        append_path(context, path);
        let (end_x, _) = path.end_point();
        context.line_to(end_x, fill.baseline_y);
        context.line_to(path.start_x, fill.baseline_y);
        context.close_path();

        let top = path_top(path);
        let gradient = LinearGradient::new(0.0, top, 0.0, fill.baseline_y);
        add_stop(&gradient, 0.0, fill.top_color);
        add_stop(&gradient, 1.0, fill.bottom_color);
        context
            .set_source(&gradient)
            .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path area", err))?;
    }

    if path.glow_width > 0.0 {
        append_path(context, path);
        apply_color(
            context,
            path.color.with_alpha(path.color.alpha * GLOW_ALPHA_SCALE),
        );
        context.set_line_width(path.stroke_width + path.glow_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path glow", err))?;
    }

    append_path(context, path);
    apply_color(context, path.color);
    context.set_line_width(path.stroke_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))
}

fn append_path(context: &Context, path: &PathPrimitive) {
    context.new_path();
    context.move_to(path.start_x, path.start_y);
    let (mut current_x, mut current_y) = (path.start_x, path.start_y);
    for segment in &path.segments {
        match *segment {
            PathSegment::LineTo { x, y } => context.line_to(x, y),
            PathSegment::QuadTo { cx, cy, x, y } => {
                // Quadratic to cubic: control points at 2/3 towards the quadratic control.
                let c1x = current_x + 2.0 / 3.0 * (cx - current_x);
                let c1y = current_y + 2.0 / 3.0 * (cy - current_y);
                let c2x = x + 2.0 / 3.0 * (cx - x);
                let c2y = y + 2.0 / 3.0 * (cy - y);
                context.curve_to(c1x, c1y, c2x, c2y, x, y);
            }
        }
        (current_x, current_y) = segment.end_point();
    }
}

fn path_top(path: &PathPrimitive) -> f64 {
    path.segments
        .iter()
        .map(|segment| segment.end_point().1)
        .fold(path.start_y, f64::min)
}

fn add_stop(gradient: &LinearGradient, offset: f64, color: Color) {
    gradient.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: &RectPrimitive) {
    context.new_path();
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.right();
    let bottom = rect.bottom();

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
