use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ClipRect, LinePrimitive, PathPrimitive, RectPrimitive, RenderLayer, TextPrimitive,
};

/// One backend instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Path(PathPrimitive),
    PushClip(ClipRect),
    PopClip,
}

impl DrawCommand {
    fn validate(&self) -> ChartResult<()> {
        match self {
            DrawCommand::Line(line) => line.validate(),
            DrawCommand::Rect(rect) => rect.validate(),
            DrawCommand::Text(text) => text.validate(),
            DrawCommand::Path(path) => path.validate(),
            DrawCommand::PushClip(clip) => clip.validate(),
            DrawCommand::PopClip => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayeredCommand {
    pub layer: RenderLayer,
    pub command: DrawCommand,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands are stored back to front; layer ranks never decrease along
/// `commands`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: SurfaceSize,
    pub commands: Vec<LayeredCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.surface.validate()?;

        let mut previous = RenderLayer::Background;
        let mut clip_depth = 0_usize;
        for entry in &self.commands {
            if entry.layer < previous {
                return Err(ChartError::InvalidData(format!(
                    "layer {:?} emitted after {previous:?}",
                    entry.layer
                )));
            }
            previous = entry.layer;
            match entry.command {
                DrawCommand::PushClip(_) => clip_depth += 1,
                DrawCommand::PopClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData("clip pop without matching push".to_owned())
                    })?;
                }
                _ => {}
            }
            entry.command.validate()?;
        }
        if clip_depth != 0 {
            return Err(ChartError::InvalidData(
                "unbalanced clip stack at end of frame".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Distinct layers in emission order.
    #[must_use]
    pub fn layers(&self) -> Vec<RenderLayer> {
        let mut layers: Vec<RenderLayer> = Vec::new();
        for entry in &self.commands {
            if layers.last() != Some(&entry.layer) {
                layers.push(entry.layer);
            }
        }
        layers
    }

    pub fn commands_in(&self, layer: RenderLayer) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(move |entry| entry.layer == layer)
            .map(|entry| &entry.command)
    }

    #[must_use]
    pub fn has_layer(&self, layer: RenderLayer) -> bool {
        self.commands_in(layer).next().is_some()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> + '_ {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn texts_in(&self, layer: RenderLayer) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.commands_in(layer).filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}

/// Per-layer buckets filled by the frame builders in any order and
/// flattened back to front.
#[derive(Debug, Clone, Default)]
pub struct LayeredFrame {
    buckets: [Vec<DrawCommand>; RenderLayer::COUNT],
}

impl LayeredFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: RenderLayer, command: DrawCommand) {
        self.buckets[layer.rank()].push(command);
    }

    pub fn push_line(&mut self, layer: RenderLayer, line: LinePrimitive) {
        self.push(layer, DrawCommand::Line(line));
    }

    pub fn push_rect(&mut self, layer: RenderLayer, rect: RectPrimitive) {
        self.push(layer, DrawCommand::Rect(rect));
    }

    pub fn push_text(&mut self, layer: RenderLayer, text: TextPrimitive) {
        self.push(layer, DrawCommand::Text(text));
    }

    pub fn push_path(&mut self, layer: RenderLayer, path: PathPrimitive) {
        self.push(layer, DrawCommand::Path(path));
    }

    pub fn push_clip(&mut self, layer: RenderLayer, clip: ClipRect) {
        self.push(layer, DrawCommand::PushClip(clip));
    }

    pub fn pop_clip(&mut self, layer: RenderLayer) {
        self.push(layer, DrawCommand::PopClip);
    }

    #[must_use]
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.buckets[layer.rank()].len()
    }

    #[must_use]
    pub fn into_frame(self, surface: SurfaceSize) -> RenderFrame {
        let mut frame = RenderFrame::new(surface);
        for (layer, bucket) in RenderLayer::ORDER.into_iter().zip(self.buckets) {
            frame
                .commands
                .extend(bucket.into_iter().map(|command| LayeredCommand { layer, command }));
        }
        frame
    }
}
