use crate::core::RenderFrame;

/// Write-only consumer of rendered frames.
///
/// Environments push a frame on request and never read anything back.
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame) -> anyhow::Result<()>;
}

/// Keeps every frame it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub frames: Vec<RenderFrame>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &RenderFrame) -> anyhow::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
