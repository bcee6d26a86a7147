use crate::plan::FramePlan;

/// Renderer-agnostic interface over a built [`FramePlan`].
///
/// Renderers consume a plan and never feed anything back into scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, plan: &FramePlan) -> Self::Output;
}

/// Text renderer: a human-readable dump of a frame plan.
///
/// Used by the CLI and in tests of the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, plan: &FramePlan) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (draws={}, wireframe={}) ===\n",
            plan.draws.len(),
            plan.wireframe
        ));
        for (i, draw) in plan.draws.iter().enumerate() {
            let origin = draw.model.w_axis;
            out.push_str(&format!(
                "  {i}: {:?} origin=({:.2}, {:.2}, {:.2}) depth={:?} blend={:?} time={:.3}\n",
                draw.kind, origin.x, origin.y, origin.z, draw.depth, draw.blend, draw.time
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::FrameInputs;
    use glam::Mat4;
    use retrowave_scene::SceneParams;

    fn plan(wireframe: bool) -> FramePlan {
        FramePlan::build(&FrameInputs {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            params: SceneParams::default(),
            elapsed: 1.5,
            wireframe,
        })
    }

    #[test]
    fn lists_every_draw_in_order() {
        let output = DebugTextRenderer::new().render(&plan(false));
        assert!(output.contains("draws=3"));
        let grid = output.find("Grid").unwrap();
        let sky = output.find("Skybox").unwrap();
        let sun = output.find("Sun").unwrap();
        assert!(grid < sky && sky < sun);
    }

    #[test]
    fn shows_positions_and_time() {
        let output = DebugTextRenderer::new().render(&plan(true));
        assert!(output.contains("wireframe=true"));
        assert!(output.contains("origin=(0.00, -1.00, 0.00)"));
        assert!(output.contains("origin=(0.00, 5.00, 0.00)"));
        // default sun speed is 2.0
        assert!(output.contains("time=3.000"));
    }
}
