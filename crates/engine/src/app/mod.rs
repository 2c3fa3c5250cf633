mod audio;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use audio::{AssetAudio, AudioSink};
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    DrawCommand, DrawSurface, RecordingSurface, Renderer, RendererError, Rgba, SpriteDraw,
    SpriteKeyError, TextAnchor,
};
pub use scene::{InputSnapshot, Rect, Scene, SceneCommand, Vec2};
