//! EggAche - 保留模式 2D 绘图库
//! 调用方构建 Egg 树并记录绘制命令，窗口刷新时把整棵树合成为一帧

mod canvas;
mod color;
mod geometry;
mod paint;
mod path;
pub mod bitmap;
pub mod text;

pub use canvas::Canvas;
pub use color::Color;
pub use geometry::{Bounds, Point, Position, Rect};
pub use paint::{Paint, PaintStyle};
pub use path::{ArcClosure, Path, PathCommand};

// 错误类型
pub mod error;

// 绘制命令与样式
pub mod command;
pub mod style;

// Egg 树
pub mod egg;

// 合成器与绘制后端
pub mod backend;
pub mod compositor;

// 事件、配置、平台、窗口
pub mod config;
pub mod event;
pub mod platform;
pub mod window;

pub mod logging;

pub use backend::Backend;
pub use command::{DrawCommand, Shape};
pub use config::{WindowConfig, MIN_HEIGHT, MIN_WIDTH};
pub use egg::{BitmapPlacement, Egg, EggId};
pub use error::{ConfigError, ConstructError, DrawError, PlatformError, SceneError};
pub use event::InputEvent;
pub use platform::{show_message_box, HeadlessPlatform, NativePlatform, Platform};
pub use style::{Brush, Ink, Pen};
pub use window::Window;

// 单元测试
#[cfg(test)]
mod tests;
