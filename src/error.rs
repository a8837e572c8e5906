//! 错误类型

use std::path::PathBuf;

use thiserror::Error;

/// 构造 Window / Egg 失败。构造失败时不会产生半可用的对象。
#[derive(Error, Debug)]
pub enum ConstructError {
    /// 窗口尺寸低于下限
    #[error("window size {width}x{height} is below the minimum {min_width}x{min_height}")]
    WindowTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// 背景色不是 `#RRGGBB`
    #[error("invalid background color {0:?}")]
    InvalidBackground(String),

    /// Egg 尺寸必须为正
    #[error("egg size must be positive, got {width}x{height}")]
    EmptyEgg { width: u32, height: u32 },

    /// 平台无法创建窗口
    #[error("platform failed to open the window: {0}")]
    Platform(#[from] PlatformError),
}

/// 单次绘制 / 设置样式失败，可恢复，Egg 保持可用
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// 颜色分量不在 -1..=255
    #[error("color channel {0} is out of range (expected -1..=255)")]
    InvalidColor(i32),

    /// 圆角尺寸为负
    #[error("rounded corner size {width}x{height} must not be negative")]
    InvalidCorner { width: i32, height: i32 },

    /// 位图无法打开或解码
    #[error("failed to load bitmap {path:?}: {reason}")]
    Bitmap { path: PathBuf, reason: String },

    /// 命令缓冲已满
    #[error("command buffer is full ({0} commands)")]
    CommandLimit(usize),

    /// 没有可用字体
    #[error("no font available for text rendering")]
    FontUnavailable,
}

/// 场景树结构错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// 子节点已经（直接或间接）包含父节点
    #[error("adding this egg would create a cycle in the egg tree")]
    Cycle,
}

/// 平台桥接错误
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("failed to create window: {0}")]
    CreateWindow(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("failed to present frame: {0}")]
    Present(String),
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid background color {0:?}")]
    InvalidColor(String),
}
