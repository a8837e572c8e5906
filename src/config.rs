//! 窗口配置

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConstructError};
use crate::Color;

/// 窗口最小逻辑宽度
pub const MIN_WIDTH: u32 = 240;
/// 窗口最小逻辑高度
pub const MIN_HEIGHT: u32 = 120;

/// 窗口配置，可从 JSON 加载（camelCase 字段）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_caption")]
    pub caption: String,
    /// `#RRGGBB`
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub resizable: bool,
}

fn default_width() -> u32 { 1000 }
fn default_height() -> u32 { 750 }
fn default_caption() -> String { "Hello EggAche".to_string() }
fn default_background() -> String { "#FFFFFF".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            caption: default_caption(),
            background_color: default_background(),
            resizable: false,
        }
    }
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, caption: &str) -> Self {
        Self {
            width,
            height,
            caption: caption.to_string(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WindowConfig = serde_json::from_str(json)?;
        config.background()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// 背景色
    pub fn background(&self) -> Result<Color, ConfigError> {
        Color::parse_hex(&self.background_color)
            .ok_or_else(|| ConfigError::InvalidColor(self.background_color.clone()))
    }

    /// 检查尺寸下限和背景色
    pub fn validate(&self) -> Result<(), ConstructError> {
        self.checked_background().map(|_| ())
    }

    /// 通过检查后的背景色
    pub(crate) fn checked_background(&self) -> Result<Color, ConstructError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConstructError::WindowTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        self.background()
            .map_err(|_| ConstructError::InvalidBackground(self.background_color.clone()))
    }
}
