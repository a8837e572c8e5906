//! 画笔 / 画刷样式
//!
//! 颜色分量允许 -1：任一分量为 -1 时整支笔（或刷）为透明。

use crate::error::DrawError;
use crate::Color;

/// 透明标记
pub const TRANSPARENT_CHANNEL: i32 = -1;

/// 墨水：纯色或透明
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ink {
    Solid(Color),
    #[default]
    Transparent,
}

impl Ink {
    /// 按 r/g/b 分量构造
    pub fn from_channels(r: i32, g: i32, b: i32) -> Result<Ink, DrawError> {
        for channel in [r, g, b] {
            if !(TRANSPARENT_CHANNEL..=255).contains(&channel) {
                return Err(DrawError::InvalidColor(channel));
            }
        }
        if [r, g, b].contains(&TRANSPARENT_CHANNEL) {
            return Ok(Ink::Transparent);
        }
        Ok(Ink::Solid(Color::rgb(r as u8, g as u8, b as u8)))
    }

    /// 可见颜色，透明时为 None
    pub fn color(&self) -> Option<Color> {
        match self {
            Ink::Solid(color) => Some(*color),
            Ink::Transparent => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Ink::Transparent)
    }
}

/// 画笔：描边颜色和线宽，也用作文字颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pen {
    pub width: u32,
    pub ink: Ink,
}

impl Pen {
    pub const fn new(width: u32, ink: Ink) -> Self {
        Self { width, ink }
    }
}

impl Default for Pen {
    /// 1 像素黑色
    fn default() -> Self {
        Self::new(1, Ink::Solid(Color::BLACK))
    }
}

/// 画刷：封闭图形的填充
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Brush {
    pub ink: Ink,
}

impl Brush {
    pub const fn new(ink: Ink) -> Self {
        Self { ink }
    }
}
