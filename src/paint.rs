//! 画笔模块 - 光栅化使用的绘制参数

use crate::Color;

/// 画笔样式
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
}

/// 画笔
#[derive(Debug, Clone)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            anti_alias: true,
        }
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    /// 纯色填充
    pub fn fill(color: Color) -> Self {
        Self::new().with_color(color).with_style(PaintStyle::Fill)
    }

    /// 纯色描边
    pub fn stroke(color: Color, width: f32) -> Self {
        Self::new()
            .with_color(color)
            .with_style(PaintStyle::Stroke)
            .with_stroke_width(width)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}
