//! 绘制命令
//!
//! 每条命令记录一个图元以及记录时的画笔 / 画刷快照，记录后不可变。

use std::sync::Arc;

use crate::bitmap::Bitmap;
use crate::geometry::{Bounds, Position};
use crate::style::{Brush, Pen};
use crate::Color;

/// 图元
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { from: Position, to: Position },
    Rect(Bounds),
    Ellipse(Bounds),
    RoundRect { bounds: Bounds, corner_width: i32, corner_height: i32 },
    Arc { bounds: Bounds, start: Position, end: Position },
    Chord { bounds: Bounds, start: Position, end: Position },
    Pie { bounds: Bounds, start: Position, end: Position },
    /// `origin` 为文字左上角
    Text { origin: Position, text: String },
    Bitmap { bitmap: Arc<Bitmap>, dest: Bounds, mask: Option<Color> },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "line",
            Shape::Rect(_) => "rect",
            Shape::Ellipse(_) => "ellipse",
            Shape::RoundRect { .. } => "round_rect",
            Shape::Arc { .. } => "arc",
            Shape::Chord { .. } => "chord",
            Shape::Pie { .. } => "pie",
            Shape::Text { .. } => "text",
            Shape::Bitmap { .. } => "bitmap",
        }
    }
}

/// 一条已记录的绘制命令
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub pen: Pen,
    pub brush: Brush,
}
