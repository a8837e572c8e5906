//! 绘制后端 - 合成器回放命令时调用的图元接口
//!
//! 后端不保存“当前画笔”状态，每次调用都显式传入命令记录时的样式快照。
//! 所有坐标都已经由合成器换算为窗口坐标。

use crate::bitmap::Bitmap;
use crate::error::DrawError;
use crate::geometry::{Bounds, Position};
use crate::path::ArcClosure;
use crate::style::{Brush, Pen};
use crate::text::{TextRenderer, TEXT_SIZE};
use crate::{Canvas, Color, Paint, Path};

/// 图元绘制接口
pub trait Backend {
    /// 用背景色清空
    fn clear(&mut self, color: Color);

    fn draw_line(&mut self, from: Position, to: Position, pen: &Pen) -> Result<(), DrawError>;

    fn draw_rect(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError>;

    fn draw_ellipse(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError>;

    fn draw_round_rect(
        &mut self,
        bounds: Bounds,
        corner_width: i32,
        corner_height: i32,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError>;

    fn draw_arc(&mut self, bounds: Bounds, start: Position, end: Position, pen: &Pen) -> Result<(), DrawError>;

    fn draw_chord(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError>;

    fn draw_pie(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError>;

    /// `origin` 为文字左上角，文字使用画笔颜色
    fn draw_text(&mut self, origin: Position, text: &str, pen: &Pen) -> Result<(), DrawError>;

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Bounds, mask: Option<Color>) -> Result<(), DrawError>;
}

// ==================== 软件实现 ====================

fn stroke_paint(pen: &Pen) -> Option<Paint> {
    pen.ink
        .color()
        .map(|color| Paint::stroke(color, pen.width.max(1) as f32))
}

fn fill_paint(brush: &Brush) -> Option<Paint> {
    brush.ink.color().map(Paint::fill)
}

impl Canvas {
    /// 先用画刷填充再用画笔描边
    fn fill_and_stroke(&mut self, path: &Path, pen: &Pen, brush: &Brush) {
        if let Some(paint) = fill_paint(brush) {
            self.draw_path(path, &paint);
        }
        if let Some(paint) = stroke_paint(pen) {
            self.draw_path(path, &paint);
        }
    }

    fn elliptic_arc(&mut self, bounds: Bounds, start: Position, end: Position, closure: ArcClosure, pen: &Pen, brush: &Brush) {
        let mut path = Path::new();
        path.add_elliptic_arc(bounds.to_rect(), start.to_point(), end.to_point(), closure);
        self.fill_and_stroke(&path, pen, brush);
    }
}

impl Backend for Canvas {
    fn clear(&mut self, color: Color) {
        Canvas::clear(self, color);
    }

    fn draw_line(&mut self, from: Position, to: Position, pen: &Pen) -> Result<(), DrawError> {
        if let Some(paint) = stroke_paint(pen) {
            Canvas::draw_line(self, from.x as f32, from.y as f32, to.x as f32, to.y as f32, &paint);
        }
        Ok(())
    }

    fn draw_rect(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError> {
        let rect = bounds.to_rect();
        if let Some(paint) = fill_paint(brush) {
            Canvas::draw_rect(self, &rect, &paint);
        }
        if let Some(paint) = stroke_paint(pen) {
            Canvas::draw_rect(self, &rect, &paint);
        }
        Ok(())
    }

    fn draw_ellipse(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError> {
        let rect = bounds.to_rect();
        let center = rect.center();
        let mut path = Path::new();
        path.add_oval(center.x, center.y, rect.width / 2.0, rect.height / 2.0);
        self.fill_and_stroke(&path, pen, brush);
        Ok(())
    }

    fn draw_round_rect(
        &mut self,
        bounds: Bounds,
        corner_width: i32,
        corner_height: i32,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError> {
        let mut path = Path::new();
        path.add_round_rect(bounds.to_rect(), corner_width as f32 / 2.0, corner_height as f32 / 2.0);
        self.fill_and_stroke(&path, pen, brush);
        Ok(())
    }

    fn draw_arc(&mut self, bounds: Bounds, start: Position, end: Position, pen: &Pen) -> Result<(), DrawError> {
        self.elliptic_arc(bounds, start, end, ArcClosure::Open, pen, &Brush::default());
        Ok(())
    }

    fn draw_chord(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError> {
        self.elliptic_arc(bounds, start, end, ArcClosure::Chord, pen, brush);
        Ok(())
    }

    fn draw_pie(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        pen: &Pen,
        brush: &Brush,
    ) -> Result<(), DrawError> {
        self.elliptic_arc(bounds, start, end, ArcClosure::Pie, pen, brush);
        Ok(())
    }

    fn draw_text(&mut self, origin: Position, text: &str, pen: &Pen) -> Result<(), DrawError> {
        let Some(color) = pen.ink.color() else {
            return Ok(());
        };
        let renderer = TextRenderer::system().ok_or(DrawError::FontUnavailable)?;
        renderer.draw_text(self, text, origin.x as f32, origin.y as f32, TEXT_SIZE, color);
        Ok(())
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Bounds, mask: Option<Color>) -> Result<(), DrawError> {
        Canvas::draw_bitmap(self, bitmap, dest.to_rect(), mask);
        Ok(())
    }
}
