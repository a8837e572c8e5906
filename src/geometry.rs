//! 几何图形模块
//!
//! `Position` / `Bounds` 是 Egg 使用的整数逻辑坐标；`Point` / `Rect` 是光栅化用的浮点坐标。
//! 整数坐标的加法和平移都是饱和运算，越界时停在 `i32` 边界上。

use std::ops::{Add, AddAssign};

/// 整数坐标点（逻辑坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        *self = *self + rhs;
    }
}

/// 由两个角点给出的整数矩形
///
/// 角点不要求有序，`(left, top)` 可以在 `(right, bottom)` 的右下方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// 左上角 + 尺寸
    pub const fn from_origin(origin: Position, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, origin.x.saturating_add(width), origin.y.saturating_add(height))
    }

    pub fn translate(self, offset: Position) -> Bounds {
        Bounds::new(
            self.left.saturating_add(offset.x),
            self.top.saturating_add(offset.y),
            self.right.saturating_add(offset.x),
            self.bottom.saturating_add(offset.y),
        )
    }

    pub fn width(&self) -> i32 {
        self.right.abs_diff(self.left).min(i32::MAX as u32) as i32
    }

    pub fn height(&self) -> i32 {
        self.bottom.abs_diff(self.top).min(i32::MAX as u32) as i32
    }

    /// 角点排序后的浮点矩形
    pub fn to_rect(self) -> Rect {
        Rect::from_points(
            Point::new(self.left as f32, self.top as f32),
            Point::new(self.right as f32, self.bottom as f32),
        )
    }
}

/// 2D 点
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// 矩形
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_points(p1: Point, p2: Point) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        let width = (p1.x - p2.x).abs();
        let height = (p1.y - p2.y).abs();
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 { self.x + self.width }
    pub fn bottom(&self) -> f32 { self.y + self.height }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
