//! 路径模块 - 折线、贝塞尔曲线与椭圆弧

use std::f32::consts::TAU;

use crate::geometry::{Point, Rect};

/// 贝塞尔曲线近似四分之一圆弧的系数
const KAPPA: f32 = 0.552_284_8;

/// 路径命令
#[derive(Debug, Clone)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point), // 控制点1, 控制点2, 终点
    Close,
}

/// 椭圆弧的闭合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcClosure {
    /// 只有弧线
    Open,
    /// 弦：连接弧的两个端点
    Chord,
    /// 扇形：两个端点都连向圆心
    Pie,
}

/// 路径
#[derive(Debug, Clone, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        ));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// 添加矩形
    pub fn add_rect(&mut self, rect: Rect) -> &mut Self {
        self.move_to(rect.x, rect.y)
            .line_to(rect.right(), rect.y)
            .line_to(rect.right(), rect.bottom())
            .line_to(rect.x, rect.bottom())
            .close()
    }

    /// 添加圆角矩形，圆角是 `rx * ry` 的四分之一椭圆
    pub fn add_round_rect(&mut self, rect: Rect, rx: f32, ry: f32) -> &mut Self {
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        let rx = rx.clamp(0.0, w / 2.0);
        let ry = ry.clamp(0.0, h / 2.0);
        if rx == 0.0 || ry == 0.0 {
            return self.add_rect(rect);
        }
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;

        self.move_to(x + rx, y);
        self.line_to(x + w - rx, y);
        self.cubic_to(x + w - rx + kx, y, x + w, y + ry - ky, x + w, y + ry);
        self.line_to(x + w, y + h - ry);
        self.cubic_to(x + w, y + h - ry + ky, x + w - rx + kx, y + h, x + w - rx, y + h);
        self.line_to(x + rx, y + h);
        self.cubic_to(x + rx - kx, y + h, x, y + h - ry + ky, x, y + h - ry);
        self.line_to(x, y + ry);
        self.cubic_to(x, y + ry - ky, x + rx - kx, y, x + rx, y);
        self.close()
    }

    /// 添加椭圆
    pub fn add_oval(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) -> &mut Self {
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;

        self.move_to(cx + rx, cy);
        self.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.close()
    }

    /// 添加内切于 `oval` 的椭圆弧
    ///
    /// 起点/终点是椭圆与「圆心 → start」「圆心 → end」两条射线的交点，
    /// 从起点按逆时针（屏幕视角）画到终点；两条射线重合时画整个椭圆。
    pub fn add_elliptic_arc(&mut self, oval: Rect, start: Point, end: Point, closure: ArcClosure) -> &mut Self {
        let center = oval.center();
        let rx = oval.width / 2.0;
        let ry = oval.height / 2.0;

        let t0 = radial_parameter(center, start, rx, ry);
        let t1 = radial_parameter(center, end, rx, ry);
        let mut sweep = t1 - t0;
        if sweep <= 0.0 {
            sweep += TAU;
        }

        // 大约每 4 个像素一段
        let approx_len = sweep * (rx + ry) / 2.0;
        let segments = ((approx_len / 4.0).ceil() as usize).clamp(8, 256);

        let at = |t: f32| Point::new(center.x + rx * t.cos(), center.y - ry * t.sin());

        let first = at(t0);
        match closure {
            ArcClosure::Pie => {
                self.move_to(center.x, center.y);
                self.line_to(first.x, first.y);
            }
            ArcClosure::Open | ArcClosure::Chord => {
                self.move_to(first.x, first.y);
            }
        }
        for i in 1..=segments {
            let p = at(t0 + sweep * i as f32 / segments as f32);
            self.line_to(p.x, p.y);
        }
        if closure != ArcClosure::Open {
            self.close();
        }
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// 将路径转换为点序列（用于光栅化）
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec<Point>> {
        let mut contours = Vec::new();
        let mut current_contour = Vec::new();
        let mut current = Point::default();
        let mut start = Point::default();

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => {
                    if !current_contour.is_empty() {
                        contours.push(std::mem::take(&mut current_contour));
                    }
                    current = *p;
                    start = *p;
                    current_contour.push(*p);
                }
                PathCommand::LineTo(p) => {
                    current_contour.push(*p);
                    current = *p;
                }
                PathCommand::CubicTo(c1, c2, end) => {
                    flatten_cubic(&current, c1, c2, end, tolerance, &mut current_contour);
                    current = *end;
                }
                PathCommand::Close => {
                    if current != start {
                        current_contour.push(start);
                    }
                    current = start;
                }
            }
        }

        if !current_contour.is_empty() {
            contours.push(current_contour);
        }

        contours
    }
}

/// 射线 `center → p` 与椭圆交点对应的参数角（y 轴向上为正）
fn radial_parameter(center: Point, p: Point, rx: f32, ry: f32) -> f32 {
    let dx = p.x - center.x;
    let dy = center.y - p.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    (dy * rx).atan2(dx * ry)
}

/// 三次贝塞尔曲线展平
fn flatten_cubic(p0: &Point, p1: &Point, p2: &Point, p3: &Point, tolerance: f32, out: &mut Vec<Point>) {
    let steps = ((p0.distance(p1) + p1.distance(p2) + p2.distance(p3)) / tolerance).ceil() as usize;
    let steps = steps.clamp(2, 100);

    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        out.push(Point::new(
            mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x,
            mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y,
        ));
    }
}
