//! Canvas 画布模块 - 软件光栅化目标
//!
//! 像素按行存储。所有图元最后都落到两种写入上：单个像素按覆盖率混合，
//! 或者一行像素按覆盖率缓冲整体混合。

use crate::bitmap::Bitmap;
use crate::{Color, Paint, PaintStyle, Path, Point, Rect};

/// 抗锯齿填充时每行的子扫描线数
const SUBSAMPLES: usize = 4;

/// 曲线展平容差（像素）
const FLATTEN_TOLERANCE: f32 = 1.0;

/// 画布 - 主要渲染接口
#[derive(Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 复制另一块画布，尺寸不同时只复制重叠部分
    pub fn copy_from(&mut self, src: &Canvas) {
        if src.width == self.width {
            let len = self.pixels.len().min(src.pixels.len());
            self.pixels[..len].copy_from_slice(&src.pixels[..len]);
            return;
        }
        let cols = self.width.min(src.width) as usize;
        for y in 0..self.height.min(src.height) as usize {
            let dst = y * self.width as usize;
            let from = y * src.width as usize;
            self.pixels[dst..dst + cols].copy_from_slice(&src.pixels[from..from + cols]);
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 越界返回透明
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.index(x as i32, y as i32)
            .map(|i| self.pixels[i])
            .unwrap_or(Color::TRANSPARENT)
    }

    /// 写入一个像素，按 alpha 与原像素混合，越界忽略
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.blend(x, y, color, 1.0);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let Some(i) = self.index(x, y) else { return };
        let alpha = (color.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        match alpha {
            0 => {}
            255 => self.pixels[i] = color,
            a => self.pixels[i] = Color::new(color.r, color.g, color.b, a).blend(&self.pixels[i]),
        }
    }

    // ==================== 矩形 ====================

    /// 轴对齐矩形，描边向内收
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        if matches!(paint.style, PaintStyle::Fill | PaintStyle::FillAndStroke) {
            self.fill_rect(rect, paint.color);
        }
        if matches!(paint.style, PaintStyle::Stroke | PaintStyle::FillAndStroke) {
            let w = paint.stroke_width.max(1.0).min(rect.width / 2.0).min(rect.height / 2.0).max(1.0);
            let bands = [
                Rect::new(rect.x, rect.y, rect.width, w),
                Rect::new(rect.x, rect.bottom() - w, rect.width, w),
                Rect::new(rect.x, rect.y + w, w, rect.height - 2.0 * w),
                Rect::new(rect.right() - w, rect.y + w, w, rect.height - 2.0 * w),
            ];
            for band in &bands {
                self.fill_rect(band, paint.color);
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let x0 = rect.x.round().max(0.0) as i32;
        let y0 = rect.y.round().max(0.0) as i32;
        let x1 = rect.right().round().min(self.width as f32) as i32;
        let y1 = rect.bottom().round().min(self.height as f32) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    // ==================== 线段 ====================

    /// 线段，线宽大于 1 时按带圆头的粗线绘制
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let (from, to) = (Point::new(x0, y0), Point::new(x1, y1));
        if paint.stroke_width > 1.0 {
            self.thick_line(from, to, paint.stroke_width / 2.0, paint.color, paint.anti_alias);
        } else {
            self.hairline(from, to, paint.color, paint.anti_alias);
        }
    }

    /// 单像素线：沿主轴逐像素前进，抗锯齿时把覆盖率分给副轴上相邻的两个像素
    fn hairline(&mut self, from: Point, to: Point, color: Color, anti_alias: bool) {
        // 只在画布外留一像素余量，步数不随画布外的长度增长
        let window = (
            Point::new(-1.0, -1.0),
            Point::new(self.width as f32 + 1.0, self.height as f32 + 1.0),
        );
        let Some((from, to)) = clip_segment(from, to, window) else { return };
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steep = dy.abs() > dx.abs();
        let steps = (dx.abs().max(dy.abs()).round() as i32).max(1);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let (x, y) = (from.x + dx * t, from.y + dy * t);
            if !anti_alias {
                self.blend(x.round() as i32, y.round() as i32, color, 1.0);
                continue;
            }
            let (major, minor) = if steep { (y, x) } else { (x, y) };
            let base = minor.floor();
            let frac = minor - base;
            let (major, base) = (major.round() as i32, base as i32);
            if steep {
                self.blend(base, major, color, 1.0 - frac);
                self.blend(base + 1, major, color, frac);
            } else {
                self.blend(major, base, color, 1.0 - frac);
                self.blend(major, base + 1, color, frac);
            }
        }
    }

    fn thick_line(&mut self, from: Point, to: Point, half: f32, color: Color, anti_alias: bool) {
        let len = from.distance(&to);
        if len > f32::EPSILON {
            let nx = (from.y - to.y) / len * half;
            let ny = (to.x - from.x) / len * half;
            let quad = vec![
                Point::new(from.x + nx, from.y + ny),
                Point::new(to.x + nx, to.y + ny),
                Point::new(to.x - nx, to.y - ny),
                Point::new(from.x - nx, from.y - ny),
            ];
            self.fill_polygons(&[quad], color, anti_alias);
        }
        self.fill_disc(from, half, color, anti_alias);
        self.fill_disc(to, half, color, anti_alias);
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Color, anti_alias: bool) {
        let x0 = (center.x - radius - 1.0).floor() as i32;
        let x1 = (center.x + radius + 1.0).ceil() as i32;
        let y0 = (center.y - radius - 1.0).floor() as i32;
        let y1 = (center.y + radius + 1.0).ceil() as i32;

        for y in y0.max(0)..y1.min(self.height as i32) {
            for x in x0.max(0)..x1.min(self.width as i32) {
                let d = Point::new(x as f32 + 0.5, y as f32 + 0.5).distance(&center);
                let coverage = if anti_alias {
                    radius + 0.5 - d
                } else if d <= radius {
                    1.0
                } else {
                    0.0
                };
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    // ==================== 路径 ====================

    /// 填充或描边路径，填充按奇偶规则
    pub fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let contours = path.flatten(FLATTEN_TOLERANCE);
        if matches!(paint.style, PaintStyle::Fill | PaintStyle::FillAndStroke) {
            self.fill_polygons(&contours, paint.color, paint.anti_alias);
        }
        if matches!(paint.style, PaintStyle::Stroke | PaintStyle::FillAndStroke) {
            for contour in &contours {
                for segment in contour.windows(2) {
                    self.draw_line(segment[0].x, segment[0].y, segment[1].x, segment[1].y, paint);
                }
            }
        }
    }

    /// 扫描线填充多边形集合（每个轮廓视为闭合）
    ///
    /// 每一行先把各条子扫描线的覆盖率累加到行缓冲，再统一混合。
    fn fill_polygons(&mut self, contours: &[Vec<Point>], color: Color, anti_alias: bool) {
        let (min_y, max_y) = contours
            .iter()
            .flatten()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        if min_y > max_y {
            return;
        }

        let row_start = (min_y.floor() as i32).max(0);
        let row_end = (max_y.ceil() as i32).min(self.height as i32);
        let samples = if anti_alias { SUBSAMPLES } else { 1 };
        let width = self.width as f32;
        let mut row = vec![0.0f32; self.width as usize];
        let mut crossings = Vec::new();

        for y in row_start..row_end {
            row.fill(0.0);
            let mut touched = false;

            for sample in 0..samples {
                let scan_y = y as f32 + (sample as f32 + 0.5) / samples as f32;
                crossings.clear();
                edge_crossings(contours, scan_y, &mut crossings);
                crossings.sort_by(f32::total_cmp);

                for span in crossings.chunks_exact(2) {
                    let (left, right) = (span[0].clamp(0.0, width), span[1].clamp(0.0, width));
                    if right <= left {
                        continue;
                    }
                    touched = true;
                    if anti_alias {
                        accumulate_span(&mut row, left, right, 1.0 / samples as f32);
                    } else {
                        // 像素中心落在区间内才算覆盖
                        let first = (left - 0.5).ceil().max(0.0) as usize;
                        let last = (right - 0.5).ceil().min(width) as usize;
                        for cell in row.iter_mut().take(last).skip(first) {
                            *cell = 1.0;
                        }
                    }
                }
            }

            if touched {
                for (x, coverage) in row.iter().enumerate() {
                    if *coverage > 0.0 {
                        self.blend(x as i32, y, color, *coverage);
                    }
                }
            }
        }
    }

    // ==================== 位图 ====================

    /// 绘制位图，拉伸到 `dest`
    ///
    /// 有 `mask` 时与其 RGB 相同的源像素不绘制，并改用最近邻采样以免边缘混入遮罩色。
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect, mask: Option<Color>) {
        if bitmap.width() == 0 || bitmap.height() == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let scale_x = bitmap.width() as f32 / dest.width;
        let scale_y = bitmap.height() as f32 / dest.height;

        let x0 = dest.x.round().max(0.0) as i32;
        let y0 = dest.y.round().max(0.0) as i32;
        let x1 = dest.right().round().min(self.width as f32) as i32;
        let y1 = dest.bottom().round().min(self.height as f32) as i32;

        for y in y0..y1 {
            let v = (y as f32 + 0.5 - dest.y) * scale_y;
            for x in x0..x1 {
                let u = (x as f32 + 0.5 - dest.x) * scale_x;
                let color = match mask {
                    Some(mask) => {
                        let c = bitmap.sample_nearest(u, v);
                        if c.same_rgb(&mask) {
                            continue;
                        }
                        c
                    }
                    None => bitmap.sample_bilinear(u, v),
                };
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        let img = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get_pixel(x, y);
            image::Rgba([c.r, c.g, c.b, c.a])
        });
        img.save(path)
    }
}

/// Liang–Barsky 裁剪，线段完全落在 `(min, max)` 矩形外时返回 None
///
/// 参数在 f64 下计算，远离画布的端点不会把裁剪结果拉偏。
fn clip_segment(from: Point, to: Point, (min, max): (Point, Point)) -> Option<(Point, Point)> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    let boundaries = [
        (-dx, x0 - min.x as f64),
        (dx, max.x as f64 - x0),
        (-dy, y0 - min.y as f64),
        (dy, max.y as f64 - y0),
    ];
    for (p, q) in boundaries {
        if p == 0.0 {
            // 与该边平行
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Point::new((x0 + dx * t) as f32, (y0 + dy * t) as f32);
    Some((at(t0), at(t1)))
}

/// 水平扫描线与所有轮廓边的交点
fn edge_crossings(contours: &[Vec<Point>], scan_y: f32, out: &mut Vec<f32>) {
    for contour in contours {
        let edges = contour.iter().zip(contour.iter().cycle().skip(1));
        for (a, b) in edges {
            if (a.y <= scan_y) != (b.y <= scan_y) {
                let t = (scan_y - a.y) / (b.y - a.y);
                out.push(a.x + t * (b.x - a.x));
            }
        }
    }
}

/// 把区间 [left, right) 按每个像素被覆盖的宽度累加到行缓冲
fn accumulate_span(row: &mut [f32], left: f32, right: f32, weight: f32) {
    let first = left.floor() as usize;
    let last = (right.ceil() as usize).min(row.len());
    for (x, cell) in row.iter_mut().enumerate().take(last).skip(first) {
        let (cell_left, cell_right) = (x as f32, x as f32 + 1.0);
        let covered = right.min(cell_right) - left.max(cell_left);
        if covered > 0.0 {
            *cell += covered * weight;
        }
    }
}
