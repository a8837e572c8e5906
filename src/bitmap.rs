//! 位图 - 解码后的 RGBA 像素

use std::path::{Path, PathBuf};

use crate::error::DrawError;
use crate::Color;

/// 解码后的位图
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    source: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// 从文件加载（bmp / png / jpeg ...）
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DrawError> {
        use image::GenericImageView;

        let path = path.as_ref();
        let img = image::open(path).map_err(|e| DrawError::Bitmap {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let mut bitmap = Self::from_rgba(&rgba, width, height);
        bitmap.source = path.to_path_buf();
        Ok(bitmap)
    }

    /// 从 RGBA 数据构建
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for chunk in data.chunks_exact(4) {
            pixels.push(Color::new(chunk[0], chunk[1], chunk[2], chunk[3]));
        }
        pixels.resize((width * height) as usize, Color::TRANSPARENT);
        Self {
            source: PathBuf::new(),
            width,
            height,
            pixels,
        }
    }

    /// 来源文件路径，内存构建的位图为空路径
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// 取像素，越界坐标钳制到边缘
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::TRANSPARENT;
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// 最近邻采样，(u, v) 以源像素为单位
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        self.pixel(u.max(0.0) as u32, v.max(0.0) as u32)
    }

    /// 双线性采样，像素中心位于 (i + 0.5, j + 0.5)
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let x = (u - 0.5).max(0.0);
        let y = (v - 0.5).max(0.0);
        let (x0, y0) = (x.floor() as u32, y.floor() as u32);
        let (fx, fy) = (x.fract(), y.fract());

        let corners = [
            (self.pixel(x0, y0), (1.0 - fx) * (1.0 - fy)),
            (self.pixel(x0 + 1, y0), fx * (1.0 - fy)),
            (self.pixel(x0, y0 + 1), (1.0 - fx) * fy),
            (self.pixel(x0 + 1, y0 + 1), fx * fy),
        ];
        let mix = |channel: fn(&Color) -> u8| {
            let value: f32 = corners.iter().map(|(c, w)| channel(c) as f32 * w).sum();
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::new(mix(|c| c.r), mix(|c| c.g), mix(|c| c.b), mix(|c| c.a))
    }
}
