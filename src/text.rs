//! 文本渲染模块 - 基于 fontdue 的系统字体光栅化

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use fontdue::{Font, FontSettings, Metrics};
use once_cell::sync::OnceCell;

use crate::{Canvas, Color};

/// 默认字号（像素）
pub const TEXT_SIZE: f32 = 16.0;

/// 依次尝试的系统字体
const SYSTEM_FONT_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

static SYSTEM: OnceCell<Option<TextRenderer>> = OnceCell::new();

/// 文本渲染器
pub struct TextRenderer {
    font: Font,
    /// 字形缓存 (char, size*10) -> (Metrics, Bitmap)
    cache: Mutex<HashMap<(char, u32), (Metrics, Vec<u8>)>>,
}

impl TextRenderer {
    /// 从字体数据创建
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, String> {
        let settings = FontSettings {
            scale: 40.0,
            ..Default::default()
        };
        let font = Font::from_bytes(font_data, settings).map_err(|e| e.to_string())?;
        Ok(Self {
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// 从文件路径加载字体
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let font_data = std::fs::read(path.as_ref())
            .map_err(|e| format!("Failed to read font file: {}", e))?;
        Self::from_bytes(&font_data)
    }

    /// 进程内共享的系统字体，首次调用时加载，找不到时为 None
    pub fn system() -> Option<&'static TextRenderer> {
        SYSTEM
            .get_or_init(|| {
                let found = SYSTEM_FONT_PATHS
                    .iter()
                    .filter(|path| Path::new(path).exists())
                    .find_map(|path| match Self::from_file(path) {
                        Ok(renderer) => {
                            tracing::debug!(font = *path, "system font loaded");
                            Some(renderer)
                        }
                        Err(err) => {
                            tracing::debug!(font = *path, %err, "skipping font");
                            None
                        }
                    });
                if found.is_none() {
                    tracing::warn!("no system font found, text commands will fail");
                }
                found
            })
            .as_ref()
    }

    fn glyph(&self, ch: char, size: f32) -> (Metrics, Vec<u8>) {
        let key = (ch, (size * 10.0) as u32);
        if let Some(hit) = self.cache.lock().ok().and_then(|cache| cache.get(&key).cloned()) {
            return hit;
        }
        // 光栅化放在锁外
        let glyph = self.font.rasterize(ch, size);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, glyph.clone());
        }
        glyph
    }

    /// 渲染文本，(x, top) 为左上角
    pub fn draw_text(&self, canvas: &mut Canvas, text: &str, x: f32, top: f32, size: f32, color: Color) {
        let ascent = self
            .font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size * 0.8);
        let baseline = top + ascent;
        let mut cursor_x = x;

        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch, size);

            if metrics.width == 0 || metrics.height == 0 {
                cursor_x += metrics.advance_width;
                continue;
            }

            let glyph_x = cursor_x + metrics.xmin as f32;
            let glyph_y = baseline - metrics.height as f32 - metrics.ymin as f32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx] as f32 / 255.0;
                    if coverage <= 0.001 {
                        continue;
                    }
                    let alpha = (color.a as f32 * coverage) as u8;
                    if alpha > 0 {
                        let px = (glyph_x + gx as f32).round() as i32;
                        let py = (glyph_y + gy as f32).round() as i32;
                        canvas.set_pixel(px, py, Color::new(color.r, color.g, color.b, alpha));
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}
