//! 颜色模块

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 解析 `#RRGGBB` / `RRGGBB` 形式的字符串
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// 0x00RRGGBB，softbuffer 的像素格式
    #[inline]
    pub const fn to_xrgb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// 忽略 alpha 比较 RGB
    #[inline]
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// source-over 混合：`self` 画在 `dst` 之上
    #[inline]
    pub fn blend(&self, dst: &Color) -> Color {
        match (self.a, dst.a) {
            (0, _) => *dst,
            (255, _) => *self,
            (src_a, 255) => {
                let (sa, da) = (src_a as u32, 255 - src_a as u32);
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da + 127) / 255) as u8;
                Color::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
            }
            (src_a, dst_a) => {
                let sa = src_a as u32;
                // 目标在源之下剩余的权重
                let dw = dst_a as u32 * (255 - sa) / 255;
                let out_a = sa + dw;
                if out_a == 0 {
                    return Color::TRANSPARENT;
                }
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * dw) / out_a) as u8;
                Color::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
            }
        }
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
