//! 单元测试模块
//! 覆盖 Egg 树、合成、窗口刷新、事件分发、软件光栅化、配置加载

pub mod window_tests;
pub mod canvas_tests;
pub mod config_tests;

use std::cell::Cell;

use crate::backend::Backend;
use crate::bitmap::Bitmap;
use crate::config::WindowConfig;
use crate::error::{DrawError, PlatformError};
use crate::event::InputEvent;
use crate::geometry::{Bounds, Position};
use crate::platform::Platform;
use crate::style::{Brush, Pen};
use crate::Color;

/// 后端收到的一次调用
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear(Color),
    Line { from: Position, to: Position, pen: Pen },
    Rect { bounds: Bounds, pen: Pen, brush: Brush },
    Ellipse { bounds: Bounds, pen: Pen, brush: Brush },
    RoundRect { bounds: Bounds, corner: (i32, i32) },
    Arc { bounds: Bounds, start: Position, end: Position },
    Chord { bounds: Bounds, start: Position, end: Position },
    Pie { bounds: Bounds, start: Position, end: Position },
    Text { origin: Position, text: String, pen: Pen },
    Bitmap { dest: Bounds, mask: Option<Color> },
}

/// 记录所有调用的后端
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    /// 为 true 时文字绘制失败，模拟缺字体
    pub fail_text: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 除清屏以外的调用
    pub fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| !matches!(call, Call::Clear(_)))
            .collect()
    }
}

impl Backend for Recorder {
    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn draw_line(&mut self, from: Position, to: Position, pen: &Pen) -> Result<(), DrawError> {
        self.calls.push(Call::Line { from, to, pen: *pen });
        Ok(())
    }

    fn draw_rect(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError> {
        self.calls.push(Call::Rect { bounds, pen: *pen, brush: *brush });
        Ok(())
    }

    fn draw_ellipse(&mut self, bounds: Bounds, pen: &Pen, brush: &Brush) -> Result<(), DrawError> {
        self.calls.push(Call::Ellipse { bounds, pen: *pen, brush: *brush });
        Ok(())
    }

    fn draw_round_rect(
        &mut self,
        bounds: Bounds,
        corner_width: i32,
        corner_height: i32,
        _pen: &Pen,
        _brush: &Brush,
    ) -> Result<(), DrawError> {
        self.calls.push(Call::RoundRect { bounds, corner: (corner_width, corner_height) });
        Ok(())
    }

    fn draw_arc(&mut self, bounds: Bounds, start: Position, end: Position, _pen: &Pen) -> Result<(), DrawError> {
        self.calls.push(Call::Arc { bounds, start, end });
        Ok(())
    }

    fn draw_chord(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        _pen: &Pen,
        _brush: &Brush,
    ) -> Result<(), DrawError> {
        self.calls.push(Call::Chord { bounds, start, end });
        Ok(())
    }

    fn draw_pie(
        &mut self,
        bounds: Bounds,
        start: Position,
        end: Position,
        _pen: &Pen,
        _brush: &Brush,
    ) -> Result<(), DrawError> {
        self.calls.push(Call::Pie { bounds, start, end });
        Ok(())
    }

    fn draw_text(&mut self, origin: Position, text: &str, pen: &Pen) -> Result<(), DrawError> {
        if self.fail_text {
            return Err(DrawError::FontUnavailable);
        }
        self.calls.push(Call::Text { origin, text: text.to_string(), pen: *pen });
        Ok(())
    }

    fn draw_bitmap(&mut self, _bitmap: &Bitmap, dest: Bounds, mask: Option<Color>) -> Result<(), DrawError> {
        self.calls.push(Call::Bitmap { dest, mask });
        Ok(())
    }
}

thread_local! {
    /// 当前线程上 `RecordingPlatform::open` 被调用的次数
    pub static PLATFORM_OPENS: Cell<usize> = const { Cell::new(0) };
}

/// 画到 `Recorder` 的测试平台
pub struct RecordingPlatform {
    pub recorder: Recorder,
    pub presents: usize,
    pub pending: Vec<InputEvent>,
    pub closed: bool,
    pub repaint: bool,
}

impl Platform for RecordingPlatform {
    type Target = Recorder;

    fn open(_config: &WindowConfig) -> Result<Self, PlatformError> {
        PLATFORM_OPENS.with(|opens| opens.set(opens.get() + 1));
        Ok(Self {
            recorder: Recorder::new(),
            presents: 0,
            pending: Vec::new(),
            closed: false,
            repaint: false,
        })
    }

    fn target(&mut self) -> &mut Recorder {
        &mut self.recorder
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.presents += 1;
        Ok(())
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        events.append(&mut self.pending);
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }
}

/// 总是打开失败的平台
pub struct FailingPlatform;

impl Platform for FailingPlatform {
    type Target = Recorder;

    fn open(_config: &WindowConfig) -> Result<Self, PlatformError> {
        Err(PlatformError::CreateWindow("no display".to_string()))
    }

    fn target(&mut self) -> &mut Recorder {
        unreachable!("never opened")
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        Ok(())
    }

    fn poll_events(&mut self, _events: &mut Vec<InputEvent>) {}

    fn is_closed(&self) -> bool {
        true
    }
}
