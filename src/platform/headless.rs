//! 离屏平台 - 画到内存画布
//!
//! 后台画布接收合成结果，`present` 时整体复制到前台画布，
//! 因此前台画布里永远是完整的一帧。

use std::collections::VecDeque;

use super::Platform;
use crate::config::WindowConfig;
use crate::error::PlatformError;
use crate::event::InputEvent;
use crate::Canvas;

pub struct HeadlessPlatform {
    back: Canvas,
    front: Canvas,
    pending: VecDeque<InputEvent>,
    presents: usize,
    closed: bool,
}

impl HeadlessPlatform {
    /// 注入一个输入事件，下次处理平台消息时交给窗口
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// 模拟用户关闭窗口
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// 已呈现的帧数
    pub fn present_count(&self) -> usize {
        self.presents
    }

    /// 最近一次呈现的帧
    pub fn frame(&self) -> &Canvas {
        &self.front
    }

    /// 把最近一次呈现的帧保存为 PNG
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), PlatformError> {
        self.front
            .save_png(path)
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }
}

impl Platform for HeadlessPlatform {
    type Target = Canvas;

    fn open(config: &WindowConfig) -> Result<Self, PlatformError> {
        tracing::debug!(width = config.width, height = config.height, caption = %config.caption, "headless window opened");
        Ok(Self {
            back: Canvas::new(config.width, config.height),
            front: Canvas::new(config.width, config.height),
            pending: VecDeque::new(),
            presents: 0,
            closed: false,
        })
    }

    fn target(&mut self) -> &mut Canvas {
        &mut self.back
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.front.copy_from(&self.back);
        self.presents += 1;
        Ok(())
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        events.extend(self.pending.drain(..));
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
