//! # 平台桥接
//!
//! 窗口级别的平台接口：打开窗口、提供绘制目标、呈现帧、收集输入。
//!
//! - `NativePlatform` - winit 窗口 + softbuffer 软件呈现
//! - `HeadlessPlatform` - 内存画布，用于离屏渲染和测试

mod headless;
mod native;

pub use headless::HeadlessPlatform;
pub use native::{show_message_box, NativePlatform};

use crate::backend::Backend;
use crate::config::WindowConfig;
use crate::error::PlatformError;
use crate::event::InputEvent;

/// 平台桥接
///
/// 平台资源在 `open` 时获取，随实现类型 drop 释放。
pub trait Platform: Sized {
    /// 合成器绘制的目标
    type Target: Backend;

    /// 打开窗口。尺寸已经过检查。
    fn open(config: &WindowConfig) -> Result<Self, PlatformError>;

    /// 本帧的绘制目标
    fn target(&mut self) -> &mut Self::Target;

    /// 呈现已绘制的帧
    fn present(&mut self) -> Result<(), PlatformError>;

    /// 处理平台消息，把输入事件追加到 `events`
    fn poll_events(&mut self, events: &mut Vec<InputEvent>);

    /// 窗口是否已被关闭
    fn is_closed(&self) -> bool;

    /// 平台是否要求重新合成（尺寸变化、重新曝光等），调用后清除
    fn take_repaint_request(&mut self) -> bool {
        false
    }
}
