//! 窗口 - 持有背景 Egg 和平台资源，驱动刷新和事件分发
//!
//! ## 刷新流程
//!
//! 1. 处理平台消息，把输入事件分发给回调（回调可以修改 Egg）
//! 2. 窗口已关闭则直接返回
//! 3. 帧指纹变化或平台要求重绘时，清屏并合成整棵 Egg 树
//! 4. 呈现

use crate::backend::Backend;
use crate::compositor::{self, FrameKey};
use crate::config::WindowConfig;
use crate::egg::Egg;
use crate::error::{ConstructError, PlatformError};
use crate::event::{EventBridge, InputEvent};
use crate::platform::{NativePlatform, Platform};
use crate::Color;

/// 窗口
pub struct Window<P: Platform = NativePlatform> {
    config: WindowConfig,
    background: Color,
    // 先于平台释放
    egg: Egg,
    events: EventBridge,
    pending: Vec<InputEvent>,
    last_frame: Option<FrameKey>,
    platform: P,
}

impl Window<NativePlatform> {
    /// 创建原生窗口，尺寸至少 240 x 120
    pub fn new(width: u32, height: u32, caption: &str) -> Result<Self, ConstructError> {
        Self::open(WindowConfig::new(width, height, caption))
    }
}

impl<P: Platform> Window<P> {
    /// 按配置创建窗口，尺寸和背景色检查先于任何平台资源分配
    pub fn open(config: WindowConfig) -> Result<Self, ConstructError> {
        let background = config.checked_background()?;
        let egg = Egg::new(config.width, config.height)?;
        let platform = P::open(&config)?;

        Ok(Self {
            config,
            background,
            egg,
            events: EventBridge::new(),
            pending: Vec::new(),
            last_frame: None,
            platform,
        })
    }

    /// 背景 Egg，整棵树的根
    pub fn egg(&self) -> &Egg {
        &self.egg
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn caption(&self) -> &str {
        &self.config.caption
    }

    pub fn is_closed(&self) -> bool {
        self.platform.is_closed()
    }

    /// 注册点击回调，参数为窗口逻辑坐标
    pub fn on_click<F>(&mut self, handler: F)
    where
        F: FnMut(i32, i32) + 'static,
    {
        self.events.set_click_handler(handler);
    }

    /// 注册字符输入回调
    pub fn on_key_press<F>(&mut self, handler: F)
    where
        F: FnMut(char) + 'static,
    {
        self.events.set_key_press_handler(handler);
    }

    pub fn clear_handlers(&mut self) {
        self.events.clear();
    }

    /// 处理平台消息并分发输入事件
    pub fn pump_events(&mut self) {
        self.platform.poll_events(&mut self.pending);
        for event in self.pending.drain(..) {
            self.events.dispatch(event);
        }
    }

    /// 刷新窗口。已关闭的窗口什么也不做。
    pub fn refresh(&mut self) -> Result<(), PlatformError> {
        self.pump_events();
        if self.platform.is_closed() {
            tracing::trace!("refresh skipped, window closed");
            return Ok(());
        }

        let key = compositor::frame_key(&self.egg);
        let repaint = self.platform.take_repaint_request();
        if repaint || self.last_frame.as_ref() != Some(&key) {
            let target = self.platform.target();
            target.clear(self.background);
            let stats = compositor::compose(&self.egg, target);
            tracing::debug!(
                eggs = stats.eggs,
                commands = stats.commands,
                failed = stats.failed,
                dangling = stats.dangling,
                "frame composed"
            );
            self.last_frame = Some(key);
        }

        self.platform.present()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
