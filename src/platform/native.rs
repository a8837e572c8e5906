//! 原生平台 - winit 窗口 + softbuffer 呈现
//!
//! 事件循环不独占线程：每次 `poll_events` 用 `pump_app_events` 非阻塞地处理
//! 积压的平台消息，所以回调总是在调用方线程上、合成之外执行。
//!
//! 画布使用逻辑尺寸，呈现时按窗口实际像素尺寸最近邻缩放。

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::Platform;
use crate::config::WindowConfig;
use crate::error::PlatformError;
use crate::event::InputEvent;
use crate::Canvas;

/// 打开窗口时最多等待的事件循环轮数
const OPEN_ATTEMPTS: usize = 100;
const OPEN_POLL: Duration = Duration::from_millis(10);

type SoftSurface = softbuffer::Surface<Arc<Window>, Arc<Window>>;

// 字段按声明顺序释放：窗口和 surface 要先于事件循环释放
pub struct NativePlatform {
    state: NativeState,
    canvas: Canvas,
    event_loop: EventLoop<()>,
}

struct NativeState {
    title: String,
    width: u32,
    height: u32,
    resizable: bool,
    window: Option<Arc<Window>>,
    surface: Option<SoftSurface>,
    events: Vec<InputEvent>,
    cursor: (f64, f64),
    closed: bool,
    repaint: bool,
    error: Option<PlatformError>,
}

impl NativeState {
    fn new(config: &WindowConfig) -> Self {
        Self {
            title: config.caption.clone(),
            width: config.width,
            height: config.height,
            resizable: config.resizable,
            window: None,
            surface: None,
            events: Vec::new(),
            cursor: (0.0, 0.0),
            closed: false,
            repaint: true,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::CreateWindow(e.to_string()))?;
        let window = Arc::new(window);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        tracing::info!(width = self.width, height = self.height, title = %self.title, "window created");
        self.window = Some(window);
        self.surface = Some(surface);
        self.repaint = true;
        Ok(())
    }

    /// 释放 OS 窗口
    fn mark_closed(&mut self) {
        if !self.closed {
            tracing::info!(title = %self.title, "window closed");
        }
        self.closed = true;
        self.surface = None;
        self.window = None;
    }

    /// 物理像素坐标 → 逻辑坐标
    fn to_logical(&self, x: f64, y: f64) -> (i32, i32) {
        let size = match &self.window {
            Some(window) => window.inner_size(),
            None => return (x as i32, y as i32),
        };
        if size.width == 0 || size.height == 0 {
            return (x as i32, y as i32);
        }
        (
            (x * self.width as f64 / size.width as f64) as i32,
            (y * self.height as f64 / size.height as f64) as i32,
        )
    }
}

impl ApplicationHandler for NativeState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.closed {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            tracing::error!(%err, "failed to create window");
            self.error = Some(err);
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.mark_closed(),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.to_logical(self.cursor.0, self.cursor.1);
                self.events.push(InputEvent::Click { x, y });
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Some(text) = &event.text {
                    self.events.extend(text.chars().map(InputEvent::KeyPress));
                }
            }

            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. }
            | WindowEvent::RedrawRequested => {
                self.repaint = true;
            }

            _ => {}
        }
    }
}

impl NativePlatform {
    fn pump(&mut self, timeout: Duration) {
        let status = self.event_loop.pump_app_events(Some(timeout), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.state.mark_closed();
        }
    }
}

impl Platform for NativePlatform {
    type Target = Canvas;

    fn open(config: &WindowConfig) -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        let mut platform = Self {
            event_loop,
            state: NativeState::new(config),
            canvas: Canvas::new(config.width, config.height),
        };

        // 窗口在 resumed 回调里创建
        for _ in 0..OPEN_ATTEMPTS {
            platform.pump(OPEN_POLL);
            if let Some(err) = platform.state.error.take() {
                return Err(err);
            }
            if platform.state.window.is_some() {
                return Ok(platform);
            }
            if platform.state.closed {
                break;
            }
        }
        Err(PlatformError::CreateWindow(
            "event loop did not create the window".to_string(),
        ))
    }

    fn target(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let (Some(window), Some(surface)) = (&self.state.window, &mut self.state.surface) else {
            return Ok(());
        };
        let size = window.inner_size();
        // 最小化时尺寸为 0
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };

        surface
            .resize(width, height)
            .map_err(|e| PlatformError::Present(e.to_string()))?;
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| PlatformError::Present(e.to_string()))?;
        blit_scaled(&self.canvas, &mut buffer, size.width, size.height);
        buffer
            .present()
            .map_err(|e| PlatformError::Present(e.to_string()))
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        if !self.state.closed {
            self.pump(Duration::ZERO);
        }
        events.append(&mut self.state.events);
    }

    fn is_closed(&self) -> bool {
        self.state.closed
    }

    fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.state.repaint)
    }
}

/// 最近邻缩放到窗口缓冲区（0x00RRGGBB）
fn blit_scaled(canvas: &Canvas, buffer: &mut [u32], buffer_width: u32, buffer_height: u32) {
    let (canvas_width, canvas_height) = (canvas.width(), canvas.height());
    if canvas_width == 0 || canvas_height == 0 {
        return;
    }
    for y in 0..buffer_height {
        let src_y = (y as u64 * canvas_height as u64 / buffer_height as u64) as u32;
        for x in 0..buffer_width {
            let src_x = (x as u64 * canvas_width as u64 / buffer_width as u64) as u32;
            let dst_idx = (y * buffer_width + x) as usize;
            if let Some(dst) = buffer.get_mut(dst_idx) {
                *dst = canvas.get_pixel(src_x, src_y).to_xrgb();
            }
        }
    }
}

/// 弹出阻塞的消息框
pub fn show_message_box(text: &str, caption: &str) {
    let _ = rfd::MessageDialog::new()
        .set_title(caption)
        .set_description(text)
        .set_level(rfd::MessageLevel::Info)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
