//! 事件系统 - 平台输入到用户回调的桥接
//!
//! 平台把输入整理成 `InputEvent` 排队，窗口在合成之外逐个分发，
//! 回调里可以直接修改 Egg。

/// 平台输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// 鼠标点击，窗口逻辑坐标
    Click { x: i32, y: i32 },
    /// 字符输入
    KeyPress(char),
}

type ClickHandler = Box<dyn FnMut(i32, i32)>;
type KeyPressHandler = Box<dyn FnMut(char)>;

/// 事件桥：每类事件一个回调槽位
#[derive(Default)]
pub struct EventBridge {
    on_click: Option<ClickHandler>,
    on_key_press: Option<KeyPressHandler>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册点击回调，替换之前的回调
    pub fn set_click_handler<F>(&mut self, handler: F)
    where
        F: FnMut(i32, i32) + 'static,
    {
        self.on_click = Some(Box::new(handler));
    }

    /// 注册字符输入回调，替换之前的回调
    pub fn set_key_press_handler<F>(&mut self, handler: F)
    where
        F: FnMut(char) + 'static,
    {
        self.on_key_press = Some(Box::new(handler));
    }

    pub fn clear(&mut self) {
        self.on_click = None;
        self.on_key_press = None;
    }

    /// 分发一个事件，没有回调时丢弃。返回是否有回调处理。
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        match (event, &mut self.on_click, &mut self.on_key_press) {
            (InputEvent::Click { x, y }, Some(handler), _) => {
                handler(x, y);
                true
            }
            (InputEvent::KeyPress(ch), _, Some(handler)) => {
                handler(ch);
                true
            }
            (event, _, _) => {
                tracing::trace!(?event, "no handler registered, event dropped");
                false
            }
        }
    }
}
