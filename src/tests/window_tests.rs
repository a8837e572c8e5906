//! 窗口单元测试
//! 构造检查、刷新流程、关闭后行为、事件分发

use std::cell::RefCell;
use std::rc::Rc;

use super::{Call, FailingPlatform, RecordingPlatform, PLATFORM_OPENS};
use crate::config::WindowConfig;
use crate::egg::Egg;
use crate::error::{ConstructError, PlatformError};
use crate::event::{EventBridge, InputEvent};
use crate::geometry::Bounds;
use crate::platform::HeadlessPlatform;
use crate::window::Window;
use crate::Color;

fn recording_window(width: u32, height: u32) -> Window<RecordingPlatform> {
    Window::open(WindowConfig::new(width, height, "test")).unwrap()
}

// ==================== 构造 ====================

#[test]
fn test_too_small_fails_before_platform_opens() {
    let before = PLATFORM_OPENS.with(|opens| opens.get());

    let result = Window::<RecordingPlatform>::open(WindowConfig::new(100, 750, "small"));
    assert!(matches!(
        result,
        Err(ConstructError::WindowTooSmall { width: 100, height: 750, min_width: 240, min_height: 120 })
    ));
    assert!(Window::<RecordingPlatform>::open(WindowConfig::new(240, 119, "short")).is_err());

    assert_eq!(PLATFORM_OPENS.with(|opens| opens.get()), before);
}

#[test]
fn test_bad_background_fails_before_platform_opens() {
    let before = PLATFORM_OPENS.with(|opens| opens.get());

    let mut config = WindowConfig::new(640, 480, "pink");
    config.background_color = "#12345".to_string();
    let result = Window::<RecordingPlatform>::open(config);
    assert!(matches!(
        result,
        Err(ConstructError::InvalidBackground(c)) if c == "#12345"
    ));

    assert_eq!(PLATFORM_OPENS.with(|opens| opens.get()), before);
}

#[test]
fn test_minimum_size_is_accepted() {
    let window = recording_window(240, 120);
    assert_eq!(window.size(), (240, 120));
    assert_eq!(window.egg().size(), (240, 120));
    assert_eq!(window.caption(), "test");
}

#[test]
fn test_platform_failure_is_construct_error() {
    let result = Window::<FailingPlatform>::open(WindowConfig::default());
    assert!(matches!(
        result,
        Err(ConstructError::Platform(PlatformError::CreateWindow(_)))
    ));
}

// ==================== 刷新 ====================

#[test]
fn test_scenario_child_rect_is_translated() {
    let mut window = recording_window(1000, 750);
    let bg = window.egg().clone();
    let a = Egg::with_position(10, 10, 50, 50).unwrap();
    a.draw_rect(0, 0, 10, 10).unwrap();
    bg.add_egg(&a).unwrap();

    window.refresh().unwrap();

    let platform = window.platform();
    assert_eq!(platform.presents, 1);
    assert_eq!(platform.recorder.calls[0], Call::Clear(Color::WHITE));
    let draws = platform.recorder.draws();
    assert_eq!(draws.len(), 1);
    assert!(matches!(
        draws[0],
        Call::Rect { bounds, .. } if *bounds == Bounds::new(50, 50, 60, 60)
    ));
}

#[test]
fn test_unchanged_frame_is_not_recomposed() {
    let mut window = recording_window(300, 200);
    window.egg().draw_line(0, 0, 10, 10).unwrap();

    window.refresh().unwrap();
    window.refresh().unwrap();
    assert_eq!(window.platform().presents, 2);
    assert_eq!(window.platform().recorder.draws().len(), 1);

    window.egg().move_by(1, 1);
    window.refresh().unwrap();
    assert_eq!(window.platform().recorder.draws().len(), 2);

    // 平台要求重绘（例如窗口尺寸变化）
    window.platform_mut().repaint = true;
    window.refresh().unwrap();
    assert_eq!(window.platform().recorder.draws().len(), 3);
    assert_eq!(window.platform().presents, 4);
}

#[test]
fn test_closed_window_refresh_does_not_present() {
    let mut window = recording_window(300, 200);
    window.egg().draw_line(0, 0, 10, 10).unwrap();
    window.platform_mut().closed = true;
    assert!(window.is_closed());

    assert!(window.refresh().is_ok());
    assert!(window.refresh().is_ok());
    assert_eq!(window.platform().presents, 0);
    assert!(window.platform().recorder.calls.is_empty());
}

#[test]
fn test_background_color_from_config() {
    let config = WindowConfig {
        background_color: "#102030".to_string(),
        ..WindowConfig::new(300, 200, "bg")
    };
    let mut window = Window::<RecordingPlatform>::open(config).unwrap();
    window.refresh().unwrap();
    assert_eq!(
        window.platform().recorder.calls[0],
        Call::Clear(Color::rgb(0x10, 0x20, 0x30))
    );
}

// ==================== 事件 ====================

#[test]
fn test_click_handler_can_mutate_eggs() {
    let mut window = recording_window(300, 200);
    let marker = Egg::new(5, 5).unwrap();
    marker.draw_rect(0, 0, 5, 5).unwrap();
    window.egg().add_egg(&marker).unwrap();

    let target = marker.clone();
    window.on_click(move |x, y| target.move_to(x, y));
    window.platform_mut().pending.push(InputEvent::Click { x: 40, y: 70 });

    window.refresh().unwrap();
    assert_eq!(marker.position().x, 40);
    assert!(matches!(
        window.platform().recorder.draws()[0],
        Call::Rect { bounds, .. } if *bounds == Bounds::new(40, 70, 45, 75)
    ));
}

#[test]
fn test_key_press_routed_in_order() {
    let mut window = recording_window(300, 200);
    let typed = Rc::new(RefCell::new(String::new()));
    let sink = typed.clone();
    window.on_key_press(move |ch| sink.borrow_mut().push(ch));

    window.platform_mut().pending.extend("egg".chars().map(InputEvent::KeyPress));
    window.pump_events();
    assert_eq!(typed.borrow().as_str(), "egg");
}

#[test]
fn test_events_without_handler_are_dropped() {
    let mut window = recording_window(300, 200);
    let clicks = Rc::new(RefCell::new(0));
    window.platform_mut().pending.push(InputEvent::Click { x: 1, y: 1 });
    window.pump_events();

    // 事件不会积压到注册回调之后
    let counter = clicks.clone();
    window.on_click(move |_, _| *counter.borrow_mut() += 1);
    window.pump_events();
    assert_eq!(*clicks.borrow(), 0);

    window.clear_handlers();
    window.platform_mut().pending.push(InputEvent::Click { x: 1, y: 1 });
    window.pump_events();
    assert_eq!(*clicks.borrow(), 0);
}

#[test]
fn test_event_bridge_replaces_handler() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let mut bridge = EventBridge::new();

    let first = hits.clone();
    bridge.set_click_handler(move |x, _| first.borrow_mut().push(("first", x)));
    let second = hits.clone();
    bridge.set_click_handler(move |x, _| second.borrow_mut().push(("second", x)));

    assert!(bridge.dispatch(InputEvent::Click { x: 3, y: 4 }));
    assert!(!bridge.dispatch(InputEvent::KeyPress('a')));
    assert_eq!(*hits.borrow(), vec![("second", 3)]);
}

// ==================== 离屏平台 ====================

#[test]
fn test_headless_frame_has_pixels() {
    let mut window = Window::<HeadlessPlatform>::open(WindowConfig::new(240, 120, "headless")).unwrap();
    let child = Egg::with_position(20, 20, 100, 50).unwrap();
    child.set_pen(1, -1, -1, -1).unwrap();
    child.set_brush(255, 0, 0).unwrap();
    child.draw_rect(0, 0, 20, 20).unwrap();
    window.egg().add_egg(&child).unwrap();

    window.refresh().unwrap();

    let frame = window.platform().frame();
    assert_eq!(frame.get_pixel(110, 60), Color::RED);
    assert_eq!(frame.get_pixel(10, 10), Color::WHITE);
    assert_eq!(window.platform().present_count(), 1);
}

#[test]
fn test_headless_close_and_injected_events() {
    let mut window = Window::<HeadlessPlatform>::open(WindowConfig::new(240, 120, "headless")).unwrap();
    let clicked = Rc::new(RefCell::new(None));
    let sink = clicked.clone();
    window.on_click(move |x, y| *sink.borrow_mut() = Some((x, y)));

    window.platform_mut().push_event(InputEvent::Click { x: 7, y: 9 });
    window.refresh().unwrap();
    assert_eq!(*clicked.borrow(), Some((7, 9)));

    window.platform_mut().close();
    window.refresh().unwrap();
    assert!(window.is_closed());
    assert_eq!(window.platform().present_count(), 1);
}

#[test]
fn test_headless_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut window = Window::<HeadlessPlatform>::open(WindowConfig::new(240, 120, "png")).unwrap();
    window.egg().set_brush(0, 0, 255).unwrap();
    window.egg().draw_rect(0, 0, 240, 120).unwrap();
    window.refresh().unwrap();
    window.platform().save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (240, 120));
    assert_eq!(img.get_pixel(120, 60).0, [0, 0, 255, 255]);
}
