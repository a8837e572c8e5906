//! EggAche 演示程序
//!
//! 点击窗口：在点击位置盖一个红色印章
//! 键盘输入：字符追加到底部文字栏
//! 小球自己在窗口里来回弹

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use eggache::{show_message_box, Egg, Window};

const FRAME: Duration = Duration::from_millis(16);
const BALL_SIZE: i32 = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    eggache::logging::init();

    let mut window = Window::new(1000, 750, "Hello EggAche")?;
    let (width, height) = window.size();
    let (width, height) = (width as i32, height as i32);

    // 背景
    let bg = window.egg().clone();
    bg.set_brush(240, 240, 240)?;
    bg.set_pen(1, -1, -1, -1)?;
    bg.draw_rect(0, 0, width, height)?;
    bg.set_pen(1, 0, 0, 0)?;
    bg.draw_text(20, 20, "Click anywhere, or type something.")?;
    bg.set_pen(2, 0, 120, 215)?;
    bg.draw_round_rect(10, 10, width - 10, height - 10, 24, 24)?;

    // 小球
    let ball = Egg::with_position(BALL_SIZE as u32, BALL_SIZE as u32, 100, 100)?;
    ball.set_pen(1, 0, 80, 160)?;
    ball.set_brush(0, 160, 255)?;
    ball.draw_ellipse(0, 0, BALL_SIZE, BALL_SIZE)?;
    bg.add_egg(&ball)?;

    // 饼图装饰
    let pie = Egg::with_position(120, 120, width - 160, 40)?;
    pie.set_brush(255, 200, 0)?;
    pie.draw_pie(0, 0, 120, 120, 120, 60, 60, 0)?;
    pie.set_brush(80, 200, 120)?;
    pie.draw_chord(0, 0, 120, 120, 60, 0, 0, 60)?;
    pie.set_pen(3, 200, 0, 0)?;
    pie.draw_arc(0, 0, 120, 120, 0, 60, 120, 60)?;
    bg.add_egg(&pie)?;

    // 文字栏
    let typed = Rc::new(RefCell::new(String::new()));
    let text_bar = Egg::with_position((width - 40) as u32, 30, 20, height - 50)?;
    bg.add_egg(&text_bar)?;

    // 印章由回调创建，这里保存强引用
    let stamps: Rc<RefCell<Vec<Egg>>> = Rc::new(RefCell::new(Vec::new()));

    {
        let bg = bg.clone();
        let stamps = stamps.clone();
        window.on_click(move |x, y| {
            let stamp = match Egg::with_position(20, 20, x - 10, y - 10) {
                Ok(stamp) => stamp,
                Err(err) => {
                    tracing::warn!(%err, "failed to create stamp");
                    return;
                }
            };
            let drawn = stamp
                .set_brush(220, 40, 40)
                .and_then(|_| stamp.set_pen(1, -1, -1, -1))
                .and_then(|_| stamp.draw_ellipse(0, 0, 20, 20));
            if let Err(err) = drawn {
                tracing::warn!(%err, "failed to draw stamp");
                return;
            }
            if bg.add_egg(&stamp).is_ok() {
                stamps.borrow_mut().push(stamp);
            }
        });
    }

    {
        let typed = typed.clone();
        let text_bar = text_bar.clone();
        window.on_key_press(move |ch| {
            let mut typed = typed.borrow_mut();
            if ch == '\u{8}' {
                typed.pop();
            } else if !ch.is_control() {
                typed.push(ch);
            }
            text_bar.clear();
            if let Err(err) = text_bar.draw_text(0, 4, &typed) {
                tracing::warn!(%err, "failed to draw typed text");
            }
        });
    }

    let (mut dx, mut dy) = (4, 3);
    while !window.is_closed() {
        let (x, y) = (ball.x(), ball.y());
        if x + dx < 0 || x + dx + BALL_SIZE > width {
            dx = -dx;
        }
        if y + dy < 0 || y + dy + BALL_SIZE > height {
            dy = -dy;
        }
        ball.move_by(dx, dy);

        window.refresh()?;
        std::thread::sleep(FRAME);
    }

    let message = format!(
        "{} stamps, {} characters typed.",
        stamps.borrow().len(),
        typed.borrow().chars().count()
    );
    show_message_box(&message, "Bye EggAche");
    Ok(())
}
