//! 离屏渲染一帧并保存为 PNG
//!
//! 用法: egg-snapshot <output.png> [config.json]

use eggache::{Egg, HeadlessPlatform, Window, WindowConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    eggache::logging::init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "snapshot.png".to_string());
    let config = match args.next() {
        Some(path) => WindowConfig::from_file(&path)?,
        None => WindowConfig::default(),
    };

    let mut window = Window::<HeadlessPlatform>::open(config)?;
    let (width, height) = window.size();
    let (width, height) = (width as i32, height as i32);

    let root = window.egg().clone();
    root.set_pen(2, 0, 0, 0)?;
    root.draw_line(0, 0, width, height)?;
    root.draw_line(0, height, width, 0)?;
    root.draw_text(16, 16, window.caption())?;

    let boxes: Vec<Egg> = (0..4)
        .map(|i| Egg::with_position(80, 80, 40 + i * 100, height / 2 - 40))
        .collect::<Result<_, _>>()?;
    for (i, egg) in boxes.iter().enumerate() {
        let shade = 60 * i as i32;
        egg.set_brush(shade, 128, 255 - shade)?;
        match i {
            0 => egg.draw_rect(0, 0, 80, 80)?,
            1 => egg.draw_ellipse(0, 0, 80, 80)?,
            2 => egg.draw_round_rect(0, 0, 80, 80, 30, 30)?,
            _ => egg.draw_pie(0, 0, 80, 80, 80, 40, 40, 0)?,
        }
        root.add_egg(egg)?;
    }

    window.refresh()?;
    window.platform().save_png(&output)?;
    println!("saved {}x{} frame to {}", width, height, output);
    Ok(())
}
