//! 软件光栅化单元测试
//! 通过 Backend 接口检查画布像素

use crate::backend::Backend;
use crate::bitmap::Bitmap;
use crate::geometry::{Bounds, Position};
use crate::style::{Brush, Ink, Pen};
use crate::text::TextRenderer;
use crate::{Canvas, Color};

fn white_canvas() -> Canvas {
    let mut canvas = Canvas::new(64, 64);
    canvas.clear(Color::WHITE);
    canvas
}

/// Canvas 有同名的固有方法，测试统一走 Backend 接口
fn backend(canvas: &mut Canvas) -> &mut dyn Backend {
    canvas
}

fn solid(color: Color) -> Ink {
    Ink::Solid(color)
}

fn no_pen() -> Pen {
    Pen::new(1, Ink::Transparent)
}

#[test]
fn test_rect_fill_then_outline() {
    let mut canvas = white_canvas();
    backend(&mut canvas)
        .draw_rect(Bounds::new(10, 10, 30, 30), &Pen::default(), &Brush::new(solid(Color::RED)))
        .unwrap();

    assert_eq!(canvas.get_pixel(20, 20), Color::RED);
    assert_eq!(canvas.get_pixel(10, 10), Color::BLACK);
    assert_eq!(canvas.get_pixel(29, 20), Color::BLACK);
    assert_eq!(canvas.get_pixel(31, 20), Color::WHITE);
}

#[test]
fn test_rect_corners_may_be_swapped() {
    let mut canvas = white_canvas();
    backend(&mut canvas)
        .draw_rect(Bounds::new(30, 30, 10, 10), &no_pen(), &Brush::new(solid(Color::BLUE)))
        .unwrap();
    assert_eq!(canvas.get_pixel(15, 15), Color::BLUE);
}

#[test]
fn test_transparent_style_draws_nothing() {
    let mut canvas = white_canvas();
    let pen = no_pen();
    let brush = Brush::default();
    backend(&mut canvas).draw_rect(Bounds::new(0, 0, 64, 64), &pen, &brush).unwrap();
    canvas.draw_ellipse(Bounds::new(0, 0, 64, 64), &pen, &brush).unwrap();
    backend(&mut canvas).draw_line(Position::new(0, 0), Position::new(63, 63), &pen).unwrap();
    canvas.draw_text(Position::new(0, 0), "invisible", &pen).unwrap();

    assert!(canvas.pixels().iter().all(|&p| p == Color::WHITE));
}

#[test]
fn test_horizontal_line_uses_pen_color() {
    let mut canvas = white_canvas();
    let pen = Pen::new(1, solid(Color::GREEN));
    backend(&mut canvas).draw_line(Position::new(5, 8), Position::new(40, 8), &pen).unwrap();

    assert_eq!(canvas.get_pixel(20, 8), Color::GREEN);
    assert_eq!(canvas.get_pixel(20, 20), Color::WHITE);
}

#[test]
fn test_line_far_outside_canvas_is_clipped() {
    let mut canvas = white_canvas();
    let pen = Pen::default();
    backend(&mut canvas)
        .draw_line(Position::new(-100_000_000, -100_000_000), Position::new(100_000_000, 100_000_000), &pen)
        .unwrap();
    // 完全在画布外
    backend(&mut canvas)
        .draw_line(Position::new(-100_000_000, -10), Position::new(100_000_000, -10), &pen)
        .unwrap();

    for i in [0, 20, 63] {
        assert_ne!(canvas.get_pixel(i, i), Color::WHITE, "pixel ({}, {})", i, i);
    }
    assert_eq!(canvas.get_pixel(40, 10), Color::WHITE);
    assert_eq!(canvas.get_pixel(40, 0), Color::WHITE);
}

#[test]
fn test_thick_pen_covers_more_rows() {
    let mut thin = white_canvas();
    let mut thick = white_canvas();
    backend(&mut thin).draw_line(Position::new(5, 30), Position::new(60, 30), &Pen::new(1, solid(Color::BLACK)))
        .unwrap();
    backend(&mut thick).draw_line(Position::new(5, 30), Position::new(60, 30), &Pen::new(6, solid(Color::BLACK)))
        .unwrap();

    let dark = |canvas: &Canvas| (0..64).filter(|&y| canvas.get_pixel(30, y) != Color::WHITE).count();
    assert!(dark(&thick) > dark(&thin));
    assert!(dark(&thick) >= 5);
}

#[test]
fn test_ellipse_is_inscribed() {
    let mut canvas = white_canvas();
    canvas
        .draw_ellipse(Bounds::new(0, 0, 40, 40), &no_pen(), &Brush::new(solid(Color::GREEN)))
        .unwrap();

    assert_eq!(canvas.get_pixel(20, 20), Color::GREEN);
    assert_eq!(canvas.get_pixel(1, 1), Color::WHITE);
    assert_eq!(canvas.get_pixel(50, 20), Color::WHITE);
}

#[test]
fn test_pie_sweeps_counter_clockwise() {
    let mut canvas = white_canvas();
    // 从 0° 逆时针到 90°：右上四分之一
    canvas
        .draw_pie(
            Bounds::new(0, 0, 40, 40),
            Position::new(40, 20),
            Position::new(20, 0),
            &no_pen(),
            &Brush::new(solid(Color::RED)),
        )
        .unwrap();

    assert_eq!(canvas.get_pixel(28, 12), Color::RED);
    assert_eq!(canvas.get_pixel(12, 28), Color::WHITE);
    assert_eq!(canvas.get_pixel(12, 12), Color::WHITE);
    assert_eq!(canvas.get_pixel(28, 28), Color::WHITE);
}

#[test]
fn test_chord_with_equal_radials_is_full_ellipse() {
    let mut canvas = white_canvas();
    let radial = Position::new(40, 20);
    canvas
        .draw_chord(Bounds::new(0, 0, 40, 40), radial, radial, &no_pen(), &Brush::new(solid(Color::BLUE)))
        .unwrap();

    for (x, y) in [(12, 12), (28, 12), (12, 28), (28, 28)] {
        assert_eq!(canvas.get_pixel(x, y), Color::BLUE, "pixel ({}, {})", x, y);
    }
}

#[test]
fn test_arc_does_not_fill() {
    let mut canvas = white_canvas();
    canvas
        .draw_arc(Bounds::new(0, 0, 40, 40), Position::new(40, 20), Position::new(40, 20), &Pen::default())
        .unwrap();

    assert_eq!(canvas.get_pixel(20, 20), Color::WHITE);
    assert!(canvas.pixels().iter().any(|&p| p != Color::WHITE));
}

#[test]
fn test_round_rect_corner_is_cut() {
    let mut canvas = white_canvas();
    canvas
        .draw_round_rect(Bounds::new(0, 0, 40, 40), 20, 20, &no_pen(), &Brush::new(solid(Color::RED)))
        .unwrap();

    assert_eq!(canvas.get_pixel(20, 20), Color::RED);
    assert_eq!(canvas.get_pixel(0, 0), Color::WHITE);
    assert_eq!(canvas.get_pixel(20, 1), Color::RED);
}

#[test]
fn test_bitmap_stretch_and_mask() {
    // 2x1：左红右品红，品红作为遮罩
    let magenta = Color::rgb(255, 0, 255);
    let data: [u8; 8] = [255, 0, 0, 255, 255, 0, 255, 255];
    let bitmap = Bitmap::from_rgba(&data, 2, 1);

    let mut canvas = white_canvas();
    backend(&mut canvas)
        .draw_bitmap(&bitmap, Bounds::new(10, 10, 30, 20), Some(magenta))
        .unwrap();

    assert_eq!(canvas.get_pixel(12, 15), Color::RED);
    assert_eq!(canvas.get_pixel(25, 15), Color::WHITE);
    assert_eq!(canvas.get_pixel(12, 25), Color::WHITE);
}

#[test]
fn test_bitmap_without_mask_is_opaque() {
    let data = [0u8, 0, 255, 255].repeat(4);
    let bitmap = Bitmap::from_rgba(&data, 2, 2);

    let mut canvas = white_canvas();
    backend(&mut canvas).draw_bitmap(&bitmap, Bounds::new(0, 0, 8, 8), None).unwrap();
    assert_eq!(canvas.get_pixel(4, 4), Color::BLUE);
    assert_eq!(canvas.get_pixel(9, 9), Color::WHITE);
}

#[test]
fn test_text_uses_pen_color_when_font_available() {
    if TextRenderer::system().is_none() {
        return;
    }
    let mut canvas = white_canvas();
    canvas
        .draw_text(Position::new(2, 2), "EGG", &Pen::new(1, solid(Color::RED)))
        .unwrap();

    let inked: Vec<Color> = canvas.pixels().iter().copied().filter(|&p| p != Color::WHITE).collect();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|p| p.r == 255));
    // 文字在原点右下方
    for y in 0..2 {
        for x in 0..64 {
            assert_eq!(canvas.get_pixel(x, y), Color::WHITE);
        }
    }
}

#[test]
fn test_save_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.png");
    let mut canvas = white_canvas();
    backend(&mut canvas)
        .draw_rect(Bounds::new(0, 0, 8, 8), &no_pen(), &Brush::new(solid(Color::GREEN)))
        .unwrap();
    canvas.save_png(&path).unwrap();

    let loaded = Bitmap::open(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (64, 64));
    assert_eq!(loaded.pixel(4, 4), Color::GREEN);
    assert_eq!(loaded.pixel(40, 40), Color::WHITE);
    assert_eq!(loaded.source(), path.as_path());
}
