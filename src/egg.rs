//! Egg - 可嵌套的绘制面
//!
//! 一个 Egg 保存按顺序记录的绘制命令、相对父节点的位置，以及子 Egg 的弱引用。
//! 父节点不拥有子节点：子 Egg 的生命周期由持有它的调用方决定，
//! 子 Egg 被释放后父节点里留下的引用在合成时会被跳过。
//!
//! `Egg` 是句柄，`clone()` 得到的是同一个 Egg。

use std::cell::{Ref, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::bitmap::Bitmap;
use crate::command::{DrawCommand, Shape};
use crate::error::{ConstructError, DrawError, SceneError};
use crate::geometry::{Bounds, Position};
use crate::style::{Brush, Ink, Pen};
use crate::Color;

/// 单个 Egg 最多记录的命令数
pub const MAX_COMMANDS: usize = 1 << 20;

static EGG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Egg ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EggId(pub u64);

impl EggId {
    fn next() -> Self {
        Self(EGG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) struct EggState {
    pub(crate) id: EggId,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) position: Position,
    pub(crate) commands: Vec<DrawCommand>,
    pub(crate) pen: Pen,
    pub(crate) brush: Brush,
    pub(crate) children: Vec<Weak<RefCell<EggState>>>,
    /// 每次影响画面的修改都会递增
    pub(crate) revision: u64,
}

impl EggState {
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// 位图粘贴参数
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BitmapPlacement {
    pub x: i32,
    pub y: i32,
    /// None 表示使用位图原始宽度
    pub width: Option<u32>,
    /// None 表示使用位图原始高度
    pub height: Option<u32>,
    /// 与该颜色相同的像素视为透明
    pub mask: Option<Color>,
}

impl BitmapPlacement {
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, ..Default::default() }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_mask(mut self, mask: Color) -> Self {
        self.mask = Some(mask);
        self
    }

    /// r/g/b 形式的遮罩色，任一分量为 -1 表示不使用遮罩
    pub fn mask_from(r: i32, g: i32, b: i32) -> Result<Option<Color>, DrawError> {
        Ok(Ink::from_channels(r, g, b)?.color())
    }
}

/// 可嵌套的绘制面
#[derive(Clone)]
pub struct Egg {
    inner: Rc<RefCell<EggState>>,
}

impl Egg {
    /// 创建位于 (0, 0) 的 Egg
    pub fn new(width: u32, height: u32) -> Result<Self, ConstructError> {
        Self::with_position(width, height, 0, 0)
    }

    /// 创建位于 (x, y) 的 Egg
    pub fn with_position(width: u32, height: u32, x: i32, y: i32) -> Result<Self, ConstructError> {
        if width == 0 || height == 0 {
            return Err(ConstructError::EmptyEgg { width, height });
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(EggState {
                id: EggId::next(),
                width,
                height,
                position: Position::new(x, y),
                commands: Vec::new(),
                pen: Pen::default(),
                brush: Brush::default(),
                children: Vec::new(),
                revision: 0,
            })),
        })
    }

    pub(crate) fn from_rc(inner: Rc<RefCell<EggState>>) -> Self {
        Self { inner }
    }

    pub(crate) fn state(&self) -> Ref<'_, EggState> {
        self.inner.borrow()
    }

    pub fn id(&self) -> EggId {
        self.inner.borrow().id
    }

    pub fn x(&self) -> i32 {
        self.inner.borrow().position.x
    }

    pub fn y(&self) -> i32 {
        self.inner.borrow().position.y
    }

    pub fn position(&self) -> Position {
        self.inner.borrow().position
    }

    pub fn size(&self) -> (u32, u32) {
        let state = self.inner.borrow();
        (state.width, state.height)
    }

    /// 移动到 (x, y)
    pub fn move_to(&self, x: i32, y: i32) {
        let mut state = self.inner.borrow_mut();
        state.position = Position::new(x, y);
        state.touch();
    }

    /// 相对移动
    pub fn move_by(&self, dx: i32, dy: i32) {
        let mut state = self.inner.borrow_mut();
        state.position += Position::new(dx, dy);
        state.touch();
    }

    // ==================== 子节点 ====================

    /// 追加子 Egg，同一个子 Egg 可以加入多次
    ///
    /// 加入自身或自己的祖先会形成环，返回 `SceneError::Cycle`。
    pub fn add_egg(&self, child: &Egg) -> Result<(), SceneError> {
        if child.reaches(&self.inner) {
            return Err(SceneError::Cycle);
        }
        let mut state = self.inner.borrow_mut();
        state.children.retain(|weak| weak.strong_count() > 0);
        state.children.push(Rc::downgrade(&child.inner));
        state.touch();
        Ok(())
    }

    /// 移除第一个与 `child` 相同的子节点，不存在时什么也不做
    pub fn remove_egg(&self, child: &Egg) {
        let target = Rc::downgrade(&child.inner);
        let mut state = self.inner.borrow_mut();
        if let Some(index) = state.children.iter().position(|weak| weak.ptr_eq(&target)) {
            state.children.remove(index);
            state.touch();
        }
    }

    /// 仍然存活的子 Egg，按加入顺序
    pub fn children(&self) -> Vec<Egg> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(Weak::upgrade)
            .map(Egg::from_rc)
            .collect()
    }

    fn reaches(&self, target: &Rc<RefCell<EggState>>) -> bool {
        if Rc::ptr_eq(&self.inner, target) {
            return true;
        }
        let state = self.inner.borrow();
        state
            .children
            .iter()
            .filter_map(Weak::upgrade)
            .any(|child| Egg::from_rc(child).reaches(target))
    }

    // ==================== 样式 ====================

    /// 设置画笔，任一分量为 -1 时画笔透明
    pub fn set_pen(&self, width: u32, r: i32, g: i32, b: i32) -> Result<(), DrawError> {
        let ink = Ink::from_channels(r, g, b)?;
        self.set_pen_style(Pen::new(width, ink));
        Ok(())
    }

    /// 设置画刷，任一分量为 -1 时画刷透明
    pub fn set_brush(&self, r: i32, g: i32, b: i32) -> Result<(), DrawError> {
        let ink = Ink::from_channels(r, g, b)?;
        self.set_brush_style(Brush::new(ink));
        Ok(())
    }

    pub fn set_pen_style(&self, pen: Pen) {
        self.inner.borrow_mut().pen = pen;
    }

    pub fn set_brush_style(&self, brush: Brush) {
        self.inner.borrow_mut().brush = brush;
    }

    pub fn pen(&self) -> Pen {
        self.inner.borrow().pen
    }

    pub fn brush(&self) -> Brush {
        self.inner.borrow().brush
    }

    // ==================== 绘制 ====================

    pub fn draw_line(&self, x_beg: i32, y_beg: i32, x_end: i32, y_end: i32) -> Result<(), DrawError> {
        self.record(Shape::Line {
            from: Position::new(x_beg, y_beg),
            to: Position::new(x_end, y_end),
        })
    }

    pub fn draw_rect(&self, x_beg: i32, y_beg: i32, x_end: i32, y_end: i32) -> Result<(), DrawError> {
        self.record(Shape::Rect(Bounds::new(x_beg, y_beg, x_end, y_end)))
    }

    /// 内切于矩形的椭圆
    pub fn draw_ellipse(&self, x_beg: i32, y_beg: i32, x_end: i32, y_end: i32) -> Result<(), DrawError> {
        self.record(Shape::Ellipse(Bounds::new(x_beg, y_beg, x_end, y_end)))
    }

    /// 圆角矩形，`corner_width` / `corner_height` 是圆角椭圆的宽高
    pub fn draw_round_rect(
        &self,
        x_beg: i32,
        y_beg: i32,
        x_end: i32,
        y_end: i32,
        corner_width: i32,
        corner_height: i32,
    ) -> Result<(), DrawError> {
        if corner_width < 0 || corner_height < 0 {
            return Err(DrawError::InvalidCorner {
                width: corner_width,
                height: corner_height,
            });
        }
        self.record(Shape::RoundRect {
            bounds: Bounds::new(x_beg, y_beg, x_end, y_end),
            corner_width,
            corner_height,
        })
    }

    /// 椭圆弧，从射线 (x_beg, y_beg) 逆时针到射线 (x_end, y_end)
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &self,
        left: i32, top: i32, right: i32, bottom: i32,
        x_beg: i32, y_beg: i32, x_end: i32, y_end: i32,
    ) -> Result<(), DrawError> {
        self.record(Shape::Arc {
            bounds: Bounds::new(left, top, right, bottom),
            start: Position::new(x_beg, y_beg),
            end: Position::new(x_end, y_end),
        })
    }

    /// 弓形：弧线加连接两端的弦
    #[allow(clippy::too_many_arguments)]
    pub fn draw_chord(
        &self,
        left: i32, top: i32, right: i32, bottom: i32,
        x_beg: i32, y_beg: i32, x_end: i32, y_end: i32,
    ) -> Result<(), DrawError> {
        self.record(Shape::Chord {
            bounds: Bounds::new(left, top, right, bottom),
            start: Position::new(x_beg, y_beg),
            end: Position::new(x_end, y_end),
        })
    }

    /// 扇形
    #[allow(clippy::too_many_arguments)]
    pub fn draw_pie(
        &self,
        left: i32, top: i32, right: i32, bottom: i32,
        x_beg: i32, y_beg: i32, x_end: i32, y_end: i32,
    ) -> Result<(), DrawError> {
        self.record(Shape::Pie {
            bounds: Bounds::new(left, top, right, bottom),
            start: Position::new(x_beg, y_beg),
            end: Position::new(x_end, y_end),
        })
    }

    /// 文字，(x_beg, y_beg) 为左上角
    pub fn draw_text(&self, x_beg: i32, y_beg: i32, text: &str) -> Result<(), DrawError> {
        self.record(Shape::Text {
            origin: Position::new(x_beg, y_beg),
            text: text.to_string(),
        })
    }

    /// 按原始尺寸粘贴位图
    pub fn draw_bitmap(&self, path: impl AsRef<Path>, x: i32, y: i32) -> Result<(), DrawError> {
        self.draw_bitmap_with(path, BitmapPlacement::at(x, y))
    }

    /// 粘贴位图，可拉伸并指定遮罩色
    pub fn draw_bitmap_with(&self, path: impl AsRef<Path>, placement: BitmapPlacement) -> Result<(), DrawError> {
        let bitmap = Bitmap::open(path)?;
        let width = i32::try_from(placement.width.unwrap_or(bitmap.width())).unwrap_or(i32::MAX);
        let height = i32::try_from(placement.height.unwrap_or(bitmap.height())).unwrap_or(i32::MAX);
        self.record(Shape::Bitmap {
            bitmap: Arc::new(bitmap),
            dest: Bounds::from_origin(Position::new(placement.x, placement.y), width, height),
            mask: placement.mask,
        })
    }

    /// 清空所有命令并恢复默认样式，子节点保留
    pub fn clear(&self) {
        let mut state = self.inner.borrow_mut();
        state.commands.clear();
        state.pen = Pen::default();
        state.brush = Brush::default();
        state.touch();
    }

    /// 已记录的命令
    pub fn commands(&self) -> Ref<'_, [DrawCommand]> {
        Ref::map(self.inner.borrow(), |state| state.commands.as_slice())
    }

    pub fn command_count(&self) -> usize {
        self.inner.borrow().commands.len()
    }

    fn record(&self, shape: Shape) -> Result<(), DrawError> {
        let mut state = self.inner.borrow_mut();
        if state.commands.len() >= MAX_COMMANDS {
            return Err(DrawError::CommandLimit(MAX_COMMANDS));
        }
        let command = DrawCommand {
            shape,
            pen: state.pen,
            brush: state.brush,
        };
        state.commands.push(command);
        state.touch();
        Ok(())
    }
}

/// 按身份比较
impl PartialEq for Egg {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Egg {}

impl fmt::Debug for Egg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(state) => f
                .debug_struct("Egg")
                .field("id", &state.id)
                .field("size", &(state.width, state.height))
                .field("position", &state.position)
                .field("commands", &state.commands.len())
                .field("children", &state.children.len())
                .finish(),
            Err(_) => f.debug_struct("Egg").finish_non_exhaustive(),
        }
    }
}
