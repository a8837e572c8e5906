//! 合成器 - 把 Egg 树回放到绘制后端
//!
//! ## 遍历顺序
//!
//! 1. 从根 Egg 开始深度优先，子节点按加入顺序
//! 2. 每个 Egg 的偏移 = 父偏移 + 自身位置（根的父偏移为 (0, 0)）
//! 3. 先回放自身命令，再访问子节点，所以子节点画在父节点之上
//!
//! 不做裁剪；已经被释放的子节点直接跳过。

use std::rc::Weak;

use crate::backend::Backend;
use crate::command::{DrawCommand, Shape};
use crate::egg::{Egg, EggId};
use crate::error::DrawError;
use crate::geometry::Position;

/// 一帧的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// 访问到的 Egg 数
    pub eggs: usize,
    /// 回放成功的命令数
    pub commands: usize,
    /// 后端绘制失败的命令数
    pub failed: usize,
    /// 跳过的失效子节点引用数
    pub dangling: usize,
}

/// 帧指纹：遍历顺序上每个 Egg 的 (id, revision)
///
/// 两次指纹相同说明树的结构、位置和命令都没有变化。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameKey(Vec<Option<(EggId, u64)>>);

/// 合成整棵树
pub fn compose<B: Backend + ?Sized>(root: &Egg, backend: &mut B) -> FrameStats {
    let mut stats = FrameStats::default();
    visit(root, Position::ORIGIN, backend, &mut stats);
    stats
}

fn visit<B: Backend + ?Sized>(egg: &Egg, parent_offset: Position, backend: &mut B, stats: &mut FrameStats) {
    let state = egg.state();
    let offset = parent_offset + state.position;
    stats.eggs += 1;

    for command in &state.commands {
        match replay(command, offset, backend) {
            Ok(()) => stats.commands += 1,
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(egg = state.id.0, shape = command.shape.kind(), %err, "draw command failed");
            }
        }
    }

    for child in &state.children {
        match child.upgrade() {
            Some(child) => visit(&Egg::from_rc(child), offset, backend, stats),
            None => {
                stats.dangling += 1;
                tracing::debug!(egg = state.id.0, "skipping released child egg");
            }
        }
    }
}

/// 平移后回放一条命令
fn replay<B: Backend + ?Sized>(command: &DrawCommand, offset: Position, backend: &mut B) -> Result<(), DrawError> {
    let DrawCommand { shape, pen, brush } = command;
    match shape {
        Shape::Line { from, to } => backend.draw_line(*from + offset, *to + offset, pen),
        Shape::Rect(bounds) => backend.draw_rect(bounds.translate(offset), pen, brush),
        Shape::Ellipse(bounds) => backend.draw_ellipse(bounds.translate(offset), pen, brush),
        Shape::RoundRect { bounds, corner_width, corner_height } => {
            backend.draw_round_rect(bounds.translate(offset), *corner_width, *corner_height, pen, brush)
        }
        Shape::Arc { bounds, start, end } => {
            backend.draw_arc(bounds.translate(offset), *start + offset, *end + offset, pen)
        }
        Shape::Chord { bounds, start, end } => {
            backend.draw_chord(bounds.translate(offset), *start + offset, *end + offset, pen, brush)
        }
        Shape::Pie { bounds, start, end } => {
            backend.draw_pie(bounds.translate(offset), *start + offset, *end + offset, pen, brush)
        }
        Shape::Text { origin, text } => backend.draw_text(*origin + offset, text, pen),
        Shape::Bitmap { bitmap, dest, mask } => backend.draw_bitmap(bitmap, dest.translate(offset), *mask),
    }
}

/// 计算帧指纹，遍历顺序与 `compose` 一致
pub fn frame_key(root: &Egg) -> FrameKey {
    let mut key = Vec::new();
    fingerprint(root, &mut key);
    FrameKey(key)
}

fn fingerprint(egg: &Egg, key: &mut Vec<Option<(EggId, u64)>>) {
    let state = egg.state();
    key.push(Some((state.id, state.revision)));
    for child in state.children.iter().map(Weak::upgrade) {
        match child {
            Some(child) => fingerprint(&Egg::from_rc(child), key),
            None => key.push(None),
        }
    }
}
