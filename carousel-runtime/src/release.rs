//! # Release 模块
//!
//! 松手后的落点解析。
//!
//! ## 两个阶段
//!
//! 1. **惯性投影**：速度按固定系数逐帧衰减，累加衰减后的速度作为额外滑行距离
//! 2. **边界遍历**：从当前条目出发，总距离每超过一个条目宽度就前进一页；
//!    剩余距离超过死区才再提交一页，否则停在已经越过的边界
//!
//! 所有函数都是纯函数，只读取参数。

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::CarouselConfig;
use crate::layout::Layout;

/// 拖拽方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// 向左拖（位移为负），朝后面的条目前进
    Forward,
    /// 向右拖（位移为非负），朝前面的条目后退
    Backward,
}

impl Direction {
    /// 由拖拽位移确定方向
    pub fn from_delta(delta: f32) -> Self {
        if delta < 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// 索引的步进量
    pub fn index_step(&self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// 惯性投影：模拟速度指数衰减，返回额外滑行距离
///
/// 每个模拟帧 `v *= decay_factor` 并累加，直到 `v <= rest_velocity`。
/// `decay_factor` 不在 (0, 1) 内或速度不是有限值时没有意义，返回 0。
pub fn projected_distance(velocity: f32, decay_factor: f32, rest_velocity: f32) -> f32 {
    if !(decay_factor > 0.0 && decay_factor < 1.0) || !velocity.is_finite() {
        return 0.0;
    }

    let rest = rest_velocity.max(f32::EPSILON);
    let mut v = velocity.abs();
    let mut extra = 0.0;
    while v > rest {
        v *= decay_factor;
        extra += v;
    }
    extra
}

/// 边界遍历：根据总距离和方向解析落点索引
///
/// 最多遍历 `item_count` 步；走出 `[0, item_count - 1]` 时停在边界。
pub fn resolve_resting_index(
    distance: f32,
    direction: Direction,
    current_index: usize,
    layout: &Layout,
    dead_zone: f32,
) -> usize {
    let count = layout.item_count();
    if count == 0 {
        return 0;
    }

    let step = direction.index_step();
    let mut remaining = distance.abs();
    let mut candidate = layout.clamp_index(current_index as i64);

    for _ in 0..count {
        let size = layout.item_width(candidate);

        if remaining > size {
            let next = candidate as i64 + step;
            if next < 0 || next >= count as i64 {
                break;
            }
            remaining -= size;
            candidate = next as usize;
            continue;
        }

        if remaining > size * dead_zone {
            return layout.clamp_index(candidate as i64 + step);
        }
        break;
    }

    candidate
}

/// 松手解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// 落点索引
    pub index: usize,
    /// 拖拽方向
    pub direction: Direction,
    /// 参与遍历的总距离（拖拽距离 + 惯性距离）
    pub distance: f32,
    /// 速度是否超过甩动阈值
    pub flick: bool,
}

/// 解析一次松手
///
/// - `delta`: 本次拖拽的原始位移
/// - `velocity`: 松手时的速度（每帧位移）
pub fn resolve_release(
    delta: f32,
    velocity: f32,
    current_index: usize,
    layout: &Layout,
    config: &CarouselConfig,
) -> Release {
    let direction = Direction::from_delta(delta);
    let speed = velocity.abs();
    let flick = speed > config.flick.commit_velocity;

    let extra = if flick {
        projected_distance(speed, config.flick_decay_factor(), config.flick.rest_velocity)
    } else {
        0.0
    };
    let distance = delta.abs() + extra;
    let index = resolve_resting_index(distance, direction, current_index, layout, config.dead_zone);

    trace!(delta, velocity, extra, index, flick, "松手解析");

    Release {
        index,
        direction,
        distance,
        flick,
    }
}
