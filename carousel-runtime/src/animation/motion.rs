//! # Motion 模块
//!
//! 单个动画实例：补间（Tween）或几何衰减（Decay）。
//!
//! 动画只关注一个 f32 值随时间的变化，不关心谁在使用它。

use super::Easing;

/// 动画句柄
///
/// 由 `AnimationScheduler` 分配，用于取消动画。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 补间参数
///
/// 在 `duration` 毫秒内把值从 `from` 按缓动函数变化到 `to`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 动画时长（毫秒）
    pub duration: f64,
    /// 缓动函数
    pub easing: Easing,
    /// 目标值绝对值的上限（可滚动总距离）
    pub bound: Option<f32>,
}

impl Tween {
    /// 创建补间
    pub fn new(from: f32, to: f32, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            easing: Easing::default(),
            bound: None,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// 设置目标值上限
    pub fn with_bound(mut self, bound: f32) -> Self {
        self.bound = Some(bound);
        self
    }

    /// 目标是否超出上限
    pub fn exceeds_bound(&self) -> bool {
        self.bound.is_some_and(|bound| self.to.abs() > bound)
    }

    /// 起点即终点，或时长为 0
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to || self.duration <= 0.0
    }
}

/// 衰减参数
///
/// 每经过 `interval` 毫秒，剩余距离乘以 `1 - step`；
/// 剩余距离小于 `rest_distance` 时吸附到目标。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// 每步移除的剩余距离比例
    pub step: f32,
    /// 吸附阈值
    pub rest_distance: f32,
    /// 步进间隔（毫秒）
    pub interval: f64,
}

impl Decay {
    /// 创建衰减参数（默认 60 步/秒）
    pub fn new(step: f32, rest_distance: f32) -> Self {
        Self {
            step: step.clamp(f32::EPSILON, 1.0),
            rest_distance: rest_distance.max(f32::EPSILON),
            interval: 1000.0 / 60.0,
        }
    }

    /// 设置步进间隔
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = interval.max(f64::EPSILON);
        self
    }
}

/// 动画推进结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    /// 当前值
    pub value: f32,
    /// 是否已到达终点
    pub finished: bool,
}

/// 正在播放的动画
#[derive(Debug, Clone)]
pub(crate) enum Motion {
    Tween {
        tween: Tween,
        elapsed: f64,
    },
    Decay {
        to: f32,
        remaining: f32,
        decay: Decay,
        /// 尚未消耗的时间
        carry: f64,
    },
}

impl Motion {
    pub(crate) fn tween(tween: Tween) -> Self {
        Self::Tween {
            tween,
            elapsed: 0.0,
        }
    }

    pub(crate) fn decay(from: f32, to: f32, decay: Decay) -> Self {
        Self::Decay {
            to,
            remaining: to - from,
            decay,
            carry: 0.0,
        }
    }

    /// 目标值
    pub(crate) fn target(&self) -> f32 {
        match self {
            Self::Tween { tween, .. } => tween.to,
            Self::Decay { to, .. } => *to,
        }
    }

    /// 无需播放即可结束
    pub(crate) fn is_settled(&self) -> bool {
        match self {
            Self::Tween { tween, .. } => tween.is_degenerate(),
            Self::Decay {
                remaining, decay, ..
            } => remaining.abs() < decay.rest_distance,
        }
    }

    /// 推进 `dt` 毫秒
    pub(crate) fn advance(&mut self, dt: f64) -> Step {
        match self {
            Self::Tween { tween, elapsed } => {
                *elapsed += dt.max(0.0);
                let finished = *elapsed >= tween.duration;
                let value = tween
                    .easing
                    .interpolate(*elapsed, tween.duration, tween.from, tween.to);
                Step { value, finished }
            }
            Self::Decay {
                to,
                remaining,
                decay,
                carry,
            } => {
                *carry += dt.max(0.0);
                while *carry >= decay.interval && remaining.abs() >= decay.rest_distance {
                    *carry -= decay.interval;
                    *remaining *= 1.0 - decay.step;
                }

                if remaining.abs() < decay.rest_distance {
                    *remaining = 0.0;
                    Step {
                        value: *to,
                        finished: true,
                    }
                } else {
                    Step {
                        value: *to - *remaining,
                        finished: false,
                    }
                }
            }
        }
    }
}
