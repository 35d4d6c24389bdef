//! # Easing 模块
//!
//! 缓动函数：把经过的时间映射为插值结果，无状态。

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// 线性（匀速）
    Linear,
    /// 二次缓出
    EaseOutQuad,
    /// 三次缓出
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 正弦缓出
    EaseOutSine,
    /// 指数缓出（开始很快，末端迅速收敛）
    #[default]
    EaseOutExpo,
}

impl Easing {
    /// 计算缓动进度
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被钳制
    ///
    /// # 返回
    /// - 缓动后的进度值，`apply(0.0) == 0.0`，`apply(1.0) == 1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseOutSine => (t * PI / 2.0).sin(),
            Self::EaseOutExpo => ease_out_expo(t),
        }
    }

    /// 按经过时间插值
    ///
    /// `elapsed >= duration` 时精确返回 `to`，`duration <= 0` 视为已结束。
    pub fn interpolate(&self, elapsed: f64, duration: f64, from: f32, to: f32) -> f32 {
        if duration <= 0.0 || elapsed >= duration {
            return to;
        }
        from + (to - from) * self.apply((elapsed / duration) as f32)
    }
}

/// 指数缓出，末端精确落在 1.0
fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}
