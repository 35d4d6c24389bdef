//! # Animation 模块
//!
//! 位置动画系统。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个值从 A 到 B 需要多久、按什么曲线变化
//! - 每帧把当前值交给回调，由调用方决定如何使用
//! - 同一时间只允许一个动画写入位置（单飞）
//!
//! ## 核心概念
//!
//! - `Easing`: 缓动函数
//! - `Tween`: 定时补间参数
//! - `Decay`: 几何衰减参数
//! - `AnimationScheduler`: 单飞调度器，由宿主每帧 `tick`
//! - `AnimationHandle`: 可取消的动画句柄

mod easing;
mod motion;
mod scheduler;

pub use easing::Easing;
pub use motion::{AnimationHandle, Decay, Tween};
pub use scheduler::AnimationScheduler;
