//! # Input 模块
//!
//! 定义宿主向引擎传递的输入事件。
//!
//! ## 设计说明
//!
//! - 引擎不直接处理指针/键盘/窗口事件，只处理语义化的输入
//! - 拖拽样本只使用沿滚动方向的 `x` 和时间戳
//! - 防抖由宿主的尺寸通知方负责，引擎把每次 `Resize` 都当作"立即重新测量"

use serde::{Deserialize, Serialize};

use crate::layout::Measurement;

/// 拖拽样本
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragSample {
    /// 相对拖拽起点的水平位移
    pub x: f32,
    /// 相对拖拽起点的垂直位移（不使用）
    #[serde(default)]
    pub y: f32,
    /// 时间戳（毫秒）
    pub timestamp: f64,
}

impl DragSample {
    /// 创建水平样本
    pub fn new(x: f32, timestamp: f64) -> Self {
        Self {
            x,
            y: 0.0,
            timestamp,
        }
    }
}

/// 键盘输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyInput {
    /// 向左（上一项）
    Left,
    /// 向右（下一项）
    Right,
    /// 其它按键
    Other,
}

impl KeyInput {
    /// 左方向键的 key code
    pub const LEFT_KEY_CODE: u32 = 37;
    /// 右方向键的 key code
    pub const RIGHT_KEY_CODE: u32 = 39;

    /// 从 key code 转换
    pub fn from_key_code(code: u32) -> Self {
        match code {
            Self::LEFT_KEY_CODE => Self::Left,
            Self::RIGHT_KEY_CODE => Self::Right,
            _ => Self::Other,
        }
    }
}

/// 宿主向引擎传递的输入
///
/// 通过 `Carousel::handle(input)` 统一分发，也可以直接调用对应方法。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CarouselInput {
    /// 指针按下
    DragStart,
    /// 指针移动
    DragMove(DragSample),
    /// 指针抬起
    DragEnd,
    /// 按键；`focus_within` 表示焦点是否在轮播容器内
    Key { key: KeyInput, focus_within: bool },
    /// 视口或条目尺寸变化
    Resize(Measurement),
    /// 帧推进（毫秒）
    Frame { dt: f64 },
}

impl CarouselInput {
    /// 创建拖拽移动输入
    pub fn drag_move(x: f32, timestamp: f64) -> Self {
        Self::DragMove(DragSample::new(x, timestamp))
    }

    /// 创建按键输入
    pub fn key(key: KeyInput, focus_within: bool) -> Self {
        Self::Key { key, focus_within }
    }

    /// 创建帧推进输入
    pub fn frame(dt: f64) -> Self {
        Self::Frame { dt }
    }
}
