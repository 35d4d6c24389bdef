//! # State 模块
//!
//! 定义引擎的生命周期和运行时状态。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，集中在一个结构体里
//! - 所有状态必须**可序列化**（便于调试快照）
//! - 只有状态机可以写入 `position` / `index`

use serde::{Deserialize, Serialize};

/// 生命周期状态
///
/// # 状态转换
///
/// ```text
/// Uninitialized ──init──► Active ◄──resize──► Suspended
///       │                   │                    │
///       └──init(内容不溢出)──┼────────────────────┘
///                           ▼
///                       Destroyed（只有显式 init 能恢复）
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// 尚未初始化
    #[default]
    Uninitialized,
    /// 内容溢出视口，可拖拽、可动画
    Active,
    /// 内容未溢出，引擎不响应交互，但仍监听尺寸变化
    Suspended,
    /// 已被宿主销毁
    Destroyed,
}

impl LifecycleState {
    /// 是否可交互
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// 是否挂起
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// 是否已销毁
    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// 引擎运行时状态
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarouselState {
    /// 生命周期
    pub lifecycle: LifecycleState,
    /// 当前索引
    pub index: usize,
    /// 上一次操作前的索引
    pub prev_index: usize,
    /// 已提交的轨道位置，范围 `[-total_travel, 0]`
    pub position: f32,
    /// 本次拖拽的原始位移（未提交）
    pub delta: f32,
    /// 是否正在拖拽
    pub dragging: bool,
    /// 当前带选中标记的条目
    pub selected: Option<usize>,
    /// 已发出 select、尚未发出 settle 的索引
    #[serde(default)]
    pub pending_settle: Option<usize>,
}

impl CarouselState {
    /// 创建初始状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 拖拽中实际显示的位置
    pub fn live_position(&self) -> f32 {
        self.position + self.delta
    }

    /// 清空拖拽相关的瞬时状态
    pub fn clear_drag(&mut self) {
        self.delta = 0.0;
        self.dragging = false;
    }

    /// 回到未挂载时的零值，保留生命周期
    pub fn clear(&mut self) {
        *self = Self {
            lifecycle: self.lifecycle,
            ..Self::default()
        };
    }
}
