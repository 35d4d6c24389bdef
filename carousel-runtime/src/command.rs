//! # Command 模块
//!
//! 定义引擎向宿主发出的所有渲染指令。
//! `RenderDirective` 是引擎与渲染层之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：指令描述"要什么结果"，不描述"怎么改 DOM / 控件"
//! - **无副作用**：指令本身不执行任何操作
//! - **渲染无关**：不包含任何具体渲染技术的类型

use serde::{Deserialize, Serialize};

/// 渲染指令
///
/// 宿主按顺序执行即可得到与引擎状态一致的画面。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderDirective {
    /// 把条目放入轨道，并按给定偏移（像素，相对轨道起点）绝对定位
    PlaceItems { offsets: Vec<f32> },

    /// 设置轨道的水平平移
    SetOffset { offset: f32 },

    /// 切换条目的选中标记
    SetSelected { item_index: usize, selected: bool },

    /// 设置容器高度；`None` 表示恢复为自适应
    SetHeight { height: Option<f32> },

    /// 容器是否可以获得键盘焦点
    SetFocusable { focusable: bool },

    /// 把焦点移到指定条目（仅用户主动导航时发出）
    FocusItem { item_index: usize },

    /// 把条目还给原容器并清除引擎添加的所有样式与属性
    Unmount,
}

impl RenderDirective {
    /// 创建平移指令
    pub fn offset(offset: f32) -> Self {
        Self::SetOffset { offset }
    }

    /// 是否为平移指令
    pub fn is_offset(&self) -> bool {
        matches!(self, Self::SetOffset { .. })
    }
}
