//! # Layout 模块
//!
//! 条目布局模型：根据条目尺寸和视口宽度推导每个条目的边界偏移与可滚动总距离。
//!
//! ```text
//! offsets:   0      100        250
//!            ├──────┼──────────┼──────────────┤
//! widths:     100      150          200
//! viewport:  ├──────┤ 100
//! travel:    100 + 150 + 200 - 100 = 350
//! ```

use serde::{Deserialize, Serialize};

/// 条目尺寸（由宿主测量）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemSize {
    /// 沿滚动方向的宽度
    pub width: f32,
    /// 高度（仅用于 `SetHeight`）
    #[serde(default)]
    pub height: f32,
}

impl ItemSize {
    /// 创建条目尺寸
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 只关心宽度的条目
    pub fn width(width: f32) -> Self {
        Self { width, height: 0.0 }
    }
}

/// 条目提供者
///
/// 宿主在挂载和每次尺寸变化时由引擎调用，返回当前测量结果。
/// 条目数量必须与实际渲染的子元素一致，引擎不做校验。
pub trait ItemProvider {
    /// 视口宽度
    fn viewport_width(&self) -> f32;

    /// 按顺序返回所有条目的尺寸
    fn item_sizes(&self) -> Vec<ItemSize>;
}

/// 一次测量的快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// 视口宽度
    pub viewport_width: f32,
    /// 条目尺寸
    pub items: Vec<ItemSize>,
}

impl Measurement {
    /// 创建测量快照
    pub fn new(viewport_width: f32, items: Vec<ItemSize>) -> Self {
        Self {
            viewport_width,
            items,
        }
    }

    /// 只给出宽度的快照
    pub fn from_widths(viewport_width: f32, widths: &[f32]) -> Self {
        Self::new(
            viewport_width,
            widths.iter().copied().map(ItemSize::width).collect(),
        )
    }
}

impl ItemProvider for Measurement {
    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn item_sizes(&self) -> Vec<ItemSize> {
        self.items.clone()
    }
}

/// 布局结果
///
/// 纯派生值，重新计算不会产生任何副作用。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    viewport_size: f32,
    items: Vec<ItemSize>,
    offsets: Vec<f32>,
    total_travel: f32,
}

impl Layout {
    /// 计算布局
    pub fn compute(items: &[ItemSize], viewport_size: f32) -> Self {
        let mut offsets = Vec::with_capacity(items.len());
        let mut sum = 0.0_f32;
        for item in items {
            offsets.push(sum);
            sum += item.width;
        }

        Self {
            viewport_size,
            items: items.to_vec(),
            offsets,
            total_travel: (sum - viewport_size).max(0.0),
        }
    }

    /// 从条目提供者计算布局
    pub fn measure(provider: &impl ItemProvider) -> Self {
        Self::compute(&provider.item_sizes(), provider.viewport_width())
    }

    /// 条目数量
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 视口宽度
    pub fn viewport_size(&self) -> f32 {
        self.viewport_size
    }

    /// 可滚动总距离
    pub fn total_travel(&self) -> f32 {
        self.total_travel
    }

    /// 内容是否超出视口
    pub fn is_scrollable(&self) -> bool {
        self.total_travel > 0.0
    }

    /// 每个条目相对轨道起点的边界偏移
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// 条目宽度（越界返回 0）
    pub fn item_width(&self, index: usize) -> f32 {
        self.items.get(index).map_or(0.0, |item| item.width)
    }

    /// 条目高度（越界返回 0）
    pub fn item_height(&self, index: usize) -> f32 {
        self.items.get(index).map_or(0.0, |item| item.height)
    }

    /// 把索引钳制到 `[0, item_count - 1]`，没有条目时返回 0
    pub fn clamp_index(&self, index: i64) -> usize {
        let last = self.items.len().saturating_sub(1) as i64;
        index.clamp(0, last) as usize
    }

    /// 索引对应的轨道位置
    ///
    /// 偏移超过可滚动距离的条目停在 `-total_travel`；
    /// 最后一个条目总是停在 `-total_travel`，保证轨道末端能与视口右缘对齐。
    pub fn position_for_index(&self, index: usize) -> f32 {
        let index = self.clamp_index(index as i64);
        let offset = if index + 1 >= self.items.len() {
            self.total_travel
        } else {
            self.offsets[index].min(self.total_travel)
        };
        // 0.0 - x 避免产生 -0.0
        0.0 - offset
    }

    /// 把位置钳制到 `[-total_travel, 0]`
    pub fn clamp_position(&self, position: f32) -> f32 {
        position.clamp(0.0 - self.total_travel, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_items() -> Layout {
        Layout::measure(&Measurement::from_widths(100.0, &[100.0, 150.0, 200.0]))
    }

    #[test]
    fn test_offsets_and_travel() {
        let layout = three_items();
        insta::assert_debug_snapshot!(layout.offsets(), @r"
        [
            0.0,
            100.0,
            250.0,
        ]
        ");
        assert_eq!(layout.total_travel(), 350.0);
        assert!(layout.is_scrollable());
    }

    #[test]
    fn test_position_for_index() {
        let layout = three_items();
        assert_eq!(layout.position_for_index(0), 0.0);
        assert_eq!(layout.position_for_index(1), -100.0);
        assert_eq!(layout.position_for_index(2), -350.0);
    }

    #[test]
    fn test_first_position_is_positive_zero() {
        let layout = three_items();
        assert!(layout.position_for_index(0).is_sign_positive());
    }

    #[test]
    fn test_last_position_clamped_to_travel() {
        // 视口 300：travel = 150，第 2 项的偏移 250 超出
        let layout = Layout::compute(
            &[100.0, 150.0, 200.0].map(ItemSize::width),
            300.0,
        );
        assert_eq!(layout.total_travel(), 150.0);
        assert_eq!(layout.position_for_index(1), -100.0);
        assert_eq!(layout.position_for_index(2), -150.0);
    }

    #[test]
    fn test_positions_monotonic() {
        let layout = Layout::compute(
            &[120.0, 80.0, 300.0, 40.0, 90.0].map(ItemSize::width),
            200.0,
        );
        let positions: Vec<f32> = (0..layout.item_count())
            .map(|i| layout.position_for_index(i))
            .collect();
        assert!(positions.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(
            positions.last().copied().map(f32::abs),
            Some(layout.total_travel())
        );
    }

    #[test]
    fn test_content_fits() {
        let layout = Layout::compute(&[50.0, 40.0].map(ItemSize::width), 100.0);
        assert_eq!(layout.total_travel(), 0.0);
        assert!(!layout.is_scrollable());
        assert_eq!(layout.position_for_index(1), 0.0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = Layout::compute(&[], 100.0);
        assert_eq!(layout.item_count(), 0);
        assert_eq!(layout.total_travel(), 0.0);
        assert_eq!(layout.clamp_index(5), 0);
        assert_eq!(layout.position_for_index(0), 0.0);
    }

    #[test]
    fn test_clamp() {
        let layout = three_items();
        assert_eq!(layout.clamp_index(-1), 0);
        assert_eq!(layout.clamp_index(7), 2);
        assert_eq!(layout.clamp_position(20.0), 0.0);
        assert_eq!(layout.clamp_position(-400.0), -350.0);
    }

    #[test]
    fn test_idempotent() {
        let items = [100.0, 150.0, 200.0].map(ItemSize::width);
        assert_eq!(Layout::compute(&items, 100.0), Layout::compute(&items, 100.0));
    }
}
