//! # Velocity 模块
//!
//! 拖拽速度追踪：由连续的 (位置, 时间戳) 样本估算瞬时速度。
//!
//! 速度单位是"每名义帧的位移"，让后续的衰减模拟与采样频率无关。

/// 速度追踪器
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityTracker {
    /// 名义帧间隔（毫秒）
    frame_interval: f64,
    /// 上一个样本 (x, timestamp)
    last: Option<(f32, f64)>,
    /// 当前速度
    velocity: f32,
}

impl VelocityTracker {
    /// 创建速度追踪器
    pub fn new(frame_interval: f64) -> Self {
        Self {
            frame_interval,
            last: None,
            velocity: 0.0,
        }
    }

    /// 输入一个样本，返回更新后的速度
    ///
    /// - 拖拽中的第一个样本没有参照，速度为 0
    /// - 时间没有前进的样本只更新位置，保留原速度
    /// - 间隔过小导致速度溢出为非有限值时同样保留原速度
    pub fn on_sample(&mut self, x: f32, timestamp: f64) -> f32 {
        if let Some((last_x, last_timestamp)) = self.last {
            let dt = timestamp - last_timestamp;
            if dt > 0.0 {
                let velocity = (f64::from(x - last_x) / dt * self.frame_interval) as f32;
                if velocity.is_finite() {
                    self.velocity = velocity;
                }
            }
        } else {
            self.velocity = 0.0;
        }

        self.last = Some((x, timestamp));
        self.velocity
    }

    /// 当前速度
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// 清空样本（拖拽开始、引擎重置时调用）
    pub fn reset(&mut self) {
        self.last = None;
        self.velocity = 0.0;
    }
}
