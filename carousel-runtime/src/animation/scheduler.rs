//! # Scheduler 模块
//!
//! 单飞动画调度器。
//!
//! 同一时间最多只有一个动画在播放，启动新动画会先取消旧动画。
//! 调度器不持有共享状态：回调在 `tick` 时拿到调用方传入的上下文 `C`，
//! 由上下文自己决定如何使用这些值。
//!
//! ```rust,ignore
//! let mut scheduler = AnimationScheduler::<Vec<f32>>::new();
//! let mut frames = Vec::new();
//!
//! scheduler.tween(
//!     &mut frames,
//!     Tween::new(0.0, -100.0, 300.0),
//!     |frames, value| frames.push(value),
//!     |frames| frames.push(f32::NAN),
//! );
//!
//! while scheduler.tick(&mut frames, 16.0) {}
//! ```

use tracing::{debug, trace};

use super::motion::{AnimationHandle, Decay, Motion, Tween};

type FrameFn<C> = Box<dyn FnMut(&mut C, f32)>;
type CompleteFn<C> = Box<dyn FnOnce(&mut C)>;

/// 正在播放的动画及其回调
struct Flight<C> {
    handle: AnimationHandle,
    motion: Motion,
    on_frame: FrameFn<C>,
    on_complete: CompleteFn<C>,
}

/// 动画调度器
///
/// 两种策略共用同一个槽位：
/// - [`tween`](Self::tween)：按缓动函数在固定时长内补间
/// - [`decay_settle`](Self::decay_settle)：按固定间隔几何衰减，最后吸附到目标
///
/// 被取消的动画不会再触发任何帧回调或完成回调；
/// 存活到结束的动画恰好触发一次完成回调。
pub struct AnimationScheduler<C> {
    active: Option<Flight<C>>,
    next_id: u64,
}

impl<C> Default for AnimationScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for AnimationScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("active", &self.active.as_ref().map(|flight| flight.handle))
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<C> AnimationScheduler<C> {
    /// 创建调度器
    pub fn new() -> Self {
        Self {
            active: None,
            next_id: 1,
        }
    }

    fn next_handle(&mut self) -> AnimationHandle {
        let handle = AnimationHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }

    /// 启动补间
    ///
    /// # 返回
    /// - `Some(handle)`: 动画已启动（或因起点即终点而已立即完成）
    /// - `None`: 目标超出 `tween.bound`，没有需要播放的动画，调用方应重置追踪状态
    #[must_use = "None 表示目标越界，调用方需要自行重置"]
    pub fn tween<F, G>(
        &mut self,
        ctx: &mut C,
        tween: Tween,
        on_frame: F,
        on_complete: G,
    ) -> Option<AnimationHandle>
    where
        F: FnMut(&mut C, f32) + 'static,
        G: FnOnce(&mut C) + 'static,
    {
        self.cancel_all();

        if tween.exceeds_bound() {
            debug!(to = tween.to, bound = ?tween.bound, "补间目标越界，跳过");
            return None;
        }

        Some(self.launch(ctx, Motion::tween(tween), on_frame, on_complete))
    }

    /// 启动衰减归位
    pub fn decay_settle<F, G>(
        &mut self,
        ctx: &mut C,
        from: f32,
        to: f32,
        decay: Decay,
        on_frame: F,
        on_complete: G,
    ) -> AnimationHandle
    where
        F: FnMut(&mut C, f32) + 'static,
        G: FnOnce(&mut C) + 'static,
    {
        self.cancel_all();
        self.launch(ctx, Motion::decay(from, to, decay), on_frame, on_complete)
    }

    fn launch<F, G>(
        &mut self,
        ctx: &mut C,
        motion: Motion,
        mut on_frame: F,
        on_complete: G,
    ) -> AnimationHandle
    where
        F: FnMut(&mut C, f32) + 'static,
        G: FnOnce(&mut C) + 'static,
    {
        let handle = self.next_handle();

        if motion.is_settled() {
            trace!(handle = handle.value(), "动画无需播放，立即完成");
            on_frame(ctx, motion.target());
            on_complete(ctx);
            return handle;
        }

        debug!(handle = handle.value(), target = motion.target(), "动画开始");
        self.active = Some(Flight {
            handle,
            motion,
            on_frame: Box::new(on_frame),
            on_complete: Box::new(on_complete),
        });
        handle
    }

    /// 推进当前动画 `dt` 毫秒
    ///
    /// # 返回
    /// - `true`: 仍有动画在播放
    /// - `false`: 没有动画，或本帧刚刚结束
    pub fn tick(&mut self, ctx: &mut C, dt: f64) -> bool {
        let Some(mut flight) = self.active.take() else {
            return false;
        };

        let step = flight.motion.advance(dt);
        (flight.on_frame)(ctx, step.value);

        if step.finished {
            debug!(handle = flight.handle.value(), "动画完成");
            (flight.on_complete)(ctx);
            false
        } else {
            self.active = Some(flight);
            true
        }
    }

    /// 取消指定动画
    ///
    /// 句柄不是当前动画（已结束或已被替换）时返回 `false`。
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        if self.active_handle() == Some(handle) {
            self.cancel_all();
            true
        } else {
            false
        }
    }

    /// 取消当前动画（如果有）
    pub fn cancel_all(&mut self) {
        if let Some(flight) = self.active.take() {
            debug!(handle = flight.handle.value(), "动画取消");
        }
    }

    /// 是否有动画在播放
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// 当前动画句柄
    pub fn active_handle(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|flight| flight.handle)
    }
}
