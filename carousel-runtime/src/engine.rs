//! # Engine 模块
//!
//! 轮播状态机，负责把宿主输入编排成位置变化、渲染指令和事件。
//!
//! ## 执行模型
//!
//! ```text
//! handle(input) -> Vec<RenderDirective>
//! ```
//!
//! 1. 宿主把手势、按键、尺寸变化、帧推进转换成 `CarouselInput`
//! 2. 引擎更新状态，必要时解析落点并启动唯一的归位动画
//! 3. 动画每帧写入位置并产生 `SetOffset`
//! 4. 宿主取走本次产生的所有指令并应用到画面
//!
//! 所有修改都发生在同一条时间线上，引擎从不阻塞等待渲染。

use tracing::{debug, trace};

use crate::animation::{AnimationScheduler, Decay, Tween};
use crate::command::RenderDirective;
use crate::config::CarouselConfig;
use crate::error::CarouselResult;
use crate::event::{CarouselEvent, EventBus, EventKind, SubscriptionId};
use crate::input::{CarouselInput, DragSample, KeyInput};
use crate::layout::{ItemProvider, Layout};
use crate::release::resolve_release;
use crate::state::{CarouselState, LifecycleState};
use crate::velocity::VelocityTracker;

/// 归位动画的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// 定时缓动补间
    Tween,
    /// 几何衰减（甩动松手）
    Decay,
}

/// 是否把焦点移到新条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// 用户主动导航
    Engage,
    /// 尺寸变化引起的重新归位
    Skip,
}

/// 动画回调可以访问的引擎数据
#[derive(Debug, Default)]
struct EngineCore {
    state: CarouselState,
    layout: Layout,
    directives: Vec<RenderDirective>,
    events: EventBus,
}

impl EngineCore {
    fn push(&mut self, directive: RenderDirective) {
        self.directives.push(directive);
    }

    fn emit(&mut self, event: CarouselEvent) {
        debug!(?event, "事件");
        self.events.emit(event);
    }

    /// 写入已提交位置并通知渲染
    fn set_position(&mut self, position: f32) {
        self.state.position = position;
        self.push(RenderDirective::offset(position));
    }

    /// 把选中标记移到当前索引
    fn mark_selected(&mut self) {
        let index = self.state.index;
        if self.state.selected == Some(index) {
            return;
        }
        if let Some(previous) = self.state.selected {
            self.push(RenderDirective::SetSelected {
                item_index: previous,
                selected: false,
            });
        }
        self.push(RenderDirective::SetSelected {
            item_index: index,
            selected: true,
        });
        self.state.selected = Some(index);
    }

    /// 归位动画结束
    fn finish_settle(&mut self, settled: Option<usize>) {
        self.state.clear_drag();
        self.state.pending_settle = None;
        if let Some(index) = settled {
            self.emit(CarouselEvent::Settle { index });
        }
    }
}

/// 轮播引擎
///
/// 独占当前索引、位置、布局和唯一的动画槽位。
///
/// # 使用示例
///
/// ```ignore
/// let mut carousel = Carousel::new();
/// carousel.subscribe(EventKind::Settle, |event| println!("{event:?}"));
/// carousel.init(&Measurement::from_widths(320.0, &[300.0, 300.0, 300.0]));
///
/// loop {
///     for directive in carousel.handle(next_input()) {
///         renderer.apply(directive);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    core: EngineCore,
    scheduler: AnimationScheduler<EngineCore>,
    tracker: VelocityTracker,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Carousel {
    /// 使用默认配置创建引擎
    pub fn new() -> Self {
        Self::build(CarouselConfig::default())
    }

    /// 使用自定义配置创建引擎
    pub fn with_config(config: CarouselConfig) -> CarouselResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CarouselConfig) -> Self {
        let tracker = VelocityTracker::new(config.frame_interval_ms);
        Self {
            config,
            core: EngineCore::default(),
            scheduler: AnimationScheduler::new(),
            tracker,
        }
    }

    // ========== 查询 ==========

    /// 当前索引
    pub fn index(&self) -> usize {
        self.core.state.index
    }

    /// 已提交的轨道位置
    pub fn position(&self) -> f32 {
        self.core.state.position
    }

    /// 生命周期状态
    pub fn lifecycle(&self) -> LifecycleState {
        self.core.state.lifecycle
    }

    /// 是否可交互
    pub fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }

    /// 是否挂起（内容未溢出）
    pub fn is_suspended(&self) -> bool {
        self.lifecycle().is_suspended()
    }

    /// 是否已销毁
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle().is_destroyed()
    }

    /// 是否有归位动画在播放
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_active()
    }

    /// 是否正在拖拽
    pub fn is_dragging(&self) -> bool {
        self.core.state.dragging
    }

    /// 当前布局
    pub fn layout(&self) -> &Layout {
        &self.core.layout
    }

    /// 运行时状态快照
    pub fn state(&self) -> &CarouselState {
        &self.core.state
    }

    /// 当前配置
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    // ========== 事件与指令 ==========

    /// 订阅事件
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&CarouselEvent) + 'static,
    ) -> SubscriptionId {
        self.core.events.subscribe(kind, callback)
    }

    /// 取消订阅
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.core.events.unsubscribe(id)
    }

    /// 取走目前为止产生的渲染指令
    pub fn take_directives(&mut self) -> Vec<RenderDirective> {
        std::mem::take(&mut self.core.directives)
    }

    /// 统一输入入口
    ///
    /// 分发输入并返回本次（以及之前未取走的）渲染指令。
    pub fn handle(&mut self, input: CarouselInput) -> Vec<RenderDirective> {
        match input {
            CarouselInput::DragStart => self.drag_start(),
            CarouselInput::DragMove(sample) => self.drag_move(sample),
            CarouselInput::DragEnd => self.drag_end(),
            CarouselInput::Key { key, focus_within } => self.key(key, focus_within),
            CarouselInput::Resize(measurement) => self.resize(&measurement),
            CarouselInput::Frame { dt } => {
                self.tick(dt);
            }
        }
        self.take_directives()
    }

    // ========== 生命周期 ==========

    /// 初始化
    ///
    /// 内容溢出视口时挂载并进入 Active，否则进入 Suspended。
    /// 已销毁的引擎可以通过再次 `init` 恢复。
    pub fn init(&mut self, provider: &impl ItemProvider) {
        if self.is_active() {
            trace!("已经处于 Active，忽略 init");
            return;
        }

        self.reset();
        self.core.state.clear();
        self.core.layout = Layout::measure(provider);

        if self.core.layout.is_scrollable() {
            self.mount(self.config.initial_index);
        } else {
            self.suspend();
        }
    }

    /// 销毁
    ///
    /// 幂等：未初始化或已销毁时什么也不做。
    pub fn destroy(&mut self) {
        match self.lifecycle() {
            LifecycleState::Uninitialized | LifecycleState::Destroyed => {
                trace!(lifecycle = ?self.lifecycle(), "忽略 destroy");
                return;
            }
            LifecycleState::Active => self.teardown(),
            LifecycleState::Suspended => {}
        }

        self.core.state.clear();
        self.core.layout = Layout::default();
        self.core.state.lifecycle = LifecycleState::Destroyed;
        debug!("已销毁");
        self.core.emit(CarouselEvent::Destroy);
    }

    /// 视口或条目尺寸变化
    ///
    /// 重新测量并重新评估 Active / Suspended；保持 Active 时重新归位到当前索引，
    /// 不移动焦点，也不触发 select。被打断的导航动画会在新的归位结束时补发 settle。
    pub fn resize(&mut self, provider: &impl ItemProvider) {
        match self.lifecycle() {
            LifecycleState::Uninitialized | LifecycleState::Destroyed => {
                trace!(lifecycle = ?self.lifecycle(), "忽略 resize");
                return;
            }
            LifecycleState::Active | LifecycleState::Suspended => {}
        }

        self.core.layout = Layout::measure(provider);

        if !self.core.layout.is_scrollable() {
            if self.is_active() {
                self.teardown();
            }
            self.suspend();
            return;
        }

        if self.is_suspended() {
            self.mount(self.config.initial_index);
            return;
        }

        self.reset();
        let layout = &self.core.layout;
        let state = &mut self.core.state;
        state.index = layout.clamp_index(state.index as i64);
        state.prev_index = state.index;
        state.position = layout.clamp_position(state.position);
        // 被移除的条目不再需要取消选中
        if state.selected.is_some_and(|selected| selected >= layout.item_count()) {
            state.selected = None;
        }
        self.reflow();
        self.settle(Strategy::Tween, Focus::Skip);
    }

    /// 挂载到指定索引并进入 Active
    fn mount(&mut self, index: usize) {
        let layout = &self.core.layout;
        let index = layout.clamp_index(i64::try_from(index).unwrap_or(i64::MAX));
        let position = layout.position_for_index(index);

        let state = &mut self.core.state;
        state.lifecycle = LifecycleState::Active;
        state.index = index;
        state.prev_index = index;

        self.reflow();
        self.core.push(RenderDirective::SetFocusable { focusable: true });
        self.core.mark_selected();
        self.core.set_position(position);

        debug!(
            index,
            items = self.core.layout.item_count(),
            travel = self.core.layout.total_travel(),
            "挂载完成"
        );
        self.core.emit(CarouselEvent::Init { index });
    }

    /// 重新放置条目并同步高度
    fn reflow(&mut self) {
        let offsets = self.core.layout.offsets().to_vec();
        self.core.push(RenderDirective::PlaceItems { offsets });

        if self.config.set_height {
            let height = self.core.layout.item_height(self.core.state.index);
            self.core.push(RenderDirective::SetHeight {
                height: Some(height),
            });
        }
    }

    /// 卸载：还原条目、移除属性、清零索引与位置
    fn teardown(&mut self) {
        self.reset();

        if let Some(item_index) = self.core.state.selected {
            self.core.push(RenderDirective::SetSelected {
                item_index,
                selected: false,
            });
        }
        self.core.push(RenderDirective::SetFocusable { focusable: false });
        if self.config.set_height {
            self.core.push(RenderDirective::SetHeight { height: None });
        }
        self.core.push(RenderDirective::Unmount);

        self.core.state.clear();
        debug!("已卸载");
    }

    fn suspend(&mut self) {
        self.core.state.lifecycle = LifecycleState::Suspended;
        debug!(
            items = self.core.layout.item_count(),
            viewport = self.core.layout.viewport_size(),
            "内容未溢出，挂起"
        );
    }

    /// 停止动画并清空拖拽瞬时状态
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.tracker.reset();
        self.core.state.clear_drag();
    }

    // ========== 导航 ==========

    /// 选中指定索引
    ///
    /// 越界会被钳制；与当前索引相同时什么也不做。
    pub fn select(&mut self, index: usize) {
        if !self.is_active() {
            trace!(index, "未激活，忽略 select");
            return;
        }

        let target = self
            .core
            .layout
            .clamp_index(i64::try_from(index).unwrap_or(i64::MAX));
        if target == self.core.state.index {
            return;
        }

        self.reset();
        let state = &mut self.core.state;
        state.prev_index = state.index;
        state.index = target;

        self.core.emit(CarouselEvent::Select { index: target });
        self.settle(Strategy::Tween, Focus::Engage);
    }

    /// 上一项
    pub fn prev(&mut self) {
        self.select(self.index().saturating_sub(1));
    }

    /// 下一项
    pub fn next(&mut self) {
        self.select(self.index().saturating_add(1));
    }

    /// 键盘导航（只在焦点位于轮播内时生效）
    pub fn key(&mut self, key: KeyInput, focus_within: bool) {
        if !focus_within {
            return;
        }
        match key {
            KeyInput::Left => self.prev(),
            KeyInput::Right => self.next(),
            KeyInput::Other => {}
        }
    }

    // ========== 拖拽 ==========

    /// 指针按下
    ///
    /// 打断正在播放的归位动画，从当前显示的位置继续拖拽。
    pub fn drag_start(&mut self) {
        if !self.is_active() {
            return;
        }

        if self.scheduler.is_active() {
            debug!(position = self.core.state.position, "拖拽打断动画");
        }
        self.reset();
        self.core.state.dragging = true;
    }

    /// 指针移动
    ///
    /// 只更新显示位置，已提交的 `position` 在松手时才改变。
    pub fn drag_move(&mut self, sample: DragSample) {
        if !self.is_active() {
            return;
        }
        if !self.core.state.dragging {
            self.drag_start();
        }

        self.tracker.on_sample(sample.x, sample.timestamp);
        self.core.state.delta = sample.x;

        let live = self.core.layout.clamp_position(self.core.state.live_position());
        self.core.push(RenderDirective::offset(live));
    }

    /// 指针抬起
    ///
    /// 提交位移，解析落点，发出 select 并启动归位动画。
    pub fn drag_end(&mut self) {
        if !self.is_active() {
            return;
        }

        let delta = self.core.state.delta;
        let velocity = self.tracker.velocity();
        self.tracker.reset();

        let release = resolve_release(
            delta,
            velocity,
            self.core.state.index,
            &self.core.layout,
            &self.config,
        );

        let layout = &self.core.layout;
        let state = &mut self.core.state;
        state.position = layout.clamp_position(state.position + delta);
        state.clear_drag();
        state.prev_index = state.index;
        state.index = release.index;

        debug!(
            delta,
            velocity,
            from = self.core.state.prev_index,
            to = release.index,
            flick = release.flick,
            "松手"
        );

        if self.core.state.prev_index != release.index {
            self.core.emit(CarouselEvent::Select {
                index: release.index,
            });
        }

        let strategy = if release.flick {
            Strategy::Decay
        } else {
            Strategy::Tween
        };
        self.settle(strategy, Focus::Engage);
    }

    // ========== 动画 ==========

    /// 推进动画 `dt` 毫秒
    ///
    /// 返回是否仍有动画在播放。
    pub fn tick(&mut self, dt: f64) -> bool {
        self.scheduler.tick(&mut self.core, dt)
    }

    /// 从当前位置归位到当前索引的边界
    fn settle(&mut self, strategy: Strategy, focus: Focus) {
        self.core.mark_selected();

        let index = self.core.state.index;
        let changed = self.core.state.prev_index != index;
        // 被打断的同索引归位沿用尚未发出的 settle
        let settled = if changed {
            Some(index)
        } else {
            self.core.state.pending_settle.filter(|&pending| pending == index)
        };
        self.core.state.pending_settle = settled;
        if changed && focus == Focus::Engage {
            self.core
                .push(RenderDirective::FocusItem { item_index: index });
        }

        let from = self.core.state.position;
        let to = self.core.layout.position_for_index(index);
        let bound = self.core.layout.total_travel();

        let on_frame = |core: &mut EngineCore, value: f32| core.set_position(value);
        let on_complete = move |core: &mut EngineCore| core.finish_settle(settled);

        match strategy {
            Strategy::Tween => {
                let tween = Tween::new(from, to, self.config.settle_duration_ms)
                    .with_easing(self.config.easing)
                    .with_bound(bound);
                let started =
                    self.scheduler
                        .tween(&mut self.core, tween, on_frame, on_complete);
                if started.is_none() {
                    self.core.state.pending_settle = None;
                    self.reset();
                }
            }
            Strategy::Decay => {
                if to.abs() > bound {
                    self.core.state.pending_settle = None;
                    self.reset();
                    return;
                }
                let decay = Decay::new(
                    self.config.decay_settle.step,
                    self.config.decay_settle.rest_distance,
                )
                .with_interval(self.config.frame_interval_ms);
                self.scheduler
                    .decay_settle(&mut self.core, from, to, decay, on_frame, on_complete);
            }
        }
    }
}
