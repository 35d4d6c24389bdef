//! # Event 模块
//!
//! 宿主可订阅的轮播事件。
//!
//! - `Init`：引擎挂载完成（进入 Active）
//! - `Select`：导航决定一做出就触发（乐观通知）
//! - `Settle`：归位动画到达已提交的索引，且索引确实变化过
//! - `Destroy`：宿主主动销毁
//!
//! 回调在引擎方法内部同步执行，不能在回调里再调用同一个引擎。

use serde::{Deserialize, Serialize};

/// 事件类型（订阅用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Init,
    Select,
    Settle,
    Destroy,
}

/// 轮播事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselEvent {
    /// 挂载完成，`index` 为初始索引
    Init { index: usize },
    /// 选中了新的索引
    Select { index: usize },
    /// 已停靠在新的索引
    Settle { index: usize },
    /// 已销毁
    Destroy,
}

impl CarouselEvent {
    /// 事件类型
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Init { .. } => EventKind::Init,
            Self::Select { .. } => EventKind::Select,
            Self::Settle { .. } => EventKind::Settle,
            Self::Destroy => EventKind::Destroy,
        }
    }
}

/// 订阅 ID，用于取消订阅
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CarouselEvent)>;

struct Listener {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

/// 事件总线
///
/// 按订阅顺序分发事件。
pub struct EventBus {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    /// 创建事件总线
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// 订阅某类事件
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&CarouselEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// 取消订阅
    ///
    /// 订阅不存在时返回 `false`，重复取消是安全的。
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// 分发事件
    pub fn emit(&mut self, event: CarouselEvent) {
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(&event);
        }
    }

    /// 当前订阅数量
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
