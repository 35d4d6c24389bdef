//! # Carousel Runtime
//!
//! 可拖拽、带惯性的轮播引擎核心库。
//!
//! ## 架构概述
//!
//! `carousel-runtime` 是纯逻辑核心，不依赖任何 DOM、窗口或渲染框架。
//! 它通过 **指令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── CarouselInput ──────────────►│
//!   │                                   │ 拖拽 / 松手解析 / 归位动画
//!   │◄─── Vec<RenderDirective> ────────│
//!   │                                   │
//!   │◄─── CarouselEvent（订阅回调）────│
//!   │                                   │
//! ```
//!
//! ## 核心类型
//!
//! - [`Carousel`]：状态机，持有索引、位置和唯一的动画槽位
//! - [`CarouselInput`]：Host 向 Runtime 传递的输入
//! - [`RenderDirective`]：Runtime 向 Host 发出的渲染指令
//! - [`CarouselEvent`]：init / select / settle / destroy 通知
//! - [`CarouselConfig`]：可序列化的行为参数
//!
//! ## 使用示例
//!
//! ```ignore
//! use carousel_runtime::{Carousel, CarouselInput, EventKind, Measurement};
//!
//! let mut carousel = Carousel::new();
//! carousel.subscribe(EventKind::Select, |event| println!("{event:?}"));
//! carousel.init(&Measurement::from_widths(320.0, &[300.0, 300.0, 300.0]));
//!
//! // 主循环
//! loop {
//!     let input = match host.poll() {
//!         Some(input) => input,
//!         None => CarouselInput::frame(16.0),
//!     };
//!     for directive in carousel.handle(input) {
//!         host.apply(directive);
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`layout`]：条目测量与位置推导
//! - [`velocity`]：拖拽速度追踪
//! - [`release`]：松手落点解析
//! - [`animation`]：缓动、补间、衰减与单飞调度器
//! - [`engine`]：状态机
//! - [`command`] / [`input`] / [`event`]：与宿主通信的类型
//! - [`config`] / [`error`]：配置与错误

pub mod animation;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod layout;
pub mod release;
pub mod state;
pub mod velocity;

// 重导出核心类型
pub use animation::{AnimationHandle, AnimationScheduler, Decay, Easing, Tween};
pub use command::RenderDirective;
pub use config::{CarouselConfig, DecaySettleConfig, FlickConfig};
pub use engine::Carousel;
pub use error::{CarouselError, CarouselResult, ConfigError};
pub use event::{CarouselEvent, EventBus, EventKind, SubscriptionId};
pub use input::{CarouselInput, DragSample, KeyInput};
pub use layout::{ItemProvider, ItemSize, Layout, Measurement};
pub use release::{Direction, Release, resolve_release, resolve_resting_index};
pub use state::{CarouselState, LifecycleState};
pub use velocity::VelocityTracker;
