//! # 轮播流程集成测试
//!
//! 模拟一个宿主：把输入交给引擎，再把渲染指令应用到一个假的轨道模型上。
//! 这些测试不依赖任何真实的渲染环境。

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use carousel_runtime::{
    Carousel, CarouselConfig, CarouselEvent, CarouselInput, EventKind, ItemSize, KeyInput,
    Measurement, RenderDirective,
};

/// 假的渲染层
#[derive(Debug, Default, PartialEq)]
struct FakeTrack {
    mounted: bool,
    item_offsets: Vec<f32>,
    offset: f32,
    selected: BTreeSet<usize>,
    height: Option<f32>,
    focusable: bool,
    focused: Option<usize>,
}

impl FakeTrack {
    fn apply(&mut self, directive: RenderDirective) {
        match directive {
            RenderDirective::PlaceItems { offsets } => {
                self.mounted = true;
                self.item_offsets = offsets;
            }
            RenderDirective::SetOffset { offset } => self.offset = offset,
            RenderDirective::SetSelected {
                item_index,
                selected,
            } => {
                if selected {
                    self.selected.insert(item_index);
                } else {
                    self.selected.remove(&item_index);
                }
            }
            RenderDirective::SetHeight { height } => self.height = height,
            RenderDirective::SetFocusable { focusable } => self.focusable = focusable,
            RenderDirective::FocusItem { item_index } => self.focused = Some(item_index),
            RenderDirective::Unmount => {
                *self = FakeTrack::default();
            }
        }
    }
}

/// 宿主：引擎 + 假渲染层 + 事件记录
struct Host {
    carousel: Carousel,
    track: FakeTrack,
    events: Rc<RefCell<Vec<CarouselEvent>>>,
}

impl Host {
    fn new() -> Self {
        Self::with_carousel(Carousel::new())
    }

    fn with_carousel(mut carousel: Carousel) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::Init,
            EventKind::Select,
            EventKind::Settle,
            EventKind::Destroy,
        ] {
            let sink = Rc::clone(&events);
            carousel.subscribe(kind, move |event| sink.borrow_mut().push(*event));
        }
        Self {
            carousel,
            track: FakeTrack::default(),
            events,
        }
    }

    fn flush(&mut self) {
        for directive in self.carousel.take_directives() {
            self.track.apply(directive);
        }
    }

    fn send(&mut self, input: CarouselInput) {
        for directive in self.carousel.handle(input) {
            self.track.apply(directive);
        }
    }

    fn init(&mut self, measurement: &Measurement) {
        self.carousel.init(measurement);
        self.flush();
    }

    /// 逐帧推进直到动画结束
    fn run_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.carousel.is_animating() {
            self.send(CarouselInput::frame(16.0));
            frames += 1;
            assert!(frames < 1000, "动画应该结束");
        }
        frames
    }

    fn drag(&mut self, samples: &[(f32, f64)]) {
        self.send(CarouselInput::DragStart);
        for &(x, timestamp) in samples {
            self.send(CarouselInput::drag_move(x, timestamp));
        }
        self.send(CarouselInput::DragEnd);
    }

    fn events(&self) -> Vec<CarouselEvent> {
        self.events.borrow().clone()
    }

    fn settles(&self) -> Vec<CarouselEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.kind() == EventKind::Settle)
            .collect()
    }
}

fn wide_items() -> Measurement {
    Measurement::new(
        100.0,
        vec![
            ItemSize::new(200.0, 80.0),
            ItemSize::new(200.0, 120.0),
            ItemSize::new(200.0, 90.0),
        ],
    )
}

/// 测试挂载后的画面
#[test]
fn test_mount_renders_track() {
    let mut host = Host::new();
    host.init(&wide_items());

    assert!(host.track.mounted);
    assert_eq!(host.track.item_offsets, vec![0.0, 200.0, 400.0]);
    assert_eq!(host.track.offset, 0.0);
    assert_eq!(host.track.selected, BTreeSet::from([0]));
    assert_eq!(host.track.height, Some(80.0));
    assert!(host.track.focusable);
    assert_eq!(host.events(), vec![CarouselEvent::Init { index: 0 }]);
}

/// 测试慢速拖拽：越过死区后翻到下一项
#[test]
fn test_slow_drag_commits_next_item() {
    let mut host = Host::new();
    host.init(&wide_items());

    host.drag(&[(-10.0, 0.0), (-40.0, 1000.0)]);
    assert_eq!(host.carousel.index(), 1);
    assert_eq!(host.track.offset, -40.0);

    host.run_frames();

    assert_eq!(host.track.offset, -200.0);
    assert_eq!(host.track.selected, BTreeSet::from([1]));
    assert_eq!(host.track.focused, Some(1));
    assert_eq!(
        host.events(),
        vec![
            CarouselEvent::Init { index: 0 },
            CarouselEvent::Select { index: 1 },
            CarouselEvent::Settle { index: 1 },
        ]
    );
}

/// 测试拖拽中只改变显示位置
#[test]
fn test_drag_is_live_until_release() {
    let mut host = Host::new();
    host.init(&wide_items());

    host.send(CarouselInput::DragStart);
    host.send(CarouselInput::drag_move(-25.0, 0.0));
    assert_eq!(host.track.offset, -25.0);
    assert_eq!(host.carousel.position(), 0.0);

    // 拖拽中帧推进不会移动轨道
    host.send(CarouselInput::frame(16.0));
    assert_eq!(host.track.offset, -25.0);

    host.send(CarouselInput::drag_move(-10.0, 500.0));
    host.send(CarouselInput::DragEnd);
    host.run_frames();

    assert_eq!(host.carousel.index(), 0);
    assert_eq!(host.track.offset, 0.0);
    assert!(host.settles().is_empty());
}

/// 测试快速甩动
#[test]
fn test_flick_travels_further_than_drag() {
    let mut host = Host::new();
    host.init(&Measurement::from_widths(
        100.0,
        &[100.0, 100.0, 100.0, 100.0, 100.0, 100.0],
    ));

    host.drag(&[(0.0, 0.0), (-30.0, 16.0), (-60.0, 32.0)]);
    let index = host.carousel.index();
    assert!(index >= 2, "甩动应该越过多个条目，实际 {index}");

    host.run_frames();
    assert_eq!(
        host.track.offset,
        host.carousel.layout().position_for_index(index)
    );
    assert_eq!(host.settles(), vec![CarouselEvent::Settle { index }]);
}

/// 测试动画中途重新选择：只有最后一次 settle
#[test]
fn test_retarget_mid_flight() {
    let mut host = Host::new();
    host.init(&wide_items());

    host.carousel.select(1);
    host.flush();
    host.send(CarouselInput::frame(100.0));
    host.send(CarouselInput::frame(100.0));

    host.carousel.select(2);
    host.flush();
    host.run_frames();

    assert_eq!(host.track.offset, -500.0);
    assert_eq!(host.settles(), vec![CarouselEvent::Settle { index: 2 }]);
    assert_eq!(host.track.selected, BTreeSet::from([2]));
}

/// 测试键盘导航需要焦点
#[test]
fn test_keyboard_navigation() {
    let mut host = Host::new();
    host.init(&wide_items());

    let right = KeyInput::from_key_code(KeyInput::RIGHT_KEY_CODE);
    let left = KeyInput::from_key_code(KeyInput::LEFT_KEY_CODE);

    host.send(CarouselInput::key(right, false));
    assert_eq!(host.carousel.index(), 0);

    host.send(CarouselInput::key(right, true));
    host.send(CarouselInput::key(right, true));
    host.send(CarouselInput::key(right, true));
    assert_eq!(host.carousel.index(), 2);

    host.send(CarouselInput::key(left, true));
    host.run_frames();
    assert_eq!(host.carousel.index(), 1);
    assert_eq!(host.track.offset, -200.0);
}

/// 测试尺寸变化：挂起后卸载，恢复后重新挂载
#[test]
fn test_resize_suspend_and_resume() {
    let mut host = Host::new();
    host.init(&wide_items());
    host.carousel.select(2);
    host.flush();

    host.send(CarouselInput::Resize(Measurement::from_widths(
        1000.0,
        &[200.0, 200.0, 200.0],
    )));
    assert!(host.carousel.is_suspended());
    assert_eq!(host.track, FakeTrack::default());

    // 挂起时拖拽和帧推进都不起作用
    host.drag(&[(-80.0, 0.0), (-160.0, 10.0)]);
    assert_eq!(host.run_frames(), 0);
    assert_eq!(host.carousel.index(), 0);

    host.send(CarouselInput::Resize(wide_items()));
    assert!(host.carousel.is_active());
    assert!(host.track.mounted);
    assert_eq!(host.track.selected, BTreeSet::from([0]));
    assert_eq!(
        host.events().last(),
        Some(&CarouselEvent::Init { index: 0 })
    );
    assert!(!host.events().contains(&CarouselEvent::Destroy));
}

/// 测试尺寸变化后重新对齐当前条目
#[test]
fn test_resize_keeps_index() {
    let mut host = Host::new();
    host.init(&wide_items());
    host.carousel.select(1);
    host.flush();
    host.run_frames();
    let before = host.events().len();

    host.send(CarouselInput::Resize(Measurement::from_widths(
        150.0,
        &[300.0, 300.0, 300.0],
    )));
    host.run_frames();

    assert_eq!(host.carousel.index(), 1);
    assert_eq!(host.track.offset, -300.0);
    assert_eq!(host.track.item_offsets, vec![0.0, 300.0, 600.0]);
    assert_eq!(host.events().len(), before);
}

/// 测试销毁后重新初始化与全新引擎一致
#[test]
fn test_destroy_then_init_matches_fresh() {
    let mut fresh = Carousel::new();
    fresh.init(&wide_items());
    let fresh_directives = fresh.take_directives();

    let mut host = Host::new();
    host.init(&wide_items());
    host.carousel.select(2);
    host.flush();
    host.send(CarouselInput::frame(50.0));

    host.carousel.destroy();
    host.flush();
    assert_eq!(host.track, FakeTrack::default());
    assert!(host.carousel.is_destroyed());

    host.carousel.destroy();
    assert!(host.carousel.take_directives().is_empty());

    host.carousel.init(&wide_items());
    assert_eq!(host.carousel.take_directives(), fresh_directives);
    assert_eq!(host.carousel.state(), fresh.state());

    let destroys = host
        .events()
        .iter()
        .filter(|event| **event == CarouselEvent::Destroy)
        .count();
    assert_eq!(destroys, 1);
}

/// 测试取消订阅
#[test]
fn test_unsubscribe_stops_delivery() {
    let mut carousel = Carousel::new();
    let selects = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&selects);
    let id = carousel.subscribe(EventKind::Select, move |_| *counter.borrow_mut() += 1);

    carousel.init(&wide_items());
    carousel.next();
    assert!(carousel.unsubscribe(id));
    carousel.next();

    assert_eq!(*selects.borrow(), 1);
    assert_eq!(carousel.index(), 2);
}

/// 测试配置驱动行为：零时长归位立即完成
#[test]
fn test_config_from_json() {
    let config = CarouselConfig::from_json(
        r#"{ "settle_duration_ms": 0.0, "easing": "linear", "set_height": false }"#,
    )
    .unwrap();
    let mut host = Host::with_carousel(Carousel::with_config(config).unwrap());
    host.init(&wide_items());
    assert_eq!(host.track.height, None);

    host.carousel.next();
    host.flush();

    assert!(!host.carousel.is_animating());
    assert_eq!(host.track.offset, -200.0);
    assert_eq!(host.settles(), vec![CarouselEvent::Settle { index: 1 }]);
}
