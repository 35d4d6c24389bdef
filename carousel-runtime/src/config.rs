//! # Config 模块
//!
//! 引擎可调参数，集中管理所有物理与动画常量。
//!
//! ## 配置优先级
//!
//! 1. 代码中显式构造的 `CarouselConfig`（最高）
//! 2. 配置文件 (JSON)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::animation::Easing;
use crate::error::ConfigError;

/// 轮播配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// 初始化时选中的条目（越界会被钳制）
    #[serde(default)]
    pub initial_index: usize,

    /// 是否让轨道高度跟随当前条目
    #[serde(default = "default_set_height")]
    pub set_height: bool,

    /// 名义帧间隔（毫秒）
    ///
    /// 速度被归一化为"每帧位移"，衰减模拟也按此间隔推进。
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: f64,

    /// 归位动画时长（毫秒）
    #[serde(default = "default_settle_duration_ms")]
    pub settle_duration_ms: f64,

    /// 归位动画缓动函数
    #[serde(default)]
    pub easing: Easing,

    /// 拖拽距离需超过条目宽度的该比例才会翻页
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,

    /// 甩动配置
    #[serde(default)]
    pub flick: FlickConfig,

    /// 衰减归位配置
    #[serde(default)]
    pub decay_settle: DecaySettleConfig,
}

/// 甩动（惯性）配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlickConfig {
    /// 松手速度超过此值（每帧像素）视为甩动
    #[serde(default = "default_commit_velocity")]
    pub commit_velocity: f32,

    /// 每个模拟帧损失的速度比例
    #[serde(default = "default_flick_decay")]
    pub decay: f32,

    /// 速度低于此值时停止惯性投影
    #[serde(default = "default_rest_velocity")]
    pub rest_velocity: f32,
}

/// 衰减归位配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecaySettleConfig {
    /// 每帧移除的剩余距离比例
    #[serde(default = "default_decay_step")]
    pub step: f32,

    /// 剩余距离低于此值（像素）时直接吸附到目标
    #[serde(default = "default_rest_distance")]
    pub rest_distance: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            set_height: default_set_height(),
            frame_interval_ms: default_frame_interval_ms(),
            settle_duration_ms: default_settle_duration_ms(),
            easing: Easing::default(),
            dead_zone: default_dead_zone(),
            flick: FlickConfig::default(),
            decay_settle: DecaySettleConfig::default(),
        }
    }
}

impl Default for FlickConfig {
    fn default() -> Self {
        Self {
            commit_velocity: default_commit_velocity(),
            decay: default_flick_decay(),
            rest_velocity: default_rest_velocity(),
        }
    }
}

impl Default for DecaySettleConfig {
    fn default() -> Self {
        Self {
            step: default_decay_step(),
            rest_distance: default_rest_distance(),
        }
    }
}

// 默认值函数
fn default_set_height() -> bool {
    true
}

fn default_frame_interval_ms() -> f64 {
    1000.0 / 60.0
}

fn default_settle_duration_ms() -> f64 {
    1000.0
}

fn default_dead_zone() -> f32 {
    0.15
}

fn default_commit_velocity() -> f32 {
    0.7
}

fn default_flick_decay() -> f32 {
    0.2
}

fn default_rest_velocity() -> f32 {
    0.1
}

fn default_decay_step() -> f32 {
    0.1
}

fn default_rest_distance() -> f32 {
    0.5
}

impl CarouselConfig {
    /// 从 JSON 文本解析配置（缺省字段使用默认值）
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置；存在但无效时返回错误。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), "配置文件加载成功");
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// 甩动投影使用的衰减系数（每帧保留的速度比例）
    pub fn flick_decay_factor(&self) -> f32 {
        1.0 - self.flick.decay
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.frame_interval_ms) {
            return Err(invalid("frame_interval_ms", "必须大于 0"));
        }

        if !is_non_negative(self.settle_duration_ms) {
            return Err(invalid("settle_duration_ms", "不能为负数"));
        }

        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(invalid("dead_zone", "必须在 [0.0, 1.0) 之间"));
        }

        if !(self.flick.decay > 0.0 && self.flick.decay < 1.0) {
            return Err(invalid("flick.decay", "必须在 (0.0, 1.0) 之间"));
        }

        if !is_positive(f64::from(self.flick.rest_velocity)) {
            return Err(invalid("flick.rest_velocity", "必须大于 0"));
        }

        if !is_non_negative(f64::from(self.flick.commit_velocity)) {
            return Err(invalid("flick.commit_velocity", "不能为负数"));
        }

        if !(self.decay_settle.step > 0.0 && self.decay_settle.step < 1.0) {
            return Err(invalid("decay_settle.step", "必须在 (0.0, 1.0) 之间"));
        }

        if !is_positive(f64::from(self.decay_settle.rest_distance)) {
            return Err(invalid("decay_settle.rest_distance", "必须大于 0"));
        }

        Ok(())
    }
}

// NaN 也视为无效
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(field: &'static str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field,
        message: message.to_string(),
    }
}
