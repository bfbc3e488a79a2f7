//! 分析配置

use crate::core::keywords::KeywordDictionary;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// 归一化区间，先截断到 `[low, high]` 再线性映射到 `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if self.high <= self.low {
            return 0.0;
        }
        let clamped = value.clamp(self.low, self.high);
        (clamped - self.low) / (self.high - self.low)
    }
}

/// 差异图参考帧的选取方式（基于细节分升序排列后的候选集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// 细节分最高的边缘图（排序后的最后一个）
    #[default]
    HighestDetail,
    /// 细节分最低的边缘图（排序后的第一个）
    LowestDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub detail_range: ScoreRange,
    pub diff_range: ScoreRange,
    pub reference: ReferencePolicy,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            detail_range: ScoreRange::new(0.0, 2000.0),
            diff_range: ScoreRange::new(0.0, 2_000_000.0),
            reference: ReferencePolicy::HighestDetail,
        }
    }
}

impl MetricsConfig {
    /// 以细节分最低的帧作为参考
    pub fn with_lowest_detail_reference() -> Self {
        Self {
            reference: ReferencePolicy::LowestDetail,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub metrics: MetricsConfig,
    /// 故事板抽帧的大致上限
    pub frame_limit: usize,
    /// 直播回退到缩略图时统一缩放的尺寸
    pub thumbnail_size: (u32, u32),
    /// 低于该 preference 的缩略图通常是灰色占位图
    pub min_thumbnail_preference: i32,
    pub worker_threads: usize,
    pub classifier_input_size: u32,
    pub static_keywords: KeywordDictionary,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            frame_limit: 50,
            thumbnail_size: (1280, 720),
            min_thumbnail_preference: -10,
            worker_threads: num_cpus::get().max(1),
            classifier_input_size: 224,
            static_keywords: default_static_keywords(),
        }
    }
}

impl AnalysisConfig {
    /// 解析 JSON5 配置，缺省字段取默认值
    pub fn from_json5_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig =
            json5::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("⚙️ Loading analysis config from {:?}", path);
        let raw = std::fs::read_to_string(path)?;
        Self::from_json5_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_limit == 0 {
            return Err(ConfigError::Invalid("frame_limit must be positive".into()));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid("worker_threads must be positive".into()));
        }
        if self.thumbnail_size.0 == 0 || self.thumbnail_size.1 == 0 {
            return Err(ConfigError::Invalid("thumbnail_size must be non-zero".into()));
        }
        if self.classifier_input_size == 0 {
            return Err(ConfigError::Invalid(
                "classifier_input_size must be positive".into(),
            ));
        }
        for (name, range) in [
            ("detail_range", self.metrics.detail_range),
            ("diff_range", self.metrics.diff_range),
        ] {
            if !(range.high > range.low) {
                return Err(ConfigError::Invalid(format!(
                    "{} must satisfy low < high, got {:?}",
                    name, range
                )));
            }
        }
        Ok(())
    }
}

fn default_static_keywords() -> KeywordDictionary {
    KeywordDictionary::from_iter([
        (
            "music",
            vec!["music", "song", "orchestra", "rap", "rock", "classical", "pop"],
        ),
        (
            "coding",
            vec!["programming", "java", "javascript", "c#", "c++"],
        ),
    ])
}
