//! 关键词相关性评分
//!
//! - 词典合并：客户端关键词 + 内置关键词
//! - 文本评分：按类别统计命中的关键词数量
//! - 平台类别覆盖：平台声明 music / gaming 时直接给出高分

pub mod dictionary;
pub mod platform;
pub mod scorer;

use std::collections::BTreeMap;
use thiserror::Error;

pub use dictionary::{merge_keywords, KeywordDictionary};
pub use platform::{apply_platform_category_override, PLATFORM_OVERRIDE_SCORE};
pub use scorer::{score_text, KeywordMatcher};

/// 类别 -> 命中关键词数
pub type CategoryScores = BTreeMap<String, u32>;

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("keyword pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("keyword JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
