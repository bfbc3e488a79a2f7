//! 图像分类
//!
//! 模型推理本身不在本 crate 内，只定义接口、类别表与输入预处理。
//! 选出的代表帧缩放到 224x224 后交给 [`ImageClassifier`]。

pub mod error;
pub mod shared;

use crate::core::video::Frame;
use image::imageops::FilterType;
use image::RgbImage;
use std::collections::BTreeMap;

pub use error::ClassifierError;
pub use shared::SharedClassifier;

/// 模型输出顺序对应的类别名
pub const CLASS_NAMES: [&str; 7] = [
    "graphics",
    "lowLight",
    "nature",
    "news",
    "person",
    "sports",
    "textHeavy",
];

pub const INPUT_SIZE: u32 = 224;

/// 类别名 -> 置信度
pub type ClassifierScores = BTreeMap<String, f64>;

pub trait ImageClassifier: Send + Sync {
    fn classify(&self, frame: &Frame) -> Result<ClassifierScores, ClassifierError>;
}

/// 缩放到 `size` x `size`，忽略原始宽高比
pub fn prepare_input(frame: &Frame, size: u32) -> RgbImage {
    if frame.dimensions() == (size, size) {
        return frame.image().clone();
    }
    image::imageops::resize(frame.image(), size, size, FilterType::Triangle)
}

/// 把模型原始输出按 [`CLASS_NAMES`] 顺序映射为分数表
pub fn scores_from_output(output: &[f32]) -> Result<ClassifierScores, ClassifierError> {
    if output.len() != CLASS_NAMES.len() {
        return Err(ClassifierError::LabelCount {
            expected: CLASS_NAMES.len(),
            actual: output.len(),
        });
    }
    Ok(CLASS_NAMES
        .iter()
        .zip(output)
        .map(|(name, score)| (name.to_string(), f64::from(*score)))
        .collect())
}

/// 所有类别置 0，用于平台类别覆盖时跳过推理
pub fn placeholder_scores() -> ClassifierScores {
    CLASS_NAMES.iter().map(|name| (name.to_string(), 0.0)).collect()
}
