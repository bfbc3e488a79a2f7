use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier not initialized")]
    NotInitialized,
    #[error("模型加载失败: {0}")]
    LoadFailed(String),
    #[error("label count mismatch: expected {expected}, got {actual}")]
    LabelCount { expected: usize, actual: usize },
}
