use crate::core::classifier::ClassifierError;
use crate::core::config::ConfigError;
use crate::core::keywords::KeywordError;
use crate::core::source::SourceError;
use crate::core::video::MetricsError;
use thiserror::Error;

/// 一次完整分析中可能出现的错误
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("帧指标计算失败: {0}")]
    Metrics(#[from] MetricsError),
    #[error("关键词评分失败: {0}")]
    Keyword(#[from] KeywordError),
    #[error("视频数据获取失败: {0}")]
    Retrieval(#[from] SourceError),
    #[error("图像分类失败: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    #[error("线程池创建失败: {0}")]
    WorkerPool(String),
}

impl AnalysisError {
    /// 对外暴露的错误类型标识
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Metrics(_) => "metrics",
            AnalysisError::Keyword(_) => "keyword",
            AnalysisError::Retrieval(_) => "retrieval",
            AnalysisError::Classifier(_) => "classifier",
            AnalysisError::Config(_) => "config",
            AnalysisError::WorkerPool(_) => "worker_pool",
        }
    }
}
