use crate::core::classifier::ClassifierScores;
use crate::core::error::AnalysisError;
use crate::core::keywords::CategoryScores;
use serde::{Deserialize, Serialize};

/// 代表帧的归一化指标
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameScores {
    pub detail_score: f64,
    pub diff_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalysisReport {
    /// 代表帧的图像分类结果
    pub category_scores: ClassifierScores,
    pub frame_scores: FrameScores,
    pub keyword_scores: CategoryScores,
    /// 平台类别命中 music / gaming 时为 true，此时帧相关分数均为 0
    pub platform_override: bool,
}

impl VideoAnalysisReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 分析错误，FRB 友好的设计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisApiError {
    pub error_type: String,
    pub message: String,
}

impl AnalysisApiError {
    pub(crate) fn invalid_keywords(e: String) -> Self {
        Self {
            error_type: "InvalidKeywords".to_string(),
            message: format!("关键词 JSON 无效: {}", e),
        }
    }
}

impl From<AnalysisError> for AnalysisApiError {
    fn from(err: AnalysisError) -> Self {
        let error_type = match &err {
            AnalysisError::Metrics(_) => "Metrics",
            AnalysisError::Keyword(_) => "Keyword",
            AnalysisError::Retrieval(_) => "Retrieval",
            AnalysisError::Classifier(_) => "Classifier",
            AnalysisError::Config(_) => "Config",
            AnalysisError::WorkerPool(_) => "WorkerPool",
        };
        Self {
            error_type: error_type.to_string(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for AnalysisApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_type, self.message)
    }
}

impl std::error::Error for AnalysisApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::placeholder_scores;
    use crate::core::source::SourceError;

    #[test]
    fn test_report_json_is_camel_case() {
        let report = VideoAnalysisReport {
            category_scores: placeholder_scores(),
            frame_scores: FrameScores::default(),
            keyword_scores: [("music".to_string(), 1000)].into_iter().collect(),
            platform_override: true,
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["platformOverride"], true);
        assert_eq!(value["keywordScores"]["music"], 1000);
        assert_eq!(value["frameScores"]["detailScore"], 0.0);
        assert_eq!(value["frameScores"]["diffScore"], 0.0);
        assert_eq!(value["categoryScores"]["textHeavy"], 0.0);
    }

    #[test]
    fn test_api_error_from_analysis_error() {
        let err: AnalysisApiError =
            AnalysisError::from(SourceError::Command("exit status: 1".into())).into();
        assert_eq!(err.error_type, "Retrieval");
        assert!(err.message.contains("exit status: 1"));
        assert!(err.to_string().starts_with("[Retrieval]"));
    }
}
