//! 视频分析器

use crate::api::models::analysis::{AnalysisApiError, FrameScores, VideoAnalysisReport};
use crate::core::classifier::{placeholder_scores, prepare_input, ImageClassifier};
use crate::core::config::AnalysisConfig;
use crate::core::error::AnalysisError;
use crate::core::keywords::{
    apply_platform_category_override, merge_keywords, score_text, KeywordDictionary,
};
use crate::core::source::{VideoSource, YtDlpSource};
use crate::core::video::{Frame, FrameMetricsEngine};
use flutter_rust_bridge::frb;
use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// 视频分析器 - 关键词评分 + 代表帧选取 + 图像分类
///
/// ```ignore
/// let analyzer = VideoAnalyzer::new(AnalysisConfig::default(), Arc::new(classifier))?;
/// let report = analyzer.analyze_video_id("dQw4w9WgXcQ".into(), None)?;
/// ```
#[frb(opaque)]
pub struct VideoAnalyzer {
    config: AnalysisConfig,
    classifier: Arc<dyn ImageClassifier>,
    pool: ThreadPool,
}

impl VideoAnalyzer {
    #[frb(ignore)]
    pub fn new(
        config: AnalysisConfig,
        classifier: Arc<dyn ImageClassifier>,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("frame-metrics-{}", i))
            .build()
            .map_err(|e| AnalysisError::WorkerPool(e.to_string()))?;

        info!(
            "🎬 VideoAnalyzer: created ({} worker threads)",
            config.worker_threads
        );
        Ok(Self {
            config,
            classifier,
            pool,
        })
    }

    /// 分析一个视频来源
    ///
    /// 平台类别为 music / gaming 时跳过帧分析，分类与帧分数全部置 0。
    #[frb(ignore)]
    pub fn analyze(
        &self,
        source: &dyn VideoSource,
        client_keywords: Option<&KeywordDictionary>,
    ) -> Result<VideoAnalysisReport, AnalysisError> {
        let text_info = source.text_info()?;
        let keywords = merge_keywords(client_keywords, &self.config.static_keywords);
        let keyword_scores = score_text(&text_info.text, &keywords)?;

        let (overridden, keyword_scores) =
            apply_platform_category_override(&text_info.categories, keyword_scores);
        if overridden {
            return Ok(VideoAnalysisReport {
                category_scores: placeholder_scores(),
                frame_scores: FrameScores::default(),
                keyword_scores,
                platform_override: true,
            });
        }

        let frames = source.frames()?;
        info!("🎞️ Analyzing {} frames", frames.len());

        let metrics = self.config.metrics.clone();
        let selected = self.pool.install(move || {
            let mut engine = FrameMetricsEngine::with_config(frames, metrics)?;
            engine.compute_scores()
        })?;

        let input = Frame::new(
            selected.frame.index,
            prepare_input(&selected.frame, self.config.classifier_input_size),
        );
        let category_scores = self.classifier.classify(&input)?;

        Ok(VideoAnalysisReport {
            category_scores,
            frame_scores: FrameScores {
                detail_score: selected.detail_score,
                diff_score: selected.diff_score,
            },
            keyword_scores,
            platform_override: false,
        })
    }

    /// 通过 yt-dlp 拉取视频并分析
    ///
    /// `keywords_json` 形如 `{"coding": ["rust", "cargo"]}`，与内置关键词合并。
    #[frb]
    pub fn analyze_video_id(
        &self,
        video_id: String,
        keywords_json: Option<String>,
    ) -> Result<VideoAnalysisReport, AnalysisApiError> {
        let client_keywords = keywords_json
            .as_deref()
            .map(KeywordDictionary::from_json)
            .transpose()
            .map_err(|e| AnalysisApiError::invalid_keywords(e.to_string()))?;

        let source = YtDlpSource::fetch(&video_id, &self.config).map_err(AnalysisError::from)?;
        Ok(self.analyze(&source, client_keywords.as_ref())?)
    }

    /// 当前配置
    #[frb(sync, getter)]
    pub fn config(&self) -> AnalysisConfig {
        self.config.clone()
    }
}

impl Drop for VideoAnalyzer {
    fn drop(&mut self) {
        info!("🗑️ VideoAnalyzer: released");
    }
}
