//! 帧指标引擎：从一组候选帧中挑出代表帧，并给出归一化的细节分与差异分
//!
//! 流程：
//! 1. 边缘图 - 灰度 + 拉普拉斯，方差作为细节分
//! 2. 细节离群过滤 - 保留 mean ± stdev 内的记录，按细节分升序
//! 3. 差异图 - 与参考边缘图逐元素绝对差，总和作为差异分
//! 4. 差异离群过滤 - 同样一倍标准差，按差异分升序
//! 5. 取位置中位数（下中位）并归一化

use super::diff_map::DiffRecord;
use super::edge_map::{generate_edge_records, EdgeRecord};
use super::error::{FilterStage, MetricsError};
use super::frame::Frame;
use super::stats::one_sigma_bounds;
use crate::core::config::{MetricsConfig, ReferencePolicy};
use log::{debug, info};

/// 每个过滤阶段之后至少保留的记录数；统计量至少需要两个样本
const MIN_SURVIVORS: usize = 2;

fn require_survivors(stage: FilterStage, count: usize) -> Result<(), MetricsError> {
    if count < MIN_SURVIVORS {
        return Err(MetricsError::InsufficientData { stage, count });
    }
    Ok(())
}

/// 引擎状态，每一步只会向前推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EngineState {
    Empty,
    EdgeMapsReady,
    DiffMapsReady,
    ResultCached,
}

/// 边缘记录、差异记录与源帧绑定在一起，筛选时不会错位
#[derive(Debug, Clone)]
pub struct FilteredTriple {
    pub edge: EdgeRecord,
    pub diff: DiffRecord,
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub detail_score: f64,
    pub diff_score: f64,
    pub frame: Frame,
}

pub struct FrameMetricsEngine {
    frames: Vec<Frame>,
    config: MetricsConfig,
    state: EngineState,
    /// 过滤后、按细节分升序
    edge_records: Vec<EdgeRecord>,
    diff_records: Vec<DiffRecord>,
    /// 过滤后、按差异分升序
    filtered: Vec<FilteredTriple>,
    result: Option<AnalysisResult>,
}

impl FrameMetricsEngine {
    pub fn new(frames: Vec<Frame>) -> Result<Self, MetricsError> {
        Self::with_config(frames, MetricsConfig::default())
    }

    /// 至少需要 2 帧，且所有帧尺寸一致
    pub fn with_config(frames: Vec<Frame>, config: MetricsConfig) -> Result<Self, MetricsError> {
        if frames.len() < 2 {
            return Err(MetricsError::InsufficientData {
                stage: FilterStage::Input,
                count: frames.len(),
            });
        }

        let expected = frames[0].dimensions();
        if let Some(bad) = frames.iter().find(|f| f.dimensions() != expected) {
            return Err(MetricsError::DimensionMismatch {
                index: bad.index,
                expected,
                actual: bad.dimensions(),
            });
        }

        // 帧以序列位置为标识
        let frames = frames
            .into_iter()
            .enumerate()
            .map(|(i, f)| if f.index == i { f } else { f.with_index(i) })
            .collect();

        Ok(Self {
            frames,
            config,
            state: EngineState::Empty,
            edge_records: Vec::new(),
            diff_records: Vec::new(),
            filtered: Vec::new(),
            result: None,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn edge_records(&self) -> &[EdgeRecord] {
        &self.edge_records
    }

    pub fn diff_records(&self) -> &[DiffRecord] {
        &self.diff_records
    }

    pub fn filtered_triples(&self) -> &[FilteredTriple] {
        &self.filtered
    }

    /// 计算并缓存结果；重复调用直接返回缓存，不会重新计算
    pub fn compute_scores(&mut self) -> Result<AnalysisResult, MetricsError> {
        if let Some(result) = &self.result {
            debug!("♻️ Returning cached frame scores");
            return Ok(result.clone());
        }

        self.generate_edge_records()?;
        self.generate_diff_records()?;
        self.filter_diff_outliers()?;

        let selected = &self.filtered[self.filtered.len() / 2];
        let raw_detail = selected.edge.detail_score;
        let raw_diff = selected.diff.diff_score;

        let result = AnalysisResult {
            detail_score: self.config.detail_range.normalize(raw_detail),
            diff_score: self.config.diff_range.normalize(raw_diff),
            frame: selected.frame.clone(),
        };

        info!(
            "🎯 Selected frame {} of {} (detail {:.2} -> {:.4}, diff {:.0} -> {:.4})",
            result.frame.index,
            self.frames.len(),
            raw_detail,
            result.detail_score,
            raw_diff,
            result.diff_score
        );

        self.result = Some(result.clone());
        self.state = EngineState::ResultCached;
        Ok(result)
    }

    /// 生成边缘图并过滤细节离群值；已生成时跳过
    pub fn generate_edge_records(&mut self) -> Result<(), MetricsError> {
        if self.state >= EngineState::EdgeMapsReady {
            return Ok(());
        }

        let records = generate_edge_records(&self.frames);
        let scores: Vec<f64> = records.iter().map(|r| r.detail_score).collect();
        let bounds = one_sigma_bounds(&scores).ok_or(MetricsError::InsufficientData {
            stage: FilterStage::Input,
            count: 0,
        })?;

        let mut kept: Vec<EdgeRecord> = records
            .into_iter()
            .filter(|r| bounds.contains(r.detail_score))
            .collect();
        kept.sort_by(|a, b| a.detail_score.total_cmp(&b.detail_score));

        debug!(
            "📊 Detail filter [{:.2}, {:.2}] kept {}/{} frames",
            bounds.lower,
            bounds.upper,
            kept.len(),
            self.frames.len()
        );

        require_survivors(FilterStage::DetailFilter, kept.len())?;

        self.edge_records = kept;
        self.state = EngineState::EdgeMapsReady;
        Ok(())
    }

    /// 以参考边缘图生成差异图；必须先生成边缘图
    pub fn generate_diff_records(&mut self) -> Result<(), MetricsError> {
        if self.state == EngineState::Empty || self.edge_records.is_empty() {
            return Err(MetricsError::Precedence);
        }
        if self.state >= EngineState::DiffMapsReady {
            return Ok(());
        }

        let reference = self.reference_record().ok_or(MetricsError::Precedence)?;
        debug!(
            "📌 Diff reference: frame {} (detail {:.2}, {:?})",
            reference.frame_index, reference.detail_score, self.config.reference
        );

        let mut diffs = Vec::with_capacity(self.edge_records.len());
        for edge in &self.edge_records {
            let diff = DiffRecord::against(reference, edge).ok_or_else(|| {
                let (rw, rh) = reference.map.dimensions();
                let (ew, eh) = edge.map.dimensions();
                MetricsError::DimensionMismatch {
                    index: edge.frame_index,
                    expected: (rw as u32, rh as u32),
                    actual: (ew as u32, eh as u32),
                }
            })?;
            diffs.push(diff);
        }

        self.diff_records = diffs;
        self.state = EngineState::DiffMapsReady;
        Ok(())
    }

    fn reference_record(&self) -> Option<&EdgeRecord> {
        match self.config.reference {
            ReferencePolicy::HighestDetail => self.edge_records.last(),
            ReferencePolicy::LowestDetail => self.edge_records.first(),
        }
    }

    fn filter_diff_outliers(&mut self) -> Result<(), MetricsError> {
        let scores: Vec<f64> = self.diff_records.iter().map(|d| d.diff_score).collect();
        let bounds = one_sigma_bounds(&scores).ok_or(MetricsError::InsufficientData {
            stage: FilterStage::DiffFilter,
            count: 0,
        })?;

        let mut filtered: Vec<FilteredTriple> = self
            .edge_records
            .iter()
            .zip(self.diff_records.iter())
            .filter(|(_, diff)| bounds.contains(diff.diff_score))
            .map(|(edge, diff)| FilteredTriple {
                edge: edge.clone(),
                diff: diff.clone(),
                frame: self.frames[edge.frame_index].clone(),
            })
            .collect();
        filtered.sort_by(|a, b| a.diff.diff_score.total_cmp(&b.diff.diff_score));

        debug!(
            "📊 Diff filter [{:.0}, {:.0}] kept {}/{} records",
            bounds.lower,
            bounds.upper,
            filtered.len(),
            self.diff_records.len()
        );

        require_survivors(FilterStage::DiffFilter, filtered.len())?;

        self.filtered = filtered;
        Ok(())
    }
}
