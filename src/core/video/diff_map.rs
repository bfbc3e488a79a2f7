use super::edge_map::EdgeRecord;
use super::matrix::Matrix;
use std::sync::Arc;

/// 差异图：某边缘图与参考边缘图的逐元素绝对差 + 差异分（总和）
#[derive(Debug, Clone)]
pub struct DiffRecord {
    pub frame_index: usize,
    pub map: Arc<Matrix>,
    pub diff_score: f64,
}

impl DiffRecord {
    /// 尺寸不一致时返回 None
    pub fn against(reference: &EdgeRecord, edge: &EdgeRecord) -> Option<Self> {
        let map = reference.map.abs_diff(&edge.map)?;
        let diff_score = map.sum();
        Some(Self {
            frame_index: edge.frame_index,
            map: Arc::new(map),
            diff_score,
        })
    }
}
