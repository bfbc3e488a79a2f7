use super::frame::Frame;
use super::matrix::Matrix;
use rayon::prelude::*;
use std::sync::Arc;

/// 边缘图：灰度帧的拉普拉斯响应 + 细节分（方差）
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub frame_index: usize,
    pub map: Arc<Matrix>,
    pub detail_score: f64,
}

impl EdgeRecord {
    pub fn from_frame(frame: &Frame) -> Self {
        let map = Matrix::laplacian(&frame.to_grayscale());
        let detail_score = map.variance();
        Self {
            frame_index: frame.index,
            map: Arc::new(map),
            detail_score,
        }
    }
}

/// 并行生成边缘图，输出顺序与输入一致
pub fn generate_edge_records(frames: &[Frame]) -> Vec<EdgeRecord> {
    frames.par_iter().map(EdgeRecord::from_frame).collect()
}
