use thiserror::Error;

/// 过滤阶段，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    Input,
    DetailFilter,
    DiffFilter,
}

impl std::fmt::Display for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterStage::Input => "input",
            FilterStage::DetailFilter => "detail filter",
            FilterStage::DiffFilter => "diff filter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("diff records requested before any edge records exist")]
    Precedence,
    #[error("insufficient frames after {stage}: {count}")]
    InsufficientData { stage: FilterStage, count: usize },
    #[error("frame {index} is {actual:?}, expected {expected:?}")]
    DimensionMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}
