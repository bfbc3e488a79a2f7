//! 描述性统计：均值、总体标准差、一倍标准差离群过滤

/// 闭区间 `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 总体方差（除以 n）
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / values.len() as f64)
}

pub fn population_stdev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// 相对容差，吸收均值计算中的舍入误差（否则全等样本可能被全部排除）
const BOUNDS_TOLERANCE: f64 = 1e-12;

/// `mean ± stdev`
pub fn one_sigma_bounds(values: &[f64]) -> Option<Bounds> {
    let mean = mean(values)?;
    let stdev = population_stdev(values)?;
    let slack = (mean.abs() + stdev) * BOUNDS_TOLERANCE;
    Some(Bounds {
        lower: mean - stdev - slack,
        upper: mean + stdev + slack,
    })
}
