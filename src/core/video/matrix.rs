use image::GrayImage;

/// 单通道 f64 矩阵，行优先存储
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// 离散拉普拉斯算子（3x3 核 `[0 1 0; 1 -4 1; 0 1 0]`），边界按 reflect-101 处理
    pub fn laplacian(gray: &GrayImage) -> Self {
        let w = gray.width() as usize;
        let h = gray.height() as usize;
        let src = gray.as_raw();
        let at = |x: usize, y: usize| src[y * w + x] as f64;

        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            let up = reflect_101(y as isize - 1, h);
            let down = reflect_101(y as isize + 1, h);
            for x in 0..w {
                let left = reflect_101(x as isize - 1, w);
                let right = reflect_101(x as isize + 1, w);
                let val = at(x, up) + at(x, down) + at(left, y) + at(right, y) - 4.0 * at(x, y);
                data.push(val);
            }
        }

        Self {
            width: w,
            height: h,
            data,
        }
    }

    /// 逐元素绝对差，尺寸不一致时返回 None
    pub fn abs_diff(&self, other: &Matrix) -> Option<Matrix> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .collect();
        Some(Matrix {
            width: self.width,
            height: self.height,
            data,
        })
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// 总体方差；空矩阵为 0
    pub fn variance(&self) -> f64 {
        super::stats::population_variance(&self.data).unwrap_or(0.0)
    }
}

/// `fedcb|abcdefgh|gfedcba` 式镜像
fn reflect_101(i: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}
