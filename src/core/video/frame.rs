use image::{DynamicImage, GrayImage, ImageError, Luma, RgbImage};
use std::sync::Arc;

/// 帧数据结构（RGB 8-bit，不可变）
///
/// 像素数据通过 `Arc` 共享，克隆帧不会复制像素。
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 在输入序列中的位置
    pub index: usize,
    image: Arc<RgbImage>,
}

impl Frame {
    pub fn new(index: usize, image: RgbImage) -> Self {
        Self {
            index,
            image: Arc::new(image),
        }
    }

    /// 从 RGB 原始字节构建，长度不匹配时返回 None
    pub fn from_raw(index: usize, width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, data).map(|img| Self::new(index, img))
    }

    pub fn from_dynamic(index: usize, image: DynamicImage) -> Self {
        Self::new(index, image.to_rgb8())
    }

    /// 解码已编码的图片（jpeg / png / webp）
    pub fn decode(index: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(index, img))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// 灰度转换，系数与 BT.601 一致（0.299 R + 0.587 G + 0.114 B），四舍五入
    pub fn to_grayscale(&self) -> GrayImage {
        let (width, height) = self.dimensions();
        GrayImage::from_fn(width, height, |x, y| {
            let [r, g, b] = self.image.get_pixel(x, y).0;
            let val = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
            Luma([val as u8])
        })
    }

    pub fn resize_to(&self, target_width: u32, target_height: u32) -> Frame {
        if self.dimensions() == (target_width, target_height) {
            return self.clone();
        }
        let resized = image::imageops::resize(
            self.image.as_ref(),
            target_width,
            target_height,
            image::imageops::FilterType::Triangle,
        );
        Frame::new(self.index, resized)
    }

    pub fn with_index(&self, index: usize) -> Frame {
        Frame {
            index,
            image: Arc::clone(&self.image),
        }
    }

    /// 两帧是否共享同一份像素存储
    pub fn shares_pixels_with(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_frame_creation() {
        let data = vec![255u8; 100 * 100 * 3];
        let frame = Frame::from_raw(7, 100, 100, data).unwrap();

        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 100);
        assert_eq!(frame.pixel_count(), 10000);
        assert_eq!(frame.index, 7);
    }

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        assert!(Frame::from_raw(0, 10, 10, vec![0u8; 10]).is_none());
    }

    #[test]
    fn test_frame_resize() {
        let frame = Frame::new(3, RgbImage::from_pixel(100, 60, Rgb([10, 20, 30])));
        let resized = frame.resize_to(32, 32);

        assert_eq!(resized.dimensions(), (32, 32));
        assert_eq!(resized.index, 3);
        assert_eq!(resized.image().as_raw().len(), 32 * 32 * 3);
    }

    #[test]
    fn test_grayscale_weights() {
        let white = Frame::new(0, RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));
        assert!(white.to_grayscale().pixels().all(|p| p[0] == 255));

        let red = Frame::new(0, RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])));
        // 255 * 0.299 = 76.245
        assert!(red.to_grayscale().pixels().all(|p| p[0] == 76));
    }

    #[test]
    fn test_grayscale_keeps_pixel_layout() {
        // 宽高不同，确认行列没有错位
        let img = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 10 + y) as u8; 3]));
        let gray = Frame::new(0, img).to_grayscale();

        assert_eq!(gray.dimensions(), (5, 3));
        assert_eq!(gray.get_pixel(4, 0)[0], 40);
        assert_eq!(gray.get_pixel(0, 2)[0], 2);
        assert_eq!(gray.get_pixel(3, 1)[0], 31);
    }

    #[test]
    fn test_pixel_count_non_square() {
        let frame = Frame::new(0, RgbImage::new(7, 3));
        assert_eq!(frame.pixel_count(), 21);
    }

    #[test]
    fn test_clone_shares_pixels() {
        let frame = Frame::new(0, RgbImage::new(8, 8));
        let copy = frame.clone();
        let moved = frame.with_index(5);

        assert!(frame.shares_pixels_with(&copy));
        assert!(frame.shares_pixels_with(&moved));
        assert_eq!(moved.index, 5);
    }

    #[test]
    fn test_decode_png() {
        let img = RgbImage::from_pixel(6, 4, Rgb([1, 2, 3]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageOutputFormat::Png).unwrap();

        let frame = Frame::decode(2, bytes.get_ref()).unwrap();
        assert_eq!(frame.dimensions(), (6, 4));
        assert_eq!(frame.image().get_pixel(0, 0), &Rgb([1, 2, 3]));
    }
}
