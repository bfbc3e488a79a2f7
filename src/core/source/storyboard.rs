use image::{DynamicImage, GenericImageView, RgbImage};

/// 故事板：每张拼图包含 rows × columns 个等尺寸缩略帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardInfo {
    pub rows: u32,
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub fragment_urls: Vec<String>,
}

impl StoryboardInfo {
    pub fn tiles_per_fragment(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    /// 拼图抽样步长，使总帧数大致不超过 `frame_limit`
    pub fn fragment_step(&self, frame_limit: usize) -> usize {
        let total = self.tiles_per_fragment() * self.fragment_urls.len();
        (total / frame_limit.max(1)).max(1)
    }

    pub fn sampled_fragment_urls(&self, frame_limit: usize) -> Vec<&str> {
        self.fragment_urls
            .iter()
            .step_by(self.fragment_step(frame_limit))
            .map(String::as_str)
            .collect()
    }
}

/// 按行优先把拼图切成帧；越界部分以黑色填充，保证所有帧尺寸一致
pub fn extract_tiles(
    sheet: &DynamicImage,
    columns: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
) -> Vec<RgbImage> {
    let sheet = sheet.to_rgb8();
    let (sheet_w, sheet_h) = sheet.dimensions();
    let mut tiles = Vec::with_capacity((rows * columns) as usize);

    for row in 0..rows {
        for col in 0..columns {
            let left = tile_width * col;
            let top = tile_height * row;
            let mut tile = RgbImage::new(tile_width, tile_height);

            if left < sheet_w && top < sheet_h {
                let w = tile_width.min(sheet_w - left);
                let h = tile_height.min(sheet_h - top);
                let view = sheet.view(left, top, w, h);
                for (x, y, pixel) in view.pixels() {
                    tile.put_pixel(x, y, pixel);
                }
            }

            tiles.push(tile);
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn board(rows: u32, columns: u32, fragments: usize) -> StoryboardInfo {
        StoryboardInfo {
            rows,
            columns,
            tile_width: 4,
            tile_height: 3,
            fragment_urls: (0..fragments).map(|i| format!("https://img/M{}.jpg", i)).collect(),
        }
    }

    #[test]
    fn test_fragment_step() {
        // 5x5 x 20 = 500 帧，上限 50 -> 每 10 张取一张
        assert_eq!(board(5, 5, 20).fragment_step(50), 10);
        // 总量小于上限时步长为 1
        assert_eq!(board(3, 3, 2).fragment_step(50), 1);
        assert_eq!(board(3, 3, 2).fragment_step(0), 18);
    }

    #[test]
    fn test_sampled_fragment_urls() {
        let info = board(5, 5, 20);
        let sampled = info.sampled_fragment_urls(50);
        assert_eq!(sampled, vec!["https://img/M0.jpg", "https://img/M10.jpg"]);
    }

    #[test]
    fn test_extract_tiles_row_major() {
        // 2 行 3 列，每格颜色由列、行编码
        let sheet = RgbImage::from_fn(12, 6, |x, y| Rgb([(x / 4) as u8 * 10, (y / 3) as u8 * 10, 0]));
        let tiles = extract_tiles(&DynamicImage::ImageRgb8(sheet), 3, 2, 4, 3);

        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.dimensions() == (4, 3)));
        assert_eq!(tiles[0].get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(tiles[2].get_pixel(3, 2), &Rgb([20, 0, 0]));
        assert_eq!(tiles[4].get_pixel(1, 1), &Rgb([10, 10, 0]));
    }

    #[test]
    fn test_extract_tiles_pads_partial_sheet() {
        let sheet = RgbImage::from_pixel(6, 3, Rgb([200, 200, 200]));
        let tiles = extract_tiles(&DynamicImage::ImageRgb8(sheet), 2, 2, 4, 3);

        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.dimensions() == (4, 3)));
        // 第二格只有 2 列在拼图内
        assert_eq!(tiles[1].get_pixel(1, 0), &Rgb([200, 200, 200]));
        assert_eq!(tiles[1].get_pixel(2, 0), &Rgb([0, 0, 0]));
        // 第二行完全越界
        assert!(tiles[2].pixels().all(|p| p == &Rgb([0, 0, 0])));
    }
}
