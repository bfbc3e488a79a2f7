use super::storyboard::StoryboardInfo;
use super::{SourceError, VideoTextInfo};
use serde::Deserialize;

/// `yt-dlp --dump-single-json` 输出中用到的字段
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub is_live: Option<bool>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
    #[serde(default)]
    pub thumbnails: Vec<ThumbnailInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fragments: Option<Vec<Fragment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailInfo {
    pub url: String,
    #[serde(default)]
    pub preference: Option<i32>,
}

impl VideoInfo {
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_live(&self) -> bool {
        self.is_live.unwrap_or(false)
    }

    /// 文本 = 标题 + 空格 + 描述
    pub fn text_info(&self) -> VideoTextInfo {
        VideoTextInfo {
            categories: self.categories.clone().unwrap_or_default(),
            text: format!(
                "{} {}",
                self.title,
                self.description.as_deref().unwrap_or_default()
            ),
        }
    }

    /// 质量最高的故事板（format_id 含 `sb`，按 id 升序取第一个，通常为 sb0）
    pub fn storyboard(&self) -> Result<StoryboardInfo, SourceError> {
        let mut boards: Vec<&FormatInfo> = self
            .formats
            .iter()
            .filter(|f| f.format_id.contains("sb"))
            .collect();
        boards.sort_by(|a, b| a.format_id.cmp(&b.format_id));

        let best = boards
            .first()
            .ok_or(SourceError::MissingMetadata("storyboard format"))?;

        Ok(StoryboardInfo {
            rows: best.rows.ok_or(SourceError::MissingMetadata("storyboard rows"))?,
            columns: best
                .columns
                .ok_or(SourceError::MissingMetadata("storyboard columns"))?,
            tile_width: best
                .width
                .ok_or(SourceError::MissingMetadata("storyboard width"))?,
            tile_height: best
                .height
                .ok_or(SourceError::MissingMetadata("storyboard height"))?,
            fragment_urls: best
                .fragments
                .as_ref()
                .ok_or(SourceError::MissingMetadata("storyboard fragments"))?
                .iter()
                .map(|f| f.url.clone())
                .collect(),
        })
    }

    /// preference 不高于阈值的缩略图通常是灰色占位图；未标注 preference 的保留
    pub fn thumbnail_urls(&self, min_preference: i32) -> Vec<&str> {
        self.thumbnails
            .iter()
            .filter(|t| t.preference.map_or(true, |p| p > min_preference))
            .map(|t| t.url.as_str())
            .collect()
    }
}
