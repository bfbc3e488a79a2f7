//! 帧 / 文本来源
//!
//! 通过 `yt-dlp` 元数据定位故事板（storyboard）或缩略图，下载后切成帧；
//! 文本为标题 + 描述。核心算法只依赖 [`VideoSource`] trait。

pub mod fetch;
pub mod info;
pub mod storyboard;
pub mod ytdlp;

use crate::core::video::Frame;
use thiserror::Error;

pub use fetch::{fetch_all, HttpImageLoader, ImageLoader};
pub use info::{FormatInfo, Fragment, ThumbnailInfo, VideoInfo};
pub use storyboard::{extract_tiles, StoryboardInfo};
pub use ytdlp::{load_video_info, YtDlpSource};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("图片解码失败: {0}")]
    Image(#[from] image::ImageError),
    #[error("元数据解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yt-dlp 执行失败: {0}")]
    Command(String),
    #[error("缺少元数据: {0}")]
    MissingMetadata(&'static str),
    #[error("没有可用的帧")]
    NoFrames,
}

/// 平台类别 + 待评分文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTextInfo {
    pub categories: Vec<String>,
    pub text: String,
}

/// 视频帧与文本的提供者
pub trait VideoSource: Send + Sync {
    fn text_info(&self) -> Result<VideoTextInfo, SourceError>;

    /// 按时间顺序返回解码后的帧
    fn frames(&self) -> Result<Vec<Frame>, SourceError>;
}
