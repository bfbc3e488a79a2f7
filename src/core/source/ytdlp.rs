use super::fetch::{fetch_all, HttpImageLoader, ImageLoader};
use super::info::VideoInfo;
use super::storyboard::extract_tiles;
use super::{SourceError, VideoSource, VideoTextInfo};
use crate::core::config::AnalysisConfig;
use crate::core::video::Frame;
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::process::{Command, Stdio};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// 调用 `yt-dlp` 获取视频元数据（不下载视频本体）
pub fn load_video_info(video_id: &str) -> Result<VideoInfo, SourceError> {
    let url = format!("{}{}", WATCH_URL, video_id);
    info!("🔎 Fetching metadata for {}", url);

    let output = Command::new("yt-dlp")
        .args(["--dump-single-json", "--skip-download", "--no-warnings"])
        .arg(&url)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Command(format!(
            "{} ({})",
            stderr.trim(),
            output.status
        )));
    }

    VideoInfo::from_json(&String::from_utf8_lossy(&output.stdout))
}

/// 基于 yt-dlp 元数据的视频来源
///
/// 非直播视频取故事板切片；直播视频没有故事板，退化为缩略图。
/// 帧只下载一次，之后的调用直接返回缓存。
pub struct YtDlpSource<L: ImageLoader = HttpImageLoader> {
    info: VideoInfo,
    loader: L,
    frame_limit: usize,
    thumbnail_size: (u32, u32),
    min_thumbnail_preference: i32,
    frames: OnceCell<Vec<Frame>>,
}

impl YtDlpSource<HttpImageLoader> {
    pub fn fetch(video_id: &str, config: &AnalysisConfig) -> Result<Self, SourceError> {
        let info = load_video_info(video_id)?;
        Ok(Self::from_config(info, HttpImageLoader::new()?, config))
    }
}

impl<L: ImageLoader> YtDlpSource<L> {
    pub fn from_config(info: VideoInfo, loader: L, config: &AnalysisConfig) -> Self {
        Self {
            info,
            loader,
            frame_limit: config.frame_limit,
            thumbnail_size: config.thumbnail_size,
            min_thumbnail_preference: config.min_thumbnail_preference,
            frames: OnceCell::new(),
        }
    }

    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn thumbnail_frames(&self) -> Vec<Frame> {
        let urls = self.info.thumbnail_urls(self.min_thumbnail_preference);
        let (w, h) = self.thumbnail_size;
        info!("📺 Live video {}: using {} thumbnails", self.info.id, urls.len());

        fetch_all(&self.loader, &urls)
            .into_iter()
            .enumerate()
            .map(|(i, img)| Frame::from_dynamic(i, img).resize_to(w, h))
            .collect()
    }

    fn storyboard_frames(&self) -> Result<Vec<Frame>, SourceError> {
        let board = self.info.storyboard()?;
        let urls = board.sampled_fragment_urls(self.frame_limit);
        info!(
            "🧩 Storyboard {}x{} ({}x{} px), {} of {} sheets",
            board.columns,
            board.rows,
            board.tile_width,
            board.tile_height,
            urls.len(),
            board.fragment_urls.len()
        );

        let frames = fetch_all(&self.loader, &urls)
            .iter()
            .flat_map(|sheet| {
                extract_tiles(
                    sheet,
                    board.columns,
                    board.rows,
                    board.tile_width,
                    board.tile_height,
                )
            })
            .enumerate()
            .map(|(i, tile)| Frame::new(i, tile))
            .collect();
        Ok(frames)
    }
}

impl<L: ImageLoader> VideoSource for YtDlpSource<L> {
    fn text_info(&self) -> Result<VideoTextInfo, SourceError> {
        Ok(self.info.text_info())
    }

    fn frames(&self) -> Result<Vec<Frame>, SourceError> {
        let frames = self.frames.get_or_try_init(|| {
            if self.info.is_live() {
                Ok(self.thumbnail_frames())
            } else {
                self.storyboard_frames()
            }
        })?;
        if frames.is_empty() {
            return Err(SourceError::NoFrames);
        }
        debug!("{} frames ready for {}", frames.len(), self.info.id);
        Ok(frames.clone())
    }
}
