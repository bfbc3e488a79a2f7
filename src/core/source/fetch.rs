use super::SourceError;
use image::DynamicImage;
use log::warn;
use rayon::prelude::*;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// 按 URL 获取并解码图片
pub trait ImageLoader: Send + Sync {
    fn load(&self, url: &str) -> Result<DynamicImage, SourceError>;
}

pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &str) -> Result<DynamicImage, SourceError> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// 并行下载全部图片；失败的条目记录警告后跳过，其余保持原顺序
pub fn fetch_all<L: ImageLoader + ?Sized>(loader: &L, urls: &[&str]) -> Vec<DynamicImage> {
    urls.par_iter()
        .map(|url| match loader.load(url) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("⚠️ Skipping image {}: {}", url, e);
                None
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
