use super::{ClassifierError, ClassifierScores, ImageClassifier};
use crate::core::video::Frame;
use log::{error, info};
use once_cell::sync::OnceCell;
use std::sync::Arc;

type Loader<C> = Box<dyn Fn() -> Result<C, ClassifierError> + Send + Sync>;

struct Inner<C> {
    cell: OnceCell<C>,
    loader: Loader<C>,
}

/// 进程内共享的分类器，首次使用时加载
///
/// 克隆只增加引用计数；加载失败不会写入缓存，下次调用会重试。
pub struct SharedClassifier<C> {
    inner: Arc<Inner<C>>,
}

impl<C: ImageClassifier> SharedClassifier<C> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<C, ClassifierError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                cell: OnceCell::new(),
                loader: Box::new(loader),
            }),
        }
    }

    pub fn preloaded(classifier: C) -> Self {
        let shared = Self::new(|| Err(ClassifierError::NotInitialized));
        // 新建的 cell 必然为空
        let _ = shared.inner.cell.set(classifier);
        shared
    }

    pub fn get(&self) -> Result<&C, ClassifierError> {
        self.inner.cell.get_or_try_init(|| {
            info!("🧠 Loading image classifier");
            (self.inner.loader)().map_err(|e| {
                error!("❌ Classifier load failed: {}", e);
                e
            })
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.cell.get().is_some()
    }
}

impl<C> Clone for SharedClassifier<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: ImageClassifier> ImageClassifier for SharedClassifier<C> {
    fn classify(&self, frame: &Frame) -> Result<ClassifierScores, ClassifierError> {
        self.get()?.classify(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::{placeholder_scores, scores_from_output};
    use image::RgbImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockClassifier;

    impl ImageClassifier for MockClassifier {
        fn classify(&self, _frame: &Frame) -> Result<ClassifierScores, ClassifierError> {
            scores_from_output(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        }
    }

    fn frame() -> Frame {
        Frame::new(0, RgbImage::new(4, 4))
    }

    #[test]
    fn test_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let shared = SharedClassifier::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(MockClassifier)
        });
        let other = shared.clone();

        assert!(!shared.is_initialized());
        shared.classify(&frame()).unwrap();
        other.classify(&frame()).unwrap();

        assert!(other.is_initialized());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let shared = SharedClassifier::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ClassifierError::LoadFailed("model file missing".into()))
            } else {
                Ok(MockClassifier)
            }
        });

        assert!(matches!(
            shared.classify(&frame()),
            Err(ClassifierError::LoadFailed(_))
        ));
        assert!(!shared.is_initialized());

        let scores = shared.classify(&frame()).unwrap();
        assert_eq!(scores["graphics"], 1.0);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_preloaded() {
        let shared = SharedClassifier::preloaded(MockClassifier);
        assert!(shared.is_initialized());
        assert_ne!(shared.classify(&frame()).unwrap(), placeholder_scores());
    }
}
