//! Decode invocation
//!
//! Submitting hands the current image to the engine on the rayon pool. The
//! single result comes back over a channel so the caller can apply it on its
//! own thread.

use crate::config::ScanConfig;
use crate::engine::{DecodeEngine, InputImage};
use crate::error::ScanError;
use crate::models::{DecodedSymbol, ImageReference};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

/// Outcome of one decode
pub type DecodeResult = Result<Vec<DecodedSymbol>, ScanError>;

/// Load `image` and run it through `engine` on the current thread
pub fn decode_reference(
    engine: &dyn DecodeEngine,
    image: &ImageReference,
    config: &ScanConfig,
) -> DecodeResult {
    let input = InputImage::from_reference(image, config)?;
    debug!(
        image = %image,
        width = input.width(),
        height = input.height(),
        "submitting image to engine"
    );
    engine.process(&input)
}

/// Submits decodes to a shared engine
#[derive(Clone)]
pub struct Scanner {
    engine: Arc<dyn DecodeEngine>,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner around `engine`
    pub fn new(engine: Arc<dyn DecodeEngine>, config: ScanConfig) -> Self {
        Self { engine, config }
    }

    /// Settings used when loading images
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Start decoding `image`
    ///
    /// Without an image this fails with [`ScanError::NoImageSelected`] and the
    /// engine is never called.
    pub fn submit(&self, image: Option<&ImageReference>) -> Result<PendingDecode, ScanError> {
        let image = image.ok_or(ScanError::NoImageSelected)?.clone();
        let engine = Arc::clone(&self.engine);
        let config = self.config.clone();
        let (tx, rx) = mpsc::channel();

        let job_image = image.clone();
        rayon::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                decode_reference(engine.as_ref(), &job_image, &config)
            }))
            .unwrap_or_else(|_| Err(ScanError::decode("decoder panicked")));
            // receiver may already be gone; nothing left to notify
            let _ = tx.send(result);
        });

        Ok(PendingDecode {
            image,
            receiver: rx,
        })
    }
}

/// A decode in flight; yields exactly one [`DecodeResult`]
#[derive(Debug)]
pub struct PendingDecode {
    image: ImageReference,
    receiver: Receiver<DecodeResult>,
}

impl PendingDecode {
    /// Image being decoded
    pub fn image(&self) -> &ImageReference {
        &self.image
    }

    /// Block until the result arrives
    pub fn wait(self) -> DecodeResult {
        self.receiver.recv().unwrap_or_else(|_| Err(worker_gone()))
    }

    /// Take the result if it already arrived
    pub fn try_take(&self) -> Option<DecodeResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_gone())),
        }
    }
}

fn worker_gone() -> ScanError {
    warn!("decode worker exited without a result");
    ScanError::decode("decoder exited without a result")
}
