//! Background QR generation with cancellation by supersession.
//!
//! Every submitted request gets a monotonically increasing id. Results are
//! produced on worker threads and only the result carrying the most recently
//! issued id is handed back; anything older is dropped on receipt.

use crate::error::{Error, Result};
use crate::logo::{composite_logo, LogoPlacement};
use crate::render::{render_image, RenderOptions};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use image::{DynamicImage, RgbaImage};
use log::{debug, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

/// Identifier of a submitted generation request.
pub type RequestId = u64;

/// A logo and where to put it.
#[derive(Debug, Clone)]
pub struct LogoOverlay {
    pub image: DynamicImage,
    pub placement: LogoPlacement,
}

/// Everything needed to produce one QR image.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub render: RenderOptions,
    pub logo: Option<LogoOverlay>,
}

/// Renders the request and composites its logo, if any.
///
/// The logo's safe margin always uses the quiet zone of `render`, overriding
/// whatever border width the placement carries.
///
/// # Errors
///
/// Returns an error if the text cannot be encoded as a QR code.
pub fn generate(request: &GenerationRequest) -> Result<RgbaImage> {
    let qr = render_image(&request.text, &request.render)?;
    let Some(logo) = &request.logo else {
        return Ok(qr);
    };

    let placement = LogoPlacement {
        border_width: request.render.border_width_px(),
        ..logo.placement
    };
    Ok(composite_logo(
        &DynamicImage::ImageRgba8(qr),
        Some(&logo.image),
        &placement,
    ))
}

type Completed = (RequestId, Result<RgbaImage>);

/// Runs generation requests off the calling thread.
pub struct Generator {
    latest: Arc<AtomicU64>,
    tx: Sender<Completed>,
    rx: Receiver<Completed>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    /// Starts generating `request` and returns its id.
    ///
    /// Any request still in flight is superseded: its result will be dropped.
    pub fn submit(&self, request: GenerationRequest) -> RequestId {
        self.spawn(move || generate(&request))
    }

    /// Runs `job` on a new worker thread under a fresh request id.
    ///
    /// A panic inside `job` is caught and delivered as
    /// [`Error::WorkerPanicked`] so receivers never wait on a dead worker.
    fn spawn<F>(&self, job: F) -> RequestId
    where
        F: FnOnce() -> Result<RgbaImage> + Send + 'static,
    {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let tx = self.tx.clone();
        let latest = Arc::clone(&self.latest);

        thread::spawn(move || {
            debug!("Worker started for request {id}");
            if latest.load(Ordering::SeqCst) != id {
                debug!("Request {id} superseded before it started");
            }
            let result = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
                let message = panic_message(&*payload);
                warn!("Worker for request {id} panicked: {message}");
                Err(Error::WorkerPanicked(message))
            });
            if tx.send((id, result)).is_err() {
                debug!("Generator dropped before request {id} finished");
            }
            debug!("Worker finished for request {id}");
        });

        id
    }

    /// Whether `id` is the most recently submitted request.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest.load(Ordering::SeqCst) == id
    }

    /// Blocks until the latest request completes, discarding stale results.
    ///
    /// # Errors
    ///
    /// Returns the generation error of the latest request,
    /// [`Error::WorkerPanicked`] if its worker panicked, or
    /// [`Error::WorkerDisconnected`] if nothing was ever submitted.
    pub fn recv_latest(&self) -> Result<RgbaImage> {
        if self.latest.load(Ordering::SeqCst) == 0 {
            return Err(Error::WorkerDisconnected);
        }
        loop {
            let (id, result) = self.rx.recv().map_err(|_| Error::WorkerDisconnected)?;
            if self.is_current(id) {
                return result;
            }
            debug!("Discarding stale result for request {id}");
        }
    }

    /// Non-blocking variant of [`Generator::recv_latest`].
    ///
    /// Returns `None` while the latest request is still running.
    pub fn try_recv_latest(&self) -> Option<Result<RgbaImage>> {
        loop {
            match self.rx.try_recv() {
                Ok((id, result)) if self.is_current(id) => return Some(result),
                Ok((id, _)) => debug!("Discarding stale result for request {id}"),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return Some(Err(Error::WorkerDisconnected)),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
