//! Request-coalescing art generation.
//!
//! Hosts that regenerate art on every input change (new image, new symbols,
//! resized display) submit requests to an [`ArtGenerator`]. A background
//! worker runs at most one composition at a time; a request submitted while
//! another is still waiting replaces it, so stale work is dropped instead of
//! queued.

use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ascii::{
    compose, resolve, ArtError, ArtGrid, GridRequest, GridSize, LuminanceField, PaletteCache,
    DEFAULT_CHAR_ASPECT_RATIO,
};
use crate::raster::GlyphRasterizer;

/// Everything needed to produce one piece of art.
#[derive(Debug, Clone)]
pub struct ArtRequest {
    pub image: Arc<LuminanceField>,
    pub symbols: String,
    pub grid: GridRequest,
    /// Grid that fits the display area.
    pub auto_size: GridSize,
    pub preserve_aspect: bool,
    /// Height over width of one character cell.
    pub char_aspect: f32,
    /// Map bright image areas to dense symbols (for light-on-dark display).
    pub invert: bool,
}

impl ArtRequest {
    /// Request with automatic sizing, aspect preservation and the default
    /// character aspect.
    pub fn new(image: Arc<LuminanceField>, symbols: impl Into<String>, auto_size: GridSize) -> Self {
        Self {
            image,
            symbols: symbols.into(),
            grid: GridRequest::auto(),
            auto_size,
            preserve_aspect: true,
            char_aspect: DEFAULT_CHAR_ASPECT_RATIO,
            invert: false,
        }
    }

    /// Image aspect ratio measured in character cells.
    pub fn source_aspect(&self) -> f32 {
        self.image.aspect_ratio() * self.char_aspect
    }
}

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Grid size actually used, after aspect correction and clamping.
    pub size: GridSize,
    pub art: ArtGrid,
}

/// Render one request synchronously.
///
/// Resolves the grid size, clamps it to the image so that every cell holds
/// at least one pixel, fetches (or calibrates) the palette and composes.
pub fn render_request<R>(
    cache: &mut PaletteCache,
    rasterizer: &R,
    request: &ArtRequest,
) -> Result<Rendered, ArtError>
where
    R: GlyphRasterizer + ?Sized,
{
    let image = &request.image;
    let resolved = resolve(
        request.grid,
        request.auto_size,
        request.source_aspect(),
        request.preserve_aspect,
    );
    let size = resolved.clamp_to(image.width(), image.height());
    if size != resolved {
        log::debug!(
            "Grid {}x{} clamped to {}x{} for {}x{} image",
            resolved.cols,
            resolved.rows,
            size.cols,
            size.rows,
            image.width(),
            image.height()
        );
    }

    let palette = cache.get_or_calibrate(&request.symbols, rasterizer)?;
    let art = if request.invert {
        compose(&image.inverted(), &palette, size.cols, size.rows)?
    } else {
        compose(image, &palette, size.cols, size.rows)?
    };
    Ok(Rendered { size, art })
}

/// Outcome of one submitted request.
#[derive(Debug)]
pub struct ArtOutcome {
    /// Id returned by [`ArtGenerator::submit`].
    pub id: u64,
    pub result: Result<Rendered, ArtError>,
}

#[derive(Debug, Default)]
struct State {
    pending: Option<(u64, ArtRequest)>,
    next_id: u64,
    superseded: u64,
    busy: bool,
    stop: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    wake: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking job never holds the lock, so poisoning leaves the
        // state consistent
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Background art generator with a single pending-request slot.
pub struct ArtGenerator {
    shared: Arc<Shared>,
    outcomes: Receiver<ArtOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl ArtGenerator {
    /// Start the worker thread. The rasterizer is moved into the worker and
    /// used for every palette calibration.
    pub fn spawn<R>(rasterizer: R) -> std::io::Result<Self>
    where
        R: GlyphRasterizer + Send + 'static,
    {
        let shared = Arc::new(Shared::default());
        let (tx, rx) = mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("art-generator".into())
            .spawn(move || run_generation_loop(worker_shared, rasterizer, tx))?;

        Ok(Self {
            shared,
            outcomes: rx,
            worker: Some(worker),
        })
    }

    /// Submit a request and return its id.
    ///
    /// If an earlier request is still waiting to start, it is dropped and
    /// never produces an outcome. A request already being composed runs to
    /// completion.
    pub fn submit(&self, request: ArtRequest) -> u64 {
        let mut state = self.shared.lock();
        state.next_id += 1;
        let id = state.next_id;
        if let Some((old, _)) = state.pending.replace((id, request)) {
            state.superseded += 1;
            log::debug!("Request #{} superseded by #{}", old, id);
        }
        drop(state);
        self.shared.wake.notify_all();
        id
    }

    /// Number of requests dropped because a newer one replaced them.
    pub fn superseded(&self) -> u64 {
        self.shared.lock().superseded
    }

    /// True while a request is waiting or being composed.
    pub fn is_busy(&self) -> bool {
        let state = self.shared.lock();
        state.busy || state.pending.is_some()
    }

    /// Block until the next outcome arrives.
    ///
    /// Fails only if the worker has exited, e.g. after a rasterizer panic.
    pub fn recv(&self) -> Result<ArtOutcome, RecvError> {
        self.outcomes.recv()
    }

    /// Next outcome if one is ready.
    ///
    /// `TryRecvError::Empty` means nothing has finished yet;
    /// `TryRecvError::Disconnected` means the worker is gone.
    pub fn try_recv(&self) -> Result<ArtOutcome, TryRecvError> {
        self.outcomes.try_recv().map_err(|e| {
            if e == TryRecvError::Disconnected {
                log::warn!("Art generator worker has exited");
            }
            e
        })
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<ArtOutcome, RecvTimeoutError> {
        self.outcomes.recv_timeout(timeout).map_err(|e| {
            if e == RecvTimeoutError::Disconnected {
                log::warn!("Art generator worker has exited");
            }
            e
        })
    }
}

impl Drop for ArtGenerator {
    fn drop(&mut self) {
        self.shared.lock().stop = true;
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            // A panicked worker has nothing left to clean up
            let _ = worker.join();
        }
    }
}

/// Worker loop: wait for a pending request, render it, publish the outcome.
fn run_generation_loop<R>(shared: Arc<Shared>, rasterizer: R, tx: Sender<ArtOutcome>)
where
    R: GlyphRasterizer,
{
    let mut cache = PaletteCache::new();

    loop {
        let (id, request) = {
            let mut state = shared.lock();
            loop {
                if state.stop {
                    return;
                }
                if let Some(job) = state.pending.take() {
                    state.busy = true;
                    break job;
                }
                state = shared
                    .wake
                    .wait(state)
                    .unwrap_or_else(|e| e.into_inner());
            }
        };

        let result = render_request(&mut cache, &rasterizer, &request);
        match &result {
            Ok(rendered) => log::debug!(
                "Request #{} rendered at {}x{}",
                id,
                rendered.size.cols,
                rendered.size.rows
            ),
            Err(e) => log::warn!("Request #{} failed: {}", id, e),
        }

        shared.lock().busy = false;
        if tx.send(ArtOutcome { id, result }).is_err() {
            // Receiver gone: the generator is being dropped
            return;
        }
    }
}
