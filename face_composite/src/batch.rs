// THEORY:
// The `batch` module renders many composites at once. A composite is pure CPU
// work with no shared state, so it parallelizes trivially; what the batch renderer
// adds is the plumbing: a fixed pool of workers fed round-robin by a single
// dispatcher, and a oneshot reply per task so results find their way back to the
// caller in submission order.
//
// Key architectural principles:
// 1.  **One Dispatcher, N Workers**: Tasks enter through a single unbounded
//     channel. A dispatcher task hands them to the workers in turn. Each worker
//     renders on tokio's blocking pool so the async runtime is never stalled.
// 2.  **Shared, Immutable Compositor**: Workers hold an `Arc<FaceCompositor>`.
//     There is no per-worker state to keep in sync.
// 3.  **Order Through Futures**: `render_all` submits every task first and then
//     joins the reply futures in submission order, so output order never depends
//     on which worker finished first.

use crate::composite::FaceCompositor;
use crate::config::CompositorConfig;
use crate::core_modules::features::FeatureSet;
use crate::error::CompositeError;
use futures::future::join_all;
use image::RgbImage;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub struct RenderTask {
    pub features: FeatureSet,
    pub seed: Option<u64>,
    pub result_sender: oneshot::Sender<RgbImage>,
}

pub struct BatchRenderer {
    task_sender: mpsc::UnboundedSender<RenderTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl BatchRenderer {
    /// Starts one worker per logical CPU. Must be called inside a tokio runtime.
    pub fn new(config: CompositorConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: CompositorConfig, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let compositor = Arc::new(FaceCompositor::new(config));
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<RenderTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<RenderTask>())
            .unzip();

        // Spawn dispatcher
        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        // Spawn workers
        let mut workers = Vec::with_capacity(worker_count);
        for (id, mut worker_receiver) in worker_receivers.into_iter().enumerate() {
            let compositor = Arc::clone(&compositor);
            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    debug!("Worker {id} rendering {} features", task.features.len());
                    let compositor = Arc::clone(&compositor);
                    let RenderTask { features, seed, result_sender } = task;
                    let rendered = tokio::task::spawn_blocking(move || match seed {
                        Some(seed) => compositor.create_composite_seeded(&features, seed),
                        None => compositor.create_composite(&features),
                    })
                    .await;

                    // A dropped receiver means the caller gave up; nothing to report.
                    if let Ok(image) = rendered {
                        let _ = result_sender.send(image);
                    }
                }
            });
            workers.push(worker);
        }

        info!("Batch renderer started with {worker_count} workers");
        Self { task_sender, workers }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Renders one composite on the pool. `seed` fixes the stubble; `None`
    /// defers to the configured seed or a fresh one.
    pub async fn render(&self, features: FeatureSet, seed: Option<u64>) -> Result<RgbImage, CompositeError> {
        let receiver = self.submit(features, seed)?;
        receiver.await.map_err(|_| CompositeError::WorkerUnavailable)
    }

    /// Renders every feature set and returns the images in input order.
    pub async fn render_all(&self, batch: Vec<FeatureSet>) -> Result<Vec<RgbImage>, CompositeError> {
        let receivers = batch
            .into_iter()
            .map(|features| self.submit(features, None))
            .collect::<Result<Vec<_>, _>>()?;

        join_all(receivers)
            .await
            .into_iter()
            .map(|result| result.map_err(|_| CompositeError::WorkerUnavailable))
            .collect()
    }

    fn submit(&self, features: FeatureSet, seed: Option<u64>) -> Result<oneshot::Receiver<RgbImage>, CompositeError> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(RenderTask { features, seed, result_sender })
            .map_err(|_| CompositeError::WorkerUnavailable)?;
        Ok(result_receiver)
    }
}

impl Drop for BatchRenderer {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> CompositorConfig {
        CompositorConfig {
            stubble_seed: Some(11),
            ..CompositorConfig::default()
        }
    }

    #[tokio::test]
    async fn pool_render_matches_direct_render() {
        let features = FeatureSet::new().with("faceShape", "square").with("facialHair", "stubble");
        let renderer = BatchRenderer::with_workers(seeded(), 2);
        let pooled = renderer.render(features.clone(), None).await.unwrap();
        let direct = FaceCompositor::new(seeded()).create_composite(&features);
        assert_eq!(pooled, direct);
    }

    #[tokio::test]
    async fn explicit_seed_overrides_configuration() {
        let features = FeatureSet::new().with("facialHair", "stubble");
        let renderer = BatchRenderer::with_workers(seeded(), 2);
        let pooled = renderer.render(features.clone(), Some(99)).await.unwrap();
        let direct = FaceCompositor::new(seeded()).create_composite_seeded(&features, 99);
        assert_eq!(pooled, direct);
    }

    #[tokio::test]
    async fn render_all_preserves_submission_order() {
        let shapes = ["oval", "round", "square", "diamond", "heart", "oblong"];
        let batch: Vec<FeatureSet> = shapes.iter().map(|s| FeatureSet::new().with("faceShape", *s)).collect();
        let renderer = BatchRenderer::with_workers(seeded(), 3);
        let images = renderer.render_all(batch.clone()).await.unwrap();

        let compositor = FaceCompositor::new(seeded());
        assert_eq!(images.len(), shapes.len());
        for (image, features) in images.iter().zip(&batch) {
            assert_eq!(*image, compositor.create_composite(features));
        }
    }

    #[tokio::test]
    async fn zero_workers_still_runs_one() {
        let renderer = BatchRenderer::with_workers(seeded(), 0);
        assert_eq!(renderer.worker_count(), 1);
        let image = renderer.render(FeatureSet::new(), None).await.unwrap();
        assert_eq!(image.dimensions(), (512, 512));
    }
}
