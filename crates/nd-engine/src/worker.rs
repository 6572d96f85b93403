//! A background worker that owns one [`DiceEngine`].
//!
//! The engine runs on its own OS thread and serves requests one at a time in
//! arrival order. Callers hold a cheap, cloneable [`ChanceWorker`] handle and
//! `await` each answer; the thread exits once every handle is dropped.

use tokio::sync::{mpsc, oneshot};

use crate::config::EngineConfig;
use crate::engine::DiceEngine;
use crate::error::{DiceError, EngineResult};
use crate::request::ChanceRequest;

struct Job {
    request: ChanceRequest,
    reply: oneshot::Sender<EngineResult<f64>>,
}

/// Handle to a running chance worker.
#[derive(Debug, Clone)]
pub struct ChanceWorker {
    sender: mpsc::UnboundedSender<Job>,
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("request", &self.request).finish()
    }
}

impl ChanceWorker {
    /// Start a worker thread with a fresh engine.
    pub fn spawn(config: EngineConfig) -> EngineResult<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        std::thread::Builder::new()
            .name("chance-worker".to_string())
            .spawn(move || {
                let mut engine = DiceEngine::new(config);
                tracing::debug!("chance worker started");
                while let Some(job) = receiver.blocking_recv() {
                    let result = engine.handle(&job.request);
                    if job.reply.send(result).is_err() {
                        tracing::debug!("caller went away before the answer was ready");
                    }
                }
                tracing::debug!(stats = ?engine.stats(), "chance worker stopped");
            })?;

        Ok(Self { sender })
    }

    /// Send a request to the worker and wait for the ratio.
    pub async fn chance(&self, request: ChanceRequest) -> EngineResult<f64> {
        let (reply, answer) = oneshot::channel();
        self.sender
            .send(Job { request, reply })
            .map_err(|_| DiceError::WorkerClosed)?;
        answer.await.map_err(|_| DiceError::WorkerClosed)?
    }
}
