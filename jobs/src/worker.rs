use crate::queue::Job;
use navigation::{NavigationService, ReloadSummary};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use wayfind_core::error::ErrorResponse;

/// Result of one processed job, reported to an optional outcome channel.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: Job,
    /// Queued reload requests folded into this one.
    pub coalesced: usize,
    pub result: Result<ReloadSummary, ErrorResponse>,
}

pub struct Worker {
    receiver: mpsc::Receiver<Job>,
    service: Arc<NavigationService>,
    outcomes: Option<mpsc::UnboundedSender<JobOutcome>>,
}

impl Worker {
    pub fn new(receiver: mpsc::Receiver<Job>, service: Arc<NavigationService>) -> Self {
        Self {
            receiver,
            service,
            outcomes: None,
        }
    }

    pub fn with_outcomes(mut self, outcomes: mpsc::UnboundedSender<JobOutcome>) -> Self {
        self.outcomes = Some(outcomes);
        self
    }

    pub async fn run(mut self) {
        info!("Worker started");
        while let Some(job) = self.receiver.recv().await {
            match job {
                Job::ReloadGraph { ref requested_by } => {
                    info!(
                        "Processing ReloadGraph requested by {}",
                        requested_by.as_deref().unwrap_or("unknown")
                    );
                    let coalesced = self.drain_pending_reloads();
                    let result = Self::process_reload(&self.service).await;
                    self.report(JobOutcome {
                        job,
                        coalesced,
                        result,
                    });
                }
            }
        }
        info!("Worker stopped");
    }

    /// Every reload is a full rebuild, so reload requests already waiting in
    /// the queue are satisfied by the one about to run.
    fn drain_pending_reloads(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(Job::ReloadGraph { .. }) = self.receiver.try_recv() {
            drained += 1;
        }
        drained
    }

    async fn process_reload(service: &NavigationService) -> Result<ReloadSummary, ErrorResponse> {
        match service.reload().await {
            Ok(summary) => {
                info!(
                    "Graph reloaded: {} ({} nodes, {} edges)",
                    summary.snapshot_id, summary.node_count, summary.edge_count
                );
                Ok(summary)
            }
            Err(e) => {
                error!("Failed to reload graph: {}", e);
                Err(e.to_response())
            }
        }
    }

    fn report(&self, outcome: JobOutcome) {
        if let Some(outcomes) = &self.outcomes {
            // Receiver gone just means nobody is listening any more.
            let _ = outcomes.send(outcome);
        }
    }
}
