//! Sinks for shots resolved while the engine drives the computer player.

use tokio::sync::mpsc;

use crate::domain::ShotReport;

#[async_trait::async_trait]
pub trait ShotListener: Send {
    /// Called once per bot shot, after turn and win state are updated.
    async fn on_shot(&mut self, report: &ShotReport) -> anyhow::Result<()>;
}

/// Collects reports in memory.
#[async_trait::async_trait]
impl ShotListener for Vec<ShotReport> {
    async fn on_shot(&mut self, report: &ShotReport) -> anyhow::Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

/// Forwards reports to a channel, e.g. a session's outbound queue.
#[async_trait::async_trait]
impl ShotListener for mpsc::UnboundedSender<ShotReport> {
    async fn on_shot(&mut self, report: &ShotReport) -> anyhow::Result<()> {
        self.send(report.clone())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl ShotListener for mpsc::Sender<ShotReport> {
    async fn on_shot(&mut self, report: &ShotReport) -> anyhow::Result<()> {
        self.send(report.clone())
            .await
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}
