use super::failure::FailureInjector;
use crate::config::ElectionConfig;
use crate::election::{ElectionEngine, ElectionState};
use crate::error::{ElectionError, Result};
use crate::node::Transport;
use crate::registry::Registry;

/// The per-node scheduling loop.
pub struct Monitor<R, T> {
    engine: ElectionEngine<R, T>,
    injector: FailureInjector,
    config: ElectionConfig,
}

impl<R: Registry, T: Transport> Monitor<R, T> {
    pub fn new(engine: ElectionEngine<R, T>, config: ElectionConfig) -> Self {
        Self {
            engine,
            injector: FailureInjector::from_config(&config),
            config,
        }
    }

    pub fn with_injector(mut self, injector: FailureInjector) -> Self {
        self.injector = injector;
        self
    }

    pub fn engine(&self) -> &ElectionEngine<R, T> {
        &self.engine
    }

    /// Ticks on the configured cadence (base + jitter) until the node must terminate.
    ///
    /// Returns only with `RegistryUnavailable`, once the node's own entry can no
    /// longer be resolved.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            "Process [{}] started to participate in leader election",
            self.engine.node().name()
        );

        loop {
            tokio::time::sleep(self.config.next_tick_delay()).await;
            self.tick().await?;
        }
    }

    /// One tick: scan/elect, roll for failure, verify own registration.
    pub async fn tick(&mut self) -> Result<ElectionState> {
        if let Err(e) = self.engine.tick().await {
            tracing::warn!(
                "Process [{}] election round failed: {}",
                self.engine.node().name(),
                e
            );
        }

        self.injector.roll(self.engine.node()).await;

        self.verify_registration().await?;

        Ok(self.engine.state().await)
    }

    async fn verify_registration(&self) -> Result<()> {
        let name = self.engine.node().name();
        match self.engine.peers().registry().lookup(name).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::info!(
                    "Leader election simulator stopped, terminating process [{}]",
                    name
                );
                Err(ElectionError::RegistryUnavailable(e.to_string()))
            }
        }
    }
}
