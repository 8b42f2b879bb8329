//! Long-polling dispatcher: fetches updates, parses them, and runs handler
//! groups in registration order until one consumes the update.

use std::sync::Arc;
use std::time::Duration;

use flyzex_core::{HandlerFlow, Update, UpdateHandler};
use tracing::{error, info, instrument};

use crate::api::RubikaApi;
use crate::parse::parse_update;

const POLL_PAUSE: Duration = Duration::from_secs(1);
const POLL_LIMIT: u32 = 25;

pub struct Dispatcher {
    api: Arc<RubikaApi>,
    handlers: Vec<Arc<dyn UpdateHandler>>,
}

impl Dispatcher {
    pub fn new(api: Arc<RubikaApi>) -> Self {
        Self {
            api,
            handlers: Vec::new(),
        }
    }

    /// Appends a handler group (builder style).
    pub fn add_handler(mut self, handler: Arc<dyn UpdateHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs handler groups in order until one reports [`HandlerFlow::Handled`].
    /// Handler errors are logged; they never stop the polling loop.
    #[instrument(skip(self, update))]
    pub async fn dispatch(&self, update: &Update) {
        for handler in &self.handlers {
            let name = std::any::type_name_of_val(handler.as_ref());
            match handler.handle(update).await {
                Ok(HandlerFlow::Handled) => {
                    info!(handler = %name, "update handled");
                    return;
                }
                Ok(HandlerFlow::Pass) => {}
                Err(e) => {
                    error!(handler = %name, error = %e, "handler failed");
                    return;
                }
            }
        }
    }

    /// Polls `getUpdates` until the future is dropped (e.g. on ctrl-c).
    pub async fn run_polling(&self) {
        info!("dispatcher polling started");
        let mut offset: Option<String> = None;
        loop {
            match self.api.get_updates(offset.as_deref(), POLL_LIMIT).await {
                Ok((raw_updates, next_offset)) => {
                    for raw in &raw_updates {
                        if let Some(update) = parse_update(raw) {
                            self.dispatch(&update).await;
                        }
                    }
                    if next_offset.is_some() {
                        offset = next_offset;
                    }
                }
                Err(e) => {
                    error!(error = %e, "failed to poll updates");
                }
            }
            tokio::time::sleep(POLL_PAUSE).await;
        }
    }
}
