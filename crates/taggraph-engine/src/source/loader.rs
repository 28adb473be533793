use crossbeam_channel::Sender;
use taggraph_store::ContactSource;
use tracing::{info, warn};

use crate::source::Incoming;

/// Load contacts off-thread and deliver them as a single batch. The session
/// pumps the channel on its own thread, so the rebuild lands only after the
/// caller has had a chance to put up a loading state; the rebuild itself
/// stays one synchronous unit of work.
pub fn spawn_loader<S>(source: S, tx: Sender<Incoming>)
where
    S: ContactSource + Send + 'static,
{
    std::thread::spawn(move || match source.load() {
        Ok(contacts) => {
            info!(count = contacts.len(), "contacts loaded");
            let _ = tx.send(Incoming::Loaded(contacts));
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "contact source failed");
            let _ = tx.send(Incoming::Error(format!("{err:#}")));
        }
    });
}
