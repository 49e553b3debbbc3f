use crate::error::Result;

/// Outbound completion notification, fired once per successful run.
/// The real deployment points this at a messaging sink; locally it lands
/// in the operational log.
pub trait Notifier {
    fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Notifier that emits the summary as a tracing event
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<()> {
        tracing::info!(subject, body, "run notification");
        Ok(())
    }
}
