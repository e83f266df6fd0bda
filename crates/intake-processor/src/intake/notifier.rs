use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::domain::IntakeRequest;
use super::email::EmailFormatter;
use super::store::DeliverySink;
use super::validation::AcceptanceValidator;

/// Consumes change-feed batches and prepares an administrator notification for
/// every record that passes the acceptance rule set.
///
/// Records are processed independently and in batch order; a failure on one
/// record is logged and never aborts the rest of the batch. Redelivery of a
/// batch is harmless: the only side effects are logs and sink calls.
pub struct ChangeNotifier<D> {
    validator: AcceptanceValidator,
    formatter: EmailFormatter,
    sink: Arc<D>,
}

impl<D: DeliverySink> ChangeNotifier<D> {
    pub fn new(sink: Arc<D>) -> Self {
        Self {
            validator: AcceptanceValidator,
            formatter: EmailFormatter,
            sink,
        }
    }

    pub fn on_new_records(&self, batch: &[IntakeRequest]) {
        if batch.is_empty() {
            info!("no new records to process");
            return;
        }

        info!(count = batch.len(), "processing new intake records");
        for record in batch {
            self.process_record(record);
        }
    }

    fn process_record(&self, record: &IntakeRequest) {
        info!(
            requestor_name = %record.requestor_name,
            requestor_email = %record.requestor_email,
            "processing intake record"
        );

        let result = self.validator.validate(record);
        if !result.is_valid() {
            warn!(
                record_id = %record.id,
                errors = ?result.errors,
                "record failed acceptance validation, skipping notification"
            );
            return;
        }

        let subject = self.formatter.subject(record);
        let body = self.formatter.body(record);
        info!(%subject, body_length = body.len(), "notification prepared for administrator");

        match self.sink.send(&subject, &body) {
            Ok(()) => info!(record_id = %record.id, "notification handed to delivery sink"),
            Err(err) => error!(
                record_id = %record.id,
                error = %err,
                "delivery sink rejected notification, continuing batch"
            ),
        }
    }
}

/// Handle used by the submission path to announce newly durable records.
#[derive(Clone)]
pub struct ChangeFeedHandle {
    sender: mpsc::UnboundedSender<Vec<IntakeRequest>>,
}

impl ChangeFeedHandle {
    pub fn publish(&self, batch: Vec<IntakeRequest>) {
        if self.sender.send(batch).is_err() {
            warn!("change feed receiver dropped, batch not delivered");
        }
    }
}

/// Drains published batches into the notifier until every handle is dropped.
pub struct ChangeFeedPump<D> {
    receiver: mpsc::UnboundedReceiver<Vec<IntakeRequest>>,
    notifier: ChangeNotifier<D>,
}

impl<D: DeliverySink> ChangeFeedPump<D> {
    pub async fn run(mut self) {
        while let Some(batch) = self.receiver.recv().await {
            self.notifier.on_new_records(&batch);
        }
    }
}

/// Builds the in-process change feed: a cloneable publisher handle plus the
/// pump that delivers batches to the given notifier.
pub fn change_feed<D: DeliverySink>(
    notifier: ChangeNotifier<D>,
) -> (ChangeFeedHandle, ChangeFeedPump<D>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        ChangeFeedHandle { sender },
        ChangeFeedPump { receiver, notifier },
    )
}
