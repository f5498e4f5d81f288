//! Messages the form and view modules send to the Shell.

use tokio::sync::broadcast;

use crate::filter::FilterCriteria;
use crate::record::{ScheduleId, ScheduleRecord};

/// A completed user action. The Shell reacts to every variant by closing
/// the open dialog and scheduling a refetch.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent {
    Created(ScheduleRecord),
    Updated(ScheduleRecord),
    Deleted(ScheduleId),
    FilterApplied(FilterCriteria),
}

#[derive(Clone)]
pub struct Bus {
    sender: broadcast::Sender<ScheduleEvent>,
}

impl Bus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScheduleEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that will see the event; zero when
    /// nobody is listening.
    pub fn publish(&self, event: ScheduleEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                log::warn!("Dropped {event:?}: no subscribers");
                0
            }
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Bus::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, timeout};

    #[tokio::test]
    async fn publish_and_receive_event() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(ScheduleEvent::Deleted(3)), 1);

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert_eq!(received, ScheduleEvent::Deleted(3));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = Bus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let criteria = FilterCriteria::new("John", "");
        bus.publish(ScheduleEvent::FilterApplied(criteria.clone()));

        assert_eq!(rx1.recv().await.expect("recv1"), ScheduleEvent::FilterApplied(criteria.clone()));
        assert_eq!(rx2.recv().await.expect("recv2"), ScheduleEvent::FilterApplied(criteria));
    }

    #[test]
    fn publishing_without_subscribers_is_not_an_error() {
        let bus = Bus::new(8);
        assert_eq!(bus.publish(ScheduleEvent::Deleted(1)), 0);
    }
}
