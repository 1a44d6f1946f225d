use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::sms::SmsPayload;
use crate::utils::error::LinkError;

/// A live handle through which a payload can be pushed to the consumer.
///
/// `forward` must not block waiting on the consumer. A link whose consumer
/// has gone away reports `LinkError::Closed`.
pub trait ConsumerLink: Send + Sync + fmt::Debug {
    /// Stable identifier for this link, used to clear it on disconnect.
    fn id(&self) -> &str;

    fn forward(&self, payload: &SmsPayload) -> Result<(), LinkError>;
}

/// Single-slot register holding the current consumer link, if any.
///
/// Writers swap the whole `Arc` under a short write lock, so readers see
/// either the previous link or the new one. Readers clone the `Arc` and
/// release the lock before calling into the link.
#[derive(Debug, Default)]
pub struct LinkSlot {
    current: RwLock<Option<Arc<dyn ConsumerLink>>>,
}

impl LinkSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `link` as the current consumer, replacing any previous one.
    /// Returns the link that was replaced.
    pub fn register(&self, link: Arc<dyn ConsumerLink>) -> Option<Arc<dyn ConsumerLink>> {
        info!("Consumer link {} registered", link.id());
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(link)
    }

    pub fn clear(&self) -> Option<Arc<dyn ConsumerLink>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    /// Clears the slot only if it still holds the link with `link_id`.
    pub fn clear_if_current(&self, link_id: &str) -> bool {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let is_current = guard.as_ref().is_some_and(|link| link.id() == link_id);
        if is_current {
            *guard = None;
            info!("Consumer link {link_id} cleared");
        }
        is_current
    }

    /// Clears the slot only if it still holds exactly `link`.
    pub fn clear_if_same(&self, link: &Arc<dyn ConsumerLink>) -> bool {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let is_same = guard
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, link));
        if is_same {
            *guard = None;
        }
        is_same
    }

    pub fn snapshot(&self) -> Option<Arc<dyn ConsumerLink>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_registered(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
