use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};
use tokio::sync::watch;

/// Global counter for generating unique entity IDs.
static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an entity across the application.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(NonZeroU64);

impl EntityId {
    fn next() -> Self {
        let id = NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed);
        // Starts at 1 and only increments, so it's never zero.
        Self(NonZeroU64::new(id).unwrap_or_else(|| panic!("EntityId overflow")))
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Debug for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared state wrapper with RwLock for concurrent access.
/// Multiple concurrent readers or one exclusive writer.
pub type SharedState<T> = Arc<RwLock<T>>;

/// Observable shared value.
///
/// Backs the router's `NavigationState` and any page state the hosting
/// application wants to share between views (the demo's order cart).
/// Subscribers are notified on every `update`.
pub struct Entity<T: ?Sized + Send + Sync> {
    id: EntityId,
    pub(crate) inner: SharedState<T>,
    tx: watch::Sender<()>,
}

/// A weak handle to an entity.
pub struct WeakEntity<T: ?Sized + Send + Sync> {
    id: EntityId,
    pub(crate) inner: Weak<RwLock<T>>,
    tx: watch::Sender<()>,
}

impl<T: ?Sized + Send + Sync> Entity<T> {
    /// Get the unique ID of this entity.
    pub fn entity_id(&self) -> EntityId {
        self.id
    }

    /// Update the inner value using a closure and notify subscribers.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        let res = f(&mut *guard);
        drop(guard);
        let _ = self.tx.send(());
        Ok(res)
    }

    /// Read the inner value using a closure.
    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&*guard))
    }

    /// Downgrade this entity to a weak handle.
    pub fn downgrade(&self) -> WeakEntity<T> {
        WeakEntity {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
            tx: watch::Sender::clone(&self.tx),
        }
    }

    /// Subscribe to changes of this entity.
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.tx.subscribe()
    }
}

impl<T: ?Sized + Send + Sync> WeakEntity<T> {
    /// Get the unique ID of this entity.
    pub fn entity_id(&self) -> EntityId {
        self.id
    }

    /// Upgrade this weak handle to a strong handle, if the entity is still alive.
    pub fn upgrade(&self) -> Option<Entity<T>> {
        self.inner.upgrade().map(|inner| Entity {
            id: self.id,
            inner,
            tx: watch::Sender::clone(&self.tx),
        })
    }

    /// Update the entity if it is still alive.
    pub fn update<F, R>(&self, f: F) -> Option<crate::Result<R>>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.upgrade().map(|entity| entity.update(f))
    }
}

impl<T: ?Sized + Send + Sync> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            tx: watch::Sender::clone(&self.tx),
        }
    }
}

impl<T: ?Sized + Send + Sync> Clone for WeakEntity<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Weak::clone(&self.inner),
            tx: watch::Sender::clone(&self.tx),
        }
    }
}

impl<T: Send + Sync> Entity<T> {
    /// Create a new entity with the given initial value.
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(());
        Self {
            id: EntityId::next(),
            inner: Arc::new(RwLock::new(value)),
            tx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_notifies_subscribers() {
        let entity = Entity::new(0u32);
        let mut rx = entity.subscribe();

        entity.update(|v| *v += 1).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(entity.read(|v| *v).unwrap(), 1);
    }

    #[test]
    fn weak_handle_dies_with_entity() {
        let entity = Entity::new(String::from("open"));
        let weak = entity.downgrade();
        assert!(weak.upgrade().is_some());

        drop(entity);
        assert!(weak.upgrade().is_none());
        assert!(weak.update(|s| s.push('!')).is_none());
    }
}
