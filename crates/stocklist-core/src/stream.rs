// ── Store subscriptions ──
//
// Read side of a KeyedCollection: the value now, and each value after.

use std::hash::Hash;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::Snapshot;

/// Follows one collection of the catalog store.
///
/// Await [`changed`](Self::changed) in a loop, or turn it into a `Stream`
/// with [`into_stream`](Self::into_stream).
pub struct SnapshotStream<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    current: Snapshot<K, V>,
    receiver: watch::Receiver<Snapshot<K, V>>,
}

impl<K, V> SnapshotStream<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<K, V>>) -> Self {
        let current = Arc::clone(&receiver.borrow());
        Self { current, receiver }
    }

    /// As of subscribing, or of the last [`changed`](Self::changed).
    pub fn current(&self) -> &Snapshot<K, V> {
        &self.current
    }

    /// What the store holds right now, without marking it seen.
    pub fn latest(&self) -> Snapshot<K, V> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Resolves on the next mutation; `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<K, V>> {
        self.receiver.changed().await.ok()?;
        self.current = Arc::clone(&self.receiver.borrow_and_update());
        Some(Arc::clone(&self.current))
    }

    pub fn into_stream(self) -> SnapshotWatchStream<K, V> {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// First item is the snapshot at conversion time. Intermediate versions
/// are skipped when the consumer falls behind.
pub struct SnapshotWatchStream<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    inner: WatchStream<Snapshot<K, V>>,
}

impl<K, V> Stream for SnapshotWatchStream<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    type Item = Snapshot<K, V>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::store::KeyedCollection;

    use super::*;

    #[tokio::test]
    async fn changed_tracks_latest_snapshot() {
        let col: KeyedCollection<u8, &'static str> = KeyedCollection::new();
        let mut stream = SnapshotStream::new(col.subscribe());
        assert!(stream.current().is_empty());

        col.upsert(1, "one");
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(stream.current().len(), 1);
        assert_eq!(stream.latest().len(), 1);
    }

    #[tokio::test]
    async fn into_stream_yields_current_then_updates() {
        let col: KeyedCollection<u8, u8> = KeyedCollection::new();
        let mut stream = SnapshotStream::new(col.subscribe()).into_stream();

        assert!(stream.next().await.unwrap().is_empty());
        col.upsert(3, 3);
        assert_eq!(stream.next().await.unwrap().len(), 1);
    }
}
