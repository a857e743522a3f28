//! Per-policyholder write serialisation

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use core_kernel::Username;

/// Async mutex scope per policyholder
///
/// The held-policy collection is replaced as a whole, so two writers for the
/// same holder must not overlap their read-modify-write cycles. Share one
/// instance between every service that writes policies.
#[derive(Debug, Default)]
pub struct HolderLocks {
    locks: DashMap<Username, Arc<Mutex<()>>>,
}

impl HolderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the holder's collection
    pub async fn acquire(&self, holder: &Username) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the map shard is not held across the await.
        let lock = self
            .locks
            .entry(holder.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Number of holders that have been locked at least once
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_holder_is_serialised() {
        let locks = Arc::new(HolderLocks::new());
        let holder = Username::new("erin").unwrap();

        let guard = locks.acquire(&holder).await;

        let contender = {
            let locks = locks.clone();
            let holder = holder.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&holder).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
        assert_eq!(locks.tracked(), 1);
    }

    #[tokio::test]
    async fn test_different_holders_do_not_block() {
        let locks = HolderLocks::new();
        let _a = locks.acquire(&Username::new("a").unwrap()).await;
        let _b = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(&Username::new("b").unwrap()),
        )
        .await
        .expect("second holder should not wait");
    }
}
