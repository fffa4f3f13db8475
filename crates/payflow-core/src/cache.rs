//! Query cache for the two list resources
//!
//! Reads are served from memory unless the entry is missing or marked dirty.
//! Every invalidation bumps the entry's generation; a fetch only stores its
//! result when the generation it started with is still current, so data
//! fetched before a write can never overwrite the invalidation.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::{AccountService, TransactionService};
use crate::error::ClientResult;
use crate::models::{Account, Transaction};

/// Named cache entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Accounts,
    Transactions,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Accounts => "accounts",
            Resource::Transactions => "transactions",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<T>>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None, generation: 0 }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    accounts: Slot<Vec<Account>>,
    transactions: Slot<Vec<Transaction>>,
    dirty: HashSet<Resource>,
}

impl CacheState {
    fn generation(&self, resource: Resource) -> u64 {
        match resource {
            Resource::Accounts => self.accounts.generation,
            Resource::Transactions => self.transactions.generation,
        }
    }

    fn bump(&mut self, resource: Resource) {
        match resource {
            Resource::Accounts => self.accounts.generation += 1,
            Resource::Transactions => self.transactions.generation += 1,
        }
    }

    fn is_loaded(&self, resource: Resource) -> bool {
        match resource {
            Resource::Accounts => self.accounts.value.is_some(),
            Resource::Transactions => self.transactions.value.is_some(),
        }
    }
}

/// Shared cache of the account and transaction lists
#[derive(Debug, Default)]
pub struct QueryCache {
    state: RwLock<CacheState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entry stale; the next read refetches it
    pub async fn invalidate(&self, resource: Resource) {
        let mut state = self.state.write().await;
        state.dirty.insert(resource);
        state.bump(resource);
        log::debug!("Cache entry '{}' invalidated", resource);
    }

    pub async fn invalidate_all(&self) {
        self.invalidate(Resource::Accounts).await;
        self.invalidate(Resource::Transactions).await;
    }

    /// True when the entry was never loaded or has been invalidated
    pub async fn is_stale(&self, resource: Resource) -> bool {
        let state = self.state.read().await;
        !state.is_loaded(resource) || state.dirty.contains(&resource)
    }

    /// Account list, fetched through `service` when stale
    pub async fn accounts(&self, service: &dyn AccountService) -> ClientResult<Arc<Vec<Account>>> {
        self.read(
            Resource::Accounts,
            |s| &s.accounts,
            |s| &mut s.accounts,
            || service.list(),
        )
        .await
    }

    /// Transaction list, fetched through `service` when stale
    pub async fn transactions(&self, service: &dyn TransactionService) -> ClientResult<Arc<Vec<Transaction>>> {
        self.read(
            Resource::Transactions,
            |s| &s.transactions,
            |s| &mut s.transactions,
            || service.list(),
        )
        .await
    }

    async fn read<T, F, Fut>(
        &self,
        resource: Resource,
        slot: fn(&CacheState) -> &Slot<T>,
        slot_mut: fn(&mut CacheState) -> &mut Slot<T>,
        fetch: F,
    ) -> ClientResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let started_at = {
            let state = self.state.read().await;
            if !state.dirty.contains(&resource) {
                if let Some(value) = &slot(&state).value {
                    return Ok(Arc::clone(value));
                }
            }
            state.generation(resource)
        };

        let value = Arc::new(fetch().await?);

        let mut state = self.state.write().await;
        if state.generation(resource) == started_at {
            slot_mut(&mut state).value = Some(Arc::clone(&value));
            state.dirty.remove(&resource);
        } else {
            log::debug!("Discarding '{}' fetched before an invalidation", resource);
        }
        Ok(value)
    }
}
