use async_trait::async_trait;
use contracts::domain::a001_bank_slip::aggregate::BankSlip;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::BankSlipStore;

/// Bank slip store kept in process memory.
///
/// Used by tests and when `database.in_memory` is set; contents are lost on restart.
#[derive(Default, Clone)]
pub struct InMemoryBankSlipStore {
    slips: Arc<RwLock<HashMap<Uuid, BankSlip>>>,
}

impl InMemoryBankSlipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BankSlipStore for InMemoryBankSlipStore {
    async fn insert(&self, aggregate: &BankSlip) -> anyhow::Result<Uuid> {
        let id = aggregate.id.value();
        let mut slips = self.slips.write().await;
        if slips.contains_key(&id) {
            anyhow::bail!("Bank slip {} already exists", id);
        }
        slips.insert(id, aggregate.clone());
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<BankSlip>> {
        let slips = self.slips.read().await;
        Ok(slips.get(&id).cloned())
    }

    async fn update(&self, aggregate: &BankSlip) -> anyhow::Result<()> {
        let id = aggregate.id.value();
        let mut slips = self.slips.write().await;
        match slips.get_mut(&id) {
            Some(existing) => {
                let created_at = existing.metadata.created_at;
                *existing = aggregate.clone();
                existing.metadata.created_at = created_at;
                Ok(())
            }
            None => anyhow::bail!("Bank slip {} does not exist", id),
        }
    }

    async fn list_all(&self) -> anyhow::Result<Vec<BankSlip>> {
        let slips = self.slips.read().await;
        let mut items: Vec<BankSlip> = slips.values().cloned().collect();
        items.sort_by_key(|s| s.metadata.created_at);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_bank_slip::aggregate::BankSlipStatus;

    fn slip(customer: &str) -> BankSlip {
        BankSlip::new_for_insert(
            "2018-05-10".into(),
            100000,
            customer.into(),
            BankSlipStatus::Pending,
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryBankSlipStore::new();
        let slip = slip("Conta Azul");

        let id = store.insert(&slip).await.unwrap();
        assert_eq!(id, slip.id.value());
        assert_eq!(store.get_by_id(id).await.unwrap(), Some(slip));
        assert!(store.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = InMemoryBankSlipStore::new();
        let slip = slip("a");
        store.insert(&slip).await.unwrap();
        assert!(store.insert(&slip).await.is_err());
    }

    #[tokio::test]
    async fn test_update_overwrites_and_keeps_created_at() {
        let store = InMemoryBankSlipStore::new();
        let original = slip("a");
        store.insert(&original).await.unwrap();

        let mut changed = original.clone();
        changed.status = BankSlipStatus::Paid;
        changed.metadata.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        store.update(&changed).await.unwrap();

        let stored = store.get_by_id(original.id.value()).await.unwrap().unwrap();
        assert_eq!(stored.status, BankSlipStatus::Paid);
        assert_eq!(stored.metadata.created_at, original.metadata.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_fails() {
        let store = InMemoryBankSlipStore::new();
        assert!(store.update(&slip("ghost")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_all() {
        let store = InMemoryBankSlipStore::new();
        assert!(store.list_all().await.unwrap().is_empty());

        for name in ["a", "b", "c"] {
            store.insert(&slip(name)).await.unwrap();
        }
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
