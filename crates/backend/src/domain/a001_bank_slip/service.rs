use chrono::NaiveDate;
use contracts::domain::a001_bank_slip::aggregate::{
    BankSlip, BankSlipDto, BankSlipId, BankSlipResponse, BankSlipStatus,
};
use contracts::domain::common::AggregateId;
use std::sync::Arc;

use super::error::BankSlipError;
use super::penalty;
use super::repository::BankSlipStore;
use super::validation;

/// Current calendar date in the server's local time zone
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Bank slip lifecycle: creation, listing, inspection with fine, pay and cancel.
pub struct BankSlipService {
    store: Arc<dyn BankSlipStore>,
    today: fn() -> NaiveDate,
}

impl BankSlipService {
    pub fn new(store: Arc<dyn BankSlipStore>) -> Self {
        Self {
            store,
            today: local_today,
        }
    }

    /// Replace the date source used for fine computation
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Validate and store a new slip
    pub async fn create(&self, dto: BankSlipDto) -> Result<BankSlipResponse, BankSlipError> {
        validation::validate(&dto)?;

        let (Some(due_date), Some(total_in_cents), Some(customer)) =
            (dto.due_date, dto.total_in_cents, dto.customer)
        else {
            return Err(BankSlipError::NotProvided);
        };

        let aggregate = BankSlip::new_for_insert(
            due_date,
            total_in_cents,
            customer,
            dto.status.unwrap_or_default(),
        );
        let id = self.store.insert(&aggregate).await?;
        tracing::info!("Bank slip {} created for '{}'", id, aggregate.customer);

        Ok(aggregate.to_response(None))
    }

    /// All slips, without fine
    pub async fn list_all(&self) -> Result<Vec<BankSlipResponse>, BankSlipError> {
        let items = self.store.list_all().await?;
        Ok(items.iter().map(|s| s.to_response(None)).collect())
    }

    /// One slip, with the fine owed today if it is overdue and pending
    pub async fn get_by_id(&self, id: &str) -> Result<BankSlipResponse, BankSlipError> {
        let aggregate = self.load(id).await?;
        let fine = penalty::fine(
            &aggregate.due_date,
            aggregate.total_in_cents,
            aggregate.status,
            (self.today)(),
        );
        Ok(aggregate.to_response(fine))
    }

    pub async fn pay(&self, id: &str) -> Result<BankSlipResponse, BankSlipError> {
        self.update_status(id, BankSlipStatus::Paid).await
    }

    pub async fn cancel(&self, id: &str) -> Result<BankSlipResponse, BankSlipError> {
        self.update_status(id, BankSlipStatus::Canceled).await
    }

    async fn load(&self, id: &str) -> Result<BankSlip, BankSlipError> {
        let id = BankSlipId::from_string(id).map_err(|e| {
            tracing::debug!("Rejected bank slip id '{}': {}", id, e);
            BankSlipError::InvalidIdentifier
        })?;

        self.store
            .get_by_id(id.value())
            .await?
            .ok_or(BankSlipError::NotFound)
    }

    /// Load, apply the transition, and write the full record back
    async fn update_status(
        &self,
        id: &str,
        target: BankSlipStatus,
    ) -> Result<BankSlipResponse, BankSlipError> {
        let mut aggregate = self.load(id).await?;
        let previous = aggregate.status;

        aggregate.transition_to(target).map_err(|e| {
            tracing::warn!("Bank slip {}: {}", aggregate.id, e);
            BankSlipError::Invalid
        })?;

        // the stored date goes through the same parse as on creation
        if aggregate.due_date_parsed().is_none() {
            tracing::warn!(
                "Bank slip {} has an unparseable due date '{}'",
                aggregate.id,
                aggregate.due_date
            );
            return Err(BankSlipError::Invalid);
        }

        aggregate.before_write();
        self.store.update(&aggregate).await?;
        tracing::info!("Bank slip {} moved {} -> {}", aggregate.id, previous, target);

        Ok(aggregate.to_response(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_bank_slip::in_memory::InMemoryBankSlipStore;
    use async_trait::async_trait;
    use chrono::Duration;
    use contracts::domain::a001_bank_slip::aggregate::format_due_date;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 6, 20).unwrap()
    }

    /// Counts writes so tests can assert one write per mutation
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryBankSlipStore,
        inserts: AtomicUsize,
        updates: AtomicUsize,
    }

    #[async_trait]
    impl BankSlipStore for CountingStore {
        async fn insert(&self, aggregate: &BankSlip) -> anyhow::Result<Uuid> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(aggregate).await
        }

        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<BankSlip>> {
            self.inner.get_by_id(id).await
        }

        async fn update(&self, aggregate: &BankSlip) -> anyhow::Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update(aggregate).await
        }

        async fn list_all(&self) -> anyhow::Result<Vec<BankSlip>> {
            self.inner.list_all().await
        }
    }

    fn service() -> (BankSlipService, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        let service = BankSlipService::new(store.clone()).with_clock(fixed_today);
        (service, store)
    }

    fn dto(due_date: &str, total: i64, customer: &str) -> BankSlipDto {
        BankSlipDto {
            due_date: Some(due_date.into()),
            total_in_cents: Some(total),
            customer: Some(customer.into()),
            ..Default::default()
        }
    }

    fn days_before(days: i64) -> String {
        format_due_date(fixed_today() - Duration::days(days))
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (service, store) = service();
        let created = service
            .create(dto("2018-07-10", 100000, "Customer 1"))
            .await
            .unwrap();
        assert_eq!(created.status, BankSlipStatus::Pending);
        assert_eq!(created.fine, None);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);

        let fetched = service.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_honours_explicit_status_and_ignores_client_id() {
        let (service, _) = service();
        let client_id = Uuid::new_v4().to_string();
        let mut payload = dto("2018-05-10", 10, "c");
        payload.id = Some(client_id.clone());
        payload.status = Some(BankSlipStatus::Paid);

        let created = service.create(payload).await.unwrap();
        assert_eq!(created.status, BankSlipStatus::Paid);
        assert_ne!(created.id.to_string(), client_id);
    }

    #[tokio::test]
    async fn test_rejected_create_writes_nothing() {
        let (service, store) = service();
        let err = service.create(dto("2018-05-10", 0, "c")).await.unwrap_err();
        assert!(matches!(err, BankSlipError::Invalid));
        let err = service.create(BankSlipDto::default()).await.unwrap_err();
        assert!(matches!(err, BankSlipError::NotProvided));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_computes_fine() {
        let (service, _) = service();
        let five = service.create(dto(&days_before(5), 100000, "5 days")).await.unwrap();
        let fifteen = service.create(dto(&days_before(15), 100000, "15 days")).await.unwrap();
        let today = service.create(dto(&days_before(0), 100000, "today")).await.unwrap();

        let five = service.get_by_id(&five.id.to_string()).await.unwrap();
        let fifteen = service.get_by_id(&fifteen.id.to_string()).await.unwrap();
        let today = service.get_by_id(&today.id.to_string()).await.unwrap();
        assert_eq!(five.fine, Some(500));
        assert_eq!(fifteen.fine, Some(1000));
        assert_eq!(today.fine, None);
    }

    #[tokio::test]
    async fn test_list_never_carries_fine() {
        let (service, _) = service();
        service.create(dto(&days_before(5), 100000, "a")).await.unwrap();
        service.create(dto(&days_before(15), 100000, "b")).await.unwrap();

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|s| s.fine.is_none()));
    }

    #[tokio::test]
    async fn test_pay_writes_once_and_clears_fine() {
        let (service, store) = service();
        let created = service.create(dto(&days_before(15), 100000, "a")).await.unwrap();
        let id = created.id.to_string();

        let paid = service.pay(&id).await.unwrap();
        assert_eq!(paid.status, BankSlipStatus::Paid);
        assert_eq!(paid.fine, None);
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);

        let fetched = service.get_by_id(&id).await.unwrap();
        assert_eq!(fetched.status, BankSlipStatus::Paid);
        assert_eq!(fetched.fine, None);
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let (service, _) = service();
        let created = service.create(dto(&days_before(3), 500, "a")).await.unwrap();
        let canceled = service.cancel(&created.id.to_string()).await.unwrap();
        assert_eq!(canceled.status, BankSlipStatus::Canceled);
        assert_eq!(canceled.fine, None);
    }

    #[tokio::test]
    async fn test_terminal_actions_are_repeatable() {
        let (service, store) = service();
        let id = service
            .create(dto("2018-05-10", 100, "a"))
            .await
            .unwrap()
            .id
            .to_string();

        service.pay(&id).await.unwrap();
        assert_eq!(service.pay(&id).await.unwrap().status, BankSlipStatus::Paid);
        service.cancel(&id).await.unwrap();
        assert_eq!(service.cancel(&id).await.unwrap().status, BankSlipStatus::Canceled);
        assert_eq!(store.updates.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_identifier_errors() {
        let (service, _) = service();
        for result in [
            service.get_by_id("its_not_an_uuid").await,
            service.pay("its_not_an_uuid").await,
            service.cancel("its_not_an_uuid").await,
        ] {
            assert!(matches!(result, Err(BankSlipError::InvalidIdentifier)));
        }

        let unknown = Uuid::from_u64_pair(10, 10).to_string();
        for result in [
            service.get_by_id(&unknown).await,
            service.pay(&unknown).await,
            service.cancel(&unknown).await,
        ] {
            assert!(matches!(result, Err(BankSlipError::NotFound)));
        }
    }

    #[tokio::test]
    async fn test_corrupt_stored_date() {
        let (service, store) = service();
        let corrupt = BankSlip::new_for_insert(
            "not-a-date".into(),
            100000,
            "legacy".into(),
            BankSlipStatus::Pending,
        );
        store.inner.insert(&corrupt).await.unwrap();
        let id = corrupt.id.to_string();

        // reads stay silent
        let fetched = service.get_by_id(&id).await.unwrap();
        assert_eq!(fetched.fine, None);

        // the save path surfaces it
        assert!(matches!(service.pay(&id).await, Err(BankSlipError::Invalid)));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }
}
