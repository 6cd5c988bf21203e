use async_trait::async_trait;
use contracts::domain::a001_bank_slip::aggregate::{BankSlip, BankSlipId, BankSlipStatus};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

/// Durable storage of bank slips keyed by id.
///
/// Writes always carry the full record. Implementations only need read-your-writes
/// consistency per key; concurrent updates of one slip are last-write-wins.
#[async_trait]
pub trait BankSlipStore: Send + Sync {
    /// Persist a new slip and return its id
    async fn insert(&self, aggregate: &BankSlip) -> anyhow::Result<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<BankSlip>>;

    /// Overwrite an existing slip. Fails if the id is unknown.
    async fn update(&self, aggregate: &BankSlip) -> anyhow::Result<()>;

    async fn list_all(&self) -> anyhow::Result<Vec<BankSlip>>;
}

// ============================================================================
// SQLite via sea-orm
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_bank_slip")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub due_date: String,
    pub total_in_cents: i64,
    pub customer: String,
    pub status: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for BankSlip {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = BankSlipId::from_string(&m.id)
            .map_err(|e| anyhow::anyhow!("Corrupt bank slip row '{}': {}", m.id, e))?;
        let now = chrono::Utc::now();
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or(now),
            updated_at: m.updated_at.unwrap_or(now),
            version: m.version,
        };

        Ok(BankSlip {
            id,
            due_date: m.due_date,
            total_in_cents: m.total_in_cents,
            customer: m.customer,
            status: BankSlipStatus::from_db(&m.status),
            metadata,
        })
    }
}

fn to_active_model(aggregate: &BankSlip) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.as_string()),
        due_date: Set(aggregate.due_date.clone()),
        total_in_cents: Set(aggregate.total_in_cents),
        customer: Set(aggregate.customer.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

/// Bank slip store on top of a sea-orm connection
#[derive(Clone)]
pub struct SeaOrmBankSlipStore {
    conn: DatabaseConnection,
}

impl SeaOrmBankSlipStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BankSlipStore for SeaOrmBankSlipStore {
    async fn insert(&self, aggregate: &BankSlip) -> anyhow::Result<Uuid> {
        to_active_model(aggregate).insert(&self.conn).await?;
        Ok(aggregate.id.value())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<BankSlip>> {
        let result = Entity::find_by_id(id.to_string()).one(&self.conn).await?;
        result.map(BankSlip::try_from).transpose()
    }

    async fn update(&self, aggregate: &BankSlip) -> anyhow::Result<()> {
        let mut active = to_active_model(aggregate);
        active.created_at = sea_orm::ActiveValue::NotSet;
        active.update(&self.conn).await?;
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<BankSlip>> {
        Entity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(BankSlip::try_from)
            .collect()
    }
}
