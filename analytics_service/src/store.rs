use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::click;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use serde::{Deserialize, Serialize};
use shared::{ClickEvent, DbPool};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClickStoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Click store error: {0}")]
    Other(String),
}

/// Click totals for one short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStats {
    pub short_code: String,
    pub total_clicks: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_click: Option<DateTime<Utc>>,
}

/// Durable storage of consumed click events.
#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn record(&self, event: &ClickEvent) -> Result<(), ClickStoreError>;

    /// Unknown codes report zero clicks and no last click.
    async fn stats_for(&self, short_code: &str) -> Result<CodeStats, ClickStoreError>;

    /// Every code with at least one click, most clicked first, ties by code.
    async fn all_stats(&self) -> Result<Vec<CodeStats>, ClickStoreError>;

    async fn ping(&self) -> bool;
}

pub struct SeaOrmClickStore {
    db: DbPool,
}

impl SeaOrmClickStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

fn clicks_for(short_code: &str) -> Select<click::Entity> {
    click::Entity::find().filter(click::Column::ShortCode.eq(short_code))
}

fn latest_click_for(short_code: &str) -> Select<click::Entity> {
    clicks_for(short_code).order_by_desc(click::Column::Timestamp)
}

fn all_stats_query() -> Select<click::Entity> {
    click::Entity::find()
        .select_only()
        .column(click::Column::ShortCode)
        .column_as(
            Expr::col((click::Entity, click::Column::Id)).count(),
            "total_clicks",
        )
        .column_as(
            Expr::col((click::Entity, click::Column::Timestamp)).max(),
            "last_click",
        )
        .group_by(click::Column::ShortCode)
        .order_by_desc(Expr::cust("total_clicks"))
        .order_by_asc(click::Column::ShortCode)
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    short_code: String,
    total_clicks: i64,
    last_click: Option<DateTime<Utc>>,
}

#[async_trait]
impl ClickStore for SeaOrmClickStore {
    async fn record(&self, event: &ClickEvent) -> Result<(), ClickStoreError> {
        let click = click::ActiveModel {
            id: Default::default(),
            short_code: Set(event.short_code.clone()),
            timestamp: Set(event.timestamp),
            user_agent: Set(event.user_agent.clone()),
            ip: Set(event.ip.clone()),
        };

        click.insert(&*self.db).await?;
        Ok(())
    }

    async fn stats_for(&self, short_code: &str) -> Result<CodeStats, ClickStoreError> {
        let total_clicks = clicks_for(short_code).count(&*self.db).await?;

        let last_click = latest_click_for(short_code)
            .one(&*self.db)
            .await?
            .map(|c| c.timestamp);

        Ok(CodeStats {
            short_code: short_code.to_string(),
            total_clicks: total_clicks as i64,
            last_click,
        })
    }

    async fn all_stats(&self) -> Result<Vec<CodeStats>, ClickStoreError> {
        let rows = all_stats_query()
            .into_model::<StatsRow>()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CodeStats {
                short_code: row.short_code,
                total_clicks: row.total_clicks,
                last_click: row.last_click,
            })
            .collect())
    }

    async fn ping(&self) -> bool {
        self.db.ping().await.is_ok()
    }
}
