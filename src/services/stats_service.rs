//! Admin analytics service - platform totals, revenue breakdown and
//! the moderation listings.

use async_trait::async_trait;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::RECENT_BOOKINGS_LIMIT;
use crate::domain::{BookingDetail, HotelWithOwner, UserResponse};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Paid revenue and booking count for one calendar month
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyRevenue {
    /// Calendar month 1-12 of the bookings' creation
    pub month: u32,
    /// Rupees from paid bookings created that month
    pub revenue: i64,
    pub count: u64,
}

/// The admin dashboard snapshot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: u64,
    pub total_hotels: u64,
    pub total_bookings: u64,
    /// Sum of paid booking totals, in rupees
    pub total_revenue: i64,
    /// Hotels awaiting approval
    pub pending_approvals: u64,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub recent_bookings: Vec<BookingDetail>,
}

/// Analytics service trait for dependency injection.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Aggregate platform statistics for the admin dashboard
    async fn overview(&self) -> AppResult<AdminStats>;

    /// Every account, newest first (moderation view)
    async fn list_users(&self, page: PaginationParams) -> AppResult<Paginated<UserResponse>>;

    /// Every hotel with owner contact, newest first (moderation view)
    async fn list_hotels(&self, page: PaginationParams) -> AppResult<Paginated<HotelWithOwner>>;
}

/// Concrete implementation of StatsService using Unit of Work.
pub struct StatsCollector<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsCollector<U> {
    /// Create new analytics service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsCollector<U> {
    async fn overview(&self) -> AppResult<AdminStats> {
        let (total_users, total_hotels, total_bookings, pending_approvals, paid, recent_bookings) =
            tokio::try_join!(
                async { self.uow.users().count().await },
                async { self.uow.hotels().count().await },
                async { self.uow.bookings().count().await },
                async { self.uow.hotels().count_unapproved().await },
                async { self.uow.bookings().paid_summaries().await },
                async {
                    self.uow
                        .bookings()
                        .recent_detailed(RECENT_BOOKINGS_LIMIT)
                        .await
                },
            )?;

        let total_revenue = paid.iter().map(|p| p.total_amount).sum();

        let mut by_month: BTreeMap<u32, (i64, u64)> = BTreeMap::new();
        for p in &paid {
            let entry = by_month.entry(p.created_at.month()).or_insert((0, 0));
            entry.0 += p.total_amount;
            entry.1 += 1;
        }

        let monthly_revenue = by_month
            .into_iter()
            .map(|(month, (revenue, count))| MonthlyRevenue {
                month,
                revenue,
                count,
            })
            .collect();

        Ok(AdminStats {
            total_users,
            total_hotels,
            total_bookings,
            total_revenue,
            pending_approvals,
            monthly_revenue,
            recent_bookings,
        })
    }

    async fn list_users(&self, page: PaginationParams) -> AppResult<Paginated<UserResponse>> {
        let (users, total) = self.uow.users().list(page.clone()).await?;
        let data = users.into_iter().map(UserResponse::from).collect();

        Ok(Paginated::new(data, total, page.page, page.limit()))
    }

    async fn list_hotels(&self, page: PaginationParams) -> AppResult<Paginated<HotelWithOwner>> {
        let (hotels, total) = self
            .uow
            .hotels()
            .search(Default::default(), page.clone())
            .await?;

        Ok(Paginated::new(hotels, total, page.page, page.limit()))
    }
}
