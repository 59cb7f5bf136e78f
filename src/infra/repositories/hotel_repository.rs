//! Hotel repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IsolationLevel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::hotel::{self, ActiveModel, Entity as HotelEntity};
use super::entities::{review, room, user};
use crate::domain::{Hotel, HotelFilters, HotelWithOwner, OwnerSummary};
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::run_in_txn;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Hotel repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Find hotel by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Hotel>>;

    /// Find hotel by ID joined with its owner's contact summary
    async fn find_with_owner(&self, id: Uuid) -> AppResult<Option<HotelWithOwner>>;

    /// Persist a new hotel
    async fn create(&self, hotel: Hotel) -> AppResult<Hotel>;

    /// Persist every field of an existing hotel
    async fn update(&self, hotel: Hotel) -> AppResult<Hotel>;

    /// Delete a hotel together with its rooms and reviews, atomically
    async fn delete_cascade(&self, id: Uuid) -> AppResult<()>;

    /// Filtered catalogue search, newest first, joined with owners
    async fn search(
        &self,
        filters: HotelFilters,
        page: PaginationParams,
    ) -> AppResult<(Vec<HotelWithOwner>, u64)>;

    /// IDs of every hotel belonging to the given owner
    async fn ids_owned_by(&self, owner_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Count all hotels
    async fn count(&self) -> AppResult<u64>;

    /// Count hotels still awaiting approval
    async fn count_unapproved(&self) -> AppResult<u64>;

    /// Remove every hotel (seeding)
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of HotelRepository
pub struct HotelStore {
    db: DatabaseConnection,
}

impl HotelStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn with_owner((model, owner): (hotel::Model, Option<user::Model>)) -> HotelWithOwner {
    HotelWithOwner {
        hotel: Hotel::from(model),
        owner: owner.map(|u| OwnerSummary {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
        }),
    }
}

#[async_trait]
impl HotelRepository for HotelStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Hotel>> {
        let result = HotelEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Hotel::from))
    }

    async fn find_with_owner(&self, id: Uuid) -> AppResult<Option<HotelWithOwner>> {
        let result = HotelEntity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(with_owner))
    }

    async fn create(&self, hotel: Hotel) -> AppResult<Hotel> {
        let model = ActiveModel::from(&hotel)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Hotel::from(model))
    }

    async fn update(&self, hotel: Hotel) -> AppResult<Hotel> {
        let model = ActiveModel::from(&hotel)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Hotel::from(model))
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        run_in_txn(&self.db, IsolationLevel::Serializable, |txn| {
            Box::pin(async move {
                room::Entity::delete_many()
                    .filter(room::Column::HotelId.eq(id))
                    .exec(txn)
                    .await?;

                review::Entity::delete_many()
                    .filter(review::Column::HotelId.eq(id))
                    .exec(txn)
                    .await?;

                let result = HotelEntity::delete_by_id(id).exec(txn).await?;
                if result.rows_affected == 0 {
                    return Err(AppError::NotFound("Hotel"));
                }

                Ok(())
            })
        })
        .await
    }

    async fn search(
        &self,
        filters: HotelFilters,
        page: PaginationParams,
    ) -> AppResult<(Vec<HotelWithOwner>, u64)> {
        let mut query = HotelEntity::find();

        if let Some(owner_id) = filters.owner_id {
            query = query.filter(hotel::Column::OwnerId.eq(owner_id));
        }
        if let Some(city) = &filters.city {
            query = query.filter(
                Expr::col((HotelEntity, hotel::Column::City)).ilike(format!("%{city}%")),
            );
        }
        if let Some(min_price) = filters.min_price {
            query = query.filter(hotel::Column::PricePerNight.gte(min_price));
        }
        if let Some(max_price) = filters.max_price {
            query = query.filter(hotel::Column::PricePerNight.lte(max_price));
        }
        if let Some(min_rating) = filters.min_rating {
            query = query.filter(hotel::Column::Rating.gte(min_rating));
        }
        if let Some(term) = &filters.search {
            let pattern = format!("%{term}%");
            query = query.filter(
                Condition::any()
                    .add(Expr::col((HotelEntity, hotel::Column::Name)).ilike(pattern.clone()))
                    .add(Expr::col((HotelEntity, hotel::Column::City)).ilike(pattern.clone()))
                    .add(Expr::col((HotelEntity, hotel::Column::Description)).ilike(pattern)),
            );
        }

        let paginator = query
            .find_also_related(user::Entity)
            .order_by_desc(hotel::Column::CreatedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((rows.into_iter().map(with_owner).collect(), total))
    }

    async fn ids_owned_by(&self, owner_id: Uuid) -> AppResult<Vec<Uuid>> {
        HotelEntity::find()
            .select_only()
            .column(hotel::Column::Id)
            .filter(hotel::Column::OwnerId.eq(owner_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count(&self) -> AppResult<u64> {
        HotelEntity::find().count(&self.db).await.map_err(AppError::from)
    }

    async fn count_unapproved(&self) -> AppResult<u64> {
        HotelEntity::find()
            .filter(hotel::Column::IsApproved.eq(false))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = HotelEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
