//! PostgreSQL implementation of the store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{
    DriverStore, HotelFilter, HotelStore, NewHotel, NewRestaurant, RestaurantFilter,
    RestaurantStore, RideStore,
};
use crate::domain::{Driver, Hotel, Restaurant, Ride, RideDetail, RideStatus};
use crate::error::GatewayError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// One instance implements every store trait; the pool is cheap to clone
/// and shared across all repositories.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct RideRow {
    id: i64,
    pickup: String,
    destination: String,
    driver_id: Option<i64>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RideDetailRow {
    id: i64,
    pickup: String,
    destination: String,
    driver_id: Option<i64>,
    status: String,
    created_at: DateTime<Utc>,
    driver_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct DriverRow {
    id: i64,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i64,
    name: String,
    location: String,
    price_per_night: f64,
    rating: f64,
    amenities: String,
    description: String,
    available_rooms: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: i64,
    name: String,
    cuisine: String,
    location: String,
    rating: f64,
    delivery_time: i64,
    menu: String,
    description: String,
    created_at: DateTime<Utc>,
}

fn storage_err(e: sqlx::Error) -> GatewayError {
    GatewayError::Storage(e.to_string())
}

fn parse_status(raw: &str) -> Result<RideStatus, GatewayError> {
    raw.parse()
        .map_err(|e: String| GatewayError::Storage(format!("corrupt ride row: {e}")))
}

fn ride_from_row(row: RideRow) -> Result<Ride, GatewayError> {
    Ok(Ride {
        id: row.id,
        pickup: row.pickup,
        destination: row.destination,
        status: parse_status(&row.status)?,
        driver_id: row.driver_id,
        created_at: row.created_at,
    })
}

fn detail_from_row(row: RideDetailRow) -> Result<RideDetail, GatewayError> {
    Ok(RideDetail {
        id: row.id,
        pickup: row.pickup,
        destination: row.destination,
        status: parse_status(&row.status)?,
        driver_id: row.driver_id,
        driver_name: row.driver_name,
        created_at: row.created_at,
    })
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            price_per_night: row.price_per_night,
            rating: row.rating,
            amenities: row.amenities,
            description: row.description,
            available_rooms: row.available_rooms,
            created_at: row.created_at,
        }
    }
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            cuisine: row.cuisine,
            location: row.location,
            rating: row.rating,
            delivery_time: row.delivery_time,
            menu: row.menu,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

const RIDE_COLUMNS: &str = "id, pickup, destination, driver_id, status, created_at";
const HOTEL_COLUMNS: &str = "id, name, location, price_per_night, rating, amenities, \
                             description, available_rooms, created_at";
const RESTAURANT_COLUMNS: &str = "id, name, cuisine, location, rating, delivery_time, \
                                  menu, description, created_at";

#[async_trait]
impl RideStore for PostgresStore {
    async fn insert(&self, pickup: &str, destination: &str) -> Result<Ride, GatewayError> {
        let row = sqlx::query_as::<_, RideRow>(
            "INSERT INTO rides (pickup, destination) VALUES ($1, $2) \
             RETURNING id, pickup, destination, driver_id, status, created_at",
        )
        .bind(pickup)
        .bind(destination)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        ride_from_row(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Ride>, GatewayError> {
        let row = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        row.map(ride_from_row).transpose()
    }

    async fn get_detail(&self, id: i64) -> Result<Option<RideDetail>, GatewayError> {
        let row = sqlx::query_as::<_, RideDetailRow>(
            "SELECT r.id, r.pickup, r.destination, r.driver_id, r.status, r.created_at, \
                    d.name AS driver_name \
             FROM rides AS r \
             LEFT JOIN drivers AS d ON d.id = r.driver_id \
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        row.map(detail_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Ride>, GatewayError> {
        let rows = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.into_iter().map(ride_from_row).collect()
    }

    async fn claim(&self, id: i64, driver_id: i64) -> Result<u64, GatewayError> {
        let result = sqlx::query(
            "UPDATE rides SET status = 'accepted', driver_id = $2 \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(driver_id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(result.rows_affected())
    }

    async fn finish(&self, id: i64) -> Result<u64, GatewayError> {
        let result =
            sqlx::query("UPDATE rides SET status = 'completed' WHERE id = $1 AND status = 'accepted'")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DriverStore for PostgresStore {
    async fn insert(&self, name: &str, status: &str) -> Result<Driver, GatewayError> {
        let row = sqlx::query_as::<_, DriverRow>(
            "INSERT INTO drivers (name, status) VALUES ($1, $2) \
             RETURNING id, name, status, created_at",
        )
        .bind(name)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Driver>, GatewayError> {
        let row = sqlx::query_as::<_, DriverRow>(
            "SELECT id, name, status, created_at FROM drivers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(Driver::from))
    }

    async fn list(&self) -> Result<Vec<Driver>, GatewayError> {
        let rows = sqlx::query_as::<_, DriverRow>(
            "SELECT id, name, status, created_at FROM drivers \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(Driver::from).collect())
    }

    async fn set_status(&self, id: i64, status: &str) -> Result<u64, GatewayError> {
        let result = sqlx::query("UPDATE drivers SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl HotelStore for PostgresStore {
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, GatewayError> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "INSERT INTO hotels \
             (name, location, price_per_night, rating, amenities, description, available_rooms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {HOTEL_COLUMNS}"
        ))
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.price_per_night)
        .bind(hotel.rating)
        .bind(&hotel.amenities)
        .bind(&hotel.description)
        .bind(hotel.available_rooms)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Hotel>, GatewayError> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(Hotel::from))
    }

    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, GatewayError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE available_rooms > 0"
        ));
        if let Some(location) = &filter.location {
            qb.push(" AND location ILIKE ");
            qb.push_bind(format!("%{location}%"));
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND price_per_night >= ");
            qb.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND price_per_night <= ");
            qb.push_bind(max_price);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");

        let rows = qb
            .build_query_as::<HotelRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn reserve_room(&self, id: i64) -> Result<u64, GatewayError> {
        let result = sqlx::query(
            "UPDATE hotels SET available_rooms = available_rooms - 1 \
             WHERE id = $1 AND available_rooms > 0",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RestaurantStore for PostgresStore {
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, GatewayError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "INSERT INTO restaurants \
             (name, cuisine, location, rating, delivery_time, menu, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&restaurant.name)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.location)
        .bind(restaurant.rating)
        .bind(restaurant.delivery_time)
        .bind(&restaurant.menu)
        .bind(&restaurant.description)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Restaurant>, GatewayError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(Restaurant::from))
    }

    async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, GatewayError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE 1 = 1"
        ));
        if let Some(cuisine) = &filter.cuisine {
            qb.push(" AND cuisine ILIKE ");
            qb.push_bind(format!("%{cuisine}%"));
        }
        if let Some(location) = &filter.location {
            qb.push(" AND location ILIKE ");
            qb.push_bind(format!("%{location}%"));
        }
        if let Some(min_rating) = filter.min_rating {
            qb.push(" AND rating >= ");
            qb.push_bind(min_rating);
        }
        if let Some(max_delivery_time) = filter.max_delivery_time {
            qb.push(" AND delivery_time <= ");
            qb.push_bind(max_delivery_time);
        }
        qb.push(" ORDER BY rating DESC, created_at DESC, id DESC");

        let rows = qb
            .build_query_as::<RestaurantRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}
