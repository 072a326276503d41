//! SQLite cart repository
//!
//! A cart is one row in `carts`; its items are rows in `cart_items` ordered by
//! `position`. Appends are a single conditional `INSERT … SELECT` so they are
//! atomic without an explicit transaction. Removals and deletes use a
//! transaction to tell a missing cart apart from a missing item.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    CartReadRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

#[derive(Clone)]
pub struct SqliteCartRepository {
    pool: SqlitePool,
}

impl SqliteCartRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS carts (
                id TEXT PRIMARY KEY,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cart_items (
                id TEXT PRIMARY KEY,
                cart_id TEXT NOT NULL REFERENCES carts(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                product TEXT NOT NULL,
                quantity INTEGER NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_cart_items_cart ON cart_items (cart_id, position)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Open (creating if needed) the database at `url` and prepare the schema
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to SQLite cart store");
        Self::new(pool).await
    }

    async fn cart_exists(&self, cart_key: &str) -> Result<bool, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM carts WHERE id = ?")
            .bind(cart_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl CartWriteRepositoryPort for SqliteCartRepository {
    async fn create_cart(&self) -> Result<Cart, RepositoryError> {
        let cart = Cart::new(CartId::new());

        sqlx::query("INSERT INTO carts (id) VALUES (?)")
            .bind(cart.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        tracing::debug!(cart_id = %cart.id(), "Inserted cart row");
        Ok(cart)
    }

    async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let item = CartItem::new(CartItemId::new(), cart_id, product, quantity);

        // A missing cart outranks a bad item
        if let Err(e) = item.validate() {
            if !self.cart_exists(&cart_id.to_string()).await? {
                return Err(CartError::CartNotFound.into());
            }
            return Err(e.into());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO cart_items (id, cart_id, position, product, quantity)
            SELECT ?, c.id,
                   COALESCE((SELECT MAX(position) + 1 FROM cart_items WHERE cart_id = c.id), 0),
                   ?, ?
            FROM carts c
            WHERE c.id = ?
        "#,
        )
        .bind(item.id.to_string())
        .bind(&item.product)
        .bind(item.quantity)
        .bind(cart_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(CartError::CartNotFound.into());
        }

        tracing::debug!(cart_id = %cart_id, item_id = %item.id, "Appended cart item row");
        Ok(item)
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let cart_key = cart_id.to_string();
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ? AND id = ?")
            .bind(&cart_key)
            .bind(item_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM carts WHERE id = ?")
                .bind(&cart_key)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?;

            return Err(match exists {
                Some(_) => CartError::NoSuchCartItem.into(),
                None => CartError::CartNotFound.into(),
            });
        }

        tx.commit().await.map_err(storage)?;

        tracing::debug!(cart_id = %cart_id, item_id = %item_id, "Deleted cart item row");
        Ok(())
    }

    async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        let cart_key = cart_id.to_string();
        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
            .bind(&cart_key)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        let result = sqlx::query("DELETE FROM carts WHERE id = ?")
            .bind(&cart_key)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(CartError::CartNotFound.into());
        }

        tx.commit().await.map_err(storage)?;

        tracing::debug!(cart_id = %cart_id, "Deleted cart row");
        Ok(())
    }
}

#[async_trait]
impl CartReadRepositoryPort for SqliteCartRepository {
    async fn cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        let cart_key = cart_id.to_string();
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM carts WHERE id = ?")
            .bind(&cart_key)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?;

        if exists.is_none() {
            return Err(CartError::CartNotFound.into());
        }

        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT id, product, quantity FROM cart_items WHERE cart_id = ? ORDER BY position",
        )
        .bind(&cart_key)
        .fetch_all(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        let items = rows
            .into_iter()
            .map(|(id, product, quantity)| -> Result<CartItem, RepositoryError> {
                let id = CartItemId::from_str(&id).map_err(|e| {
                    RepositoryError::Storage(format!("corrupt cart item id {id:?}: {e}"))
                })?;
                Ok(CartItem::new(id, cart_id, product, quantity))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Cart::new(cart_id).with_items(items))
    }
}
