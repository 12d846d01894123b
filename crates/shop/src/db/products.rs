//! Product queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductFilter};

/// Insert a product.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails (including the
/// non-negative `CHECK` constraints).
pub async fn create<'e, E>(conn: E, product: &NewProduct) -> Result<Product, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, stock, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, name, description, price, stock, created_at",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.stock)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(product)
}

/// Fetch one product.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: ProductId) -> Result<Option<Product>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, stock, created_at FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(product)
}

/// List products matching a filter, ordered by id.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list<'e, E>(conn: E, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, stock, created_at
         FROM products
         WHERE (?1 IS NULL OR instr(lower(name), lower(?1)) > 0)
           AND price BETWEEN ?2 AND ?3
         ORDER BY id",
    )
    .bind(search)
    .bind(filter.min_price)
    .bind(filter.max_price)
    .fetch_all(conn)
    .await?;

    Ok(products)
}

/// Take `quantity` units out of stock if at least that many remain.
///
/// Returns `false` when the row has too little stock (or does not exist);
/// nothing is changed in that case.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn decrement_stock<'e, E>(
    conn: E,
    id: ProductId,
    quantity: i64,
) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1")
        .bind(quantity)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() == 1)
}
