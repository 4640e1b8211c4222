//! Teacher parameter storage.
//!
//! Writes are plain overwrites: the last writer for a key wins.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::models::{ParamScope, TeacherParam};
use crate::Result;

/// Create or update a single parameter.
pub async fn upsert_param(
    pool: &SqlitePool,
    teacher_id: &str,
    scope: ParamScope,
    key: &str,
    value: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO teacher_params (teacher_id, scope, key, value)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(teacher_id, scope, key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(teacher_id)
    .bind(scope.as_str())
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get one parameter value.
pub async fn get_param(
    pool: &SqlitePool,
    teacher_id: &str,
    scope: ParamScope,
    key: &str,
) -> Result<Option<String>> {
    let value = sqlx::query_scalar::<_, String>(
        r#"
        SELECT value
        FROM teacher_params
        WHERE teacher_id = ? AND scope = ? AND key = ?
        "#,
    )
    .bind(teacher_id)
    .bind(scope.as_str())
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(value)
}

/// Get every parameter of one scope as a key/value map.
pub async fn get_params(
    pool: &SqlitePool,
    teacher_id: &str,
    scope: ParamScope,
) -> Result<BTreeMap<String, String>> {
    let rows = sqlx::query_as::<_, TeacherParam>(
        r#"
        SELECT teacher_id, scope, key, value, updated_at
        FROM teacher_params
        WHERE teacher_id = ? AND scope = ?
        ORDER BY key
        "#,
    )
    .bind(teacher_id)
    .bind(scope.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

/// Replace a whole scope with the given map, atomically.
pub async fn replace_params(
    pool: &SqlitePool,
    teacher_id: &str,
    scope: ParamScope,
    params: &BTreeMap<String, String>,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM teacher_params
        WHERE teacher_id = ? AND scope = ?
        "#,
    )
    .bind(teacher_id)
    .bind(scope.as_str())
    .execute(&mut *tx)
    .await?;

    for (key, value) in params {
        sqlx::query(
            r#"
            INSERT INTO teacher_params (teacher_id, scope, key, value)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(teacher_id)
        .bind(scope.as_str())
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        teacher = %teacher_id,
        scope = %scope,
        count = params.len(),
        "Replaced teacher parameters"
    );
    Ok(())
}

/// List teachers that have at least one stored parameter.
pub async fn list_teachers(pool: &SqlitePool) -> Result<Vec<String>> {
    let teachers = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT teacher_id
        FROM teacher_params
        ORDER BY teacher_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}

/// Delete every parameter of a teacher.
pub async fn delete_teacher(pool: &SqlitePool, teacher_id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM teacher_params
        WHERE teacher_id = ?
        "#,
    )
    .bind(teacher_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
