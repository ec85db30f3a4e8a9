//! Lazily opened database handle
//!
//! [`Database`] owns the process' single SQLite connection. Nothing is opened
//! at construction time; the first statement call opens it, and every caller
//! that arrives while that open is in flight awaits the same attempt.
//!
//! # States
//!
//! - `Unopened` → first statement → `Opening`
//! - `Opening` → success → `Open` (all waiters get the pool)
//! - `Opening` → failure → `Unopened` (all waiters get the error, next call retries)
//! - any → [`Database::close`] → `Closed` (statement calls fail with [`DbError::Closed`])
//!
//! Statement methods (`run`, `get`, `all`, `exec`) initialize lazily.
//! [`Database::try_pool`] does not: it fails with [`DbError::Uninitialized`]
//! until an open has completed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Arguments, FromRow, SqlitePool};

use super::{Connector, DbError};

type OpenAttempt = Shared<BoxFuture<'static, Result<SqlitePool, Arc<sqlx::Error>>>>;

enum State {
    Unopened,
    Opening(OpenAttempt),
    Open(SqlitePool),
    Closed,
}

/// Observable handle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    Unopened,
    Opening,
    Open,
    Closed,
}

/// Bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Outcome of a `run` statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub rows_affected: u64,
    pub last_insert_id: i64,
}

/// Shared, lazily opened database handle
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    connector: Arc<dyn Connector>,
    state: Mutex<State>,
}

impl Database {
    /// Create an unopened handle. No I/O happens here.
    pub fn new(connector: impl Connector) -> Self {
        Self {
            inner: Arc::new(Inner {
                connector: Arc::new(connector),
                state: Mutex::new(State::Unopened),
            }),
        }
    }

    pub fn status(&self) -> HandleStatus {
        match &*self.lock() {
            State::Unopened => HandleStatus::Unopened,
            State::Opening(_) => HandleStatus::Opening,
            State::Open(_) => HandleStatus::Open,
            State::Closed => HandleStatus::Closed,
        }
    }

    /// Return the open pool without triggering an open.
    pub fn try_pool(&self) -> Result<SqlitePool, DbError> {
        match &*self.lock() {
            State::Open(pool) => Ok(pool.clone()),
            State::Closed => Err(DbError::Closed),
            State::Unopened | State::Opening(_) => Err(DbError::Uninitialized),
        }
    }

    /// Execute a statement, returning affected rows and the last insert id.
    pub async fn run(&self, sql: &str, params: &[Value]) -> Result<RunResult, DbError> {
        let pool = self.pool().await?;
        let result = sqlx::query_with(sql, arguments(params)?)
            .execute(&pool)
            .await?;

        Ok(RunResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }

    /// Fetch at most one row.
    pub async fn get<T>(&self, sql: &str, params: &[Value]) -> Result<Option<T>, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let pool = self.pool().await?;
        let row = sqlx::query_as_with::<_, T, _>(sql, arguments(params)?)
            .fetch_optional(&pool)
            .await?;
        Ok(row)
    }

    /// Fetch every row.
    pub async fn all<T>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let pool = self.pool().await?;
        let rows = sqlx::query_as_with::<_, T, _>(sql, arguments(params)?)
            .fetch_all(&pool)
            .await?;
        Ok(rows)
    }

    /// Execute one or more unparameterized statements.
    pub async fn exec(&self, sql: &str) -> Result<(), DbError> {
        let pool = self.pool().await?;
        sqlx::raw_sql(sql).execute(&pool).await?;
        Ok(())
    }

    /// Release the connection. Later statement calls fail with [`DbError::Closed`].
    pub async fn close(&self) {
        let previous = std::mem::replace(&mut *self.lock(), State::Closed);

        match previous {
            State::Open(pool) => {
                pool.close().await;
                tracing::info!("Database connection closed");
            }
            State::Opening(_) => {
                tracing::warn!("Database closed while an open was in flight");
            }
            State::Unopened | State::Closed => {}
        }
    }

    /// Resolve the pool, opening it if needed.
    async fn pool(&self) -> Result<SqlitePool, DbError> {
        let attempt = {
            let mut state = self.lock();
            match &*state {
                State::Open(pool) => return Ok(pool.clone()),
                State::Closed => return Err(DbError::Closed),
                State::Opening(attempt) => attempt.clone(),
                State::Unopened => {
                    let connector = Arc::clone(&self.inner.connector);
                    let attempt: OpenAttempt =
                        async move { connector.connect().await.map_err(Arc::new) }
                            .boxed()
                            .shared();
                    *state = State::Opening(attempt.clone());
                    tracing::debug!("Database open started");
                    attempt
                }
            }
        };

        let outcome = attempt.clone().await;

        let orphaned = {
            let mut state = self.lock();
            let current = matches!(&*state, State::Opening(a) if a.ptr_eq(&attempt));

            match outcome {
                Ok(pool) => {
                    if current {
                        *state = State::Open(pool.clone());
                        return Ok(pool);
                    }
                    if let State::Open(existing) = &*state {
                        return Ok(existing.clone());
                    }
                    // Closed before the attempt settled.
                    pool
                }
                Err(e) => {
                    if current {
                        *state = State::Unopened;
                        tracing::error!(error = %e, "Database open failed");
                    }
                    return Err(DbError::Open(e));
                }
            }
        };

        orphaned.close().await;
        Err(DbError::Closed)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("status", &self.status())
            .finish()
    }
}

fn arguments<'q>(params: &[Value]) -> Result<SqliteArguments<'q>, DbError> {
    let mut args = SqliteArguments::default();

    for param in params {
        match param {
            Value::Integer(v) => args.add(*v),
            Value::Text(v) => args.add(v.clone()),
            Value::Bool(v) => args.add(*v),
            Value::Null => args.add(None::<i64>),
        }
        .map_err(sqlx::Error::Encode)?;
    }

    Ok(args)
}
