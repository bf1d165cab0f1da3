mod schema;

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::backend::{Backend, BackendError};
use crate::models::*;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

const SUBSCRIPTION_COLUMNS: &str =
    "id, user_id, name, monthly_cost, annual_plan_cost, annual_savings, created_at";

pub(crate) struct Database {
    conn: Connection,
    session: Option<Session>,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            session: None,
        };
        db.migrate().context("Database migration failed")?;
        db.restore_session()
            .context("Failed to restore the active session")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self {
            conn,
            session: None,
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    fn restore_session(&mut self) -> Result<()> {
        self.session = self
            .conn
            .query_row(
                "SELECT s.user_id, u.email, s.signed_in_at
                 FROM active_session s JOIN users u ON s.user_id = u.id
                 WHERE s.id = 1",
                [],
                |row| {
                    Ok(Session {
                        user_id: row.get(0)?,
                        email: row.get(1)?,
                        signed_in_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(())
    }

    // ── Users ─────────────────────────────────────────────────

    fn find_user(&self, email: &str) -> Result<Option<(i64, String)>, BackendError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, password_hash FROM users WHERE email = ?1",
                params![email],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?)
    }

    fn start_session(&mut self, user_id: i64, email: String) -> Result<Session, BackendError> {
        let session = Session::new(user_id, email);
        self.conn.execute(
            "INSERT OR REPLACE INTO active_session (id, user_id, signed_in_at) VALUES (1, ?1, ?2)",
            params![session.user_id, session.signed_in_at],
        )?;
        self.session = Some(session.clone());
        tracing::info!(user_id, "session started");
        Ok(session)
    }

    fn require_session(&self) -> Result<&Session, BackendError> {
        self.session.as_ref().ok_or(BackendError::Unauthenticated)
    }

    // ── Subscriptions ─────────────────────────────────────────

    fn get_subscription_by_id(&self, id: i64) -> Result<Option<Subscription>, BackendError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = ?1"),
                params![id],
                subscription_from_row,
            )
            .optional()?)
    }

    pub(crate) fn get_subscription_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM subscriptions", [], |row| row.get(0))?)
    }
}

impl Backend for Database {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<Session, BackendError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if self.find_user(&email)?.is_some() {
            return Err(BackendError::EmailTaken(email));
        }

        let hash = hash_password(password)?;
        self.conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, hash, chrono::Utc::now().to_rfc3339()],
        )?;
        let user_id = self.conn.last_insert_rowid();
        tracing::info!(user_id, "user signed up");
        self.start_session(user_id, email)
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, BackendError> {
        let email = email.trim().to_lowercase();
        let Some((user_id, hash)) = self.find_user(&email)? else {
            tracing::warn!("sign-in for unknown email");
            return Err(BackendError::InvalidCredentials);
        };
        if !verify_password(password, &hash)? {
            tracing::warn!(user_id, "sign-in with wrong password");
            return Err(BackendError::InvalidCredentials);
        }
        self.start_session(user_id, email)
    }

    fn sign_out(&mut self) -> Result<(), BackendError> {
        self.conn.execute("DELETE FROM active_session", [])?;
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = session.user_id, "signed out");
        }
        Ok(())
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn list_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>, BackendError> {
        if self.require_session()?.user_id != user_id {
            return Err(BackendError::Forbidden);
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions
             WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![user_id], subscription_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn max_subscription_id(&self) -> Result<Option<i64>, BackendError> {
        Ok(self
            .conn
            .query_row("SELECT MAX(id) FROM subscriptions", [], |row| row.get(0))?)
    }

    fn create_subscription(&mut self, record: &Subscription) -> Result<Subscription, BackendError> {
        if self.require_session()?.user_id != record.user_id {
            return Err(BackendError::Forbidden);
        }
        self.conn.execute(
            &format!(
                "INSERT INTO subscriptions ({SUBSCRIPTION_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            params![
                record.id,
                record.user_id,
                record.name,
                record.monthly_cost.to_string(),
                record.annual_plan_cost.to_string(),
                record.annual_savings.to_string(),
                record.created_at,
            ],
        )?;
        self.get_subscription_by_id(record.id)?
            .ok_or(BackendError::Storage(rusqlite::Error::QueryReturnedNoRows))
    }

    fn delete_subscription(&mut self, id: i64) -> Result<(), BackendError> {
        let user_id = self.require_session()?.user_id;
        self.conn.execute(
            "DELETE FROM subscriptions WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(())
    }
}

fn subscription_from_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let monthly: String = row.get(3)?;
    let annual: String = row.get(4)?;
    let savings: String = row.get(5)?;
    Ok(Subscription {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        monthly_cost: Decimal::from_str(&monthly).unwrap_or_default(),
        annual_plan_cost: Decimal::from_str(&annual).unwrap_or_default(),
        annual_savings: Decimal::from_str(&savings).unwrap_or_default(),
        created_at: row.get(6)?,
    })
}

fn normalize_email(email: &str) -> Result<String, BackendError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(BackendError::InvalidEmail(email)),
    }
}

fn hash_password(password: &str) -> Result<String, BackendError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, BackendError> {
    let parsed = PasswordHash::new(hash).map_err(|e| BackendError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests;
