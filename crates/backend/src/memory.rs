//! In-memory backend for tests.
//!
//! Holds accounts and table rows in process and evaluates `Query` filters,
//! ordering and limits the way the hosted endpoint does. Embedded relations
//! are not resolved: rows are returned exactly as inserted, so tests insert
//! them already joined.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use core_types::{Role, SignUpProfile};
use serde_json::Value;
use uuid::Uuid;

use crate::{AuthUser, Backend, BackendError, Order, Query, Result};

#[derive(Debug, Clone)]
struct Account {
    id: Uuid,
    email: String,
    password: String,
    role: Option<Role>,
    profile: SignUpProfile,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    current: Option<Uuid>,
    tables: HashMap<String, Vec<Value>>,
    failing_tables: HashSet<String>,
    sign_in_failures: Vec<BackendError>,
    sign_up_failures: Vec<BackendError>,
    role_lookup_fails: bool,
    sign_in_calls: usize,
    sign_up_calls: usize,
    select_calls: usize,
}

/// In-memory `Backend`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RefCell<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with a role.
    pub fn with_user(self, email: &str, password: &str, role: Role) -> Self {
        self.add_account(email, password, Some(role), SignUpProfile::default());
        self
    }

    /// Register an account the role lookup knows nothing about.
    pub fn with_roleless_user(self, email: &str, password: &str) -> Self {
        self.add_account(email, password, None, SignUpProfile::default());
        self
    }

    /// Start with `email` already signed in, as if a session was persisted.
    pub fn with_session(self, email: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.current = state.accounts.iter().find(|a| a.email == email).map(|a| a.id);
        }
        self
    }

    /// Append a row to `table`.
    pub fn insert_row(&self, table: &str, row: Value) {
        self.state
            .borrow_mut()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Make every read of `table` fail.
    pub fn fail_table(&self, table: &str) {
        self.state.borrow_mut().failing_tables.insert(table.to_string());
    }

    /// Make the next sign-in fail with `error`.
    pub fn fail_next_sign_in(&self, error: BackendError) {
        self.state.borrow_mut().sign_in_failures.push(error);
    }

    /// Make the next sign-up fail with `error`.
    pub fn fail_next_sign_up(&self, error: BackendError) {
        self.state.borrow_mut().sign_up_failures.push(error);
    }

    /// Make role lookups fail.
    pub fn fail_role_lookup(&self) {
        self.state.borrow_mut().role_lookup_fails = true;
    }

    pub fn sign_in_calls(&self) -> usize {
        self.state.borrow().sign_in_calls
    }

    pub fn sign_up_calls(&self) -> usize {
        self.state.borrow().sign_up_calls
    }

    pub fn select_calls(&self) -> usize {
        self.state.borrow().select_calls
    }

    /// Profile fields the account was registered with.
    pub fn profile_of(&self, email: &str) -> Option<SignUpProfile> {
        self.state
            .borrow()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.profile.clone())
    }

    pub fn role_of(&self, email: &str) -> Option<Role> {
        self.state
            .borrow()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .and_then(|a| a.role)
    }

    fn add_account(&self, email: &str, password: &str, role: Option<Role>, profile: SignUpProfile) {
        let mut state = self.state.borrow_mut();
        let id = Uuid::from_u128(state.accounts.len() as u128 + 1);
        state.accounts.push(Account {
            id,
            email: email.to_string(),
            password: password.to_string(),
            role,
            profile,
        });
    }
}

impl Account {
    fn auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id,
            email: Some(self.email.clone()),
        }
    }
}

#[async_trait(?Send)]
impl Backend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let mut state = self.state.borrow_mut();
        state.sign_in_calls += 1;

        if !state.sign_in_failures.is_empty() {
            return Err(state.sign_in_failures.remove(0));
        }

        let user = state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(Account::auth_user)
            .ok_or_else(|| BackendError::Auth("Invalid login credentials".to_string()))?;

        state.current = Some(user.id);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, profile: &SignUpProfile) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            state.sign_up_calls += 1;

            if !state.sign_up_failures.is_empty() {
                return Err(state.sign_up_failures.remove(0));
            }

            if state.accounts.iter().any(|a| a.email == email) {
                return Err(BackendError::Auth("User already registered".to_string()));
            }
        }

        let role = profile.role.unwrap_or(Role::Client);
        self.add_account(email, password, Some(role), profile.clone());
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.borrow_mut().current = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        let state = self.state.borrow();
        Ok(state
            .current
            .and_then(|id| state.accounts.iter().find(|a| a.id == id))
            .map(Account::auth_user))
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>> {
        let state = self.state.borrow();
        if state.role_lookup_fails {
            return Err(BackendError::Status {
                status: 500,
                message: "role lookup unavailable".to_string(),
            });
        }

        Ok(state
            .accounts
            .iter()
            .find(|a| a.id == user_id)
            .and_then(|a| a.role))
    }

    async fn select_rows(&self, query: &Query) -> Result<Vec<Value>> {
        let mut state = self.state.borrow_mut();
        state.select_calls += 1;

        if state.failing_tables.contains(query.table_name()) {
            return Err(BackendError::Status {
                status: 503,
                message: format!("{} unavailable", query.table_name()),
            });
        }

        let mut rows: Vec<Value> = state
            .tables
            .get(query.table_name())
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(row, query.filters()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, direction)) = query.ordering() {
            rows.sort_by(|a, b| compare_column(a.get(column), b.get(column), direction));
        }

        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

fn matches_filters(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, expected)| {
        row.get(column).is_some_and(|value| match value {
            Value::String(s) => s == expected,
            other => other.to_string() == *expected,
        })
    })
}

/// Nulls sort last in either direction.
fn compare_column(a: Option<&Value>, b: Option<&Value>, direction: Order) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    let ordering = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    };

    match direction {
        Order::Ascending => ordering,
        Order::Descending => ordering.reverse(),
    }
}
