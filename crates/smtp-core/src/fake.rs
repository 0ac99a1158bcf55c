#![allow(clippy::unwrap_used)]

// In-memory SendGrid account for provisioner tests.
//
// Holds sub-users and their keys the way the provider does, so operation
// sequences can be checked end to end. Individual calls can be made to fail.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use smtp_api::{ApiKey, Error, IpAddress, ProviderApi, SubUser, SubUserQuery};

use crate::password::{PasswordError, PasswordGenerator, PasswordPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListIps,
    ListSubUsers,
    CreateSubUser,
    DeleteSubUser,
    ListApiKeys,
    CreateApiKey,
}

/// Arguments of a recorded `create_subuser` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSubUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub ips: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    ips: Vec<IpAddress>,
    subusers: Vec<SubUser>,
    keys: HashMap<String, Vec<ApiKey>>,
    next_id: i64,
    failing: HashMap<Op, u16>,
    list_override: Option<Vec<SubUser>>,
    calls: Vec<Op>,
    created_subusers: Vec<CreatedSubUser>,
    created_key_scopes: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct FakeProvider {
    state: Mutex<State>,
}

pub fn ip(address: &str) -> IpAddress {
    IpAddress {
        ip: address.to_owned(),
        warmup: false,
        start_date: None,
        subusers: Vec::new(),
        rdns: None,
        pools: Vec::new(),
    }
}

fn injected(status: u16) -> Error {
    Error::Api {
        status,
        body: r#"{"errors":[{"message":"injected failure"}]}"#.into(),
    }
}

impl FakeProvider {
    /// Account owning the given IP pool.
    pub fn with_ips(ips: &[&str]) -> Self {
        let fake = Self::default();
        fake.lock().ips = ips.iter().map(|a| ip(a)).collect();
        fake
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn fail(&self, op: Op) {
        self.fail_with_status(op, 500);
    }

    /// Make `op` answer with a non-2xx `status`.
    pub fn fail_with_status(&self, op: Op, status: u16) {
        self.lock().failing.insert(op, status);
    }

    pub fn recover(&self, op: Op) {
        self.lock().failing.remove(&op);
    }

    /// Make every sub-user listing return `subusers` regardless of filter.
    pub fn override_list(&self, subusers: Vec<SubUser>) {
        self.lock().list_override = Some(subusers);
    }

    /// Seed a sub-user without going through `create_subuser`.
    pub fn insert_subuser(&self, username: &str) {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.subusers.push(SubUser {
            id,
            username: username.to_owned(),
            email: format!("{username}@email.com"),
            disabled: false,
        });
    }

    /// Seed a key without going through `create_api_key_for_subuser`.
    pub fn insert_key(&self, username: &str, name: &str, secret: &str) {
        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("key-{}", state.next_id);
        state.keys.entry(username.to_owned()).or_default().push(ApiKey {
            api_key_id: id,
            name: name.to_owned(),
            api_key: secret.to_owned(),
            scopes: vec!["mail.send".into()],
        });
    }

    pub fn calls(&self) -> Vec<Op> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn created_subusers(&self) -> Vec<CreatedSubUser> {
        self.lock().created_subusers.clone()
    }

    pub fn created_key_scopes(&self) -> Vec<Vec<String>> {
        self.lock().created_key_scopes.clone()
    }

    pub fn subuser_count(&self) -> usize {
        self.lock().subusers.len()
    }

    pub fn keys_for(&self, username: &str) -> Vec<ApiKey> {
        self.lock().keys.get(username).cloned().unwrap_or_default()
    }

    fn enter(&self, op: Op) -> Result<std::sync::MutexGuard<'_, State>, Error> {
        let mut state = self.lock();
        state.calls.push(op);
        if let Some(status) = state.failing.get(&op) {
            return Err(injected(*status));
        }
        Ok(state)
    }
}

#[async_trait]
impl ProviderApi for FakeProvider {
    async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>, Error> {
        let state = self.enter(Op::ListIps)?;
        Ok(state.ips.clone())
    }

    async fn list_subusers(&self, query: &SubUserQuery) -> Result<Vec<SubUser>, Error> {
        let state = self.enter(Op::ListSubUsers)?;
        if let Some(ref subusers) = state.list_override {
            return Ok(subusers.clone());
        }
        Ok(state
            .subusers
            .iter()
            .filter(|s| query.username.as_ref().is_none_or(|u| *u == s.username))
            .cloned()
            .collect())
    }

    async fn create_subuser(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        ips: &[String],
    ) -> Result<SubUser, Error> {
        let mut state = self.enter(Op::CreateSubUser)?;
        if state.subusers.iter().any(|s| s.username == username) {
            return Err(Error::Api {
                status: 400,
                body: r#"{"errors":[{"message":"username exists"}]}"#.into(),
            });
        }
        state.created_subusers.push(CreatedSubUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.expose_secret().to_owned(),
            ips: ips.to_vec(),
        });
        state.next_id += 1;
        let subuser = SubUser {
            id: state.next_id,
            username: username.to_owned(),
            email: email.to_owned(),
            disabled: false,
        };
        state.subusers.push(subuser.clone());
        Ok(subuser)
    }

    async fn delete_subuser(&self, username: &str) -> Result<(), Error> {
        let mut state = self.enter(Op::DeleteSubUser)?;
        let before = state.subusers.len();
        state.subusers.retain(|s| s.username != username);
        if state.subusers.len() == before {
            return Err(Error::Api {
                status: 404,
                body: r#"{"errors":[{"message":"resource not found"}]}"#.into(),
            });
        }
        state.keys.remove(username);
        Ok(())
    }

    async fn list_api_keys_for_subuser(&self, username: &str) -> Result<Vec<ApiKey>, Error> {
        let state = self.enter(Op::ListApiKeys)?;
        Ok(state.keys.get(username).cloned().unwrap_or_default())
    }

    async fn create_api_key_for_subuser(
        &self,
        username: &str,
        scopes: &[String],
    ) -> Result<ApiKey, Error> {
        let mut state = self.enter(Op::CreateApiKey)?;
        state.next_id += 1;
        let key = ApiKey {
            api_key_id: format!("key-{}", state.next_id),
            name: username.to_owned(),
            api_key: format!("SG.secret-{}", state.next_id),
            scopes: scopes.to_vec(),
        };
        state.created_key_scopes.push(scopes.to_vec());
        state
            .keys
            .entry(username.to_owned())
            .or_default()
            .push(key.clone());
        Ok(key)
    }
}

// ── Passwords ────────────────────────────────────────────────────────

/// Returns a fixed password and records the policies it was asked for.
#[derive(Debug, Default)]
pub struct FixedPasswordGenerator {
    policies: Mutex<Vec<PasswordPolicy>>,
    fail: bool,
}

pub const FIXED_PASSWORD: &str = "aB3$cdefgh";

impl FixedPasswordGenerator {
    pub fn failing() -> Self {
        Self {
            policies: Mutex::default(),
            fail: true,
        }
    }

    pub fn policies(&self) -> Vec<PasswordPolicy> {
        self.policies.lock().unwrap().clone()
    }
}

impl PasswordGenerator for FixedPasswordGenerator {
    fn generate(&self, policy: &PasswordPolicy) -> Result<SecretString, PasswordError> {
        self.policies.lock().unwrap().push(*policy);
        if self.fail {
            return Err(PasswordError::TooShort {
                requested: policy.digits + policy.symbols,
                length: 0,
            });
        }
        Ok(SecretString::from(FIXED_PASSWORD))
    }
}
