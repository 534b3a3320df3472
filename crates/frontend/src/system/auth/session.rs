//! Authenticated identity, its roles and token.
//!
//! A session is replaced or cleared as a whole; there is no API to update one
//! field, so a reader never sees a new identity paired with stale roles.

use contracts::system::auth::{LoginResponse, Role, UserInfo};
use std::collections::HashSet;

use super::storage::{
    read_json, write_json, KeyValueStore, ACCESS_TOKEN_KEY, USER_INFO_KEY, USER_ROLES_KEY,
};

/// Roles deduplicated by their lowercased name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSet {
    roles: Vec<Role>,
    keys: HashSet<String>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role; returns false for duplicates and roles without a name
    pub fn insert(&mut self, role: Role) -> bool {
        let Some(key) = role.normalized_name().map(|name| name.to_lowercase()) else {
            log::debug!("Ignoring role without a name: {:?}", role);
            return false;
        };
        if !self.keys.insert(key) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Union of both sets; entries of `self` come first
    pub fn union(&self, other: &RoleSet) -> RoleSet {
        let mut merged = self.clone();
        merged.extend(other.roles.iter().cloned());
        merged
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        set.extend(iter);
        set
    }
}

/// A role grants admin when its name contains "admin", ignoring case.
/// This also matches names such as "co-administrator".
pub fn is_admin_role(role: &Role) -> bool {
    role.normalized_name()
        .map(|name| name.to_lowercase().contains("admin"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    identity: Option<UserInfo>,
    roles: RoleSet,
    token: Option<String>,
}

impl SessionState {
    /// Assemble a session from possibly incomplete parts
    pub fn from_parts(identity: Option<UserInfo>, roles: RoleSet, token: Option<String>) -> Self {
        Self {
            identity,
            roles,
            token,
        }
    }

    /// Identity and token are both present
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() && self.token.is_some()
    }

    pub fn has_role(&self, predicate: impl Fn(&Role) -> bool) -> bool {
        self.roles.iter().any(predicate)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(is_admin_role)
    }

    pub fn identity(&self) -> Option<&UserInfo> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

/// Holder of the one session of the running app.
///
/// Besides the session it carries the transient "logout in progress" flag
/// that keeps route guards from redirecting while a logout completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    state: SessionState,
    logout_in_progress: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &SessionState {
        &self.state
    }

    pub fn set_session(&mut self, identity: UserInfo, roles: RoleSet, token: String) {
        self.state = SessionState::from_parts(Some(identity), roles, Some(token));
    }

    pub fn clear_session(&mut self) {
        self.state = SessionState::default();
    }

    pub fn is_logout_in_progress(&self) -> bool {
        self.logout_in_progress
    }

    pub fn begin_logout(&mut self) {
        self.logout_in_progress = true;
        self.clear_session();
    }

    pub fn finish_logout(&mut self) {
        self.logout_in_progress = false;
    }

    /// Rebuild the session persisted by a previous login
    pub fn restore(persisted: &dyn KeyValueStore) -> Self {
        let token = persisted.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty());
        let identity = read_json::<UserInfo>(persisted, USER_INFO_KEY);
        let roles = match &identity {
            Some(user) => merge_roles(&RoleSet::new(), user, persisted),
            None => RoleSet::new(),
        };

        if identity.is_some() != token.is_some() {
            log::warn!("Stored session is incomplete; treating as signed out");
        }

        Self {
            state: SessionState::from_parts(identity, roles, token),
            logout_in_progress: false,
        }
    }

    /// Start a session from an accepted login and persist it.
    ///
    /// Roles persisted for a different user are discarded, never merged.
    pub fn login(&mut self, response: LoginResponse, persisted: &dyn KeyValueStore) {
        let fresh: RoleSet = response.roles.into_iter().collect();
        let roles = merge_roles(&fresh, &response.user, persisted);
        log::info!(
            "Signed in as '{}' with {} role(s)",
            response.user.username,
            roles.len()
        );
        self.set_session(response.user, roles, response.access_token);
        self.logout_in_progress = false;
        persist(&self.state, persisted);
    }

    /// Fold the persisted roles of the signed-in user into the in-memory ones
    pub fn sync_roles(&mut self, persisted: &dyn KeyValueStore) {
        let Some(identity) = &self.state.identity else {
            return;
        };
        let roles = merge_roles(&self.state.roles, identity, persisted);
        self.state = SessionState::from_parts(
            self.state.identity.clone(),
            roles,
            self.state.token.clone(),
        );
    }
}

/// Union of in-memory roles and the roles persisted for the same user.
///
/// Persisted roles count only when the persisted identity has the id of
/// `identity`; leftovers of another user's session are ignored.
pub fn merge_roles(memory: &RoleSet, identity: &UserInfo, persisted: &dyn KeyValueStore) -> RoleSet {
    let owner = read_json::<UserInfo>(persisted, USER_INFO_KEY).map(|user| user.id);
    if owner.as_deref() != Some(identity.id.as_str()) {
        if owner.is_some() {
            log::info!("Ignoring roles persisted for another user");
        }
        return memory.clone();
    }

    let stored: RoleSet = read_json::<Vec<Role>>(persisted, USER_ROLES_KEY)
        .unwrap_or_default()
        .into_iter()
        .collect();
    memory.union(&stored)
}

pub fn persist(state: &SessionState, store: &dyn KeyValueStore) {
    match (&state.identity, &state.token) {
        (Some(identity), Some(token)) => {
            store.set(ACCESS_TOKEN_KEY, token);
            write_json(store, USER_INFO_KEY, identity);
            let roles: Vec<&Role> = state.roles.iter().collect();
            write_json(store, USER_ROLES_KEY, &roles);
        }
        _ => clear_persisted(store),
    }
}

pub fn clear_persisted(store: &dyn KeyValueStore) {
    store.remove(ACCESS_TOKEN_KEY);
    store.remove(USER_INFO_KEY);
    store.remove(USER_ROLES_KEY);
}
