//! In-memory user directory for testing

use async_trait::async_trait;
use fotolio_auth::{
    directory::DirectoryResult, models::UserRecord, CreateUser, DirectoryError, NewRole, Role,
    UserDirectory, UserProfile,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Role assigned to freshly created users
pub const DEFAULT_ROLE: &str = "user";

#[derive(Default)]
struct State {
    users: HashMap<i64, UserRecord>,
    roles: HashMap<i64, Role>,
    next_user_id: i64,
    next_role_id: i64,
}

/// In-memory `UserDirectory` double
///
/// Email uniqueness is enforced here the way a real store would, so the
/// service sees the same `DuplicateEmail` surface.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: Mutex<State>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role directly, bypassing the service
    pub fn seed_role(&self, name: &str) -> Role {
        let mut state = self.state.lock().unwrap();
        state.next_role_id += 1;
        let role = Role {
            id: state.next_role_id,
            name: name.to_string(),
        };
        state.roles.insert(role.id, role.clone());
        role
    }

    /// Current role of a stored user, for assertions
    pub fn role_of(&self, user_id: i64) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.users.get(&user_id).map(|u| u.role.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn count(&self) -> DirectoryResult<u64> {
        Ok(self.state.lock().unwrap().users.len() as u64)
    }

    async fn list_all(&self) -> DirectoryResult<Vec<UserProfile>> {
        let state = self.state.lock().unwrap();
        let mut profiles: Vec<UserProfile> = state.users.values().map(UserProfile::from).collect();
        profiles.sort_by_key(|p| p.id);
        Ok(profiles)
    }

    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<UserRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> DirectoryResult<Option<UserRecord>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn create(&self, attributes: CreateUser) -> DirectoryResult<UserRecord> {
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|u| u.email == attributes.email) {
            return Err(DirectoryError::DuplicateEmail {
                email: attributes.email,
            });
        }

        state.next_user_id += 1;
        let record = UserRecord {
            id: state.next_user_id,
            email: attributes.email,
            name: attributes.name,
            password_hash: attributes.password_hash,
            role: DEFAULT_ROLE.to_string(),
        };
        state.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_role(&self, id: i64, role_name: &str) -> DirectoryResult<UserProfile> {
        let mut state = self.state.lock().unwrap();
        let record = state.users.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        record.role = role_name.to_string();
        Ok(UserProfile::from(&*record))
    }

    async fn list_roles(&self) -> DirectoryResult<Vec<Role>> {
        let state = self.state.lock().unwrap();
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }

    async fn find_role_by_id(&self, id: i64) -> DirectoryResult<Option<Role>> {
        Ok(self.state.lock().unwrap().roles.get(&id).cloned())
    }

    async fn create_role(&self, attributes: NewRole) -> DirectoryResult<Role> {
        let mut state = self.state.lock().unwrap();
        state.next_role_id += 1;
        let role = Role {
            id: state.next_role_id,
            name: attributes.name,
        };
        state.roles.insert(role.id, role.clone());
        Ok(role)
    }
}
