use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use fleamarket_core::{
    HashedPassword, MailAddress, NewUser, UniqueField, User, UserId, UserRepository,
    UserRepositoryError,
};

#[derive(Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    by_mail_address: HashMap<MailAddress, UserId>,
    next_id: u64,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    table: Arc<RwLock<UserTable>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepository for HashMapUserStore {
    async fn find_by_mail_address(
        &self,
        mail_address: &MailAddress,
    ) -> Result<User, UserRepositoryError> {
        let table = self.table.read().await;
        table
            .by_mail_address
            .get(mail_address)
            .and_then(|id| table.users.get(id))
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        let table = self.table.read().await;
        table
            .users
            .get(&id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut table = self.table.write().await;
        if table.by_mail_address.contains_key(&user.mail_address) {
            return Err(UserRepositoryError::UniqueViolation(UniqueField::MailAddress));
        }
        if table.users.values().any(|u| u.name() == &user.name) {
            return Err(UserRepositoryError::UniqueViolation(UniqueField::Name));
        }

        table.next_id += 1;
        let user = user.into_user(UserId::new(table.next_id));
        table
            .by_mail_address
            .insert(user.mail_address().clone(), user.id());
        table.users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update_credential(
        &self,
        id: UserId,
        password: HashedPassword,
    ) -> Result<(), UserRepositoryError> {
        let mut table = self.table.write().await;
        let user = table
            .users
            .get_mut(&id)
            .ok_or(UserRepositoryError::NotFound)?;

        user.set_password(password);
        Ok(())
    }
}
