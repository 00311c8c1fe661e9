//! In-memory collaborators shared by the use case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fleamarket_core::{
    CodeKey, CodeMatch, CodePurpose, CodeStore, CodeStoreError, CredentialHasher,
    CredentialHasherError, DeliveryError, Good, GoodId, GoodsRepository, GoodsRepositoryError,
    HashedPassword, MailAddress, NewUser, Notifier, Password, Principal, SessionError,
    SessionIssuer, SessionToken, UniqueField, User, UserId, UserName, UserRepository,
    UserRepositoryError, VerificationCode,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use tokio::time::Instant;

pub fn mail(raw: &str) -> MailAddress {
    MailAddress::try_from(Secret::new(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_owned())).unwrap()
}

pub fn code(raw: &str) -> VerificationCode {
    VerificationCode::try_from(raw.to_owned()).unwrap()
}

pub fn name(raw: &str) -> UserName {
    UserName::try_from(raw.to_owned()).unwrap()
}

#[derive(Clone, Copy, Default, PartialEq)]
pub enum StoreBehaviour {
    #[default]
    Healthy,
    Unavailable,
    Stalled,
    /// Hands control back to the scheduler before every operation.
    Yielding,
}

#[derive(Clone, Default)]
pub struct MemoryCodeStore {
    entries: Arc<Mutex<HashMap<CodeKey, (VerificationCode, Instant)>>>,
    behaviour: StoreBehaviour,
}

impl MemoryCodeStore {
    pub fn with_behaviour(behaviour: StoreBehaviour) -> Self {
        Self {
            behaviour,
            ..Self::default()
        }
    }

    async fn enter(&self) -> Result<(), CodeStoreError> {
        match self.behaviour {
            StoreBehaviour::Healthy => Ok(()),
            StoreBehaviour::Unavailable => {
                Err(CodeStoreError::Unavailable("connection refused".to_owned()))
            }
            StoreBehaviour::Stalled => std::future::pending().await,
            StoreBehaviour::Yielding => {
                tokio::task::yield_now().await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn put(
        &self,
        key: &CodeKey,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        self.enter().await?;
        let deadline = Instant::now() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), (code, deadline));
        Ok(())
    }

    async fn get(&self, key: &CodeKey) -> Result<Option<VerificationCode>, CodeStoreError> {
        self.enter().await?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(key)
            .filter(|(_, deadline)| Instant::now() < *deadline)
            .map(|(code, _)| code.clone()))
    }

    async fn delete(&self, key: &CodeKey) -> Result<(), CodeStoreError> {
        self.enter().await?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn take_if_matches(
        &self,
        key: &CodeKey,
        submitted: &VerificationCode,
    ) -> Result<CodeMatch, CodeStoreError> {
        self.enter().await?;
        let mut entries = self.entries.lock().unwrap();
        let outcome = match entries.get(key) {
            Some((_, deadline)) if Instant::now() >= *deadline => CodeMatch::Missing,
            Some((code, _)) if code == submitted => CodeMatch::Consumed,
            Some(_) => CodeMatch::Mismatch,
            None => CodeMatch::Missing,
        };
        if outcome == CodeMatch::Consumed {
            entries.remove(key);
        }
        Ok(outcome)
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(MailAddress, CodePurpose, VerificationCode)>>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn last_code(&self, recipient: &MailAddress, purpose: CodePurpose) -> VerificationCode {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, p, _)| to == recipient && *p == purpose)
            .map(|(_, _, code)| code.clone())
            .expect("no code sent")
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_code(
        &self,
        recipient: &MailAddress,
        purpose: CodePurpose,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        if self.failing {
            return Err(DeliveryError("mailbox unavailable".to_owned()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), purpose, code.clone()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_mail_address(
        &self,
        mail_address: &MailAddress,
    ) -> Result<User, UserRepositoryError> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.mail_address() == mail_address)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.mail_address() == &user.mail_address) {
            return Err(UserRepositoryError::UniqueViolation(UniqueField::MailAddress));
        }
        if users.iter().any(|u| u.name() == &user.name) {
            return Err(UserRepositoryError::UniqueViolation(UniqueField::Name));
        }
        let user = user.into_user(UserId::new(users.len() as u64 + 1));
        users.push(user.clone());
        Ok(user)
    }

    async fn update_credential(
        &self,
        id: UserId,
        password: HashedPassword,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or(UserRepositoryError::NotFound)?;
        user.set_password(password);
        Ok(())
    }
}

/// Reversible "hash" so tests can read stored credentials.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: Password) -> Result<HashedPassword, CredentialHasherError> {
        Ok(HashedPassword::new(Secret::new(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(&self, candidate: Password, hash: &HashedPassword) -> bool {
        hash.as_ref().expose_secret() == &format!("plain:{}", candidate.as_ref().expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct StubSessionIssuer;

impl SessionIssuer for StubSessionIssuer {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionError> {
        Ok(SessionToken::new(Secret::new(format!("token-{}", user.id()))))
    }

    fn authenticate(&self, _token: &str) -> Result<Principal, SessionError> {
        Err(SessionError::InvalidToken)
    }
}

pub fn good(id: u64, seller: u64, is_bought: bool) -> Good {
    Good {
        id: GoodId::new(id),
        seller_id: UserId::new(seller),
        name: format!("good #{id}"),
        price: 1_000 + id,
        description: String::new(),
        is_bought,
    }
}

#[derive(Clone, Default)]
pub struct MemoryGoodsRepository {
    pub goods: Vec<Good>,
    pub favorites: HashMap<UserId, Vec<Good>>,
    pub bought: HashMap<UserId, Vec<Good>>,
    pub unavailable: bool,
}

impl MemoryGoodsRepository {
    fn check(&self) -> Result<(), GoodsRepositoryError> {
        if self.unavailable {
            return Err(GoodsRepositoryError::Unavailable("pool timed out".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl GoodsRepository for MemoryGoodsRepository {
    async fn find_goods_by_seller(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Good>, GoodsRepositoryError> {
        self.check()?;
        Ok(self
            .goods
            .iter()
            .filter(|good| good.seller_id == user_id)
            .cloned()
            .collect())
    }

    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError> {
        self.check()?;
        self.favorites
            .get(&user_id)
            .cloned()
            .ok_or(GoodsRepositoryError::UserNotFound)
    }

    async fn load_bought(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError> {
        self.check()?;
        self.bought
            .get(&user_id)
            .cloned()
            .ok_or(GoodsRepositoryError::UserNotFound)
    }
}
