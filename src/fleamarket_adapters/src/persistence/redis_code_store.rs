use std::time::Duration;

use fleamarket_core::{CodeKey, CodeMatch, CodeStore, CodeStoreError, VerificationCode};
use redis::{AsyncCommands, RedisError, Script, aio::MultiplexedConnection};

// Compare and delete in one server-side step. Replies 2 when consumed,
// 1 on mismatch and 0 when nothing is stored.
const TAKE_IF_MATCHES_SCRIPT: &str = r"
local stored = redis.call('GET', KEYS[1])
if not stored then
    return 0
end
if stored == ARGV[1] then
    redis.call('DEL', KEYS[1])
    return 2
end
return 1
";

#[derive(Clone)]
pub struct RedisCodeStore {
    conn: MultiplexedConnection,
    take_if_matches: Script,
}

impl RedisCodeStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            take_if_matches: Script::new(TAKE_IF_MATCHES_SCRIPT),
        }
    }
}

#[async_trait::async_trait]
impl CodeStore for RedisCodeStore {
    #[tracing::instrument(name = "Storing verification code in Redis", skip_all)]
    async fn put(
        &self,
        key: &CodeKey,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        let key = get_key(key);

        let mut conn = self.conn.clone();
        let _: () = conn
            .pset_ex(key, code.as_str(), ttl_millis(ttl))
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    #[tracing::instrument(name = "Reading verification code from Redis", skip_all)]
    async fn get(&self, key: &CodeKey) -> Result<Option<VerificationCode>, CodeStoreError> {
        let key = get_key(key);

        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(&key).await.map_err(unavailable)?;

        stored
            .map(VerificationCode::try_from)
            .transpose()
            .map_err(|e| CodeStoreError::Unavailable(format!("corrupt entry under {key}: {e}")))
    }

    #[tracing::instrument(name = "Deleting verification code from Redis", skip_all)]
    async fn delete(&self, key: &CodeKey) -> Result<(), CodeStoreError> {
        let key = get_key(key);

        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await.map_err(unavailable)?;
        Ok(())
    }

    #[tracing::instrument(name = "Consuming verification code in Redis", skip_all)]
    async fn take_if_matches(
        &self,
        key: &CodeKey,
        submitted: &VerificationCode,
    ) -> Result<CodeMatch, CodeStoreError> {
        let key = get_key(key);

        let mut conn = self.conn.clone();
        let reply: i64 = self
            .take_if_matches
            .key(&key)
            .arg(submitted.as_str())
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        match reply {
            2 => Ok(CodeMatch::Consumed),
            1 => Ok(CodeMatch::Mismatch),
            0 => Ok(CodeMatch::Missing),
            other => Err(CodeStoreError::Unavailable(format!(
                "unexpected reply {other} while consuming {key}"
            ))),
        }
    }
}

const VERIFICATION_CODE_KEY_PREFIX: &str = "verification_code:";

fn get_key(key: &CodeKey) -> String {
    format!("{}{}", VERIFICATION_CODE_KEY_PREFIX, key.storage_key())
}

// PSETEX rejects a zero expiry
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

fn unavailable(e: RedisError) -> CodeStoreError {
    CodeStoreError::Unavailable(e.to_string())
}
