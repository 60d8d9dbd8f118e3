use tracing::{info, warn};

use bakeledger_auth::{LocalUser, SignInForm, SignUpForm};

use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::store::{KeyValueStore, StoreError, keys};

/// Demo sign-in state kept under a single key.
#[derive(Debug, Clone)]
pub struct SessionService<S, C> {
    store: S,
    clock: C,
}

impl<S, C> SessionService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn sign_up(&self, form: &SignUpForm) -> ServiceResult<LocalUser> {
        let user = LocalUser::sign_up(form, self.clock.now())?;
        self.persist(&user)?;
        info!(email = %user.email, "user signed up");
        Ok(user)
    }

    pub fn sign_in(&self, form: &SignInForm) -> ServiceResult<LocalUser> {
        let user = LocalUser::sign_in(form, self.clock.now())?;
        self.persist(&user)?;
        info!(email = %user.email, "user signed in");
        Ok(user)
    }

    pub fn sign_out(&self) -> ServiceResult<()> {
        self.store.remove(keys::USER)?;
        info!("user signed out");
        Ok(())
    }

    /// The signed-in user, if any. A stored value that does not parse or is not
    /// marked authenticated is cleared.
    pub fn current(&self) -> ServiceResult<Option<LocalUser>> {
        let Some(raw) = self.store.get(keys::USER)? else {
            return Ok(None);
        };
        match LocalUser::restore(&raw) {
            Some(user) => Ok(Some(user)),
            None => {
                warn!("clearing invalid stored user");
                self.store.remove(keys::USER)?;
                Ok(None)
            }
        }
    }

    fn persist(&self, user: &LocalUser) -> ServiceResult<()> {
        let raw = serde_json::to_string(user).map_err(|source| StoreError::Serialization {
            key: keys::USER.to_string(),
            source,
        })?;
        self.store.set(keys::USER, raw)?;
        Ok(())
    }
}
