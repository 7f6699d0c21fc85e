use async_trait::async_trait;
use padel_core::{DraftStorage, MemoryStorage, RemoteError, RemoteProcedure, WizardConfig};
use serde_json::Value;
use std::rc::Rc;

/// Stand-in backend for pages mounted without injected services.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBackend;

#[async_trait(?Send)]
impl RemoteProcedure for NoBackend {
    async fn call(&self, procedure: &str, _params: &Value) -> Result<Value, RemoteError> {
        Err(RemoteError::Transport(format!(
            "no backend configured for {procedure}"
        )))
    }
}

/// Injected collaborators shared by every wizard page.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<WizardConfig>,
    pub storage: Rc<dyn DraftStorage>,
    pub remote: Rc<dyn RemoteProcedure>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.storage, &other.storage)
            && Rc::ptr_eq(&self.remote, &other.remote)
    }
}

impl Services {
    #[must_use]
    pub fn new(
        config: WizardConfig,
        storage: Rc<dyn DraftStorage>,
        remote: Rc<dyn RemoteProcedure>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            storage,
            remote,
        }
    }

    /// In-memory drafts with the given backend; used off-browser.
    #[must_use]
    pub fn in_memory(config: WizardConfig, remote: Rc<dyn RemoteProcedure>) -> Self {
        Self::new(config, Rc::new(MemoryStorage::new()), remote)
    }

    /// Default config, in-memory drafts and no backend.
    #[must_use]
    pub fn detached() -> Self {
        Self::in_memory(WizardConfig::default_config(), Rc::new(NoBackend))
    }

    /// `localStorage` drafts and the HTTP procedure client.
    #[must_use]
    pub fn browser() -> Self {
        let config = crate::settings::load_config();
        let token = crate::dom::local_storage()
            .ok()
            .and_then(|s| s.get_item(ACCESS_TOKEN_KEY).ok().flatten());
        let remote =
            crate::remote::RpcClient::from_config(&config.backend).with_access_token(token);
        Self::new(config, Rc::new(crate::storage::LocalStorage), Rc::new(remote))
    }
}

/// Where the identity provider's session token is kept.
pub const ACCESS_TOKEN_KEY: &str = "padel.auth.token";

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn equality_is_by_handle() {
        let a = Services::detached();
        let b = a.clone();
        let c = Services::detached();
        assert!(a == b);
        assert!(a != c);
    }

    #[test]
    fn no_backend_names_the_procedure() {
        let err = block_on(NoBackend.call("create_tournament", &Value::Null)).unwrap_err();
        assert!(err.to_string().contains("create_tournament"));
    }
}
