use crate::domain::model::Identity;
use crate::domain::traits::AuthProvider;
use tokio::sync::watch;

/// Auth provider driven by whoever holds it: the CLI seeds it from config,
/// tests flip it with `sign_in`/`sign_out`.
pub struct StaticAuthProvider {
    tx: watch::Sender<Option<Identity>>,
}

impl StaticAuthProvider {
    pub fn new(identity: Option<Identity>) -> Self {
        let (tx, _rx) = watch::channel(identity);
        Self { tx }
    }

    pub fn from_uid(uid: Option<String>) -> Self {
        Self::new(
            uid.filter(|u| !u.trim().is_empty())
                .map(|uid| Identity { uid }),
        )
    }

    pub fn sign_in(&self, uid: impl Into<String>) {
        self.tx.send_replace(Some(Identity { uid: uid.into() }));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }
}
