// Identity manager: secret lifecycle and commitment registration
//
// Owns the secure store exclusively. One registration attempt runs at a
// time (single-slot guard); within an attempt the steps are strictly
// sequential: secret -> inputs -> proof -> submission -> confirmation.
// Proof generation and confirmation are suspension points and can run for
// minutes, so the whole path is async and honors a cancellation token at
// every suspension point.

use rand::RngCore;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::store::SecureStore;
use crate::chain::{Confirmation, ReceiptProvider, TransactionRelay};
use crate::encoding::{build_register_inputs, InputOptions};
use crate::primitives::{
    IdentityPhase, PassportRecord, RegistrationError, RegistrationState, RegistryConfig, Result,
    StoreKeys, PASSPORT_ATTESTATION_ID,
};
use crate::prover::{ProofEngine, ProofOrchestrator};

/// Cancellation signal for an in-flight registration attempt. Cloneable;
/// checked between pipeline steps, so cancellation takes effect at the
/// next suspension point rather than mid-step.
#[derive(Clone)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

/// Sender half controlling a `CancelToken`.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Create a connected cancel handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx: Some(rx) })
}

impl CancelToken {
    /// A token that can never fire, for foreground callers.
    pub fn none() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(RegistrationError::Cancelled);
        }
        Ok(())
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Owns the identity secret, the persisted passport record and the
/// registration workflow. All secure-store mutation happens here.
pub struct IdentityManager {
    store: Arc<dyn SecureStore>,
    orchestrator: ProofOrchestrator,
    relay: Arc<dyn TransactionRelay>,
    provider: Arc<dyn ReceiptProvider>,
    config: RegistryConfig,
    state: RwLock<RegistrationState>,
    attempt_guard: Mutex<()>,
    secret_guard: Mutex<()>,
}

impl IdentityManager {
    pub fn new(
        store: Arc<dyn SecureStore>,
        engine: Arc<dyn ProofEngine>,
        relay: Arc<dyn TransactionRelay>,
        provider: Arc<dyn ReceiptProvider>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            store,
            orchestrator: ProofOrchestrator::new(engine),
            relay,
            provider,
            config,
            state: RwLock::new(RegistrationState::default()),
            attempt_guard: Mutex::new(()),
            secret_guard: Mutex::new(()),
        }
    }

    /// Whether the local commitment is known to be confirmed on chain.
    pub async fn is_registered(&self) -> bool {
        self.state.read().await.registered
    }

    /// Where the local identity stands, derived from the secure store and
    /// the registration flag.
    pub async fn phase(&self) -> Result<IdentityPhase> {
        if self.is_registered().await {
            return Ok(IdentityPhase::Registered);
        }
        let secret = self.store.get(StoreKeys::SECRET).await?;
        let data = self.store.get(StoreKeys::PASSPORT_DATA).await?;
        Ok(match (secret, data) {
            (None, _) => IdentityPhase::NoSecret,
            (Some(_), None) => IdentityPhase::SecretOnly,
            (Some(_), Some(_)) => IdentityPhase::SecretAndData,
        })
    }

    /// Return the identity secret, generating and persisting one only if
    /// none exists. Idempotent: once a secret is stored it is reused
    /// forever, never overwritten. Safe to call any number of times, from
    /// any number of concurrent tasks: the check-then-write runs under a
    /// dedicated lock, so a racing caller re-reads after the winner's
    /// write and reuses that secret instead of overwriting it.
    pub async fn ensure_secret(&self) -> Result<String> {
        let _guard = self.secret_guard.lock().await;

        if let Some(existing) = self.store.get(StoreKeys::SECRET).await? {
            info!("Identity secret already present, keeping it");
            return Ok(existing);
        }

        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let secret = format!("0x{}", hex::encode(bytes));

        self.store.set(StoreKeys::SECRET, &secret).await?;
        info!("🔑 Generated and stored new identity secret");
        Ok(secret)
    }

    /// First-scan entry point: make sure a secret exists, persist the
    /// passport record, then try to register the commitment.
    pub async fn register_passport_data(
        &self,
        record: PassportRecord,
        cancel: CancelToken,
    ) -> Result<Confirmation> {
        let secret = self.ensure_secret().await?;

        if self.store.get(StoreKeys::PASSPORT_DATA).await?.is_some() {
            // Only reachable when the user deleted and rescanned
            warn!("Passport data already stored, overwriting with the new scan");
        }
        let json = serde_json::to_string(&record)
            .map_err(|e| crate::identity::StoreError::Decode(e.to_string()))?;
        self.store.set(StoreKeys::PASSPORT_DATA, &json).await?;

        self.register_commitment(&secret, &record, cancel).await
    }

    /// Run the full registration attempt: build circuit inputs, generate a
    /// proof, submit it through the relay and wait for confirmation.
    ///
    /// On any failure the secret and the stored record are left in place so
    /// a later attempt can reuse them; `registered` only flips on a
    /// confirmed receipt. A second concurrent call fails immediately with
    /// `AttemptInProgress`.
    pub async fn register_commitment(
        &self,
        secret: &str,
        record: &PassportRecord,
        cancel: CancelToken,
    ) -> Result<Confirmation> {
        let _slot = self
            .attempt_guard
            .try_lock()
            .map_err(|_| RegistrationError::AttemptInProgress)?;

        let result = self.run_attempt(secret, record, &cancel).await;
        if let Err(ref e) = result {
            error!("Registration attempt failed: {}", e);
        }
        result
    }

    async fn run_attempt(
        &self,
        secret: &str,
        record: &PassportRecord,
        cancel: &CancelToken,
    ) -> Result<Confirmation> {
        cancel.check()?;

        let options = InputOptions {
            development_mode: self.config.development_mode,
        };
        let (variant, inputs) =
            build_register_inputs(secret, PASSPORT_ATTESTATION_ID, record, options)?;
        info!("🧾 Circuit inputs built for {}", variant.name);

        cancel.check()?;
        let proof = self.orchestrator.generate_proof(variant.name, &inputs).await?;

        cancel.check()?;
        let handle = self.relay.submit_register(&proof).await?;

        cancel.check()?;
        let confirmation = self.provider.wait_for_receipt(&handle).await?;

        self.state.write().await.registered = true;
        info!("✅ Commitment registered in transaction {}", confirmation.hash);
        Ok(confirmation)
    }

    /// Startup restore: return the stored secret and passport record if
    /// both are present. The two are always set together, so one without
    /// the other means onboarding never finished.
    pub async fn load_persisted(&self) -> Result<Option<(String, PassportRecord)>> {
        let secret = match self.store.get(StoreKeys::SECRET).await? {
            Some(secret) => secret,
            None => return Ok(None),
        };
        let json = match self.store.get(StoreKeys::PASSPORT_DATA).await? {
            Some(json) => json,
            None => return Ok(None),
        };
        let record: PassportRecord = serde_json::from_str(&json)
            .map_err(|e| crate::identity::StoreError::Decode(e.to_string()))?;
        Ok(Some((secret, record)))
    }

    /// Mark the identity registered without a fresh attempt. For the
    /// startup path after the caller verified the commitment is already on
    /// chain; never called from the failure path.
    pub async fn restore_registered(&self) {
        self.state.write().await.registered = true;
    }

    /// User-initiated deletion of the stored passport record.
    pub async fn clear_passport_data(&self) -> Result<()> {
        self.store.reset(StoreKeys::PASSPORT_DATA).await?;
        Ok(())
    }

    /// User-initiated deletion of the identity secret. Irrevocable: the
    /// commitment derived from it cannot be reproduced afterwards.
    pub async fn clear_secret(&self) -> Result<()> {
        self.store.reset(StoreKeys::SECRET).await?;
        Ok(())
    }

    /// Run a registration attempt as a background task, as the startup
    /// hook does, returning the join handle and a cancel handle honored at
    /// each suspension point.
    pub fn spawn_registration(
        self: &Arc<Self>,
        secret: String,
        record: PassportRecord,
    ) -> (JoinHandle<Result<Confirmation>>, CancelHandle) {
        let (handle, token) = cancel_pair();
        let manager = Arc::clone(self);
        let join = tokio::spawn(async move {
            manager
                .register_commitment(&secret, &record, token)
                .await
        });
        (join, handle)
    }
}
