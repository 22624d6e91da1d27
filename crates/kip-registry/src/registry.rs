use std::marker::PhantomData;
use std::time::Duration;

use kip_codec::{Codec, JsonCodec};
use kip_store::{KvStore, StoreError, WriteOptions};
use kip_types::{LogFile, LogFileList, RegistryObject};
use tracing::{debug, error, warn};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::key::{split_compound_name, KeyLayout, PLACEHOLDER_VALUE};

/// Registry of log records.
pub type LogRegistry<S, C = JsonCodec> = ObjectRegistry<LogFile, S, C>;

/// Typed CRUD and listing for one object kind over a [`KvStore`].
///
/// The registry hides key derivation, record encoding, the per-write TTL and
/// the namespace placeholder. It holds no locks of its own: each call is one
/// or two blocking store round-trips, and concurrent writers to the same
/// identity are resolved by the store (last write wins).
pub struct ObjectRegistry<T, S, C = JsonCodec> {
    store: S,
    codec: C,
    layout: KeyLayout,
    ttl: Duration,
    _kind: PhantomData<fn() -> T>,
}

impl<T, S, C> ObjectRegistry<T, S, C>
where
    T: RegistryObject,
    S: KvStore,
    C: Codec,
{
    /// Build a registry and make sure its namespace exists.
    ///
    /// Never fails: an invalid `config` is logged and replaced by the
    /// defaults, and if the placeholder cannot be written the failure is
    /// logged and the registry is returned anyway. Use
    /// [`try_new`](Self::try_new) to observe either outcome.
    pub fn new(store: S, codec: C, config: &RegistryConfig) -> Self {
        let registry = match config.validate() {
            Ok(()) => Self::assemble(store, codec, config),
            Err(e) => {
                warn!(error = %e, "invalid registry config, using defaults");
                Self::assemble(store, codec, &RegistryConfig::default())
            }
        };
        if let Err(e) = registry.ensure_namespace() {
            warn!(root = registry.layout.root(), error = %e, "namespace placeholder not written");
        }
        registry
    }

    /// Build a registry, failing if `config` is invalid or its namespace
    /// cannot be ensured.
    pub fn try_new(store: S, codec: C, config: &RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        let registry = Self::assemble(store, codec, config);
        registry.ensure_namespace()?;
        Ok(registry)
    }

    fn assemble(store: S, codec: C, config: &RegistryConfig) -> Self {
        Self {
            store,
            codec,
            layout: config.layout_for::<T>(),
            ttl: config.ttl(),
            _kind: PhantomData,
        }
    }

    /// Write the namespace placeholder unless it is already present.
    ///
    /// Idempotent. The placeholder carries no TTL.
    pub fn ensure_namespace(&self) -> RegistryResult<()> {
        let key = self.layout.placeholder_key();
        let exists = self
            .store
            .exists(&key)
            .map_err(|e| RegistryError::store("could not check namespace placeholder", e))?;
        if exists {
            return Ok(());
        }
        self.store
            .put(&key, PLACEHOLDER_VALUE, None)
            .map_err(|e| RegistryError::store("could not write namespace placeholder", e))?;
        debug!(key = %key, "namespace placeholder written");
        Ok(())
    }

    /// Key layout this registry writes under.
    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Time-to-live attached to every record write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write a new record.
    ///
    /// Creation is not exclusive: an existing record at the same identity is
    /// overwritten without error. Returns the record as read back from the
    /// store.
    pub fn create(&self, object: &T) -> RegistryResult<T> {
        self.put(object)
    }

    /// Overwrite a record. Same path as [`create`](Self::create).
    pub fn update(&self, object: &T) -> RegistryResult<T> {
        self.put(object)
    }

    fn put(&self, object: &T) -> RegistryResult<T> {
        let (owner, name) = (object.owner_name(), object.name());
        let key = self.object_key(owner, name)?;
        let data = self
            .codec
            .marshal(object)
            .map_err(|e| RegistryError::codec(format!("could not encode {}", T::KIND), e))?;
        let options = WriteOptions::with_ttl(self.ttl);
        self.store
            .put(&key, &data, Some(&options))
            .map_err(|e| RegistryError::store(format!("could not write {} to registry", T::KIND), e))?;
        debug!(key = %key, bytes = data.len(), ttl_secs = self.ttl.as_secs(), "record written");

        self.get_object(owner, name)
            .map_err(|e| e.with_context(format!("could not get {} after write", T::KIND)))
    }

    /// Read the record for a compound `owner/name` identity.
    ///
    /// A malformed identity fails with [`RegistryError::InvalidName`] before
    /// the store is touched.
    pub fn get(&self, compound_name: &str) -> RegistryResult<T> {
        let (owner, name) = split_compound_name(compound_name)?;
        self.get_object(owner, name)
    }

    /// Read the record for an (owner, name) pair.
    pub fn get_object(&self, owner: &str, name: &str) -> RegistryResult<T> {
        let key = self.object_key(owner, name)?;
        let pair = self.store.get(&key).map_err(|e| {
            RegistryError::store(format!("error retrieving {} from storage", T::KIND), e)
        })?;
        self.codec
            .unmarshal(&pair.value)
            .map_err(|e| RegistryError::codec(format!("error decoding {} at {key}", T::KIND), e))
    }

    /// Remove the record for a compound `owner/name` identity.
    ///
    /// Returns the record as it was before removal. An absent identity is
    /// [`RegistryError::NotFound`].
    pub fn delete(&self, compound_name: &str) -> RegistryResult<T> {
        let (owner, name) = split_compound_name(compound_name)?;
        let key = self.object_key(owner, name)?;
        let object = self.get_object(owner, name)?;
        self.store.delete(&key).map_err(|e| {
            RegistryError::store(format!("could not delete {} from registry", T::KIND), e)
        })?;
        debug!(key = %key, "record deleted");
        Ok(object)
    }

    /// List every record at or below the key derived from (owner, name).
    ///
    /// Both empty lists the whole namespace; an empty name lists one owner.
    /// The placeholder is never returned, and a record that fails to decode
    /// is logged and skipped instead of failing the whole call. Order is
    /// whatever the store returns.
    pub fn list(&self, owner: &str, name: &str) -> RegistryResult<Vec<T>> {
        let prefix = self.layout.derive_key(owner, name)?;
        let pairs = match self.store.list(&prefix) {
            Ok(pairs) => pairs,
            Err(StoreError::KeyNotFound(_)) => return Ok(Vec::new()),
            Err(e) => {
                error!(prefix = %prefix, error = %e, "error listing records in storage");
                return Err(RegistryError::store(
                    format!("error listing {} in storage", T::KIND),
                    e,
                ));
            }
        };

        let mut items = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if self.layout.is_placeholder(&pair.key) {
                continue;
            }
            match self.codec.unmarshal(&pair.value) {
                Ok(object) => items.push(object),
                Err(e) => {
                    warn!(key = %pair.key, error = %e, "skipping undecodable record in list");
                }
            }
        }
        Ok(items)
    }

    /// List the whole namespace.
    pub fn list_all(&self) -> RegistryResult<Vec<T>> {
        self.list("", "")
    }

    /// List everything one owner created.
    pub fn list_owner(&self, owner: &str) -> RegistryResult<Vec<T>> {
        self.list(owner, "")
    }

    fn object_key(&self, owner: &str, name: &str) -> RegistryResult<String> {
        if owner.is_empty() || name.is_empty() {
            return Err(RegistryError::InvalidName {
                name: format!("{owner}/{name}"),
                reason: "owner and name must both be non-empty".into(),
            });
        }
        self.layout.derive_key(owner, name)
    }
}

impl<S: KvStore, C: Codec> ObjectRegistry<LogFile, S, C> {
    /// Build a log registry with default settings.
    pub fn with_defaults(store: S, codec: C) -> Self {
        Self::new(store, codec, &RegistryConfig::default())
    }

    /// List logs as a [`LogFileList`].
    pub fn list_logs(&self, owner: &str, name: &str) -> RegistryResult<LogFileList> {
        self.list(owner, name).map(LogFileList::from)
    }
}

impl<T, S: std::fmt::Debug, C> std::fmt::Debug for ObjectRegistry<T, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("root", &self.layout.root())
            .field("ttl", &self.ttl)
            .field("store", &self.store)
            .finish()
    }
}
