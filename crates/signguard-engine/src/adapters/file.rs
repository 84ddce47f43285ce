//! # File-Backed Store Adapter
//!
//! Durable single-process store: the committed state is held in memory
//! and snapshotted to disk on every commit (write to temp file, fsync,
//! atomic rename). On open, the previous snapshot is reloaded and the
//! history directory is locked against other signer processes.
//!
//! Suitable for a signer that does not run an external database. The
//! commit path offers the same conflict detection as the in-memory
//! adapter; durability is all-or-nothing because the rename either
//! happens or it does not.

use crate::adapters::lock::HistoryLock;
use crate::adapters::state::{MemoryState, StagedWrites};
use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{TransactionalStore, UnitOfWork};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use signguard_types::{Epoch, PublicKey, Slot, ValidatorId};
use std::io::Write;
use std::path::{Path, PathBuf};

/// On-disk snapshot envelope.
#[derive(Serialize, Deserialize)]
struct HistoryFile {
    version: u16,
    state: MemoryState,
}

impl HistoryFile {
    const VERSION: u16 = 1;
}

/// File-backed transactional store.
pub struct FileBackedStore {
    state: Mutex<MemoryState>,
    path: PathBuf,
    /// Held for the lifetime of the store; released on drop.
    _lock: HistoryLock,
}

impl FileBackedStore {
    /// Snapshot file name inside the history directory.
    const HISTORY_FILE: &'static str = "history.bin";

    /// Open (or create) the history in `data_dir`.
    ///
    /// Acquires the directory lock first, then reloads any previous
    /// snapshot.
    ///
    /// ## Errors
    ///
    /// - `Locked`: another signer process owns this directory.
    /// - `Io` / `Serialization`: the snapshot could not be read back.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io {
            reason: format!("create history directory: {}", e),
        })?;
        let lock = HistoryLock::acquire(data_dir)?;
        let path = data_dir.join(Self::HISTORY_FILE);
        let state = Self::load(&path)?;
        tracing::debug!("opened signing history at {}", path.display());

        Ok(Self {
            state: Mutex::new(state),
            path,
            _lock: lock,
        })
    }

    fn load(path: &Path) -> Result<MemoryState, StoreError> {
        if !path.exists() {
            return Ok(MemoryState::default());
        }
        let bytes = std::fs::read(path).map_err(|e| StoreError::Io {
            reason: format!("read history snapshot: {}", e),
        })?;
        let file: HistoryFile =
            bincode::deserialize(&bytes).map_err(|e| StoreError::Serialization {
                reason: format!("decode history snapshot: {}", e),
            })?;
        if file.version != HistoryFile::VERSION {
            return Err(StoreError::Serialization {
                reason: format!("unsupported history snapshot version {}", file.version),
            });
        }
        Ok(file.state)
    }

    /// Write a snapshot atomically: temp file, fsync, rename.
    fn persist(path: &Path, state: &MemoryState) -> Result<(), StoreError> {
        let bytes = bincode::serialize(&HistoryFile {
            version: HistoryFile::VERSION,
            state: state.clone(),
        })
        .map_err(|e| StoreError::Serialization {
            reason: format!("encode history snapshot: {}", e),
        })?;

        let temp_path = path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| StoreError::Io {
            reason: format!("create temp snapshot: {}", e),
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            reason: format!("write snapshot: {}", e),
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            reason: format!("sync snapshot: {}", e),
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| StoreError::Io {
            reason: format!("rename snapshot into place: {}", e),
        })?;
        Ok(())
    }
}

impl TransactionalStore for FileBackedStore {
    type Uow<'a> = FileUnitOfWork<'a>;

    fn begin(&self) -> Result<Self::Uow<'_>, StoreError> {
        Ok(FileUnitOfWork {
            store: self,
            staged: StagedWrites::default(),
        })
    }
}

/// An open unit of work against a [`FileBackedStore`].
///
/// Commit applies the staged writes to a copy of the committed state,
/// persists the copy, and only then swaps it in — a failed disk write
/// leaves both memory and disk on the previous snapshot.
pub struct FileUnitOfWork<'a> {
    store: &'a FileBackedStore,
    staged: StagedWrites,
}

impl UnitOfWork for FileUnitOfWork<'_> {
    fn find_validators(&mut self, keys: &[PublicKey]) -> Result<Vec<Validator>, StoreError> {
        Ok(self.store.state.lock().find_validators(keys))
    }

    fn insert_missing_validators(&mut self, keys: &[PublicKey]) -> Result<(), StoreError> {
        self.staged.stage_validators(keys);
        Ok(())
    }

    fn find_block(
        &mut self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError> {
        let state = self.store.state.lock();
        Ok(self.staged.find_block(&state, validator, slot))
    }

    fn insert_block(&mut self, record: SignedBlockRecord) -> Result<(), StoreError> {
        self.staged.stage_block(record);
        Ok(())
    }

    fn find_attestations(
        &mut self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError> {
        let state = self.store.state.lock();
        Ok(self.staged.find_attestations(&state, validator, lowest_target))
    }

    fn insert_attestation(&mut self, record: SignedAttestationRecord) -> Result<(), StoreError> {
        self.staged.stage_attestation(record);
        Ok(())
    }

    fn commit(self) -> Result<(), StoreError> {
        let mut state = self.store.state.lock();
        self.staged.check_conflicts(&state)?;

        let mut next = state.clone();
        self.staged.apply(&mut next);
        FileBackedStore::persist(&self.store.path, &next)?;

        *state = next;
        Ok(())
    }
}
