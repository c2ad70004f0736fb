use crate::error::{CacheError, Result as CacheResult};
use crate::records::{CachedBranch, CachedCompany, CachedLogoUrl, CachedProfile};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use till_core::{Company, Profile};
use uuid::Uuid;

const PROFILE_FILE: &str = "profile.json";
const COMPANY_FILE: &str = "company.json";
const LOGO_FILE: &str = "logo.json";
const BRANCH_FILE: &str = "branch.json";

/// File-backed key/value cache for the last resolved identity state.
///
/// Reads are optimistic: a missing, corrupted, or foreign-user record is
/// simply absent. Writes use the atomic temp-write/fsync/rename pattern so
/// a crash mid-write never leaves a torn record behind.
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ---------------------------------------------------------------------
    // Profile
    // ---------------------------------------------------------------------

    /// Cached profile for this exact user id, if any.
    pub fn load_profile(&self, user_id: Uuid) -> Option<Profile> {
        self.read_record::<CachedProfile>(PROFILE_FILE)
            .filter(|record| record.user_id == user_id)
            .map(|record| record.profile)
    }

    pub fn store_profile(&self, user_id: Uuid, profile: &Profile) -> CacheResult<()> {
        self.write_record(
            PROFILE_FILE,
            &CachedProfile {
                user_id,
                profile: profile.clone(),
            },
        )
    }

    // ---------------------------------------------------------------------
    // Company
    // ---------------------------------------------------------------------

    pub fn load_company(&self, user_id: Uuid) -> Option<Company> {
        self.read_record::<CachedCompany>(COMPANY_FILE)
            .filter(|record| record.user_id == user_id)
            .map(|record| record.company)
    }

    pub fn store_company(&self, user_id: Uuid, company: &Company) -> CacheResult<()> {
        self.write_record(
            COMPANY_FILE,
            &CachedCompany {
                user_id,
                company: company.clone(),
            },
        )
    }

    // ---------------------------------------------------------------------
    // Logo URL
    // ---------------------------------------------------------------------

    /// Cached logo URL; a record past its expiry reads as absent.
    pub fn load_logo_url(&self, user_id: Uuid, now: DateTime<Utc>) -> Option<String> {
        self.read_record::<CachedLogoUrl>(LOGO_FILE)
            .filter(|record| record.user_id == user_id)
            .filter(|record| !record.is_expired(now))
            .map(|record| record.url)
    }

    pub fn store_logo_url(
        &self,
        user_id: Uuid,
        url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> CacheResult<()> {
        self.write_record(
            LOGO_FILE,
            &CachedLogoUrl {
                user_id,
                url: url.to_string(),
                expires_at,
            },
        )
    }

    // ---------------------------------------------------------------------
    // Active branch
    // ---------------------------------------------------------------------

    pub fn active_branch(&self, user_id: Uuid) -> Option<Uuid> {
        self.read_record::<CachedBranch>(BRANCH_FILE)
            .filter(|record| record.user_id == user_id)
            .map(|record| record.branch_id)
    }

    pub fn set_active_branch(&self, user_id: Uuid, branch_id: Uuid) -> CacheResult<()> {
        self.write_record(BRANCH_FILE, &CachedBranch { user_id, branch_id })
    }

    /// Drop the persisted branch selection, if any.
    pub fn clear_active_branch(&self) {
        let path = self.dir.join(BRANCH_FILE);
        if path.exists()
            && let Err(e) = fs::remove_file(&path)
        {
            warn!("Failed to remove cache record {}: {e}", path.display());
        }
    }

    // ---------------------------------------------------------------------
    // Purge
    // ---------------------------------------------------------------------

    /// Remove every cached record. Called on sign-out and on soft-delete
    /// detection.
    pub fn clear_all(&self) {
        for name in [PROFILE_FILE, COMPANY_FILE, LOGO_FILE, BRANCH_FILE] {
            let path = self.dir.join(name);
            if path.exists()
                && let Err(e) = fs::remove_file(&path)
            {
                warn!("Failed to remove cache record {}: {e}", path.display());
            }
        }
    }

    // ---------------------------------------------------------------------
    // IO helpers
    // ---------------------------------------------------------------------

    fn read_record<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read cache record {}: {e}", path.display());
                return None;
            }
        };

        match serde_json::from_str::<T>(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                // Corrupted record: discard so the next write starts clean
                warn!("Cache record corrupted at {}: {e}", path.display());
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Write to a temp file, fsync, then atomically rename into place.
    fn write_record<T: Serialize>(&self, name: &str, record: &T) -> CacheResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| CacheError::dir_creation(self.dir.clone(), e))?;

        let final_path = self.dir.join(name);
        let temp_path = self
            .dir
            .join(format!("{name}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(record)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| CacheError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CacheError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        debug!("Cache record written: {}", final_path.display());
        Ok(())
    }
}
