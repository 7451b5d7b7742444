//! Profile store
//!
//! Ordered collection of SOCKS profiles plus the active-profile id and the
//! proxy enabled flag. Owns the persistence round-trip through the
//! preference store and synchronous change notification. Mutated by a
//! single logical owner; wrap in a mutex if shared across threads.

pub mod preferences;

use tracing::{info, warn};

use crate::constants::prefs as keys;
use crate::constants::{COPY_SUFFIX, defaults};
use crate::error::{Error, Result};
use crate::profile::SocksProfile;
use crate::transfer::MergePolicy;
use preferences::Preferences;

pub type ChangeListener = Box<dyn Fn()>;

pub struct ProfileStore {
    prefs: Box<dyn Preferences>,
    profiles: Vec<SocksProfile>,
    active_profile_id: String,
    proxy_enabled: bool,
    listeners: Vec<ChangeListener>,
}

impl ProfileStore {
    /// Construct by loading persisted state. A missing or corrupt profile
    /// list degrades to a single seeded default profile; an unresolvable
    /// active id falls back to the first profile.
    pub fn new(prefs: Box<dyn Preferences>) -> Self {
        let mut profiles = Vec::new();
        if let Some(json) = prefs.get_string(keys::PROFILES_KEY)
            && !json.trim().is_empty()
        {
            match serde_json::from_str::<Vec<SocksProfile>>(&json) {
                Ok(loaded) => profiles = loaded,
                Err(e) => warn!(error = %e, "Failed to parse stored profiles, starting empty"),
            }
        }

        if profiles.is_empty() {
            // constant seed values, construction cannot fail
            let seed =
                SocksProfile::new(defaults::PROFILE_NAME, defaults::HOST, defaults::PORT)
                    .expect("default profile fields are valid");
            profiles.push(seed);
        }

        let active_profile_id = prefs
            .get_string(keys::ACTIVE_PROFILE_KEY)
            .filter(|id| profiles.iter().any(|p| p.id() == id))
            .unwrap_or_else(|| profiles[0].id().to_string());

        let proxy_enabled = prefs.get_bool(keys::PROXY_ENABLED_KEY).unwrap_or(false);

        info!(
            profiles = profiles.len(),
            enabled = proxy_enabled,
            "Loaded profile store"
        );

        Self {
            prefs,
            profiles,
            active_profile_id,
            proxy_enabled,
            listeners: Vec::new(),
        }
    }

    /// Write the profile list, active id, and enabled flag to the
    /// preference store. The three keys are written independently.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.profiles)?;
        self.prefs.set_string(keys::PROFILES_KEY, &json)?;
        self.prefs
            .set_string(keys::ACTIVE_PROFILE_KEY, &self.active_profile_id)?;
        self.prefs
            .set_bool(keys::PROXY_ENABLED_KEY, self.proxy_enabled)
    }

    /// Snapshot of the profiles in display order
    pub fn profiles(&self) -> Vec<SocksProfile> {
        self.profiles.clone()
    }

    pub fn add(&mut self, profile: SocksProfile) {
        self.profiles.push(profile);
        self.notify_listeners();
    }

    /// Replace the stored profile with a matching id, preserving its
    /// position. Silent no-op when no id matches.
    pub fn update(&mut self, profile: SocksProfile) {
        if let Some(slot) = self.profiles.iter_mut().find(|p| p.id() == profile.id()) {
            *slot = profile;
            self.notify_listeners();
        }
    }

    /// Remove all profiles with the given id. No-op when the store holds a
    /// single profile; the last profile can never be removed. Reassigns the
    /// active profile to the new first entry when the active one goes away.
    pub fn delete(&mut self, id: &str) {
        if self.profiles.len() <= 1 {
            return;
        }
        self.profiles.retain(|p| p.id() != id);
        if self.active_profile_id == id {
            self.active_profile_id = self.profiles[0].id().to_string();
        }
        self.notify_listeners();
    }

    /// Append a copy of `profile` named "<name> (Copy)" and return it
    pub fn duplicate(&mut self, profile: &SocksProfile) -> Result<SocksProfile> {
        let copy = profile.duplicate(&format!("{}{}", profile.name(), COPY_SUFFIX))?;
        self.profiles.push(copy.clone());
        self.notify_listeners();
        Ok(copy)
    }

    /// First profile with the given id, if any
    pub fn get_by_id(&self, id: &str) -> Option<&SocksProfile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    pub fn get_active(&self) -> Option<&SocksProfile> {
        self.profiles
            .iter()
            .find(|p| p.id() == self.active_profile_id)
    }

    pub fn active_profile_id(&self) -> &str {
        &self.active_profile_id
    }

    /// No-op when the id does not resolve to a stored profile
    pub fn set_active(&mut self, id: &str) {
        if self.get_by_id(id).is_some() {
            self.active_profile_id = id.to_string();
            self.notify_listeners();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.proxy_enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.proxy_enabled = enabled;
        self.notify_listeners();
    }

    /// Reconcile imported profiles with the store. Replace adopts the
    /// imported list verbatim and activates its first entry; Merge appends,
    /// optionally reassigning fresh ids. Saves immediately after either
    /// policy. Returns the number of profiles taken in.
    pub fn import(
        &mut self,
        mut candidates: Vec<SocksProfile>,
        policy: MergePolicy,
    ) -> Result<usize> {
        let count = candidates.len();
        match policy {
            MergePolicy::Replace => {
                if candidates.is_empty() {
                    return Err(Error::InvalidArgument(
                        "replace import requires at least one profile".to_string(),
                    ));
                }
                self.profiles = candidates;
                self.active_profile_id = self.profiles[0].id().to_string();
            }
            MergePolicy::Merge { fresh_ids } => {
                if fresh_ids {
                    for profile in &mut candidates {
                        profile.regenerate_id();
                    }
                }
                self.profiles.append(&mut candidates);
            }
        }
        self.notify_listeners();
        self.save()?;
        Ok(count)
    }

    /// Register a process-lifetime listener, invoked synchronously in
    /// registration order after every mutation. Listeners must not
    /// re-enter the store.
    pub fn add_change_listener(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn notify_listeners(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
