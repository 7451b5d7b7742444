//! Proxy applier
//!
//! Turns a profile and a desired enabled state into a configuration
//! document and hands it to the host boundary. Applying is all-or-nothing
//! with no retry; disabling is best-effort and never fails the caller.

use tracing::{info, warn};

use crate::document;
use crate::error::{Error, Result};
use crate::host::HostBoundary;
use crate::profile::SocksProfile;

/// Callback invoked after a successful apply. The host may shift focus
/// away from the caller's view as a side effect of importing settings;
/// callers can counteract that here. Failures are the hook's own problem.
pub type PostApplyHook = Box<dyn Fn()>;

pub struct ProxyApplier {
    boundary: Box<dyn HostBoundary>,
    post_apply: Option<PostApplyHook>,
}

impl ProxyApplier {
    pub fn new(boundary: Box<dyn HostBoundary>) -> Self {
        Self {
            boundary,
            post_apply: None,
        }
    }

    pub fn with_post_apply_hook(mut self, hook: PostApplyHook) -> Self {
        self.post_apply = Some(hook);
        self
    }

    /// Build the document for `profile` and submit it. Boundary failures
    /// surface as `Error::Apply`; the store is not rolled back, so store
    /// and host may diverge until the next successful apply.
    pub fn apply(&self, profile: &SocksProfile, enable: bool) -> Result<()> {
        let document = document::config_document(profile, enable)?;

        self.boundary
            .submit_configuration_document(&document)
            .map_err(Error::Apply)?;

        if enable {
            info!(
                profile = %profile.name(),
                host = %profile.host(),
                port = profile.port(),
                authenticated = profile.has_authentication(),
                "SOCKS proxy enabled"
            );
        } else {
            info!(profile = %profile.name(), "SOCKS proxy disabled");
        }

        if let Some(hook) = &self.post_apply {
            hook();
        }
        Ok(())
    }

    /// Submit the minimal disable document. Best-effort: a failing
    /// boundary is logged and swallowed so proxy-off never blocks the
    /// caller.
    pub fn disable(&self) {
        match self
            .boundary
            .submit_configuration_document(&document::disable_document())
        {
            Ok(()) => info!("SOCKS proxy disabled"),
            Err(e) => warn!(error = %e, "Failed to disable SOCKS proxy"),
        }
    }

    /// Diagnostics snapshot of the host's current configuration
    pub fn host_snapshot(&self) -> Result<String> {
        self.boundary
            .export_current_configuration()
            .map_err(Error::Apply)
    }
}
