//! MAC-to-vendor lookup against the bundled OUI database.

use anyhow::Context;
use mac_oui::Oui;
use pnet::util::MacAddr;

/// Resolves a hardware address to its manufacturer.
pub trait VendorRepository: Send + Sync {
    /// `None` on a miss; the caller substitutes the sentinel.
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}

/// OUI-prefix lookup backed by an explicitly loaded database.
///
/// Constructed once per run and shared by reference; there is no
/// process-wide instance.
pub struct OuiRepo {
    db: Oui,
}

impl OuiRepo {
    pub fn new() -> anyhow::Result<Self> {
        let db = Oui::default()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("loading OUI database")?;
        Ok(Self { db })
    }
}

impl VendorRepository for OuiRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        match self.db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
