// 🔎 Folder Discovery - which companies and years exist in the store
//
// Layout: companies/<company-slug>/<year>/<file>.csv
// Anything not matching the layout is ignored, never an error.

use crate::blob_store::BlobStore;
use crate::error::BlobError;
use std::collections::BTreeSet;

/// Root prefix every object of interest lives under
pub const COMPANIES_PREFIX: &str = "companies/";

pub struct FolderDiscovery<'s, S: BlobStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: BlobStore + ?Sized> FolderDiscovery<'s, S> {
    pub fn new(store: &'s S) -> Self {
        FolderDiscovery { store }
    }

    /// Distinct company folder names, sorted
    pub fn list_companies(&self) -> Result<BTreeSet<String>, BlobError> {
        let names = self.store.list(COMPANIES_PREFIX)?;
        Ok(names
            .iter()
            .filter_map(|name| {
                let mut parts = name.split('/');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some("companies"), Some(company), Some(_)) if !company.is_empty() => {
                        Some(company.to_string())
                    }
                    _ => None,
                }
            })
            .collect())
    }

    /// Year folders of one company; only four ASCII digits count as a year
    pub fn list_years(&self, company: &str) -> Result<BTreeSet<String>, BlobError> {
        let prefix = company_prefix(company);
        let names = self.store.list(&prefix)?;
        Ok(names
            .iter()
            .filter_map(|name| {
                let mut parts = name.split('/');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some("companies"), Some(c), Some(year)) if c == company && is_year_token(year) => {
                        Some(year.to_string())
                    }
                    _ => None,
                }
            })
            .collect())
    }

    /// Object names directly under companies/<company>/<year>/
    pub fn list_files(&self, company: &str, year: &str) -> Result<Vec<String>, BlobError> {
        let prefix = format!("{}{}/", company_prefix(company), year);
        let mut names: Vec<String> = self
            .store
            .list(&prefix)?
            .into_iter()
            .filter(|name| {
                name.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

fn company_prefix(company: &str) -> String {
    format!("{COMPANIES_PREFIX}{company}/")
}

/// "2024" yes; "24", "20245", "２０２４", "notayear" no
pub fn is_year_token(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Final path segment of an object name
pub fn file_name(object_name: &str) -> &str {
    object_name.rsplit('/').next().unwrap_or(object_name)
}

// ============================================================================
// TESTS
// ============================================================================
