use std::collections::HashMap;

use crate::error::Result;

/// External keyed store assigning stable identities to routing-field tuples.
///
/// Semantics are insert-if-absent: the first call with a tuple creates an
/// entry and every later call with the same tuple returns the identity
/// assigned then. Identity assignment is owned by the store, never by the
/// resolver that consults it. Implementations signal unreachability with
/// `IdentityStoreUnavailable`, which aborts the whole run.
pub trait IdentityStore {
    fn resolve(
        &mut self,
        bank_account: &str,
        sort_code: &str,
        payee_name: &str,
        building_society_num: &str,
    ) -> Result<String>;
}

/// In-memory identity store assigning sequential identities.
///
/// Stands in for the external keyed lookup service in tests and local runs;
/// a production deployment points the store-backed resolver at the real
/// service instead.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    entries: HashMap<(String, String, String, String), String>,
    next_id: u64,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn resolve(
        &mut self,
        bank_account: &str,
        sort_code: &str,
        payee_name: &str,
        building_society_num: &str,
    ) -> Result<String> {
        let key = (
            bank_account.to_string(),
            sort_code.to_string(),
            payee_name.to_string(),
            building_society_num.to_string(),
        );
        let next_id = &mut self.next_id;
        let identity = self.entries.entry(key).or_insert_with(|| {
            *next_id += 1;
            format!("ID{:07}", *next_id)
        });
        Ok(identity.clone())
    }
}
