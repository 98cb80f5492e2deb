//! Lookup over published certificate summaries.

use serde::{Deserialize, Serialize};

use crate::model::VerificationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub recipient: String,
    pub issue_date: String,
    pub status: VerificationStatus,
    pub block_hash: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Sample certificates shown by the demo front end.
    pub fn demo() -> Self {
        let entry = |id: &str,
                     title: &str,
                     issuer: &str,
                     recipient: &str,
                     issue_date: &str,
                     status: VerificationStatus,
                     block_hash: &str,
                     transaction_id: &str| CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            issuer: issuer.to_string(),
            recipient: recipient.to_string(),
            issue_date: issue_date.to_string(),
            status,
            block_hash: block_hash.to_string(),
            transaction_id: transaction_id.to_string(),
        };
        Self::new(vec![
            entry(
                "1",
                "Blockchain Developer Certification",
                "Stacks Foundation",
                "John Doe",
                "2024-01-15",
                VerificationStatus::Verified,
                "0x1a2b3c4d5e6f",
                "SP1K1A1PMGW2",
            ),
            entry(
                "2",
                "Smart Contract Auditor",
                "CryptoAcademy",
                "Jane Smith",
                "2024-02-20",
                VerificationStatus::Verified,
                "0x7g8h9i0j1k2l",
                "SP2M2B2QNHX3",
            ),
            entry(
                "3",
                "DeFi Specialist",
                "Web3 Institute",
                "Mike Johnson",
                "2024-03-10",
                VerificationStatus::Pending,
                "0x3m4n5o6p7q8r",
                "SP3N3C3ROIA4",
            ),
        ])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// First entry, in catalog order, whose id equals the query or whose
    /// transaction id or block hash contains it (case-insensitive). Blank
    /// queries match nothing.
    pub fn search(&self, query: &str) -> Option<&CatalogEntry> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        self.entries.iter().find(|e| {
            e.id == query
                || e.transaction_id.to_lowercase().contains(&needle)
                || e.block_hash.to_lowercase().contains(&needle)
        })
    }
}
