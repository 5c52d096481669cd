use tracing::{debug, info};

use crate::models::Listing;

/// Where the active dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Seed,
    Sheet,
}

/// Single-writer holder of the active dataset.
///
/// Readers take immutable snapshots; replacement happens wholesale through
/// `commit`, and only for the most recently issued request token. A slow
/// stale fetch can therefore never overwrite a newer result, and a failed
/// or empty ingestion (which never reaches `commit`) leaves the previous
/// catalog active.
pub struct ActiveDataset {
    listings: Vec<Listing>,
    origin: DatasetOrigin,
    issued: u64,
}

impl ActiveDataset {
    pub fn new(seed: Vec<Listing>) -> Self {
        Self {
            listings: seed,
            origin: DatasetOrigin::Seed,
            issued: 0,
        }
    }

    pub fn snapshot(&self) -> &[Listing] {
        &self.listings
    }

    pub fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    /// Issue a token for a new ingestion request.
    pub fn begin_request(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Replace the dataset if `token` is still the latest issued request.
    /// Returns whether the replacement was applied.
    pub fn commit(&mut self, token: u64, listings: Vec<Listing>) -> bool {
        if token != self.issued {
            debug!(
                "Ignoring stale ingestion result (token {}, latest {})",
                token, self.issued
            );
            return false;
        }
        info!("Replacing active dataset: {} listings", listings.len());
        self.listings = listings;
        self.origin = DatasetOrigin::Sheet;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_listings;

    fn one_listing(id: &str) -> Vec<Listing> {
        let mut l = seed_listings().remove(0);
        l.id = id.to_string();
        vec![l]
    }

    #[test]
    fn commit_with_latest_token_replaces_wholesale() {
        let mut dataset = ActiveDataset::new(seed_listings());
        assert_eq!(dataset.origin(), DatasetOrigin::Seed);

        let token = dataset.begin_request();
        assert!(dataset.commit(token, one_listing("NEW-1")));

        assert_eq!(dataset.snapshot().len(), 1);
        assert_eq!(dataset.snapshot()[0].id, "NEW-1");
        assert_eq!(dataset.origin(), DatasetOrigin::Sheet);
    }

    #[test]
    fn stale_token_cannot_overwrite_a_newer_request() {
        let mut dataset = ActiveDataset::new(seed_listings());

        let first = dataset.begin_request();
        let second = dataset.begin_request();

        // The older request resolves late; its result is discarded.
        assert!(!dataset.commit(first, one_listing("STALE")));
        assert_eq!(dataset.snapshot(), seed_listings().as_slice());

        assert!(dataset.commit(second, one_listing("FRESH")));
        assert_eq!(dataset.snapshot()[0].id, "FRESH");
    }

    #[test]
    fn token_reuse_after_commit_is_rejected() {
        let mut dataset = ActiveDataset::new(seed_listings());

        let token = dataset.begin_request();
        assert!(dataset.commit(token, one_listing("A")));

        let _newer = dataset.begin_request();
        assert!(!dataset.commit(token, one_listing("B")));
        assert_eq!(dataset.snapshot()[0].id, "A");
    }
}
