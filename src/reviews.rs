//! Performance review board.

use tracing::{debug, info};

use crate::error::Result;
use crate::fixtures::ReviewFixture;
use crate::models::{PerformanceReview, ReviewForm};
use crate::store::{self, Origin, Store, keys};
use crate::validation::validate_review;

#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reviews: Vec<PerformanceReview>,
}

impl ReviewBoard {
    pub fn new(reviews: Vec<PerformanceReview>) -> Self {
        Self { reviews }
    }

    pub fn load<S: Store + ?Sized>(store: &S) -> Result<(Self, Origin)> {
        let loaded = match store::load_json::<Vec<PerformanceReview>, _>(store, keys::PERFORMANCE_REVIEWS)? {
            Some(reviews) => {
                debug!("Loaded {} reviews from store", reviews.len());
                (Self::new(reviews), Origin::Persisted)
            }
            None => (Self::new(ReviewFixture::bundled().reviews), Origin::Seeded),
        };
        Ok(loaded)
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        store::save_json(store, keys::PERFORMANCE_REVIEWS, &self.reviews)
    }

    /// Validate and append a review with ID `max(id) + 1`.
    pub fn add(&mut self, form: ReviewForm) -> Result<&PerformanceReview> {
        validate_review(&form).into_result()?;

        let id = self.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        info!("Added review {} for {}", id, form.name);
        self.reviews.push(form.into_review(id));
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    pub fn list(&self) -> &[PerformanceReview] {
        &self.reviews
    }
}
