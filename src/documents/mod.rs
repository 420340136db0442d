//! Document Store Module
//!
//! Thin typed access to a document collection: the port, a MongoDB
//! adapter, and the query helpers built on them.

mod log_stats;
mod mongo;
mod queries;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::Result;

pub use log_stats::{nginx_stats, IpCount, LogStats, MethodCount, HTTP_METHODS};
pub use mongo::MongoStore;
pub use queries::{insert_school, list_all, schools_by_topic, top_students, update_topics};

// == Document Store ==
/// Operations on a single collection of schema-less documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`.
    async fn find(&self, filter: Document) -> Result<Vec<Document>>;

    /// Inserts `document` and returns its id.
    async fn insert_one(&self, document: Document) -> Result<Bson>;

    /// Applies `update` to every match of `filter`; returns the number modified.
    async fn update_many(&self, filter: Document, update: Document) -> Result<u64>;

    /// Number of documents matching `filter`.
    async fn count_documents(&self, filter: Document) -> Result<u64>;

    /// Runs an aggregation pipeline.
    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>>;
}
