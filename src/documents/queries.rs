//! Query helpers over the schools and students collections.

use mongodb::bson::{doc, Bson, Document};

use crate::documents::DocumentStore;
use crate::error::Result;

/// Every document in the collection.
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Document>> {
    store.find(doc! {}).await
}

/// Inserts a school built from `fields` and returns its id.
pub async fn insert_school(store: &dyn DocumentStore, fields: Document) -> Result<Bson> {
    store.insert_one(fields).await
}

/// Replaces the topics of every school called `name`.
///
/// Returns the number of schools modified.
pub async fn update_topics(
    store: &dyn DocumentStore,
    name: &str,
    topics: &[String],
) -> Result<u64> {
    store
        .update_many(doc! { "name": name }, doc! { "$set": { "topics": topics } })
        .await
}

/// Schools whose topics include `topic`.
pub async fn schools_by_topic(store: &dyn DocumentStore, topic: &str) -> Result<Vec<Document>> {
    store.find(doc! { "topics": topic }).await
}

/// Students sorted by their average topic score, best first.
///
/// Each result carries `name` and `averageScore`.
pub async fn top_students(store: &dyn DocumentStore) -> Result<Vec<Document>> {
    store.aggregate(top_students_pipeline()).await
}

fn top_students_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$project": {
                "name": "$name",
                "averageScore": { "$avg": "$topics.score" },
            }
        },
        doc! { "$sort": { "averageScore": -1 } },
    ]
}
