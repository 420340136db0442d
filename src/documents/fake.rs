//! In-memory [`DocumentStore`] for tests.
//!
//! Supports top-level equality filters (matching array members the way
//! MongoDB does) and `$set` updates. Aggregations are recorded and answered
//! with a canned result.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::documents::DocumentStore;
use crate::error::Result;

#[derive(Default)]
pub struct FakeDocumentStore {
    pub documents: Mutex<Vec<Document>>,
    pub pipelines: Mutex<Vec<Vec<Document>>>,
    pub aggregate_result: Vec<Document>,
}

impl FakeDocumentStore {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, expected)| match document.get(field) {
        Some(actual @ Bson::Array(items)) => actual == expected || items.contains(expected),
        Some(actual) => actual == expected,
        None => false,
    })
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| matches(doc, &filter))
            .cloned()
            .collect())
    }

    async fn insert_one(&self, mut document: Document) -> Result<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        self.documents.lock().unwrap().push(document);
        Ok(id)
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<u64> {
        let set = update.get_document("$set").cloned().unwrap_or_default();
        let mut modified = 0;

        for doc in self.documents.lock().unwrap().iter_mut() {
            if matches(doc, &filter) {
                for (field, value) in set.iter() {
                    doc.insert(field.clone(), value.clone());
                }
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn count_documents(&self, filter: Document) -> Result<u64> {
        Ok(self.find(filter).await?.len() as u64)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        self.pipelines.lock().unwrap().push(pipeline);
        Ok(self.aggregate_result.clone())
    }
}
