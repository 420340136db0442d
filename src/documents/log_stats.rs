//! Nginx Log Statistics
//!
//! Summarizes a collection of nginx access-log documents, each carrying
//! `method`, `path` and `ip` fields.

use std::fmt;

use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;

use crate::documents::DocumentStore;
use crate::error::Result;

/// Methods reported individually, in display order
pub const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Number of addresses listed in the top-IP section
const TOP_IPS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCount {
    pub method: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpCount {
    pub ip: String,
    pub count: u64,
}

/// Summary of an nginx log collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    /// Total number of log documents
    pub total: u64,
    /// Document count per method in [`HTTP_METHODS`]
    pub methods: Vec<MethodCount>,
    /// `GET /status` requests
    pub status_checks: u64,
    /// Most frequent client addresses, busiest first
    pub top_ips: Vec<IpCount>,
}

/// Collects [`LogStats`] from `store`.
pub async fn nginx_stats(store: &dyn DocumentStore) -> Result<LogStats> {
    let total = store.count_documents(doc! {}).await?;

    let mut methods = Vec::with_capacity(HTTP_METHODS.len());
    for method in HTTP_METHODS {
        let count = store.count_documents(doc! { "method": method }).await?;
        methods.push(MethodCount {
            method: method.to_string(),
            count,
        });
    }

    let status_checks = store
        .count_documents(doc! { "method": "GET", "path": "/status" })
        .await?;

    let top_ips = store
        .aggregate(top_ips_pipeline())
        .await?
        .iter()
        .map(ip_count)
        .collect();

    Ok(LogStats {
        total,
        methods,
        status_checks,
        top_ips,
    })
}

fn top_ips_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$ip", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": TOP_IPS },
    ]
}

fn ip_count(group: &Document) -> IpCount {
    let ip = match group.get("_id") {
        Some(Bson::String(ip)) => ip.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let count = match group.get("count") {
        Some(Bson::Int32(n)) => *n as u64,
        Some(Bson::Int64(n)) => *n as u64,
        Some(Bson::Double(n)) => *n as u64,
        _ => 0,
    };
    IpCount { ip, count }
}

impl fmt::Display for LogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} logs", self.total)?;
        writeln!(f, "Methods:")?;
        for method in &self.methods {
            writeln!(f, "\tmethod {}: {}", method.method, method.count)?;
        }
        writeln!(f, "{} status check", self.status_checks)?;
        writeln!(f, "IPs:")?;
        for ip in &self.top_ips {
            writeln!(f, "\t{}: {}", ip.ip, ip.count)?;
        }
        Ok(())
    }
}
