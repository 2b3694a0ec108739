use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use rand::Rng;

use crate::probe::{ServiceStatus, PROBE_TIMEOUT};

/// Fixed namespace the diagnostic round trip writes into.
const TEST_DATABASE: &str = "test_db";
const TEST_COLLECTION: &str = "test_collection";

pub async fn get_status(uri: &str) -> ServiceStatus {
    match fetch_build_version(uri).await {
        Ok(version) => ServiceStatus {
            name: "MongoDB".to_string(),
            icon: "fa-leaf".to_string(),
            status: true,
            info: version,
        },
        Err(e) => {
            tracing::debug!("mongodb probe failed: {}", e);
            ServiceStatus {
                name: "MongoDB".to_string(),
                icon: "fa-leaf".to_string(),
                status: false,
                info: String::new(),
            }
        }
    }
}

async fn fetch_build_version(uri: &str) -> Result<String, mongodb::error::Error> {
    let client = connect(uri).await?;
    let info = client
        .database("admin")
        .run_command(doc! { "buildInfo": 1 })
        .await?;
    Ok(info.get_str("version").unwrap_or_default().to_string())
}

async fn connect(uri: &str) -> Result<Client, mongodb::error::Error> {
    let mut opts = ClientOptions::parse(uri).await?;
    // The driver connects lazily; server selection is where an unreachable
    // backend actually surfaces, so that is where the timeout goes.
    opts.server_selection_timeout = Some(PROBE_TIMEOUT);
    Client::with_options(opts)
}

pub struct RoundTrip {
    pub databases: Vec<(String, u64)>,
    pub inserted_random: i32,
    pub documents: u64,
}

/// Write-then-read check against the fixed test collection: list the server's
/// databases, insert one marker record, count what the collection holds.
pub async fn round_trip(uri: &str) -> Result<RoundTrip, mongodb::error::Error> {
    let client = connect(uri).await?;

    let databases = client
        .list_databases()
        .await?
        .into_iter()
        .map(|db| (db.name, db.size_on_disk))
        .collect();

    let inserted_random: i32 = rand::rng().random_range(1..=100);
    let collection = client
        .database(TEST_DATABASE)
        .collection::<Document>(TEST_COLLECTION);
    collection
        .insert_one(doc! {
            "test": "Hello from devstack-dashboard",
            "timestamp": DateTime::now(),
            "random": inserted_random,
        })
        .await?;
    let documents = collection.count_documents(doc! {}).await?;

    Ok(RoundTrip {
        databases,
        inserted_random,
        documents,
    })
}
