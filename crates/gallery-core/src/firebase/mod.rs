//! Firebase REST Clients
//!
//! Cloud Storage for the image bytes, Firestore for the gallery documents.
//! Both talk plain HTTPS through `reqwest`, so they work in the browser and
//! natively alike.

mod codec;
mod config;
mod firestore;
mod storage;

pub use codec::{decode_document, decode_run_query, encode_document, FieldValue};
pub use config::FirebaseConfig;
pub use firestore::{document_id, FirestoreClient};
pub use storage::{encode_component, FirebaseStorage, StoredObjectRef};

/// Read the response body of a failed call for the error message.
pub(crate) async fn failure_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => format!("{status}: {}", body.trim()),
        _ => status.to_string(),
    }
}
