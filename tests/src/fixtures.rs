//! Test fixtures and request body generators.

use serde_json::{json, Value};

/// A complete, valid contact request body.
pub fn contact(talk_about: &str) -> Value {
    json!({
        "talkAbout": talk_about,
        "timeFrame": "3 months",
        "projectType": "web",
        "budget": "10k",
        "description": "Looking for a partner to build our site",
        "requester": {
            "name": "Ada Lovelace",
            "companyName": "Analytical Engines",
            "email": "a@b.com",
            "phoneNumber": "+44 20 7946 0000"
        }
    })
}

/// A valid body with only the required requester fields.
pub fn minimal_contact(talk_about: &str, email: &str) -> Value {
    json!({
        "talkAbout": talk_about,
        "timeFrame": "soon",
        "projectType": "app",
        "budget": "5k",
        "description": "details",
        "requester": { "name": "Grace", "email": email }
    })
}

/// N valid bodies with distinct topics `topic 0..n`.
pub fn contacts(n: usize) -> Vec<Value> {
    (0..n).map(|i| contact(&format!("topic {}", i))).collect()
}

/// Bearer header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
