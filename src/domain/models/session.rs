use serde::{Deserialize, Serialize};

/// An authenticated caller, as resolved from a request token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Session {
            email: email.into(),
        }
    }
}
