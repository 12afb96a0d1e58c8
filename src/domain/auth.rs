use serde::{Deserialize, Serialize};

/// JWT claims carried by an identity token: who the caller is and until when
/// that assertion holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: usize,
}

impl Claims {
    #[must_use]
    pub const fn new(username: String, exp: usize) -> Self {
        Self { username, exp }
    }
}
