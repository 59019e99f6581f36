use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of every `/auth/login` reply. Rejected credentials may still come
/// back as `200` with `success: false`.
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
