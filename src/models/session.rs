#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub signed_in_at: String,
}

impl Session {
    pub fn new(user_id: i64, email: String) -> Self {
        Self {
            user_id,
            email,
            signed_in_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
