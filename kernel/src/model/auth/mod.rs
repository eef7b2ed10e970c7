pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn key(&self) -> String {
        format!("auth:{}", self.0)
    }
}

impl Default for AccessToken {
    fn default() -> Self {
        Self::new()
    }
}
