use serde::Serialize;

pub mod admin;
pub mod visitor_handler;
pub mod backend_health_handler;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { data, success: true, message: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self { data, success: true, message: Some(message.into()) }
    }
}
