pub mod settings;
pub mod commentary;
