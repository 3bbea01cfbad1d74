use log::{error, info};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A short message for the user, shown once.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub variant: Variant,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: &str) -> Self {
        Self {
            variant: Variant::Default,
            title: "Success".to_string(),
            description: description.to_string(),
        }
    }
    pub fn failure(description: &str) -> Self {
        Self {
            variant: Variant::Destructive,
            title: "Error".to_string(),
            description: description.to_string(),
        }
    }
    pub fn show(&self) {
        match self.variant {
            Variant::Default => info!("{}: {}", self.title, self.description),
            Variant::Destructive => error!("{}: {}", self.title, self.description),
        }
    }
}
