//! Configuration model for the showcase.
//!
//! The SDK section is opaque startup input handed to whichever client is
//! constructed; the adapter itself only reads the `demo` section.

use serde::{Deserialize, Serialize};

use crate::content::{Content, PresentationType};

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ShowcaseConfig {
    #[serde(default)]
    pub sdk: SdkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Missing keys fall back to [`SdkConfig::default`], so a partial `[sdk]`
/// table keeps the remaining defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SdkConfig {
    pub organization_code: String,
    pub debug_mode: bool,
    pub mock_mode: MockModeConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            organization_code: "demo-org".to_string(),
            debug_mode: true,
            mock_mode: MockModeConfig::default(),
        }
    }
}

/// Mock-mode parameters: content the client serves instead of contacting a backend.
///
/// Omitting `content` keeps the seeded demo items; `content = []` serves none.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MockModeConfig {
    pub enabled: bool,
    pub content: Vec<SeededContent>,
}

impl Default for MockModeConfig {
    fn default() -> Self {
        let popup = |trigger_point: &str, title: &str| SeededContent {
            trigger_point: trigger_point.to_string(),
            presentation_type: PresentationType::Popup,
            title: Some(title.to_string()),
        };
        Self {
            enabled: true,
            content: vec![
                popup("account-dashboard", "Welcome back"),
                popup("savings-promotion", "Boost your savings"),
                popup("credit-card-offer", "Cash back card"),
                popup("investment-promotion", "Start investing"),
                SeededContent {
                    trigger_point: "account-dashboard".to_string(),
                    presentation_type: PresentationType::Button,
                    title: Some("What's new".to_string()),
                },
            ],
        }
    }
}

/// One content item served while mock mode is on.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SeededContent {
    pub trigger_point: String,
    pub presentation_type: PresentationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SeededContent {
    /// Materializes the seed as SDK content with a stable id.
    pub fn to_content(&self, index: usize) -> Content {
        let content = Content::new(
            format!("mock-{}-{}-{}", index, self.trigger_point, self.presentation_type),
            self.trigger_point.clone(),
            self.presentation_type,
        );
        match &self.title {
            Some(title) => content.with_title(title.clone()),
            None => content,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// What the demo shell logs in as and monitors.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub user_id: String,
    pub user_type: String,
    pub trigger_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_type: Option<PresentationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_trigger_point: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            user_id: "demo-user".to_string(),
            user_type: "premium".to_string(),
            trigger_points: vec![
                "account-dashboard".to_string(),
                "low-balance-alert".to_string(),
                "savings-promotion".to_string(),
                "credit-card-offer".to_string(),
            ],
            presentation_type: Some(PresentationType::Popup),
            button_trigger_point: Some("account-dashboard".to_string()),
        }
    }
}
