use std::collections::HashMap;

// ============================================================================
// Message Localizer
// ============================================================================
//
// Resolves message keys into user-facing text. The locale is fixed per
// localizer instance; unknown keys resolve to the key itself.
//
// ============================================================================

pub const GENERAL_CONTENT_KEY: &str = "exception.general-content";
pub const PRODUCT_NOT_FOUND_KEY: &str = "exception.product-not-found";
pub const ORDER_PLACED_KEY: &str = "order.placed";
pub const SUCCESS_KEY: &str = "response.success";

pub trait MessageLocalizer: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Localizer backed by a fixed key → text table
#[derive(Debug, Clone)]
pub struct StaticLocalizer {
    messages: HashMap<String, String>,
}

impl StaticLocalizer {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Built-in English messages
    pub fn english() -> Self {
        let messages = [
            (GENERAL_CONTENT_KEY, "An error occurred while processing your request"),
            (PRODUCT_NOT_FOUND_KEY, "The requested product could not be found"),
            (ORDER_PLACED_KEY, "Order placed successfully"),
            (SUCCESS_KEY, "Request completed successfully"),
        ]
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();

        Self { messages }
    }

    /// English defaults overlaid with `overrides`
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut localizer = Self::english();
        localizer.messages.extend(overrides);
        localizer
    }
}

impl Default for StaticLocalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageLocalizer for StaticLocalizer {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
