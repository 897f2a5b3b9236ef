//! Normalization of Trading `Errors` blocks

use super::XmlElement;
use crate::error::{ApiErrorDetail, ErrorEnvelope};

/// A Trading response document whose `Ack` signalled failure
pub struct AckErrors<'a>(pub &'a XmlElement);

impl ErrorEnvelope for AckErrors<'_> {
    fn errors(&self) -> Vec<ApiErrorDetail> {
        self.0
            .children_named("Errors")
            .map(|block| {
                let field = |name: &str| block.child_text(name).map(str::to_string);
                ApiErrorDetail {
                    code: field("ErrorCode").unwrap_or_default(),
                    message: field("LongMessage")
                        .or_else(|| field("ShortMessage"))
                        .unwrap_or_default(),
                    severity: field("SeverityCode"),
                    short_message: field("ShortMessage"),
                    classification: field("ErrorClassification"),
                    ..Default::default()
                }
            })
            .collect()
    }

    fn fallback_message(&self) -> &'static str {
        "eBay API error"
    }
}
