//! Plain text rendering.

use crate::extract::ExtractedPage;
use crate::model::StructuredContent;

/// Flattened text of structured content.
pub fn to_text(content: &StructuredContent) -> String {
    content.text.trim().to_string()
}

/// Page title followed by its flattened text.
pub fn page_to_text(page: &ExtractedPage) -> String {
    let body = to_text(&page.content);
    match (page.title.is_empty(), body.is_empty()) {
        (true, _) => body,
        (false, true) => page.title.clone(),
        (false, false) => format!("{}\n\n{}", page.title, body),
    }
}
