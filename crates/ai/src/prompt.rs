//! System preamble sent ahead of every conversation.

use crate::types::DashboardContext;

/// Fixed instructions for the assistant.
pub const ASSISTANT_PREAMBLE: &str = "You are a helpful financial assistant for FinBoard, a stock market dashboard app.
You help users understand their investments, analyze market trends, and answer financial questions.
Be concise, friendly, and accurate. Use emojis occasionally to make it engaging.

";

/// Preamble plus one line per widget on the user's dashboard.
pub fn build_context_prompt(context: Option<&DashboardContext>) -> String {
    let mut prompt = ASSISTANT_PREAMBLE.to_string();
    let widgets = context.map(|c| c.widgets.as_slice()).unwrap_or_default();
    if !widgets.is_empty() {
        prompt.push_str("\nUser's current dashboard:\n");
        for widget in widgets {
            prompt.push_str(&format!(
                "- {}: {} data\n",
                widget.label(),
                widget.provider.as_deref().unwrap_or_default()
            ));
        }
    }
    prompt
}
