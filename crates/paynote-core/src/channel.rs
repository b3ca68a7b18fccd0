//! Payment channel resolution (card, bank, UPI rail)

use tracing::debug;

use crate::entities::Entities;
use crate::patterns::{channel_re, first_capture};

/// Channel text from the channel pattern, else the first via / through / with
/// phrase. Returned trimmed; `None` when nothing non-empty is found.
pub fn resolve_channel(text: &str, entities: &Entities<'_>) -> Option<String> {
    if let Some(channel) = first_capture(channel_re(), text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        debug!("Channel '{}' from pattern", channel);
        return Some(channel.to_string());
    }

    let channel = entities
        .channel_candidate()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    debug!("Channel '{}' from entity", channel);
    Some(channel.to_string())
}
