//! Accept-header negotiation between the two credential representations.
//!
//! First match wins over a fixed two-entry table: linked data if the
//! preference mentions its media type anywhere, Turtle otherwise. Quality
//! values are not interpreted.

use crate::resource::media::MediaType;

/// Pick the representation to serve for an `Accept` preference.
pub fn select_representation(accept: Option<&str>) -> MediaType {
    match accept {
        Some(pref) if pref.to_ascii_lowercase().contains(MediaType::JSON_LD) => MediaType::JsonLd,
        _ => MediaType::Turtle,
    }
}
