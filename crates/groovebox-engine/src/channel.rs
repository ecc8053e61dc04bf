//! Canonical channel resolution.
//!
//! Profiles configure feel per groove bucket, not per individual hit: all
//! cymbal-family hits share the hihat pocket, claps sit with the snare, and
//! toms move with the kick. Channel ids are collapsed to their bucket
//! before any profile lookup.

/// Collapses a channel id to its canonical groove bucket.
///
/// Unknown ids pass through unchanged; their profile lookup then falls back
/// to the all-zero channel feel.
pub fn canonical_channel(channel_id: &str) -> &str {
    match channel_id {
        "kick" | "tom" => "kick",
        "snare" | "clap" => "snare",
        "hihat" | "hihat_closed" | "hihat_open" | "rim" | "crash" => "hihat",
        "bass" => "bass",
        "keys" | "piano" | "strings" | "lead" | "pluck" => "keys",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drum_hits_collapse_to_buckets() {
        assert_eq!(canonical_channel("kick"), "kick");
        assert_eq!(canonical_channel("tom"), "kick");
        assert_eq!(canonical_channel("clap"), "snare");
        assert_eq!(canonical_channel("hihat_open"), "hihat");
        assert_eq!(canonical_channel("crash"), "hihat");
        assert_eq!(canonical_channel("rim"), "hihat");
    }

    #[test]
    fn melodic_channels_collapse_to_keys() {
        for id in ["piano", "strings", "lead", "pluck"] {
            assert_eq!(canonical_channel(id), "keys");
        }
        assert_eq!(canonical_channel("bass"), "bass");
    }

    #[test]
    fn bucket_names_are_fixed_points() {
        for id in ["kick", "snare", "hihat", "bass", "keys"] {
            assert_eq!(canonical_channel(id), id);
        }
    }

    #[test]
    fn unknown_ids_pass_through() {
        assert_eq!(canonical_channel("theremin"), "theremin");
    }
}
