//! Similarity between an application identifier and a desktop file id.
//!
//! Window classes and executable names rarely equal desktop file ids:
//! `jetbrains-clion` ships as `com.jetbrains.CLion`, `firefox` as
//! `org.mozilla.firefox`. Scores are in `[0, 1]`, higher is closer.

/// Segments shorter than this carry no identity (`org`, `com`, `exe`).
const MIN_SEGMENT_LEN: usize = 4;

/// Vendor and platform words shared by too many unrelated apps.
const GENERIC_SEGMENTS: [&str; 6] = ["gnome", "github", "desktop", "flatpak", "freedesktop", "kde"];

const SEPARATORS: [char; 4] = ['.', '-', '_', ' '];

/// Score how well `identifier` names the desktop file id `stem`.
///
/// Takes the better of whole-string normalized Levenshtein and
/// [`segment_similarity`].
pub fn entry_similarity(identifier: &str, stem: &str) -> f64 {
    let identifier = identifier.to_lowercase();
    let stem = stem.to_lowercase();

    let whole = strsim::normalized_levenshtein(&identifier, &stem);
    whole.max(segment_similarity(&identifier, &stem))
}

/// Average, over the identifier's segments, of the best match among the
/// stem's segments. Matches towards the end of the stem weigh more, since
/// reverse-DNS ids put the application name last.
pub fn segment_similarity(identifier: &str, stem: &str) -> f64 {
    let ident_segments = segments(identifier);
    let stem_segments = segments(stem);

    if ident_segments.is_empty() || stem_segments.is_empty() {
        return 0.0;
    }

    let n = stem_segments.len() as f64;
    let total: f64 = ident_segments
        .iter()
        .map(|ident| {
            stem_segments
                .iter()
                .enumerate()
                .map(|(i, seg)| {
                    let position_weight = 0.75 + 0.25 * (i as f64 + 1.0) / n;
                    strsim::normalized_levenshtein(ident, seg) * position_weight
                })
                .fold(0.0, f64::max)
        })
        .sum();

    total / ident_segments.len() as f64
}

fn segments(value: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = value
        .split(SEPARATORS)
        .filter(|s| s.len() >= MIN_SEGMENT_LEN && !GENERIC_SEGMENTS.contains(s))
        .collect();
    segments.dedup();
    segments
}
