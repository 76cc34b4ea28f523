use sha2::{Digest, Sha256};

const MAX_STEM_LEN: usize = 60;

/// Deterministic, filesystem-safe result file name for a category:
/// `{sanitized_category}--{short_hash(category)}.json`.
pub fn results_filename(category: &str) -> String {
    let category = category.trim();
    format!("{}--{}.json", sanitize(category), short_hash(category))
}

fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if c.is_alphanumeric() || c == '-' {
            c.to_lowercase().next().unwrap_or(c)
        } else {
            '_'
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let mut stem = out.trim_matches('_').to_string();
    if stem.is_empty() {
        stem = "results".to_string();
    }
    if stem.chars().count() > MAX_STEM_LEN {
        stem = stem.chars().take(MAX_STEM_LEN).collect();
    }
    stem
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}
