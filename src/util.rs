use regex::Regex;

lazy_static::lazy_static! {
    pub static ref TRACKING_ID_RE: Regex = Regex::new(r"^G-[A-Z0-9]+$").unwrap();
}

/// Returns true when `gid` is a well-formed GA4 measurement id.
pub fn is_valid_tracking_id(gid: &str) -> bool {
    TRACKING_ID_RE.is_match(gid)
}
