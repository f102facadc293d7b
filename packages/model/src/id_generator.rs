use crc32fast::Hasher;
use uuid::Uuid;

/// Stable short hash of a site id using CRC32
pub fn get_site_hash(site_id: &str) -> String {
    let mut buff = String::from(site_id);
    if !site_id.starts_with("site://") {
        buff = format!("site://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential element id generator
///
/// Ids have the shape `{seed}-{n}`. The default seed mixes the site hash with
/// a per-session nonce, so two editing sessions on the same site never hand
/// out the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(site_id: &str) -> Self {
        let nonce = Uuid::new_v4().simple().to_string();
        Self {
            seed: format!("{}{}", get_site_hash(site_id), &nonce[..8]),
            count: 0,
        }
    }

    /// Deterministic generator (tests, replays)
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("")
    }
}
