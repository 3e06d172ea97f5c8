use crc32fast::Hasher;

/// Derive a stable seed from an editor instance label using CRC32.
pub fn get_seed(label: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for nodes within one tree instance.
///
/// State is explicit and threaded through callers; there is no process-wide
/// singleton. Ids are `{seed}-{count}`.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(label: &str) -> Self {
        Self {
            seed: get_seed(label),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        let a = get_seed("editor");
        let b = get_seed("editor");
        assert_eq!(a, b);

        let c = get_seed("other-editor");
        assert_ne!(a, c);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("editor");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id3.ends_with("-3"));

        let seed = gen.seed();
        assert!(id1.starts_with(seed));
        assert!(id2.starts_with(seed));
        assert!(id3.starts_with(seed));
    }

    #[test]
    fn test_ids_pairwise_distinct() {
        let mut gen = IdGenerator::new("editor");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(gen.new_id()));
        }
    }
}
