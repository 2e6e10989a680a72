use super::*;

lazy_static! {
    static ref TAGS: HashMap<&'static str, u128> = hashmap! {
        "Wat" => sdbm_hash("Wat"),
        "Type" => sdbm_hash("Type"),
        "Bool" => sdbm_hash("Bool"),
        "App" => sdbm_hash("App"),
        "Pi" => sdbm_hash("Pi"),
        "Fn" => sdbm_hash("Fn"),
        "Eq" => sdbm_hash("Eq"),
    };
}

/// 128-bit sdbm hash of a string.
pub fn sdbm_hash(s: &str) -> u128 {
    let mut h: u128 = 0;
    for c in s.chars() {
        h = (c as u128)
            .wrapping_add(h << 6)
            .wrapping_add(h << 16)
            .wrapping_sub(h);
    }
    h
}

/// Combines hash values into one. The result depends on the order of `parts`.
pub fn combine(parts: &[u128]) -> u128 {
    let mut hex = String::with_capacity(parts.len() * 32);
    for part in parts {
        hex.push_str(&format!("{:032x}", part));
    }
    sdbm_hash(&hex)
}

/// The fixed hash contributed by a sort or term former.
pub fn tag(name: &str) -> u128 {
    match TAGS.get(name) {
        Some(hash) => *hash,
        None => sdbm_hash(name),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn sdbm_is_stable() {
        assert_eq!(sdbm_hash(""), 0);
        assert_eq!(sdbm_hash("a"), 97);
        assert_eq!(sdbm_hash("ab"), 98 + (97 << 6) + (97 << 16) - 97);
        assert_eq!(sdbm_hash("Wat"), sdbm_hash("Wat"));
        assert_ne!(sdbm_hash("Wat"), sdbm_hash("Type"));
    }

    #[test]
    fn combine_is_order_sensitive() {
        let a = sdbm_hash("a");
        let b = sdbm_hash("b");
        assert_eq!(combine(&[a, b]), combine(&[a, b]));
        assert_ne!(combine(&[a, b]), combine(&[b, a]));
        assert_ne!(combine(&[a]), combine(&[a, a]));
    }

    #[test]
    fn tags_match_names() {
        assert_eq!(tag("Pi"), sdbm_hash("Pi"));
        assert_ne!(tag("Pi"), tag("Fn"));
        assert_eq!(tag("Lam"), sdbm_hash("Lam"));
    }
}
