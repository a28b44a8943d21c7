use bitflags::bitflags;

bitflags! {
    /// Variant bits layered on top of a (vendor, version) pair. Percona
    /// Server and RDS/Aurora both ship additional syntax/behavior on top
    /// of a base vendor; the bits can combine (a Percona build running on
    /// Aurora-compatible infra, for instance), hence bitflags rather than
    /// a plain enum.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Variant: u8 {
        const NONE               = 0;
        const PERCONA_EXTENSIONS = 1 << 0;
        const AURORA             = 1 << 1;
    }
}

impl Variant {
    pub fn from_image(image: &str) -> Variant {
        let image = image.to_ascii_lowercase();
        let mut v = Variant::NONE;
        if image.contains("percona") {
            v |= Variant::PERCONA_EXTENSIONS;
        }
        if image.contains("aurora") {
            v |= Variant::AURORA;
        }
        v
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::NONE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn combines_bits() {
        let v = Variant::from_image("aurora-percona-mysql:8.0");
        assert!(v.contains(Variant::PERCONA_EXTENSIONS));
        assert!(v.contains(Variant::AURORA));
    }

    #[test]
    fn plain_mysql_has_no_variant() {
        assert_eq!(Variant::from_image("mysql:8.0"), Variant::NONE);
    }
}
