use std::fmt;
use std::str::FromStr;

use crate::vendor::Vendor;
use crate::version::Version;
use crate::variant::Variant;

/// Identifies a target server's vendor, version, and variant, and answers
/// capability queries that gate syntactic choices elsewhere in the core.
/// Plain data: no external dependencies, no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flavor {
    pub vendor: Vendor,
    pub version: Version,
    pub variant: Variant,
}

impl Flavor {
    pub const fn new(vendor: Vendor, version: Version, variant: Variant) -> Self {
        Flavor { vendor, version, variant }
    }

    /// Parse a free-form image/version string, e.g. `"mysql:8.0"`,
    /// `"percona/percona-server:8.1.0-aarch64"`, `"mariadb:10.11"`.
    pub fn parse(image: &str) -> Flavor {
        let vendor = Vendor::from_image(image);
        let variant = Variant::from_image(image);
        let version = image
            .rsplit(':')
            .next()
            .and_then(Version::parse)
            .unwrap_or_default();
        Flavor { vendor, version, variant }
    }

    pub fn is_mysql_family(&self) -> bool {
        matches!(self.vendor, Vendor::Mysql | Vendor::Percona)
    }

    pub fn is_mariadb(&self) -> bool {
        self.vendor == Vendor::MariaDb
    }

    pub fn min(&self, major: u16, minor: u16, patch: u16) -> bool {
        self.version.meets_min(major, minor, patch)
    }

    // --- capability queries -------------------------------------------------

    /// CHECK constraints: MySQL/Percona 8.0.16+, MariaDB 10.2.1+.
    pub fn supports_check_constraints(&self) -> bool {
        match self.vendor {
            Vendor::Mysql | Vendor::Percona => self.min(8, 0, 16),
            Vendor::MariaDb => self.min(10, 2, 1),
            Vendor::Unknown => false,
        }
    }

    /// Generated (computed) columns: MySQL/Percona 5.7.6+, MariaDB 5.2+
    /// (practical floor used here is MariaDB 10.2, where the feature
    /// became broadly usable alongside virtual indexes).
    pub fn supports_generated_columns(&self) -> bool {
        match self.vendor {
            Vendor::Mysql | Vendor::Percona => self.min(5, 7, 6),
            Vendor::MariaDb => self.min(10, 2, 0),
            Vendor::Unknown => false,
        }
    }

    /// `INVISIBLE` indexes: MySQL/Percona 8.0.0+ only (MariaDB has no
    /// invisible-index syntax; it uses `IGNORED` on constraints instead).
    pub fn supports_invisible_indexes(&self) -> bool {
        matches!(self.vendor, Vendor::Mysql | Vendor::Percona) && self.min(8, 0, 0)
    }

    /// `INVISIBLE` columns: MySQL/Percona 8.0.23+, MariaDB 10.3.3+.
    pub fn supports_invisible_columns(&self) -> bool {
        match self.vendor {
            Vendor::Mysql | Vendor::Percona => self.min(8, 0, 23),
            Vendor::MariaDb => self.min(10, 3, 3),
            Vendor::Unknown => false,
        }
    }

    /// Functional (expression) key parts: MySQL/Percona 8.0.13+,
    /// MariaDB 10.3.7+.
    pub fn supports_functional_indexes(&self) -> bool {
        match self.vendor {
            Vendor::Mysql | Vendor::Percona => self.min(8, 0, 13),
            Vendor::MariaDb => self.min(10, 3, 7),
            Vendor::Unknown => false,
        }
    }

    /// MySQL 8.0+ family moved table metadata into a transactional data
    /// dictionary; this changes how `information_schema` reflects DDL in
    /// flight. MariaDB has no equivalent.
    pub fn uses_data_dictionary(&self) -> bool {
        matches!(self.vendor, Vendor::Mysql | Vendor::Percona) && self.min(8, 0, 0)
    }

    /// MySQL/Percona 8.0.19+ stop displaying integer display widths
    /// (`int(11)` -> `int`) in `SHOW CREATE TABLE`, except `tinyint(1)`.
    pub fn omits_int_display_width(&self) -> bool {
        matches!(self.vendor, Vendor::Mysql | Vendor::Percona) && self.min(8, 0, 19)
    }

    /// `CREATE OR REPLACE PROCEDURE|FUNCTION`: MariaDB only.
    pub fn allows_create_or_replace_routine(&self) -> bool {
        self.is_mariadb()
    }

    /// `DROP CHECK` (MySQL/Percona) vs `DROP CONSTRAINT` (MariaDB).
    pub fn check_drop_keyword(&self) -> &'static str {
        if self.is_mariadb() { "CONSTRAINT" } else { "CHECK" }
    }

    /// `INVISIBLE` (MySQL/Percona indexes and columns) vs `IGNORED`
    /// (MariaDB, constraint enforcement only — not indexes).
    pub fn invisible_keyword(&self) -> &'static str {
        if self.is_mariadb() { "IGNORED" } else { "INVISIBLE" }
    }

    pub fn allows_create_or_replace_table(&self) -> bool {
        self.is_mariadb()
    }

    /// `utf8` is an alias for `utf8mb3` that MySQL 8.0.24+/MariaDB still
    /// accept on input but normalize away from `SHOW CREATE` on some
    /// versions; treated as a display spelling choice, not semantics.
    pub fn spells_utf8mb3_as_utf8(&self) -> bool {
        if self.is_mariadb() {
            true
        } else {
            !self.min(8, 0, 24)
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor, self.version)
    }
}

impl FromStr for Flavor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Flavor::parse(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_mysql_80() {
        let f = Flavor::parse("mysql:8.0");
        assert_eq!(f.vendor, Vendor::Mysql);
        assert_eq!(f.version, Version::new(8, 0, 0));
        assert!(f.uses_data_dictionary());
        assert!(!f.omits_int_display_width());
    }

    #[test]
    fn parses_percona_with_arch_suffix() {
        let f = Flavor::parse("percona/percona-server:8.1.0-aarch64");
        assert_eq!(f.vendor, Vendor::Percona);
        assert_eq!(f.version, Version::new(8, 1, 0));
        assert!(f.variant.contains(Variant::PERCONA_EXTENSIONS));
    }

    #[test]
    fn parses_mariadb_1011() {
        let f = Flavor::parse("mariadb:10.11");
        assert_eq!(f.vendor, Vendor::MariaDb);
        assert!(f.supports_check_constraints());
        assert!(!f.supports_invisible_indexes());
        assert_eq!(f.check_drop_keyword(), "CONSTRAINT");
        assert_eq!(f.invisible_keyword(), "IGNORED");
    }

    #[test]
    fn mysql_8_0_19_omits_display_width() {
        assert!(Flavor::parse("mysql:8.0.19").omits_int_display_width());
        assert!(!Flavor::parse("mysql:8.0.18").omits_int_display_width());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let f = Flavor::parse("mariadb:10.11.2");
        assert_eq!(f.to_string(), "mariadb:10.11.2");
    }

    #[test]
    fn create_or_replace_routine_is_mariadb_only() {
        assert!(Flavor::parse("mariadb:10.3").allows_create_or_replace_routine());
        assert!(!Flavor::parse("mysql:8.0").allows_create_or_replace_routine());
    }
}
