use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Mysql,
    MariaDb,
    Percona,
    Unknown,
}

impl Vendor {
    pub fn from_image(image: &str) -> Vendor {
        let image = image.to_ascii_lowercase();
        if image.contains("mariadb") {
            Vendor::MariaDb
        } else if image.contains("percona") {
            Vendor::Percona
        } else if image.contains("mysql") || image.contains("aurora") {
            Vendor::Mysql
        } else {
            Vendor::Unknown
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vendor::Mysql => "mysql",
            Vendor::MariaDb => "mariadb",
            Vendor::Percona => "percona",
            Vendor::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}
