mod flavor;
mod variant;
mod vendor;
mod version;

pub use flavor::Flavor;
pub use variant::Variant;
pub use vendor::Vendor;
pub use version::Version;
