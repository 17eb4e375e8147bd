//! Configuration module

mod site;

pub use site::CatalogConfig;
pub use site::LlmsConfig;
pub use site::OverviewConfig;
pub use site::SiteConfig;
pub use site::TooltipsConfig;
