pub mod location;
pub mod property;
pub mod property_image;

pub use location::Entity as LocationEntity;
pub use property::Entity as PropertyEntity;
pub use property_image::Entity as PropertyImageEntity;
