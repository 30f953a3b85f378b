//! Shop and listing catalog services

pub mod listings;
pub mod shops;

pub use listings::ListingService;
pub use shops::ShopService;
