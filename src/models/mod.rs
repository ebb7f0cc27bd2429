//! Data models for the game platform web API
//!
//! Every record here is decoded straight from the JSON an endpoint returns.
//! Wire key names are mapped with serde attributes; timestamps, template ids
//! and closed sets are normalised on the way in.

pub mod code;
pub mod creative;
pub mod enums;
pub mod error;
pub mod lego;
pub mod profile;
pub mod rating;
pub mod sac;
pub mod shop;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use code::{Code, CodeRedemption};
pub use creative::{CreativeDiscovery, CreativeDiscoveryV2, CreativeIsland, IslandLookup};
pub use enums::{
    CosmeticType, LegoWorldDeathType, LegoWorldDifficulty, LegoWorldGrantRole,
    LegoWorldGrantType, LegoWorldMetadataConstraint, LegoWorldMode, PaymentPlatform,
};
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult};
pub use lego::{AccessibleLegoWorld, DefaultLegoWorldMetadata, LegoWorld, LegoWorldMetadata};
pub use profile::{BattleRoyaleProfile, CommonCoreProfile, ItemProfile, Locker};
pub use rating::{AgeRating, RatingAuthority};
pub use sac::{SacEarnedProducts, SacEarnings};
pub use shop::WebShop;
pub use store::{CatalogEntry, ItemPurchase, Store};
