mod contact_dto;
mod inquiry_dto;
mod newsletter_dto;

pub use contact_dto::*;
pub use inquiry_dto::*;
pub use newsletter_dto::*;
