//! Rule-based field extractors for travel documents.

pub mod countries;
pub mod duration;
pub mod hotels;
pub mod patterns;
pub mod price;

pub use countries::CountryTable;
pub use duration::{extract_trip_length, TripLength};
pub use hotels::parse_hotel_line;
pub use price::{digits_only, extract_base_price};
