pub mod charging_cloud;
pub mod zaptec;

pub use self::charging_cloud::ChargingCloud;
