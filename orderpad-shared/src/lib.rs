pub mod device;
pub mod notice;

pub use device::DeviceType;
pub use notice::Notice;
