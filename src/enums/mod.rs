//! Enumerated types.

mod device_type;
mod dispatch_mode;

pub use device_type::DeviceType;
pub use dispatch_mode::DispatchMode;
