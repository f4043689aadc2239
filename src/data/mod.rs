pub mod calibration;
pub mod photo;
pub mod segment;
pub mod session;
