pub mod projection;
pub mod roi;
pub mod sensitivity;
