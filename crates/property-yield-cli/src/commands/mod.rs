pub mod analysis;
pub mod charges;
pub mod financing;
pub mod portfolio;
pub mod reference;
