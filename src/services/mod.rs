mod boats;

pub use boats::BoatService;
