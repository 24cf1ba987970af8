mod boat;
mod page;
mod principal;

pub use boat::{Boat, BoatType, NewBoat, UnknownBoatType};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField};
pub use principal::{NewPrincipal, Principal};
